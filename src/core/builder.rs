//! # Registration window.
//!
//! [`RuntimeBuilder`] collects preload hooks, activities and teardown hooks; `build()`
//! moves them into a [`Runtime`] that exposes no way to add more.

use std::future::Future;

use tracing::Span;

use crate::{
    activities::{ActivityRef, Env},
    core::{config::RuntimeConfig, hooks::Hooks, runtime::Runtime},
    error::TaskError,
};

/// Registration window of a [`Runtime`].
///
/// Hooks and activities can only be added here; [`build`](Self::build) seals the registry,
/// so registering after start does not compile.
///
/// ```
/// use runvisor::{ActivityFn, Env, Runtime, TaskError};
///
/// let rt = Runtime::<()>::builder()
///     .preload(|_env| async { Ok::<_, TaskError>(()) })
///     .defer(|_span| {})
///     .co([ActivityFn::arc("ticker", |_ctx, _env: Env<()>| async { Ok(()) })])
///     .build();
/// assert_eq!(rt.activity_count(), 1);
/// ```
pub struct RuntimeBuilder<C> {
    cfg: RuntimeConfig,
    span: Option<Span>,
    hooks: Hooks<C>,
}

impl<C: Send + Sync + 'static> RuntimeBuilder<C> {
    /// Creates an empty builder with the default [`RuntimeConfig`].
    pub fn new() -> Self {
        Self {
            cfg: RuntimeConfig::default(),
            span: None,
            hooks: Hooks::default(),
        }
    }

    /// Replaces the runtime configuration.
    pub fn with_config(mut self, cfg: RuntimeConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the span used as logger handle for hooks, activities and runtime diagnostics.
    ///
    /// Defaults to `info_span!("runtime", runtime = cfg.span_name)`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Appends a preload hook.
    ///
    /// Preload hooks run in registration order during the single effective
    /// [`Runtime::start`]; the first error (or panic) aborts startup.
    pub fn preload<F, Fut>(mut self, f: F) -> Self
    where
        F: FnOnce(Env<C>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        self.hooks.push_preload(f);
        self
    }

    /// Appends a teardown hook, run once by [`Runtime::dispose`] in registration order.
    ///
    /// A hook must not call `dispose` on the same runtime: the dispose gate is not
    /// re-entrant and would deadlock.
    pub fn defer<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&Span) + Send + 'static,
    {
        self.hooks.push_teardown(f);
        self
    }

    /// Appends background activities; `None` entries are skipped.
    pub fn co<I, A>(mut self, activities: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Option<ActivityRef<C>>>,
    {
        self.hooks.push_activities(activities);
        self
    }

    /// Seals the registry and returns the runtime.
    pub fn build(self) -> Runtime<C> {
        let span = self
            .span
            .unwrap_or_else(|| tracing::info_span!("runtime", runtime = self.cfg.span_name));
        Runtime::new_internal(self.cfg, span, self.hooks)
    }
}

impl<C: Send + Sync + 'static> Default for RuntimeBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
