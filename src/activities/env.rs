//! # Execution environment handed to hooks and activities.

use std::sync::Arc;

use tracing::Span;

/// Configuration and logger handle passed to every preload hook and activity.
///
/// Cheap to clone: the configuration sits behind an `Arc` and a [`Span`] is a handle.
/// The runtime never inspects either value.
#[derive(Debug)]
pub struct Env<C> {
    config: Arc<C>,
    span: Span,
}

impl<C> Env<C> {
    pub(crate) fn new(config: Arc<C>, span: Span) -> Self {
        Self { config, span }
    }

    /// Configuration value supplied in [`Launch`](crate::Launch).
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Shared handle to the configuration value.
    pub fn config_arc(&self) -> Arc<C> {
        Arc::clone(&self.config)
    }

    /// Runtime span; enter it (or use `Instrument`) to attribute logs to the runtime.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

// Manual impl: `C` itself need not be `Clone`.
impl<C> Clone for Env<C> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            span: self.span.clone(),
        }
    }
}
