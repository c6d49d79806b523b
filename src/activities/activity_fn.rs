//! # Function-backed activity (`ActivityFn`)
//!
//! [`ActivityFn`] wraps a closure `F: Fn(CancellationToken, Env<C>) -> Fut`.
//!
//! ## Example
//! ```rust
//! use runvisor::{ActivityFn, ActivityRef, Env, TaskError};
//! use tokio_util::sync::CancellationToken;
//!
//! let a: ActivityRef<()> = ActivityFn::arc("worker", |ctx: CancellationToken, _env: Env<()>| async move {
//!     if ctx.is_cancelled() {
//!         return Ok(());
//!     }
//!     // do work...
//!     Ok::<_, TaskError>(())
//! });
//!
//! assert_eq!(a.name(), "worker");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::activities::{Activity, ActivityRef, Env};
use crate::error::TaskError;

/// Function-backed activity implementation.
#[derive(Debug)]
pub struct ActivityFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ActivityFn<F> {
    /// Creates a new function-backed activity.
    ///
    /// Prefer [`ActivityFn::arc`] when you immediately need an [`ActivityRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the activity and returns it as a shared handle.
    ///
    /// The closure's argument types are inferred from the target configuration type.
    pub fn arc<C, Fut>(name: impl Into<Cow<'static, str>>, f: F) -> ActivityRef<C>
    where
        C: Send + Sync + 'static,
        F: Fn(CancellationToken, Env<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<C, F, Fut> Activity<C> for ActivityFn<F>
where
    C: Send + Sync + 'static,
    F: Fn(CancellationToken, Env<C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: CancellationToken, env: Env<C>) -> Result<(), TaskError> {
        (self.f)(ctx, env).await
    }
}
