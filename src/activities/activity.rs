//! # Activity abstraction.
//!
//! This module defines the [`Activity`] trait (async, cancelable) and the shared handle
//! type [`ActivityRef`], an `Arc<dyn Activity<C>>` suitable for sharing across the runtime.
//!
//! An activity receives a [`CancellationToken`] and an [`Env`] and should watch the token
//! to stop cooperatively during shutdown. The runtime never aborts an activity.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{activities::Env, error::TaskError};

/// Shared handle to an activity.
pub type ActivityRef<C> = Arc<dyn Activity<C>>;

/// # Asynchronous, cancelable background activity.
///
/// An `Activity` has a human-readable [`name`](Activity::name) and an async
/// [`run`](Activity::run) method. It is run exactly once per runtime; there are no restarts.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use runvisor::{Activity, Env, TaskError};
/// use tokio_util::sync::CancellationToken;
///
/// struct Heartbeat;
///
/// #[async_trait]
/// impl Activity<()> for Heartbeat {
///     fn name(&self) -> &str { "heartbeat" }
///
///     async fn run(&self, ctx: CancellationToken, _env: Env<()>) -> Result<(), TaskError> {
///         ctx.cancelled().await;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Activity<C>: Send + Sync + 'static {
    /// Returns a stable, human-readable activity name.
    fn name(&self) -> &str;

    /// Runs the activity to completion.
    ///
    /// `Ok(())` is a clean exit. Any error, `TaskError::Canceled` included, is delivered
    /// on the completion channel; so is a panic.
    async fn run(&self, ctx: CancellationToken, env: Env<C>) -> Result<(), TaskError>;
}
