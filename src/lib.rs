//! # runvisor
//!
//! **Runvisor** is a one-shot supervised runtime for long-running service processes.
//!
//! It registers setup hooks, background activities and teardown hooks during a sealed
//! registration window, starts them exactly once, contains activity panics, reports
//! failures on a completion channel, and tears down exactly once.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   RuntimeBuilder (registration window)
//!     .preload(hook)   .co([activity, ...])   .defer(hook)
//!            │                  │                  │
//!            └──────────────────┼──────────────────┘
//!                               ▼ build() (sealed)
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Runtime                                                          │
//! │  - start gate  (OnceCell: one execution, result shared)           │
//! │  - dispose gate (Once: teardown hooks once, in order)             │
//! │  - RuntimeState (OnceLock: identity, registrar, build, commit, …) │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        ▼ start(launch)
//!   preload #0 → preload #1 → … (in order; first failure aborts)
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Supervisor                                                       │
//! │    unit #0          unit #1          unit #N-1                    │
//! │    catch_unwind     catch_unwind     catch_unwind                 │
//! │    activity.run     activity.run     activity.run                 │
//! │        │ Err/panic      │                │                        │
//! │        └────────────────┴────────────────┴──► mpsc (capacity N)   │
//! │  driver: join all units ──► close channel                         │
//! └───────────────────────────────────────────┬───────────────────────┘
//!                                             ▼
//!                             Completions::recv() (embedder loop)
//! ```
//!
//! ### Lifecycle
//! ```text
//! registration ──► build() ──► start(launch) ──► activities run ──► dispose()
//!                                  │                                   │
//!                     K callers → 1 execution              M callers → 1 execution
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                           |
//! |-------------------|---------------------------------------------------------------|----------------------------------------------|
//! | **Registration**  | Preload/teardown hooks and activities, sealed by `build()`.   | [`RuntimeBuilder`]                           |
//! | **Lifecycle**     | One-shot start and dispose, shutdown driver.                  | [`Runtime`], [`Launch`]                      |
//! | **Supervision**   | Concurrent activities, panic containment, completion channel. | [`Completions`]                              |
//! | **Activities**    | Define activities as functions or trait objects.              | [`Activity`], [`ActivityFn`], [`ActivityRef`]|
//! | **State**         | Write-once metadata for diagnostics and health surfaces.      | [`RuntimeState`], [`Identity`], [`Scene`]    |
//! | **Errors**        | Typed errors for the runtime and for hooks/activities.        | [`RuntimeError`], [`TaskError`]              |
//! | **Configuration** | Runtime settings.                                             | [`RuntimeConfig`]                            |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use runvisor::{ActivityFn, Env, Launch, Runtime, TaskError};
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Debug)]
//! struct AppConfig {
//!     tick: Duration,
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rt = Runtime::<AppConfig>::builder()
//!         .preload(|env| async move {
//!             if env.config().tick.is_zero() {
//!                 return Err(TaskError::fail("tick must be positive"));
//!             }
//!             Ok(())
//!         })
//!         .co([ActivityFn::arc(
//!             "ticker",
//!             |ctx: CancellationToken, env: Env<AppConfig>| async move {
//!                 while !ctx.is_cancelled() {
//!                     tokio::time::sleep(env.config().tick).await;
//!                 }
//!                 Ok(())
//!             },
//!         )])
//!         .defer(|span| span.in_scope(|| tracing::info!("closing pools")))
//!         .build();
//!
//!     let token = CancellationToken::new();
//!     let cfg = AppConfig { tick: Duration::from_millis(5) };
//!     let completions = rt.start(Launch::new(token.clone(), cfg)).await?;
//!
//!     token.cancel();
//!     assert!(completions.drain().await.is_empty());
//!     rt.dispose();
//!     Ok(())
//! }
//! ```
mod activities;
mod core;
mod error;
mod state;

// ---- Public re-exports ----

pub use activities::{Activity, ActivityFn, ActivityRef, Env};
pub use crate::core::{Completions, Launch, Runtime, RuntimeBuilder, RuntimeConfig};
pub use error::{RuntimeError, TaskError};
pub use state::{Identity, ParseSceneError, Registrar, RuntimeState, Scene};
