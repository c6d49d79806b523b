//! # Activity abstractions.
//!
//! This module provides the background-work types:
//! - [`Activity`] - trait for implementing async cancelable activities
//! - [`ActivityFn`] - function-based activity implementation
//! - [`ActivityRef`] - shared reference to an activity (`Arc<dyn Activity<C>>`)
//! - [`Env`] - configuration and logger handle threaded into hooks and activities

mod activity;
mod activity_fn;
mod env;

pub use activity::{Activity, ActivityRef};
pub use activity_fn::ActivityFn;
pub use env::Env;
