//! Runtime core: registration, one-shot lifecycle, supervision.
//!
//! Internal modules:
//! - [`builder`]: registration window, sealed by `build()`;
//! - [`hooks`]: preload/teardown/activity lists;
//! - [`runtime`]: one-shot start and dispose gates, state accessors, shutdown driver;
//! - [`supervisor`]: spawns activities, contains panics, closes the completion channel;
//! - [`completions`]: receive-only completion channel;
//! - [`alive`]: activities that have not returned yet;
//! - [`shutdown`]: OS termination signals.

mod alive;
mod builder;
mod completions;
mod config;
mod hooks;
mod launch;
mod runtime;
mod shutdown;
mod supervisor;

pub use builder::RuntimeBuilder;
pub use completions::Completions;
pub use config::RuntimeConfig;
pub use launch::Launch;
pub use runtime::Runtime;
