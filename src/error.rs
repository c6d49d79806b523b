//! Error types used by the runvisor runtime, its hooks and activities.
//!
//! This module defines two main error enums:
//!
//! - [`RuntimeError`] - errors raised by the runtime itself (startup, shutdown driver).
//! - [`TaskError`] - errors raised by preload hooks and background activities.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//! Both are `Clone`: a single start result is handed to every caller of
//! [`Runtime::start`](crate::Runtime::start).

use std::any::Any;
use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the runvisor runtime.
///
/// `PreloadFailed` is the only failure of a completed [`Runtime::start`](crate::Runtime::start);
/// `StartInterrupted` means the first start future was dropped before finishing.
/// `GraceExceeded` is only produced by the [`Runtime::run`](crate::Runtime::run) shutdown driver.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A preload hook failed; startup was aborted and no activity was spawned.
    #[error("preload hook #{index} failed: {error}")]
    PreloadFailed {
        /// Registration slot of the failing hook (0-based).
        index: usize,
        /// What the hook returned (or how it panicked).
        error: TaskError,
    },

    /// The first start call was dropped before it finished; hooks cannot be replayed.
    #[error("a previous start was dropped before completing")]
    StartInterrupted,

    /// Shutdown grace period was exceeded; some activities never returned.
    #[error("shutdown timeout {grace:?} exceeded; pending: {pending:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Names of the activities that were still running.
        pending: Vec<String>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use runvisor::{RuntimeError, TaskError};
    ///
    /// let err = RuntimeError::PreloadFailed { index: 0, error: TaskError::fail("db down") };
    /// assert_eq!(err.as_label(), "runtime_preload_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::PreloadFailed { .. } => "runtime_preload_failed",
            RuntimeError::StartInterrupted => "runtime_start_interrupted",
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::PreloadFailed { index, error } => {
                format!("preload #{index}: {}", error.as_message())
            }
            RuntimeError::StartInterrupted => "start interrupted".to_string(),
            RuntimeError::GraceExceeded { grace, pending } => {
                format!("grace exceeded after {grace:?}; pending activities={pending:?}")
            }
        }
    }
}

/// # Errors produced by hooks and activities.
///
/// Every error an activity returns is delivered on the completion channel; `Panicked`
/// is built by the supervisor when an activity panics. `Canceled` marks an exit after
/// the lifetime token was cancelled; return `Ok(())` instead to leave no entry.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Execution failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Execution panicked; the panic was caught at the task boundary.
    ///
    /// Holds the rendered payload only. The stack has already unwound when the panic is
    /// caught, so no trace is attached; the default panic hook prints one to stderr when
    /// `RUST_BACKTRACE` is set.
    #[error("panicked in {name:?} (slot {slot}): {info}")]
    Panicked {
        /// Registration slot of the hook or activity.
        slot: usize,
        /// Name of the hook or activity.
        name: String,
        /// Rendered panic payload.
        info: String,
    },

    /// Activity observed cancellation and exited.
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Shorthand for [`TaskError::Fail`] from anything displayable.
    ///
    /// ```
    /// use runvisor::TaskError;
    ///
    /// let io = std::io::Error::other("refused");
    /// assert_eq!(TaskError::fail(io), TaskError::Fail { error: "refused".into() });
    /// ```
    pub fn fail(error: impl std::fmt::Display) -> Self {
        TaskError::Fail {
            error: error.to_string(),
        }
    }

    /// Converts a caught panic payload into [`TaskError::Panicked`].
    pub(crate) fn from_panic(slot: usize, name: &str, payload: &(dyn Any + Send)) -> Self {
        let info = if let Some(msg) = payload.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };
        TaskError::Panicked {
            slot,
            name: name.to_string(),
            info,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use runvisor::TaskError;
    ///
    /// assert_eq!(TaskError::fail("boom").as_label(), "task_failed");
    /// assert_eq!(TaskError::Canceled.as_label(), "task_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Panicked { .. } => "task_panicked",
            TaskError::Canceled => "task_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Panicked { name, info, .. } => format!("panic in {name}: {info}"),
            TaskError::Canceled => "context cancelled".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_payload_str() {
        let payload: Box<dyn Any + Send> = Box::new("x");
        let err = TaskError::from_panic(2, "worker", payload.as_ref());
        assert_eq!(
            err,
            TaskError::Panicked {
                slot: 2,
                name: "worker".into(),
                info: "x".into()
            }
        );
        assert!(err.to_string().contains('x'));
    }

    #[test]
    fn test_panic_payload_string() {
        let payload: Box<dyn Any + Send> = Box::new(format!("bad index {}", 7));
        let err = TaskError::from_panic(0, "indexer", payload.as_ref());
        assert!(err.as_message().contains("bad index 7"));
    }

    #[test]
    fn test_panic_payload_opaque() {
        let payload: Box<dyn Any + Send> = Box::new(42_u32);
        let err = TaskError::from_panic(0, "n", payload.as_ref());
        assert!(err.to_string().contains("unknown panic"));
    }

    #[test]
    fn test_preload_failed_message() {
        let err = RuntimeError::PreloadFailed {
            index: 1,
            error: TaskError::fail("boom"),
        };
        assert_eq!(err.to_string(), "preload hook #1 failed: execution failed: boom");
        assert_eq!(err.as_message(), "preload #1: error: boom");
    }
}
