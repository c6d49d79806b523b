//! # Runtime configuration.
//!
//! Provides [`RuntimeConfig`], settings for the runtime itself. The embedder's own
//! configuration value travels separately through [`Launch`](crate::Launch).
//!
//! ## Sentinel values
//! - `grace = 0s` → don't wait; activities that already returned still count as stopped

use std::time::Duration;

/// Settings for the runtime.
///
/// ## Field semantics
/// - `grace`: maximum wait for activities to return after the lifetime token is cancelled
///   by [`Runtime::run`](crate::Runtime::run) (`0s` = no wait)
/// - `span_name`: name recorded on the default runtime span
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Maximum time to wait for activities to return during shutdown.
    ///
    /// When the shutdown driver observes a signal or a cancelled token:
    /// - the lifetime token is cancelled,
    /// - the driver waits up to `grace` for the completion channel to close,
    /// - on timeout it returns `RuntimeError::GraceExceeded` (activities are not aborted).
    pub grace: Duration,

    /// Value of the `runtime` field on the default span (ignored with `with_span`).
    pub span_name: &'static str,
}

impl Default for RuntimeConfig {
    /// Default configuration:
    ///
    /// - `grace = 60s`
    /// - `span_name = "runtime"`
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(60),
            span_name: "runtime",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.grace, Duration::from_secs(60));
        assert_eq!(cfg.span_name, "runtime");
    }
}
