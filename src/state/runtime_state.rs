//! # Write-once runtime state.
//!
//! [`RuntimeState`] is built by [`Runtime::start`](crate::Runtime::start) after every
//! preload hook succeeded and before any activity is spawned. It lives in a `OnceLock`,
//! so the single write happens-before every read that observes it.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::state::{Identity, Registrar, Scene};

/// Metadata of a started runtime.
pub struct RuntimeState<C> {
    pub(crate) identity: Identity,
    pub(crate) registrar: Option<Arc<dyn Registrar>>,
    pub(crate) build: String,
    pub(crate) commit: String,
    pub(crate) started_at: SystemTime,
    pub(crate) scene: Scene,
    pub(crate) config: Arc<C>,
}

impl<C> RuntimeState<C> {
    /// Application identity.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Service-discovery handle, if one was supplied.
    pub fn registrar(&self) -> Option<&Arc<dyn Registrar>> {
        self.registrar.as_ref()
    }

    /// Build stamp.
    pub fn build(&self) -> &str {
        &self.build
    }

    /// Commit stamp.
    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// Process start timestamp as supplied at launch.
    pub fn started_at(&self) -> SystemTime {
        self.started_at
    }

    /// Time elapsed since [`started_at`](Self::started_at).
    ///
    /// Zero if the wall clock moved behind the start timestamp.
    pub fn uptime(&self) -> Duration {
        SystemTime::now()
            .duration_since(self.started_at)
            .unwrap_or(Duration::ZERO)
    }

    /// Deployment scene.
    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// Configuration value supplied at launch.
    pub fn config(&self) -> &C {
        &self.config
    }
}

impl<C> fmt::Debug for RuntimeState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeState")
            .field("identity", &self.identity)
            .field("registrar", &self.registrar)
            .field("build", &self.build)
            .field("commit", &self.commit)
            .field("started_at", &self.started_at)
            .field("scene", &self.scene)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(started_at: SystemTime) -> RuntimeState<()> {
        RuntimeState {
            identity: Identity::new("id-1", "svc", "1.0.0"),
            registrar: None,
            build: "2026-10-19".into(),
            commit: "abc123".into(),
            started_at,
            scene: Scene::Test,
            config: Arc::new(()),
        }
    }

    #[test]
    fn test_uptime_counts_from_start() {
        let st = state(SystemTime::now() - Duration::from_secs(30));
        assert!(st.uptime() >= Duration::from_secs(30));
    }

    #[test]
    fn test_uptime_clamps_future_start() {
        let st = state(SystemTime::now() + Duration::from_secs(3600));
        assert_eq!(st.uptime(), Duration::ZERO);
    }

    #[test]
    fn test_debug_skips_config() {
        let out = format!("{:?}", state(SystemTime::UNIX_EPOCH));
        assert!(out.contains("abc123"));
        assert!(out.contains(".."));
    }
}
