//! # Start parameters.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use tokio_util::sync::CancellationToken;

use crate::state::{Identity, Registrar, Scene};

/// Everything [`Runtime::start`](crate::Runtime::start) needs from the embedder.
///
/// Only the first start call's `Launch` is used; later calls drop theirs.
///
/// ```
/// use runvisor::{Identity, Launch, Scene};
/// use tokio_util::sync::CancellationToken;
///
/// let launch = Launch::new(CancellationToken::new(), ())
///     .with_identity(Identity::new("i-1", "billing", "2.3.0"))
///     .with_build("2026-10-19T08:00:00Z", "9f1c2e7")
///     .with_scene(Scene::Pre);
/// assert_eq!(launch.commit, "9f1c2e7");
/// ```
pub struct Launch<C> {
    /// Lifetime token forwarded to every activity.
    pub token: CancellationToken,
    /// Embedder configuration, handed to hooks and activities.
    pub config: C,
    /// Application identity.
    pub identity: Identity,
    /// Service-discovery handle.
    pub registrar: Option<Arc<dyn Registrar>>,
    /// Build stamp.
    pub build: String,
    /// Commit stamp.
    pub commit: String,
    /// Process start timestamp.
    pub started_at: SystemTime,
    /// Deployment scene.
    pub scene: Scene,
}

impl<C> Launch<C> {
    /// Creates launch parameters; `started_at` defaults to now, the rest to empty values.
    pub fn new(token: CancellationToken, config: C) -> Self {
        Self {
            token,
            config,
            identity: Identity::default(),
            registrar: None,
            build: String::new(),
            commit: String::new(),
            started_at: SystemTime::now(),
            scene: Scene::default(),
        }
    }

    /// Sets the application identity.
    #[must_use]
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    /// Sets the service-discovery handle.
    #[must_use]
    pub fn with_registrar(mut self, registrar: Arc<dyn Registrar>) -> Self {
        self.registrar = Some(registrar);
        self
    }

    /// Sets build and commit stamps.
    #[must_use]
    pub fn with_build(mut self, build: impl Into<String>, commit: impl Into<String>) -> Self {
        self.build = build.into();
        self.commit = commit.into();
        self
    }

    /// Overrides the start timestamp.
    #[must_use]
    pub fn with_started_at(mut self, started_at: SystemTime) -> Self {
        self.started_at = started_at;
        self
    }

    /// Sets the deployment scene.
    #[must_use]
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scene = scene;
        self
    }
}

impl<C> fmt::Debug for Launch<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Launch")
            .field("identity", &self.identity)
            .field("build", &self.build)
            .field("commit", &self.commit)
            .field("scene", &self.scene)
            .finish_non_exhaustive()
    }
}
