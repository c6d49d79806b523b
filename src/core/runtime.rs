//! # Runtime: one-shot start, one-shot dispose, write-once state.
//!
//! ## Lifecycle
//! ```text
//! RuntimeBuilder ──build()──► Runtime (sealed)
//!
//! start(launch)            (any number of callers, any concurrency)
//!   └─► OnceCell::get_or_init ── first caller only ──┐
//!                                                    ▼
//!        for hook in preloads (registration order):
//!          ├─ Ok            → next
//!          └─ Err / panic   → PreloadFailed { index }, stop (no state, no activities)
//!        state.set(RuntimeState)
//!        supervise(activities) ──► Completions
//!   every caller ◄── clone of the single result
//!
//! dispose()                (any number of callers)
//!   └─► Once::call_once:
//!         for hook in teardowns (registration order):
//!           └─ catch_unwind(hook(&span)) → panic logged, next hook still runs
//! ```
//!
//! The two gates are independent: `dispose` works with or without a prior `start`.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once, OnceLock};
use std::time::{Duration, SystemTime};

use futures::FutureExt;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::{Span, debug, error, info, warn};

use crate::{
    activities::{ActivityRef, Env},
    core::{
        builder::RuntimeBuilder,
        completions::Completions,
        config::RuntimeConfig,
        hooks::{Hooks, PreloadHook, TeardownHook, take},
        launch::Launch,
        shutdown,
        supervisor::supervise,
    },
    error::{RuntimeError, TaskError},
    state::{Identity, Registrar, RuntimeState, Scene},
};

/// Supervised process runtime.
///
/// Build one with [`Runtime::builder`] in the entry point and share it by reference
/// (or `Arc`) with every collaborator that needs it.
///
/// # Example
/// ```rust
/// use runvisor::{ActivityFn, Env, Launch, Runtime, TaskError};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let rt = Runtime::<()>::builder()
///         .preload(|_env| async { Ok(()) })
///         .co([ActivityFn::arc("once", |_ctx, _env: Env<()>| async {
///             Err(TaskError::fail("boom"))
///         })])
///         .defer(|_span| println!("bye"))
///         .build();
///
///     let completions = rt.start(Launch::new(CancellationToken::new(), ())).await?;
///     assert_eq!(completions.recv().await, Some(TaskError::fail("boom")));
///     assert_eq!(completions.recv().await, None);
///
///     rt.dispose();
///     Ok(())
/// }
/// ```
pub struct Runtime<C> {
    cfg: RuntimeConfig,
    span: Span,

    preloads: Mutex<Vec<PreloadHook<C>>>,
    teardowns: Mutex<Vec<TeardownHook>>,
    activities: Mutex<Vec<ActivityRef<C>>>,
    counts: HookCounts,

    launching: AtomicBool,
    started: OnceCell<Result<Completions, RuntimeError>>,
    state: OnceLock<RuntimeState<C>>,
    disposed: Once,
}

#[derive(Clone, Copy, Debug)]
struct HookCounts {
    preloads: usize,
    teardowns: usize,
    activities: usize,
}

impl<C: Send + Sync + 'static> Runtime<C> {
    /// Opens the registration window.
    pub fn builder() -> RuntimeBuilder<C> {
        RuntimeBuilder::new()
    }

    pub(crate) fn new_internal(cfg: RuntimeConfig, span: Span, hooks: Hooks<C>) -> Self {
        let counts = HookCounts {
            preloads: hooks.preloads.len(),
            teardowns: hooks.teardowns.len(),
            activities: hooks.activities.len(),
        };
        Self {
            cfg,
            span,
            preloads: Mutex::new(hooks.preloads),
            teardowns: Mutex::new(hooks.teardowns),
            activities: Mutex::new(hooks.activities),
            counts,
            launching: AtomicBool::new(false),
            started: OnceCell::new(),
            state: OnceLock::new(),
            disposed: Once::new(),
        }
    }

    /// Starts the runtime at most once.
    ///
    /// The first call runs every preload hook in order, records the [`RuntimeState`] and
    /// spawns all activities. Concurrent and later calls wait for that execution and get
    /// a clone of its result; their `launch` is dropped unused.
    ///
    /// ### Errors
    /// - [`RuntimeError::PreloadFailed`] if a preload hook returned an error or panicked;
    ///   later hooks did not run and no activity was spawned.
    /// - [`RuntimeError::StartInterrupted`] if the first call was dropped before it finished.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(&self, launch: Launch<C>) -> Result<Completions, RuntimeError> {
        self.started
            .get_or_init(|| self.launch(launch))
            .await
            .clone()
    }

    async fn launch(&self, launch: Launch<C>) -> Result<Completions, RuntimeError> {
        // Hooks are consumed on the first attempt; a dropped attempt cannot be replayed.
        if self.launching.swap(true, Ordering::AcqRel) {
            error!(parent: &self.span, "previous start was dropped mid-way; runtime unusable");
            return Err(RuntimeError::StartInterrupted);
        }

        let Launch {
            token,
            config,
            identity,
            registrar,
            build,
            commit,
            started_at,
            scene,
        } = launch;
        let config = Arc::new(config);
        let env = Env::new(Arc::clone(&config), self.span.clone());

        let preloads = take(&self.preloads);
        let total = preloads.len();
        for (index, hook) in preloads.into_iter().enumerate() {
            debug!(parent: &self.span, index, total, "running preload hook");
            let env = env.clone();
            let error = match AssertUnwindSafe(async move { hook(env).await })
                .catch_unwind()
                .await
            {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(payload) => TaskError::from_panic(index, "preload", payload.as_ref()),
            };
            error!(
                parent: &self.span,
                index,
                label = error.as_label(),
                error = %error,
                "preload hook failed; startup aborted"
            );
            return Err(RuntimeError::PreloadFailed { index, error });
        }

        let activities = take(&self.activities);
        info!(
            parent: &self.span,
            app = %identity.name,
            build = %build,
            commit = %commit,
            scene = %scene,
            activities = activities.len(),
            "runtime started"
        );
        let _ = self.state.set(RuntimeState {
            identity,
            registrar,
            build,
            commit,
            started_at,
            scene,
            config,
        });

        Ok(supervise(activities, token, env))
    }

    /// Runs every teardown hook once, in registration order.
    ///
    /// Later calls return immediately; concurrent calls block until the first finishes.
    /// A panicking hook is logged and the remaining hooks still run.
    ///
    /// Must not be called from inside a teardown hook of the same runtime (deadlock).
    pub fn dispose(&self) {
        self.disposed.call_once(|| {
            let hooks = take(&self.teardowns);
            let total = hooks.len();
            for (index, hook) in hooks.into_iter().enumerate() {
                debug!(parent: &self.span, index, total, "running teardown hook");
                let span = &self.span;
                if let Err(payload) = std::panic::catch_unwind(AssertUnwindSafe(move || hook(span)))
                {
                    let err = TaskError::from_panic(index, "teardown", payload.as_ref());
                    error!(parent: &self.span, index, error = %err, "teardown hook panicked");
                }
            }
            info!(parent: &self.span, hooks = total, "runtime disposed");
        });
    }

    /// Starts the runtime and drives it until shutdown, then disposes it.
    ///
    /// The loop ends when:
    /// - every activity finished on its own → `Ok(())`;
    /// - an OS termination signal arrives or `launch.token` is cancelled → the token is
    ///   cancelled and activities get [`RuntimeConfig::grace`] to return.
    ///
    /// [`dispose`](Self::dispose) runs before this returns, whatever the outcome.
    ///
    /// ### Errors
    /// - anything [`start`](Self::start) returns;
    /// - [`RuntimeError::GraceExceeded`] with the names of activities still running.
    pub async fn run(&self, launch: Launch<C>) -> Result<(), RuntimeError> {
        let token = launch.token.clone();
        let res = self.drive(launch, &token).await;
        self.dispose();
        res
    }

    async fn drive(&self, launch: Launch<C>, token: &CancellationToken) -> Result<(), RuntimeError> {
        let completions = self.start(launch).await?;

        let signal = shutdown::wait_for_shutdown_signal();
        tokio::pin!(signal);
        let mut listening = true;

        loop {
            tokio::select! {
                res = &mut signal, if listening => match res {
                    Ok(name) => {
                        info!(parent: &self.span, signal = name, "shutdown requested");
                        break;
                    }
                    Err(e) => {
                        warn!(parent: &self.span, error = %e, "cannot listen for termination signals");
                        listening = false;
                    }
                },
                _ = token.cancelled() => {
                    info!(parent: &self.span, "lifetime token cancelled");
                    break;
                }
                entry = completions.recv() => match entry {
                    Some(e) => debug!(parent: &self.span, label = e.as_label(), "failure drained"),
                    None => {
                        info!(parent: &self.span, "all activities finished");
                        return Ok(());
                    }
                },
            }
        }

        token.cancel();
        self.wait_all_with_grace(&completions).await
    }

    /// Waits up to the grace period for the completion channel to close.
    async fn wait_all_with_grace(&self, completions: &Completions) -> Result<(), RuntimeError> {
        let grace = self.cfg.grace;
        let done = async {
            while let Some(e) = completions.recv().await {
                debug!(parent: &self.span, label = e.as_label(), "failure drained");
            }
        };

        match tokio::time::timeout(grace, done).await {
            Ok(()) => {
                info!(parent: &self.span, "all activities stopped within grace");
                Ok(())
            }
            Err(_elapsed) => {
                let pending = completions.pending();
                warn!(parent: &self.span, ?grace, ?pending, "grace exceeded");
                Err(RuntimeError::GraceExceeded { grace, pending })
            }
        }
    }

    /// True once [`start`](Self::start) completed successfully.
    pub fn is_started(&self) -> bool {
        self.state.get().is_some()
    }

    /// True once [`dispose`](Self::dispose) ran.
    pub fn is_disposed(&self) -> bool {
        self.disposed.is_completed()
    }

    /// Metadata recorded by a successful start; `None` before that.
    pub fn state(&self) -> Option<&RuntimeState<C>> {
        self.state.get()
    }

    /// Application identity; `None` until started.
    pub fn identity(&self) -> Option<&Identity> {
        self.state().map(RuntimeState::identity)
    }

    /// Service-discovery handle; `None` until started or if none was supplied.
    pub fn registrar(&self) -> Option<&Arc<dyn Registrar>> {
        self.state().and_then(RuntimeState::registrar)
    }

    /// Build stamp; `None` until started.
    pub fn build(&self) -> Option<&str> {
        self.state().map(RuntimeState::build)
    }

    /// Commit stamp; `None` until started.
    pub fn commit(&self) -> Option<&str> {
        self.state().map(RuntimeState::commit)
    }

    /// Start timestamp; `None` until started.
    pub fn started_at(&self) -> Option<SystemTime> {
        self.state().map(RuntimeState::started_at)
    }

    /// Time since the start timestamp; `None` until started.
    pub fn uptime(&self) -> Option<Duration> {
        self.state().map(RuntimeState::uptime)
    }

    /// Deployment scene; `None` until started.
    pub fn scene(&self) -> Option<Scene> {
        self.state().map(RuntimeState::scene)
    }

    /// Embedder configuration; `None` until started.
    pub fn config(&self) -> Option<&C> {
        self.state().map(RuntimeState::config)
    }

    /// Runtime settings.
    pub fn runtime_config(&self) -> &RuntimeConfig {
        &self.cfg
    }

    /// Logger handle shared with hooks and activities.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Number of registered preload hooks.
    pub fn preload_count(&self) -> usize {
        self.counts.preloads
    }

    /// Number of registered teardown hooks.
    pub fn teardown_count(&self) -> usize {
        self.counts.teardowns
    }

    /// Number of registered activities.
    pub fn activity_count(&self) -> usize {
        self.counts.activities
    }
}
