//! # Supervisor: runs activities concurrently and funnels their failures.
//!
//! ## High-level architecture
//! ```text
//! supervise(activities, token, env):
//!   - mpsc::channel(N)                       (N = activity count, min 1)
//!   - AliveTracker: every slot inserted before its unit is spawned
//!
//! Spawn units (registration order):
//!   Activity[0]  Activity[1]  ...  Activity[N-1]
//!       │            │                   │
//!       └──► set.spawn(run_unit(slot, activity, token.clone(), env.clone(), tx.clone()))
//!                  └──► catch_unwind(activity.run(token, env))
//!                         ├─ Ok(())            → nothing sent
//!                         ├─ Err(e)            → try_send(e)   (Canceled included)
//!                         └─ panic(payload)    → try_send(TaskError::Panicked)
//!
//! Driver task:
//!   while set.join_next().await.is_some() {}  ──► drop(tx) ──► channel closed
//! ```
//!
//! ## Rules
//! - A panic never leaves its unit; siblings and the process are unaffected.
//! - The channel closes only after every unit reached Done.
//! - Nothing is aborted: the token is the only (cooperative) way to stop an activity.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error};

use crate::{
    activities::{ActivityRef, Env},
    core::{alive::AliveTracker, completions::Completions},
    error::TaskError,
};

/// Spawns every activity and returns the completion channel.
///
/// Must be called from within a tokio runtime.
pub(crate) fn supervise<C>(
    activities: Vec<ActivityRef<C>>,
    token: CancellationToken,
    env: Env<C>,
) -> Completions
where
    C: Send + Sync + 'static,
{
    let (tx, rx) = mpsc::channel::<TaskError>(activities.len().max(1));
    let alive = Arc::new(AliveTracker::new());
    let span = env.span().clone();

    let mut set = JoinSet::new();
    for (slot, activity) in activities.into_iter().enumerate() {
        alive.insert(slot, activity.name());
        let unit = run_unit(
            slot,
            activity,
            token.clone(),
            env.clone(),
            tx.clone(),
            Arc::clone(&alive),
        );
        set.spawn(unit.instrument(span.clone()));
    }

    tokio::spawn(
        async move {
            while let Some(joined) = set.join_next().await {
                if let Err(e) = joined {
                    // Only reachable if the tokio runtime aborts the unit.
                    error!(error = %e, "activity unit aborted");
                }
            }
            drop(tx);
            debug!("all activities done; completion channel closed");
        }
        .instrument(span),
    );

    Completions::new(rx, alive)
}

/// Runs one activity inside a panic boundary and reports its outcome.
async fn run_unit<C>(
    slot: usize,
    activity: ActivityRef<C>,
    token: CancellationToken,
    env: Env<C>,
    tx: mpsc::Sender<TaskError>,
    alive: Arc<AliveTracker>,
) where
    C: Send + Sync + 'static,
{
    let name = activity.name().to_string();
    debug!(slot, activity = %name, "activity running");

    let outcome = match AssertUnwindSafe(activity.run(token, env))
        .catch_unwind()
        .await
    {
        Ok(Ok(())) => {
            debug!(slot, activity = %name, "activity completed");
            None
        }
        Ok(Err(TaskError::Canceled)) => {
            debug!(slot, activity = %name, "activity exited on cancellation");
            Some(TaskError::Canceled)
        }
        Ok(Err(e)) => {
            error!(slot, activity = %name, label = e.as_label(), error = %e, "activity failed");
            Some(e)
        }
        Err(payload) => {
            let e = TaskError::from_panic(slot, &name, payload.as_ref());
            error!(slot, activity = %name, label = e.as_label(), error = %e, "activity panicked");
            Some(e)
        }
    };

    alive.remove(slot);
    if let Some(e) = outcome {
        // Capacity covers one entry per unit; this only fails once every reader is gone.
        if let Err(mpsc::error::TrySendError::Closed(e) | mpsc::error::TrySendError::Full(e)) =
            tx.try_send(e)
        {
            debug!(slot, activity = %name, error = %e, "completion dropped; no reader");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tracing::Span;

    use super::*;
    use crate::activities::ActivityFn;

    fn env() -> Env<()> {
        Env::new(Arc::new(()), Span::none())
    }

    async fn explode(msg: &'static str) -> Result<(), TaskError> {
        panic!("{msg}")
    }

    #[tokio::test]
    async fn test_no_activities_closes_immediately() {
        let completions = supervise::<()>(Vec::new(), CancellationToken::new(), env());
        assert_eq!(completions.recv().await, None);
        assert!(completions.pending().is_empty());
    }

    #[tokio::test]
    async fn test_reports_failures_and_panics() {
        let activities: Vec<ActivityRef<()>> = vec![
            ActivityFn::arc("slow", |_ctx, _env| async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(())
            }),
            ActivityFn::arc("boom", |_ctx, _env| async { Err(TaskError::fail("boom")) }),
            ActivityFn::arc("panicky", |_ctx, _env| explode("x")),
        ];
        let completions = supervise(activities, CancellationToken::new(), env());

        let mut got = completions.drain().await;
        got.sort_by_key(|e| e.as_label());
        assert_eq!(got.len(), 2);
        assert_eq!(got[0], TaskError::fail("boom"));
        match &got[1] {
            TaskError::Panicked { slot, name, info } => {
                assert_eq!(*slot, 2);
                assert_eq!(name, "panicky");
                assert_eq!(info, "x");
            }
            other => panic!("unexpected entry: {other:?}"),
        }
        assert_eq!(completions.recv().await, None);
    }

    #[tokio::test]
    async fn test_canceled_is_reported() {
        let token = CancellationToken::new();
        let activities: Vec<ActivityRef<()>> = vec![ActivityFn::arc(
            "waiter",
            |ctx: CancellationToken, _env| async move {
                ctx.cancelled().await;
                Err(TaskError::Canceled)
            },
        )];
        let completions = supervise(activities, token.clone(), env());
        assert_eq!(completions.pending(), vec!["waiter".to_string()]);

        token.cancel();
        assert_eq!(completions.drain().await, vec![TaskError::Canceled]);
        assert!(completions.pending().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_panic_does_not_disturb_siblings() {
        let finished = Arc::new(AtomicUsize::new(0));
        let mut activities: Vec<ActivityRef<()>> = Vec::new();
        for i in 0..8 {
            let finished = Arc::clone(&finished);
            activities.push(ActivityFn::arc(format!("worker-{i}"), move |_ctx, _env| {
                let finished = Arc::clone(&finished);
                async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    finished.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            }));
        }
        activities.push(ActivityFn::arc("panicky", |_ctx, _env| explode("payload-p")));

        let completions = supervise(activities, CancellationToken::new(), env());
        let got = completions.drain().await;

        assert_eq!(got.len(), 1);
        assert!(got[0].to_string().contains("payload-p"));
        assert_eq!(finished.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn test_channel_waits_for_slowest_activity() {
        let token = CancellationToken::new();
        let activities: Vec<ActivityRef<()>> = vec![
            ActivityFn::arc("fast", |_ctx, _env| async { Err(TaskError::fail("early")) }),
            ActivityFn::arc("slow", |ctx: CancellationToken, _env| async move {
                ctx.cancelled().await;
                Ok(())
            }),
        ];
        let completions = supervise(activities, token.clone(), env());

        assert_eq!(completions.recv().await, Some(TaskError::fail("early")));
        let closed = tokio::time::timeout(Duration::from_millis(50), completions.recv()).await;
        assert!(closed.is_err(), "channel closed while an activity was running");

        token.cancel();
        assert_eq!(completions.recv().await, None);
    }
}
