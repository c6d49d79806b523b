//! # Completion channel handed back by [`Runtime::start`](crate::Runtime::start).
//!
//! [`Completions`] is a receive-only handle over one bounded `mpsc` queue:
//!
//! ```text
//! unit #0 ──┐
//! unit #1 ──┼── try_send(TaskError) ──► [queue, capacity = N] ──► Completions::recv()
//! unit #N ──┘
//!               driver: join all units ──► drop last sender ──► recv() == None
//! ```
//!
//! ## Rules
//! - Capacity equals the activity count, so units never wait on a full queue.
//! - `recv()` returns `None` once every activity reached Done and the queue is drained.
//! - Clones share the queue: each entry is delivered to exactly one reader.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use crate::{core::alive::AliveTracker, error::TaskError};

/// Receive-only handle over activity failures.
#[derive(Clone, Debug)]
pub struct Completions {
    rx: Arc<Mutex<mpsc::Receiver<TaskError>>>,
    alive: Arc<AliveTracker>,
}

impl Completions {
    pub(crate) fn new(rx: mpsc::Receiver<TaskError>, alive: Arc<AliveTracker>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
            alive,
        }
    }

    /// Waits for the next failure.
    ///
    /// Returns `None` once every activity has finished and all entries were received.
    /// Cancel-safe: usable as a `tokio::select!` branch.
    pub async fn recv(&self) -> Option<TaskError> {
        self.rx.lock().await.recv().await
    }

    /// Receives every remaining entry until the channel closes.
    pub async fn drain(&self) -> Vec<TaskError> {
        let mut rx = self.rx.lock().await;
        let mut out = Vec::new();
        while let Some(err) = rx.recv().await {
            out.push(err);
        }
        out
    }

    /// Names of activities that have not returned yet, in registration order.
    pub fn pending(&self) -> Vec<String> {
        self.alive.snapshot()
    }

    /// True if both handles read the same queue.
    pub fn same_channel(&self, other: &Completions) -> bool {
        Arc::ptr_eq(&self.rx, &other.rx)
    }
}
