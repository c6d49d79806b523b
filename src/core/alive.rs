//! # Tracker of activities that have not returned yet.
//!
//! Every unit is inserted when the supervisor spawns it and removed when it reaches Done,
//! before its outcome (if any) is sent. The shutdown driver reads a snapshot to name the
//! activities still pending when the grace period runs out.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe slot → name map of running activities.
#[derive(Debug, Default)]
pub(crate) struct AliveTracker {
    state: Mutex<BTreeMap<usize, String>>,
}

impl AliveTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, slot: usize, name: &str) {
        self.lock().insert(slot, name.to_string());
    }

    pub(crate) fn remove(&self, slot: usize) {
        self.lock().remove(&slot);
    }

    /// Names of pending activities, in registration order.
    pub(crate) fn snapshot(&self) -> Vec<String> {
        self.lock().values().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<usize, String>> {
        // Critical sections never panic; a poisoned map is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_in_slot_order() {
        let alive = AliveTracker::new();
        alive.insert(2, "c");
        alive.insert(0, "a");
        alive.insert(1, "b");
        alive.remove(1);
        assert_eq!(alive.snapshot(), vec!["a".to_string(), "c".to_string()]);
    }
}
