//! # Hook registry.
//!
//! Ordered, append-only lists filled by [`RuntimeBuilder`](crate::RuntimeBuilder) and handed
//! to the [`Runtime`](crate::Runtime) when the builder is sealed. Hooks are `FnOnce`: each
//! gate takes its list exactly once.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use futures::{FutureExt, future::BoxFuture};
use tracing::Span;

use crate::{
    activities::{ActivityRef, Env},
    error::TaskError,
};

/// Boxed preload hook.
pub(crate) type PreloadHook<C> =
    Box<dyn FnOnce(Env<C>) -> BoxFuture<'static, Result<(), TaskError>> + Send>;

/// Boxed teardown hook.
pub(crate) type TeardownHook = Box<dyn FnOnce(&Span) + Send>;

/// Everything registered before the runtime was built.
pub(crate) struct Hooks<C> {
    pub(crate) preloads: Vec<PreloadHook<C>>,
    pub(crate) teardowns: Vec<TeardownHook>,
    pub(crate) activities: Vec<ActivityRef<C>>,
}

impl<C> Default for Hooks<C> {
    fn default() -> Self {
        Self {
            preloads: Vec::new(),
            teardowns: Vec::new(),
            activities: Vec::new(),
        }
    }
}

impl<C: Send + Sync + 'static> Hooks<C> {
    pub(crate) fn push_preload<F, Fut>(&mut self, f: F)
    where
        F: FnOnce(Env<C>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        self.preloads.push(Box::new(move |env| f(env).boxed()));
    }

    pub(crate) fn push_teardown<F>(&mut self, f: F)
    where
        F: FnOnce(&Span) + Send + 'static,
    {
        self.teardowns.push(Box::new(f));
    }

    pub(crate) fn push_activities<I, A>(&mut self, activities: I)
    where
        I: IntoIterator<Item = A>,
        A: Into<Option<ActivityRef<C>>>,
    {
        self.activities
            .extend(activities.into_iter().filter_map(Into::into));
    }
}

/// Takes a hook list out of its lock, leaving it empty.
pub(crate) fn take<T>(list: &Mutex<Vec<T>>) -> Vec<T> {
    std::mem::take(&mut *list.lock().unwrap_or_else(PoisonError::into_inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activities::ActivityFn;

    #[test]
    fn test_none_activities_are_discarded() {
        let a: ActivityRef<()> = ActivityFn::arc("a", |_ctx, _env| async { Ok(()) });
        let b: ActivityRef<()> = ActivityFn::arc("b", |_ctx, _env| async { Ok(()) });

        let mut hooks = Hooks::<()>::default();
        hooks.push_activities([Some(a), None, Some(b), None]);

        let names: Vec<&str> = hooks.activities.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_take_empties_list() {
        let list = Mutex::new(vec![1, 2, 3]);
        assert_eq!(take(&list), vec![1, 2, 3]);
        assert!(take(&list).is_empty());
    }
}
