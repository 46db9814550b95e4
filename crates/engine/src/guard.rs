use crate::request::RequestId;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Why a finished result was not applied.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discarded {
    #[error("result {id} was superseded by {latest}")]
    Superseded { id: RequestId, latest: RequestId },

    #[error("result {0} was already applied")]
    AlreadyApplied(RequestId),
}

/// Issues request ids for one logical selection and decides whether a finished
/// result may still be applied.
///
/// A result is accepted only if its id is the latest one issued and no result
/// with that id was accepted before. Both checks are lock-free.
#[derive(Debug, Default)]
pub struct SelectionGuard {
    latest: AtomicU64,
    applied: AtomicU64,
}

impl SelectionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new selection. Every id issued before this one becomes stale.
    pub fn issue(&self) -> RequestId {
        RequestId(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn latest(&self) -> RequestId {
        RequestId(self.latest.load(Ordering::Acquire))
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        id == self.latest()
    }

    /// Hands `value` back if the result for `id` may be applied.
    pub fn accept<T>(&self, id: RequestId, value: T) -> Result<T, Discarded> {
        let latest = self.latest();
        if id != latest {
            tracing::warn!(%id, %latest, "Discarding stale analytics result");
            return Err(Discarded::Superseded { id, latest });
        }

        let previous = self.applied.fetch_max(id.0, Ordering::AcqRel);
        if previous >= id.0 {
            tracing::warn!(%id, "Discarding duplicate analytics result");
            return Err(Discarded::AlreadyApplied(id));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn ids_increase_monotonically() {
        let guard = SelectionGuard::new();
        let first = guard.issue();
        let second = guard.issue();
        assert!(second > first);
        assert_eq!(guard.latest(), second);
        assert!(!guard.is_current(first));
    }

    #[test]
    fn stale_result_is_discarded() {
        let guard = SelectionGuard::new();
        let slow = guard.issue();
        let fast = guard.issue();

        assert_eq!(guard.accept(fast, "new"), Ok("new"));
        assert_eq!(
            guard.accept(slow, "old"),
            Err(Discarded::Superseded { id: slow, latest: fast })
        );
    }

    #[test]
    fn same_result_applies_once() {
        let guard = SelectionGuard::new();
        let id = guard.issue();
        assert!(guard.accept(id, ()).is_ok());
        assert_eq!(guard.accept(id, ()), Err(Discarded::AlreadyApplied(id)));
    }

    #[test]
    fn concurrent_completions_apply_at_most_once() {
        let guard = SelectionGuard::new();
        let id = guard.issue();
        let accepted = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    if guard.accept(id, ()).is_ok() {
                        accepted.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(accepted.load(Ordering::SeqCst), 1);
    }
}
