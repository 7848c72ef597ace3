use events::RequestId;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// Tells a caller whether a result still belongs to its most recent request.
///
/// Delegated calls are not cancelled and may complete out of order. A caller
/// that issues a new request (e.g. after a filter change) keeps one tracker
/// and drops any result whose id is no longer the latest one issued.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new id, superseding every id issued before it.
    pub fn issue(&self) -> RequestId {
        RequestId(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_latest(&self, id: RequestId) -> bool {
        self.latest.load(Ordering::Acquire) == id.0
    }

    /// Awaits `call` under a fresh id; yields `None` if a newer request was
    /// issued while it was in flight.
    pub async fn latest<F: Future>(&self, call: F) -> Option<F::Output> {
        let id = self.issue();
        let output = call.await;
        if self.is_latest(id) {
            Some(output)
        } else {
            tracing::debug!(request = %id, "Discarding stale result.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ids_supersede_older_ones() {
        let tracker = RequestTracker::new();
        let first = tracker.issue();
        assert!(tracker.is_latest(first));
        let second = tracker.issue();
        assert!(second > first);
        assert!(!tracker.is_latest(first));
        assert!(tracker.is_latest(second));
    }

    #[tokio::test]
    async fn stale_call_is_discarded() {
        let tracker = RequestTracker::new();
        let stale = tracker.latest(async {
            // A newer request is issued while this one is still running.
            tracker.issue();
            1
        });
        assert_eq!(stale.await, None);
        assert_eq!(tracker.latest(async { 2 }).await, Some(2));
    }
}
