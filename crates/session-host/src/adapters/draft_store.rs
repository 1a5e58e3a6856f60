//! # In-Memory Draft Store
//!
//! Development and test `SnapshotStore`. Keeps every saved revision and can
//! be told to fail upcoming saves.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use sf_02_autosave::{SaveError, SnapshotStore};
use shared_types::Timestamp;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRevision {
    pub body: String,
    pub saved_at: Timestamp,
}

#[derive(Debug, Default)]
pub struct InMemoryDraftStore {
    revisions: RwLock<Vec<DraftRevision>>,
    failures_remaining: AtomicU32,
    latency: Duration,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every save takes `latency` before resolving.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Fail the next `count` saves with `SaveError::Unavailable`.
    pub fn fail_next(&self, count: u32) {
        self.failures_remaining.store(count, Ordering::SeqCst);
    }

    pub fn latest(&self) -> Option<DraftRevision> {
        self.revisions.read().last().cloned()
    }

    pub fn revisions(&self) -> Vec<DraftRevision> {
        self.revisions.read().clone()
    }

    pub fn revision_count(&self) -> usize {
        self.revisions.read().len()
    }
}

#[async_trait]
impl SnapshotStore<String> for InMemoryDraftStore {
    async fn persist(&self, snapshot: String) -> Result<(), SaveError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let should_fail = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(SaveError::Unavailable("draft store offline".to_string()));
        }

        let mut revisions = self.revisions.write();
        revisions.push(DraftRevision {
            body: snapshot,
            saved_at: Utc::now(),
        });
        trace!(revision = revisions.len(), "Draft revision stored");
        Ok(())
    }
}
