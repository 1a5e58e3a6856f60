//! Outbound ports (driven side - SPI)

use async_trait::async_trait;
use shared_types::Timestamp;

use crate::error::SaveError;

/// Port: persist a draft snapshot
///
/// The pump never calls `persist` again while a previous call is still
/// running, so implementations need not guard against overlapping writes.
#[async_trait]
pub trait SnapshotStore<T>: Send + Sync
where
    T: Send + 'static,
{
    async fn persist(&self, snapshot: T) -> Result<(), SaveError>;
}

/// Port: hear about save activity
///
/// The synchronous hooks run on the ticker and must not block. The async
/// ones run on the save task after the in-flight flag has been cleared.
#[async_trait]
pub trait AutosaveObserver: Send + Sync {
    fn on_save_started(&self) {}

    /// A boundary was skipped because the previous save is still running.
    fn on_tick_skipped(&self) {}

    async fn on_save_succeeded(&self, _saved_at: Timestamp) {}

    /// Called once per failed save attempt.
    async fn on_save_failed(&self, error: &SaveError, failed_at: Timestamp);
}

/// Observer that only logs
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpObserver;

#[async_trait]
impl AutosaveObserver for NoOpObserver {
    async fn on_save_failed(&self, error: &SaveError, _failed_at: Timestamp) {
        tracing::debug!(error = %error, "Autosave failure ignored by no-op observer");
    }
}
