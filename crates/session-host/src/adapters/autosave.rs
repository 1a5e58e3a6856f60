//! # Autosave Observer Adapter
//!
//! Turns autosave results into bus events for the toast/header
//! collaborators and into Prometheus counters.

use std::sync::Arc;

use async_trait::async_trait;
use sf_02_autosave::{AutosaveObserver, SaveError};
use shared_bus::{EventPublisher, InMemoryEventBus, SessionEvent};
use shared_types::{ComponentId, DocumentId, Timestamp};
use signflow_telemetry::{metric_inc, record_error, AUTOSAVE_SAVES, AUTOSAVE_TICKS_SKIPPED};
use tracing::debug;

/// Publishes `DraftSaved` / `DraftSaveFailed` for one document.
pub struct BusAutosaveObserver {
    document_id: DocumentId,
    bus: Arc<InMemoryEventBus>,
}

impl BusAutosaveObserver {
    pub fn new(document_id: DocumentId, bus: Arc<InMemoryEventBus>) -> Self {
        Self { document_id, bus }
    }
}

#[async_trait]
impl AutosaveObserver for BusAutosaveObserver {
    fn on_save_started(&self) {
        metric_inc!(AUTOSAVE_SAVES, &["started"]);
    }

    fn on_tick_skipped(&self) {
        metric_inc!(AUTOSAVE_TICKS_SKIPPED);
    }

    async fn on_save_succeeded(&self, saved_at: Timestamp) {
        metric_inc!(AUTOSAVE_SAVES, &["succeeded"]);
        let receivers = self
            .bus
            .publish(SessionEvent::DraftSaved {
                document_id: self.document_id,
                saved_at,
            })
            .await;
        debug!(document_id = %self.document_id, receivers, "Draft save published");
    }

    async fn on_save_failed(&self, error: &SaveError, failed_at: Timestamp) {
        metric_inc!(AUTOSAVE_SAVES, &["failed"]);
        record_error(ComponentId::Autosave, error.kind(), error);
        self.bus
            .publish(SessionEvent::DraftSaveFailed {
                document_id: self.document_id,
                reason: error.to_string(),
                failed_at,
            })
            .await;
    }
}
