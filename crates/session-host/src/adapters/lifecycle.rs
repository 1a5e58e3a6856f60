//! # Lifecycle Event Adapter
//!
//! Maps tracker events onto the bus schema and keeps the lifecycle metrics
//! current.

use sf_01_document_lifecycle::LifecycleEvent;
use shared_bus::SessionEvent;
use shared_types::DocumentStatus;
use signflow_telemetry::{metric_inc, DOCUMENTS_BY_STATUS, LIFECYCLE_TRANSITIONS};

pub fn to_session_event(event: &LifecycleEvent) -> SessionEvent {
    match *event {
        LifecycleEvent::Sent {
            document_id,
            total_signatures,
            sent_at,
        } => SessionEvent::DocumentSent {
            document_id,
            total_signatures,
            sent_at,
        },
        LifecycleEvent::SignatureRecorded {
            document_id,
            completed_signatures,
            total_signatures,
        } => SessionEvent::SignatureRecorded {
            document_id,
            completed_signatures,
            total_signatures,
        },
        LifecycleEvent::Completed {
            document_id,
            completed_at,
        } => SessionEvent::DocumentCompleted {
            document_id,
            completed_at,
        },
        LifecycleEvent::Expired {
            document_id,
            expired_at,
            completed_signatures,
            total_signatures,
        } => SessionEvent::DocumentExpired {
            document_id,
            expired_at,
            completed_signatures,
            total_signatures,
        },
    }
}

/// Count a transition and move the document between status gauges.
pub fn record_transition(event: &LifecycleEvent, previous: DocumentStatus) {
    metric_inc!(LIFECYCLE_TRANSITIONS, &[event.label()]);

    let next = event.resulting_status();
    if next != previous {
        DOCUMENTS_BY_STATUS
            .with_label_values(&[previous.as_str()])
            .dec();
        DOCUMENTS_BY_STATUS.with_label_values(&[next.as_str()]).inc();
    }
}
