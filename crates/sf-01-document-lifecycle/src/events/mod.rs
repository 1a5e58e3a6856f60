//! Events produced by successful lifecycle transitions
//!
//! The tracker queues these; the session host drains and publishes them.

use shared_types::{DocumentId, DocumentStatus, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Sent {
        document_id: DocumentId,
        total_signatures: u32,
        sent_at: Timestamp,
    },
    SignatureRecorded {
        document_id: DocumentId,
        completed_signatures: u32,
        total_signatures: u32,
    },
    Completed {
        document_id: DocumentId,
        completed_at: Timestamp,
    },
    Expired {
        document_id: DocumentId,
        expired_at: Timestamp,
        completed_signatures: u32,
        total_signatures: u32,
    },
}

impl LifecycleEvent {
    /// Metrics label for the transition.
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleEvent::Sent { .. } => "sent",
            LifecycleEvent::SignatureRecorded { .. } => "signed",
            LifecycleEvent::Completed { .. } => "completed",
            LifecycleEvent::Expired { .. } => "expired",
        }
    }

    /// Status the document holds right after this event.
    pub fn resulting_status(&self) -> DocumentStatus {
        match self {
            LifecycleEvent::Sent { .. } => DocumentStatus::Pending,
            LifecycleEvent::SignatureRecorded {
                completed_signatures,
                total_signatures,
                ..
            } if completed_signatures == total_signatures => DocumentStatus::Completed,
            LifecycleEvent::SignatureRecorded { .. } => DocumentStatus::Pending,
            LifecycleEvent::Completed { .. } => DocumentStatus::Completed,
            LifecycleEvent::Expired { .. } => DocumentStatus::Expired,
        }
    }
}
