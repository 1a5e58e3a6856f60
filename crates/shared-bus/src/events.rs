//! # Session Events
//!
//! Defines all event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::{ComponentId, DocumentId, DocumentStatus, Timestamp};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    // =========================================================================
    // DOCUMENT LIFECYCLE
    // =========================================================================
    /// Document left draft and is awaiting signatures.
    DocumentSent {
        document_id: DocumentId,
        total_signatures: u32,
        sent_at: Timestamp,
    },

    /// One more recipient signed.
    SignatureRecorded {
        document_id: DocumentId,
        completed_signatures: u32,
        total_signatures: u32,
    },

    /// The last outstanding signature arrived.
    DocumentCompleted {
        document_id: DocumentId,
        completed_at: Timestamp,
    },

    /// The signing deadline passed before completion.
    DocumentExpired {
        document_id: DocumentId,
        expired_at: Timestamp,
        completed_signatures: u32,
        total_signatures: u32,
    },

    // =========================================================================
    // AUTOSAVE
    // =========================================================================
    /// A draft snapshot was persisted.
    DraftSaved {
        document_id: DocumentId,
        saved_at: Timestamp,
    },

    /// A draft save was rejected by storage. The schedule keeps running.
    DraftSaveFailed {
        document_id: DocumentId,
        reason: String,
        failed_at: Timestamp,
    },

    // =========================================================================
    // FIELD VALIDATION
    // =========================================================================
    /// A form field was validated.
    FieldValidated {
        document_id: DocumentId,
        field: String,
        valid: bool,
        message: Option<String>,
    },
}

impl SessionEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::DocumentSent { .. }
            | Self::SignatureRecorded { .. }
            | Self::DocumentCompleted { .. }
            | Self::DocumentExpired { .. } => EventTopic::Lifecycle,
            Self::DraftSaved { .. } | Self::DraftSaveFailed { .. } => EventTopic::Autosave,
            Self::FieldValidated { .. } => EventTopic::Validation,
        }
    }

    /// Component that originated the event.
    #[must_use]
    pub fn source(&self) -> ComponentId {
        match self.topic() {
            EventTopic::Lifecycle => ComponentId::DocumentLifecycle,
            EventTopic::Autosave => ComponentId::Autosave,
            EventTopic::Validation => ComponentId::FieldValidation,
            EventTopic::All => ComponentId::SessionHost,
        }
    }

    /// Document this event concerns.
    #[must_use]
    pub fn document_id(&self) -> DocumentId {
        match self {
            Self::DocumentSent { document_id, .. }
            | Self::SignatureRecorded { document_id, .. }
            | Self::DocumentCompleted { document_id, .. }
            | Self::DocumentExpired { document_id, .. }
            | Self::DraftSaved { document_id, .. }
            | Self::DraftSaveFailed { document_id, .. }
            | Self::FieldValidated { document_id, .. } => *document_id,
        }
    }

    /// Status implied by a lifecycle event, `None` for other topics.
    #[must_use]
    pub fn implied_status(&self) -> Option<DocumentStatus> {
        match self {
            Self::DocumentSent { .. } => Some(DocumentStatus::Pending),
            Self::SignatureRecorded {
                completed_signatures,
                total_signatures,
                ..
            } => Some(if completed_signatures == total_signatures {
                DocumentStatus::Completed
            } else {
                DocumentStatus::Pending
            }),
            Self::DocumentCompleted { .. } => Some(DocumentStatus::Completed),
            Self::DocumentExpired { .. } => Some(DocumentStatus::Expired),
            _ => None,
        }
    }
}

/// Event topics for filtering subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    Lifecycle,
    Autosave,
    Validation,
    /// Matches every topic.
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Documents to include. Empty means all documents.
    pub documents: Vec<DocumentId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            documents: Vec::new(),
        }
    }

    /// Create a filter for a single document.
    #[must_use]
    pub fn document(document_id: DocumentId) -> Self {
        Self {
            topics: Vec::new(),
            documents: vec![document_id],
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &SessionEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let document_match =
            self.documents.is_empty() || self.documents.contains(&event.document_id());

        topic_match && document_match
    }
}
