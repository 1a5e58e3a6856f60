//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Documents**: `DocumentId`, `DocumentStatus`
//! - **Time**: `Timestamp`
//! - **Components**: `ComponentId`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::ParseError;

// =============================================================================
// DOCUMENTS
// =============================================================================

/// UTC wall-clock instant used for every persisted or displayed time.
pub type Timestamp = DateTime<Utc>;

/// Opaque, immutable document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DocumentId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ParseError::InvalidDocumentId(e.to_string()))
    }
}

/// Signature-completion status of a document.
///
/// ```text
/// [DRAFT] ──send──→ [PENDING] ──last signature──→ [COMPLETED]
///                       │
///                       └──deadline passed──→ [EXPIRED]
/// ```
///
/// `Completed` and `Expired` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Pending,
    Completed,
    Expired,
}

impl DocumentStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [DocumentStatus; 4] = [
        DocumentStatus::Draft,
        DocumentStatus::Pending,
        DocumentStatus::Completed,
        DocumentStatus::Expired,
    ];

    /// Lowercase name as used in listings and filters.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Pending => "pending",
            DocumentStatus::Completed => "completed",
            DocumentStatus::Expired => "expired",
        }
    }

    /// No transition leaves a terminal status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentStatus::Completed | DocumentStatus::Expired)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(DocumentStatus::Draft),
            "pending" => Ok(DocumentStatus::Pending),
            "completed" => Ok(DocumentStatus::Completed),
            "expired" => Ok(DocumentStatus::Expired),
            other => Err(ParseError::UnknownStatus(other.to_string())),
        }
    }
}

// =============================================================================
// COMPONENTS
// =============================================================================

/// Identifies which component produced an event or log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentId {
    DocumentLifecycle,
    Autosave,
    FieldValidation,
    SessionHost,
}

impl ComponentId {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentId::DocumentLifecycle => "sf-01-document-lifecycle",
            ComponentId::Autosave => "sf-02-autosave",
            ComponentId::FieldValidation => "sf-03-field-validation",
            ComponentId::SessionHost => "session-host",
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
