//! Document value and its signature-completion state machine
//!
//! State Machine:
//! ```text
//! [DRAFT] ──record_send(n > 0)──→ [PENDING {0/n}]
//!                                      │
//!                                      ├── record_signature ──→ [PENDING {k+1/n}]   (k + 1 < n)
//!                                      │
//!                                      ├── record_signature ──→ [COMPLETED {n/n}]   (k + 1 == n)
//!                                      │
//!                                      └── record_expiry (deadline passed) ──→ [EXPIRED {k/n}]
//! ```
//!
//! Status and counts live in one enum so they cannot disagree: `Draft` has no
//! counts, `Completed` has `completed == total` by construction, and only
//! `Pending`/`Expired` carry a partial count.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use shared_types::{DocumentId, DocumentStatus, Timestamp};

use crate::domain::expiry::{ExpiryOutcome, ExpiryPolicy};
use crate::error::{LifecycleError, LifecycleResult};

/// Signature-completion state. Counts are only present where meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Draft,
    Pending { total: u32, completed: u32 },
    Completed { total: u32 },
    Expired { total: u32, completed: u32 },
}

impl LifecycleState {
    #[must_use]
    pub fn status(&self) -> DocumentStatus {
        match self {
            LifecycleState::Draft => DocumentStatus::Draft,
            LifecycleState::Pending { .. } => DocumentStatus::Pending,
            LifecycleState::Completed { .. } => DocumentStatus::Completed,
            LifecycleState::Expired { .. } => DocumentStatus::Expired,
        }
    }

    #[must_use]
    pub fn total_signatures(&self) -> u32 {
        match *self {
            LifecycleState::Draft => 0,
            LifecycleState::Pending { total, .. }
            | LifecycleState::Completed { total }
            | LifecycleState::Expired { total, .. } => total,
        }
    }

    #[must_use]
    pub fn completed_signatures(&self) -> u32 {
        match *self {
            LifecycleState::Draft => 0,
            LifecycleState::Completed { total } => total,
            LifecycleState::Pending { completed, .. }
            | LifecycleState::Expired { completed, .. } => completed,
        }
    }
}

/// A document and its signature-completion accounting.
///
/// Mutation goes only through the guarded `record_*` methods. Any call that
/// would break the status/count invariant is rejected and leaves the value
/// unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DocumentRecord", into = "DocumentRecord")]
pub struct Document {
    id: DocumentId,
    title: String,
    created_at: Timestamp,
    state: LifecycleState,
    sent_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
    expires_at: Option<Timestamp>,
}

impl Document {
    /// Create a new draft.
    pub fn new(title: impl Into<String>, created_at: Timestamp) -> Self {
        Self::with_id(DocumentId::new(), title, created_at)
    }

    /// Create a new draft with a caller-chosen identifier.
    pub fn with_id(id: DocumentId, title: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            id,
            title: title.into(),
            created_at,
            state: LifecycleState::Draft,
            sent_at: None,
            completed_at: None,
            expires_at: None,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn sent_at(&self) -> Option<Timestamp> {
        self.sent_at
    }

    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    /// Signing deadline chosen at send time, if any.
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Derived status. Never fails.
    pub fn current_status(&self) -> DocumentStatus {
        self.state.status()
    }

    pub fn total_signatures(&self) -> u32 {
        self.state.total_signatures()
    }

    pub fn completed_signatures(&self) -> u32 {
        self.state.completed_signatures()
    }

    /// Completion progress for cards, rounded down.
    pub fn progress_percent(&self) -> u8 {
        let total = self.total_signatures();
        if total == 0 {
            return 0;
        }
        ((u64::from(self.completed_signatures()) * 100) / u64::from(total)) as u8
    }

    /// Rename the document. Only drafts may be edited.
    pub fn rename(&mut self, title: impl Into<String>) -> LifecycleResult<()> {
        self.require_draft("rename")?;
        self.title = title.into();
        Ok(())
    }

    /// Send the document for `total` signatures.
    ///
    /// Only valid from `Draft`; there is no resend.
    pub fn record_send(
        &mut self,
        total: u32,
        sent_at: Timestamp,
        deadline: Option<Timestamp>,
    ) -> LifecycleResult<()> {
        self.require_draft("send")?;
        if total == 0 {
            return Err(LifecycleError::InvalidSignatureTotal);
        }

        self.state = LifecycleState::Pending {
            total,
            completed: 0,
        };
        self.sent_at = Some(sent_at);
        self.expires_at = deadline;
        Ok(())
    }

    /// Count one more signature.
    ///
    /// Returns the new status. A document whose count already equals its
    /// total fails with `OverCompletion`, which takes precedence over the
    /// terminal-state check so the caller learns the accounting was full.
    pub fn record_signature(&mut self, signed_at: Timestamp) -> LifecycleResult<DocumentStatus> {
        match self.state {
            LifecycleState::Pending { total, completed } => {
                if completed >= total {
                    return Err(LifecycleError::OverCompletion { total });
                }
                let completed = completed + 1;
                if completed == total {
                    self.state = LifecycleState::Completed { total };
                    self.completed_at = Some(signed_at);
                } else {
                    self.state = LifecycleState::Pending { total, completed };
                }
                Ok(self.current_status())
            }
            LifecycleState::Completed { total } => Err(LifecycleError::OverCompletion { total }),
            LifecycleState::Draft | LifecycleState::Expired { .. } => {
                Err(LifecycleError::InvalidTransition {
                    operation: "sign",
                    from: self.current_status(),
                })
            }
        }
    }

    /// Expire a pending document whose deadline (plus grace) has passed.
    ///
    /// Terminal documents are left alone and report `AlreadyTerminal`.
    pub fn record_expiry(
        &mut self,
        now: Timestamp,
        deadline: Timestamp,
        policy: &ExpiryPolicy,
    ) -> LifecycleResult<ExpiryOutcome> {
        match self.state {
            LifecycleState::Draft => Err(LifecycleError::InvalidTransition {
                operation: "expire",
                from: DocumentStatus::Draft,
            }),
            LifecycleState::Completed { .. } | LifecycleState::Expired { .. } => {
                Ok(ExpiryOutcome::AlreadyTerminal)
            }
            LifecycleState::Pending { total, completed } => {
                if !policy.has_passed(deadline, now) {
                    return Ok(ExpiryOutcome::NotYetDue {
                        effective_deadline: policy.effective_deadline(deadline),
                    });
                }
                self.state = LifecycleState::Expired { total, completed };
                Ok(ExpiryOutcome::Expired)
            }
        }
    }

    /// Time left before the stored deadline, `None` if there is none or it passed.
    pub fn time_remaining(&self, now: Timestamp) -> Option<Duration> {
        let deadline = self.expires_at?;
        (deadline > now).then(|| deadline - now)
    }

    fn require_draft(&self, operation: &'static str) -> LifecycleResult<()> {
        match self.state {
            LifecycleState::Draft => Ok(()),
            _ => Err(LifecycleError::InvalidTransition {
                operation,
                from: self.current_status(),
            }),
        }
    }
}

/// Flat stored form of a `Document`.
///
/// Reading one back re-checks the status/count invariant, so a corrupted row
/// can never produce a `Document`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub title: String,
    pub status: DocumentStatus,
    pub total_signatures: u32,
    pub completed_signatures: u32,
    pub created_at: Timestamp,
    #[serde(default)]
    pub sent_at: Option<Timestamp>,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

impl From<Document> for DocumentRecord {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            status: doc.current_status(),
            total_signatures: doc.total_signatures(),
            completed_signatures: doc.completed_signatures(),
            title: doc.title,
            created_at: doc.created_at,
            sent_at: doc.sent_at,
            completed_at: doc.completed_at,
            expires_at: doc.expires_at,
        }
    }
}

impl TryFrom<DocumentRecord> for Document {
    type Error = LifecycleError;

    fn try_from(record: DocumentRecord) -> Result<Self, Self::Error> {
        let total = record.total_signatures;
        let completed = record.completed_signatures;
        let corrupt = |reason: String| LifecycleError::CorruptRecord { reason };

        if completed > total {
            return Err(corrupt(format!(
                "completed signatures {completed} exceed total {total}"
            )));
        }

        let state = match record.status {
            DocumentStatus::Draft if total == 0 => LifecycleState::Draft,
            DocumentStatus::Draft => {
                return Err(corrupt(format!("draft with {total} signatures")));
            }
            _ if total == 0 => {
                return Err(corrupt(format!("{} with zero signatures", record.status)));
            }
            DocumentStatus::Pending if completed < total => {
                LifecycleState::Pending { total, completed }
            }
            DocumentStatus::Completed if completed == total => LifecycleState::Completed { total },
            DocumentStatus::Expired if completed < total => {
                LifecycleState::Expired { total, completed }
            }
            status => {
                return Err(corrupt(format!(
                    "{status} inconsistent with {completed}/{total} signatures"
                )));
            }
        };

        Ok(Self {
            id: record.id,
            title: record.title,
            created_at: record.created_at,
            state,
            sent_at: record.sent_at,
            completed_at: record.completed_at,
            expires_at: record.expires_at,
        })
    }
}
