//! Document Lifecycle Tracker
//!
//! Wraps a `Document` with a clock and an expiry policy, stamps transitions
//! with the clock's time and queues a `LifecycleEvent` for each successful
//! transition. Failed operations queue nothing and leave the document as it
//! was.

use std::sync::Arc;

use shared_types::{DocumentId, DocumentStatus, Timestamp};
use tracing::{debug, info, warn};

use crate::domain::{Document, DocumentSummary, ExpiryOutcome, ExpiryPolicy};
use crate::error::{LifecycleError, LifecycleResult};
use crate::events::LifecycleEvent;
use crate::ports::{Clock, SystemClock};

/// Lifecycle configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifecycleConfig {
    pub expiry: ExpiryPolicy,
}

/// Tracks one document's signature-completion lifecycle.
pub struct DocumentLifecycleTracker<C: Clock = SystemClock> {
    document: Document,
    config: LifecycleConfig,
    clock: Arc<C>,
    pending_events: Vec<LifecycleEvent>,
}

impl DocumentLifecycleTracker<SystemClock> {
    /// Start tracking a fresh draft on the wall clock.
    pub fn draft(title: impl Into<String>) -> Self {
        Self::new_draft(title, LifecycleConfig::default(), Arc::new(SystemClock))
    }
}

impl<C: Clock> DocumentLifecycleTracker<C> {
    /// Start tracking a fresh draft created "now".
    pub fn new_draft(title: impl Into<String>, config: LifecycleConfig, clock: Arc<C>) -> Self {
        let document = Document::new(title, clock.now());
        Self::from_document(document, config, clock)
    }

    /// Resume tracking an existing document.
    pub fn from_document(document: Document, config: LifecycleConfig, clock: Arc<C>) -> Self {
        Self {
            document,
            config,
            clock,
            pending_events: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_id(&self) -> DocumentId {
        self.document.id()
    }

    pub fn current_status(&self) -> DocumentStatus {
        self.document.current_status()
    }

    pub fn completed_signatures(&self) -> u32 {
        self.document.completed_signatures()
    }

    pub fn total_signatures(&self) -> u32 {
        self.document.total_signatures()
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary::from(&self.document)
    }

    pub fn rename(&mut self, title: impl Into<String>) -> LifecycleResult<()> {
        self.document.rename(title)
    }

    /// Send without a signing deadline.
    pub fn record_send(&mut self, total_signatures: u32) -> LifecycleResult<()> {
        self.record_send_with_deadline(total_signatures, None)
    }

    /// Send with an optional signing deadline enforced by `check_expiry`.
    pub fn record_send_with_deadline(
        &mut self,
        total_signatures: u32,
        deadline: Option<Timestamp>,
    ) -> LifecycleResult<()> {
        let sent_at = self.clock.now();
        self.document
            .record_send(total_signatures, sent_at, deadline)
            .inspect_err(|e| self.log_rejection("send", e))?;

        info!(
            document_id = %self.document.id(),
            total_signatures,
            deadline = ?deadline,
            "Document sent for signature"
        );
        self.pending_events.push(LifecycleEvent::Sent {
            document_id: self.document.id(),
            total_signatures,
            sent_at,
        });
        Ok(())
    }

    /// Count one signature. Returns the resulting status.
    pub fn record_signature(&mut self) -> LifecycleResult<DocumentStatus> {
        let signed_at = self.clock.now();
        let status = self
            .document
            .record_signature(signed_at)
            .inspect_err(|e| self.log_rejection("sign", e))?;

        let document_id = self.document.id();
        let completed = self.document.completed_signatures();
        let total = self.document.total_signatures();
        debug!(%document_id, completed, total, "Signature recorded");

        self.pending_events.push(LifecycleEvent::SignatureRecorded {
            document_id,
            completed_signatures: completed,
            total_signatures: total,
        });
        if status == DocumentStatus::Completed {
            info!(%document_id, total, "All signatures collected");
            self.pending_events.push(LifecycleEvent::Completed {
                document_id,
                completed_at: signed_at,
            });
        }
        Ok(status)
    }

    /// Expire if `deadline` (plus grace) is before `now`.
    pub fn record_expiry(
        &mut self,
        now: Timestamp,
        deadline: Timestamp,
    ) -> LifecycleResult<ExpiryOutcome> {
        let outcome = self
            .document
            .record_expiry(now, deadline, &self.config.expiry)
            .inspect_err(|e| self.log_rejection("expire", e))?;

        if outcome.expired() {
            info!(
                document_id = %self.document.id(),
                completed = self.document.completed_signatures(),
                total = self.document.total_signatures(),
                "Document expired before completion"
            );
            self.pending_events.push(LifecycleEvent::Expired {
                document_id: self.document.id(),
                expired_at: now,
                completed_signatures: self.document.completed_signatures(),
                total_signatures: self.document.total_signatures(),
            });
        }
        Ok(outcome)
    }

    /// Expiry check against the clock and the deadline chosen at send time.
    pub fn check_expiry(&mut self) -> LifecycleResult<ExpiryOutcome> {
        let now = self.clock.now();
        match self.document.expires_at() {
            Some(deadline) => self.record_expiry(now, deadline),
            None if self.document.current_status() == DocumentStatus::Pending => {
                Ok(ExpiryOutcome::NoDeadline)
            }
            // No deadline: same draft/terminal handling as an explicit check
            None => self.record_expiry(now, now),
        }
    }

    /// Take and clear queued events.
    pub fn take_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn log_rejection(&self, operation: &'static str, error: &LifecycleError) {
        warn!(
            document_id = %self.document.id(),
            status = %self.document.current_status(),
            operation,
            error = %error,
            "Lifecycle operation rejected"
        );
    }
}
