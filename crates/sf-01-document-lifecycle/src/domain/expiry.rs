//! Signing deadline evaluation
//!
//! The deadline itself comes from the clock collaborator; this module only
//! decides whether it has passed once the configured grace period is applied.

use chrono::Duration;
use shared_types::Timestamp;

/// How strictly signing deadlines are enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpiryPolicy {
    /// Extra time after the deadline before a document expires.
    pub grace_period: Duration,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            grace_period: Duration::zero(),
        }
    }
}

impl ExpiryPolicy {
    /// Policy with a grace period. Negative values are treated as zero.
    pub fn with_grace(grace_period: Duration) -> Self {
        Self {
            grace_period: grace_period.max(Duration::zero()),
        }
    }

    /// Deadline plus grace. A sum past the representable range falls back
    /// to the bare deadline.
    pub fn effective_deadline(&self, deadline: Timestamp) -> Timestamp {
        deadline
            .checked_add_signed(self.grace_period)
            .unwrap_or(deadline)
    }

    /// True once `now` is strictly after the deadline plus grace. Never true
    /// when that sum is out of range.
    pub fn has_passed(&self, deadline: Timestamp, now: Timestamp) -> bool {
        deadline
            .checked_add_signed(self.grace_period)
            .is_some_and(|effective| now > effective)
    }
}

/// Result of an expiry check that did not violate the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpiryOutcome {
    /// Pending document moved to `Expired`.
    Expired,
    /// Still pending; the deadline (with grace) has not passed.
    NotYetDue { effective_deadline: Timestamp },
    /// Pending document with no deadline to enforce.
    NoDeadline,
    /// Already `Completed` or `Expired`; nothing changed.
    AlreadyTerminal,
}

impl ExpiryOutcome {
    pub fn expired(&self) -> bool {
        matches!(self, ExpiryOutcome::Expired)
    }
}
