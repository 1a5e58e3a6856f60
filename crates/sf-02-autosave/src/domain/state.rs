//! Latest-value register and save bookkeeping
//!
//! ## Invariants
//!
//! - At most one save is in flight; `begin_save` is the only way to start one
//!   and it refuses while `in_flight` is set
//! - A save always snapshots the newest value written before it started
//! - `last_saved_at` only moves on success

use shared_types::Timestamp;

/// What a tick should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickDecision<T> {
    /// Persist `snapshot`; the pump is now marked as saving.
    Start { version: u64, snapshot: T },
    /// A previous save is still running.
    SkipInFlight,
    /// Nothing changed since the last successful save and unchanged saves are off.
    SkipUnchanged,
    /// No value has been written yet.
    SkipEmpty,
}

impl<T> TickDecision<T> {
    pub fn outcome(&self) -> TickOutcome {
        match self {
            TickDecision::Start { .. } => TickOutcome::Started,
            TickDecision::SkipInFlight => TickOutcome::SkippedInFlight,
            TickDecision::SkipUnchanged => TickOutcome::SkippedUnchanged,
            TickDecision::SkipEmpty => TickOutcome::SkippedEmpty,
        }
    }
}

/// `TickDecision` without the snapshot, reported to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Started,
    SkippedInFlight,
    SkippedUnchanged,
    SkippedEmpty,
}

impl TickOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            TickOutcome::Started => "started",
            TickOutcome::SkippedInFlight => "skipped_in_flight",
            TickOutcome::SkippedUnchanged => "skipped_unchanged",
            TickOutcome::SkippedEmpty => "skipped_empty",
        }
    }
}

#[derive(Debug)]
pub struct PumpState<T> {
    latest: Option<T>,
    /// Bumped on every write
    version: u64,
    in_flight: Option<u64>,
    saved_version: Option<u64>,
    last_saved_at: Option<Timestamp>,
}

impl<T> Default for PumpState<T> {
    fn default() -> Self {
        Self {
            latest: None,
            version: 0,
            in_flight: None,
            saved_version: None,
            last_saved_at: None,
        }
    }
}

impl<T: Clone> PumpState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the register. Last write wins.
    pub fn update(&mut self, value: T) {
        self.latest = Some(value);
        self.version = self.version.wrapping_add(1);
    }

    pub fn latest(&self) -> Option<&T> {
        self.latest.as_ref()
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_saved_at(&self) -> Option<Timestamp> {
        self.last_saved_at
    }

    /// True when the register holds a value no successful save has covered.
    pub fn has_unsaved_changes(&self) -> bool {
        self.latest.is_some() && self.saved_version != Some(self.version)
    }

    /// Check-and-set of the in-flight flag.
    pub fn begin_save(&mut self, save_unchanged: bool) -> TickDecision<T> {
        if self.in_flight.is_some() {
            return TickDecision::SkipInFlight;
        }
        let Some(value) = self.latest.as_ref() else {
            return TickDecision::SkipEmpty;
        };
        if !save_unchanged && self.saved_version == Some(self.version) {
            return TickDecision::SkipUnchanged;
        }

        self.in_flight = Some(self.version);
        TickDecision::Start {
            version: self.version,
            snapshot: value.clone(),
        }
    }

    pub fn complete_save(&mut self, version: u64, saved_at: Timestamp) {
        self.in_flight = None;
        self.saved_version = Some(version);
        self.last_saved_at = Some(saved_at);
    }

    pub fn fail_save(&mut self) {
        self.in_flight = None;
    }
}
