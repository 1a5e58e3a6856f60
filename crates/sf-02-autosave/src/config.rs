//! Configuration types for the autosave pump

use serde::Deserialize;
use std::time::Duration;

use crate::error::{AutosaveError, AutosaveResult};

/// Default tick period: one save attempt every 30 seconds
pub const DEFAULT_INTERVAL_MS: u64 = 30_000;

/// Runtime configuration for an `AutosavePump`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AutosaveConfig {
    /// Tick period in milliseconds
    pub interval_ms: u64,

    /// Save on every tick even when nothing changed since the last
    /// successful save. Turning this off only suppresses redundant writes.
    pub save_unchanged: bool,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            save_unchanged: true,
        }
    }
}

impl AutosaveConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_save_unchanged(mut self, save_unchanged: bool) -> Self {
        self.save_unchanged = save_unchanged;
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> AutosaveResult<()> {
        if self.interval_ms == 0 {
            return Err(AutosaveError::InvalidConfig(
                "interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
