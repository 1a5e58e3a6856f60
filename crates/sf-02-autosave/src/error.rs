//! Error types for the autosave pump

use thiserror::Error;

/// Result type alias for pump control operations
pub type AutosaveResult<T> = std::result::Result<T, AutosaveError>;

/// Errors from controlling the pump itself.
///
/// Save failures are not surfaced here: they go to the `AutosaveObserver`
/// and the next tick simply tries again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutosaveError {
    /// `start` called while the ticker is already running
    #[error("Autosave pump is already running")]
    AlreadyRunning,

    /// Configuration rejected by `AutosaveConfig::validate`
    #[error("Invalid autosave configuration: {0}")]
    InvalidConfig(String),

    /// Ticks and saves need a tokio runtime to be spawned on
    #[error("No tokio runtime available to drive the autosave pump")]
    NoRuntime,
}

impl AutosaveError {
    /// Short label used for error metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AutosaveError::AlreadyRunning => "already_running",
            AutosaveError::InvalidConfig(_) => "invalid_config",
            AutosaveError::NoRuntime => "no_runtime",
        }
    }
}

/// Failure reported by a `SnapshotStore`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// Backend could not be reached (network, disk)
    #[error("Draft storage unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the snapshot
    #[error("Draft snapshot rejected: {0}")]
    Rejected(String),
}

impl SaveError {
    pub fn kind(&self) -> &'static str {
        match self {
            SaveError::Unavailable(_) => "unavailable",
            SaveError::Rejected(_) => "rejected",
        }
    }
}
