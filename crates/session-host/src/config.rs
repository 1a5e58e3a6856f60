//! # Session Configuration
//!
//! One struct for everything an editing session needs, loaded from the
//! environment with component defaults for anything unset.

use std::env;
use std::time::Duration;

use sf_01_document_lifecycle::{ExpiryPolicy, LifecycleConfig};
use sf_02_autosave::{AutosaveConfig, DEFAULT_INTERVAL_MS};
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use thiserror::Error;

pub const ENV_AUTOSAVE_INTERVAL_MS: &str = "SF_AUTOSAVE_INTERVAL_MS";
pub const ENV_AUTOSAVE_SAVE_UNCHANGED: &str = "SF_AUTOSAVE_SAVE_UNCHANGED";
pub const ENV_EXPIRY_GRACE_SECS: &str = "SF_EXPIRY_GRACE_SECS";
pub const ENV_EVENT_BUS_CAPACITY: &str = "SF_EVENT_BUS_CAPACITY";

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable was set but could not be parsed.
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// Values parsed but are not usable together.
    #[error("Invalid session configuration: {0}")]
    Invalid(String),
}

/// Complete session configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub autosave: AutosaveConfig,
    pub lifecycle: LifecycleConfig,
    /// Events buffered per subscriber before it starts lagging.
    pub event_bus_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            autosave: AutosaveConfig::default(),
            lifecycle: LifecycleConfig::default(),
            event_bus_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Load from the process environment.
    ///
    /// - `SF_AUTOSAVE_INTERVAL_MS`: autosave tick period (default: 30000)
    /// - `SF_AUTOSAVE_SAVE_UNCHANGED`: save even without edits (default: true)
    /// - `SF_EXPIRY_GRACE_SECS`: grace after a signing deadline (default: 0)
    /// - `SF_EVENT_BUS_CAPACITY`: per-subscriber buffer (default: 256)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let interval_ms = parse_or(&lookup, ENV_AUTOSAVE_INTERVAL_MS, DEFAULT_INTERVAL_MS)?;
        let save_unchanged = match lookup(ENV_AUTOSAVE_SAVE_UNCHANGED) {
            Some(value) => parse_bool(ENV_AUTOSAVE_SAVE_UNCHANGED, &value)?,
            None => true,
        };
        let grace_secs: u32 = parse_or(&lookup, ENV_EXPIRY_GRACE_SECS, 0)?;
        let event_bus_capacity =
            parse_or(&lookup, ENV_EVENT_BUS_CAPACITY, DEFAULT_CHANNEL_CAPACITY)?;

        let config = Self {
            autosave: AutosaveConfig::default()
                .with_interval(Duration::from_millis(interval_ms))
                .with_save_unchanged(save_unchanged),
            lifecycle: LifecycleConfig {
                expiry: ExpiryPolicy::with_grace(chrono::Duration::seconds(i64::from(grace_secs))),
            },
            event_bus_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.autosave
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.event_bus_capacity == 0 {
            return Err(ConfigError::Invalid(
                "event_bus_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_autosave(mut self, autosave: AutosaveConfig) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn with_expiry(mut self, expiry: ExpiryPolicy) -> Self {
        self.lifecycle.expiry = expiry;
        self
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                var,
                value: value.clone(),
                reason: e.to_string(),
            }),
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = SessionConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.autosave.interval(), Duration::from_secs(30));
        assert!(config.autosave.save_unchanged);
    }

    #[test]
    fn test_overrides() {
        let config = SessionConfig::from_lookup(lookup(&[
            (ENV_AUTOSAVE_INTERVAL_MS, "1500"),
            (ENV_AUTOSAVE_SAVE_UNCHANGED, "false"),
            (ENV_EXPIRY_GRACE_SECS, "3600"),
            (ENV_EVENT_BUS_CAPACITY, "16"),
        ]))
        .unwrap();

        assert_eq!(config.autosave.interval(), Duration::from_millis(1500));
        assert!(!config.autosave.save_unchanged);
        assert_eq!(
            config.lifecycle.expiry.grace_period,
            chrono::Duration::hours(1)
        );
        assert_eq!(config.event_bus_capacity, 16);
    }

    #[test]
    fn test_unparseable_value_rejected() {
        let err = SessionConfig::from_lookup(lookup(&[(ENV_AUTOSAVE_INTERVAL_MS, "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var: ENV_AUTOSAVE_INTERVAL_MS, .. }
        ));

        let err = SessionConfig::from_lookup(lookup(&[(ENV_AUTOSAVE_SAVE_UNCHANGED, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_zero_values_rejected() {
        assert!(matches!(
            SessionConfig::from_lookup(lookup(&[(ENV_AUTOSAVE_INTERVAL_MS, "0")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SessionConfig::from_lookup(lookup(&[(ENV_EVENT_BUS_CAPACITY, "0")])),
            Err(ConfigError::Invalid(_))
        ));
    }
}
