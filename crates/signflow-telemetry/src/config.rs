//! Telemetry configuration from environment variables.

use std::env;

use crate::TelemetryError;

const KNOWN_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name for log lines
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive such as `info,sf_02_autosave=debug`
    pub log_level: String,

    /// Whether to enable console output (for development)
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "signflow".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// - `SF_SERVICE_NAME`: Service name (default: signflow)
    /// - `SF_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `SF_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `SF_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("SF_SERVICE_NAME").unwrap_or_else(|_| "signflow".to_string()),

            log_level: env::var("SF_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("SF_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("SF_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }

    /// Reject empty names and bare levels that are not recognised.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        if self.service_name.trim().is_empty() {
            return Err(TelemetryError::Config("service_name cannot be empty".into()));
        }
        let level = self.log_level.trim().to_lowercase();
        if level.is_empty() {
            return Err(TelemetryError::Config("log_level cannot be empty".into()));
        }
        // Directives (`target=level`, comma lists) are left to EnvFilter
        if !level.contains('=') && !level.contains(',') && !KNOWN_LEVELS.contains(&level.as_str())
        {
            return Err(TelemetryError::Config(format!(
                "unknown log level: {}",
                self.log_level
            )));
        }
        Ok(())
    }

    /// Configuration scoped to a single component's service name.
    pub fn for_component(component: &str) -> Self {
        let mut config = Self::from_env();
        config.service_name = format!("{}-{}", config.service_name, component);
        config
    }
}
