//! # SignFlow Telemetry
//!
//! Logging and metrics for SignFlow components.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an env filter, JSON output in
//!   containers and pretty output in development
//! - **Metrics**: Prometheus counters and gauges for autosave, lifecycle and
//!   validation activity
//!
//! ## Usage
//!
//! ```rust,ignore
//! use signflow_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SF_SERVICE_NAME` | `signflow` | Service name in log lines |
//! | `SF_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `SF_JSON_LOGS` | `false` (true in containers) | JSON formatted logs |
//! | `SF_CONSOLE_OUTPUT` | `true` | Emit logs to stdout |

mod config;
mod logging;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use logging::record_error;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, AUTOSAVE_SAVES, AUTOSAVE_TICKS_SKIPPED,
    COMPONENT_ERRORS, DOCUMENTS_BY_STATUS, LIFECYCLE_TRANSITIONS, VALIDATION_RUNS,
};
pub use tracing_setup::TracingGuard;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    config.validate()?;

    let metrics_handle = register_metrics()?;
    let tracing_guard = tracing_setup::init_tracing(&config)?;

    Ok(TelemetryGuard {
        _tracing: tracing_guard,
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _tracing: TracingGuard,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Convenience macro for creating a span with component context.
///
/// ```rust,ignore
/// let _span = component_span!("record_signature", component = "sf-01-document-lifecycle");
/// ```
#[macro_export]
macro_rules! component_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
