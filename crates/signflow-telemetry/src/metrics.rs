//! Prometheus metrics for SignFlow components.
//!
//! All metrics follow the naming convention: `sf_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, IntCounter, IntGaugeVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // AUTOSAVE
    // =========================================================================

    /// Draft saves by outcome (started/succeeded/failed)
    pub static ref AUTOSAVE_SAVES: CounterVec = CounterVec::new(
        Opts::new("sf_autosave_saves_total", "Draft saves by outcome"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Ticks skipped because a save was already in flight
    pub static ref AUTOSAVE_TICKS_SKIPPED: IntCounter = IntCounter::new(
        "sf_autosave_ticks_skipped_total",
        "Autosave ticks skipped while a save was in flight"
    ).expect("metric creation failed");

    // =========================================================================
    // DOCUMENT LIFECYCLE
    // =========================================================================

    /// Lifecycle transitions by event (sent/signed/completed/expired)
    pub static ref LIFECYCLE_TRANSITIONS: CounterVec = CounterVec::new(
        Opts::new("sf_lifecycle_transitions_total", "Document lifecycle transitions"),
        &["event"]
    ).expect("metric creation failed");

    /// Live documents by status
    pub static ref DOCUMENTS_BY_STATUS: IntGaugeVec = IntGaugeVec::new(
        Opts::new("sf_documents_by_status", "Documents tracked per status"),
        &["status"]
    ).expect("metric creation failed");

    // =========================================================================
    // FIELD VALIDATION
    // =========================================================================

    /// Validation runs by outcome (valid/invalid)
    pub static ref VALIDATION_RUNS: CounterVec = CounterVec::new(
        Opts::new("sf_validation_runs_total", "Field validations by outcome"),
        &["outcome"]
    ).expect("metric creation failed");

    // =========================================================================
    // ERRORS
    // =========================================================================

    /// Component errors by type
    pub static ref COMPONENT_ERRORS: CounterVec = CounterVec::new(
        Opts::new("sf_component_errors_total", "Errors by component and type"),
        &["component", "error_type"]
    ).expect("metric creation failed");
}

/// Handle for the metrics registry
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Registering twice fails with `MetricsInit`.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(AUTOSAVE_SAVES.clone()),
        Box::new(AUTOSAVE_TICKS_SKIPPED.clone()),
        Box::new(LIFECYCLE_TRANSITIONS.clone()),
        Box::new(DOCUMENTS_BY_STATUS.clone()),
        Box::new(VALIDATION_RUNS.clone()),
        Box::new(COMPONENT_ERRORS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_encode() {
        // May already be registered by another test in this binary
        let _ = register_metrics();
        AUTOSAVE_TICKS_SKIPPED.inc();
        let text = encode_metrics().unwrap();
        assert!(text.contains("sf_autosave_ticks_skipped_total"));
    }

    #[test]
    fn test_gauge_set() {
        DOCUMENTS_BY_STATUS.with_label_values(&["pending"]).set(4);
        assert_eq!(DOCUMENTS_BY_STATUS.with_label_values(&["pending"]).get(), 4);
    }

    #[test]
    fn test_counter_increment() {
        LIFECYCLE_TRANSITIONS.with_label_values(&["sent"]).inc();
        assert!(LIFECYCLE_TRANSITIONS.with_label_values(&["sent"]).get() >= 1.0);
    }
}
