//! Structured logging helpers.
//!
//! Every log line emitted through these helpers carries a `component` field
//! so lines from the lifecycle tracker, the autosave pump and the validation
//! engine can be told apart in aggregated output.

use shared_types::ComponentId;

use crate::metrics::COMPONENT_ERRORS;

/// Log a component error and count it by component and error kind.
pub fn record_error(component: ComponentId, error_kind: &str, detail: &dyn std::fmt::Display) {
    COMPONENT_ERRORS
        .with_label_values(&[component.as_str(), error_kind])
        .inc();
    tracing::warn!(
        component = component.as_str(),
        error_kind = error_kind,
        "{}",
        detail
    );
}

/// Helper to create structured log entries with consistent formatting.
#[macro_export]
macro_rules! log_event {
    (info, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (error, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a document lifecycle event with standard fields.
#[macro_export]
macro_rules! log_document_event {
    ($level:ident, $msg:expr, $document_id:expr, $status:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = "sf-01-document-lifecycle",
            document_id = %$document_id,
            status = %$status,
            $($($field)*,)?
            $msg
        )
    };
}
