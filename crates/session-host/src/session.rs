//! # Editing Session
//!
//! Owns one document's lifecycle tracker, the autosave pump for its edit
//! buffer and the form validator, and wires their output to the bus.
//!
//! ```text
//! edit() ──────────→ AutosavePump ──save result──→ BusAutosaveObserver ─┐
//! send()/sign() ───→ LifecycleTracker ──events──→ to_session_event ─────┼─→ Event Bus
//! validate_field() → FormValidator ──result──→ FieldValidated ──────────┘
//! ```
//!
//! The components never see each other; everything crosses through here.

use std::sync::Arc;

use parking_lot::Mutex;
use sf_01_document_lifecycle::{
    Clock, DocumentLifecycleTracker, DocumentSummary, ExpiryOutcome, LifecycleEvent,
    LifecycleResult, SystemClock,
};
use sf_02_autosave::{AutosavePump, AutosaveStatus, SnapshotStore, TickOutcome};
use sf_03_field_validation::{rules, FieldValidator, FormValidator, ValidationResult};
use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus, SessionEvent, Subscription};
use shared_types::{ComponentId, DocumentId, DocumentStatus, Timestamp};
use signflow_telemetry::{
    log_document_event, log_event, metric_inc, record_error, DOCUMENTS_BY_STATUS, VALIDATION_RUNS,
};
use tracing::debug;

use crate::adapters::{record_transition, to_session_event, BusAutosaveObserver};
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};

pub const FIELD_TITLE: &str = "title";
pub const FIELD_SIGNER_NAME: &str = "signer_name";
pub const FIELD_SIGNER_EMAIL: &str = "signer_email";

pub const MAX_TITLE_LENGTH: usize = 200;

/// Fields of the send-for-signature form.
pub fn default_signing_form() -> FormValidator {
    let title: Vec<Box<dyn FieldValidator>> = vec![
        Box::new(rules::required),
        Box::new(rules::max_length(MAX_TITLE_LENGTH)),
    ];
    FormValidator::new()
        .with_field(FIELD_TITLE, rules::all_of(title))
        .with_field(FIELD_SIGNER_NAME, rules::signer_name)
        .with_field(FIELD_SIGNER_EMAIL, rules::email)
}

pub struct EditingSession<C: Clock = SystemClock> {
    document_id: DocumentId,
    tracker: Mutex<DocumentLifecycleTracker<C>>,
    /// Held from a lifecycle change until its events are on the bus, so
    /// subscribers see transitions in the order the tracker made them.
    publish_order: tokio::sync::Mutex<()>,
    autosave: AutosavePump<String>,
    form: FormValidator,
    bus: Arc<InMemoryEventBus>,
    config: SessionConfig,
}

impl EditingSession<SystemClock> {
    /// New draft on the wall clock with its own bus and the default form.
    pub fn new(
        title: impl Into<String>,
        config: SessionConfig,
        store: Arc<dyn SnapshotStore<String>>,
    ) -> SessionResult<Self> {
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.event_bus_capacity));
        let tracker =
            DocumentLifecycleTracker::new_draft(title, config.lifecycle, Arc::new(SystemClock));
        Self::assemble(tracker, config, store, default_signing_form(), bus)
    }
}

impl<C: Clock> EditingSession<C> {
    /// Build a session around an existing tracker, e.g. a resumed document
    /// or one on a test clock.
    pub fn assemble(
        tracker: DocumentLifecycleTracker<C>,
        config: SessionConfig,
        store: Arc<dyn SnapshotStore<String>>,
        form: FormValidator,
        bus: Arc<InMemoryEventBus>,
    ) -> SessionResult<Self> {
        config.validate()?;

        let document_id = tracker.document_id();
        let observer = Arc::new(BusAutosaveObserver::new(document_id, Arc::clone(&bus)));
        let autosave = AutosavePump::new(config.autosave.clone(), store, observer)?;

        let status = tracker.current_status();
        DOCUMENTS_BY_STATUS
            .with_label_values(&[status.as_str()])
            .inc();
        log_event!(
            info,
            ComponentId::SessionHost.as_str(),
            "Editing session opened",
            document_id = %document_id,
            status = %status,
            autosave_interval_ms = config.autosave.interval_ms
        );

        Ok(Self {
            document_id,
            tracker: Mutex::new(tracker),
            publish_order: tokio::sync::Mutex::new(()),
            autosave,
            form,
            bus,
            config,
        })
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn bus(&self) -> &Arc<InMemoryEventBus> {
        &self.bus
    }

    // =========================================================================
    // Autosave
    // =========================================================================

    /// Start autosaving the edit buffer.
    pub fn start(&self) -> SessionResult<()> {
        self.autosave
            .start()
            .map_err(|e| self.reject("start_autosave", e.into()))
    }

    /// Stop autosaving. A save already in flight still completes.
    pub fn stop(&self) -> bool {
        let was_running = self.autosave.stop();
        if was_running {
            log_event!(
                info,
                ComponentId::SessionHost.as_str(),
                "Editing session autosave stopped",
                document_id = %self.document_id
            );
        }
        was_running
    }

    /// Replace the edit buffer. Never blocks on storage.
    pub fn edit(&self, body: impl Into<String>) {
        self.autosave.update(body.into());
    }

    /// Save right away (blur, explicit "save" button) under the same
    /// one-save-at-a-time rule as the schedule.
    pub fn save_now(&self) -> SessionResult<TickOutcome> {
        self.autosave
            .save_now()
            .map_err(|e| self.reject("save_now", e.into()))
    }

    pub fn autosave_status(&self) -> AutosaveStatus {
        self.autosave.status()
    }

    pub fn draft(&self) -> Option<String> {
        self.autosave.latest()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn rename(&self, title: impl Into<String>) -> SessionResult<()> {
        self.tracker
            .lock()
            .rename(title)
            .map_err(|e| self.reject("rename", e.into()))
    }

    pub async fn send(&self, total_signatures: u32) -> SessionResult<()> {
        self.apply("send", |tracker| tracker.record_send(total_signatures))
            .await
    }

    pub async fn send_with_deadline(
        &self,
        total_signatures: u32,
        deadline: Timestamp,
    ) -> SessionResult<()> {
        self.apply("send", |tracker| {
            tracker.record_send_with_deadline(total_signatures, Some(deadline))
        })
        .await
    }

    pub async fn record_signature(&self) -> SessionResult<DocumentStatus> {
        self.apply("sign", DocumentLifecycleTracker::record_signature)
            .await
    }

    /// Expire the document if its signing deadline has passed.
    pub async fn check_expiry(&self) -> SessionResult<ExpiryOutcome> {
        self.apply("expire", DocumentLifecycleTracker::check_expiry)
            .await
    }

    /// Expiry check against an explicit deadline and time.
    pub async fn record_expiry(
        &self,
        now: Timestamp,
        deadline: Timestamp,
    ) -> SessionResult<ExpiryOutcome> {
        self.apply("expire", |tracker| tracker.record_expiry(now, deadline))
            .await
    }

    pub fn status(&self) -> DocumentStatus {
        self.tracker.lock().current_status()
    }

    pub fn summary(&self) -> DocumentSummary {
        self.tracker.lock().summary()
    }

    // =========================================================================
    // Validation
    // =========================================================================

    pub async fn validate_field(
        &self,
        field: &str,
        value: &str,
    ) -> SessionResult<Arc<ValidationResult>> {
        let result = self
            .form
            .validate_field(field, value)
            .map_err(|e| self.reject("validate", e.into()))?;

        let outcome = if result.valid { "valid" } else { "invalid" };
        metric_inc!(VALIDATION_RUNS, &[outcome]);

        self.bus
            .publish(SessionEvent::FieldValidated {
                document_id: self.document_id,
                field: field.to_string(),
                valid: result.valid,
                message: result.message.clone(),
            })
            .await;
        Ok(result)
    }

    pub fn field_result(&self, field: &str) -> SessionResult<Option<Arc<ValidationResult>>> {
        Ok(self.form.result(field)?)
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.is_form_valid()
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Subscribe to this session's events matching `filter`.
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        let mut filter = filter;
        filter.documents = vec![self.document_id];
        self.bus.subscribe(filter)
    }

    /// Run a tracker operation, then publish whatever transitions it made.
    /// A concurrent `apply` waits until this one's events are published.
    async fn apply<T, F>(&self, operation: &'static str, op: F) -> SessionResult<T>
    where
        F: FnOnce(&mut DocumentLifecycleTracker<C>) -> LifecycleResult<T>,
    {
        let _ordered = self.publish_order.lock().await;
        let (result, previous, events) = {
            let mut tracker = self.tracker.lock();
            let previous = tracker.current_status();
            let result = op(&mut *tracker);
            (result, previous, tracker.take_events())
        };

        let value = result.map_err(|e| self.reject(operation, e.into()))?;
        self.publish_lifecycle(previous, events).await;
        Ok(value)
    }

    async fn publish_lifecycle(&self, mut status: DocumentStatus, events: Vec<LifecycleEvent>) {
        for event in events {
            record_transition(&event, status);
            status = event.resulting_status();
            log_document_event!(
                info,
                "Lifecycle transition",
                self.document_id,
                status,
                event = event.label()
            );
            let receivers = self.bus.publish(to_session_event(&event)).await;
            debug!(event = event.label(), receivers, "Lifecycle event published");
        }
    }

    fn reject(&self, operation: &'static str, error: SessionError) -> SessionError {
        record_error(error.component(), error.kind(), &error);
        debug!(
            document_id = %self.document_id,
            operation,
            "Session operation rejected"
        );
        error
    }
}

impl<C: Clock> Drop for EditingSession<C> {
    fn drop(&mut self) {
        let status = self.tracker.get_mut().current_status();
        DOCUMENTS_BY_STATUS
            .with_label_values(&[status.as_str()])
            .dec();
    }
}
