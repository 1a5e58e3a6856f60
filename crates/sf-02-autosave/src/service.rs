//! Autosave Pump Service
//!
//! One spawned ticker task fires on each interval boundary. A boundary that
//! finds no save in flight snapshots the register and spawns a separate save
//! task; a boundary that finds one running is skipped. Stopping the pump
//! aborts the ticker only, so a save that already started always finishes.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;
use shared_types::Timestamp;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::config::AutosaveConfig;
use crate::domain::{PumpState, TickDecision, TickOutcome};
use crate::error::{AutosaveError, AutosaveResult};
use crate::metrics::{AutosaveMetrics, AutosaveMetricsSnapshot};
use crate::ports::{AutosaveObserver, SnapshotStore};

/// What the editor shows next to the document title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AutosaveStatus {
    pub saving: bool,
    pub last_saved_at: Option<Timestamp>,
    pub has_unsaved_changes: bool,
    pub running: bool,
}

/// Periodic, non-overlapping persistence of the latest value.
pub struct AutosavePump<T> {
    config: AutosaveConfig,
    shared: Arc<Shared<T>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

struct Shared<T> {
    state: Mutex<PumpState<T>>,
    store: Arc<dyn SnapshotStore<T>>,
    observer: Arc<dyn AutosaveObserver>,
    metrics: AutosaveMetrics,
    save_unchanged: bool,
}

impl<T> AutosavePump<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(
        config: AutosaveConfig,
        store: Arc<dyn SnapshotStore<T>>,
        observer: Arc<dyn AutosaveObserver>,
    ) -> AutosaveResult<Self> {
        config.validate()?;
        debug!(
            interval_ms = config.interval_ms,
            save_unchanged = config.save_unchanged,
            "Autosave pump created"
        );

        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(PumpState::new()),
                store,
                observer,
                metrics: AutosaveMetrics::new(),
                save_unchanged: config.save_unchanged,
            }),
            config,
            ticker: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &AutosaveConfig {
        &self.config
    }

    /// Start the ticker. The first boundary is one interval from now.
    pub fn start(&self) -> AutosaveResult<()> {
        let runtime = Handle::try_current().map_err(|_| AutosaveError::NoRuntime)?;

        let mut ticker = self.ticker.lock();
        if ticker.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return Err(AutosaveError::AlreadyRunning);
        }

        let period = self.config.interval();
        let first_tick = Instant::now() + period;
        let shared = Arc::clone(&self.shared);
        *ticker = Some(runtime.spawn(run_ticker(shared, first_tick, period)));

        info!(interval_ms = self.config.interval_ms, "Autosave pump started");
        Ok(())
    }

    /// Cancel future ticks. An in-flight save is left to finish on its own.
    ///
    /// Returns `false` if the pump was not running.
    pub fn stop(&self) -> bool {
        let Some(handle) = self.ticker.lock().take() else {
            return false;
        };
        handle.abort();
        info!(
            save_in_flight = self.shared.state.lock().is_saving(),
            "Autosave pump stopped"
        );
        true
    }

    pub fn is_running(&self) -> bool {
        self.ticker
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Overwrite the latest value. Never waits on a save.
    pub fn update(&self, value: T) {
        self.shared.state.lock().update(value);
    }

    /// Run one boundary right now, under the same skip-if-busy rule as the
    /// ticker. Works whether or not the ticker is running.
    pub fn save_now(&self) -> AutosaveResult<TickOutcome> {
        Handle::try_current().map_err(|_| AutosaveError::NoRuntime)?;
        Ok(self.shared.tick())
    }

    pub fn latest(&self) -> Option<T> {
        self.shared.state.lock().latest().cloned()
    }

    pub fn is_saving(&self) -> bool {
        self.shared.state.lock().is_saving()
    }

    pub fn last_saved_at(&self) -> Option<Timestamp> {
        self.shared.state.lock().last_saved_at()
    }

    pub fn status(&self) -> AutosaveStatus {
        let running = self.is_running();
        let state = self.shared.state.lock();
        AutosaveStatus {
            saving: state.is_saving(),
            last_saved_at: state.last_saved_at(),
            has_unsaved_changes: state.has_unsaved_changes(),
            running,
        }
    }

    pub fn metrics(&self) -> AutosaveMetricsSnapshot {
        self.shared.metrics.snapshot()
    }

    pub fn failure_rate(&self) -> f64 {
        self.shared.metrics.failure_rate()
    }
}

impl<T> Drop for AutosavePump<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.ticker.get_mut().take() {
            handle.abort();
        }
    }
}

async fn run_ticker<T>(shared: Arc<Shared<T>>, first_tick: Instant, period: Duration)
where
    T: Clone + Send + Sync + 'static,
{
    let mut interval = tokio::time::interval_at(first_tick, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        shared.tick();
    }
}

impl<T> Shared<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Must be called from within a tokio runtime.
    fn tick(self: &Arc<Self>) -> TickOutcome {
        self.metrics.record_tick();

        // Check and set in one lock acquisition
        let decision = self.state.lock().begin_save(self.save_unchanged);
        let outcome = decision.outcome();

        match decision {
            TickDecision::Start { version, snapshot } => {
                self.metrics.record_save_started();
                self.observer.on_save_started();
                debug!(version, "Autosave started");
                tokio::spawn(Arc::clone(self).save(version, snapshot));
            }
            TickDecision::SkipInFlight => {
                self.metrics.record_skipped_in_flight();
                self.observer.on_tick_skipped();
                debug!("Autosave tick skipped: previous save still in flight");
            }
            TickDecision::SkipUnchanged => {
                self.metrics.record_skipped_unchanged();
                trace!("Autosave tick skipped: no changes since last save");
            }
            TickDecision::SkipEmpty => {
                trace!("Autosave tick skipped: nothing to save yet");
            }
        }
        outcome
    }

    async fn save(self: Arc<Self>, version: u64, snapshot: T) {
        let mut guard = InFlightGuard {
            shared: Arc::clone(&self),
            version,
            settled: false,
        };
        let result = self.store.persist(snapshot).await;
        guard.settled = true;
        let finished_at = Utc::now();

        match result {
            Ok(()) => {
                self.state.lock().complete_save(version, finished_at);
                self.metrics.record_save_succeeded();
                debug!(version, saved_at = %finished_at, "Draft saved");
                self.observer.on_save_succeeded(finished_at).await;
            }
            Err(error) => {
                self.state.lock().fail_save();
                self.metrics.record_save_failed();
                warn!(
                    version,
                    error = %error,
                    kind = error.kind(),
                    "Autosave failed, next tick retries with the latest value"
                );
                self.observer.on_save_failed(&error, finished_at).await;
            }
        }
    }
}

/// Clears the in-flight flag if a save task is dropped before `persist`
/// resolves (runtime shutdown or a panicking store).
struct InFlightGuard<T>
where
    T: Clone + Send + Sync + 'static,
{
    shared: Arc<Shared<T>>,
    version: u64,
    settled: bool,
}

impl<T> Drop for InFlightGuard<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if !self.settled {
            self.shared.state.lock().fail_save();
            warn!(version = self.version, "Autosave abandoned before completion");
        }
    }
}
