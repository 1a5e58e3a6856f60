//! # Autosave Flows
//!
//! Autosave pump (SF-02) saving into the session host's draft store and
//! reporting through `BusAutosaveObserver`.
//!
//! All tests run on a paused tokio clock, so intervals and store latency are
//! exact.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tokio::time::{sleep, Instant};

    use sf_02_autosave::{
        AutosaveConfig, AutosavePump, NoOpObserver, SaveError, SnapshotStore, TickOutcome,
    };
    use session_host::{BusAutosaveObserver, InMemoryDraftStore};
    use shared_bus::{EventFilter, EventTopic, InMemoryEventBus, SessionEvent};
    use shared_types::DocumentId;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    /// Records what was saved and when, relative to the test start.
    struct TimedStore {
        started: Instant,
        saves: Mutex<Vec<(u128, String)>>,
    }

    impl TimedStore {
        fn new() -> Self {
            Self {
                started: Instant::now(),
                saves: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SnapshotStore<String> for TimedStore {
        async fn persist(&self, snapshot: String) -> Result<(), SaveError> {
            let at = self.started.elapsed().as_millis();
            self.saves.lock().push((at, snapshot));
            Ok(())
        }
    }

    fn every(ms: u64) -> AutosaveConfig {
        AutosaveConfig::default().with_interval(Duration::from_millis(ms))
    }

    // =========================================================================
    // SCHEDULING
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_tick_saves_latest_edit_not_first() {
        let store = Arc::new(TimedStore::new());
        let pump = AutosavePump::new(every(1000), store.clone(), Arc::new(NoOpObserver)).unwrap();
        pump.start().unwrap();

        pump.update("v1".to_string());
        sleep(Duration::from_millis(400)).await;
        pump.update("v2".to_string());
        sleep(Duration::from_millis(650)).await;

        assert_eq!(*store.saves.lock(), vec![(1000, "v2".to_string())]);
        assert!(!pump.status().has_unsaved_changes);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_save_before_first_interval() {
        let store = Arc::new(TimedStore::new());
        let pump = AutosavePump::new(every(1000), store.clone(), Arc::new(NoOpObserver)).unwrap();
        pump.update("early".to_string());
        pump.start().unwrap();

        sleep(Duration::from_millis(999)).await;
        assert!(store.saves.lock().is_empty());
        sleep(Duration::from_millis(2)).await;
        assert_eq!(store.saves.lock().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_store_never_overlaps() {
        let bus = Arc::new(InMemoryEventBus::new());
        let document_id = DocumentId::new();
        let store = Arc::new(InMemoryDraftStore::with_latency(Duration::from_millis(2500)));
        let observer = Arc::new(BusAutosaveObserver::new(document_id, Arc::clone(&bus)));
        let pump = AutosavePump::new(every(1000), store.clone(), observer).unwrap();
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Autosave]));

        pump.update("body".to_string());
        pump.start().unwrap();

        // Ticks at 1s..6s; saves start at 1s and 4s and finish at 3.5s and 6.5s
        sleep(Duration::from_millis(6600)).await;
        pump.stop();

        let metrics = pump.metrics();
        assert_eq!(metrics.saves_started, 2);
        assert_eq!(metrics.saves_succeeded, 2);
        assert_eq!(metrics.ticks_skipped_in_flight, 4);
        assert_eq!(store.revision_count(), 2);

        let saved = sub.drain();
        assert_eq!(saved.len(), 2);
        assert!(saved
            .iter()
            .all(|e| matches!(e, SessionEvent::DraftSaved { document_id: id, .. } if *id == document_id)));
    }

    // =========================================================================
    // FAILURE AND SHUTDOWN
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_failed_save_reported_then_recovered() {
        let bus = Arc::new(InMemoryEventBus::new());
        let document_id = DocumentId::new();
        let store = Arc::new(InMemoryDraftStore::new());
        store.fail_next(2);
        let observer = Arc::new(BusAutosaveObserver::new(document_id, Arc::clone(&bus)));
        let pump = AutosavePump::new(every(1000), store.clone(), observer).unwrap();
        let mut sub = bus.subscribe(EventFilter::document(document_id));

        pump.update("draft".to_string());
        pump.start().unwrap();
        sleep(Duration::from_millis(3100)).await;

        let events = sub.drain();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            SessionEvent::DraftSaveFailed { reason, .. } if reason.contains("offline")
        ));
        assert!(matches!(events[1], SessionEvent::DraftSaveFailed { .. }));
        assert!(matches!(events[2], SessionEvent::DraftSaved { .. }));
        assert_eq!(store.latest().unwrap().body, "draft");
        assert!(pump.last_saved_at().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_lets_in_flight_save_finish() {
        let store = Arc::new(InMemoryDraftStore::with_latency(Duration::from_millis(500)));
        let pump = AutosavePump::new(every(1000), store.clone(), Arc::new(NoOpObserver)).unwrap();
        pump.update("final".to_string());
        pump.start().unwrap();

        sleep(Duration::from_millis(1100)).await;
        assert!(pump.is_saving());
        assert!(pump.stop());
        assert!(!pump.is_running());

        sleep(Duration::from_millis(500)).await;
        assert!(!pump.is_saving());
        assert_eq!(store.revision_count(), 1);

        sleep(Duration::from_millis(5000)).await;
        assert_eq!(store.revision_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_save_between_ticks() {
        let store = Arc::new(TimedStore::new());
        let pump = AutosavePump::new(every(1000), store.clone(), Arc::new(NoOpObserver)).unwrap();
        pump.start().unwrap();

        pump.update("typed".to_string());
        sleep(Duration::from_millis(300)).await;
        assert_eq!(pump.save_now().unwrap(), TickOutcome::Started);
        sleep(Duration::from_millis(1)).await;

        assert_eq!(store.saves.lock()[0], (300, "typed".to_string()));
    }
}
