//! # Lifecycle Flows
//!
//! Document lifecycle tracker (SF-01) driving the shared event bus through the
//! session host's lifecycle adapter.
//!
//! ## Flows Tested:
//!
//! 1. Signature accounting from send to completion, then a late expiry check
//! 2. Expiry of a partially signed document and what subscribers see
//! 3. Per-document subscriptions when several documents share one bus

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use sf_01_document_lifecycle::{
        Clock, DocumentLifecycleTracker, ExpiryOutcome, ExpiryPolicy, LifecycleConfig, LifecycleError,
        ManualClock, StatusFilter,
    };
    use session_host::adapters::to_session_event;
    use shared_bus::{EventFilter, EventPublisher, EventTopic, InMemoryEventBus, SessionEvent};
    use shared_types::{DocumentStatus, Timestamp};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn t0() -> Timestamp {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn tracker_at(
        title: &str,
        clock: &Arc<ManualClock>,
        config: LifecycleConfig,
    ) -> DocumentLifecycleTracker<ManualClock> {
        DocumentLifecycleTracker::new_draft(title, config, Arc::clone(clock))
    }

    async fn flush(tracker: &mut DocumentLifecycleTracker<ManualClock>, bus: &InMemoryEventBus) {
        for event in tracker.take_events() {
            bus.publish(to_session_event(&event)).await;
        }
    }

    // =========================================================================
    // SIGNATURE ACCOUNTING
    // =========================================================================

    #[tokio::test]
    async fn test_three_signers_complete_and_ignore_late_expiry() {
        let clock = Arc::new(ManualClock::new(t0()));
        let bus = InMemoryEventBus::new();
        let mut tracker = tracker_at("Lease", &clock, LifecycleConfig::default());
        let mut sub = bus.subscribe(EventFilter::document(tracker.document_id()));

        tracker.record_send(3).unwrap();
        tracker.record_signature().unwrap();
        tracker.record_signature().unwrap();
        assert_eq!(tracker.current_status(), DocumentStatus::Pending);
        assert_eq!(
            (tracker.completed_signatures(), tracker.total_signatures()),
            (2, 3)
        );

        assert_eq!(tracker.record_signature().unwrap(), DocumentStatus::Completed);
        assert_eq!(tracker.completed_signatures(), 3);

        clock.advance(Duration::days(90));
        let outcome = tracker.record_expiry(clock.now(), t0()).unwrap();
        assert_eq!(outcome, ExpiryOutcome::AlreadyTerminal);
        assert_eq!(tracker.current_status(), DocumentStatus::Completed);

        flush(&mut tracker, &bus).await;
        let events = sub.drain();
        assert_eq!(events.len(), 5);
        assert!(matches!(
            events[0],
            SessionEvent::DocumentSent { total_signatures: 3, .. }
        ));
        assert!(matches!(
            events[3],
            SessionEvent::SignatureRecorded { completed_signatures: 3, total_signatures: 3, .. }
        ));
        assert!(matches!(events[4], SessionEvent::DocumentCompleted { .. }));
        assert!(!events
            .iter()
            .any(|e| matches!(e, SessionEvent::DocumentExpired { .. })));
    }

    #[tokio::test]
    async fn test_rejected_operations_leave_no_trace() {
        let clock = Arc::new(ManualClock::new(t0()));
        let mut tracker = tracker_at("NDA", &clock, LifecycleConfig::default());

        assert_eq!(
            tracker.record_send(0),
            Err(LifecycleError::InvalidSignatureTotal)
        );
        assert!(tracker.record_signature().is_err());
        assert!(tracker.record_expiry(t0(), t0()).is_err());
        assert!(tracker.take_events().is_empty());
        assert_eq!(tracker.current_status(), DocumentStatus::Draft);

        tracker.record_send(1).unwrap();
        assert!(tracker.record_send(2).is_err());
        tracker.record_signature().unwrap();
        assert_eq!(
            tracker.record_signature(),
            Err(LifecycleError::OverCompletion { total: 1 })
        );
        assert_eq!(tracker.completed_signatures(), 1);
    }

    // =========================================================================
    // EXPIRY
    // =========================================================================

    #[tokio::test]
    async fn test_partially_signed_document_expires_after_grace() {
        let clock = Arc::new(ManualClock::new(t0()));
        let bus = InMemoryEventBus::new();
        let config = LifecycleConfig {
            expiry: ExpiryPolicy::with_grace(Duration::hours(1)),
        };
        let mut tracker = tracker_at("Offer", &clock, config);
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Lifecycle]));

        tracker
            .record_send_with_deadline(2, Some(t0() + Duration::days(7)))
            .unwrap();
        tracker.record_signature().unwrap();

        clock.advance(Duration::days(7) + Duration::minutes(30));
        assert!(matches!(
            tracker.check_expiry().unwrap(),
            ExpiryOutcome::NotYetDue { .. }
        ));

        clock.advance(Duration::hours(1));
        assert_eq!(tracker.check_expiry().unwrap(), ExpiryOutcome::Expired);
        assert_eq!(tracker.current_status(), DocumentStatus::Expired);
        assert!(tracker.record_signature().is_err());

        flush(&mut tracker, &bus).await;
        let last = sub.drain().pop().unwrap();
        assert!(matches!(
            last,
            SessionEvent::DocumentExpired { completed_signatures: 1, total_signatures: 2, .. }
        ));
        assert_eq!(last.implied_status(), Some(DocumentStatus::Expired));
    }

    // =========================================================================
    // SHARED BUS
    // =========================================================================

    #[tokio::test]
    async fn test_subscribers_see_only_their_document() {
        let clock = Arc::new(ManualClock::new(t0()));
        let bus = InMemoryEventBus::new();
        let mut lease = tracker_at("Lease", &clock, LifecycleConfig::default());
        let mut offer = tracker_at("Offer", &clock, LifecycleConfig::default());

        let mut lease_sub = bus.subscribe(EventFilter::document(lease.document_id()));
        let mut everything = bus.subscribe(EventFilter::all());

        lease.record_send(1).unwrap();
        offer.record_send(2).unwrap();
        offer.record_signature().unwrap();
        flush(&mut lease, &bus).await;
        flush(&mut offer, &bus).await;

        let lease_events = lease_sub.drain();
        assert_eq!(lease_events.len(), 1);
        assert!(lease_events
            .iter()
            .all(|e| e.document_id() == lease.document_id()));
        assert_eq!(everything.drain().len(), 3);
    }

    #[test]
    fn test_status_filter_over_summaries() {
        let clock = Arc::new(ManualClock::new(t0()));
        let draft = tracker_at("Draft", &clock, LifecycleConfig::default());

        clock.advance(Duration::minutes(1));
        let mut pending = tracker_at("Pending", &clock, LifecycleConfig::default());
        pending.record_send(2).unwrap();

        clock.advance(Duration::minutes(1));
        let mut done = tracker_at("Done", &clock, LifecycleConfig::default());
        done.record_send(1).unwrap();
        done.record_signature().unwrap();

        let summaries = [draft.summary(), pending.summary(), done.summary()];

        let all: Vec<_> = StatusFilter::All
            .apply(&summaries)
            .into_iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(all, vec!["Done", "Pending", "Draft"]);

        let completed = StatusFilter::Status(DocumentStatus::Completed).apply(&summaries);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].progress_percent, 100);
        assert_eq!("pending".parse::<StatusFilter>().unwrap().apply(&summaries).len(), 1);
    }
}
