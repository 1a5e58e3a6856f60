//! # Session Flows
//!
//! A whole editing session: a draft is typed and autosaved, the signing form
//! is validated, the document is sent and signed. Everything observable goes
//! through the session's event bus.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::sleep;

    use session_host::config::{ENV_AUTOSAVE_INTERVAL_MS, ENV_EXPIRY_GRACE_SECS};
    use session_host::session::{FIELD_SIGNER_EMAIL, FIELD_SIGNER_NAME, FIELD_TITLE};
    use session_host::{EditingSession, InMemoryDraftStore, SessionConfig, SessionError};
    use sf_01_document_lifecycle::ExpiryOutcome;
    use shared_bus::{EventFilter, EventTopic, SessionEvent};
    use shared_types::DocumentStatus;

    fn config_from(pairs: &[(&str, &str)]) -> SessionConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SessionConfig::from_lookup(|var| vars.get(var).cloned()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_draft_to_completed() {
        let store = Arc::new(InMemoryDraftStore::new());
        let config = config_from(&[(ENV_AUTOSAVE_INTERVAL_MS, "1000")]);
        let session = EditingSession::new("Employment offer", config, store.clone()).unwrap();
        let mut events = session.subscribe(EventFilter::all());

        session.start().unwrap();
        session.edit("Dear Jane,");
        sleep(Duration::from_millis(1050)).await;
        session.edit("Dear Jane, welcome aboard.");
        sleep(Duration::from_millis(1000)).await;
        assert_eq!(store.latest().unwrap().body, "Dear Jane, welcome aboard.");

        for (field, value) in [
            (FIELD_TITLE, "Employment offer"),
            (FIELD_SIGNER_NAME, "Jane Doe"),
            (FIELD_SIGNER_EMAIL, "jane@example.com"),
        ] {
            assert!(session.validate_field(field, value).await.unwrap().valid);
        }
        assert!(session.is_form_valid());

        session.stop();
        session.send(2).await.unwrap();
        session.record_signature().await.unwrap();
        assert_eq!(
            session.record_signature().await.unwrap(),
            DocumentStatus::Completed
        );

        let summary = session.summary();
        assert_eq!(summary.status, DocumentStatus::Completed);
        assert_eq!(
            (summary.completed_signatures, summary.total_signatures),
            (2, 2)
        );
        assert_eq!(session.check_expiry().await.unwrap(), ExpiryOutcome::AlreadyTerminal);

        let seen = events.drain();
        let saves = seen
            .iter()
            .filter(|e| matches!(e, SessionEvent::DraftSaved { .. }))
            .count();
        let validations = seen
            .iter()
            .filter(|e| e.topic() == EventTopic::Validation)
            .count();
        assert_eq!(saves, 2);
        assert_eq!(validations, 3);
        assert!(matches!(seen.last(), Some(SessionEvent::DocumentCompleted { .. })));
        assert!(seen
            .iter()
            .all(|e| e.document_id() == session.document_id()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sessions_are_isolated() {
        let store = Arc::new(InMemoryDraftStore::new());
        let lease = EditingSession::new("Lease", SessionConfig::default(), store.clone()).unwrap();
        let offer = EditingSession::new("Offer", SessionConfig::default(), store.clone()).unwrap();
        let mut lease_events = lease.subscribe(EventFilter::all());

        offer.send(1).await.unwrap();
        offer
            .validate_field(FIELD_SIGNER_EMAIL, "bob@hotmial.com")
            .await
            .unwrap();
        assert!(matches!(lease_events.try_recv(), Ok(None)));

        assert!(lease.field_result(FIELD_SIGNER_EMAIL).unwrap().is_none());
        assert_eq!(lease.status(), DocumentStatus::Draft);
        assert_eq!(offer.status(), DocumentStatus::Pending);
    }

    #[tokio::test]
    async fn test_expiry_grace_from_config() {
        let config = config_from(&[(ENV_EXPIRY_GRACE_SECS, "3600")]);
        let session =
            EditingSession::new("NDA", config, Arc::new(InMemoryDraftStore::new())).unwrap();
        let mut lifecycle = session.subscribe(EventFilter::topics(vec![EventTopic::Lifecycle]));

        let deadline = chrono::Utc::now() - chrono::Duration::minutes(10);
        session.send(2).await.unwrap();

        let now = chrono::Utc::now();
        assert!(matches!(
            session.record_expiry(now, deadline).await.unwrap(),
            ExpiryOutcome::NotYetDue { .. }
        ));
        assert_eq!(
            session
                .record_expiry(now + chrono::Duration::hours(1), deadline)
                .await
                .unwrap(),
            ExpiryOutcome::Expired
        );

        assert!(matches!(
            session.record_signature().await,
            Err(SessionError::Lifecycle(_))
        ));
        let seen = lifecycle.drain();
        assert!(matches!(seen.last(), Some(SessionEvent::DocumentExpired { .. })));
    }
}
