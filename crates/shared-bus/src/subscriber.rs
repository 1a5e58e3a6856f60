//! # Subscriptions
//!
//! A `Subscription` reads the shared broadcast channel and keeps only events
//! its filter accepts. A subscriber that falls more than the bus capacity
//! behind loses the oldest events; `missed()` reports how many, so a view can
//! resync from `EditingSession::summary` instead of trusting its backlog.

use crate::events::{EventFilter, SessionEvent};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::warn;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("Event bus closed")]
    Closed,
}

pub struct Subscription {
    receiver: broadcast::Receiver<SessionEvent>,
    filter: EventFilter,
    missed: u64,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<SessionEvent>, filter: EventFilter) -> Self {
        Self {
            receiver,
            filter,
            missed: 0,
        }
    }

    /// Next matching event. `None` once the bus has been dropped.
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(count)) => self.record_missed(count),
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next matching event if one is already buffered.
    pub fn try_recv(&mut self) -> Result<Option<SessionEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Lagged(count)) => self.record_missed(count),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
            }
        }
    }

    /// Every buffered matching event, oldest first.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Events lost to lag since the subscription opened. Counts every
    /// dropped event, matching the filter or not.
    #[must_use]
    pub fn missed(&self) -> u64 {
        self.missed
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    fn record_missed(&mut self, count: u64) {
        self.missed += count;
        warn!(
            topics = ?self.filter.topics,
            lost = count,
            total_missed = self.missed,
            "Subscriber fell behind, session events dropped"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventTopic;
    use crate::publisher::InMemoryEventBus;
    use crate::EventPublisher;
    use chrono::Utc;
    use shared_types::DocumentId;
    use std::time::Duration;
    use tokio::time::timeout;

    fn saved(document_id: DocumentId) -> SessionEvent {
        SessionEvent::DraftSaved {
            document_id,
            saved_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_recv_waits_for_event() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::all());

        let event = saved(DocumentId::new());
        bus.publish(event.clone()).await;

        let received = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("event");
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn test_filtered_events_skipped() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Lifecycle]));

        let document_id = DocumentId::new();
        bus.publish(saved(document_id)).await;
        bus.publish(SessionEvent::DocumentSent {
            document_id,
            total_signatures: 2,
            sent_at: Utc::now(),
        })
        .await;

        let received = sub.try_recv().unwrap().expect("lifecycle event");
        assert_eq!(received.topic(), EventTopic::Lifecycle);
        assert_eq!(sub.try_recv().unwrap(), None);
    }

    #[tokio::test]
    async fn test_closed_bus() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::all());
        drop(bus);

        assert!(sub.recv().await.is_none());
        assert_eq!(sub.try_recv(), Err(SubscriptionError::Closed));
    }

    #[tokio::test]
    async fn test_lagging_subscriber_reports_missed() {
        let bus = InMemoryEventBus::with_capacity(2);
        let mut sub = bus.subscribe(EventFilter::all());
        let document_id = DocumentId::new();

        for _ in 0..5 {
            bus.publish(saved(document_id)).await;
        }

        assert_eq!(sub.drain().len(), 2);
        assert_eq!(sub.missed(), 3);
        assert!(sub.drain().is_empty());
    }
}
