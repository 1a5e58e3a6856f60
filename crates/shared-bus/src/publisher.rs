//! # Event Publisher
//!
//! The session host is the only publisher; subscribers are rendering, toast
//! and listing collaborators. One broadcast channel carries every topic and
//! each `Subscription` filters on its own side.

use crate::events::{EventFilter, SessionEvent};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Publishing side of the bus.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish `event`, returning how many subscriptions it was delivered to
    /// before filtering.
    async fn publish(&self, event: SessionEvent) -> usize;

    /// Events accepted since creation, including ones nobody received.
    fn events_published(&self) -> u64;
}

/// Broadcast-backed bus, one per editing session.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<SessionEvent>,
    published: AtomicU64,
    capacity: usize,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// `capacity` is the per-subscriber backlog; a slower subscriber starts
    /// missing events past it. Zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            published: AtomicU64::new(0),
            capacity,
        }
    }

    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(
            topics = ?filter.topics,
            documents = filter.documents.len(),
            "Session event subscription opened"
        );
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Live subscriptions, whatever their filters.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: SessionEvent) -> usize {
        self.published.fetch_add(1, Ordering::Relaxed);
        let topic = event.topic();
        let document_id = event.document_id();

        // A session nobody is watching is normal, not a fault
        let delivered = self.sender.send(event).unwrap_or(0);
        trace!(?topic, %document_id, delivered, "Session event published");
        delivered
    }

    fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}
