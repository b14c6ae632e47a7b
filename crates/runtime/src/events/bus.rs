//! Broadcast event bus implementation.

use tokio::sync::broadcast;

use super::types::StoreEvent;

/// Fan-out channel for [`StoreEvent`]s.
///
/// Publishing never blocks. Slow subscribers observe
/// [`broadcast::error::RecvError::Lagged`] and should re-read the snapshot.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to every current subscriber
    pub fn publish(&self, event: StoreEvent) {
        if self.sender.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("No subscribers for store event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::GamePhase;

    #[test]
    fn subscribers_receive_published_events() {
        let bus = EventBus::with_capacity(4);
        let mut rx = bus.subscribe();

        bus.publish(StoreEvent::StateChanged {
            revision: 1,
            phase: GamePhase::Map,
        });

        assert_eq!(
            rx.try_recv().expect("event delivered"),
            StoreEvent::StateChanged {
                revision: 1,
                phase: GamePhase::Map
            }
        );
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(StoreEvent::RunStarted { seed: "x".into() });
        assert_eq!(bus.subscriber_count(), 0);
    }
}
