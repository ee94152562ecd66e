//! Event bus for review routing
//!
//! Provides pub/sub messaging using Tokio broadcast channels. Publishing
//! never blocks and succeeds without subscribers.

use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use super::types::RoutingEvent;

/// Channel capacity for broadcast
const CHANNEL_CAPACITY: usize = 256;

/// Shared reference to EventBus
pub type SharedEventBus = Arc<EventBus>;

/// Event bus backed by a broadcast channel
pub struct EventBus {
    sender: broadcast::Sender<RoutingEvent>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Create a shared reference to this event bus
    pub fn shared(self) -> SharedEventBus {
        Arc::new(self)
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: RoutingEvent) {
        let event_type = event.event_type();

        // Broadcast to subscribers (ignore if no receivers)
        match self.sender.send(event) {
            Ok(count) => debug!(event_type, receivers = count, "Event published"),
            Err(_) => debug!(event_type, "Event published (no receivers)"),
        }
    }

    /// Subscribe to receive events
    pub fn subscribe(&self) -> broadcast::Receiver<RoutingEvent> {
        self.sender.subscribe()
    }

    /// Subscribe to events of a single task
    pub fn subscribe_task(&self, task_id: &str) -> TaskReceiver {
        TaskReceiver {
            receiver: self.subscribe(),
            task_id: task_id.to_string(),
        }
    }

    /// Get the number of current subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver that only yields events scoped to one task
pub struct TaskReceiver {
    receiver: broadcast::Receiver<RoutingEvent>,
    task_id: String,
}

impl TaskReceiver {
    /// Receive the next event for this task
    pub async fn recv(&mut self) -> Result<RoutingEvent, broadcast::error::RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if event.task_id() == Some(self.task_id.as_str()) {
                return Ok(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Label;
    use chrono::Utc;

    fn vote(task_id: &str) -> RoutingEvent {
        RoutingEvent::VoteRecorded {
            task_id: task_id.to_string(),
            label: Label::Positive,
            worker_id: None,
            vote_count: 1,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_publish_subscribe() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();

        bus.publish(vote("task-1"));

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.event_type(), "vote_recorded");
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(vote("task-1"));
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = EventBus::new().shared();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(vote("task-1"));

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1.event_type(), e2.event_type());
    }

    #[tokio::test]
    async fn test_task_receiver() {
        let bus = EventBus::new().shared();
        let mut filtered = bus.subscribe_task("target-task");

        let publisher = bus.clone();
        tokio::spawn(async move {
            publisher.publish(vote("other-task"));
            publisher.publish(vote("target-task"));
        });

        let event = filtered.recv().await.unwrap();
        assert_eq!(event.task_id(), Some("target-task"));
    }
}
