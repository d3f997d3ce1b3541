//! In-process event bus on a tokio broadcast channel.
//!
//! Presentation layers subscribe for `ChallengeStarted` / `ObjectFound` /
//! `ChallengeEnded` style notifications. Publishing is best-effort: no
//! subscribers, or subscribers that lag and drop messages, never fail the
//! engine.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::application::ports::outbound::{EventBusError, EventBusPort};

const CHANNEL_CAPACITY: usize = 256;

pub struct BroadcastEventBus<E> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone> BroadcastEventBus<E> {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }
}

impl<E: Clone> Default for BroadcastEventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E> EventBusPort<E> for BroadcastEventBus<E>
where
    E: Serialize + Clone + Send + Sync + 'static,
{
    async fn publish(&self, event: E) -> Result<(), EventBusError> {
        // send only errors when there are no receivers, which is fine
        let _ = self.sender.send(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snaphunt_domain::GameEvent;

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let bus: BroadcastEventBus<GameEvent> = BroadcastEventBus::new();
        bus.publish(GameEvent::SessionReset).await.expect("ok");
    }

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let bus: BroadcastEventBus<GameEvent> = BroadcastEventBus::new();
        let mut rx = bus.subscribe();
        bus.publish(GameEvent::SessionReset).await.expect("ok");
        let event = rx.recv().await.expect("event");
        assert_eq!(event, GameEvent::SessionReset);
    }
}
