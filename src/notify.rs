use dashmap::DashMap;
use tokio::sync::broadcast;
use ulid::Ulid;

use crate::model::EngineEvent;

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub with one channel per slot. The embedding service subscribes
/// here to drive side effects the engine deliberately doesn't own — most
/// importantly emailing the participant named in `WaitlistPromoted`.
pub struct NotifyHub {
    channels: DashMap<Ulid, broadcast::Sender<EngineEvent>>,
}

impl Default for NotifyHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to a slot's events. Creates the channel if needed.
    pub fn subscribe(&self, slot_id: Ulid) -> broadcast::Receiver<EngineEvent> {
        let sender = self
            .channels
            .entry(slot_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Send a notification. No-op if nobody is listening.
    pub fn send(&self, slot_id: Ulid, event: &EngineEvent) {
        if let Some(sender) = self.channels.get(&slot_id) {
            let _ = sender.send(event.clone());
        }
    }

    /// Drop a slot's channel (when the slot is archived).
    pub fn remove(&self, slot_id: &Ulid) {
        self.channels.remove(slot_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribe_and_receive() {
        let hub = NotifyHub::new();
        let slot_id = Ulid::new();
        let mut rx = hub.subscribe(slot_id);

        let event = EngineEvent::SlotCreated {
            id: slot_id,
            name: "Yoga 101".into(),
            capacity: 8,
            order: 0,
        };
        hub.send(slot_id, &event);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn send_without_subscribers_is_noop() {
        let hub = NotifyHub::new();
        let slot_id = Ulid::new();
        // No subscriber — should not panic
        hub.send(slot_id, &EngineEvent::SlotArchived { id: slot_id });
    }
}
