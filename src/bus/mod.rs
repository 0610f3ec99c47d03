//! Change notification bus
//!
//! Uses tokio::sync::broadcast for pub/sub pattern. Publishing never blocks,
//! so the knob engine stays fully synchronous.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Event types that can be published on the bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum KnobEvent {
    /// An accepted `set_value` / `rotate_by` resolution
    ValueChanged { value: f64, angle: f64 },
}

/// Event bus handle for publishing and subscribing
#[derive(Clone)]
pub struct KnobBus {
    sender: broadcast::Sender<KnobEvent>,
}

impl KnobBus {
    /// Create a new event bus with specified capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    ///
    /// Nobody listening is not a fault; it is only logged.
    pub fn publish(&self, event: KnobEvent) {
        if self.sender.receiver_count() == 0 {
            tracing::warn!(
                "No change listener registered, dropping {:?}. Subscribe to the knob bus to receive value changes.",
                event
            );
            return;
        }
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events
    pub fn subscribe(&self) -> broadcast::Receiver<KnobEvent> {
        self.sender.subscribe()
    }

    /// Get the number of current subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for KnobBus {
    /// Default capacity (64 events)
    fn default() -> Self {
        Self::new(64)
    }
}

/// Shared event bus wrapped in Arc for thread-safe sharing
pub type SharedKnobBus = Arc<KnobBus>;

/// Create a new shared event bus
pub fn create_bus() -> SharedKnobBus {
    Arc::new(KnobBus::default())
}
