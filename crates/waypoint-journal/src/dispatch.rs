//! Event dispatch
//!
//! The ledger returns events; this module forwards them. The dispatcher stamps
//! each event with a sequence number and hands it to every subscriber in
//! registration order.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::trace;
use waypoint_core::{LedgerEvent, SequencedEvent};

/// Receives events in commit order
pub trait EventSubscriber: Send + Sync {
    /// Called once per dispatched event
    fn on_event(&self, event: &SequencedEvent);
}

/// Fans events out to subscribers
#[derive(Default)]
pub struct EventDispatcher {
    last_sequence: u64,
    subscribers: Vec<Arc<dyn EventSubscriber>>,
}

impl EventDispatcher {
    /// Dispatcher with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber; it sees only events dispatched afterwards
    pub fn subscribe(&mut self, subscriber: Arc<dyn EventSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Sequence number of the last dispatched event, 0 if none
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    /// Stamp and forward `events`, returning them as dispatched
    pub fn dispatch(&mut self, events: impl IntoIterator<Item = LedgerEvent>) -> Vec<SequencedEvent> {
        let mut dispatched = Vec::new();
        for event in events {
            self.last_sequence += 1;
            let sequenced = SequencedEvent {
                sequence: self.last_sequence,
                event,
            };
            trace!(
                sequence = sequenced.sequence,
                event = sequenced.event.name(),
                subscribers = self.subscribers.len(),
                "dispatching event"
            );
            for subscriber in &self.subscribers {
                subscriber.on_event(&sequenced);
            }
            dispatched.push(sequenced);
        }
        dispatched
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("last_sequence", &self.last_sequence)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Bounded in-memory log of recent events
///
/// Keeps the newest `capacity` events; older ones are evicted.
#[derive(Debug)]
pub struct EventLog {
    capacity: usize,
    events: Mutex<VecDeque<SequencedEvent>>,
}

impl EventLog {
    /// Log retaining at most `capacity` events (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Maximum number of retained events
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained events
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether no events are retained
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Up to `limit` retained events, newest first
    ///
    /// With a shipment filter only `CheckpointAdded` events for that shipment
    /// match; role events never do.
    pub fn recent(&self, shipment_id: Option<&str>, limit: usize) -> Vec<SequencedEvent> {
        self.events
            .lock()
            .iter()
            .rev()
            .filter(|e| shipment_id.map_or(true, |id| e.event.shipment_id() == Some(id)))
            .take(limit)
            .cloned()
            .collect()
    }
}

impl EventSubscriber for EventLog {
    fn on_event(&self, event: &SequencedEvent) {
        let mut events = self.events.lock();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event.clone());
    }
}

/// Forwards events into a `tokio` broadcast channel
///
/// Slow receivers lag and lose the oldest events, as broadcast channels do;
/// the ledger never blocks on them.
#[derive(Debug, Clone)]
pub struct BroadcastSubscriber {
    sender: broadcast::Sender<SequencedEvent>,
}

impl BroadcastSubscriber {
    /// Channel buffering `capacity` events (at least one)
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// New receiver that sees events dispatched from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SequencedEvent> {
        self.sender.subscribe()
    }

    /// Number of live receivers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventSubscriber for BroadcastSubscriber {
    fn on_event(&self, event: &SequencedEvent) {
        if self.sender.send(event.clone()).is_err() {
            trace!(sequence = event.sequence, "no broadcast receivers");
        }
    }
}
