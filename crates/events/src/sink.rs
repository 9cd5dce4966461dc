//! Sink abstraction for decoupled event delivery.
//!
//! The event sources and the session push into a `BridgeSink` instead of
//! holding the dispatcher directly, so they can be tested without a web
//! runtime.

use std::sync::{Arc, Mutex};

use crate::{PaymentMessageEvent, PermissionSnapshot};

/// Receiver of everything the native side pushes to the web runtime.
///
/// Both methods are fire-and-forget: no acknowledgement, no retry.
pub trait BridgeSink: Send + Sync {
    fn emit_payment_message(&self, event: PaymentMessageEvent);

    fn emit_permission_snapshot(&self, snapshot: PermissionSnapshot);
}

/// Type alias for shared sink reference.
pub type BridgeSinkRef = Arc<dyn BridgeSink>;

/// A captured push from `InMemorySink`.
#[derive(Debug, Clone, PartialEq)]
pub enum EmittedEvent {
    PaymentMessage(PaymentMessageEvent),
    PermissionSnapshot(PermissionSnapshot),
}

/// In-memory sink for testing.
///
/// Captures all pushes for later inspection.
#[derive(Default)]
pub struct InMemorySink {
    events: Mutex<Vec<EmittedEvent>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured events, in push order.
    pub fn events(&self) -> Vec<EmittedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn payment_messages(&self) -> Vec<PaymentMessageEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                EmittedEvent::PaymentMessage(event) => Some(event.clone()),
                EmittedEvent::PermissionSnapshot(_) => None,
            })
            .collect()
    }

    pub fn snapshots(&self) -> Vec<PermissionSnapshot> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                EmittedEvent::PermissionSnapshot(snapshot) => Some(*snapshot),
                EmittedEvent::PaymentMessage(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl BridgeSink for InMemorySink {
    fn emit_payment_message(&self, event: PaymentMessageEvent) {
        self.events
            .lock()
            .unwrap()
            .push(EmittedEvent::PaymentMessage(event));
    }

    fn emit_permission_snapshot(&self, snapshot: PermissionSnapshot) {
        self.events
            .lock()
            .unwrap()
            .push(EmittedEvent::PermissionSnapshot(snapshot));
    }
}

/// Sink that discards everything.
pub struct NullSink;

impl BridgeSink for NullSink {
    fn emit_payment_message(&self, _event: PaymentMessageEvent) {}

    fn emit_permission_snapshot(&self, _snapshot: PermissionSnapshot) {}
}
