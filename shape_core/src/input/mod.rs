pub mod events;

use self::events::PointerEvent;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Pointer events waiting for the round to consume them.
///
/// Hosts push from their event callbacks (or hand a `sender()` to another
/// thread); the round takes them in order through `Round::drain`.
pub struct PointerQueue {
    sender: Sender<PointerEvent>,
    receiver: Receiver<PointerEvent>,
}

impl PointerQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Queues an event. Safe to call from any thread; arrival order is kept.
    pub fn push(&self, event: PointerEvent) {
        let _ = self.sender.send(event);
    }

    /// Takes the oldest queued event without blocking.
    /// Returns `None` once the queue is empty.
    pub fn pop(&self) -> Option<PointerEvent> {
        self.receiver.try_recv().ok()
    }

    /// A producer handle for a host input thread.
    /// Events sent through it land in this queue.
    pub fn sender(&self) -> Sender<PointerEvent> {
        self.sender.clone()
    }

    /// Number of events pushed but not yet drained.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for PointerQueue {
    fn default() -> Self {
        Self::new()
    }
}
