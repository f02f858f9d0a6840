//! Persistent input channel.
//!
//! The terminal loop pushes every mapped event here and the session drains it
//! once per frame, so input never has to know which piece is currently active.

use arrayvec::ArrayVec;

use crate::map::InputEvent;

/// Events held per frame before new ones are dropped
pub const QUEUE_CAPACITY: usize = 32;

#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: ArrayVec<InputEvent, QUEUE_CAPACITY>,
    dropped: u32,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an event. A full queue drops it and returns false, except for
    /// `Quit`, which replaces the newest pending event.
    pub fn push(&mut self, event: InputEvent) -> bool {
        if self.pending.try_push(event).is_ok() {
            return true;
        }
        self.dropped = self.dropped.saturating_add(1);
        if event == InputEvent::Quit {
            self.pending.pop();
            self.pending.push(event);
            return true;
        }
        false
    }

    /// Take all pending events in arrival order.
    pub fn drain(&mut self) -> ArrayVec<InputEvent, QUEUE_CAPACITY> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Events lost to a full queue so far
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
