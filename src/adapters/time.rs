//! Simulated time adapter.
//!
//! Provides the monotonic millisecond counter behind [`TickSource`].  The
//! host simulator advances it by hand, one scheduler tick at a time, so a
//! run is fully deterministic.  Clones share the same counter.

use core::cell::Cell;
use std::rc::Rc;

use crate::app::ports::TickSource;

#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now_ms: Rc<Cell<u32>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the counter at `ms` (e.g. just below `u32::MAX` to exercise wrap).
    pub fn starting_at(ms: u32) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(ms)),
        }
    }

    /// Move time forward, wrapping at `u32::MAX` like a hardware counter.
    pub fn advance(&self, ms: u32) {
        self.now_ms.set(self.now_ms.get().wrapping_add(ms));
    }
}

impl TickSource for SimClock {
    fn now_ms(&self) -> u32 {
        self.now_ms.get()
    }
}
