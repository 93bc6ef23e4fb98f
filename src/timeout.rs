//! Non-blocking one-shot timeout.
//!
//! The deadline is stored as the tick at which it was armed plus a duration,
//! and compared with `wrapping_sub` so a `u32` millisecond counter may roll
//! over (every ~49 days) without producing a spurious or missed expiry.

/// One-shot deadline measured against a monotonic millisecond tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    duration_ms: u32,
    armed_at: Option<u32>,
}

impl Timeout {
    /// Create a disarmed timeout of `duration_ms`.
    pub const fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            armed_at: None,
        }
    }

    /// Start (or restart) the countdown at `now_ms`.
    pub fn arm(&mut self, now_ms: u32) {
        self.armed_at = Some(now_ms);
    }

    /// Stop the countdown; [`has_elapsed`](Self::has_elapsed) returns false until re-armed.
    pub fn disarm(&mut self) {
        self.armed_at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// `true` once at least `duration_ms` has passed since [`arm`](Self::arm).
    pub fn has_elapsed(&self, now_ms: u32) -> bool {
        match self.armed_at {
            Some(start) => now_ms.wrapping_sub(start) >= self.duration_ms,
            None => false,
        }
    }
}
