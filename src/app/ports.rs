//! Port traits: the hexagonal boundary between the state machines and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ CommandParser / AppService (domain)
//! ```
//!
//! The serial link, the tick counter, the command actions and the event
//! log are all injected through these traits at the call site, so the
//! state machines run unchanged against real peripherals or host mocks.

use crate::error::ActionError;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Transport port (driven adapter: domain ↔ serial link)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented serial channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Bring the link up.  Called once before the first poll.
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Release the link.
    fn deinit(&mut self) {}

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns the number of bytes actually read, 0 if nothing is pending.
    /// Must never block.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Queue `data` for transmission.
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

// ───────────────────────────────────────────────────────────────
// Tick source port (driven adapter: hardware timer → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter.  Wraps at `u32::MAX`.
pub trait TickSource {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Command actions (driven adapter: domain → board)
// ───────────────────────────────────────────────────────────────

/// One handler per [`Command`](super::commands::Command).
///
/// Handlers write their response to `out`.  A returned error makes the
/// parser report `bad args`.
pub trait CommandActions {
    fn help<T: Transport>(&mut self, out: &mut T) -> Result<(), ActionError>;

    fn ping<T: Transport>(&mut self, out: &mut T) -> Result<(), ActionError>;

    fn baud_rate<T: Transport>(&mut self, out: &mut T) -> Result<(), ActionError>;

    fn clear<T: Transport>(&mut self, out: &mut T) -> Result<(), ActionError>;

    /// `arg` is the uppercased first argument, or `""` when none was given.
    /// The handler validates it.
    fn led<T: Transport>(&mut self, arg: &str, out: &mut T) -> Result<(), ActionError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
