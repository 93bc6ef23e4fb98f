//! Line-oriented command parser state machine.
//!
//! ```text
//!  IDLE ──[bytes]──▶ RECEIVING ──[\r or \n]──▶ PARSING ──[known]──▶ OK ──▶ EXECUTING
//!   ▲                    │                        │                          │
//!   │     [timeout, overflow, syntax]   [unknown, too many]        [bad args]│
//!   │                    ▼                        ▼                          ▼
//!   ├───────────── ERROR_* (send diagnostic, reset) ◀────────────────────────┤
//!   └────────────────────────────[success, reset]────────────────────────────┘
//! ```
//!
//! Each [`CommandParser::poll`] runs the handler for the **current** status
//! and nothing else; the status is the only dispatch key.  Every completed
//! cycle, successful or not, ends in a full reset back to `Idle`.

pub mod line;
mod states;
pub mod tokens;

use log::{debug, warn};

use crate::app::commands::Command;
use crate::app::ports::{CommandActions, TickSource, Transport};
use crate::config::LINE_CAPACITY;
use crate::error::{Error, ParseError, Result};
use crate::timeout::Timeout;

use line::LineBuffer;
use tokens::TokenTable;

/// Sent once every time the parser returns to `Idle`.
pub const PROMPT: &[u8] = b"\r\n> ";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParserStatus {
    Idle = 0,
    Receiving = 1,
    Parsing = 2,
    Ok = 3,
    Executing = 4,
    ErrorTimeout = 5,
    ErrorOverflow = 6,
    ErrorSyntax = 7,
    ErrorUnknownCmd = 8,
    ErrorBadArgs = 9,
}

impl ParserStatus {
    /// Total number of statuses.
    pub const COUNT: usize = 10;

    /// The error this status reports, if it is one of the `Error*` statuses.
    pub const fn error(self) -> Option<ParseError> {
        match self {
            Self::ErrorTimeout => Some(ParseError::Timeout),
            Self::ErrorOverflow => Some(ParseError::Overflow),
            Self::ErrorSyntax => Some(ParseError::Syntax),
            Self::ErrorUnknownCmd => Some(ParseError::UnknownCommand),
            Self::ErrorBadArgs => Some(ParseError::BadArgs),
            Self::Idle | Self::Receiving | Self::Parsing | Self::Ok | Self::Executing => None,
        }
    }
}

impl From<ParseError> for ParserStatus {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Timeout => Self::ErrorTimeout,
            ParseError::Overflow => Self::ErrorOverflow,
            ParseError::Syntax => Self::ErrorSyntax,
            ParseError::UnknownCommand => Self::ErrorUnknownCmd,
            ParseError::BadArgs => Self::ErrorBadArgs,
        }
    }
}

/// How a command cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Executed(Command),
    Rejected(ParseError),
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

pub struct CommandParser {
    status: ParserStatus,
    line: LineBuffer,
    tokens: TokenTable,
    /// Resolved by `Parsing`, consumed by `Executing`.
    command: Option<Command>,
    /// Armed on entry to `Receiving`.
    timeout: Timeout,
    prompt_shown: bool,
    /// Already-echoed bytes that followed a terminator in an `Idle` burst.
    /// Consumed before the next transport read.
    carry: heapless::Vec<u8, LINE_CAPACITY>,
}

impl CommandParser {
    /// Build a parser whose receive deadline is `timeout_ms`.
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            status: ParserStatus::Idle,
            line: LineBuffer::new(),
            tokens: TokenTable::new(),
            command: None,
            timeout: Timeout::new(timeout_ms),
            prompt_shown: false,
            carry: heapless::Vec::new(),
        }
    }

    /// Bring up the transport and start from a clean `Idle`.
    pub fn init<T: Transport>(&mut self, io: &mut T) -> Result<()> {
        io.init().map_err(|e| {
            warn!("parser: transport init failed: {:?}", e);
            Error::Init("transport")
        })?;
        self.reset();
        self.carry.clear();
        Ok(())
    }

    /// Advance the state machine by one step.  Never blocks.
    ///
    /// Returns `Some` on the poll that finishes a command cycle.
    pub fn poll(
        &mut self,
        io: &mut impl Transport,
        clock: &impl TickSource,
        actions: &mut impl CommandActions,
    ) -> Option<CycleOutcome> {
        match self.status {
            ParserStatus::Idle => {
                if !self.prompt_shown {
                    send(io, PROMPT);
                    self.prompt_shown = true;
                }
                if let Some(next) = self.on_idle(io, clock) {
                    self.transition(next);
                }
                None
            }
            ParserStatus::Receiving => {
                if let Some(next) = self.on_receiving(io, clock) {
                    self.transition(next);
                }
                None
            }
            ParserStatus::Parsing => {
                let next = self.on_parsing();
                self.transition(next);
                None
            }
            ParserStatus::Ok => {
                self.transition(ParserStatus::Executing);
                None
            }
            ParserStatus::Executing => match self.on_executing(io, actions) {
                Ok(cmd) => {
                    debug!("parser: executed {}", cmd.name());
                    self.reset();
                    Some(CycleOutcome::Executed(cmd))
                }
                Err(e) => {
                    self.transition(e.into());
                    None
                }
            },
            ParserStatus::ErrorTimeout
            | ParserStatus::ErrorOverflow
            | ParserStatus::ErrorSyntax
            | ParserStatus::ErrorUnknownCmd
            | ParserStatus::ErrorBadArgs => {
                let e = self.on_error(io);
                self.reset();
                e.map(CycleOutcome::Rejected)
            }
        }
    }

    /// Drop the current cycle and return to `Idle`.
    ///
    /// Clears the line and tokens, disarms the deadline and re-enables the
    /// prompt.  Carried-over input survives for the next cycle.
    pub fn reset(&mut self) {
        if self.status != ParserStatus::Idle {
            debug!("parser: {:?} -> Idle (reset)", self.status);
        }
        self.status = ParserStatus::Idle;
        self.prompt_shown = false;
        self.line.clear();
        self.tokens.clear();
        self.command = None;
        self.timeout.disarm();
    }

    pub fn status(&self) -> ParserStatus {
        self.status
    }

    /// Bytes accumulated for the current line.
    pub fn line(&self) -> &[u8] {
        self.line.as_bytes()
    }

    pub fn tokens(&self) -> &TokenTable {
        &self.tokens
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout.duration_ms()
    }

    /// `true` while bytes from an earlier burst are waiting to be parsed.
    pub fn has_buffered_input(&self) -> bool {
        !self.carry.is_empty()
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: ParserStatus) {
        debug!("parser: {:?} -> {:?}", self.status, next);
        self.status = next;
    }
}

/// Write to the transport.  A failed write is logged and dropped; the
/// cycle carries on.
fn send(io: &mut impl Transport, data: &[u8]) {
    if let Err(e) = io.write(data) {
        warn!("parser: transport write failed: {:?}", e);
    }
}

/// Non-blocking read.  A failed read counts as "nothing pending".
fn receive(io: &mut impl Transport, buf: &mut [u8]) -> usize {
    match io.read(buf) {
        Ok(n) => n.min(buf.len()),
        Err(e) => {
            warn!("parser: transport read failed: {:?}", e);
            0
        }
    }
}
