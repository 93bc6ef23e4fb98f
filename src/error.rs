//! Unified error types for the uartcli firmware core.
//!
//! A single `Error` enum covers start-up and configuration failures, while
//! [`ParseError`] is the flat taxonomy of command-cycle failures reported
//! over the serial link.  All variants are `Copy` so they can be stored in
//! the parser status and handed to event sinks without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible start-up operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
    /// The byte transport reported a failure.
    Transport,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Transport => write!(f, "transport failure"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Command-cycle errors
// ---------------------------------------------------------------------------

/// Why a command cycle was abandoned.
///
/// Every variant is recovered locally: the parser emits
/// [`diagnostic`](Self::diagnostic) over the transport and resets to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// No line terminator arrived before the command deadline.
    Timeout,
    /// The line exceeded the buffer capacity.
    Overflow,
    /// A byte outside the accepted character set arrived.
    Syntax,
    /// The first token is not a known command.
    UnknownCommand,
    /// Too many tokens, too many arguments, or an argument the action rejected.
    BadArgs,
}

impl ParseError {
    /// Short reason text used on the wire.
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Overflow => "line too long",
            Self::Syntax => "syntax",
            Self::UnknownCommand => "unknown cmd",
            Self::BadArgs => "bad args",
        }
    }

    /// Full diagnostic line sent to the terminal.
    pub const fn diagnostic(self) -> &'static str {
        match self {
            Self::Timeout => "\r\nERROR: timeout",
            Self::Overflow => "\r\nERROR: line too long",
            Self::Syntax => "\r\nERROR: syntax",
            Self::UnknownCommand => "\r\nERROR: unknown cmd",
            Self::BadArgs => "\r\nERROR: bad args",
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

// ---------------------------------------------------------------------------
// Action errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// The argument is not one the action understands.
    InvalidArgument,
    /// The output pin refused the write.
    Hardware,
    /// The response could not be written to the transport.
    Transport,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::Hardware => write!(f, "GPIO write failed"),
            Self::Transport => write!(f, "response write failed"),
        }
    }
}

impl From<ActionError> for ParseError {
    fn from(_: ActionError) -> Self {
        Self::BadArgs
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
