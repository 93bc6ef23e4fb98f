//! Commands understood by the serial console.
//!
//! Input is uppercased before lookup, so names here are the canonical
//! uppercase spellings.

use core::str::FromStr;

use crate::error::ActionError;

/// Every command the parser accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the command summary.
    Help,
    /// Answer `PONG`.
    Ping,
    /// Drive the on-board LED (`ON`, `OFF` or `TOGGLE`).
    Led,
    /// Report the configured UART baud rate.
    BaudRate,
    /// Clear the terminal screen.
    Clear,
}

impl Command {
    pub const ALL: [Self; 5] = [
        Self::Help,
        Self::Ping,
        Self::Led,
        Self::BaudRate,
        Self::Clear,
    ];

    /// Look up an already-uppercased command name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Help => "HELP",
            Self::Ping => "PING",
            Self::Led => "LED",
            Self::BaudRate => "BAUD_RATE",
            Self::Clear => "CLEAR",
        }
    }

    /// Upper bound on arguments, or `None` when extra arguments are ignored.
    pub const fn max_args(self) -> Option<usize> {
        match self {
            Self::Led => Some(1),
            Self::Help | Self::Ping | Self::BaudRate | Self::Clear => None,
        }
    }
}

/// What the LED command should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedAction {
    On,
    Off,
    Toggle,
}

impl FromStr for LedAction {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ON" => Ok(Self::On),
            "OFF" => Ok(Self::Off),
            "TOGGLE" => Ok(Self::Toggle),
            _ => Err(ActionError::InvalidArgument),
        }
    }
}
