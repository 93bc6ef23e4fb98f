//! System configuration parameters
//!
//! All tunable parameters for the console firmware.
//! The host simulator can override them from a JSON file.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Capacity of the command line buffer in bytes.
pub const LINE_CAPACITY: usize = 64;

/// Token table slots: the command name plus up to four arguments.
pub const MAX_TOKENS: usize = 5;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Command parser ---
    /// Time allowed between the first byte of a line and its terminator (ms)
    pub command_timeout_ms: u32,
    /// Baud rate reported by the BAUD_RATE command
    pub baud_rate: u32,

    // --- Button ---
    /// Debouncer sampling period (ms)
    pub debounce_interval_ms: u32,
    /// The button pulls the line low when pressed
    pub button_active_low: bool,
    /// A debounced press toggles the on-board LED
    pub button_toggles_led: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            command_timeout_ms: 10_000,
            baud_rate: 9600,

            debounce_interval_ms: 40,
            button_active_low: true,
            button_toggles_led: true,
        }
    }
}

impl SystemConfig {
    /// Reject values that would stall or disable a state machine.
    pub fn validate(&self) -> Result<()> {
        if self.command_timeout_ms == 0 {
            return Err(Error::Config("command_timeout_ms must be non-zero"));
        }
        if self.debounce_interval_ms == 0 {
            return Err(Error::Config("debounce_interval_ms must be non-zero"));
        }
        if self.baud_rate == 0 {
            return Err(Error::Config("baud_rate must be non-zero"));
        }
        Ok(())
    }
}
