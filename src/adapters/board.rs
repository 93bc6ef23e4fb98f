//! Board adapter: the command handlers.
//!
//! Owns the on-board LED and answers every [`Command`] through
//! [`CommandActions`].  The LED is any `embedded-hal`
//! [`StatefulOutputPin`], so the same adapter drives a real GPIO or a
//! [`SimPin`](super::SimPin).
//!
//! [`Command`]: crate::app::commands::Command

use core::fmt::Write as _;

use embedded_hal::digital::StatefulOutputPin;
use heapless::String;
use log::{debug, warn};

use crate::app::commands::LedAction;
use crate::app::ports::{CommandActions, Transport};
use crate::config::SystemConfig;
use crate::error::ActionError;

pub const HELP_TEXT: &str = "\r\nCOMMANDS:\
\r\n\tHELP: prints the available commands\
\r\n\tPING: PONG answers\
\r\n\tBAUD_RATE: returns the baud rate for UART\
\r\n\tCLEAR: clear serial monitor screen\
\r\n\tLED ON|OFF|TOGGLE: performs one of the given actions over the on-board LED";

pub const PONG: &str = "\r\nPONG";

/// ANSI erase-display sequence.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Concrete adapter that answers commands with the board's peripherals.
pub struct BoardActions<L> {
    led: L,
    baud_rate: u32,
}

impl<L: StatefulOutputPin> BoardActions<L> {
    pub fn new(led: L, config: &SystemConfig) -> Self {
        Self {
            led,
            baud_rate: config.baud_rate,
        }
    }

    /// Current LED level, `true` when lit.
    pub fn led_is_on(&mut self) -> Result<bool, ActionError> {
        self.led.is_set_high().map_err(|e| {
            warn!("LED read failed: {:?}", e);
            ActionError::Hardware
        })
    }

    /// Give the LED pin back, keeping its level.
    pub fn release(self) -> L {
        self.led
    }
}

fn reply<T: Transport>(out: &mut T, text: &str) -> Result<(), ActionError> {
    out.write(text.as_bytes()).map_err(|e| {
        warn!("reply write failed: {:?}", e);
        ActionError::Transport
    })
}

// ── CommandActions implementation ─────────────────────────────

impl<L: StatefulOutputPin> CommandActions for BoardActions<L> {
    fn help<T: Transport>(&mut self, out: &mut T) -> Result<(), ActionError> {
        reply(out, HELP_TEXT)
    }

    fn ping<T: Transport>(&mut self, out: &mut T) -> Result<(), ActionError> {
        reply(out, PONG)
    }

    fn baud_rate<T: Transport>(&mut self, out: &mut T) -> Result<(), ActionError> {
        let mut text: String<16> = String::new();
        write!(text, "\r\n{}", self.baud_rate).map_err(|_| ActionError::Transport)?;
        reply(out, &text)
    }

    fn clear<T: Transport>(&mut self, out: &mut T) -> Result<(), ActionError> {
        reply(out, CLEAR_SCREEN)
    }

    fn led<T: Transport>(&mut self, arg: &str, _out: &mut T) -> Result<(), ActionError> {
        let action: LedAction = arg.parse()?;
        let result = match action {
            LedAction::On => self.led.set_high(),
            LedAction::Off => self.led.set_low(),
            LedAction::Toggle => self.led.toggle(),
        };
        result.map_err(|e| {
            warn!("LED {:?} failed: {:?}", action, e);
            ActionError::Hardware
        })?;
        debug!("LED {:?}", action);
        Ok(())
    }
}
