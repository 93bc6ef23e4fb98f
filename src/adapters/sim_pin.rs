//! Simulated GPIO.
//!
//! A [`SimPin`] is a shared logic level.  Clones see the same level, so
//! the simulator can hold one handle to drive the button while the
//! debouncer samples another, or read back the LED the board adapter
//! drives.

use core::cell::Cell;
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

#[derive(Debug, Clone, Default)]
pub struct SimPin {
    level: Rc<Cell<bool>>,
}

impl SimPin {
    /// `high` is the initial level.
    pub fn new(high: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(high)),
        }
    }

    pub fn level(&self) -> bool {
        self.level.get()
    }

    pub fn set_level(&self, high: bool) {
        self.level.set(high);
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.level.get())
    }
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.level.set(true);
        Ok(())
    }
}

impl StatefulOutputPin for SimPin {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.level.get())
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.level.get())
    }
}
