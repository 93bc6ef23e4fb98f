//! Sampled-level debounce driver for a momentary push button.
//!
//! ## Sampling model
//!
//! The scheduler calls [`Debouncer::update`] at a fixed period.  Each call
//! reads the pin once, normalises it so `true` means "pressed", and walks
//! the four-state machine below.  A level change is only accepted after it
//! has been read on two consecutive polls, so no separate debounce timer is
//! needed.
//!
//! | State   | pressed               | released      |
//! |---------|-----------------------|---------------|
//! | Up      | -> Falling            | stay Up       |
//! | Falling | -> Down, latch press  | -> Up         |
//! | Down    | stay Down             | -> Raising    |
//! | Raising | -> Down               | -> Up         |
//!
//! The press latch is a one-shot: set on `Falling -> Down` only and cleared
//! only by [`Debouncer::read_and_clear_pressed`].

use embedded_hal::digital::InputPin;
use log::{debug, warn};

/// Debouncer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DebounceState {
    Up = 0,
    Falling = 1,
    Down = 2,
    Raising = 3,
}

impl DebounceState {
    /// Convert a raw byte (e.g. from a retained register) back to a state.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Up),
            1 => Some(Self::Falling),
            2 => Some(Self::Down),
            3 => Some(Self::Raising),
            _ => None,
        }
    }
}

/// Electrical level that means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveLevel {
    Low,
    High,
}

pub struct Debouncer<P> {
    pin: P,
    active: ActiveLevel,
    state: DebounceState,
    pressed: bool,
}

impl<P: InputPin> Debouncer<P> {
    /// Sample the pin once and advance the state machine.
    ///
    /// A pin read error leaves the state untouched.
    pub fn update(&mut self) -> Result<(), P::Error> {
        let pressed = match self.active {
            ActiveLevel::Low => self.pin.is_low()?,
            ActiveLevel::High => self.pin.is_high()?,
        };
        self.step(pressed);
        Ok(())
    }
}

impl<P> Debouncer<P> {
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        Self {
            pin,
            active,
            state: DebounceState::Up,
            pressed: false,
        }
    }

    /// Return to `Up`.  The press latch is left alone.
    pub fn init(&mut self) {
        self.state = DebounceState::Up;
    }

    /// Apply one normalised sample (`true` = pressed) to the transition table.
    pub fn step(&mut self, pressed: bool) {
        self.state = match (self.state, pressed) {
            (DebounceState::Up, true) => DebounceState::Falling,
            (DebounceState::Up, false) => DebounceState::Up,

            (DebounceState::Falling, true) => {
                self.pressed = true;
                debug!("button: press confirmed");
                DebounceState::Down
            }
            (DebounceState::Falling, false) => DebounceState::Up,

            (DebounceState::Down, true) => DebounceState::Down,
            (DebounceState::Down, false) => DebounceState::Raising,

            (DebounceState::Raising, true) => DebounceState::Down,
            (DebounceState::Raising, false) => DebounceState::Up,
        };
    }

    /// Consume the one-shot press event.
    pub fn read_and_clear_pressed(&mut self) -> bool {
        core::mem::take(&mut self.pressed)
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Resume from a raw state byte.  Unknown values fall back to `Up` with
    /// the latch cleared.
    pub fn restore(&mut self, raw: u8) {
        if let Some(state) = DebounceState::from_raw(raw) {
            self.state = state;
        } else {
            warn!("button: invalid state {raw}, resetting to Up");
            self.state = DebounceState::Up;
            self.pressed = false;
        }
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}
