//! Host simulation harness.
//!
//! Wires [`AppService`] to the simulated adapters and replays a script
//! against it, one millisecond per scheduler tick.
//!
//! ## Script format
//!
//! One step per line:
//!
//! | Line        | Effect                                              |
//! |-------------|-----------------------------------------------------|
//! | `@press`    | drive the button to its active level                |
//! | `@release`  | drive the button to its idle level                  |
//! | `@wait N`   | run N ticks                                         |
//! | `# ...`     | comment, ignored                                    |
//! | anything    | sent over the serial link followed by `\r`          |
//!
//! After each sent line the simulator keeps ticking until the input is
//! drained and the parser is back in `Idle`.

use core::fmt;

use log::{debug, info};

use crate::adapters::{BoardActions, LogEventSink, ScriptedSerial, SimClock, SimPin};
use crate::app::ports::EventSink;
use crate::app::service::AppService;
use crate::config::SystemConfig;
use crate::error::Result;
use crate::parser::ParserStatus;

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Send(String),
    Press,
    Release,
    Wait(u32),
}

/// A script line that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub text: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "script line {}: cannot parse `{}`", self.line, self.text)
    }
}

impl core::error::Error for ScriptError {}

/// Parse a whole script.  Line numbers in errors are 1-based.
pub fn parse_script(text: &str) -> core::result::Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        let bad = || ScriptError {
            line: idx + 1,
            text: line.to_owned(),
        };
        let step = match line.strip_prefix('@') {
            Some("press") => Step::Press,
            Some("release") => Step::Release,
            Some(directive) => {
                let ms = directive
                    .strip_prefix("wait ")
                    .and_then(|n| n.trim().parse().ok())
                    .ok_or_else(bad)?;
                Step::Wait(ms)
            }
            None if line.starts_with('#') => continue,
            None => Step::Send(line.to_owned()),
        };
        steps.push(step);
    }
    Ok(steps)
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

pub struct Simulator {
    service: AppService<SimPin>,
    serial: ScriptedSerial,
    clock: SimClock,
    board: BoardActions<SimPin>,
    sink: LogEventSink,
    button: SimPin,
    led: SimPin,
    active_low: bool,
    /// Upper bound on ticks spent settling one sent line.
    settle_limit: u32,
}

impl Simulator {
    /// Build the board and start the service.
    pub fn new(config: &SystemConfig) -> Result<Self> {
        config.validate()?;

        // Idle level: released.
        let button = SimPin::new(config.button_active_low);
        let led = SimPin::new(false);
        let mut sim = Self {
            service: AppService::new(config, button.clone()),
            serial: ScriptedSerial::new(),
            clock: SimClock::new(),
            board: BoardActions::new(led.clone(), config),
            sink: LogEventSink::new(),
            button,
            led,
            active_low: config.button_active_low,
            settle_limit: config.command_timeout_ms.saturating_mul(2),
        };
        sim.service
            .start(&mut sim.serial, &sim.clock, &mut sim.sink)?;
        Ok(sim)
    }

    /// Advance simulated time by one millisecond and run one scheduler pass.
    pub fn tick(&mut self) {
        self.clock.advance(1);
        self.service
            .tick(&mut self.serial, &self.clock, &mut self.board, &mut self.sink);
    }

    pub fn run_for(&mut self, ms: u32) {
        for _ in 0..ms {
            self.tick();
        }
    }

    /// Tick until the queued input is consumed and the parser is idle.
    pub fn settle(&mut self) {
        for _ in 0..self.settle_limit {
            let parser = self.service.parser();
            if self.serial.pending_input() == 0
                && !parser.has_buffered_input()
                && parser.status() == ParserStatus::Idle
            {
                return;
            }
            self.tick();
        }
        debug!("sim: settle limit reached");
    }

    pub fn send_line(&mut self, line: &str) {
        self.serial.push_input(line.as_bytes());
        self.serial.push_input(b"\r");
        self.settle();
    }

    pub fn set_button(&mut self, pressed: bool) {
        self.button.set_level(pressed != self.active_low);
    }

    pub fn apply(&mut self, step: &Step) {
        debug!("sim: {:?}", step);
        match step {
            Step::Send(line) => self.send_line(line),
            Step::Press => self.set_button(true),
            Step::Release => self.set_button(false),
            Step::Wait(ms) => self.run_for(*ms),
        }
    }

    /// Drain everything the console has written so far.
    pub fn take_output(&mut self) -> Vec<u8> {
        self.serial.take_output()
    }

    pub fn led_is_on(&self) -> bool {
        self.led.level()
    }

    pub fn service(&self) -> &AppService<SimPin> {
        &self.service
    }

    pub fn events(&self) -> &LogEventSink {
        &self.sink
    }

    /// Stop the service and report totals.
    pub fn finish(&mut self) {
        self.service.stop(&mut self.serial);
        info!(
            "sim: {} executed, {} rejected, LED {}",
            self.sink.executed(),
            self.sink.rejected(),
            if self.led.level() { "on" } else { "off" }
        );
    }

    /// Route events somewhere other than the built-in log sink.
    pub fn tick_with(&mut self, sink: &mut impl EventSink) {
        self.clock.advance(1);
        self.service
            .tick(&mut self.serial, &self.clock, &mut self.board, sink);
    }
}
