//! Application service, the scheduler context.
//!
//! [`AppService`] owns the command parser, the button debouncer and the
//! sampling deadline that paces it.  All I/O flows through port traits
//! injected at call sites, so the whole service runs against mock
//! adapters on the host.
//!
//! ```text
//!  Transport ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                │        AppService        │
//!  TickSource ──▶│  CommandParser · Button  │──▶ CommandActions
//!                └──────────────────────────┘
//! ```

use embedded_hal::digital::InputPin;
use log::{info, warn};

use crate::config::SystemConfig;
use crate::drivers::button::{ActiveLevel, DebounceState, Debouncer};
use crate::error::Result;
use crate::parser::{CommandParser, CycleOutcome};
use crate::timeout::Timeout;

use super::events::AppEvent;
use super::ports::{CommandActions, EventSink, TickSource, Transport};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService<P> {
    parser: CommandParser,
    button: Debouncer<P>,
    /// Re-armed after every debouncer sample.
    sample: Timeout,
    toggles_led: bool,
    tick_count: u64,
}

impl<P: InputPin> AppService<P> {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch the transport; call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig, pin: P) -> Self {
        let active = if config.button_active_low {
            ActiveLevel::Low
        } else {
            ActiveLevel::High
        };
        Self {
            parser: CommandParser::new(config.command_timeout_ms),
            button: Debouncer::new(pin, active),
            sample: Timeout::new(config.debounce_interval_ms),
            toggles_led: config.button_toggles_led,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Initialise both state machines and start the sampling period.
    pub fn start(
        &mut self,
        io: &mut impl Transport,
        clock: &impl TickSource,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.parser.init(io)?;
        self.button.init();
        self.sample.arm(clock.now_ms());
        self.tick_count = 0;
        sink.emit(&AppEvent::Started);
        info!(
            "AppService started (timeout {} ms, sampling every {} ms)",
            self.parser.timeout_ms(),
            self.sample.duration_ms()
        );
        Ok(())
    }

    /// Release the transport.
    pub fn stop(&mut self, io: &mut impl Transport) {
        self.parser.reset();
        io.deinit();
        info!("AppService stopped after {} ticks", self.tick_count);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One scheduler pass: poll the parser, then sample the button if its
    /// period has elapsed, then consume the press latch.
    pub fn tick(
        &mut self,
        io: &mut impl Transport,
        clock: &impl TickSource,
        actions: &mut impl CommandActions,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Command parser, one step
        match self.parser.poll(io, clock, actions) {
            Some(CycleOutcome::Executed(cmd)) => sink.emit(&AppEvent::CommandExecuted(cmd)),
            Some(CycleOutcome::Rejected(e)) => sink.emit(&AppEvent::CommandRejected(e)),
            None => {}
        }

        // 2. Debouncer, on its own period
        let now = clock.now_ms();
        if self.sample.has_elapsed(now) {
            if let Err(e) = self.button.update() {
                warn!("button read failed: {:?}", e);
            }
            self.sample.arm(now);
        }

        // 3. Press latch
        if self.button.read_and_clear_pressed() {
            sink.emit(&AppEvent::ButtonPressed);
            if self.toggles_led {
                if let Err(e) = actions.led("TOGGLE", io) {
                    warn!("button LED toggle failed: {}", e);
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn parser(&self) -> &CommandParser {
        &self.parser
    }

    pub fn button_state(&self) -> DebounceState {
        self.button.state()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Tear the service down and hand back the button pin.
    pub fn into_pin(self) -> P {
        self.button.release()
    }
}
