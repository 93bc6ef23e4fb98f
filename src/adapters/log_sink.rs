//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  The host simulator routes that to stderr so the
//! serial output on stdout stays clean.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink {
    executed: u32,
    rejected: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands executed successfully so far.
    pub fn executed(&self) -> u32 {
        self.executed
    }

    /// Command cycles that ended in an error report.
    pub fn rejected(&self) -> u32 {
        self.rejected
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | console ready");
            }
            AppEvent::ButtonPressed => {
                info!("BUTTON | pressed");
            }
            AppEvent::CommandExecuted(cmd) => {
                self.executed += 1;
                info!("CMD | {} ok", cmd.name());
            }
            AppEvent::CommandRejected(e) => {
                self.rejected += 1;
                warn!("CMD | rejected: {}", e.reason());
            }
        }
    }
}
