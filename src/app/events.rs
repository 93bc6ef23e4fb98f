//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::error::ParseError;

use super::commands::Command;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started and the prompt is about to be shown.
    Started,

    /// The debouncer confirmed a button press.
    ButtonPressed,

    /// A command line was executed successfully.
    CommandExecuted(Command),

    /// A command cycle ended with an error report.
    CommandRejected(ParseError),
}
