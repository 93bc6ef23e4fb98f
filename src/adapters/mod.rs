//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements      | Connects to                         |
//! |------------|-----------------|-------------------------------------|
//! | `board`    | CommandActions  | On-board LED (`StatefulOutputPin`)  |
//! | `log_sink` | EventSink       | `log` facade                        |
//! | `serial`   | Transport       | In-memory scripted serial link      |
//! | `sim_pin`  | InputPin        | Shared level for the simulated      |
//! |            | StatefulOutputPin | button and LED                    |
//! | `time`     | TickSource      | Simulated millisecond counter       |

pub mod board;
pub mod log_sink;
pub mod serial;
pub mod sim_pin;
pub mod time;

pub use board::BoardActions;
pub use log_sink::LogEventSink;
pub use serial::ScriptedSerial;
pub use sim_pin::SimPin;
pub use time::SimClock;
