//! uartcli console core.
//!
//! A debounced push button and a line-oriented command interpreter over a
//! serial link, both as non-blocking state machines polled from one
//! scheduler loop.  Hardware is reached only through the port traits in
//! [`app::ports`] and `embedded-hal` pin traits, so everything here runs
//! unchanged on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod parser;
pub mod sim;
pub mod timeout;
