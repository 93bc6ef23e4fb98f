//! In-memory serial transport.
//!
//! [`ScriptedSerial`] stands in for the UART on the host: input is queued
//! up front (or between ticks) and everything the console writes is
//! collected for inspection.  An optional burst limit caps how many bytes
//! a single read may return, mimicking a slow link.

use std::collections::VecDeque;

use log::trace;

use crate::app::ports::Transport;
use crate::error::Error;

#[derive(Debug)]
pub struct ScriptedSerial {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    burst_limit: Option<usize>,
    connected: bool,
    open: bool,
}

impl Default for ScriptedSerial {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSerial {
    pub fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            tx: Vec::new(),
            burst_limit: None,
            connected: true,
            open: false,
        }
    }

    /// Cap every read at `n` bytes (at least one).
    pub fn with_burst_limit(mut self, n: usize) -> Self {
        self.burst_limit = Some(n.max(1));
        self
    }

    /// Queue bytes as if the terminal had sent them.
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Bytes queued but not yet read.
    pub fn pending_input(&self) -> usize {
        self.rx.len()
    }

    pub fn output(&self) -> &[u8] {
        &self.tx
    }

    /// Drain everything written so far.
    pub fn take_output(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.tx)
    }

    /// A disconnected link fails every operation with [`Error::Transport`].
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn check(&self) -> Result<(), Error> {
        if self.connected {
            Ok(())
        } else {
            Err(Error::Transport)
        }
    }
}

impl Transport for ScriptedSerial {
    type Error = Error;

    fn init(&mut self) -> Result<(), Error> {
        self.check()?;
        self.open = true;
        Ok(())
    }

    fn deinit(&mut self) {
        self.open = false;
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        self.check()?;
        let limit = self.burst_limit.unwrap_or(usize::MAX);
        let n = buf.len().min(limit).min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        if n > 0 {
            trace!("serial: rx {} bytes", n);
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        self.check()?;
        self.tx.extend_from_slice(data);
        Ok(())
    }
}
