//! Per-status handlers.
//!
//! Each handler does the work for one status and reports where to go next.
//! [`CommandParser::poll`](super::CommandParser::poll) owns the dispatch and
//! the transitions.

use log::{debug, warn};

use crate::app::commands::Command;
use crate::app::ports::{CommandActions, TickSource, Transport};
use crate::config::LINE_CAPACITY;
use crate::error::ParseError;

use super::line::{is_terminator, is_valid_char};
use super::{CommandParser, ParserStatus, receive, send};

impl CommandParser {
    // ═══════════════════════════════════════════════════════════════════
    //  IDLE: wait for the first burst of a line
    // ═══════════════════════════════════════════════════════════════════

    pub(super) fn on_idle(
        &mut self,
        io: &mut impl Transport,
        clock: &impl TickSource,
    ) -> Option<ParserStatus> {
        let mut scratch = [0u8; LINE_CAPACITY];
        let n = if self.carry.is_empty() {
            let n = receive(io, &mut scratch);
            if n == 0 {
                return None;
            }
            send(io, &scratch[..n]);
            // The whole burst is checked before any of it is acted on.
            if scratch[..n].iter().any(|&b| !is_valid_char(b)) {
                return Some(ParserStatus::ErrorSyntax);
            }
            n
        } else {
            // Already echoed and checked when it arrived.
            let n = self.carry.len();
            scratch[..n].copy_from_slice(&self.carry);
            self.carry.clear();
            n
        };
        let burst = &scratch[..n];

        for (i, &byte) in burst.iter().enumerate() {
            if byte == 0 {
                continue;
            }
            if is_terminator(byte) {
                // A bare terminator (the tail of a CRLF) does not open a line.
                if self.line.is_empty() {
                    continue;
                }
                self.stash(&burst[i + 1..]);
                return Some(ParserStatus::Parsing);
            }
            if let Err(e) = self.line.push(byte) {
                return Some(e.into());
            }
        }

        if self.line.is_empty() {
            return None;
        }
        self.timeout.arm(clock.now_ms());
        Some(ParserStatus::Receiving)
    }

    /// Keep the rest of a burst for the next `Idle` pass.
    fn stash(&mut self, rest: &[u8]) {
        if rest.is_empty() {
            return;
        }
        if self.carry.extend_from_slice(rest).is_err() {
            warn!("parser: dropped {} buffered bytes", rest.len());
            return;
        }
        debug!("parser: {} bytes buffered for the next line", rest.len());
    }

    // ═══════════════════════════════════════════════════════════════════
    //  RECEIVING: one byte per poll until a terminator
    // ═══════════════════════════════════════════════════════════════════

    pub(super) fn on_receiving(
        &mut self,
        io: &mut impl Transport,
        clock: &impl TickSource,
    ) -> Option<ParserStatus> {
        let mut byte = [0u8; 1];
        let n = receive(io, &mut byte);

        if self.timeout.has_elapsed(clock.now_ms()) {
            return Some(ParserStatus::ErrorTimeout);
        }
        if n == 0 || byte[0] == 0 {
            return None;
        }
        send(io, &byte);

        let byte = byte[0];
        if self.line.is_full() {
            return Some(ParserStatus::ErrorOverflow);
        }
        if !is_valid_char(byte) {
            return Some(ParserStatus::ErrorSyntax);
        }
        if is_terminator(byte) {
            return Some(ParserStatus::Parsing);
        }
        match self.line.push(byte) {
            Ok(()) => None,
            Err(e) => Some(e.into()),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    //  PARSING: tokenize and resolve the command name
    // ═══════════════════════════════════════════════════════════════════

    pub(super) fn on_parsing(&mut self) -> ParserStatus {
        self.command = None;
        if let Err(e) = self.tokens.tokenize(self.line.as_bytes()) {
            return e.into();
        }
        match Command::from_name(self.tokens.command()) {
            Some(cmd) => {
                self.command = Some(cmd);
                ParserStatus::Ok
            }
            None => ParserStatus::ErrorUnknownCmd,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    //  EXECUTING: argument checks, then the action
    // ═══════════════════════════════════════════════════════════════════

    pub(super) fn on_executing(
        &mut self,
        io: &mut impl Transport,
        actions: &mut impl CommandActions,
    ) -> Result<Command, ParseError> {
        let cmd = self.command.ok_or(ParseError::UnknownCommand)?;

        if cmd.max_args().is_some_and(|max| self.tokens.arg_count() > max) {
            return Err(ParseError::BadArgs);
        }

        let result = match cmd {
            Command::Help => actions.help(io),
            Command::Ping => actions.ping(io),
            Command::BaudRate => actions.baud_rate(io),
            Command::Clear => actions.clear(io),
            Command::Led => actions.led(self.tokens.slot(1), io),
        };
        result.map_err(|e| {
            warn!("parser: {} failed: {}", cmd.name(), e);
            ParseError::from(e)
        })?;
        Ok(cmd)
    }

    // ═══════════════════════════════════════════════════════════════════
    //  ERROR_*: report over the link
    // ═══════════════════════════════════════════════════════════════════

    pub(super) fn on_error(&mut self, io: &mut impl Transport) -> Option<ParseError> {
        let e = self.status.error()?;
        warn!("parser: {}", e);
        send(io, e.diagnostic().as_bytes());
        Some(e)
    }
}
