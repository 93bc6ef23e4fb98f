//! Fuzz target: the command parser fed an arbitrary byte stream.
//!
//! The first byte picks the read burst size, the rest is the serial input.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - The line buffer never exceeds `LINE_CAPACITY`
//! - Once input stops and the deadline passes, the parser is back in `Idle`
//!   with nothing buffered
//!
//! cargo fuzz run fuzz_console

#![no_main]

use libfuzzer_sys::fuzz_target;
use uartcli::adapters::{BoardActions, ScriptedSerial, SimClock, SimPin};
use uartcli::config::{LINE_CAPACITY, MAX_TOKENS, SystemConfig};
use uartcli::parser::{CommandParser, ParserStatus};

fuzz_target!(|data: &[u8]| {
    let Some((&burst, input)) = data.split_first() else {
        return;
    };

    let config = SystemConfig {
        command_timeout_ms: 100,
        ..SystemConfig::default()
    };
    let mut parser = CommandParser::new(config.command_timeout_ms);
    let mut io = ScriptedSerial::new().with_burst_limit(usize::from(burst));
    let mut board = BoardActions::new(SimPin::new(false), &config);
    let clock = SimClock::new();

    parser.init(&mut io).unwrap();
    io.push_input(input);

    let ticks = input.len() as u32 * 4 + config.command_timeout_ms + 10;
    for _ in 0..ticks {
        clock.advance(1);
        parser.poll(&mut io, &clock, &mut board);
        assert!(parser.line().len() <= LINE_CAPACITY);
        assert!(parser.tokens().len() <= MAX_TOKENS);
    }

    assert_eq!(io.pending_input(), 0);
    assert_eq!(parser.status(), ParserStatus::Idle);
    assert!(!parser.has_buffered_input());
});
