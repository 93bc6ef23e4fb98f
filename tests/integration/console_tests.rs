//! Full console sessions: AppService + BoardActions over a scripted link.
//!
//! Each test types lines the way a terminal would and checks the exact
//! bytes that come back, including echo, responses and prompts.

use uartcli::adapters::{BoardActions, ScriptedSerial, SimPin};
use uartcli::app::commands::Command;
use uartcli::app::events::AppEvent;
use uartcli::app::ports::{TickSource, Transport};
use uartcli::app::service::AppService;
use uartcli::config::SystemConfig;
use uartcli::error::ParseError;
use uartcli::parser::ParserStatus;

use crate::mock_hw::{FlakySerial, ManualClock, RecordingSink};

struct Console<T> {
    svc: AppService<SimPin>,
    serial: T,
    clock: ManualClock,
    board: BoardActions<SimPin>,
    sink: RecordingSink,
    led: SimPin,
}

impl<T: Transport> Console<T> {
    fn with(serial: T) -> Self {
        let config = SystemConfig::default();
        let led = SimPin::new(false);
        let mut c = Self {
            svc: AppService::new(&config, SimPin::new(true)),
            serial,
            clock: ManualClock::default(),
            board: BoardActions::new(led.clone(), &config),
            sink: RecordingSink::new(),
            led,
        };
        c.svc.start(&mut c.serial, &c.clock, &mut c.sink).unwrap();
        c.tick();
        c
    }

    fn tick(&mut self) {
        self.clock.advance(1);
        self.svc
            .tick(&mut self.serial, &self.clock, &mut self.board, &mut self.sink);
    }

    fn run(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }
}

impl Console<ScriptedSerial> {
    fn new() -> Self {
        Self::with(ScriptedSerial::new())
    }

    fn drain(&mut self) -> String {
        String::from_utf8(self.serial.take_output()).unwrap()
    }

    /// Send `input`, run long enough for any cycle to finish, return the output.
    fn type_in(&mut self, input: &str) -> String {
        self.serial.push_input(input.as_bytes());
        self.run(200);
        self.drain()
    }
}

// ── Greeting ──────────────────────────────────────────────────

#[test]
fn prompt_on_start() {
    let mut c = Console::new();
    assert_eq!(c.drain(), "\r\n> ");
    c.run(50);
    assert_eq!(c.drain(), "", "prompt must not repeat while idle");
}

// ── Successful commands ───────────────────────────────────────

#[test]
fn ping_session() {
    let mut c = Console::new();
    c.drain();
    assert_eq!(c.type_in("ping\r"), "ping\r\r\nPONG\r\n> ");
    assert_eq!(c.sink.last(), Some(&AppEvent::CommandExecuted(Command::Ping)));
}

#[test]
fn baud_rate_session() {
    let mut c = Console::new();
    c.drain();
    assert_eq!(c.type_in("BAUD_RATE\r"), "BAUD_RATE\r\r\n9600\r\n> ");
}

#[test]
fn clear_session() {
    let mut c = Console::new();
    c.drain();
    assert_eq!(c.type_in("clear\r"), "clear\r\x1b[2J\r\n> ");
}

#[test]
fn help_session() {
    let mut c = Console::new();
    c.drain();
    let out = c.type_in("help\r");
    assert!(out.starts_with("help\r\r\nCOMMANDS:"));
    assert!(out.contains("LED ON|OFF|TOGGLE"));
    assert!(out.ends_with("\r\n> "));
}

#[test]
fn led_commands_drive_the_pin() {
    let mut c = Console::new();
    c.type_in("led on\r");
    assert!(c.led.level());
    c.type_in("LED OFF\r");
    assert!(!c.led.level());
    c.type_in("Led Toggle\r");
    assert!(c.led.level());
    assert_eq!(c.sink.count(AppEvent::CommandExecuted(Command::Led)), 3);
}

#[test]
fn crlf_in_one_burst_runs_once() {
    let mut c = Console::new();
    c.drain();
    assert_eq!(c.type_in("ping\r\n"), "ping\r\n\r\nPONG\r\n> ");
    assert_eq!(c.sink.count(AppEvent::CommandExecuted(Command::Ping)), 1);
}

#[test]
fn crlf_split_across_reads_runs_once() {
    let mut c = Console::with(ScriptedSerial::new().with_burst_limit(1));
    c.drain();
    assert_eq!(c.type_in("ping\r\n"), "ping\r\r\nPONG\r\n> \n");
    assert_eq!(c.sink.count(AppEvent::CommandExecuted(Command::Ping)), 1);
    assert_eq!(c.svc.parser().status(), ParserStatus::Idle);
}

#[test]
fn back_to_back_lines() {
    let mut c = Console::with(ScriptedSerial::new().with_burst_limit(1));
    c.type_in("ping\rled on\r");
    assert_eq!(c.sink.count(AppEvent::CommandExecuted(Command::Ping)), 1);
    assert!(c.led.level());
}

#[test]
fn pasted_lines_in_one_burst_all_run() {
    let mut c = Console::new();
    c.drain();
    assert_eq!(
        c.type_in("ping\rled on\r"),
        "ping\rled on\r\r\nPONG\r\n> \r\n> "
    );
    assert_eq!(c.sink.count(AppEvent::CommandExecuted(Command::Ping)), 1);
    assert!(c.led.level());
    assert!(!c.svc.parser().has_buffered_input());
}

#[test]
fn invalid_byte_anywhere_in_a_burst_rejects_it() {
    let mut c = Console::new();
    c.drain();
    assert_eq!(c.type_in("ping\r!"), "ping\r!\r\nERROR: syntax\r\n> ");
    assert_eq!(c.sink.count(AppEvent::CommandExecuted(Command::Ping)), 0);
}

// ── Error reports ─────────────────────────────────────────────

#[test]
fn bad_led_argument() {
    let mut c = Console::new();
    c.drain();
    assert_eq!(
        c.type_in("led purple\r"),
        "led purple\r\r\nERROR: bad args\r\n> "
    );
    assert!(!c.led.level());
}

#[test]
fn led_with_two_arguments_leaves_pin_alone() {
    let mut c = Console::new();
    c.type_in("led on off\r");
    assert!(!c.led.level());
    assert_eq!(
        c.sink.last(),
        Some(&AppEvent::CommandRejected(ParseError::BadArgs))
    );
}

#[test]
fn unknown_command() {
    let mut c = Console::new();
    c.drain();
    assert_eq!(c.type_in("reboot\r"), "reboot\r\r\nERROR: unknown cmd\r\n> ");
}

#[test]
fn leading_space_is_an_unknown_command() {
    let mut c = Console::new();
    c.drain();
    assert_eq!(c.type_in(" ping\r"), " ping\r\r\nERROR: unknown cmd\r\n> ");
}

#[test]
fn digits_are_a_syntax_error() {
    let mut c = Console::new();
    c.drain();
    assert_eq!(c.type_in("p1ng\r"), "p1ng\r\r\nERROR: syntax\r\n> ");
}

#[test]
fn too_many_tokens() {
    let mut c = Console::new();
    c.type_in("ping a b c d e\r");
    assert_eq!(
        c.sink.last(),
        Some(&AppEvent::CommandRejected(ParseError::BadArgs))
    );
}

#[test]
fn overflow_then_resync_on_the_remainder() {
    let mut c = Console::new();
    c.drain();
    let out = c.type_in(&format!("{}\r", "A".repeat(70)));
    let expected = format!(
        "{}\r\nERROR: line too long\r\n> AAAAA\r\r\nERROR: unknown cmd\r\n> ",
        "A".repeat(65)
    );
    assert_eq!(out, expected);
}

#[test]
fn unterminated_line_times_out() {
    let mut c = Console::new();
    c.drain();
    c.serial.push_input(b"pin");
    c.run(9_000);
    assert_eq!(c.svc.parser().status(), ParserStatus::Receiving);
    c.run(1_100);
    assert_eq!(c.drain(), "pin\r\nERROR: timeout\r\n> ");
    assert_eq!(c.type_in("ping\r"), "ping\r\r\nPONG\r\n> ");
}

#[test]
fn deadline_spans_the_whole_line() {
    let mut c = Console::with(ScriptedSerial::new().with_burst_limit(1));
    let start = c.clock.now_ms();
    c.serial.push_input(b"pi");
    c.run(5_000);
    c.serial.push_input(b"ng");
    c.run(5_100);
    assert!(c.clock.now_ms() - start > 10_000);
    assert_eq!(
        c.sink.last(),
        Some(&AppEvent::CommandRejected(ParseError::Timeout))
    );
}

// ── Link failures ─────────────────────────────────────────────

#[test]
fn failed_writes_do_not_stop_actions() {
    let mut c = Console::with(FlakySerial::new());
    c.serial.fail_writes = true;
    c.serial.feed(b"led on\r");
    c.run(20);
    assert!(c.led.level());
    assert_eq!(c.sink.last(), Some(&AppEvent::CommandExecuted(Command::Led)));
    assert_eq!(c.serial.output(), "\r\n> ", "only the greeting got through");
}

#[test]
fn failed_response_write_is_bad_args() {
    let mut c = Console::with(FlakySerial::new());
    c.serial.fail_writes = true;
    c.serial.feed(b"ping\r");
    c.run(20);
    assert_eq!(
        c.sink.last(),
        Some(&AppEvent::CommandRejected(ParseError::BadArgs))
    );
}

#[test]
fn failed_reads_look_like_silence() {
    let mut c = Console::with(FlakySerial::new());
    c.serial.fail_reads = true;
    c.serial.feed(b"ping\r");
    c.run(50);
    assert_eq!(c.svc.parser().status(), ParserStatus::Idle);
    assert_eq!(c.sink.events, vec![AppEvent::Started]);

    c.serial.fail_reads = false;
    c.run(20);
    assert_eq!(c.sink.last(), Some(&AppEvent::CommandExecuted(Command::Ping)));
}
