//! Script replay through the host simulator.

use uartcli::app::commands::Command;
use uartcli::app::events::AppEvent;
use uartcli::config::SystemConfig;
use uartcli::sim::{Simulator, Step, parse_script};

use crate::mock_hw::RecordingSink;

fn replay(script: &str) -> (Simulator, String) {
    let mut sim = Simulator::new(&SystemConfig::default()).unwrap();
    let mut out = Vec::new();
    for step in parse_script(script).unwrap() {
        sim.apply(&step);
        out.extend(sim.take_output());
    }
    (sim, String::from_utf8(out).unwrap())
}

#[test]
fn transcript_of_a_short_session() {
    let (_, out) = replay("ping\nled on\nbogus\n");
    assert_eq!(
        out,
        "\r\n> ping\r\r\nPONG\
         \r\n> led on\r\
         \r\n> bogus\r\r\nERROR: unknown cmd"
    );
}

#[test]
fn script_button_and_commands_share_the_led() {
    let (sim, _) = replay("led on\n@press\n@wait 200\n@release\n@wait 200\n");
    assert!(!sim.led_is_on(), "press toggled the lit LED off");
    assert_eq!(sim.events().executed(), 1);
}

#[test]
fn wait_long_enough_reports_nothing_new() {
    let (mut sim, _) = replay("ping\n");
    sim.apply(&Step::Wait(20_000));
    assert_eq!(sim.take_output(), b"\r\n> ");
    assert_eq!(sim.events().rejected(), 0);
}

#[test]
fn custom_sink_sees_events() {
    let mut sim = Simulator::new(&SystemConfig::default()).unwrap();
    let mut sink = RecordingSink::new();
    sim.apply(&Step::Press);
    for _ in 0..200 {
        sim.tick_with(&mut sink);
    }
    assert_eq!(sink.events, vec![AppEvent::ButtonPressed]);

    sim.send_line("ping");
    assert_eq!(sim.events().executed(), 1);
    assert_ne!(sink.last(), Some(&AppEvent::CommandExecuted(Command::Ping)));
}

#[test]
fn finish_stops_the_service() {
    let (mut sim, _) = replay("ping\n");
    sim.finish();
    assert!(sim.service().tick_count() > 0);
}
