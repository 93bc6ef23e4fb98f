//! uartcli host simulator.
//!
//! Replays a script against the console core with simulated time, GPIO and
//! serial link.  Serial output goes to stdout; logs go to stderr.
//!
//! ```text
//!   script ──▶ Simulator ──▶ ScriptedSerial ──▶ stdout
//!                 │
//!                 ├── SimPin (button, LED)
//!                 └── SimClock (1 ms per tick)
//! ```

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::{App, Arg, crate_description, crate_name, crate_version};
use log::{LevelFilter, info, trace};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use uartcli::config::SystemConfig;
use uartcli::sim::{Simulator, parse_script};

fn main() -> Result<()> {
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::with_name("CONFIG")
                .help("JSON file overriding the default configuration")
                .short("c")
                .long("config")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("SCRIPT")
                .help("script to replay; stdin when omitted")
                .index(1),
        )
        .arg(Arg::with_name("v").short("v").multiple(true).help(
            "Sets the logging level of verbosity, repeat several times for \
                higher verbosity",
        ))
        .get_matches();

    let log_level = match matches.occurrences_of("v") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("installing logger")?;

    // ── Configuration ─────────────────────────────────────────
    let config = match matches.value_of("CONFIG") {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            let config: SystemConfig =
                serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
            info!("Loaded config from {}", path);
            config
        }
        None => SystemConfig::default(),
    };
    config.validate().context("invalid configuration")?;
    trace!("{:#?}", config);

    // ── Script ────────────────────────────────────────────────
    let script = match matches.value_of("SCRIPT") {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {path}"))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            text
        }
    };
    let steps = parse_script(&script)?;
    info!("Replaying {} steps", steps.len());

    // ── Run ───────────────────────────────────────────────────
    let mut sim = Simulator::new(&config).context("starting simulator")?;
    let mut stdout = io::stdout().lock();
    for step in &steps {
        sim.apply(step);
        stdout.write_all(&sim.take_output())?;
    }

    // Show the final prompt.
    sim.tick();
    stdout.write_all(&sim.take_output())?;
    writeln!(stdout)?;
    stdout.flush()?;

    sim.finish();
    Ok(())
}
