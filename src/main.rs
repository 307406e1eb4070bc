use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use lyre::{KeystrokeWriter, PlaybackOutcome, Player, PlayerConfig, StopSignal, read_score};
use std::time::Duration;

/// Warnings by default; each -v shows one level more, each -q one less.
fn level_filter(verbose: u8, quiet: u8) -> Result<LevelFilter> {
    if verbose > 0 && quiet > 0 {
        bail!("Mixing --verbose and --quiet is contradictory");
    }
    const LEVELS: [LevelFilter; 6] = [
        LevelFilter::Trace,
        LevelFilter::Debug,
        LevelFilter::Info,
        LevelFilter::Warn,
        LevelFilter::Error,
        LevelFilter::Off,
    ];
    let index = (3 + i32::from(quiet) - i32::from(verbose)).clamp(0, 5) as usize;
    Ok(LEVELS[index])
}

fn command() -> Command {
    Command::new("lyre")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plays a text score as timed keystrokes")
        .arg(
            Arg::new("input")
                .help("Score file to play")
                .required(true)
                .value_name("INPUT_FILE")
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .help("Print debug information. Can be repeated for more detailed output.")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .help("Print only essential information. Can be repeated for quieter output.")
                .short('q')
                .long("quiet")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("list")
                .help("Print the compiled score and exit without playing")
                .long("list")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("settle-ms")
                .help("Pause after activating and before deactivating, in milliseconds")
                .long("settle-ms")
                .value_name("MS")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("latency-ms")
                .help("Estimated time to send one key, in milliseconds")
                .long("latency-ms")
                .value_name("MS")
                .value_parser(clap::value_parser!(u64)),
        )
}

fn main() -> Result<()> {
    let matches = command().get_matches();

    let verbose = matches.get_count("verbose");
    let quiet = matches.get_count("quiet");
    env_logger::Builder::new()
        .filter_level(level_filter(verbose, quiet)?)
        .parse_default_env()
        .init();

    let input_file = matches
        .get_one::<String>("input")
        .context("Missing input file")?;
    let score = read_score(input_file)?;

    if matches.get_flag("list") {
        print!("{}", score);
        return Ok(());
    }

    let mut config = PlayerConfig::default();
    if let Some(ms) = matches.get_one::<u64>("settle-ms") {
        config.settle_delay = Duration::from_millis(*ms);
    }
    if let Some(ms) = matches.get_one::<u64>("latency-ms") {
        config.latency_per_symbol = Duration::from_millis(*ms);
    }

    let signal = StopSignal::new();
    let handle = signal.handle();
    ctrlc::set_handler(move || handle.stop()).context("Failed to install Ctrl-C handler")?;

    let sink = KeystrokeWriter::new(std::io::stdout());
    let mut player = Player::new(sink, signal, config);
    log::info!(
        "Settle delay {:?}, latency {:?} per key",
        player.config().settle_delay,
        player.config().latency_per_symbol
    );
    match player.play(&score).context("Playback failed")? {
        PlaybackOutcome::Completed => log::info!("Finished {}", input_file),
        PlaybackOutcome::Cancelled => log::info!("Stopped {}", input_file),
    }

    Ok(())
}
