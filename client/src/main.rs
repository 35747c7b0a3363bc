use std::{
    error::Error,
    fs::File,
    io::{self, stdout},
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Mutex,
    time::Duration,
};

use clap::Parser;
use game::{
    config::{GameConfig, Params},
    timer::MonotonicClock,
    Game,
};
use rand::{rngs::StdRng, SeedableRng};
use terminal::{Keyboard, Terminal, TerminalDisplay};
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

mod terminal;

// short enough to keep the loop responsive without spinning a core.
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(1);

/// Four-paddle pong. Arrows move the pads, `a`/`z` speed the ball up or down, `r` starts a new
/// round, escape quits.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Milliseconds between two ball moves
    #[arg(long, default_value_t = Params::PACE.as_millis() as u64)]
    pace: u64,
    /// Fastest pace `a` can reach, in milliseconds
    #[arg(long, default_value_t = Params::MIN_PACE.as_millis() as u64)]
    min_pace: u64,
    /// Slowest pace `z` can reach, in milliseconds
    #[arg(long, default_value_t = Params::MAX_PACE.as_millis() as u64)]
    max_pace: u64,
    /// Seed for the ball's starting directions
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs to this file (filtered through RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        if let Err(err) = init_logging(path) {
            eprintln!("failed to open log file {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    }
    match play(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("game ended with error: {err}");
            eprintln!("error occurred: {err}");
            ExitCode::FAILURE
        }
    }
}

fn play(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = GameConfig {
        pace: Duration::from_millis(cli.pace),
        min_pace: Duration::from_millis(cli.min_pace),
        max_pace: Duration::from_millis(cli.max_pace),
        ..GameConfig::default()
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let _terminal = Terminal::enter()?;
    let display = TerminalDisplay::new(stdout(), config.background)?;
    let mut game = Game::new(config, display, MonotonicClock, rng)?;
    game.run(&mut Keyboard::new(INPUT_POLL_TIMEOUT))?;
    Ok(())
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
