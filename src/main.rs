//! Musou Kokaton entry point
//!
//! Runs the simulation headless: the demo AI (or an idle player) plays at the
//! configured tick rate while frame summaries go to the log.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use musou_kokaton::platform::{Autopilot, Clock, Idle, InputSource, ManualClock, SystemClock};
use musou_kokaton::renderer::HeadlessPresenter;
use musou_kokaton::{Game, Settings};

#[derive(Parser)]
#[command(name = "musou-kokaton")]
#[command(about = "Fixed-tick arcade shoot-em-up, played headless")]
struct Args {
    /// JSON settings file
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Leave the player idle instead of letting the demo AI play
    #[arg(long)]
    no_autopilot: bool,

    /// Run as fast as possible, skipping frame pacing and the game-over pause
    #[arg(long)]
    unthrottled: bool,

    /// Print the final frame as JSON
    #[arg(long)]
    dump_final: bool,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if args.max_ticks.is_some() {
        settings.max_ticks = args.max_ticks;
    }
    settings.autopilot &= !args.no_autopilot;
    settings.unthrottled |= args.unthrottled;

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Musou Kokaton starting (seed {seed})");

    let mut input: Box<dyn InputSource> = if settings.autopilot {
        Box::new(Autopilot)
    } else {
        Box::new(Idle)
    };
    let mut clock: Box<dyn Clock> = if settings.unthrottled {
        Box::new(ManualClock::new())
    } else {
        Box::new(SystemClock::new())
    };
    let mut presenter = HeadlessPresenter::new(settings.report_every_ticks);

    let mut game = Game::new(seed, &settings);
    let exit = game.run(input.as_mut(), &mut presenter, clock.as_mut());
    log::info!(
        "Finished: {:?} after {} ticks with score {}",
        exit.reason,
        exit.ticks,
        exit.score
    );

    if args.dump_final {
        if let Some(frame) = presenter.into_last_frame() {
            match serde_json::to_string_pretty(&frame) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    log::error!("cannot serialize final frame: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}
