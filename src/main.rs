/// Entry point: command line, logging, config, then the session controller.

mod config;
mod controller;
mod domain;
mod error;
mod sim;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use config::GameConfig;
use controller::Controller;
use sim::random::GameRng;
use ui::input::LineInput;
use ui::renderer::TerminalRenderer;

#[derive(Parser, Debug)]
#[command(name = "treasure-hunt")]
#[command(about = "Navigate a random grid to the goal, collecting items and dodging bombs")]
#[command(version)]
struct Args {
    /// Fixed seed for board generation (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Grid size for the first game, skipping the size prompt
    #[arg(long)]
    size: Option<usize>,

    /// Config file to use instead of searching for config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match GameConfig::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let seed = args.seed.or(config.seed);
    if let Some(s) = seed {
        info!("board seed {s}");
    }
    let mut rng = GameRng::new(seed);

    let mut renderer = TerminalRenderer::stdout();
    if let Err(e) = renderer.set_title(&config.title) {
        eprintln!("Terminal init failed: {e}");
        return ExitCode::FAILURE;
    }

    let mut input = LineInput::stdin();
    let result = Controller::new(&mut renderer, &mut input, &mut rng, &config)
        .with_preset_size(args.size)
        .run();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Game error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
