use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{THEME_DARK, load_config};
use grid_snake::error::AppError;
use grid_snake::game_loop::GameLoop;
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::logging;
use grid_snake::renderer;
use grid_snake::terminal_runtime::{TerminalSession, restore_terminal};
use tracing::{error, info};

const FRAME_POLL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured grid size.
    #[arg(long = "grid-size")]
    grid_size: Option<u16>,

    /// Seed food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here instead of the platform data directory.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = logging::init(cli.log_file.as_deref());

    install_panic_hook();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "grid-snake exited with an error");
            eprintln!("grid-snake: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }

    // Validate before touching the terminal so errors print cleanly.
    let mut game = match cli.seed {
        Some(seed) => GameLoop::from_config_with_seed(&config, seed)?,
        None => GameLoop::from_config(&config)?,
    };

    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    game.start(Instant::now());

    loop {
        session.terminal_mut().draw(|frame| {
            renderer::render(
                frame,
                game.snapshot(),
                game.grid(),
                game.palette(),
                &THEME_DARK,
            );
        })?;

        match input.poll_input(FRAME_POLL)? {
            Some(GameInput::Quit) => break,
            Some(GameInput::Direction(direction)) => game.set_direction(direction),
            Some(GameInput::Reset) => game.reset(),
            None => {}
        }

        game.poll(Instant::now());
    }

    let final_state = game.shutdown();
    info!(score = final_state.score, "player quit");
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
