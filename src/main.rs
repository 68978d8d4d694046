//! # Dunjy Krawl Main Entry Point
//!
//! Parses the command line, initializes logging, loads the configuration and
//! runs either the macroquad window loop or a headless simulation.

use clap::Parser;
use dunjy_krawl::{
    create_rng, Action, GameConfig, GameState, InputHandler, KrawlResult, MacroquadDisplay,
    ManualClock, SystemClock,
};
use log::{error, info};
use macroquad::window::{next_frame, Conf};
use std::path::PathBuf;
use std::time::Duration;

/// Simulated frame length for headless runs.
const HEADLESS_FRAME: Duration = Duration::from_millis(16);

/// Command line arguments for Dunjy Krawl.
#[derive(Parser, Debug)]
#[command(name = "dunjy-krawl")]
#[command(about = "A tile-based dungeon crawler with melee, ranged combat and level progression")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON game configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace or a module filter)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Run the simulation without a window and print the final snapshot
    #[arg(long)]
    headless: bool,

    /// Number of ticks to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> KrawlResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Dunjy Krawl v{}", dunjy_krawl::VERSION);

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GameConfig::from_json_file(path)?
        }
        None => GameConfig::new(),
    };

    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(::rand::random);
    info!("Using seed {}", seed);

    if args.headless {
        run_headless(config, seed, args.ticks)
    } else {
        run_windowed(config, seed)
    }
}

/// Initializes logging based on the filter string.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new().parse_filters(log_level).init();
    }
}

/// Runs `ticks` frames on a manual clock and prints the final snapshot.
fn run_headless(config: GameConfig, seed: u64, ticks: u64) -> KrawlResult<()> {
    #[cfg(feature = "dev-tools")]
    let _span = tracing::info_span!("headless", seed, ticks).entered();

    let mut game = GameState::new(config, create_rng(seed), ManualClock::new())?;
    game.input_mut().push_action(Action::Begin);

    for _ in 0..ticks {
        game.clock().advance(HEADLESS_FRAME);
        game.advance()?;
    }

    let stats = game.statistics();
    info!(
        "Headless run finished after {} ticks: level {}, difficulty {}, {} kills, {} deaths",
        game.tick_count(),
        game.level(),
        game.difficulty(),
        stats.total_kills(),
        stats.deaths
    );

    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    Ok(())
}

/// Opens the macroquad window and runs the frame loop until Escape.
fn run_windowed(config: GameConfig, seed: u64) -> KrawlResult<()> {
    let tile_size = dunjy_krawl::config::TILE_SIZE;
    let (window_width, window_height) = MacroquadDisplay::window_size(
        tile_size,
        config.generation.columns,
        config.generation.rows,
    );
    let game = GameState::new(config, create_rng(seed), SystemClock)?;

    let window = Conf {
        window_title: "Dunjy Krawl".to_owned(),
        window_width,
        window_height,
        window_resizable: false,
        ..Default::default()
    };

    macroquad::Window::from_config(window, game_loop(game, tile_size as f32));
    Ok(())
}

async fn game_loop(mut game: GameState, tile_size: f32) {
    let handler = InputHandler::new(tile_size);
    let mut display = MacroquadDisplay::new(tile_size);

    loop {
        if handler.quit_requested() {
            info!("Quit requested");
            break;
        }

        handler.poll(game.input_mut());

        match game.advance() {
            Ok(events) => {
                for message in events.iter().filter_map(|event| event.message()) {
                    display.add_message(message);
                }
            }
            Err(e) => error!("Tick failed: {}", e),
        }

        display.render(&game.snapshot());
        next_frame().await;
    }

    let stats = game.statistics();
    info!(
        "Session ended: {} runs, {} levels cleared, {} kills",
        stats.runs_started,
        stats.levels_cleared,
        stats.total_kills()
    );
}
