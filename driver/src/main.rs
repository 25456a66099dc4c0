mod driver_config;
mod input;
mod presenter;

use chrono::Local;
use clap::Parser;
use common::games::SessionRng;
use common::games::snake::{SnakeCommand, SnakeGameState, SnakeSession};
use common::logger::{self, Level};
use common::{log, log_warn};
use tokio::sync::mpsc;

use driver_config::{DEFAULT_CONFIG_FILE_NAME, DriverConfig, get_config_manager};
use presenter::LogPresenter;

#[derive(Parser)]
#[command(name = "snake3d_driver")]
struct Args {
    /// YAML config file; defaults are used when it does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE_NAME)]
    config: String,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Let the bot steer instead of console input.
    #[arg(long)]
    autopilot: bool,
    #[arg(long)]
    use_log_prefix: bool,
    #[arg(long)]
    verbose: bool,
    /// Write the default config to `--config` and exit.
    #[arg(long)]
    write_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake3D".to_string())
    } else {
        None
    };
    let level = if args.verbose { Level::Debug } else { Level::Info };
    logger::init_logger(prefix, level);

    let config_manager = get_config_manager(&args.config);
    if args.write_default_config {
        config_manager.set_config(&DriverConfig::default())?;
        log!("Default config written to {}", args.config);
        return Ok(());
    }

    let config = config_manager.get_config().inspect_err(|e| {
        log_warn!("Failed to load config from {}: {}", args.config, e);
    })?;

    let mut rng = match args.seed.or(config.seed) {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let state = SnakeGameState::new(&config.to_settings(), &mut rng)?;

    let mut options = config.session_options();
    options.autopilot |= args.autopilot;
    if args.max_ticks.is_some() {
        options.max_ticks = args.max_ticks;
    }

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    if !options.autopilot {
        log!("{}", input::HELP);
        input::spawn_console_reader(command_tx.clone());
    }

    let shutdown_tx = command_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log!("Shutdown signal received, stopping session...");
            let _ = shutdown_tx.send(SnakeCommand::Shutdown);
        }
    });
    drop(command_tx);

    let presenter = LogPresenter::new();
    let started_at = Local::now();
    let summary = tokio::spawn(SnakeSession::run(state, rng, options, presenter.clone(), command_rx)).await?;
    let elapsed = Local::now() - started_at;

    log!(
        "Finished ({:?}) in {:.1}s: {} ticks, {} frames, {} games over, best score {}, final length {}",
        summary.stop_reason,
        elapsed.num_milliseconds() as f64 / 1000.0,
        summary.total_ticks,
        presenter.frames(),
        summary.games_finished,
        summary.best_score,
        summary.final_snapshot.length
    );
    if let Some(reason) = summary.last_game_over {
        log!("Last game ended by {:?}", reason);
    }

    Ok(())
}
