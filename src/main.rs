use anyhow::Result;
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::logging::{self, LogLevel};
use grid_snake::modes::PlayMode;
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Classic snake on a 20x20 grid")]
struct Cli {
    /// Seed for food placement, for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// File receiving log output
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_file, cli.log_level)?;

    let config = GameConfig::default();
    info!(
        "starting {}x{} game, tick {}ms, seed {:?}",
        config.grid_size, config.grid_size, config.tick_interval_ms, cli.seed
    );

    let mut play_mode = PlayMode::new(config, cli.seed);
    play_mode.run().await
}
