use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tic_tac_toe::config::CliConfig;
use tic_tac_toe::core::{MAX_SIZE, MIN_SIZE};
use tic_tac_toe::{Config, GameInterface, APP_NAME, VERSION};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(about = "Tic-Tac-Toe on an N x N board")]
#[command(version = VERSION)]
struct Cli {
    /// Board side length; prompts when omitted
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(MIN_SIZE as i64..=MAX_SIZE as i64))]
    size: Option<u8>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Color theme (default, dark, light)
    #[arg(short, long)]
    theme: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Write each round's event log to this file as JSON
    #[arg(long, value_name = "PATH")]
    export_events: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.merge_with_cli(CliConfig {
        board_size: cli.size.map(usize::from),
        log_level: cli.log_level,
        debug: cli.debug,
        theme: cli.theme,
        export_events: cli.export_events,
    });
    config.validate()?;

    // Logs go to stderr so they never interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(format!("tic_tac_toe={},warn", config.logging.level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting {} v{}", APP_NAME, VERSION);

    let mut game_interface = GameInterface::new(config)?;

    if let Err(e) = game_interface.run() {
        error!("Game error: {}", e);
        eprintln!("An error occurred: {}", e);
        std::process::exit(1);
    }

    info!("Game session ended");
    Ok(())
}
