//! Strictly Minimax - Unified CLI
//!
//! Perfect-play tic-tac-toe in the terminal.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use strictly_minimax_cli::{Cli, Command, EngineConfig, best_move, compare, play, self_play};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let human = match &cli.command {
        Command::Play { human } => *human,
        _ => None,
    };
    let config = EngineConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(cli.no_pruning, human);

    init_tracing(config.log_filter());
    debug!(?config, "Configuration resolved");

    let engine = config.engine();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Play { .. } => {
            info!(human = %config.human(), "Starting interactive game");
            let stdin = std::io::stdin();
            play(&mut stdin.lock(), &mut out, &engine, *config.human())
        }
        Command::BestMove { board, mover, json } => {
            best_move(&mut out, &engine, &board, mover, json).map(|_| ())
        }
        Command::SelfPlay => self_play(&mut out, &engine).map(|_| ()),
        Command::Compare { board, mover } => compare(&mut out, &board, mover),
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` wins over the config filter.
fn init_tracing(fallback: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}
