//! Command-line interface for strictly_minimax.

use clap::{Parser, Subcommand};
use strictly_minimax::{Board, Player};

/// Strictly Minimax - perfect-play tic-tac-toe engine
#[derive(Parser, Debug)]
#[command(name = "strictly_minimax")]
#[command(about = "Optimal tic-tac-toe moves by exhaustive minimax search", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Search every node instead of pruning with alpha-beta bounds
    #[arg(long, global = true)]
    pub no_pruning: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the engine in the terminal
    Play {
        /// Mark for the human player (x moves first)
        #[arg(long)]
        human: Option<Player>,
    },

    /// Print the optimal move for a position
    BestMove {
        /// Board as nine squares, e.g. "XX_OO____"
        #[arg(short, long)]
        board: Board,

        /// Side to move (inferred from mark counts if omitted)
        #[arg(short, long)]
        mover: Option<Player>,

        /// Emit the search report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Let the engine play both sides from an empty board
    SelfPlay,

    /// Compare pruned and unpruned searches on a position
    Compare {
        /// Board as nine squares, e.g. "X___O____"
        #[arg(short, long)]
        board: Board,

        /// Side to move (inferred from mark counts if omitted)
        #[arg(short, long)]
        mover: Option<Player>,
    },
}
