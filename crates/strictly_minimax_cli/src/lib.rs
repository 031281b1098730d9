//! Terminal front end for the strictly_minimax engine.
//!
//! Split from the binary so argument parsing, configuration and the
//! command bodies can be exercised from integration tests.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod commands;
mod config;

pub use cli::{Cli, Command};
pub use commands::{best_move, compare, parse_square, play, self_play};
pub use config::{ConfigError, EngineConfig, DEFAULT_CONFIG_FILE};
