//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the search can call them on throwaway board copies.

pub mod draw;
pub mod moves;
pub mod win;

pub use draw::is_full;
pub use moves::{apply, legal_moves, side_to_move};
pub use win::check_winner;

use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};

/// Result of evaluating a board.
///
/// Derived from the board alone; never stored alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A player completed a line.
    Won(Player),
    /// Board is full with no completed line.
    Draw,
    /// Moves remain and nobody has won.
    Ongoing,
}

impl Outcome {
    /// Returns true unless the game is still going.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Won(player) => Some(*player),
            Outcome::Draw | Outcome::Ongoing => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Won(player) => write!(f, "{} wins!", player),
            Outcome::Draw => write!(f, "Draw!"),
            Outcome::Ongoing => write!(f, "In progress"),
        }
    }
}

/// Evaluates the board.
///
/// A completed line wins (see [`check_winner`] for scan order), otherwise a
/// full board is a draw, otherwise the game is ongoing.
pub fn outcome(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        Outcome::Won(winner)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}
