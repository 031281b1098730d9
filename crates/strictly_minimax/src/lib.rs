//! Strictly Minimax - pure tic-tac-toe rules and an optimal-move engine.
//!
//! This library decides the game-theoretically optimal move for a 3x3
//! tic-tac-toe position by exhaustive adversarial search.
//!
//! # Architecture
//!
//! - **Board model**: value-typed 3x3 board, players, positions
//! - **Rules**: pure functions for outcome detection, move generation and application
//! - **Search**: minimax over the full game tree with alpha-beta pruning
//! - **Session**: typestate human-vs-engine game loop built on the two above
//!
//! # Example
//!
//! ```
//! use strictly_minimax::{best_move, Board, Player, Position};
//!
//! let board: Board = "XX_OO____".parse()?;
//! let result = best_move(&board, Player::X, Player::O)?;
//! assert_eq!(*result.best_move(), Some(Position::TopRight));
//! assert_eq!(*result.score(), 10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod error;
mod position;
mod rules;
mod search;
mod session;
mod types;

// Crate-level exports - Board model
pub use position::Position;
pub use types::{Board, Player, Square};

/// A move is the cell it fills.
pub type Move = Position;

// Crate-level exports - Rules
pub use rules::{
    Outcome, apply, check_winner, is_full, legal_moves, outcome, side_to_move,
};

// Crate-level exports - Search engine
pub use search::{
    DRAW_SCORE, Engine, LOSS_SCORE, Pruning, SearchReport, SearchResult, SearchStats, WIN_SCORE,
    best_move,
};

// Crate-level exports - Session
pub use session::{EngineTurn, GameFinished, GameSetup, HumanTurn, Rejected, Turn};

// Crate-level exports - Errors
pub use error::{BoardParseError, MoveError, SearchError};
