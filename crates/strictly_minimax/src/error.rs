//! Error types for board parsing, move application and search.

use crate::position::Position;
use crate::types::Player;
use derive_more::{Display, Error, From};

/// Error raised when a move cannot be applied to a board.
///
/// The search only ever applies moves drawn from [`crate::legal_moves`], so
/// seeing this from [`crate::Engine`] means an internal invariant broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The target square is already occupied.
    #[display("Illegal move: {} is already occupied", _0)]
    IllegalMove(#[error(not(source))] Position),
}

/// Error raised by the search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum SearchError {
    /// The board has no empty squares left.
    #[display("No moves available: the board is full")]
    NoMovesAvailable,

    /// Mover and opponent are the same player.
    #[display("Mover and opponent must differ, both are {:?}", _0)]
    SameSide(#[error(not(source))] Player),

    /// A generated move could not be applied.
    #[display("Search invariant violated: {}", _0)]
    #[from]
    IllegalMove(#[error(source)] MoveError),
}

/// Error raised when parsing a board from its compact text form.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// The text does not describe exactly nine squares.
    #[display("Board must have 9 squares, found {}", _0)]
    WrongLength(#[error(not(source))] usize),

    /// A character is neither a mark nor an empty marker.
    #[display("Unexpected character {:?} at square {}", _0, _1)]
    InvalidSquare(char, usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_move_error_converts_into_search_error() {
        let err: SearchError = MoveError::IllegalMove(Position::Center).into();
        assert_eq!(err, SearchError::IllegalMove(MoveError::IllegalMove(Position::Center)));
        assert_eq!(
            err.source().map(|source| source.to_string()),
            Some("Illegal move: Center is already occupied".to_string())
        );
    }

    #[test]
    fn test_leaf_errors_have_no_source() {
        assert!(SearchError::NoMovesAvailable.source().is_none());
        assert!(SearchError::SameSide(Player::X).source().is_none());
        assert!(MoveError::IllegalMove(Position::TopLeft).source().is_none());
        assert!(BoardParseError::WrongLength(3).source().is_none());
        assert!(BoardParseError::InvalidSquare('Z', 2).source().is_none());
    }
}
