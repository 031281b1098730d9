//! Move generation and application.

use crate::error::MoveError;
use crate::position::Position;
use crate::types::{Board, Player, Square};

/// Returns every empty position in ascending index order.
///
/// The order is part of the contract: search tie-breaking depends on it.
pub fn legal_moves(board: &Board) -> Vec<Position> {
    Position::valid_moves(board)
}

/// Returns a copy of `board` with `player`'s mark at `position`.
///
/// The input board is left untouched.
///
/// # Errors
///
/// Returns `MoveError::IllegalMove` if the square is already occupied.
pub fn apply(board: &Board, position: Position, player: Player) -> Result<Board, MoveError> {
    if !board.is_empty(position) {
        return Err(MoveError::IllegalMove(position));
    }
    let mut next = *board;
    next.set(position, Square::Occupied(player));
    Ok(next)
}

/// Player whose turn it is under X-first alternation.
pub fn side_to_move(board: &Board) -> Player {
    if board.count(Player::X) > board.count(Player::O) {
        Player::O
    } else {
        Player::X
    }
}
