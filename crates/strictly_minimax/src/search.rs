//! Minimax search with alpha-beta pruning.
//!
//! The engine walks the full game tree from the given board. Terminal boards
//! score [`WIN_SCORE`], [`DRAW_SCORE`] or [`LOSS_SCORE`] from the point of view
//! of the side the search optimizes for (the maximizer). Scores are not
//! adjusted for depth, so the engine does not prefer a quick win over a slow
//! one, nor a late loss over an early one. Every forced win still scores
//! [`WIN_SCORE`], so play stays optimal.
//!
//! Children are visited in ascending position order and a child only replaces
//! the current best on a strict improvement, so ties go to the lowest index.

use crate::error::SearchError;
use crate::position::Position;
use crate::rules::{self, Outcome};
use crate::types::{Board, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a board the maximizer has won.
pub const WIN_SCORE: i32 = 10;
/// Score of a drawn board.
pub const DRAW_SCORE: i32 = 0;
/// Score of a board the minimizer has won.
pub const LOSS_SCORE: i32 = -10;

/// Whether the search skips subtrees that cannot change the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Pruning {
    /// Stop scanning siblings once `alpha >= beta`.
    #[default]
    Enabled,
    /// Plain minimax over every node.
    Disabled,
}

/// Chosen move and its minimax score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct SearchResult {
    /// Move to play; `None` when the board was already decided.
    best_move: Option<Position>,
    /// Score from the maximizer's point of view.
    score: i32,
}

impl SearchResult {
    fn terminal(score: i32) -> Self {
        Self {
            best_move: None,
            score,
        }
    }
}

/// Node counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SearchStats {
    /// Boards visited, root included.
    nodes: u64,
    /// Boards scored because the game was over on them.
    terminal_evaluations: u64,
    /// Times the remaining siblings were skipped.
    cutoffs: u64,
}

/// Result of a search together with its node counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SearchReport {
    /// The chosen move and score.
    result: SearchResult,
    /// How much of the tree was visited.
    stats: SearchStats,
}

/// Stateless minimax engine.
///
/// Nothing carries over between calls, so one engine can serve any number of
/// boards, including from several threads at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct Engine {
    /// Pruning policy for every search this engine runs.
    pruning: Pruning,
}

impl Engine {
    /// Creates an engine with the given pruning policy.
    pub fn new(pruning: Pruning) -> Self {
        Self { pruning }
    }

    /// Returns the optimal move for `mover` against an optimal `opponent`.
    ///
    /// # Errors
    ///
    /// - `SearchError::NoMovesAvailable` if the board is full.
    /// - `SearchError::SameSide` if `mover == opponent`.
    pub fn best_move(
        &self,
        board: &Board,
        mover: Player,
        opponent: Player,
    ) -> Result<SearchResult, SearchError> {
        self.analyze(board, mover, opponent)
            .map(|report| report.result)
    }

    /// Like [`Engine::best_move`], also returning node counters.
    #[instrument(skip(self, board), fields(board = %board, pruning = ?self.pruning))]
    pub fn analyze(
        &self,
        board: &Board,
        mover: Player,
        opponent: Player,
    ) -> Result<SearchReport, SearchError> {
        if mover == opponent {
            return Err(SearchError::SameSide(mover));
        }
        if board.is_full() {
            return Err(SearchError::NoMovesAvailable);
        }

        let mut search = Search {
            maximizer: mover,
            minimizer: opponent,
            pruning: self.pruning,
            stats: SearchStats::default(),
        };
        let result = search.evaluate(*board, mover, i32::MIN, i32::MAX)?;

        debug!(
            best_move = ?result.best_move,
            score = result.score,
            nodes = search.stats.nodes,
            terminal_evaluations = search.stats.terminal_evaluations,
            cutoffs = search.stats.cutoffs,
            "Search complete"
        );

        Ok(SearchReport {
            result,
            stats: search.stats,
        })
    }
}

/// Returns the optimal move for `mover` using a pruning engine.
///
/// See [`Engine::best_move`].
pub fn best_move(
    board: &Board,
    mover: Player,
    opponent: Player,
) -> Result<SearchResult, SearchError> {
    Engine::default().best_move(board, mover, opponent)
}

/// Per-call search state; roles stay fixed for the whole tree.
struct Search {
    maximizer: Player,
    minimizer: Player,
    pruning: Pruning,
    stats: SearchStats,
}

impl Search {
    fn evaluate(
        &mut self,
        board: Board,
        to_move: Player,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<SearchResult, SearchError> {
        self.stats.nodes += 1;

        match rules::outcome(&board) {
            Outcome::Won(winner) => {
                self.stats.terminal_evaluations += 1;
                let score = if winner == self.maximizer {
                    WIN_SCORE
                } else {
                    LOSS_SCORE
                };
                return Ok(SearchResult::terminal(score));
            }
            Outcome::Draw => {
                self.stats.terminal_evaluations += 1;
                return Ok(SearchResult::terminal(DRAW_SCORE));
            }
            Outcome::Ongoing => {}
        }

        let maximizing = to_move == self.maximizer;
        let next = if maximizing {
            self.minimizer
        } else {
            self.maximizer
        };

        let mut best: Option<(Position, i32)> = None;
        for position in rules::legal_moves(&board) {
            let child = rules::apply(&board, position, to_move)?;
            let score = self.evaluate(child, next, alpha, beta)?.score;

            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((position, score));
            }

            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if self.pruning == Pruning::Enabled && alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        // Ongoing boards always have an empty square
        let (position, score) = best.ok_or(SearchError::NoMovesAvailable)?;
        Ok(SearchResult {
            best_move: Some(position),
            score,
        })
    }
}
