//! Phase-specific typestate structs for a human-vs-engine game.
//!
//! Each phase is its own type. Only `HumanTurn` accepts a human move, only
//! `EngineTurn` runs a search, and a `GameFinished` ALWAYS carries a
//! terminal outcome.

use crate::error::{MoveError, SearchError};
use crate::position::Position;
use crate::rules::{self, Outcome};
use crate::search::{Engine, SearchResult};
use crate::types::{Board, Player};
use derive_getters::Getters;
use tracing::{debug, info, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase - ready to start.
#[derive(Debug, Clone, Default)]
pub struct GameSetup {
    engine: Engine,
}

impl GameSetup {
    /// Creates a new game that will be played by `engine`.
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Starts the game with the human playing `human`.
    ///
    /// X always moves first, so a human playing O waits for the engine.
    #[instrument(skip(self))]
    pub fn start(self, human: Player) -> Turn {
        info!(human = %human, engine = %human.opponent(), "Starting game");
        let state = Shared {
            board: Board::new(),
            human,
            engine: self.engine,
            history: Vec::new(),
        };
        match human {
            Player::X => Turn::Human(HumanTurn { state }),
            Player::O => Turn::Engine(EngineTurn { state }),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Shared state carried through the playing phases
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Shared {
    board: Board,
    human: Player,
    engine: Engine,
    history: Vec<Position>,
}

impl Shared {
    /// Records a move already applied to `board` and picks the next phase.
    fn advance(mut self, board: Board, position: Position, player: Player) -> Turn {
        self.board = board;
        self.history.push(position);

        let outcome = rules::outcome(&self.board);
        debug!(position = %position, player = %player, ?outcome, "Move applied");

        match outcome {
            Outcome::Ongoing if player == self.human => Turn::Engine(EngineTurn { state: self }),
            Outcome::Ongoing => Turn::Human(HumanTurn { state: self }),
            terminal => {
                info!(outcome = %terminal, "Game finished");
                Turn::Finished(GameFinished {
                    board: self.board,
                    history: self.history,
                    outcome: terminal,
                    human: self.human,
                    engine: self.engine,
                })
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Human Phase
// ─────────────────────────────────────────────────────────────

/// Waiting for the human to move.
#[derive(Debug, Clone)]
pub struct HumanTurn {
    state: Shared,
}

/// A human move that was refused, with the unchanged turn handed back.
#[derive(Debug, Clone, Getters)]
pub struct Rejected {
    /// The turn, still waiting for a legal move.
    turn: HumanTurn,
    /// Why the move was refused.
    error: MoveError,
}

impl Rejected {
    /// Recovers the turn so the human can try again.
    pub fn into_turn(self) -> HumanTurn {
        self.turn
    }
}

impl HumanTurn {
    /// Plays the human's mark at `position`.
    ///
    /// # Errors
    ///
    /// An occupied square returns `Rejected`, which hands this turn back.
    #[instrument(skip(self), fields(human = %self.state.human))]
    pub fn play(self, position: Position) -> Result<Turn, Rejected> {
        let human = self.state.human;
        match rules::apply(&self.state.board, position, human) {
            Ok(board) => Ok(self.state.advance(board, position, human)),
            Err(error) => Err(Rejected { turn: self, error }),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// Returns the human's mark.
    pub fn human(&self) -> Player {
        self.state.human
    }

    /// Returns valid positions.
    pub fn valid_moves(&self) -> Vec<Position> {
        rules::legal_moves(&self.state.board)
    }

    /// Returns positions played so far.
    pub fn history(&self) -> &[Position] {
        &self.state.history
    }
}

// ─────────────────────────────────────────────────────────────
//  Engine Phase
// ─────────────────────────────────────────────────────────────

/// Waiting for the engine to move.
#[derive(Debug, Clone)]
pub struct EngineTurn {
    state: Shared,
}

impl EngineTurn {
    /// Searches for the engine's move and plays it.
    ///
    /// Returns the next phase along with the search result that chose the move.
    #[instrument(skip(self), fields(engine = %self.state.human.opponent()))]
    pub fn respond(self) -> Result<(Turn, SearchResult), SearchError> {
        let mover = self.state.human.opponent();
        let result = self
            .state
            .engine
            .best_move(&self.state.board, mover, self.state.human)?;
        let position = (*result.best_move()).ok_or(SearchError::NoMovesAvailable)?;
        let board = rules::apply(&self.state.board, position, mover)?;
        let turn = self.state.advance(board, position, mover);
        Ok((turn, result))
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// Returns positions played so far.
    pub fn history(&self) -> &[Position] {
        &self.state.history
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished - outcome determined.
///
/// The outcome is always `Won` or `Draw`, never `Ongoing`.
#[derive(Debug, Clone)]
pub struct GameFinished {
    board: Board,
    history: Vec<Position>,
    outcome: Outcome,
    human: Player,
    engine: Engine,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns positions played, in order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Starts a fresh game with the same sides and engine.
    #[instrument(skip(self))]
    pub fn restart(self) -> Turn {
        GameSetup::new(self.engine).start(self.human)
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// The phase a game is in.
#[derive(Debug, Clone)]
pub enum Turn {
    /// Human to move.
    Human(HumanTurn),
    /// Engine to move.
    Engine(EngineTurn),
    /// Game over.
    Finished(GameFinished),
}

impl Turn {
    /// Returns the board.
    pub fn board(&self) -> &Board {
        match self {
            Turn::Human(turn) => turn.board(),
            Turn::Engine(turn) => turn.board(),
            Turn::Finished(game) => game.board(),
        }
    }

    /// Status line for the player.
    pub fn status(&self) -> String {
        match self {
            Turn::Human(turn) => format!("Your turn ({})", turn.human()),
            Turn::Engine(turn) => format!("Engine thinking ({})", turn.state.human.opponent()),
            Turn::Finished(game) => game.outcome.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_engine(turn: Turn) -> EngineTurn {
        match turn {
            Turn::Engine(turn) => turn,
            other => panic!("expected engine turn, got {:?}", other),
        }
    }

    fn expect_human(turn: Turn) -> HumanTurn {
        match turn {
            Turn::Human(turn) => turn,
            other => panic!("expected human turn, got {:?}", other),
        }
    }

    #[test]
    fn test_human_x_moves_first() {
        let turn = GameSetup::default().start(Player::X);
        assert_eq!(turn.status(), "Your turn (X)");
        assert_eq!(*turn.board(), Board::new());
    }

    #[test]
    fn test_engine_moves_first_when_human_is_o() {
        let engine = expect_engine(GameSetup::default().start(Player::O));
        let (turn, result) = engine.respond().unwrap();
        let human = expect_human(turn);
        assert_eq!(*result.best_move(), Some(Position::TopLeft));
        assert_eq!(human.history(), &[Position::TopLeft]);
        assert_eq!(human.human(), Player::O);
    }

    #[test]
    fn test_occupied_square_hands_turn_back() {
        let human = expect_human(GameSetup::default().start(Player::X));
        let engine = expect_engine(human.play(Position::Center).unwrap());
        let (turn, _) = engine.respond().unwrap();
        let human = expect_human(turn);

        let rejected = human.play(Position::Center).unwrap_err();
        assert_eq!(*rejected.error(), MoveError::IllegalMove(Position::Center));
        let human = rejected.into_turn();
        assert_eq!(human.board().occupied_count(), 2);
        assert_eq!(human.valid_moves().len(), 7);
    }

    #[test]
    fn test_game_runs_to_end_and_restart_resets() {
        // Human always takes the lowest free square.
        let mut turn = GameSetup::default().start(Player::X);
        let finished = loop {
            turn = match turn {
                Turn::Human(human) => {
                    let position = human.valid_moves()[0];
                    human.play(position).unwrap()
                }
                Turn::Engine(engine) => engine.respond().unwrap().0,
                Turn::Finished(game) => break game,
            };
        };

        assert!(finished.outcome().is_terminal());
        assert_ne!(finished.outcome(), Outcome::Won(Player::X));
        assert_eq!(finished.history().len(), finished.board().occupied_count());

        let restarted = finished.restart();
        assert_eq!(*restarted.board(), Board::new());
        assert_eq!(restarted.status(), "Your turn (X)");
    }
}
