//! Command bodies, written against generic readers and writers.

use anyhow::{Context, Result, ensure};
use serde::Serialize;
use std::io::{BufRead, Write};
use strictly_minimax::{
    Board, DRAW_SCORE, Engine, GameSetup, LOSS_SCORE, Outcome, Player, Position, Pruning,
    SearchReport, Turn, WIN_SCORE, apply, outcome, side_to_move,
};
use tracing::{debug, info, instrument, warn};

/// JSON shape of `best-move --json`.
#[derive(Debug, Serialize)]
struct BestMoveOutput {
    board: String,
    mover: Player,
    report: SearchReport,
}

fn describe_score(score: i32) -> &'static str {
    match score {
        WIN_SCORE => "win",
        DRAW_SCORE => "draw",
        LOSS_SCORE => "loss",
        _ => "unknown",
    }
}

/// Picks the explicit mover or infers it from mark counts.
fn resolve_mover(board: &Board, mover: Option<Player>) -> Player {
    if !board.counts_consistent() {
        warn!(board = %board, "Mark counts do not follow X-first alternation");
    }
    mover.unwrap_or_else(|| side_to_move(board))
}

/// Parses a square typed by a human: 1-9 as shown on the board, or a label.
pub fn parse_square(input: &str) -> Option<Position> {
    let trimmed = input.trim();
    if let Ok(num) = trimmed.parse::<usize>() {
        return num.checked_sub(1).and_then(Position::from_index);
    }
    Position::from_label_or_number(trimmed)
}

/// Prints the optimal move for `board`.
#[instrument(skip(out, engine), fields(board = %board))]
pub fn best_move(
    out: &mut impl Write,
    engine: &Engine,
    board: &Board,
    mover: Option<Player>,
    json: bool,
) -> Result<SearchReport> {
    let mover = resolve_mover(board, mover);
    let report = engine
        .analyze(board, mover, mover.opponent())
        .with_context(|| format!("Cannot search board {}", board))?;

    if json {
        let output = BestMoveOutput {
            board: board.to_string(),
            mover,
            report,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(report);
    }

    let result = report.result();
    writeln!(out, "{}", board.display())?;
    writeln!(out)?;
    writeln!(out, "Mover: {}", mover)?;
    match result.best_move() {
        Some(position) => writeln!(
            out,
            "Best move: {} (square {})",
            position,
            position.to_index() + 1
        )?,
        None => writeln!(out, "No move: game already decided ({})", outcome(board))?,
    }
    writeln!(
        out,
        "Score: {} ({})",
        result.score(),
        describe_score(*result.score())
    )?;
    let stats = report.stats();
    writeln!(
        out,
        "Nodes: {}, terminal: {}, cutoffs: {}",
        stats.nodes(),
        stats.terminal_evaluations(),
        stats.cutoffs()
    )?;
    Ok(report)
}

/// Runs the search with and without pruning and prints both counters.
///
/// Fails if the two searches disagree on move or score.
#[instrument(skip(out), fields(board = %board))]
pub fn compare(out: &mut impl Write, board: &Board, mover: Option<Player>) -> Result<()> {
    let mover = resolve_mover(board, mover);
    let pruned = Engine::new(Pruning::Enabled)
        .analyze(board, mover, mover.opponent())
        .with_context(|| format!("Cannot search board {}", board))?;
    let full = Engine::new(Pruning::Disabled)
        .analyze(board, mover, mover.opponent())
        .with_context(|| format!("Cannot search board {}", board))?;

    writeln!(out, "{}", board.display())?;
    writeln!(out)?;
    writeln!(out, "{:<10} {:>10} {:>10} {:>8}", "search", "nodes", "terminal", "cutoffs")?;
    for (name, report) in [("pruned", &pruned), ("full", &full)] {
        let stats = report.stats();
        writeln!(
            out,
            "{:<10} {:>10} {:>10} {:>8}",
            name,
            stats.nodes(),
            stats.terminal_evaluations(),
            stats.cutoffs()
        )?;
    }

    ensure!(
        pruned.result() == full.result(),
        "Pruned search chose {:?}, full search chose {:?}",
        pruned.result(),
        full.result()
    );
    let best = match pruned.result().best_move() {
        Some(position) => position.to_string(),
        None => "none".to_string(),
    };
    writeln!(out, "Both searches: {} with score {}", best, pruned.result().score())?;
    Ok(())
}

/// Plays the engine against itself from an empty board.
///
/// Returns the final outcome.
#[instrument(skip(out, engine))]
pub fn self_play(out: &mut impl Write, engine: &Engine) -> Result<Outcome> {
    let mut board = Board::new();
    let mut mover = Player::X;

    while !outcome(&board).is_terminal() {
        let result = engine.best_move(&board, mover, mover.opponent())?;
        let position = (*result.best_move()).context("Engine returned no move on an open board")?;
        board = apply(&board, position, mover)?;
        debug!(player = %mover, position = %position, score = result.score(), "Self-play move");
        writeln!(out, "{} plays {} (score {})", mover, position, result.score())?;
        writeln!(out, "{}", board.display())?;
        writeln!(out)?;
        mover = mover.opponent();
    }

    let result = outcome(&board);
    info!(outcome = %result, "Self-play finished");
    writeln!(out, "{}", result)?;
    Ok(result)
}

/// Interactive human-vs-engine game.
///
/// Squares are entered as 1-9 (the numbers shown on empty squares) or by
/// label. `q` quits. After a game ends the player may start another one.
/// End of input ends the session.
#[instrument(skip(input, out, engine))]
pub fn play(
    input: &mut impl BufRead,
    out: &mut impl Write,
    engine: &Engine,
    human: Player,
) -> Result<()> {
    let mut turn = GameSetup::new(*engine).start(human);
    let mut line = String::new();

    loop {
        turn = match turn {
            Turn::Engine(engine_turn) => {
                let (next, result) = engine_turn.respond()?;
                if let Some(position) = result.best_move() {
                    writeln!(out, "Engine plays {}", position)?;
                }
                next
            }
            Turn::Human(human_turn) => {
                writeln!(out, "{}", human_turn.board().display())?;
                writeln!(out, "Your turn ({})", human_turn.human())?;
                write!(out, "> ")?;
                out.flush()?;

                line.clear();
                if input.read_line(&mut line)? == 0 {
                    writeln!(out)?;
                    return Ok(());
                }
                let entry = line.trim();
                if entry.eq_ignore_ascii_case("q") || entry.eq_ignore_ascii_case("quit") {
                    return Ok(());
                }

                match parse_square(entry) {
                    None => {
                        writeln!(out, "Unknown square {:?}, enter 1-9", entry)?;
                        Turn::Human(human_turn)
                    }
                    Some(position) => match human_turn.play(position) {
                        Ok(next) => next,
                        Err(rejected) => {
                            writeln!(out, "{}", rejected.error())?;
                            Turn::Human(rejected.into_turn())
                        }
                    },
                }
            }
            Turn::Finished(finished) => {
                writeln!(out, "{}", finished.board().display())?;
                writeln!(out, "{}", finished.outcome())?;
                write!(out, "Play again? [y/N] ")?;
                out.flush()?;

                line.clear();
                if input.read_line(&mut line)? == 0 {
                    writeln!(out)?;
                    return Ok(());
                }
                if !line.trim().eq_ignore_ascii_case("y") {
                    return Ok(());
                }
                finished.restart()
            }
        };
    }
}
