//! Tests for the command bodies and argument parsing.

use clap::Parser;
use std::io::Cursor;

use strictly_minimax::{Board, Engine, Outcome, Player, Position};
use strictly_minimax_cli::{Cli, Command, best_move, compare, play, self_play};

fn board(s: &str) -> Board {
    s.parse().expect("Board should parse")
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).expect("Output should be UTF-8")
}

#[test]
fn test_best_move_text_output() {
    let mut out = Vec::new();
    let report = best_move(&mut out, &Engine::default(), &board("XX_OO____"), None, false)
        .expect("Search failed");
    let text = output(out);

    assert_eq!(*report.result().best_move(), Some(Position::TopRight));
    assert!(text.contains("Mover: X"));
    assert!(text.contains("Best move: Top-right (square 3)"));
    assert!(text.contains("Score: 10 (win)"));
}

#[test]
fn test_best_move_json_output() {
    let mut out = Vec::new();
    best_move(
        &mut out,
        &Engine::default(),
        &board("X__OO___X"),
        Some(Player::X),
        true,
    )
    .expect("Search failed");

    let value: serde_json::Value = serde_json::from_slice(&out).expect("Output should be JSON");
    assert_eq!(value["board"], "X__OO___X");
    assert_eq!(value["mover"], "X");
    assert_eq!(value["report"]["result"]["best_move"], "MiddleRight");
    assert_eq!(value["report"]["result"]["score"], 0);
    assert!(value["report"]["stats"]["nodes"].as_u64().unwrap() > 0);
}

#[test]
fn test_best_move_full_board_fails() {
    let mut out = Vec::new();
    let err = best_move(&mut out, &Engine::default(), &board("XOXOXXOXO"), None, false)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("No moves available"));
}

#[test]
fn test_best_move_on_decided_board() {
    let mut out = Vec::new();
    best_move(&mut out, &Engine::default(), &board("XXXOO____"), None, false)
        .expect("Search failed");
    let text = output(out);
    assert!(text.contains("No move: game already decided (X wins!)"));
    assert!(text.contains("Score: -10 (loss)"));
}

#[test]
fn test_compare_reports_both_searches() {
    let mut out = Vec::new();
    compare(&mut out, &board("X___O____"), None).expect("Compare failed");
    let text = output(out);
    assert!(text.contains("pruned"));
    assert!(text.contains("full"));
    assert!(text.contains("Both searches:"));
}

#[test]
fn test_self_play_draws() {
    let mut out = Vec::new();
    let result = self_play(&mut out, &Engine::default()).expect("Self-play failed");
    assert_eq!(result, Outcome::Draw);
    let text = output(out);
    assert!(text.starts_with("X plays Top-left (score 0)"));
    assert!(text.trim_end().ends_with("Draw!"));
}

#[test]
fn test_play_rejects_occupied_square_and_finishes() {
    let script = "5\n5\nbogus\n1\n2\n3\n4\n6\n7\n8\n9\nn\n";
    let mut input = Cursor::new(script.as_bytes());
    let mut out = Vec::new();
    play(&mut input, &mut out, &Engine::default(), Player::X).expect("Play failed");
    let text = output(out);

    assert!(text.contains("Your turn (X)"));
    assert!(text.contains("Center is already occupied"));
    assert!(text.contains("Unknown square \"bogus\""));
    assert!(text.contains("Play again?"));
    assert!(!text.contains("X wins!"));
}

#[test]
fn test_play_as_o_engine_opens() {
    let mut input = Cursor::new("q\n".as_bytes());
    let mut out = Vec::new();
    play(&mut input, &mut out, &Engine::default(), Player::O).expect("Play failed");
    let text = output(out);
    assert!(text.starts_with("Engine plays Top-left"));
    assert!(text.contains("Your turn (O)"));
}

#[test]
fn test_play_stops_at_end_of_input() {
    let mut input = Cursor::new("".as_bytes());
    let mut out = Vec::new();
    play(&mut input, &mut out, &Engine::default(), Player::X).expect("Play failed");
    assert!(output(out).contains("Your turn (X)"));
}

#[test]
fn test_cli_parses_best_move() {
    let cli = Cli::try_parse_from([
        "strictly_minimax",
        "--no-pruning",
        "best-move",
        "--board",
        "XX_OO____",
        "--mover",
        "x",
        "--json",
    ])
    .expect("Parse failed");

    assert!(cli.no_pruning);
    match cli.command {
        Command::BestMove { board: b, mover, json } => {
            assert_eq!(b, board("XX_OO____"));
            assert_eq!(mover, Some(Player::X));
            assert!(json);
        }
        other => panic!("Unexpected command {:?}", other),
    }
}

#[test]
fn test_cli_rejects_bad_board() {
    assert!(Cli::try_parse_from(["strictly_minimax", "best-move", "--board", "XXQ"]).is_err());
}

#[test]
fn test_cli_parses_play_with_config() {
    let cli = Cli::try_parse_from([
        "strictly_minimax",
        "play",
        "--human",
        "o",
        "--config",
        "x.toml",
    ])
    .expect("Parse failed");
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("x.toml")));
    assert!(matches!(cli.command, Command::Play { human: Some(Player::O) }));
}
