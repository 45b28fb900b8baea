//! Tests for the scripted terminal session.

use std::io::Cursor;
use tictactoe::{PlayConfig, Session, SessionCommand, SessionEnd};
use tictactoe_engine::{GameMode, Mark, MatchStatus, Position};

fn config(mode: GameMode) -> PlayConfig {
    PlayConfig::default()
        .with_mode(mode)
        .with_seed(1)
        .with_bot_delay_ms(0)
}

fn run(mode: GameMode, script: &str, json: bool) -> (SessionEnd, String, MatchStatus) {
    let mut output = Vec::new();
    let mut session =
        Session::new(config(mode), Cursor::new(script.to_string()), &mut output).with_json(json);
    let end = session.run().unwrap();
    let status = session.game().status();
    drop(session);
    (end, String::from_utf8(output).unwrap(), status)
}

#[test]
fn test_command_parsing() {
    assert_eq!(SessionCommand::parse("5\n"), SessionCommand::Place(Position::Center));
    assert_eq!(
        SessionCommand::parse("top right"),
        SessionCommand::Place(Position::TopRight)
    );
    assert_eq!(SessionCommand::parse(" R "), SessionCommand::Reset);
    assert_eq!(SessionCommand::parse("quit"), SessionCommand::Quit);
    assert_eq!(
        SessionCommand::parse("hello"),
        SessionCommand::Unknown("hello".to_string())
    );
}

#[test]
fn test_round_win_is_reported() {
    // Cells are 1-based on screen: X takes the top row.
    let (end, output, _) = run(GameMode::Multiplayer, "1\n5\n2\n4\n3\nq\n", false);

    assert_eq!(end, SessionEnd::Quit);
    assert!(output.contains("New multiplayer match, best of 3."));
    assert!(output.contains("Round 1: X wins. Score: X 1 - 0 O."));
    assert!(output.contains("Player 1 (X) opens the next round."));
}

#[test]
fn test_rejected_move_keeps_session_alive() {
    let (end, output, _) = run(GameMode::Multiplayer, "5\n5\nnonsense\n\n1\n", false);

    assert_eq!(end, SessionEnd::InputClosed);
    assert!(output.contains("Invalid move: cell 4"));
    assert!(output.contains("Type 1-9"));
    assert!(output.contains("Player 2 (O) plays Top-left."));
}

#[test]
fn test_full_match_ends_session() {
    let tie = "1\n2\n3\n5\n4\n6\n8\n7\n9\n";
    let script = format!("{tie}{tie}{tie}1\n");
    let (end, output, status) = run(GameMode::Multiplayer, &script, false);

    assert_eq!(end, SessionEnd::MatchFinished(None));
    assert!(output.contains("The match is drawn, X 0 - 0 O."));
    assert_eq!(status, MatchStatus::Finished);
}

#[test]
fn test_bot_answers_each_human_move() {
    let (end, output, _) = run(GameMode::Singleplayer, "5\n", false);

    assert_eq!(end, SessionEnd::InputClosed);
    assert!(output.contains("Player 1 (X) plays Center."));
    assert!(output.contains("Bot (O) plays"));
}

#[test]
fn test_reset_mid_match_restarts() {
    let (end, output, _) = run(GameMode::Multiplayer, "5\nr\nq\n", false);

    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(output.matches("New multiplayer match").count(), 2);
}

#[test]
fn test_json_lines() {
    let (_, output, _) = run(GameMode::Multiplayer, "1\n5\n", true);

    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["current_player_mark"], "X");
    assert_eq!(lines[1]["phase"], "turn");
    assert_eq!(lines[2]["placed"]["mark"], "O");
    assert_eq!(lines[2]["next_player"], serde_json::json!(Mark::X));
}
