//! Tic-tac-toe engine: board, rules, players, and a best-of-three match
//! controller.
//!
//! The crate is synchronous and owns no global state. A front end creates a
//! [`GameController`], starts a match, and feeds it moves:
//!
//! ```
//! use tictactoe_engine::{GameController, GameMode, MoveOutcome, Mark};
//!
//! let mut game = GameController::with_seed(7);
//! game.start_game(GameMode::Multiplayer).unwrap();
//! let outcome = game.play_move(4).unwrap();
//! assert_eq!(outcome.next_player(), Some(Mark::O));
//! assert!(matches!(outcome, MoveOutcome::Turn { .. }));
//! ```
//!
//! # Architecture
//!
//! - **Board**: nine write-once squares ([`Board`])
//! - **Rules**: pure win/tie evaluation ([`rules`])
//! - **Players**: human seats and the random bot ([`Player`], [`RandomBot`])
//! - **Controller**: turns, rounds and score ([`GameController`])

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod controller;
mod error;
mod phases;
mod player;
mod position;
pub mod rules;
mod types;

pub use controller::{
    GameController, MAX_ROUNDS, MatchSetup, MatchSummary, MoveOutcome, Phase, PlacedMark,
    ResetAction,
};
pub use error::MatchError;
pub use phases::{GameMode, MatchStatus, RoundResult, Score};
pub use player::{Player, PlayerKind, PlayerType, RandomBot, RandomSource, SeededRandom};
pub use position::Position;
pub use types::{Board, CELL_COUNT, Mark, Square};
