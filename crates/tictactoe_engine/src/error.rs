//! Rejections reported by the match controller.

use derive_more::{Display, Error};

/// Why the controller refused an operation.
///
/// Every rejection leaves the match exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MatchError {
    /// The cell is out of range or already occupied.
    #[display("Invalid move: cell {index} is out of range or occupied")]
    InvalidMove {
        /// The rejected cell index.
        index: usize,
    },

    /// No match is being played.
    #[display("No game in progress")]
    GameNotActive,

    /// A bot move was requested while a human is to move.
    #[display("It is not the bot's turn")]
    NotBotTurn,

    /// The bot found no empty cell.
    #[display("No moves available")]
    NoMovesAvailable,

    /// A match is already running; reset or end it first.
    #[display("A game is already in progress")]
    AlreadyInProgress,
}
