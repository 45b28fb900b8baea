//! Tie detection logic for tic-tac-toe.

use super::win::winner;
use crate::types::Board;
use tracing::instrument;

/// A tie is a full board with no winning line.
#[instrument(skip(board))]
pub fn is_tie(board: &Board) -> bool {
    board.is_full() && winner(board).is_none()
}
