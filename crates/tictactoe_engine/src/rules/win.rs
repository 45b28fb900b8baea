//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Mark, Square};
use tracing::instrument;

/// The eight winning lines, checked in this order: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark of the first line (in [`LINES`] order) whose three
/// squares hold the same mark, `None` otherwise.
#[instrument(skip(board))]
pub fn winner(board: &Board) -> Option<Mark> {
    let squares = board.squares();
    LINES.iter().find_map(|&[a, b, c]| match squares[a] {
        Square::Occupied(mark) if squares[b] == squares[a] && squares[c] == squares[a] => {
            Some(mark)
        }
        _ => None,
    })
}
