//! Game rules for tic-tac-toe.
//!
//! Pure functions over a board. Rules are kept apart from board storage and
//! from the match controller so any layout can be evaluated in isolation.

pub mod draw;
pub mod win;

pub use draw::is_tie;
pub use win::{LINES, winner};

use crate::phases::RoundResult;
use crate::types::Board;
use tracing::instrument;

/// Classifies a board as won, tied, or still in play. A win outranks a tie.
#[instrument(skip(board))]
pub fn status(board: &Board) -> RoundResult {
    if let Some(mark) = winner(board) {
        RoundResult::Win(mark)
    } else if is_tie(board) {
        RoundResult::Tie
    } else {
        RoundResult::Ongoing
    }
}

/// Checks whether the round on this board is over.
pub fn is_game_over(board: &Board) -> bool {
    status(board) != RoundResult::Ongoing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Mark, Square};

    fn board(layout: &str) -> Board {
        let mut squares = [Square::Empty; 9];
        for (square, c) in squares.iter_mut().zip(layout.chars()) {
            *square = match c {
                'X' => Square::Occupied(Mark::X),
                'O' => Square::Occupied(Mark::O),
                _ => Square::Empty,
            };
        }
        Board::from_squares(squares)
    }

    #[test]
    fn test_status_ongoing_on_empty_board() {
        assert_eq!(status(&Board::new()), RoundResult::Ongoing);
        assert!(!is_game_over(&Board::new()));
    }

    #[test]
    fn test_status_win_beats_full_board() {
        // Full board where X completes the last row.
        let b = board("XOOOXXXXX");
        assert!(b.is_full());
        assert_eq!(status(&b), RoundResult::Win(Mark::X));
        assert!(is_game_over(&b));
    }

    #[test]
    fn test_status_tie() {
        let b = board("XOXXOOOXX");
        assert_eq!(status(&b), RoundResult::Tie);
        assert!(is_game_over(&b));
    }

    #[test]
    fn test_status_partial_board_without_line() {
        assert_eq!(status(&board("XO..X..O.")), RoundResult::Ongoing);
    }
}
