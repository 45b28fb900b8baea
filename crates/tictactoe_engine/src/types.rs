//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// A player's symbol on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X (moves first unless the setup says otherwise).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells are write-once: [`Board::place`] refuses occupied or out-of-range
/// cells, and only [`Board::reset`] clears them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw squares. Used for evaluating arbitrary layouts.
    pub fn from_squares(squares: [Square; CELL_COUNT]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks if a square is on the board and empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Places `mark` at `index`.
    ///
    /// Returns `false` and leaves the board untouched when the index is out
    /// of range or the square is already occupied.
    #[instrument(skip(self))]
    pub fn place(&mut self, index: usize, mark: Mark) -> bool {
        if !self.is_empty(index) {
            return false;
        }
        self.squares[index] = Square::Occupied(mark);
        true
    }

    /// Returns an owned copy of all squares.
    pub fn snapshot(&self) -> [Square; CELL_COUNT] {
        self.squares
    }

    /// Borrows the squares.
    pub fn squares(&self) -> &[Square; CELL_COUNT] {
        &self.squares
    }

    /// Clears every square.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.squares = [Square::Empty; CELL_COUNT];
    }

    /// Indices of all empty squares, ascending.
    pub fn empty_indices(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| **square == Square::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based number so a player can type it.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_on_empty_square() {
        let mut board = Board::new();
        assert!(board.place(4, Mark::X));
        assert_eq!(board.get(4), Some(Square::Occupied(Mark::X)));
    }

    #[test]
    fn test_place_on_occupied_square_is_rejected() {
        let mut board = Board::new();
        assert!(board.place(0, Mark::X));
        assert!(!board.place(0, Mark::O));
        assert_eq!(board.get(0), Some(Square::Occupied(Mark::X)));
    }

    #[test]
    fn test_place_out_of_range_is_rejected() {
        let mut board = Board::new();
        assert!(!board.place(9, Mark::X));
        assert!(!board.place(usize::MAX, Mark::O));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut board = Board::new();
        board.place(2, Mark::O);
        let mut snapshot = board.snapshot();
        snapshot[2] = Square::Empty;
        snapshot[3] = Square::Occupied(Mark::X);
        assert_eq!(board.get(2), Some(Square::Occupied(Mark::O)));
        assert_eq!(board.get(3), Some(Square::Empty));
    }

    #[test]
    fn test_reset_clears_and_is_idempotent() {
        let mut board = Board::new();
        board.place(0, Mark::X);
        board.place(8, Mark::O);
        board.reset();
        assert_eq!(board, Board::new());
        board.reset();
        assert_eq!(board.empty_indices().len(), CELL_COUNT);
    }

    #[test]
    fn test_empty_indices_ascending() {
        let mut board = Board::new();
        board.place(1, Mark::X);
        board.place(5, Mark::O);
        board.place(7, Mark::X);
        assert_eq!(board.empty_indices(), vec![0, 2, 3, 4, 6, 8]);
    }

    #[test]
    fn test_display_numbers_empty_squares() {
        let mut board = Board::new();
        board.place(0, Mark::X);
        board.place(4, Mark::O);
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_mark_parses_case_insensitively() {
        assert_eq!("x".parse::<Mark>().ok(), Some(Mark::X));
        assert_eq!("O".parse::<Mark>().ok(), Some(Mark::O));
        assert!("z".parse::<Mark>().is_err());
    }
}
