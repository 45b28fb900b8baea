//! Match phases, round outcomes and the running score.

use crate::types::Mark;
use serde::{Deserialize, Serialize};

/// How many humans sit at the board.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameMode {
    /// One human (X by default) against a random bot.
    #[strum(to_string = "singleplayer", serialize = "single")]
    Singleplayer,
    /// Two humans sharing the board.
    #[strum(to_string = "multiplayer", serialize = "multi")]
    Multiplayer,
}

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// No match has been set up.
    #[default]
    NotStarted,
    /// Rounds are being played.
    Ongoing,
    /// All rounds are resolved; only reset or teardown is accepted.
    Finished,
}

/// Outcome of evaluating a board.
///
/// Always derived from the board on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundResult {
    /// A mark completed a line.
    Win(Mark),
    /// The board is full with no line.
    Tie,
    /// Moves remain and nobody has a line.
    Ongoing,
}

impl RoundResult {
    /// Returns the winning mark if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            RoundResult::Win(mark) => Some(*mark),
            RoundResult::Tie | RoundResult::Ongoing => None,
        }
    }
}

impl std::fmt::Display for RoundResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundResult::Win(mark) => write!(f, "{mark} wins"),
            RoundResult::Tie => write!(f, "Tie"),
            RoundResult::Ongoing => write!(f, "Ongoing"),
        }
    }
}

/// Rounds won by each mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Score {
    /// Rounds won by X.
    pub x: u32,
    /// Rounds won by O.
    pub o: u32,
}

impl Score {
    /// Rounds won by `mark`.
    pub fn get(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Records a round win for `mark`.
    pub fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x += 1,
            Mark::O => self.o += 1,
        }
    }

    /// The mark with strictly more round wins, `None` when level.
    pub fn leader(&self) -> Option<Mark> {
        match self.x.cmp(&self.o) {
            std::cmp::Ordering::Greater => Some(Mark::X),
            std::cmp::Ordering::Less => Some(Mark::O),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X {} - {} O", self.x, self.o)
    }
}
