//! Players and the random bot.

use crate::types::{Board, Mark};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Source of uniform randomness for bot moves.
///
/// The bot draws from nothing else, so swapping the source makes every
/// match reproducible.
pub trait RandomSource: std::fmt::Debug {
    /// Returns an index in `0..len`. Callers never pass zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// [`RandomSource`] backed by a seedable [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Deterministic source: the same seed replays the same bot moves.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Bot that plays a uniformly random empty cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomBot;

impl RandomBot {
    /// Chooses one of the empty cells, or `None` on a full board.
    #[instrument(skip(self, board, random))]
    pub fn choose_move(&self, board: &Board, random: &mut dyn RandomSource) -> Option<usize> {
        let empty = board.empty_indices();
        if empty.is_empty() {
            return None;
        }
        let pick = random.pick_index(empty.len()) % empty.len();
        let index = empty[pick];
        debug!(index, candidates = empty.len(), "Bot chose cell");
        Some(index)
    }
}

/// Who controls a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    /// Moves come from the calling layer.
    Human,
    /// Moves come from the bot's strategy.
    Bot(RandomBot),
}

/// Serializable tag for [`PlayerKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    /// Human player.
    Human,
    /// Random bot.
    Bot,
}

impl PlayerKind {
    /// The serializable tag for this kind.
    pub fn player_type(&self) -> PlayerType {
        match self {
            PlayerKind::Human => PlayerType::Human,
            PlayerKind::Bot(_) => PlayerType::Bot,
        }
    }
}

/// A seat at the board for the length of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    mark: Mark,
    kind: PlayerKind,
}

impl Player {
    /// Creates a human player.
    pub fn human(name: impl Into<String>, mark: Mark) -> Self {
        Self {
            name: name.into(),
            mark,
            kind: PlayerKind::Human,
        }
    }

    /// Creates a random bot player.
    pub fn bot(name: impl Into<String>, mark: Mark) -> Self {
        Self {
            name: name.into(),
            mark,
            kind: PlayerKind::Bot(RandomBot),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The mark this player places.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Human or bot.
    pub fn kind(&self) -> &PlayerKind {
        &self.kind
    }

    /// True for bot players.
    pub fn is_bot(&self) -> bool {
        matches!(self.kind, PlayerKind::Bot(_))
    }

    /// The bot strategy, for bot players.
    pub fn bot_strategy(&self) -> Option<&RandomBot> {
        match &self.kind {
            PlayerKind::Bot(bot) => Some(bot),
            PlayerKind::Human => None,
        }
    }
}
