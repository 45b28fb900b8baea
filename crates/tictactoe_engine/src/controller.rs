//! Best-of-three match controller.
//!
//! [`GameController`] owns the board and the match state. Callers drive it
//! with [`GameController::play_move`] for human seats and
//! [`GameController::play_bot_move`] when an outcome reports
//! `should_bot_play`. Nothing here sleeps or spawns; pacing the bot is the
//! caller's job.

use crate::error::MatchError;
use crate::phases::{GameMode, MatchStatus, RoundResult, Score};
use crate::player::{Player, RandomSource, SeededRandom};
use crate::rules;
use crate::types::{Board, Mark};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Rounds in a match.
pub const MAX_ROUNDS: u32 = 3;

/// Everything needed to (re)start a match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchSetup {
    /// Human vs bot, or human vs human.
    mode: GameMode,
    /// Name of the X seat.
    player_x_name: String,
    /// Name of the O seat in multiplayer.
    player_o_name: String,
    /// Name of the O seat in singleplayer.
    bot_name: String,
    /// Mark that opens the first round.
    starting_mark: Mark,
}

impl MatchSetup {
    /// Default names, X opens.
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            player_x_name: "Player 1".to_string(),
            player_o_name: "Player 2".to_string(),
            bot_name: "Bot".to_string(),
            starting_mark: Mark::X,
        }
    }

    /// Sets both human names.
    pub fn with_names(mut self, player_x: impl Into<String>, player_o: impl Into<String>) -> Self {
        self.player_x_name = player_x.into();
        self.player_o_name = player_o.into();
        self
    }

    /// Sets the bot's name.
    pub fn with_bot_name(mut self, name: impl Into<String>) -> Self {
        self.bot_name = name.into();
        self
    }

    /// Sets which mark opens the first round.
    pub fn with_starting_mark(mut self, mark: Mark) -> Self {
        self.starting_mark = mark;
        self
    }

    /// Seats for this setup. X is always the first seat and always human.
    fn seat_players(&self) -> [Player; 2] {
        let o = match self.mode {
            GameMode::Singleplayer => Player::bot(self.bot_name.clone(), Mark::O),
            GameMode::Multiplayer => Player::human(self.player_o_name.clone(), Mark::O),
        };
        [Player::human(self.player_x_name.clone(), Mark::X), o]
    }
}

/// Reply to a successful start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Always [`MatchStatus::Ongoing`] after a start.
    pub status: MatchStatus,
    /// Mark to move first.
    pub current_player_mark: Mark,
    /// Name of the player to move first.
    pub current_player_name: String,
    /// Mode the match was started in.
    pub mode: GameMode,
    /// True when the opening move belongs to the bot.
    pub should_bot_play: bool,
}

/// A mark that has just been placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct PlacedMark {
    /// Cell index (0-8).
    pub index: usize,
    /// Mark placed there.
    pub mark: Mark,
}

/// Classification of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Round continues with the other player.
    Turn,
    /// Round resolved, another round follows.
    RoundEnd,
    /// Final round resolved.
    MatchEnd,
}

/// What happened after an accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The round goes on.
    Turn {
        /// The move just made.
        placed: PlacedMark,
        /// Mark to move next.
        next_player: Mark,
        /// True when the next mover is the bot.
        should_bot_play: bool,
    },
    /// A round finished and the board was cleared for the next one.
    RoundEnd {
        /// The move that ended the round.
        placed: PlacedMark,
        /// Win or tie.
        round_result: RoundResult,
        /// Round winner, `None` on a tie.
        winner: Option<Mark>,
        /// Score after this round.
        score: Score,
        /// Rounds resolved so far.
        rounds_played: u32,
        /// Mark that opens the next round.
        next_player: Mark,
        /// True when the bot opens the next round.
        should_bot_play: bool,
    },
    /// The match is over.
    MatchEnd {
        /// The move that ended the final round.
        placed: PlacedMark,
        /// Outcome of the final round.
        round_result: RoundResult,
        /// Match winner by round wins, `None` when level.
        winner: Option<Mark>,
        /// Final score.
        score: Score,
        /// Always [`MAX_ROUNDS`].
        rounds_played: u32,
    },
}

impl MoveOutcome {
    /// Phase of this outcome.
    pub fn phase(&self) -> Phase {
        match self {
            MoveOutcome::Turn { .. } => Phase::Turn,
            MoveOutcome::RoundEnd { .. } => Phase::RoundEnd,
            MoveOutcome::MatchEnd { .. } => Phase::MatchEnd,
        }
    }

    /// The move that produced this outcome.
    pub fn placed(&self) -> PlacedMark {
        match self {
            MoveOutcome::Turn { placed, .. }
            | MoveOutcome::RoundEnd { placed, .. }
            | MoveOutcome::MatchEnd { placed, .. } => *placed,
        }
    }

    /// Whether the caller should now ask the bot to move.
    pub fn should_bot_play(&self) -> bool {
        match self {
            MoveOutcome::Turn {
                should_bot_play, ..
            }
            | MoveOutcome::RoundEnd {
                should_bot_play, ..
            } => *should_bot_play,
            MoveOutcome::MatchEnd { .. } => false,
        }
    }

    /// Mark to move next, if play continues.
    pub fn next_player(&self) -> Option<Mark> {
        match self {
            MoveOutcome::Turn { next_player, .. } | MoveOutcome::RoundEnd { next_player, .. } => {
                Some(*next_player)
            }
            MoveOutcome::MatchEnd { .. } => None,
        }
    }
}

/// What the caller should do after [`GameController::reset_game`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ResetAction {
    /// A match was in progress: start a fresh one with this setup right away.
    Restart(MatchSetup),
    /// Nothing was in progress: go back to setup.
    BackToSetup,
}

impl ResetAction {
    /// Mode to restart in, for [`ResetAction::Restart`].
    pub fn mode(&self) -> Option<GameMode> {
        match self {
            ResetAction::Restart(setup) => Some(*setup.mode()),
            ResetAction::BackToSetup => None,
        }
    }
}

/// State of one match, alive from start until teardown.
#[derive(Debug)]
struct MatchState {
    setup: MatchSetup,
    players: [Player; 2],
    current: usize,
    round_starter: usize,
    rounds_played: u32,
    score: Score,
    status: MatchStatus,
}

/// Seat index for a mark. Seats are always `[X, O]`.
fn seat_of(mark: Mark) -> usize {
    match mark {
        Mark::X => 0,
        Mark::O => 1,
    }
}

impl MatchState {
    fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    fn current_is_bot(&self) -> bool {
        self.current_player().is_bot()
    }

    /// Evaluates the board after `placed` and advances turn, round or match.
    fn resolve(&mut self, board: &mut Board, placed: PlacedMark) -> MoveOutcome {
        match rules::status(board) {
            RoundResult::Ongoing => {
                self.current = 1 - self.current;
                let next_player = self.current_player().mark();
                debug!(?placed, next = %next_player, "Turn passes");
                MoveOutcome::Turn {
                    placed,
                    next_player,
                    should_bot_play: self.current_is_bot(),
                }
            }
            result => self.finish_round(board, placed, result),
        }
    }

    fn finish_round(
        &mut self,
        board: &mut Board,
        placed: PlacedMark,
        round_result: RoundResult,
    ) -> MoveOutcome {
        let winner = round_result.winner();
        if let Some(mark) = winner {
            self.score.record_win(mark);
        }
        self.rounds_played += 1;

        if self.rounds_played >= MAX_ROUNDS {
            self.status = MatchStatus::Finished;
            let match_winner = self.score.leader();
            info!(
                score = %self.score,
                winner = ?match_winner,
                "Match finished"
            );
            return MoveOutcome::MatchEnd {
                placed,
                round_result,
                winner: match_winner,
                score: self.score,
                rounds_played: self.rounds_played,
            };
        }

        board.reset();
        let starter = match winner {
            Some(mark) => seat_of(mark),
            None => 1 - self.round_starter,
        };
        self.round_starter = starter;
        self.current = starter;
        let next_player = self.current_player().mark();

        info!(
            round = self.rounds_played,
            result = %round_result,
            score = %self.score,
            next = %next_player,
            "Round finished"
        );

        MoveOutcome::RoundEnd {
            placed,
            round_result,
            winner,
            score: self.score,
            rounds_played: self.rounds_played,
            next_player,
            should_bot_play: self.current_is_bot(),
        }
    }
}

/// Runs matches of [`MAX_ROUNDS`] rounds on one board.
///
/// Each controller is independent; tests can run many side by side.
#[derive(Debug)]
pub struct GameController {
    board: Board,
    state: Option<MatchState>,
    random: Box<dyn RandomSource>,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    /// Controller whose bot draws from OS entropy.
    pub fn new() -> Self {
        Self::with_random(SeededRandom::from_entropy())
    }

    /// Controller whose bot replays the same moves for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_random(SeededRandom::from_seed(seed))
    }

    /// Controller with an injected randomness source.
    pub fn with_random(random: impl RandomSource + 'static) -> Self {
        Self {
            board: Board::new(),
            state: None,
            random: Box::new(random),
        }
    }

    /// Starts a match with default names; X opens.
    pub fn start_game(&mut self, mode: GameMode) -> Result<MatchSummary, MatchError> {
        self.start_game_with(MatchSetup::new(mode))
    }

    /// Starts a match from a full setup.
    ///
    /// # Errors
    ///
    /// [`MatchError::AlreadyInProgress`] while a match is ongoing. A finished
    /// match may be replaced directly.
    #[instrument(skip(self, setup), fields(mode = %setup.mode(), starting = %setup.starting_mark()))]
    pub fn start_game_with(&mut self, setup: MatchSetup) -> Result<MatchSummary, MatchError> {
        if self.status() == MatchStatus::Ongoing {
            warn!("Refusing to start over a match in progress");
            return Err(MatchError::AlreadyInProgress);
        }

        let players = setup.seat_players();
        let starter = seat_of(*setup.starting_mark());
        let mode = *setup.mode();
        self.board.reset();
        let state = MatchState {
            setup,
            players,
            current: starter,
            round_starter: starter,
            rounds_played: 0,
            score: Score::default(),
            status: MatchStatus::Ongoing,
        };

        let summary = MatchSummary {
            status: state.status,
            current_player_mark: state.current_player().mark(),
            current_player_name: state.current_player().name().to_string(),
            mode,
            should_bot_play: state.current_is_bot(),
        };
        self.state = Some(state);

        info!(first = %summary.current_player_mark, "Match started");
        Ok(summary)
    }

    /// Places the current player's mark at `index`.
    ///
    /// # Errors
    ///
    /// [`MatchError::GameNotActive`] outside an ongoing match,
    /// [`MatchError::InvalidMove`] for an occupied or out-of-range cell.
    #[instrument(skip(self))]
    pub fn play_move(&mut self, index: usize) -> Result<MoveOutcome, MatchError> {
        let state = self
            .state
            .as_mut()
            .filter(|s| s.status == MatchStatus::Ongoing)
            .ok_or(MatchError::GameNotActive)?;

        let mark = state.current_player().mark();
        if !self.board.place(index, mark) {
            warn!(%mark, "Rejected move");
            return Err(MatchError::InvalidMove { index });
        }

        Ok(state.resolve(&mut self.board, PlacedMark::new(index, mark)))
    }

    /// Lets the bot move when it holds the turn.
    ///
    /// # Errors
    ///
    /// [`MatchError::GameNotActive`] outside an ongoing match,
    /// [`MatchError::NotBotTurn`] when a human is to move,
    /// [`MatchError::NoMovesAvailable`] if the board is somehow full.
    #[instrument(skip(self))]
    pub fn play_bot_move(&mut self) -> Result<MoveOutcome, MatchError> {
        let state = self
            .state
            .as_mut()
            .filter(|s| s.status == MatchStatus::Ongoing)
            .ok_or(MatchError::GameNotActive)?;

        let player = state.current_player();
        let bot = *player.bot_strategy().ok_or_else(|| {
            warn!(player = player.name(), "Bot move requested on a human turn");
            MatchError::NotBotTurn
        })?;
        let mark = player.mark();

        let index = bot
            .choose_move(&self.board, self.random.as_mut())
            .ok_or(MatchError::NoMovesAvailable)?;
        if !self.board.place(index, mark) {
            return Err(MatchError::InvalidMove { index });
        }

        Ok(state.resolve(&mut self.board, PlacedMark::new(index, mark)))
    }

    /// Abandons an ongoing match and asks for an immediate restart, or tears
    /// down anything else and asks for setup.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) -> ResetAction {
        match self.state.take() {
            Some(state) if state.status == MatchStatus::Ongoing => {
                self.board.reset();
                info!(mode = %state.setup.mode(), "Match abandoned, restart requested");
                ResetAction::Restart(state.setup)
            }
            _ => {
                self.end_game();
                ResetAction::BackToSetup
            }
        }
    }

    /// Drops players and mode; status returns to not started.
    #[instrument(skip(self))]
    pub fn end_game(&mut self) {
        if self.state.take().is_some() {
            info!("Match torn down");
        }
        self.board.reset();
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Lifecycle status.
    pub fn status(&self) -> MatchStatus {
        self.state
            .as_ref()
            .map_or(MatchStatus::NotStarted, |s| s.status)
    }

    /// Mode of the current match.
    pub fn mode(&self) -> Option<GameMode> {
        self.state.as_ref().map(|s| *s.setup.mode())
    }

    /// Setup of the current match.
    pub fn setup(&self) -> Option<&MatchSetup> {
        self.state.as_ref().map(|s| &s.setup)
    }

    /// Both seats, X first.
    pub fn players(&self) -> Option<&[Player; 2]> {
        self.state.as_ref().map(|s| &s.players)
    }

    /// The player to move; `None` unless a match is ongoing.
    pub fn current_player(&self) -> Option<&Player> {
        self.state
            .as_ref()
            .filter(|s| s.status == MatchStatus::Ongoing)
            .map(MatchState::current_player)
    }

    /// Mark of the player to move.
    pub fn current_mark(&self) -> Option<Mark> {
        self.current_player().map(Player::mark)
    }

    /// Round wins so far.
    pub fn score(&self) -> Score {
        self.state.as_ref().map(|s| s.score).unwrap_or_default()
    }

    /// Rounds resolved so far.
    pub fn rounds_played(&self) -> u32 {
        self.state.as_ref().map_or(0, |s| s.rounds_played)
    }

    /// Rounds in a match.
    pub fn max_rounds(&self) -> u32 {
        MAX_ROUNDS
    }
}
