//! Line-oriented terminal session driving a [`GameController`].

use crate::config::PlayConfig;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::time::Duration;
use tictactoe_engine::{GameController, Mark, MatchSummary, MoveOutcome, Position, ResetAction};
use tracing::{debug, info, instrument, warn};

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// All rounds were played; carries the match winner.
    MatchFinished(Option<Mark>),
    /// The player asked to quit.
    Quit,
    /// Reset was requested with no match in progress.
    BackToSetup,
    /// Input reached end of file.
    InputClosed,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place a mark.
    Place(Position),
    /// Reset the match.
    Reset,
    /// Leave the session.
    Quit,
    /// Anything else.
    Unknown(String),
}

impl Command {
    /// Parses a trimmed, non-empty line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "r" | "reset" => Command::Reset,
            "q" | "quit" | "exit" => Command::Quit,
            _ => Position::parse_input(line)
                .map(Command::Place)
                .unwrap_or_else(|| Command::Unknown(line.to_string())),
        }
    }
}

const HELP: &str = "Type 1-9 or a cell name (e.g. center), r to reset, q to quit.";

/// Plays one match over a reader and a writer.
pub struct Session<R, W> {
    game: GameController,
    config: PlayConfig,
    input: R,
    output: W,
    json: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session; the bot is seeded from the config when it has a seed.
    pub fn new(config: PlayConfig, input: R, output: W) -> Self {
        let game = match config.seed() {
            Some(seed) => GameController::with_seed(*seed),
            None => GameController::new(),
        };
        Self {
            game,
            config,
            input,
            output,
            json: false,
        }
    }

    /// Emits JSON lines instead of boards.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// The controller, for inspection after a run.
    pub fn game(&self) -> &GameController {
        &self.game
    }

    /// Runs until the match ends, the player quits, or input closes.
    #[instrument(skip(self), fields(mode = %self.config.mode()))]
    pub fn run(&mut self) -> Result<SessionEnd> {
        let summary = self.game.start_game_with(self.config.match_setup())?;
        self.announce_start(&summary)?;
        if summary.should_bot_play
            && let Some(end) = self.bot_turns()?
        {
            return Ok(end);
        }

        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read input")?;
            if read == 0 {
                info!("Input closed");
                self.game.end_game();
                return Ok(SessionEnd::InputClosed);
            }
            if line.trim().is_empty() {
                continue;
            }

            match Command::parse(&line) {
                Command::Quit => {
                    self.game.end_game();
                    return Ok(SessionEnd::Quit);
                }
                Command::Reset => match self.game.reset_game() {
                    ResetAction::Restart(setup) => {
                        let summary = self.game.start_game_with(setup)?;
                        self.announce_start(&summary)?;
                        if summary.should_bot_play
                            && let Some(end) = self.bot_turns()?
                        {
                            return Ok(end);
                        }
                    }
                    ResetAction::BackToSetup => return Ok(SessionEnd::BackToSetup),
                },
                Command::Place(position) => match self.game.play_move(position.to_index()) {
                    Ok(outcome) => {
                        if let Some(end) = self.report(&outcome)? {
                            return Ok(end);
                        }
                        if outcome.should_bot_play()
                            && let Some(end) = self.bot_turns()?
                        {
                            return Ok(end);
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, %position, "Move rejected");
                        writeln!(self.output, "{}", e)?;
                    }
                },
                Command::Unknown(text) => {
                    debug!(input = %text, "Unrecognized input");
                    writeln!(self.output, "{}", HELP)?;
                }
            }
        }
    }

    /// Plays bot moves for as long as the bot holds the turn.
    fn bot_turns(&mut self) -> Result<Option<SessionEnd>> {
        loop {
            let delay = *self.config.bot_delay_ms();
            if delay > 0 {
                std::thread::sleep(Duration::from_millis(delay));
            }
            let outcome = self.game.play_bot_move()?;
            if let Some(end) = self.report(&outcome)? {
                return Ok(Some(end));
            }
            if !outcome.should_bot_play() {
                return Ok(None);
            }
        }
    }

    fn name_of(&self, mark: Mark) -> String {
        self.game
            .players()
            .and_then(|players| players.iter().find(|p| p.mark() == mark))
            .map_or_else(|| mark.to_string(), |p| p.name().to_string())
    }

    fn announce_start(&mut self, summary: &MatchSummary) -> Result<()> {
        if self.json {
            writeln!(self.output, "{}", serde_json::to_string(summary)?)?;
            return Ok(());
        }
        let name = self.name_of(summary.current_player_mark);
        writeln!(
            self.output,
            "New {} match, best of {}.",
            summary.mode,
            self.game.max_rounds()
        )?;
        writeln!(self.output, "{}", self.game.board().display())?;
        writeln!(self.output, "{} ({}) to move.", name, summary.current_player_mark)?;
        Ok(())
    }

    /// Prints an outcome; returns the session end once the match is over.
    fn report(&mut self, outcome: &MoveOutcome) -> Result<Option<SessionEnd>> {
        if self.json {
            writeln!(self.output, "{}", serde_json::to_string(outcome)?)?;
        } else {
            self.report_text(outcome)?;
        }
        Ok(match outcome {
            MoveOutcome::MatchEnd { winner, .. } => Some(SessionEnd::MatchFinished(*winner)),
            _ => None,
        })
    }

    fn report_text(&mut self, outcome: &MoveOutcome) -> Result<()> {
        let placed = outcome.placed();
        let mover = self.name_of(placed.mark);
        let cell = Position::from_index(placed.index).map_or_else(String::new, |p| p.to_string());
        writeln!(self.output, "{} ({}) plays {}.", mover, placed.mark, cell)?;

        match outcome {
            MoveOutcome::Turn { next_player, .. } => {
                writeln!(self.output, "{}", self.game.board().display())?;
                let next = self.name_of(*next_player);
                writeln!(self.output, "{} ({}) to move.", next, next_player)?;
            }
            MoveOutcome::RoundEnd {
                round_result,
                score,
                rounds_played,
                next_player,
                ..
            } => {
                writeln!(
                    self.output,
                    "Round {}: {}. Score: {}.",
                    rounds_played, round_result, score
                )?;
                writeln!(self.output, "{}", self.game.board().display())?;
                let next = self.name_of(*next_player);
                writeln!(self.output, "{} ({}) opens the next round.", next, next_player)?;
            }
            MoveOutcome::MatchEnd {
                round_result,
                winner,
                score,
                ..
            } => {
                writeln!(self.output, "Final round: {}.", round_result)?;
                match winner {
                    Some(mark) => {
                        let name = self.name_of(*mark);
                        writeln!(self.output, "{} ({}) wins the match, {}.", name, mark, score)?;
                    }
                    None => writeln!(self.output, "The match is drawn, {}.", score)?,
                }
            }
        }
        Ok(())
    }
}
