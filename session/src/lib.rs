#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for a Letter Hunt game.
//!
//! A [`Session`] owns the current round, the player's answer, the simulated
//! round clock and the pending reveal timer. It changes only through
//! [`apply`], which either performs the whole transition and appends the
//! resulting events, or rejects the command and leaves the session as it was.

use std::{collections::BTreeSet, time::Duration};

use letter_hunt_core::{
    Command, CommandKind, ConfigurationError, DensityBand, Event, GameConfig, GameMode, GameStatus,
    GeneratedBoard, InvalidActionError, Level, LevelRule, SessionError, ValidationResult,
};
use letter_hunt_system_board_generation::{generate, pick_hints};
use letter_hunt_system_level_rules::rules_for;
use letter_hunt_system_randomness::{from_entropy, seeded, ChaCha8Rng};
use letter_hunt_system_scoring::{count_score, selection_score};
use letter_hunt_system_validation::{check_count, check_selection, validate_count};
use log::{debug, info, warn};

#[derive(Debug)]
struct Round {
    rule: LevelRule,
    generated: GeneratedBoard,
}

/// Owned state of one game instance.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    density: DensityBand,
    rng: ChaCha8Rng,
    status: GameStatus,
    level: Level,
    mode: GameMode,
    round: Option<Round>,
    selected: BTreeSet<usize>,
    hinted: BTreeSet<usize>,
    user_count: Option<i64>,
    moves: u32,
    elapsed: Duration,
    reveal_remaining: Option<Duration>,
    validation: Option<ValidationResult>,
    score: Option<u64>,
}

impl Session {
    /// Creates an idle session, seeding its random source from
    /// [`GameConfig::seed`] or from operating-system entropy.
    pub fn new(config: GameConfig) -> Result<Self, ConfigurationError> {
        let rng = config.seed.map_or_else(from_entropy, seeded);
        Self::with_rng(config, rng)
    }

    /// Creates an idle session that draws every board from `rng`.
    pub fn with_rng(config: GameConfig, rng: ChaCha8Rng) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let density = config.density()?;
        Ok(Self {
            status: GameStatus::Idle,
            level: config.starting_level,
            mode: config.default_mode,
            config,
            density,
            rng,
            round: None,
            selected: BTreeSet::new(),
            hinted: BTreeSet::new(),
            user_count: None,
            moves: 0,
            elapsed: Duration::ZERO,
            reveal_remaining: None,
            validation: None,
            score: None,
        })
    }

    fn require_status(
        &self,
        action: CommandKind,
        allowed: &[GameStatus],
    ) -> Result<(), InvalidActionError> {
        if allowed.contains(&self.status) {
            Ok(())
        } else {
            Err(InvalidActionError::WrongStatus {
                action,
                status: self.status,
            })
        }
    }

    fn require_mode(&self, action: CommandKind, mode: GameMode) -> Result<(), InvalidActionError> {
        if self.mode == mode {
            Ok(())
        } else {
            Err(InvalidActionError::WrongMode {
                action,
                mode: self.mode,
            })
        }
    }

    fn require_cell(&self, index: usize) -> Result<char, InvalidActionError> {
        let board = self.round.as_ref().map(|round| &round.generated.board);
        let cells = board.map_or(0, |board| board.len());
        board
            .and_then(|board| board.cell(index))
            .ok_or(InvalidActionError::IndexOutOfBounds { index, cells })
    }

    fn solution_len(&self) -> usize {
        self.round
            .as_ref()
            .map_or(0, |round| round.generated.solution.len())
    }

    fn clear_answer(&mut self) {
        self.selected.clear();
        self.hinted.clear();
        self.user_count = None;
        self.moves = 0;
        self.elapsed = Duration::ZERO;
        self.reveal_remaining = None;
        self.validation = None;
        self.score = None;
    }

    fn start_round(
        &mut self,
        level: Level,
        mode: GameMode,
        target_count: Option<usize>,
        out_events: &mut Vec<Event>,
    ) -> Result<(), ConfigurationError> {
        let rule = rules_for(level, mode);
        let generated = generate(
            self.config.board_size,
            &rule,
            self.density,
            target_count,
            &mut self.rng,
        )?;

        info!(
            "level {level} {mode} round started with {} solution cells",
            generated.solution.len()
        );
        out_events.push(Event::GameStarted {
            level,
            mode,
            targets: generated.targets.clone(),
        });

        self.clear_answer();
        self.level = level;
        self.mode = mode;
        self.round = Some(Round { rule, generated });
        self.status = GameStatus::Playing;
        Ok(())
    }

    fn resolve_reveal(&mut self, out_events: &mut Vec<Event>) {
        if self.reveal_remaining.take().is_none() {
            return;
        }
        let Some(validation) = self.validation else {
            return;
        };

        let score = match self.mode {
            GameMode::Selection => selection_score(
                validation.accuracy,
                self.elapsed,
                self.level,
                self.moves,
                validation.total_count,
            ),
            GameMode::Count => count_score(
                validation.correct,
                self.elapsed,
                self.level,
                validation.total_count,
            ),
        };
        self.score = Some(score);
        self.status = if validation.correct {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };

        info!(
            "level {} resolved as {} with score {score}",
            self.level, self.status
        );
        out_events.push(Event::AnswerChecked {
            correct: validation.correct,
            score,
            accuracy: validation.accuracy,
            elapsed: self.elapsed,
            moves: self.moves,
            level: self.level,
        });
        if validation.correct {
            out_events.push(Event::GameCompleted {
                elapsed: self.elapsed,
                score,
            });
        }
    }
}

/// Applies `command` to the session.
///
/// Accepted commands append their events to `out_events`. Rejected commands
/// return an error and leave both the session and `out_events` untouched.
pub fn apply(
    session: &mut Session,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), SessionError> {
    let kind = command.kind();
    let result = execute(session, command, out_events);
    if let Err(error) = &result {
        warn!("rejected {kind}: {error}");
    }
    result
}

fn execute(
    session: &mut Session,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), SessionError> {
    let action = command.kind();
    match command {
        Command::GenerateNewGame {
            level,
            target_count,
            mode,
        } => {
            session.require_status(
                action,
                &[GameStatus::Idle, GameStatus::Won, GameStatus::Lost],
            )?;
            let level = level.unwrap_or(session.level);
            let mode = mode.unwrap_or(session.mode);
            session.start_round(level, mode, target_count, out_events)?;
        }
        Command::SelectTile { index } => {
            session.require_status(action, &[GameStatus::Playing])?;
            session.require_mode(action, GameMode::Selection)?;
            let symbol = session.require_cell(index)?;
            if session.selected.contains(&index) {
                return Ok(());
            }
            let cap = session.solution_len();
            if session.selected.len() >= cap {
                return Err(InvalidActionError::SelectionCapReached { cap }.into());
            }
            let _ = session.selected.insert(index);
            session.moves = session.moves.saturating_add(1);
            out_events.push(Event::TileSelected { index, symbol });
        }
        Command::DeselectTile { index } => {
            session.require_status(action, &[GameStatus::Playing])?;
            session.require_mode(action, GameMode::Selection)?;
            let _ = session.require_cell(index)?;
            if session.selected.remove(&index) {
                session.moves = session.moves.saturating_add(1);
                out_events.push(Event::TileDeselected { index });
            }
        }
        Command::SetUserCount { count } => {
            session.require_status(action, &[GameStatus::Playing])?;
            session.require_mode(action, GameMode::Count)?;
            session.user_count = Some(count);
        }
        Command::CheckAnswer => {
            session.require_status(action, &[GameStatus::Playing])?;
            let Some(round) = session.round.as_ref() else {
                return Err(InvalidActionError::WrongStatus {
                    action,
                    status: session.status,
                }
                .into());
            };
            let solution = &round.generated.solution;
            let validation = match session.mode {
                GameMode::Selection => check_selection(&session.selected, solution),
                GameMode::Count => {
                    let guess = validate_count(session.user_count, round.generated.board.len())?;
                    check_count(guess, solution)
                }
            };

            let reveal_delay = session.config.reveal_delay();
            debug!(
                "answer submitted at {:?}: {} of {} found",
                session.elapsed, validation.correct_count, validation.total_count
            );
            session.validation = Some(validation);
            session.reveal_remaining = Some(reveal_delay);
            session.status = GameStatus::Checking;
            out_events.push(Event::CheckStarted { reveal_delay });
            if reveal_delay.is_zero() {
                session.resolve_reveal(out_events);
            }
        }
        Command::FinishReveal => {
            session.require_status(action, &[GameStatus::Checking])?;
            session.resolve_reveal(out_events);
        }
        Command::ResetGame => {
            if let Some(remaining) = session.reveal_remaining {
                info!("reset cancelled a reveal with {remaining:?} left");
            }
            session.clear_answer();
            session.round = None;
            session.level = session.config.starting_level;
            session.mode = session.config.default_mode;
            session.status = GameStatus::Idle;
            out_events.push(Event::GameReset);
        }
        Command::NextLevel => {
            session.require_status(action, &[GameStatus::Won])?;
            let level = session.level.next();
            session.start_round(level, session.mode, None, out_events)?;
        }
        Command::PauseGame => {
            session.require_status(action, &[GameStatus::Playing])?;
            session.status = GameStatus::Paused;
            out_events.push(Event::GamePaused);
        }
        Command::ResumeGame => {
            session.require_status(action, &[GameStatus::Paused])?;
            session.status = GameStatus::Playing;
            out_events.push(Event::GameResumed);
        }
        Command::RequestHints { count } => {
            session.require_status(action, &[GameStatus::Playing])?;
            session.require_mode(action, GameMode::Selection)?;
            let Some(round) = session.round.as_ref() else {
                return Ok(());
            };
            let excluded: BTreeSet<usize> =
                session.selected.union(&session.hinted).copied().collect();
            let indices = pick_hints(&round.generated.solution, &excluded, count, &mut session.rng);
            if indices.is_empty() {
                return Ok(());
            }
            session.hinted.extend(indices.iter().copied());
            out_events.push(Event::HintsRevealed { indices });
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            match session.status {
                GameStatus::Playing => {
                    session.elapsed = session.elapsed.saturating_add(dt);
                }
                GameStatus::Checking => {
                    let remaining = session
                        .reveal_remaining
                        .map(|remaining| remaining.saturating_sub(dt));
                    session.reveal_remaining = remaining;
                    if remaining.is_some_and(|remaining| remaining.is_zero()) {
                        session.resolve_reveal(out_events);
                    }
                }
                GameStatus::Idle | GameStatus::Paused | GameStatus::Won | GameStatus::Lost => {}
            }
        }
    }
    Ok(())
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use std::{collections::BTreeSet, time::Duration};

    use letter_hunt_core::{
        Board, GameMode, GameStatus, Level, LevelRule, RoundSummary, TargetSet, TileStatus,
        ValidationResult,
    };
    use letter_hunt_system_validation::tile_status as classify_tile;

    use super::Session;

    /// Lifecycle status of the session.
    #[must_use]
    pub fn status(session: &Session) -> GameStatus {
        session.status
    }

    /// Level of the current round, or of the next round when idle.
    #[must_use]
    pub fn level(session: &Session) -> Level {
        session.level
    }

    /// Mode of the current round, or of the next round when idle.
    #[must_use]
    pub fn mode(session: &Session) -> GameMode {
        session.mode
    }

    /// Rule of the current round.
    #[must_use]
    pub fn rule(session: &Session) -> Option<LevelRule> {
        session.round.as_ref().map(|round| round.rule)
    }

    /// Board of the current round.
    #[must_use]
    pub fn board(session: &Session) -> Option<&Board> {
        session.round.as_ref().map(|round| &round.generated.board)
    }

    /// Targets of the current round.
    #[must_use]
    pub fn targets(session: &Session) -> Option<&TargetSet> {
        session.round.as_ref().map(|round| &round.generated.targets)
    }

    /// Solution cells of the current round.
    #[must_use]
    pub fn solution(session: &Session) -> Option<&BTreeSet<usize>> {
        session.round.as_ref().map(|round| &round.generated.solution)
    }

    /// Cells the player selected.
    #[must_use]
    pub fn selected(session: &Session) -> &BTreeSet<usize> {
        &session.selected
    }

    /// Cells revealed by hints.
    #[must_use]
    pub fn hinted(session: &Session) -> &BTreeSet<usize> {
        &session.hinted
    }

    /// Recorded count guess, if any.
    #[must_use]
    pub fn user_count(session: &Session) -> Option<i64> {
        session.user_count
    }

    /// Moves made during the current round.
    #[must_use]
    pub fn moves(session: &Session) -> u32 {
        session.moves
    }

    /// Simulated round clock.
    #[must_use]
    pub fn elapsed(session: &Session) -> Duration {
        session.elapsed
    }

    /// Time left before a pending reveal resolves.
    #[must_use]
    pub fn reveal_remaining(session: &Session) -> Option<Duration> {
        session.reveal_remaining
    }

    /// Validation of the submitted answer, available from the check onwards.
    #[must_use]
    pub fn validation(session: &Session) -> Option<ValidationResult> {
        session.validation
    }

    /// Score of the resolved round.
    #[must_use]
    pub fn score(session: &Session) -> Option<u64> {
        session.score
    }

    /// Presentation status of the cell at `index`.
    #[must_use]
    pub fn tile_status(session: &Session, index: usize) -> TileStatus {
        match solution(session) {
            Some(solution) => classify_tile(
                index,
                &session.selected,
                &session.hinted,
                solution,
                session.status,
            ),
            None => TileStatus::Plain,
        }
    }

    /// Numbers persistence collaborators store once a round resolves.
    #[must_use]
    pub fn summary(session: &Session) -> Option<RoundSummary> {
        let score = session.score?;
        let validation = session.validation?;
        Some(RoundSummary {
            level: session.level,
            mode: session.mode,
            score,
            elapsed_ms: u64::try_from(session.elapsed.as_millis()).unwrap_or(u64::MAX),
            correct: validation.correct,
            moves: session.moves,
        })
    }

    /// Captures a self-contained copy of the player-visible state.
    #[must_use]
    pub fn snapshot(session: &Session) -> SessionSnapshot {
        SessionSnapshot {
            status: session.status,
            level: session.level,
            mode: session.mode,
            board: board(session).cloned(),
            targets: targets(session).cloned(),
            selected: session.selected.clone(),
            hinted: session.hinted.clone(),
            user_count: session.user_count,
            moves: session.moves,
            elapsed: session.elapsed,
            score: session.score,
        }
    }

    /// Owned copy of the player-visible session state.
    #[derive(Clone, Debug, PartialEq)]
    pub struct SessionSnapshot {
        /// Lifecycle status.
        pub status: GameStatus,
        /// Level of the round.
        pub level: Level,
        /// Mode of the round.
        pub mode: GameMode,
        /// Board of the round, absent while idle.
        pub board: Option<Board>,
        /// Targets of the round, absent while idle.
        pub targets: Option<TargetSet>,
        /// Selected cells.
        pub selected: BTreeSet<usize>,
        /// Cells revealed by hints.
        pub hinted: BTreeSet<usize>,
        /// Recorded count guess.
        pub user_count: Option<i64>,
        /// Moves made during the round.
        pub moves: u32,
        /// Simulated round clock.
        pub elapsed: Duration,
        /// Score once the round resolves.
        pub score: Option<u64>,
    }
}
