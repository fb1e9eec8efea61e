#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Letter Hunt engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative session, and pure systems. Adapters submit [`Command`] values
//! describing the player's intent, the session executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for observers
//! (statistics, sound, persistence) to react to. Systems never reach into the
//! session; they receive plain data such as [`LevelRule`] and return plain data
//! such as [`GeneratedBoard`] or [`ValidationResult`].

pub mod config;
pub mod error;

use std::{collections::BTreeSet, fmt, time::Duration};

use serde::{Deserialize, Serialize};

pub use config::{DensityBand, GameConfig};
pub use error::{ConfigurationError, InvalidActionError, InvalidInputError, SessionError};

/// Upper-case Latin letters used by the letter levels.
pub const LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Decimal digits used by the number and row-parity levels.
pub const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Even decimal digits.
pub const EVEN_DIGITS: [char; 5] = ['0', '2', '4', '6', '8'];

/// Odd decimal digits.
pub const ODD_DIGITS: [char; 5] = ['1', '3', '5', '7', '9'];

/// Fixed symbol set used by the symbol level.
pub const SYMBOLS: [char; 15] = [
    '∞', 'π', '÷', '×', '±', '√', '∑', 'Ω', '≈', '≠', '≤', '≥', '∆', '§', '¶',
];

/// Describes how the player answers a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// The player marks every target cell on the board.
    #[default]
    Selection,
    /// The player types how many target cells the board holds.
    Count,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selection => f.write_str("selection"),
            Self::Count => f.write_str("count"),
        }
    }
}

/// Lifecycle status of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// No round has been generated yet, or the session was reset.
    #[default]
    Idle,
    /// A round is in progress and accepts player input.
    Playing,
    /// The round is frozen; the clock does not advance.
    Paused,
    /// The answer was submitted and awaits the reveal delay.
    Checking,
    /// The answer was correct.
    Won,
    /// The answer was wrong.
    Lost,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Checking => "checking",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(label)
    }
}

/// Difficulty level, always at least one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Level(u32);

impl Level {
    /// The first level of the game.
    pub const FIRST: Level = Level(1);

    /// Creates a level, clamping zero up to the first level.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 {
            Self::FIRST
        } else {
            Self(value)
        }
    }

    /// Retrieves the numeric level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Level that follows this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::FIRST
    }
}

impl From<u32> for Level {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> Self {
        level.get()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row-parity rule used by the relational levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowParityRule {
    /// Even rows hold even targets and odd rows hold odd targets.
    Matching,
    /// Even rows hold odd targets and odd rows hold even targets.
    Crossed,
}

impl RowParityRule {
    /// Reports whether a digit drawn at `row` is a solution cell.
    ///
    /// In count mode only one row class contributes: even digits on even rows
    /// for [`RowParityRule::Matching`], odd digits on odd rows for
    /// [`RowParityRule::Crossed`].
    #[must_use]
    pub const fn is_solution(self, row: usize, digit: u32, mode: GameMode) -> bool {
        let even_row = row % 2 == 0;
        let even_digit = digit % 2 == 0;
        match (self, mode) {
            (Self::Matching, GameMode::Selection) => even_row == even_digit,
            (Self::Crossed, GameMode::Selection) => even_row != even_digit,
            (Self::Matching, GameMode::Count) => even_row && even_digit,
            (Self::Crossed, GameMode::Count) => !even_row && !even_digit,
        }
    }
}

/// Placement algorithm a level uses to build its board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementStrategy {
    /// A random share of cells within the density band receives targets.
    UniformRandomDensity,
    /// Every cell receives a random digit and the rule's parity decides the solution.
    RowParity(RowParityRule),
}

/// Tagged description of what a level asks the player to find.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Distinct upper-case letters.
    Letters {
        /// Number of distinct target letters.
        target_types: usize,
    },
    /// Distinct digits.
    Numbers {
        /// Number of distinct target digits.
        target_types: usize,
    },
    /// Distinct symbols from [`SYMBOLS`].
    Symbols {
        /// Number of distinct target symbols.
        target_types: usize,
    },
    /// Every even digit is a target; odd digits fill the board.
    EvenNumbers,
    /// Every odd digit is a target; even digits fill the board.
    OddNumbers,
    /// Solutions depend on the row index and the digit parity.
    RowParity(RowParityRule),
}

/// Resolved rule for a level and game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LevelRule {
    level: Level,
    mode: GameMode,
    kind: RuleKind,
}

impl LevelRule {
    /// Creates a rule descriptor.
    #[must_use]
    pub const fn new(level: Level, mode: GameMode, kind: RuleKind) -> Self {
        Self { level, mode, kind }
    }

    /// Level the rule was resolved for.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Game mode the rule was resolved for.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Tagged rule variant.
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Character universe the board is drawn from.
    #[must_use]
    pub const fn target_alphabet(&self) -> &'static [char] {
        match self.kind {
            RuleKind::Letters { .. } => &LETTERS,
            RuleKind::Symbols { .. } => &SYMBOLS,
            RuleKind::Numbers { .. }
            | RuleKind::EvenNumbers
            | RuleKind::OddNumbers
            | RuleKind::RowParity(_) => &DIGITS,
        }
    }

    /// Characters eligible to become this round's targets.
    ///
    /// Row-parity rules have no fixed target characters and return an empty pool.
    #[must_use]
    pub const fn target_pool(&self) -> &'static [char] {
        match self.kind {
            RuleKind::EvenNumbers => &EVEN_DIGITS,
            RuleKind::OddNumbers => &ODD_DIGITS,
            RuleKind::RowParity(_) => &[],
            _ => self.target_alphabet(),
        }
    }

    /// Number of distinct target characters chosen per round.
    #[must_use]
    pub const fn target_type_count(&self) -> usize {
        match self.kind {
            RuleKind::Letters { target_types }
            | RuleKind::Numbers { target_types }
            | RuleKind::Symbols { target_types } => target_types,
            RuleKind::EvenNumbers => EVEN_DIGITS.len(),
            RuleKind::OddNumbers => ODD_DIGITS.len(),
            RuleKind::RowParity(_) => 0,
        }
    }

    /// Placement algorithm the board generator must use.
    #[must_use]
    pub const fn placement(&self) -> PlacementStrategy {
        match self.kind {
            RuleKind::RowParity(parity) => PlacementStrategy::RowParity(parity),
            _ => PlacementStrategy::UniformRandomDensity,
        }
    }
}

/// Square grid of single characters stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<char>,
}

impl Board {
    /// Wraps a row-major cell vector, verifying it fills a `size` by `size` grid.
    pub fn from_cells(size: usize, cells: Vec<char>) -> Result<Self, ConfigurationError> {
        if size == 0 {
            return Err(ConfigurationError::EmptyBoard);
        }
        let expected = size.saturating_mul(size);
        if cells.len() != expected {
            return Err(ConfigurationError::BoardShape {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    /// Number of rows (and columns) of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the board has no cells. Never true for a constructed board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Character stored at `index`, if the index is on the board.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied()
    }

    /// Row and column of `index`, if the index is on the board.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.cells.len()).then(|| (index / self.size, index % self.size))
    }

    /// Row-major index of `(row, column)`, if the position is on the board.
    #[must_use]
    pub fn index_of(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.size && column < self.size).then(|| row * self.size + column)
    }

    /// Iterator over the board rows.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.size)
    }
}

/// What the player must find during a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetSet {
    /// Fixed list of distinct target characters.
    Characters(Vec<char>),
    /// Relational row-parity rule.
    RowParity(RowParityRule),
}

impl TargetSet {
    /// Fixed target characters, empty for row-parity rounds.
    #[must_use]
    pub fn characters(&self) -> &[char] {
        match self {
            Self::Characters(characters) => characters,
            Self::RowParity(_) => &[],
        }
    }
}

/// Output of the board generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedBoard {
    /// The generated grid.
    pub board: Board,
    /// Targets the player must find.
    pub targets: TargetSet,
    /// Indices of every cell that counts as a correct answer.
    pub solution: BTreeSet<usize>,
}

/// Diagnostic outcome of validating an answer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidationResult {
    /// Whether the answer wins the round.
    pub correct: bool,
    /// Number of solution cells the answer covered.
    pub correct_count: usize,
    /// Number of selected cells that were not solutions.
    pub wrong_count: usize,
    /// Number of solution cells the answer missed.
    pub missed_count: usize,
    /// Number of solution cells on the board.
    pub total_count: usize,
    /// Fraction of solution cells found, in `[0, 1]`.
    pub accuracy: f64,
}

/// Presentation status of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileStatus {
    /// Nothing to highlight.
    Plain,
    /// Selected by the player while the round is in progress.
    Selected,
    /// Revealed by a hint while the round is in progress.
    Hinted,
    /// Selected and a solution cell, shown after checking.
    Correct,
    /// Selected but not a solution cell, shown after checking.
    Wrong,
    /// Solution cell the player did not select, shown after checking.
    Missed,
}

/// Name of a command, used to report rejected actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// [`Command::GenerateNewGame`].
    GenerateNewGame,
    /// [`Command::SelectTile`].
    SelectTile,
    /// [`Command::DeselectTile`].
    DeselectTile,
    /// [`Command::SetUserCount`].
    SetUserCount,
    /// [`Command::CheckAnswer`].
    CheckAnswer,
    /// [`Command::FinishReveal`].
    FinishReveal,
    /// [`Command::ResetGame`].
    ResetGame,
    /// [`Command::NextLevel`].
    NextLevel,
    /// [`Command::PauseGame`].
    PauseGame,
    /// [`Command::ResumeGame`].
    ResumeGame,
    /// [`Command::RequestHints`].
    RequestHints,
    /// [`Command::Tick`].
    Tick,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::GenerateNewGame => "generate new game",
            Self::SelectTile => "select tile",
            Self::DeselectTile => "deselect tile",
            Self::SetUserCount => "set user count",
            Self::CheckAnswer => "check answer",
            Self::FinishReveal => "finish reveal",
            Self::ResetGame => "reset game",
            Self::NextLevel => "next level",
            Self::PauseGame => "pause game",
            Self::ResumeGame => "resume game",
            Self::RequestHints => "request hints",
            Self::Tick => "tick",
        };
        f.write_str(label)
    }
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Generates a fresh round, replacing whatever the session held.
    GenerateNewGame {
        /// Level to play; the session's current level when absent.
        level: Option<Level>,
        /// Requested number of target cells; clamped to the density band.
        target_count: Option<usize>,
        /// Mode to play; the session's current mode when absent.
        mode: Option<GameMode>,
    },
    /// Marks a cell as selected.
    SelectTile {
        /// Row-major index of the cell.
        index: usize,
    },
    /// Removes a cell from the selection.
    DeselectTile {
        /// Row-major index of the cell.
        index: usize,
    },
    /// Records the player's count guess.
    SetUserCount {
        /// Raw guess; negative values are rejected when the answer is checked.
        count: i64,
    },
    /// Submits the answer and starts the reveal delay.
    CheckAnswer,
    /// Resolves a pending reveal immediately instead of waiting for ticks.
    FinishReveal,
    /// Discards the round and returns to idle.
    ResetGame,
    /// Advances to the next level after a win.
    NextLevel,
    /// Freezes the round clock.
    PauseGame,
    /// Unfreezes the round clock.
    ResumeGame,
    /// Reveals up to `count` unselected solution cells.
    RequestHints {
        /// Maximum number of cells to reveal.
        count: usize,
    },
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of real time that elapsed since the previous tick.
        dt: Duration,
    },
}

impl Command {
    /// Name of the command, used when reporting rejections.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::GenerateNewGame { .. } => CommandKind::GenerateNewGame,
            Self::SelectTile { .. } => CommandKind::SelectTile,
            Self::DeselectTile { .. } => CommandKind::DeselectTile,
            Self::SetUserCount { .. } => CommandKind::SetUserCount,
            Self::CheckAnswer => CommandKind::CheckAnswer,
            Self::FinishReveal => CommandKind::FinishReveal,
            Self::ResetGame => CommandKind::ResetGame,
            Self::NextLevel => CommandKind::NextLevel,
            Self::PauseGame => CommandKind::PauseGame,
            Self::ResumeGame => CommandKind::ResumeGame,
            Self::RequestHints { .. } => CommandKind::RequestHints,
            Self::Tick { .. } => CommandKind::Tick,
        }
    }
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A new round started.
    GameStarted {
        /// Level of the round.
        level: Level,
        /// Mode of the round.
        mode: GameMode,
        /// Targets the player must find.
        targets: TargetSet,
    },
    /// A cell joined the selection.
    TileSelected {
        /// Row-major index of the cell.
        index: usize,
        /// Character stored in the cell.
        symbol: char,
    },
    /// A cell left the selection.
    TileDeselected {
        /// Row-major index of the cell.
        index: usize,
    },
    /// Hint cells were revealed to the player.
    HintsRevealed {
        /// Row-major indices of the revealed cells.
        indices: Vec<usize>,
    },
    /// The answer was submitted and the reveal delay started.
    CheckStarted {
        /// Delay before the outcome is announced.
        reveal_delay: Duration,
    },
    /// The outcome of the round was decided.
    AnswerChecked {
        /// Whether the answer was correct.
        correct: bool,
        /// Score awarded for the round.
        score: u64,
        /// Fraction of solution cells found.
        accuracy: f64,
        /// Round clock at the moment of the check.
        elapsed: Duration,
        /// Moves the player made during the round.
        moves: u32,
        /// Level of the round.
        level: Level,
    },
    /// The round was won.
    GameCompleted {
        /// Round clock at the moment of the check.
        elapsed: Duration,
        /// Score awarded for the round.
        score: u64,
    },
    /// The round clock was frozen.
    GamePaused,
    /// The round clock was unfrozen.
    GameResumed,
    /// The session returned to idle.
    GameReset,
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
}

/// Subscriber that reacts to session events without touching session state.
pub trait GameObserver {
    /// Handles a single event.
    fn observe(&mut self, event: &Event);
}

/// Delivers every event, in order, to every observer.
pub fn broadcast(events: &[Event], observers: &mut [&mut dyn GameObserver]) {
    for event in events {
        for observer in observers.iter_mut() {
            observer.observe(event);
        }
    }
}

/// Raw numbers external collaborators persist once a round resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Level of the round.
    pub level: Level,
    /// Mode of the round.
    pub mode: GameMode,
    /// Score awarded for the round.
    pub score: u64,
    /// Round clock at the moment of the check, in milliseconds.
    pub elapsed_ms: u64,
    /// Whether the round was won.
    pub correct: bool,
    /// Moves the player made during the round.
    pub moves: u32,
}
