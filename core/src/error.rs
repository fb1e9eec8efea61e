//! Error taxonomy reported by generation and session commands.

use thiserror::Error;

use crate::{CommandKind, GameMode, GameStatus};

/// Malformed level rules or board settings. Fatal to the generation call.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigurationError {
    /// The level asks for more distinct targets than its pool holds.
    #[error("level {level} asks for {requested} target types but only {available} are available")]
    TargetTypesExceedAlphabet {
        /// Level whose rule is malformed.
        level: u32,
        /// Number of distinct targets requested.
        requested: usize,
        /// Number of characters in the target pool.
        available: usize,
    },
    /// Choosing the targets left nothing to fill the remaining cells with.
    #[error("level {level} leaves no filler characters once its targets are chosen")]
    EmptyFillerAlphabet {
        /// Level whose rule is malformed.
        level: u32,
    },
    /// The board has no cells.
    #[error("board size must be at least 1")]
    EmptyBoard,
    /// A cell vector does not fill the square grid.
    #[error("a board of {expected} cells cannot be built from {actual} cells")]
    BoardShape {
        /// Cells required by the grid.
        expected: usize,
        /// Cells supplied.
        actual: usize,
    },
    /// The density band is not a valid fraction range.
    #[error("target density band {min}..={max} is not within 0..=1 or is inverted")]
    InvalidDensityBand {
        /// Requested lower fraction.
        min: f64,
        /// Requested upper fraction.
        max: f64,
    },
}

/// Action attempted in a state that forbids it. The session is left unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidActionError {
    /// The command is not accepted in the current status.
    #[error("cannot {action} while the game is {status}")]
    WrongStatus {
        /// Rejected command.
        action: CommandKind,
        /// Status at the time of the command.
        status: GameStatus,
    },
    /// The command belongs to the other game mode.
    #[error("cannot {action} in {mode} mode")]
    WrongMode {
        /// Rejected command.
        action: CommandKind,
        /// Mode of the current round.
        mode: GameMode,
    },
    /// The cell index is not on the board.
    #[error("cell {index} is outside the board of {cells} cells")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of cells on the board.
        cells: usize,
    },
    /// The selection already holds as many cells as the solution.
    #[error("selection is full at {cap} cells")]
    SelectionCapReached {
        /// Size of the solution set.
        cap: usize,
    },
}

/// Count-mode guess that cannot be checked.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// No guess was entered.
    #[error("enter a count before checking the answer")]
    MissingCount,
    /// The guess is below zero.
    #[error("the count cannot be negative (got {0})")]
    NegativeCount(i64),
    /// The guess exceeds the number of cells on the board.
    #[error("the count cannot be greater than {max} (got {count})")]
    CountTooLarge {
        /// Submitted guess.
        count: i64,
        /// Largest accepted guess.
        max: usize,
    },
    /// The text is not an integer.
    #[error("{0:?} is not a number")]
    NotANumber(String),
}

/// Any failure reported by the session's `apply` entry point.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SessionError {
    /// Board generation failed.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The command was not allowed in the current state.
    #[error(transparent)]
    InvalidAction(#[from] InvalidActionError),
    /// The count guess was not acceptable.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
}
