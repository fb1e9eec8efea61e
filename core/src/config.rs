//! Tunable game settings shared by the session and its adapters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigurationError, GameMode, Level};

/// Side length of the default square board.
pub const DEFAULT_BOARD_SIZE: usize = 15;
/// Lower edge of the default target density band.
pub const DEFAULT_MIN_TARGET_PERCENTAGE: f64 = 0.25;
/// Upper edge of the default target density band.
pub const DEFAULT_MAX_TARGET_PERCENTAGE: f64 = 0.30;
/// Default pause between submitting an answer and announcing the outcome.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 1_500;

/// Settings a session is created from.
///
/// Every field has a default, so a configuration file only needs to list the
/// values it overrides. Unknown keys are rejected to catch typos early.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of rows and columns of the square board.
    pub board_size: usize,
    /// Smallest fraction of cells that hold targets on density levels.
    pub min_target_percentage: f64,
    /// Largest fraction of cells that hold targets on density levels.
    pub max_target_percentage: f64,
    /// Reveal delay between `CheckAnswer` and the outcome, in milliseconds.
    pub reveal_delay_ms: u64,
    /// Seed for the session random source; entropy is used when absent.
    pub seed: Option<u64>,
    /// Mode used by new rounds that do not request one.
    pub default_mode: GameMode,
    /// Level the session starts at and returns to on reset.
    pub starting_level: Level,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            min_target_percentage: DEFAULT_MIN_TARGET_PERCENTAGE,
            max_target_percentage: DEFAULT_MAX_TARGET_PERCENTAGE,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            seed: None,
            default_mode: GameMode::Selection,
            starting_level: Level::FIRST,
        }
    }
}

impl GameConfig {
    /// Target density band described by the percentage fields.
    pub fn density(&self) -> Result<DensityBand, ConfigurationError> {
        DensityBand::new(self.min_target_percentage, self.max_target_percentage)
    }

    /// Reveal delay as a duration.
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Checks that the settings can produce boards.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.board_size == 0 {
            return Err(ConfigurationError::EmptyBoard);
        }
        let _ = self.density()?;
        Ok(())
    }
}

/// Inclusive range of the board fraction that must hold solution cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityBand {
    min: f64,
    max: f64,
}

impl DensityBand {
    /// Creates a band, rejecting values outside `0 <= min <= max <= 1`.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigurationError> {
        let in_unit = |value: f64| value.is_finite() && (0.0..=1.0).contains(&value);
        if !in_unit(min) || !in_unit(max) || min > max {
            return Err(ConfigurationError::InvalidDensityBand { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower fraction of the band.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper fraction of the band.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Smallest and largest target cell counts for a board of `cells` cells.
    ///
    /// Both bounds are rounded to the nearest cell, so a 225-cell board with a
    /// 25% to 30% band yields `(56, 68)`. Neither bound exceeds `cells`.
    #[must_use]
    pub fn count_bounds(&self, cells: usize) -> (usize, usize) {
        let scale = |fraction: f64| ((cells as f64) * fraction).round() as usize;
        let low = scale(self.min).min(cells);
        let high = scale(self.max).min(cells).max(low);
        (low, high)
    }

    /// Clamps a requested target count into the band.
    #[must_use]
    pub fn clamp(&self, requested: usize, cells: usize) -> usize {
        let (low, high) = self.count_bounds(cells);
        requested.clamp(low, high)
    }
}

impl Default for DensityBand {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_TARGET_PERCENTAGE,
            max: DEFAULT_MAX_TARGET_PERCENTAGE,
        }
    }
}
