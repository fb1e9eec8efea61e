#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure answer validation for both game modes.

use std::collections::BTreeSet;

use letter_hunt_core::{GameStatus, InvalidInputError, TileStatus, ValidationResult};

/// Compares the player's selection against the solution.
///
/// The answer is correct only when every solution cell is selected and no
/// other cell is. Accuracy is the share of solution cells found and is zero
/// for an empty solution.
#[must_use]
pub fn check_selection(
    selected: &BTreeSet<usize>,
    solution: &BTreeSet<usize>,
) -> ValidationResult {
    let correct_count = selected.intersection(solution).count();
    let wrong_count = selected.len() - correct_count;
    let total_count = solution.len();
    let missed_count = total_count - correct_count;
    let accuracy = if total_count > 0 {
        correct_count as f64 / total_count as f64
    } else {
        0.0
    };

    ValidationResult {
        correct: correct_count == total_count && wrong_count == 0,
        correct_count,
        wrong_count,
        missed_count,
        total_count,
        accuracy,
    }
}

/// Compares a count guess against the size of the solution.
///
/// Count answers are all or nothing: a correct guess finds every solution
/// cell and a wrong guess finds none.
#[must_use]
pub fn check_count(guess: usize, solution: &BTreeSet<usize>) -> ValidationResult {
    let total_count = solution.len();
    let correct = guess == total_count;
    let correct_count = if correct { total_count } else { 0 };

    ValidationResult {
        correct,
        correct_count,
        wrong_count: 0,
        missed_count: total_count - correct_count,
        total_count,
        accuracy: if correct { 1.0 } else { 0.0 },
    }
}

/// Accepts a recorded count guess if it lies in `0..=max`.
pub fn validate_count(count: Option<i64>, max: usize) -> Result<usize, InvalidInputError> {
    let count = count.ok_or(InvalidInputError::MissingCount)?;
    if count < 0 {
        return Err(InvalidInputError::NegativeCount(count));
    }
    match usize::try_from(count) {
        Ok(value) if value <= max => Ok(value),
        _ => Err(InvalidInputError::CountTooLarge { count, max }),
    }
}

/// Parses typed text into a count guess in `0..=max`.
///
/// Surrounding whitespace is ignored and blank text counts as no guess.
pub fn parse_count(text: &str, max: usize) -> Result<usize, InvalidInputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InvalidInputError::MissingCount);
    }
    let count = trimmed
        .parse::<i64>()
        .map_err(|_| InvalidInputError::NotANumber(trimmed.to_owned()))?;
    validate_count(Some(count), max)
}

/// Presentation status of the cell at `index`.
///
/// While a round is in progress only the player's own marks and hints show.
/// Once the answer is submitted every cell is classified against the
/// solution.
#[must_use]
pub fn tile_status(
    index: usize,
    selected: &BTreeSet<usize>,
    hinted: &BTreeSet<usize>,
    solution: &BTreeSet<usize>,
    status: GameStatus,
) -> TileStatus {
    let is_selected = selected.contains(&index);
    let is_solution = solution.contains(&index);

    match status {
        GameStatus::Checking | GameStatus::Won | GameStatus::Lost => {
            match (is_selected, is_solution) {
                (true, true) => TileStatus::Correct,
                (true, false) => TileStatus::Wrong,
                (false, true) => TileStatus::Missed,
                (false, false) => TileStatus::Plain,
            }
        }
        GameStatus::Idle | GameStatus::Playing | GameStatus::Paused => {
            if is_selected {
                TileStatus::Selected
            } else if hinted.contains(&index) {
                TileStatus::Hinted
            } else {
                TileStatus::Plain
            }
        }
    }
}
