#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Score formulas for resolved rounds.

use std::time::Duration;

use letter_hunt_core::Level;

/// Seconds after which no time bonus is awarded.
pub const TIME_BONUS_WINDOW_SECS: f64 = 300.0;

const SELECTION_ACCURACY_POINTS: f64 = 1_000.0;
const SELECTION_TIME_POINTS_PER_SEC: f64 = 2.0;
const SELECTION_POINTS_PER_TARGET: f64 = 500.0;
const EFFICIENT_MOVE_BUDGET: f64 = 100.0;
const POINTS_PER_SPARED_MOVE: f64 = 5.0;

const COUNT_BASE_POINTS: f64 = 1_000.0;
const COUNT_TIME_POINTS_PER_SEC: f64 = 3.0;
const COUNT_POINTS_PER_TARGET: f64 = 300.0;

fn time_bonus(elapsed: Duration, points_per_sec: f64) -> f64 {
    (TIME_BONUS_WINDOW_SECS - elapsed.as_secs_f64()).max(0.0) * points_per_sec
}

fn scaled(points: f64, level: Level) -> u64 {
    (points * f64::from(level.get())).round() as u64
}

/// Score of a resolved selection round.
///
/// Rewards accuracy, speed within the bonus window, the number of solution
/// cells and a small move count, then multiplies by the level.
#[must_use]
pub fn selection_score(
    accuracy: f64,
    elapsed: Duration,
    level: Level,
    moves: u32,
    solution_count: usize,
) -> u64 {
    let base = accuracy.clamp(0.0, 1.0) * SELECTION_ACCURACY_POINTS;
    let difficulty = solution_count as f64 * SELECTION_POINTS_PER_TARGET;
    let efficiency = (EFFICIENT_MOVE_BUDGET - f64::from(moves)).max(0.0) * POINTS_PER_SPARED_MOVE;
    scaled(
        base + time_bonus(elapsed, SELECTION_TIME_POINTS_PER_SEC) + difficulty + efficiency,
        level,
    )
}

/// Score of a resolved count round; wrong guesses score zero.
#[must_use]
pub fn count_score(correct: bool, elapsed: Duration, level: Level, solution_count: usize) -> u64 {
    if !correct {
        return 0;
    }
    let difficulty = solution_count as f64 * COUNT_POINTS_PER_TARGET;
    scaled(
        COUNT_BASE_POINTS + time_bonus(elapsed, COUNT_TIME_POINTS_PER_SEC) + difficulty,
        level,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_fast_selection_round() {
        // (1000 + 600 + 3 * 500 + 97 * 5) * 2
        let score = selection_score(1.0, Duration::ZERO, Level::new(2), 3, 3);
        assert_eq!(score, 7_170);
    }

    #[test]
    fn slow_selection_round_loses_time_bonus() {
        // (500 + 0 + 60 * 500 + 0) * 1
        let score = selection_score(0.5, Duration::from_secs(400), Level::FIRST, 150, 60);
        assert_eq!(score, 30_500);
    }

    #[test]
    fn count_round_scores_only_when_correct() {
        assert_eq!(count_score(false, Duration::ZERO, Level::new(9), 40), 0);
        // (1000 + 280 * 3 + 40 * 300) * 3
        let score = count_score(true, Duration::from_secs(20), Level::new(3), 40);
        assert_eq!(score, 41_520);
    }

    #[test]
    fn fractional_seconds_round_to_nearest_point() {
        // (1000 + 299.75 * 2 + 500 + 0) * 1 = 2099.5
        let score = selection_score(1.0, Duration::from_millis(250), Level::FIRST, 100, 1);
        assert_eq!(score, 2_100);
    }

    #[test]
    fn score_never_increases_with_time() {
        let mut previous = u64::MAX;
        for seconds in (0..400).step_by(7) {
            let elapsed = Duration::from_secs(seconds);
            let score = selection_score(0.8, elapsed, Level::new(4), 60, 62);
            assert!(score <= previous);
            previous = score;
        }

        let mut previous = u64::MAX;
        for seconds in (0..400).step_by(7) {
            let score = count_score(true, Duration::from_secs(seconds), Level::new(4), 62);
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn score_never_decreases_with_level() {
        let elapsed = Duration::from_secs(45);
        let mut previous = 0;
        for level in 1..=12 {
            let score = selection_score(0.9, elapsed, Level::new(level), 70, 58);
            assert!(score >= previous);
            previous = score;
        }

        let mut previous = 0;
        for level in 1..=12 {
            let score = count_score(true, elapsed, Level::new(level), 58);
            assert!(score >= previous);
            previous = score;
        }
    }
}
