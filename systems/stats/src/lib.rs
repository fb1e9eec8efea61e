#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Statistics observer that aggregates resolved rounds from session events.

use std::time::Duration;

use letter_hunt_core::{Event, GameObserver};

/// Running totals over every round resolved while the observer was attached.
///
/// Nothing is persisted; collaborators that keep statistics across runs read
/// the accessors and store the numbers themselves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stats {
    games_played: u32,
    games_won: u32,
    best_time: Option<Duration>,
    total_winning_time: Duration,
    total_moves: u64,
    accuracy_sum: f64,
    best_score: Option<u64>,
}

impl Stats {
    /// Creates an observer with no recorded rounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a batch of session events into the totals.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            self.record(event);
        }
    }

    fn record(&mut self, event: &Event) {
        match event {
            Event::AnswerChecked {
                score,
                accuracy,
                moves,
                ..
            } => {
                self.games_played = self.games_played.saturating_add(1);
                self.total_moves = self.total_moves.saturating_add(u64::from(*moves));
                self.accuracy_sum += accuracy;
                self.best_score = Some(self.best_score.map_or(*score, |best| best.max(*score)));
            }
            Event::GameCompleted { elapsed, .. } => {
                self.games_won = self.games_won.saturating_add(1);
                self.total_winning_time = self.total_winning_time.saturating_add(*elapsed);
                self.best_time = Some(self.best_time.map_or(*elapsed, |best| best.min(*elapsed)));
            }
            _ => {}
        }
    }

    /// Rounds resolved, won or lost.
    #[must_use]
    pub const fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Rounds won.
    #[must_use]
    pub const fn games_won(&self) -> u32 {
        self.games_won
    }

    /// Share of resolved rounds that were won.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        (self.games_played > 0).then(|| f64::from(self.games_won) / f64::from(self.games_played))
    }

    /// Fastest winning round.
    #[must_use]
    pub const fn best_time(&self) -> Option<Duration> {
        self.best_time
    }

    /// Mean round clock over winning rounds.
    #[must_use]
    pub fn average_winning_time(&self) -> Option<Duration> {
        (self.games_won > 0).then(|| self.total_winning_time / self.games_won)
    }

    /// Moves summed over every resolved round.
    #[must_use]
    pub const fn total_moves(&self) -> u64 {
        self.total_moves
    }

    /// Mean accuracy over every resolved round.
    #[must_use]
    pub fn average_accuracy(&self) -> Option<f64> {
        (self.games_played > 0).then(|| self.accuracy_sum / f64::from(self.games_played))
    }

    /// Highest score of any resolved round.
    #[must_use]
    pub const fn best_score(&self) -> Option<u64> {
        self.best_score
    }
}

impl GameObserver for Stats {
    fn observe(&mut self, event: &Event) {
        self.record(event);
    }
}

#[cfg(test)]
mod tests {
    use letter_hunt_core::Level;

    use super::*;

    fn checked(correct: bool, score: u64, accuracy: f64, secs: u64, moves: u32) -> Event {
        Event::AnswerChecked {
            correct,
            score,
            accuracy,
            elapsed: Duration::from_secs(secs),
            moves,
            level: Level::FIRST,
        }
    }

    #[test]
    fn empty_stats_have_no_averages() {
        let stats = Stats::new();
        assert_eq!(stats.games_played(), 0);
        assert_eq!(stats.win_rate(), None);
        assert_eq!(stats.average_accuracy(), None);
        assert_eq!(stats.average_winning_time(), None);
        assert_eq!(stats.best_score(), None);
    }

    #[test]
    fn aggregates_wins_and_losses() {
        let mut stats = Stats::new();
        stats.handle(&[
            checked(true, 4_000, 1.0, 40, 60),
            Event::GameCompleted {
                elapsed: Duration::from_secs(40),
                score: 4_000,
            },
            checked(false, 1_500, 0.5, 90, 30),
            checked(true, 3_000, 1.0, 20, 58),
            Event::GameCompleted {
                elapsed: Duration::from_secs(20),
                score: 3_000,
            },
        ]);

        assert_eq!(stats.games_played(), 3);
        assert_eq!(stats.games_won(), 2);
        assert_eq!(stats.best_time(), Some(Duration::from_secs(20)));
        assert_eq!(stats.average_winning_time(), Some(Duration::from_secs(30)));
        assert_eq!(stats.total_moves(), 148);
        assert_eq!(stats.best_score(), Some(4_000));
        let accuracy = stats.average_accuracy().expect("rounds recorded");
        assert!((accuracy - 2.5 / 3.0).abs() < 1e-9);
    }
}
