#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomness primitives every randomized placement builds on.
//!
//! All helpers take the random source as an argument so callers can inject a
//! seeded [`ChaCha8Rng`] and replay exact boards.

use rand::{distributions::uniform::SampleUniform, Rng, SeedableRng};
pub use rand_chacha::ChaCha8Rng;

/// Returns a uniformly random permutation of `items`, leaving the input untouched.
///
/// Walks from the last index down to 1 and swaps each element with a uniformly
/// chosen element at or before it (Fisher-Yates).
pub fn shuffle<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut shuffled = items.to_vec();
    for index in (1..shuffled.len()).rev() {
        let swap_index = random_int(0, index, rng);
        shuffled.swap(index, swap_index);
    }
    shuffled
}

/// Returns a uniformly distributed value in the closed interval `[min, max]`.
///
/// An empty interval (`max < min`) collapses to `min`.
pub fn random_int<T, R>(min: T, max: T, rng: &mut R) -> T
where
    T: SampleUniform + PartialOrd + Copy,
    R: Rng + ?Sized,
{
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Picks one element uniformly, or `None` when the slice is empty.
pub fn choose<T, R>(items: &[T], rng: &mut R) -> Option<T>
where
    T: Copy,
    R: Rng + ?Sized,
{
    let last = items.len().checked_sub(1)?;
    items.get(random_int(0, last, rng)).copied()
}

/// Creates a deterministic random source from a seed.
#[must_use]
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Creates a random source seeded from operating-system entropy.
#[must_use]
pub fn from_entropy() -> ChaCha8Rng {
    ChaCha8Rng::from_entropy()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_preserves_elements_and_input() {
        let mut rng = seeded(7);
        let input: Vec<u32> = (0..50).collect();
        let mut shuffled = shuffle(&input, &mut rng);
        assert_eq!(input, (0..50).collect::<Vec<u32>>());
        shuffled.sort_unstable();
        assert_eq!(shuffled, input);
    }

    #[test]
    fn shuffle_is_deterministic_for_same_seed() {
        let input: Vec<char> = ('A'..='Z').collect();
        let first = shuffle(&input, &mut seeded(99));
        let second = shuffle(&input, &mut seeded(99));
        assert_eq!(first, second);
    }

    #[test]
    fn shuffle_handles_empty_and_single_inputs() {
        let mut rng = seeded(1);
        assert!(shuffle::<u8, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffle(&[42], &mut rng), vec![42]);
    }

    #[test]
    fn random_int_stays_within_closed_interval() {
        let mut rng = seeded(3);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2_000 {
            let value = random_int(56_usize, 68, &mut rng);
            assert!((56..=68).contains(&value));
            seen_min |= value == 56;
            seen_max |= value == 68;
        }
        assert!(seen_min && seen_max, "both interval ends should be reachable");
    }

    #[test]
    fn random_int_collapses_empty_interval() {
        let mut rng = seeded(3);
        assert_eq!(random_int(5_i64, 5, &mut rng), 5);
        assert_eq!(random_int(9_i64, 2, &mut rng), 9);
    }

    #[test]
    fn choose_returns_none_for_empty_slice() {
        let mut rng = seeded(11);
        assert_eq!(choose::<char, _>(&[], &mut rng), None);
        assert_eq!(choose(&['x'], &mut rng), Some('x'));
    }
}
