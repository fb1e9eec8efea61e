#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Board generator that lays out targets and fillers according to a level rule.

use std::collections::BTreeSet;

use letter_hunt_core::{
    Board, ConfigurationError, DensityBand, GameMode, GeneratedBoard, LevelRule,
    PlacementStrategy, RowParityRule, TargetSet, DIGITS,
};
use letter_hunt_system_randomness::{choose, random_int, shuffle};
use log::debug;
use rand::Rng;

/// Builds a `board_size` by `board_size` board for `rule`.
///
/// Density levels place a target count drawn from `density` (or the clamped
/// `target_count` override) on randomly chosen cells. Row-parity levels draw a
/// digit for every cell and derive the solution from the parity rule.
///
/// Fails when the board is empty or the rule cannot be satisfied by its
/// alphabet; nothing is truncated silently.
pub fn generate<R>(
    board_size: usize,
    rule: &LevelRule,
    density: DensityBand,
    target_count: Option<usize>,
    rng: &mut R,
) -> Result<GeneratedBoard, ConfigurationError>
where
    R: Rng + ?Sized,
{
    if board_size == 0 {
        return Err(ConfigurationError::EmptyBoard);
    }

    match rule.placement() {
        PlacementStrategy::RowParity(parity) => {
            generate_row_parity(board_size, parity, rule.mode(), rng)
        }
        PlacementStrategy::UniformRandomDensity => {
            generate_uniform(board_size, rule, density, target_count, rng)
        }
    }
}

/// Chooses how many cells receive targets on a board of `cells` cells.
///
/// A requested count is clamped into the band; otherwise a count is drawn
/// uniformly from the band's bounds.
pub fn pick_target_count<R>(
    cells: usize,
    density: DensityBand,
    requested: Option<usize>,
    rng: &mut R,
) -> usize
where
    R: Rng + ?Sized,
{
    match requested {
        Some(requested) => density.clamp(requested, cells),
        None => {
            let (low, high) = density.count_bounds(cells);
            random_int(low, high, rng)
        }
    }
}

/// Picks up to `count` solution cells that are not in `excluded`, in random order.
pub fn pick_hints<R>(
    solution: &BTreeSet<usize>,
    excluded: &BTreeSet<usize>,
    count: usize,
    rng: &mut R,
) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    let candidates: Vec<usize> = solution.difference(excluded).copied().collect();
    shuffle(&candidates, rng).into_iter().take(count).collect()
}

fn generate_uniform<R>(
    board_size: usize,
    rule: &LevelRule,
    density: DensityBand,
    target_count: Option<usize>,
    rng: &mut R,
) -> Result<GeneratedBoard, ConfigurationError>
where
    R: Rng + ?Sized,
{
    let level = rule.level().get();
    let pool = rule.target_pool();
    let requested_types = rule.target_type_count();
    if requested_types == 0 || requested_types > pool.len() {
        return Err(ConfigurationError::TargetTypesExceedAlphabet {
            level,
            requested: requested_types,
            available: pool.len(),
        });
    }

    let targets: Vec<char> = shuffle(pool, rng)
        .into_iter()
        .take(requested_types)
        .collect();
    let fillers: Vec<char> = rule
        .target_alphabet()
        .iter()
        .copied()
        .filter(|symbol| !targets.contains(symbol))
        .collect();
    if fillers.is_empty() {
        return Err(ConfigurationError::EmptyFillerAlphabet { level });
    }

    let cells = board_size.saturating_mul(board_size);
    let count = pick_target_count(cells, density, target_count, rng);
    let indices: Vec<usize> = (0..cells).collect();
    let solution: BTreeSet<usize> = shuffle(&indices, rng).into_iter().take(count).collect();

    let mut symbols = Vec::with_capacity(cells);
    for index in 0..cells {
        let source = if solution.contains(&index) {
            &targets
        } else {
            &fillers
        };
        let symbol =
            choose(source, rng).ok_or(ConfigurationError::EmptyFillerAlphabet { level })?;
        symbols.push(symbol);
    }

    debug!(
        "generated level {level} board: {count} target cells for {:?} (requested {:?}, band {:.0}%..={:.0}%)",
        targets,
        target_count,
        density.min() * 100.0,
        density.max() * 100.0
    );

    Ok(GeneratedBoard {
        board: Board::from_cells(board_size, symbols)?,
        targets: TargetSet::Characters(targets),
        solution,
    })
}

fn generate_row_parity<R>(
    board_size: usize,
    parity: RowParityRule,
    mode: GameMode,
    rng: &mut R,
) -> Result<GeneratedBoard, ConfigurationError>
where
    R: Rng + ?Sized,
{
    let cells = board_size.saturating_mul(board_size);
    let mut symbols = Vec::with_capacity(cells);
    let mut solution = BTreeSet::new();

    for row in 0..board_size {
        for column in 0..board_size {
            let digit = random_int(0, DIGITS.len() - 1, rng);
            symbols.push(DIGITS[digit]);
            if parity.is_solution(row, digit as u32, mode) {
                let _ = solution.insert(row * board_size + column);
            }
        }
    }

    debug!(
        "generated {parity:?} row-parity board in {mode} mode: {} solution cells",
        solution.len()
    );

    Ok(GeneratedBoard {
        board: Board::from_cells(board_size, symbols)?,
        targets: TargetSet::RowParity(parity),
        solution,
    })
}

#[cfg(test)]
mod tests {
    use letter_hunt_core::{Level, RuleKind};
    use letter_hunt_system_randomness::seeded;

    use super::*;

    #[test]
    fn requested_count_is_clamped_into_band() {
        let mut rng = seeded(5);
        let band = DensityBand::default();
        assert_eq!(pick_target_count(225, band, Some(3), &mut rng), 56);
        assert_eq!(pick_target_count(225, band, Some(400), &mut rng), 68);
        assert_eq!(pick_target_count(225, band, Some(61), &mut rng), 61);
    }

    #[test]
    fn zero_target_types_is_a_configuration_error() {
        let rule = LevelRule::new(
            Level::new(1),
            GameMode::Selection,
            RuleKind::Letters { target_types: 0 },
        );
        let result = generate(15, &rule, DensityBand::default(), None, &mut seeded(1));
        assert!(matches!(
            result,
            Err(ConfigurationError::TargetTypesExceedAlphabet { requested: 0, .. })
        ));
    }

    #[test]
    fn hints_skip_excluded_cells() {
        let solution: BTreeSet<usize> = [1, 4, 9, 16].into_iter().collect();
        let excluded: BTreeSet<usize> = [4, 9].into_iter().collect();
        let hints = pick_hints(&solution, &excluded, 5, &mut seeded(2));
        let mut sorted = hints.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 16]);
    }
}
