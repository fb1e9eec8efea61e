use std::collections::BTreeSet;

use letter_hunt_core::{
    ConfigurationError, DensityBand, GameMode, Level, LevelRule, PlacementStrategy,
    RowParityRule, RuleKind, TargetSet, DIGITS, LETTERS,
};
use letter_hunt_system_board_generation::generate;
use letter_hunt_system_level_rules::rules_for;
use letter_hunt_system_randomness::seeded;

fn rule(level: u32, mode: GameMode) -> LevelRule {
    rules_for(Level::new(level), mode)
}

fn digit_at(symbol: char) -> u32 {
    symbol.to_digit(10).expect("row-parity boards hold digits only")
}

#[test]
fn solution_cells_hold_targets_and_other_cells_hold_fillers() {
    for level in 1..=8 {
        for seed in 0..8_u64 {
            let rule = rule(level, GameMode::Selection);
            let generated = generate(15, &rule, DensityBand::default(), None, &mut seeded(seed))
                .expect("density levels generate");
            let targets = generated.targets.characters();
            assert_eq!(targets.len(), rule.target_type_count());

            for (index, symbol) in generated.board.cells().iter().enumerate() {
                let is_target = targets.contains(symbol);
                assert_eq!(
                    is_target,
                    generated.solution.contains(&index),
                    "level {level} seed {seed}: cell {index} holds {symbol}"
                );
                assert!(rule.target_alphabet().contains(symbol));
            }
        }
    }
}

#[test]
fn default_band_keeps_target_count_between_56_and_68() {
    for seed in 0..64_u64 {
        let generated = generate(
            15,
            &rule(1, GameMode::Selection),
            DensityBand::default(),
            None,
            &mut seeded(seed),
        )
        .expect("level 1 generates");
        let count = generated.solution.len();
        assert!((56..=68).contains(&count), "seed {seed} produced {count}");
    }
}

#[test]
fn level_one_uses_a_single_letter_target() {
    let generated = generate(
        15,
        &rule(1, GameMode::Selection),
        DensityBand::default(),
        None,
        &mut seeded(21),
    )
    .expect("level 1 generates");
    let targets = generated.targets.characters();
    assert_eq!(targets.len(), 1);
    assert!(LETTERS.contains(&targets[0]));
    assert_eq!(generated.board.len(), 225);
}

#[test]
fn target_count_override_is_clamped_into_band() {
    let band = DensityBand::default();
    let low = generate(15, &rule(2, GameMode::Selection), band, Some(1), &mut seeded(3))
        .expect("generates");
    assert_eq!(low.solution.len(), 56);

    let high = generate(15, &rule(2, GameMode::Selection), band, Some(200), &mut seeded(3))
        .expect("generates");
    assert_eq!(high.solution.len(), 68);

    let exact = generate(15, &rule(2, GameMode::Selection), band, Some(60), &mut seeded(3))
        .expect("generates");
    assert_eq!(exact.solution.len(), 60);
}

#[test]
fn even_and_odd_levels_split_digits_by_parity() {
    let even = generate(
        15,
        &rule(7, GameMode::Selection),
        DensityBand::default(),
        None,
        &mut seeded(4),
    )
    .expect("level 7 generates");
    for (index, symbol) in even.board.cells().iter().enumerate() {
        assert_eq!(digit_at(*symbol) % 2 == 0, even.solution.contains(&index));
    }

    let odd = generate(
        15,
        &rule(8, GameMode::Selection),
        DensityBand::default(),
        None,
        &mut seeded(4),
    )
    .expect("level 8 generates");
    for (index, symbol) in odd.board.cells().iter().enumerate() {
        assert_eq!(digit_at(*symbol) % 2 == 1, odd.solution.contains(&index));
    }
}

#[test]
fn row_parity_solution_follows_row_and_digit_parity() {
    for (level, parity) in [(9, RowParityRule::Matching), (10, RowParityRule::Crossed)] {
        for seed in 0..8_u64 {
            let generated = generate(
                15,
                &rule(level, GameMode::Selection),
                DensityBand::default(),
                None,
                &mut seeded(seed),
            )
            .expect("row-parity levels generate");
            assert_eq!(generated.targets, TargetSet::RowParity(parity));

            for (index, symbol) in generated.board.cells().iter().enumerate() {
                assert!(DIGITS.contains(symbol));
                let (row, _) = generated.board.position(index).expect("on board");
                let even_row = row % 2 == 0;
                let even_digit = digit_at(*symbol) % 2 == 0;
                let expected = match parity {
                    RowParityRule::Matching => even_row == even_digit,
                    RowParityRule::Crossed => even_row != even_digit,
                };
                assert_eq!(expected, generated.solution.contains(&index));
            }
        }
    }
}

#[test]
fn count_mode_row_parity_counts_a_single_row_class() {
    let matching = generate(
        15,
        &rule(9, GameMode::Count),
        DensityBand::default(),
        None,
        &mut seeded(8),
    )
    .expect("level 9 generates");
    for &index in &matching.solution {
        let (row, _) = matching.board.position(index).expect("on board");
        let symbol = matching.board.cell(index).expect("on board");
        assert_eq!(row % 2, 0);
        assert_eq!(digit_at(symbol) % 2, 0);
    }

    let crossed = generate(
        15,
        &rule(10, GameMode::Count),
        DensityBand::default(),
        None,
        &mut seeded(8),
    )
    .expect("level 10 generates");
    for (index, symbol) in crossed.board.cells().iter().enumerate() {
        let (row, _) = crossed.board.position(index).expect("on board");
        let expected = row % 2 == 1 && digit_at(*symbol) % 2 == 1;
        assert_eq!(expected, crossed.solution.contains(&index));
    }
}

#[test]
fn placement_strategy_selects_the_algorithm() {
    for level in 1..=10 {
        let rule = rule(level, GameMode::Selection);
        let generated = generate(15, &rule, DensityBand::default(), None, &mut seeded(3))
            .expect("every table level generates");
        match rule.placement() {
            PlacementStrategy::RowParity(parity) => {
                assert_eq!(generated.targets, TargetSet::RowParity(parity));
                assert!(generated.board.cells().iter().all(|symbol| DIGITS.contains(symbol)));
            }
            PlacementStrategy::UniformRandomDensity => {
                assert!(matches!(generated.targets, TargetSet::Characters(_)));
                let (low, high) = DensityBand::default().count_bounds(225);
                assert!((low..=high).contains(&generated.solution.len()));
            }
        }
    }
}

#[test]
fn same_seed_generates_identical_boards() {
    for level in [1, 5, 6, 9] {
        let first = generate(
            15,
            &rule(level, GameMode::Selection),
            DensityBand::default(),
            None,
            &mut seeded(0xfeed),
        )
        .expect("generates");
        let second = generate(
            15,
            &rule(level, GameMode::Selection),
            DensityBand::default(),
            None,
            &mut seeded(0xfeed),
        )
        .expect("generates");
        assert_eq!(first, second, "level {level} diverged");
    }
}

#[test]
fn rejects_more_target_types_than_the_pool_holds() {
    let rule = LevelRule::new(
        Level::new(5),
        GameMode::Selection,
        RuleKind::Numbers { target_types: 11 },
    );
    let error = generate(15, &rule, DensityBand::default(), None, &mut seeded(1))
        .expect_err("eleven digits do not exist");
    assert_eq!(
        error,
        ConfigurationError::TargetTypesExceedAlphabet {
            level: 5,
            requested: 11,
            available: 10,
        }
    );
}

#[test]
fn rejects_rules_that_leave_no_fillers() {
    let rule = LevelRule::new(
        Level::new(5),
        GameMode::Selection,
        RuleKind::Numbers { target_types: 10 },
    );
    let error = generate(15, &rule, DensityBand::default(), None, &mut seeded(1))
        .expect_err("no filler digits remain");
    assert_eq!(error, ConfigurationError::EmptyFillerAlphabet { level: 5 });
}

#[test]
fn rejects_empty_board() {
    let error = generate(
        0,
        &rule(1, GameMode::Selection),
        DensityBand::default(),
        None,
        &mut seeded(1),
    )
    .expect_err("zero-sized board");
    assert_eq!(error, ConfigurationError::EmptyBoard);
}

#[test]
fn tiny_boards_still_respect_the_band() {
    let generated = generate(
        2,
        &rule(3, GameMode::Selection),
        DensityBand::default(),
        None,
        &mut seeded(9),
    )
    .expect("2x2 board generates");
    let expected: BTreeSet<usize> = (0..4)
        .filter(|index| {
            generated
                .targets
                .characters()
                .contains(&generated.board.cells()[*index])
        })
        .collect();
    assert_eq!(generated.solution, expected);
    assert_eq!(generated.solution.len(), 1);
}
