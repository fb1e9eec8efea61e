#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure rule table mapping a level and game mode to its target rules.

use letter_hunt_core::{GameMode, Level, LevelRule, RowParityRule, RuleKind};

/// Highest level with its own rule. Later levels reuse this level's rule.
pub const MAX_DEFINED_LEVEL: u32 = 10;

/// Distinct targets used by the number and symbol levels.
const FIXED_TARGET_TYPES: usize = 4;

/// Resolves the rule for `level` in `mode`.
///
/// Levels 1 to 4 ask for one to four distinct letters. Level 5 asks for four
/// digits and level 6 for four symbols. Levels 7 and 8 ask for every even or
/// every odd digit. Levels 9 and 10 use the row-parity rules. Levels past
/// [`MAX_DEFINED_LEVEL`] saturate to its rule.
#[must_use]
pub fn rules_for(level: Level, mode: GameMode) -> LevelRule {
    let kind = match level.get().min(MAX_DEFINED_LEVEL) {
        0 | 1 => RuleKind::Letters { target_types: 1 },
        value @ 2..=4 => RuleKind::Letters {
            target_types: value as usize,
        },
        5 => RuleKind::Numbers {
            target_types: FIXED_TARGET_TYPES,
        },
        6 => RuleKind::Symbols {
            target_types: FIXED_TARGET_TYPES,
        },
        7 => RuleKind::EvenNumbers,
        8 => RuleKind::OddNumbers,
        9 => RuleKind::RowParity(RowParityRule::Matching),
        _ => RuleKind::RowParity(RowParityRule::Crossed),
    };
    LevelRule::new(level, mode, kind)
}

/// Player-facing instruction for a rule.
#[must_use]
pub fn instruction(rule: &LevelRule) -> &'static str {
    match (rule.kind(), rule.mode()) {
        (RuleKind::Letters { .. }, GameMode::Selection) => "Find every target letter",
        (RuleKind::Letters { .. }, GameMode::Count) => "Count every target letter",
        (RuleKind::Numbers { .. }, GameMode::Selection) => "Find every target number",
        (RuleKind::Numbers { .. }, GameMode::Count) => "Count every target number",
        (RuleKind::Symbols { .. }, GameMode::Selection) => "Find every target symbol",
        (RuleKind::Symbols { .. }, GameMode::Count) => "Count every target symbol",
        (RuleKind::EvenNumbers, GameMode::Selection) => "Find every even number",
        (RuleKind::EvenNumbers, GameMode::Count) => "Count every even number",
        (RuleKind::OddNumbers, GameMode::Selection) => "Find every odd number",
        (RuleKind::OddNumbers, GameMode::Count) => "Count every odd number",
        (RuleKind::RowParity(RowParityRule::Matching), GameMode::Selection) => {
            "On even rows mark the even numbers, on odd rows mark the odd numbers. Rows start at 0"
        }
        (RuleKind::RowParity(RowParityRule::Matching), GameMode::Count) => {
            "Count the even numbers on the even rows. Rows start at 0"
        }
        (RuleKind::RowParity(RowParityRule::Crossed), GameMode::Selection) => {
            "On even rows mark the odd numbers, on odd rows mark the even numbers. Rows start at 0"
        }
        (RuleKind::RowParity(RowParityRule::Crossed), GameMode::Count) => {
            "Count the odd numbers on the odd rows. Rows start at 0"
        }
    }
}

/// Reports whether the target characters should be shown to the player.
///
/// The parity levels describe their targets in words only.
#[must_use]
pub fn shows_target_characters(rule: &LevelRule) -> bool {
    matches!(
        rule.kind(),
        RuleKind::Letters { .. } | RuleKind::Numbers { .. } | RuleKind::Symbols { .. }
    )
}
