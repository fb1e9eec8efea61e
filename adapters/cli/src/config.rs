use std::{fs, path::Path};

use anyhow::{Context, Result};
use letter_hunt_core::{GameConfig, GameMode, Level};

/// Settings given on the command line that take precedence over the file.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) level: Option<u32>,
    pub(crate) mode: Option<GameMode>,
    pub(crate) seed: Option<u64>,
    pub(crate) board_size: Option<usize>,
}

/// Loads the game settings, falling back to defaults when no file is given.
pub(crate) fn load(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read game config at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid game config at {}", path.display()))
}

fn parse(contents: &str) -> Result<GameConfig> {
    let config: GameConfig =
        toml::from_str(contents).context("failed to parse game config toml contents")?;
    config
        .validate()
        .context("game config cannot produce boards")?;
    Ok(config)
}

/// Applies command-line overrides and re-validates the result.
pub(crate) fn apply_overrides(config: &mut GameConfig, overrides: Overrides) -> Result<()> {
    if let Some(level) = overrides.level {
        config.starting_level = Level::new(level);
    }
    if let Some(mode) = overrides.mode {
        config.default_mode = mode;
    }
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(board_size) = overrides.board_size {
        config.board_size = board_size;
    }
    config
        .validate()
        .context("command-line settings cannot produce boards")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse(
            r#"
            board_size = 9
            default_mode = "count"
            starting_level = 7
            "#,
        )
        .expect("config parses");

        assert_eq!(config.board_size, 9);
        assert_eq!(config.default_mode, GameMode::Count);
        assert_eq!(config.starting_level, Level::new(7));
        assert_eq!(config.reveal_delay_ms, 1_500);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse("bord_size = 9").is_err());
    }

    #[test]
    fn inverted_density_band_is_rejected() {
        let error = parse(
            r#"
            min_target_percentage = 0.5
            max_target_percentage = 0.1
            "#,
        )
        .expect_err("inverted band");
        assert!(format!("{error:#}").contains("density band"));
    }

    #[test]
    fn overrides_take_precedence() {
        let mut config = parse("board_size = 9\nseed = 4").expect("config parses");
        apply_overrides(
            &mut config,
            Overrides {
                level: Some(0),
                mode: Some(GameMode::Count),
                seed: Some(12),
                board_size: None,
            },
        )
        .expect("overrides are valid");

        assert_eq!(config.starting_level, Level::FIRST);
        assert_eq!(config.default_mode, GameMode::Count);
        assert_eq!(config.seed, Some(12));
        assert_eq!(config.board_size, 9);
    }

    #[test]
    fn zero_board_size_override_is_rejected() {
        let mut config = GameConfig::default();
        let overrides = Overrides {
            board_size: Some(0),
            ..Overrides::default()
        };
        assert!(apply_overrides(&mut config, overrides).is_err());
    }
}
