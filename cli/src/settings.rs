use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use sweeper_core::{CellCount, ConfigError, Coord, Difficulty, GameConfig};

/// Settings file contents, every key optional.
///
/// ```toml
/// difficulty = "intermediate"
/// seed = 42
///
/// [board]
/// rows = 12
/// cols = 20
/// mines = 30
/// ```
///
/// A `[board]` table takes precedence over `difficulty`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub board: Option<BoardSettings>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardSettings {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Could not parse settings in {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        match self.board {
            Some(board) => GameConfig::new(board.rows, board.cols, board.mines),
            None => Ok(self.difficulty.config()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_beginner() {
        let settings = Settings::from_toml("").unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.game_config(), Ok(Difficulty::Beginner.config()));
    }

    #[test]
    fn difficulty_and_seed_are_read() {
        let settings = Settings::from_toml("difficulty = \"expert\"\nseed = 7\n").unwrap();

        assert_eq!(settings.difficulty, Difficulty::Expert);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.game_config(), Ok(GameConfig::new_unchecked(30, 16, 99)));
    }

    #[test]
    fn custom_board_overrides_difficulty() {
        let text = "difficulty = \"expert\"\n[board]\nrows = 12\ncols = 20\nmines = 30\n";
        let settings = Settings::from_toml(text).unwrap();

        assert_eq!(settings.game_config(), Ok(GameConfig::new_unchecked(12, 20, 30)));
    }

    #[test]
    fn unplayable_custom_board_reports_reason() {
        let text = "[board]\nrows = 3\ncols = 3\nmines = 9\n";
        let settings = Settings::from_toml(text).unwrap();

        assert_eq!(settings.game_config(), Err(ConfigError::TooManyMines));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_toml("colour = \"red\"\n").is_err());
        assert!(Settings::from_toml("difficulty = \"nightmare\"\n").is_err());
    }
}
