#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use display::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod display;
mod engine;
mod error;
mod generator;
mod types;

/// Cells kept free of mines around the first click: the clicked cell and its 8 neighbors.
pub const SAFE_ZONE_CELLS: CellCount = 9;

/// Checks that a `(rows, cols, mines)` triple describes a playable board.
///
/// Mines must leave room for a full 3x3 safe zone around the first click, wherever it lands.
pub fn validate_config(
    rows: Coord,
    cols: Coord,
    mines: CellCount,
) -> core::result::Result<(), ConfigError> {
    if rows <= 0 || cols <= 0 {
        return Err(ConfigError::NonPositiveSize);
    }

    if mines < 0 {
        return Err(ConfigError::NegativeMines);
    }

    let total_cells = mult(rows, cols).ok_or(ConfigError::TooLarge)?;
    if mines >= total_cells {
        return Err(ConfigError::TooManyMines);
    }

    let max = (total_cells - SAFE_ZONE_CELLS).max(0);
    if mines > max {
        return Err(ConfigError::NoSafeZone { rows, cols, max });
    }

    Ok(())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    ) -> core::result::Result<Self, ConfigError> {
        validate_config(rows, cols, mines)?;
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        validate_config(self.rows, self.cols, self.mines)
    }

    pub const fn size(&self) -> (Coord, Coord) {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        match mult(self.rows, self.cols) {
            Some(total) => total,
            None => CellCount::MAX,
        }
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub const fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.rows, self.cols)
    }

    pub fn validate_position(&self, pos: Position) -> Result<Position> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(GameError::InvalidPosition(pos))
        }
    }

    /// Every position on the board, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

/// Standard board presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Beginner => GameConfig::new_unchecked(9, 9, 10),
            Intermediate => GameConfig::new_unchecked(16, 16, 40),
            Expert => GameConfig::new_unchecked(30, 16, 99),
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Beginner => "beginner",
            Intermediate => "intermediate",
            Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(ParseDifficultyError)
    }
}

/// A fixed set of mine positions on a board of known size.
///
/// Deserializing goes through [`MineLayout::from_mine_positions`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct MineLayout {
    rows: Coord,
    cols: Coord,
    mines: BTreeSet<Position>,
}

#[derive(Deserialize)]
struct RawLayout {
    rows: Coord,
    cols: Coord,
    mines: Vec<Position>,
}

impl TryFrom<RawLayout> for MineLayout {
    type Error = GameError;

    fn try_from(raw: RawLayout) -> Result<Self> {
        Self::from_mine_positions(raw.rows, raw.cols, raw.mines)
    }
}

impl MineLayout {
    /// Builds a layout, rejecting any position outside the board. Duplicates collapse into one mine.
    pub fn from_mine_positions<I>(rows: Coord, cols: Coord, mines: I) -> Result<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        if rows <= 0 || cols <= 0 {
            return Err(ConfigError::NonPositiveSize.into());
        }
        if mult(rows, cols).is_none() {
            return Err(ConfigError::TooLarge.into());
        }

        let mut mine_set = BTreeSet::new();
        for pos in mines {
            if !pos.is_within(rows, cols) {
                return Err(GameError::InvalidPosition(pos));
            }
            mine_set.insert(pos);
        }

        Ok(Self {
            rows,
            cols,
            mines: mine_set,
        })
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.rows, self.cols, self.mine_count())
    }

    pub const fn size(&self) -> (Coord, Coord) {
        (self.rows, self.cols)
    }

    pub fn mine_count(&self) -> CellCount {
        // bounded by rows * cols, which was checked to fit a CellCount
        self.mines.len() as CellCount
    }

    pub fn contains_mine(&self, pos: Position) -> bool {
        self.mines.contains(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.mines.iter().copied()
    }

    /// Number of mines around `pos`, not counting `pos` itself.
    pub fn adjacent_mine_count(&self, pos: Position) -> u8 {
        pos.neighbors(self.rows, self.cols)
            .filter(|&neighbor| self.contains_mine(neighbor))
            .count() as u8
    }
}
