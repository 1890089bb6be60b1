use thiserror::Error;

use crate::{CellCount, Coord, Position};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid position {0}")]
    InvalidPosition(Position),
    #[error("Not enough space to place {mines} mines, only {available} cells available")]
    InsufficientSpace {
        mines: CellCount,
        available: CellCount,
    },
    #[error("Mine layout does not match the board size")]
    InvalidBoardShape,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Reason a `(rows, cols, mines)` triple is not playable.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Rows and columns must be positive")]
    NonPositiveSize,
    #[error("Number of mines cannot be negative")]
    NegativeMines,
    #[error("Too many mines for the grid size")]
    TooManyMines,
    #[error("Maximum {max} mines allowed for {rows}x{cols} grid")]
    NoSafeZone {
        rows: Coord,
        cols: Coord,
        max: CellCount,
    },
    #[error("Grid is too large")]
    TooLarge,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Unknown difficulty, expected one of: beginner, intermediate, expert")]
pub struct ParseDifficultyError;
