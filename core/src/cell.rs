use serde::{Deserialize, Serialize};

/// Cell value marking a mine.
pub const MINE_VALUE: i8 = -1;

/// Cell value of a safe cell with no adjacent mines.
pub const EMPTY_VALUE: i8 = 0;

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

/// One slot of the board: its mine/count value and what the player sees.
///
/// `value` is [`MINE_VALUE`] for a mine, otherwise the number of adjacent mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Cell {
    pub value: i8,
    pub state: CellState,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.value == MINE_VALUE
    }

    pub const fn is_empty(self) -> bool {
        self.value == EMPTY_VALUE
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    /// Adjacent mine count, `None` for a mine.
    pub fn adjacent_mines(self) -> Option<u8> {
        u8::try_from(self.value).ok()
    }
}
