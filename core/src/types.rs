use core::fmt;

use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board rows/columns and positions.
///
/// Signed so that positions just off the board, like `(-1, 0)`, can be expressed and rejected.
pub type Coord = i32;

/// Count type used for mine counts, cell counts and the stats counters.
pub type CellCount = i32;

/// A `(row, col)` location on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: Coord,
    pub col: Coord,
}

impl Position {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    pub const fn is_within(self, rows: Coord, cols: Coord) -> bool {
        self.row >= 0 && self.row < rows && self.col >= 0 && self.col < cols
    }

    /// Neighbors at Chebyshev distance 1 that fall inside a `rows` x `cols` board.
    pub fn neighbors(self, rows: Coord, cols: Coord) -> NeighborIter {
        NeighborIter::new(self, (rows, cols))
    }
}

impl From<(Coord, Coord)> for Position {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Position {
    type Output = [usize; 2];

    /// Only meaningful for positions already checked to be on the board.
    fn to_nd_index(self) -> Self::Output {
        [self.row as usize, self.col as usize]
    }
}

/// Multiplies two board dimensions, `None` when the product does not fit a [`CellCount`].
pub const fn mult(a: Coord, b: Coord) -> Option<CellCount> {
    a.checked_mul(b)
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: Position, delta: (Coord, Coord), bounds: (Coord, Coord)) -> Option<Position> {
    let (rows, cols) = bounds;
    let next = Position::new(pos.row.checked_add(delta.0)?, pos.col.checked_add(delta.1)?);
    next.is_within(rows, cols).then_some(next)
}

#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Position,
    bounds: (Coord, Coord),
    index: u8,
}

impl NeighborIter {
    fn new(center: Position, bounds: (Coord, Coord)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(DISPLACEMENTS.len() - usize::from(self.index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    fn neighbor_set(pos: Position, rows: Coord, cols: Coord) -> BTreeSet<Position> {
        pos.neighbors(rows, cols).collect()
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let found = neighbor_set(Position::new(1, 1), 3, 3);

        assert_eq!(found.len(), 8);
        assert!(!found.contains(&Position::new(1, 1)));
    }

    #[test]
    fn corner_cell_is_clipped_to_board() {
        let found = neighbor_set(Position::new(0, 0), 5, 5);
        let expected = BTreeSet::from([
            Position::new(0, 1),
            Position::new(1, 0),
            Position::new(1, 1),
        ]);

        assert_eq!(found, expected);
    }

    #[test]
    fn edge_cell_does_not_wrap_around() {
        let found = neighbor_set(Position::new(2, 4), 5, 5);

        assert_eq!(found.len(), 5);
        assert!(found.iter().all(|pos| pos.col >= 3 && pos.col <= 4));
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(Position::new(0, 0).neighbors(1, 1).count(), 0);
    }

    #[test]
    fn bounds_check_rejects_negative_and_overflowing_positions() {
        assert!(Position::new(0, 0).is_within(5, 5));
        assert!(Position::new(4, 4).is_within(5, 5));
        assert!(!Position::new(-1, 0).is_within(5, 5));
        assert!(!Position::new(5, 5).is_within(5, 5));
        assert!(!Position::new(0, 5).is_within(5, 5));
    }

    #[test]
    fn positions_order_row_major() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert_eq!(Position::from((2, 3)), Position::new(2, 3));
    }
}
