use alloc::collections::BTreeSet;

use crate::*;
pub use random::*;

mod random;

pub trait MineGenerator {
    /// Picks exactly `config.mines` distinct mine positions, none of them inside `exclude`.
    fn generate(&mut self, config: &GameConfig, exclude: &BTreeSet<Position>) -> Result<MineLayout>;
}

/// Cells that must stay mine-free when the first click lands on `start`.
pub fn safe_zone(config: &GameConfig, start: Position) -> BTreeSet<Position> {
    let mut zone: BTreeSet<_> = start.neighbors(config.rows, config.cols).collect();
    zone.insert(start);
    zone
}
