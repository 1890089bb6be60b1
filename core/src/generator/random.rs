use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Uniform placement over every cell outside the excluded zone, driven by a seeded RNG so that
/// a board can be reproduced from its seed.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, config: &GameConfig, exclude: &BTreeSet<Position>) -> Result<MineLayout> {
        let wanted = usize::try_from(config.mines).map_err(|_| ConfigError::NegativeMines)?;

        let candidates: Vec<Position> = config
            .positions()
            .filter(|pos| !exclude.contains(pos))
            .collect();

        if candidates.len() < wanted {
            log::warn!(
                "Cannot place {} mines on a {}x{} board, only {} cells outside the safe zone",
                config.mines,
                config.rows,
                config.cols,
                candidates.len()
            );
            return Err(GameError::InsufficientSpace {
                mines: config.mines,
                available: candidates.len() as CellCount,
            });
        }

        let picked = index::sample(&mut self.rng, candidates.len(), wanted);
        MineLayout::from_mine_positions(
            config.rows,
            config.cols,
            picked.into_iter().map(|i| candidates[i]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_layout() {
        let config = Difficulty::Intermediate.config();
        let exclude = safe_zone(&config, Position::new(8, 8));

        let first = RandomMineGenerator::new(42)
            .generate(&config, &exclude)
            .unwrap();
        let second = RandomMineGenerator::new(42)
            .generate(&config, &exclude)
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn places_exact_count_outside_the_exclusion() {
        let config = Difficulty::Expert.config();
        for seed in 0..20 {
            let start = Position::new((seed % 30) as Coord, (seed % 16) as Coord);
            let exclude = safe_zone(&config, start);
            let layout = RandomMineGenerator::new(seed)
                .generate(&config, &exclude)
                .unwrap();

            assert_eq!(layout.mine_count(), config.mines);
            assert!(layout.iter().all(|pos| !exclude.contains(&pos)));
            assert!(layout.iter().all(|pos| config.contains(pos)));
        }
    }

    #[test]
    fn densest_valid_board_fills_everything_but_the_safe_zone() {
        let config = GameConfig::new(4, 4, 7).unwrap();
        let exclude = safe_zone(&config, Position::new(1, 1));
        let layout = RandomMineGenerator::new(7)
            .generate(&config, &exclude)
            .unwrap();

        let expected: BTreeSet<_> = config
            .positions()
            .filter(|pos| !exclude.contains(pos))
            .collect();
        assert_eq!(layout.iter().collect::<BTreeSet<_>>(), expected);
    }

    #[test]
    fn reports_insufficient_space() {
        let config = GameConfig::new_unchecked(3, 3, 1);
        let exclude = safe_zone(&config, Position::new(1, 1));

        let err = RandomMineGenerator::new(1)
            .generate(&config, &exclude)
            .unwrap_err();

        assert_eq!(
            err,
            GameError::InsufficientSpace {
                mines: 1,
                available: 0
            }
        );
    }

    #[test]
    fn corner_safe_zone_has_four_cells() {
        let config = Difficulty::Beginner.config();

        assert_eq!(safe_zone(&config, Position::new(0, 0)).len(), 4);
        assert_eq!(safe_zone(&config, Position::new(4, 4)).len(), 9);
    }
}
