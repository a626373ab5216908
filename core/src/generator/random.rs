use alloc::vec::Vec;

use super::*;

/// Generation strategy that keeps the opening tile and its neighborhood clear, otherwise purely random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig, first_tap: Coordinate) -> Result<MineLayout> {
        use rand::prelude::*;

        let first_tap = config.validate_coords(first_tap)?;
        let forbidden = neighbors(first_tap, config.size);
        let mut candidates: Vec<Coordinate> = grid_coordinates(config.size)
            .filter(|&coords| coords != first_tap && !forbidden.contains(&coords))
            .collect();

        if usize::from(config.mines) > candidates.len() {
            let available = candidates.len().try_into().unwrap_or(CellCount::MAX);
            log::warn!(
                "Cannot keep {} clear, requested {} mines but only {} fit",
                first_tap,
                config.mines,
                available
            );
            return Err(GameError::TooManyMines {
                requested: config.mines,
                available,
            });
        }

        // partial Fisher-Yates, the prefix is a uniform sample without replacement
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (chosen, _) = candidates.partial_shuffle(&mut rng, config.mines.into());
        log::trace!("Sampled {} mines with seed {}", chosen.len(), self.seed);

        MineLayout::from_mine_coords(config.size, chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_layout() {
        let config = Difficulty::Normal.config();
        let start = Coordinate::new(7, 7);

        let a = RandomMineGenerator::new(42).generate(config, start).unwrap();
        let b = RandomMineGenerator::new(42).generate(config, start).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn opening_area_stays_clear_for_every_preset() {
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let config = difficulty.config();
            for seed in 0..32 {
                for start in [(0, 0), (config.width() - 1, 3), (4, 4)] {
                    let start = Coordinate::from(start);
                    let layout = RandomMineGenerator::new(seed).generate(config, start).unwrap();

                    assert_eq!(layout.mine_count(), config.mines);
                    assert!(config.forbidden_zone(start).all(|c| !layout.contains_mine(c)));
                }
            }
        }
    }

    #[test]
    fn densest_possible_board_fills_every_candidate() {
        let config = GameConfig::new((4, 4), 12).unwrap();
        let start = Coordinate::new(0, 0);
        assert_eq!(config.max_mines_for(start), 12);

        let layout = RandomMineGenerator::new(7).generate(config, start).unwrap();
        assert_eq!(layout.mine_count(), 12);
        assert!(config.forbidden_zone(start).all(|c| !layout.contains_mine(c)));
    }

    #[test]
    fn rejects_mines_that_cannot_avoid_the_opening() {
        let config = GameConfig::new((3, 3), 1).unwrap();
        let result = RandomMineGenerator::new(1).generate(config, Coordinate::new(1, 1));

        assert_eq!(
            result,
            Err(GameError::TooManyMines {
                requested: 1,
                available: 0
            })
        );
    }

    #[test]
    fn every_candidate_gets_picked_eventually() {
        let config = GameConfig::new((5, 5), 1).unwrap();
        let start = Coordinate::new(0, 0);
        let mut seen = hashbrown::HashSet::new();
        for seed in 0..2000 {
            let layout = RandomMineGenerator::new(seed).generate(config, start).unwrap();
            seen.extend(layout.iter_mines());
        }
        assert_eq!(usize::from(config.max_mines_for(start)), seen.len());
    }
}
