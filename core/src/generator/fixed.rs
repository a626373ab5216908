use alloc::vec::Vec;

use super::*;

/// Places a predetermined set of mines, used for replays and deterministic boards.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coordinate>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(self, config: GameConfig, _first_tap: Coordinate) -> Result<MineLayout> {
        MineLayout::from_mine_coords(config.size, &self.mines)
    }
}
