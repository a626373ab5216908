use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of mine layouts for a board whose first tap is already known.
///
/// Implementations should keep `first_tap` and its neighbors free of mines and place exactly `config.mines` mines;
/// [`Board::place_mines`] rejects layouts that do not.
pub trait MineGenerator {
    fn generate(self, config: GameConfig, first_tap: Coordinate) -> Result<MineLayout>;
}
