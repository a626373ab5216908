#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use tile::*;
pub use timer::*;
pub use types::*;
pub use view::*;

mod board;
mod engine;
mod error;
mod generator;
mod session;
mod tile;
mod timer;
mod types;
mod view;

const fn min_coord(a: Coord, b: Coord) -> Coord {
    if a < b { a } else { b }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Builds a config, rejecting boards without tiles or with too many mines to keep any opening clear.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        let available = self.max_mines();
        if self.mines > available {
            return Err(GameError::TooManyMines {
                requested: self.mines,
                available,
            });
        }
        Ok(())
    }

    /// Largest mine count that fits at least one opening, a corner tap forbids the fewest tiles.
    pub const fn max_mines(&self) -> CellCount {
        let corner_zone = mult(min_coord(self.size.0, 2), min_coord(self.size.1, 2));
        self.total_cells().saturating_sub(corner_zone)
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub fn validate_coords(&self, coords: Coordinate) -> Result<Coordinate> {
        if coords.within(self.size) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Tiles that can never hold a mine when the game opens at `first_tap`.
    pub fn forbidden_zone(&self, first_tap: Coordinate) -> impl Iterator<Item = Coordinate> + use<> {
        core::iter::once(first_tap).chain(NeighborIter::new(first_tap, self.size))
    }

    /// Largest mine count that still leaves the forbidden zone around `first_tap` clear.
    pub fn max_mines_for(&self, first_tap: Coordinate) -> CellCount {
        let zone: CellCount = self.forbidden_zone(first_tap).count().try_into().unwrap_or(CellCount::MAX);
        self.total_cells().saturating_sub(zone)
    }
}

/// Named board presets, plus an escape hatch for hand-picked boards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Custom(GameConfig),
}

impl Difficulty {
    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Easy => GameConfig::new_unchecked((9, 9), 10),
            Normal => GameConfig::new_unchecked((16, 16), 40),
            Hard => GameConfig::new_unchecked((30, 16), 99),
            Custom(config) => config,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout from a list of mine positions, duplicates collapse into one mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coordinate]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !coords.within(size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (
            x.try_into().unwrap_or(Coord::MAX),
            y.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coordinate) -> bool {
        coords.within(self.size()) && self[coords]
    }

    /// Mine positions in row-major order.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coordinate> + '_ {
        grid_coordinates(self.size()).filter(|&coords| self[coords])
    }
}

impl Index<Coordinate> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coordinate) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when several tiles open in one action.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn presets_match_classic_boards() {
        assert_eq!(Difficulty::Easy.config(), GameConfig::new_unchecked((9, 9), 10));
        assert_eq!(Difficulty::Normal.config(), GameConfig::new_unchecked((16, 16), 40));
        assert_eq!(Difficulty::Hard.config(), GameConfig::new_unchecked((30, 16), 99));
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert!(difficulty.config().validate().is_ok());
        }
    }

    #[test]
    fn config_rejects_full_and_empty_boards() {
        assert_eq!(
            GameConfig::new((3, 3), 9),
            Err(GameError::TooManyMines {
                requested: 9,
                available: 5
            })
        );
        assert_eq!(GameConfig::new((0, 4), 1), Err(GameError::EmptyBoard));
    }

    #[test]
    fn config_needs_room_for_a_corner_opening() {
        assert_eq!(
            GameConfig::new((3, 3), 6),
            Err(GameError::TooManyMines {
                requested: 6,
                available: 5
            })
        );
        assert!(GameConfig::new((3, 3), 5).is_ok());

        // thin boards have smaller corners
        assert_eq!(GameConfig::new_unchecked((5, 1), 0).max_mines(), 3);
        assert_eq!(GameConfig::new_unchecked((1, 1), 0).max_mines(), 0);
        assert!(GameConfig::new((5, 1), 3).is_ok());
        assert!(GameConfig::new((1, 1), 0).is_ok());
        assert!(GameConfig::new((1, 1), 1).is_err());

        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let config = difficulty.config();
            assert_eq!(config.max_mines(), config.max_mines_for(Coordinate::new(0, 0)));
        }
    }

    #[test]
    fn max_mines_depends_on_opening_position() {
        let config = Difficulty::Easy.config();
        assert_eq!(config.max_mines_for(Coordinate::new(0, 0)), 81 - 4);
        assert_eq!(config.max_mines_for(Coordinate::new(4, 0)), 81 - 6);
        assert_eq!(config.max_mines_for(Coordinate::new(4, 4)), 81 - 9);
    }

    #[test]
    fn difficulty_loads_from_json() {
        let hard: Difficulty = serde_json::from_str(r#""Hard""#).unwrap();
        assert_eq!(hard, Difficulty::Hard);

        let custom: Difficulty =
            serde_json::from_str(r#"{"Custom":{"size":[5,4],"mines":3}}"#).unwrap();
        assert_eq!(custom.config(), GameConfig::new_unchecked((5, 4), 3));
    }

    #[test]
    fn layout_collapses_duplicates_and_rejects_out_of_bounds() {
        let coords = [Coordinate::new(1, 1), Coordinate::new(1, 1), Coordinate::new(0, 2)];
        let layout = MineLayout::from_mine_coords((3, 3), &coords).unwrap();
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(
            layout.iter_mines().collect::<Vec<_>>(),
            [Coordinate::new(1, 1), Coordinate::new(0, 2)]
        );

        assert_eq!(
            MineLayout::from_mine_coords((3, 3), &[Coordinate::new(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn hit_mine_dominates_merged_outcomes() {
        use RevealOutcome::*;
        assert_eq!(Revealed | HitMine, HitMine);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
