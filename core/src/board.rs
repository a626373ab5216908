use alloc::collections::BTreeSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of tiles together with the mine set and the player's flag budget.
///
/// Mines are placed lazily: a fresh board has none until [`Board::place_mines`] runs with the first tapped tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    tiles: Array2<Tile>,
    mines: BTreeSet<Coordinate>,
    mines_placed: bool,
    remaining_mine_budget: CellCount,
    opened_count: CellCount,
    triggered_mine: Option<Coordinate>,
}

impl Board {
    /// Allocates one hidden, mine-free tile per grid cell.
    pub fn generate(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tiles: Array2::default(config.size.to_nd_index()),
            mines: BTreeSet::new(),
            mines_placed: false,
            remaining_mine_budget: config.mines,
            opened_count: 0,
            triggered_mine: None,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn total_cells(&self) -> CellCount {
        self.config.total_cells()
    }

    /// Positions of every mine, empty until mines are placed.
    pub(crate) fn mines(&self) -> &BTreeSet<Coordinate> {
        &self.mines
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    /// Flags the player may still place, `mine_count` minus active flags.
    pub fn remaining_mine_budget(&self) -> CellCount {
        self.remaining_mine_budget
    }

    /// Revealed non-mine tiles.
    pub fn opened_count(&self) -> CellCount {
        self.opened_count
    }

    pub fn is_cleared(&self) -> bool {
        self.mines_placed && self.opened_count == self.config.safe_cells()
    }

    /// The mine whose reveal ended the game, if any.
    pub fn triggered_mine(&self) -> Option<Coordinate> {
        self.triggered_mine
    }

    pub fn validate_coords(&self, coords: Coordinate) -> Result<Coordinate> {
        self.config.validate_coords(coords)
    }

    pub fn tile(&self, coords: Coordinate) -> Result<&Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.tiles[coords.to_nd_index()])
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Coordinate, &Tile)> + '_ {
        grid_coordinates(self.size()).map(|coords| (coords, &self.tiles[coords.to_nd_index()]))
    }

    pub fn neighbors(&self, coords: Coordinate) -> Neighbors {
        neighbors(coords, self.size())
    }

    /// Places mines once, keeping `first_tap` and its neighborhood clear.
    ///
    /// The generator's layout is checked before anything on the board changes, so a rejected layout leaves the
    /// board untouched.
    pub fn place_mines<G: MineGenerator>(&mut self, first_tap: Coordinate, generator: G) -> Result<()> {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }

        let first_tap = self.validate_coords(first_tap)?;
        let available = self.config.max_mines_for(first_tap);
        if self.config.mines > available {
            log::warn!(
                "Requested {} mines but only {} fit around {}",
                self.config.mines,
                available,
                first_tap
            );
            return Err(GameError::TooManyMines {
                requested: self.config.mines,
                available,
            });
        }

        let layout = generator.generate(self.config, first_tap)?;
        if layout.size() != self.size()
            || layout.mine_count() != self.config.mines
            || self.config.forbidden_zone(first_tap).any(|coords| layout.contains_mine(coords))
        {
            log::warn!("Rejected mine layout for opening at {}", first_tap);
            return Err(GameError::UnsafeLayout);
        }

        self.tiles.fill(Tile::default());
        self.mines = layout.iter_mines().collect();
        for &coords in &self.mines {
            self.tiles[coords.to_nd_index()].is_mine = true;
        }
        self.recompute_adjacent_counts();

        self.remaining_mine_budget = self.config.mines;
        self.opened_count = 0;
        self.triggered_mine = None;
        self.mines_placed = true;
        log::debug!("Placed {} mines, opening at {}", self.mines.len(), first_tap);
        Ok(())
    }

    /// Cycles `None -> Flag -> Question -> None`, flags are only handed out while budget remains.
    pub fn cycle_mark(&mut self, coords: Coordinate) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;
        let tile = &mut self.tiles[coords.to_nd_index()];
        if tile.is_revealed {
            return Ok(NoChange);
        }

        Ok(match tile.mark {
            Mark::None if self.remaining_mine_budget == 0 => NoChange,
            Mark::None => {
                tile.mark = Mark::Flag;
                self.remaining_mine_budget -= 1;
                Changed
            }
            Mark::Flag => {
                tile.mark = Mark::Question;
                self.remaining_mine_budget += 1;
                Changed
            }
            Mark::Question => {
                tile.mark = Mark::None;
                Changed
            }
        })
    }

    /// Reveals a hidden non-mine tile and returns its adjacent mine count.
    pub(crate) fn open(&mut self, coords: Coordinate) -> u8 {
        let tile = &mut self.tiles[coords.to_nd_index()];
        debug_assert!(!tile.is_revealed && !tile.is_mine);
        if tile.is_revealed {
            return tile.adjacent_mines;
        }
        tile.reveal();
        self.opened_count += 1;
        tile.adjacent_mines
    }

    pub(crate) fn record_triggered_mine(&mut self, coords: Coordinate) {
        if self.triggered_mine.is_none() {
            self.triggered_mine = Some(coords);
        }
    }

    /// Read access for the engine, callers have validated `coords`.
    pub(crate) fn tile_at(&self, coords: Coordinate) -> Tile {
        self.tiles[coords.to_nd_index()]
    }

    #[cfg(test)]
    pub(crate) fn tile_at_mut(&mut self, coords: Coordinate) -> &mut Tile {
        &mut self.tiles[coords.to_nd_index()]
    }

    fn recompute_adjacent_counts(&mut self) {
        let size = self.size();
        for tile in self.tiles.iter_mut() {
            tile.adjacent_mines = 0;
        }
        for &mine in &self.mines {
            for coords in neighbors(mine, size) {
                let tile = &mut self.tiles[coords.to_nd_index()];
                if !tile.is_mine {
                    tile.adjacent_mines += 1;
                }
            }
        }
    }
}
