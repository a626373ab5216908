use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the presentation layer may show for a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden(Mark),
    Revealed(u8),
    /// Unflagged mine, only shown after a loss.
    Mine,
    /// The mine that ended the game.
    Exploded,
    /// Flag placed on a safe tile, only shown after a loss.
    IncorrectFlag,
}

impl TileView {
    /// Whether the tile is visually closed.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden(_) | Self::IncorrectFlag)
    }
}

/// Read-only copy of everything the presentation layer needs to draw a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub size: Coord2,
    pub phase: GamePhase,
    pub remaining_mine_budget: CellCount,
    pub opened_count: CellCount,
    pub tiles: Array2<TileView>,
}

impl SessionSnapshot {
    pub fn new(board: &Board, phase: GamePhase) -> Self {
        let size = board.size();
        let tiles = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            // shape is bounded by `Coord`, so the casts are lossless
            let coords = Coordinate::new(x as Coord, y as Coord);
            tile_view(board, phase, coords)
        });

        Self {
            size,
            phase,
            remaining_mine_budget: board.remaining_mine_budget(),
            opened_count: board.opened_count(),
            tiles,
        }
    }

    pub fn tile_at(&self, coords: Coordinate) -> Option<TileView> {
        coords.within(self.size).then(|| self.tiles[coords.to_nd_index()])
    }
}

/// Mines stay secret while the game runs; a loss sweeps them open and a win shows them flagged.
fn tile_view(board: &Board, phase: GamePhase, coords: Coordinate) -> TileView {
    let tile = board.tile_at(coords);

    if tile.is_revealed() {
        return TileView::Revealed(tile.adjacent_mines());
    }

    match (phase, tile.is_mine(), tile.mark()) {
        (GamePhase::Lost, true, _) if board.triggered_mine() == Some(coords) => TileView::Exploded,
        (GamePhase::Lost, true, Mark::Flag) => TileView::Hidden(Mark::Flag),
        (GamePhase::Lost, true, _) => TileView::Mine,
        (GamePhase::Lost, false, Mark::Flag) => TileView::IncorrectFlag,
        (GamePhase::Won, true, _) => TileView::Hidden(Mark::Flag),
        (_, _, mark) => TileView::Hidden(mark),
    }
}
