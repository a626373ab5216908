use serde::{Deserialize, Serialize};

/// Player annotation on a hidden tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    None,
    Flag,
    Question,
}

/// State of a single cell, owned by the [`Board`](crate::Board).
///
/// Whether a hidden tile holds a mine is not readable from outside the crate, hosts draw from
/// [`SessionSnapshot`](crate::SessionSnapshot) which only shows mines once the game is over.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) mark: Mark,
    pub(crate) adjacent_mines: u8,
}

impl Tile {
    pub(crate) const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn mark(&self) -> Mark {
        self.mark
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.mark, Mark::Flag)
    }

    /// Mines in the Moore neighborhood, meaningless for mine tiles.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// Opens the tile, dropping whatever mark it carried.
    pub(crate) fn reveal(&mut self) {
        self.is_revealed = true;
        self.mark = Mark::None;
    }
}
