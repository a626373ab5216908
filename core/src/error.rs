use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one tile")]
    EmptyBoard,
    #[error("Too many mines, requested {requested} but only {available} fit")]
    TooManyMines {
        requested: CellCount,
        available: CellCount,
    },
    #[error("Mine layout does not match the board or covers the opening area")]
    UnsafeLayout,
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
    #[error("Mines have not been placed yet")]
    MinesNotPlaced,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
