use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional extent `(width, height)`.
pub type Coord2 = (Coord, Coord);

/// Neighborhood of a single tile, never more than 8 entries.
pub type Neighbors = SmallVec<[Coordinate; 8]>;

/// Zero-based position of a tile on the board.
///
/// Ordering is row-major: rows (`y`) are compared first, then columns (`x`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: Coord,
    pub y: Coord,
}

impl Coordinate {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Whether this position lies inside a board of the given size.
    pub const fn within(self, (width, height): Coord2) -> bool {
        self.x < width && self.y < height
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Coord2> for Coordinate {
    fn from((x, y): Coord2) -> Self {
        Self::new(x, y)
    }
}

impl From<Coordinate> for Coord2 {
    fn from(coords: Coordinate) -> Self {
        (coords.x, coords.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coordinate {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.x.into(), self.y.into()]
    }
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Every coordinate of a board of the given size, in row-major order.
pub fn grid_coordinates((width, height): Coord2) -> impl Iterator<Item = Coordinate> {
    (0..height).flat_map(move |y| (0..width).map(move |x| Coordinate::new(x, y)))
}

/// Moore neighborhood of `center` clipped to the board bounds.
///
/// Corners yield 3 neighbors, edges 5 and interior tiles 8. The order is fixed by the displacement table, so the
/// result is deterministic for a given input.
pub fn neighbors(center: Coordinate, bounds: Coord2) -> Neighbors {
    NeighborIter::new(center, bounds).collect()
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coordinate, (dx, dy): (i8, i8), bounds: Coord2) -> Option<Coordinate> {
    let next = Coordinate::new(coords.x.checked_add_signed(dx)?, coords.y.checked_add_signed(dy)?);
    next.within(bounds).then_some(next)
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coordinate,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coordinate, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn sorted(center: Coord2, bounds: Coord2) -> Vec<Coordinate> {
        let mut result: Vec<_> = neighbors(center.into(), bounds).into_iter().collect();
        result.sort();
        result
    }

    #[test]
    fn corner_has_three_neighbors() {
        assert_eq!(
            sorted((0, 0), (9, 9)),
            [(1, 0), (0, 1), (1, 1)].map(Coordinate::from)
        );
        assert_eq!(sorted((8, 8), (9, 9)).len(), 3);
    }

    #[test]
    fn edge_has_five_neighbors() {
        assert_eq!(sorted((4, 0), (9, 9)).len(), 5);
        assert_eq!(sorted((0, 4), (9, 9)).len(), 5);
        assert_eq!(sorted((29, 7), (30, 16)).len(), 5);
    }

    #[test]
    fn interior_has_eight_neighbors_excluding_center() {
        let result = sorted((4, 4), (9, 9));
        assert_eq!(result.len(), 8);
        assert!(!result.contains(&Coordinate::new(4, 4)));
        assert!(result.iter().all(|c| c.x.abs_diff(4) <= 1 && c.y.abs_diff(4) <= 1));
    }

    #[test]
    fn single_tile_board_has_no_neighbors() {
        assert!(neighbors(Coordinate::new(0, 0), (1, 1)).is_empty());
    }

    #[test]
    fn coordinates_order_row_major() {
        assert!(Coordinate::new(5, 0) < Coordinate::new(0, 1));
        assert!(Coordinate::new(0, 3) < Coordinate::new(1, 3));

        let all: Vec<_> = grid_coordinates((3, 2)).collect();
        let mut expected = all.clone();
        expected.sort();
        assert_eq!(all, expected);
        assert_eq!(all.len(), 6);
    }
}
