use alloc::collections::VecDeque;
use hashbrown::HashSet;

use crate::*;

/// Reveal rules applied to a [`Board`] whose mines are already placed.
///
/// The engine reports what happened through [`RevealOutcome`] and leaves phase bookkeeping to the caller. Every
/// method runs to completion, so a single action never leaves the board half updated.
#[derive(Debug)]
pub struct RevealEngine<'a> {
    board: &'a mut Board,
}

impl<'a> RevealEngine<'a> {
    pub fn new(board: &'a mut Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &*self.board
    }

    /// Opens a hidden tile, flood filling from it when it has no adjacent mines.
    ///
    /// Revealed and flagged tiles are left alone, a flag has to be removed before the tile can be opened.
    pub fn reveal(&mut self, coords: Coordinate) -> Result<RevealOutcome> {
        let coords = self.check_ready(coords)?;
        let tile = self.board.tile_at(coords);

        if tile.is_revealed() || tile.is_flagged() {
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = self.open_tile(coords);
        Ok(self.settle(outcome))
    }

    /// Opens every unmarked neighbor of a revealed number once enough neighbors carry a flag.
    ///
    /// Neighbors open one at a time and the first mine stops the pass; tiles opened before it stay open.
    pub fn chord_reveal(&mut self, coords: Coordinate) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.check_ready(coords)?;
        let tile = self.board.tile_at(coords);
        let count = tile.adjacent_mines();

        if !tile.is_revealed() || count == 0 {
            return Ok(NoChange);
        }

        let neighbors = self.board.neighbors(coords);
        let flagged = neighbors
            .iter()
            .filter(|&&pos| self.board.tile_at(pos).is_flagged())
            .count();
        if flagged != usize::from(count) {
            log::trace!("Not chording at {}, {} flags for {} mines", coords, flagged, count);
            return Ok(NoChange);
        }

        let mut outcome = NoChange;
        for pos in neighbors {
            let neighbor = self.board.tile_at(pos);
            if neighbor.is_revealed() || neighbor.mark() != Mark::None {
                continue;
            }

            let step = self.open_tile(pos);
            outcome = outcome | step;
            if step == HitMine {
                break;
            }
        }

        Ok(self.settle(outcome))
    }

    /// Flood fills outward from a zero tile, opening it first if it is still hidden.
    pub fn reveal_connected_zeros(&mut self, start: Coordinate) -> Result<RevealOutcome> {
        let start = self.check_ready(start)?;
        let tile = self.board.tile_at(start);

        if tile.is_mine() {
            self.board.record_triggered_mine(start);
            return Ok(RevealOutcome::HitMine);
        }
        if tile.is_flagged() || tile.adjacent_mines() != 0 {
            return Ok(RevealOutcome::NoChange);
        }

        let mut outcome = RevealOutcome::NoChange;
        if !tile.is_revealed() {
            self.board.open(start);
            outcome = RevealOutcome::Revealed;
        }
        outcome = outcome | self.flood_from(start);
        Ok(self.settle(outcome))
    }

    /// Opens a single hidden, unflagged tile.
    fn open_tile(&mut self, coords: Coordinate) -> RevealOutcome {
        if self.board.tile_at(coords).is_mine() {
            log::debug!("Hit mine at {}", coords);
            self.board.record_triggered_mine(coords);
            return RevealOutcome::HitMine;
        }

        let count = self.board.open(coords);
        log::debug!("Open tile at {}, mine count: {}", coords, count);

        if count == 0 {
            self.flood_from(coords) | RevealOutcome::Revealed
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Breadth-first expansion from a revealed zero tile.
    ///
    /// Every hidden unflagged neighbor of a zero tile opens; only new zero tiles keep spreading.
    fn flood_from(&mut self, start: Coordinate) -> RevealOutcome {
        let mut visited: HashSet<Coordinate> = HashSet::from_iter([start]);
        let mut to_visit = VecDeque::from([start]);
        let mut outcome = RevealOutcome::NoChange;

        while let Some(current) = to_visit.pop_front() {
            for pos in self.board.neighbors(current) {
                if !visited.insert(pos) {
                    continue;
                }

                let tile = self.board.tile_at(pos);
                if tile.is_revealed() || tile.is_flagged() {
                    log::trace!("Skipping tile at {}", pos);
                    continue;
                }

                debug_assert!(!tile.is_mine(), "flood fill reached a mine at {pos} from {current}");
                if tile.is_mine() {
                    log::error!("Flood fill reached a mine at {} from zero tile {}", pos, current);
                    self.board.record_triggered_mine(pos);
                    return RevealOutcome::HitMine;
                }

                let count = self.board.open(pos);
                outcome = RevealOutcome::Revealed;
                log::trace!("Flood opened tile at {}, mine count: {}", pos, count);

                if count == 0 {
                    to_visit.push_back(pos);
                }
            }
        }

        outcome
    }

    /// Promotes a successful reveal to a win once every safe tile is open.
    fn settle(&self, outcome: RevealOutcome) -> RevealOutcome {
        match outcome {
            RevealOutcome::Revealed if self.board.is_cleared() => RevealOutcome::Won,
            _ => outcome,
        }
    }

    fn check_ready(&self, coords: Coordinate) -> Result<Coordinate> {
        let coords = self.board.validate_coords(coords)?;
        if self.board.mines_placed() {
            Ok(coords)
        } else {
            Err(GameError::MinesNotPlaced)
        }
    }
}
