use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board dealt, mines not placed yet
    #[default]
    NotStarted,
    /// Mines placed and the first tile opened
    InProgress,
    /// Every safe tile is open
    Won,
    /// A mine was opened
    Lost,
}

impl GamePhase {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Where the mines for the next board come from.
#[derive(Clone, Debug)]
enum MineSource {
    Seeded(SmallRng),
    Fixed(Vec<Coordinate>),
}

/// Represents a game from the first tap to a win or loss, and every game after it.
///
/// The session owns the board exclusively, player actions take `&mut self` and run to completion. Hosts that feed
/// input and timer ticks from different threads should put the whole session behind one mutex.
#[derive(Clone, Debug)]
pub struct GameSession<T: GameTimer = NoTimer> {
    difficulty: Difficulty,
    board: Board,
    phase: GamePhase,
    mine_source: MineSource,
    timer: T,
}

impl<T: GameTimer> GameSession<T> {
    /// New session with mines drawn from OS entropy.
    pub fn new(difficulty: Difficulty, timer: T) -> Result<Self> {
        Self::with_source(difficulty, MineSource::Seeded(SmallRng::from_os_rng()), timer)
    }

    /// New session whose boards are a pure function of `seed` and the taps made.
    pub fn with_seed(difficulty: Difficulty, seed: u64, timer: T) -> Result<Self> {
        Self::with_source(difficulty, MineSource::Seeded(SmallRng::seed_from_u64(seed)), timer)
    }

    /// New session that always deals the given mines, the first tap must stay clear of them.
    pub fn with_fixed_mines(
        difficulty: Difficulty,
        mines: impl IntoIterator<Item = Coordinate>,
        timer: T,
    ) -> Result<Self> {
        Self::with_source(difficulty, MineSource::Fixed(mines.into_iter().collect()), timer)
    }

    fn with_source(difficulty: Difficulty, mine_source: MineSource, timer: T) -> Result<Self> {
        Ok(Self {
            difficulty,
            board: Board::generate(difficulty.config())?,
            phase: GamePhase::NotStarted,
            mine_source,
            timer,
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> GameConfig {
        self.board.config()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_final()
    }

    pub fn opened_count(&self) -> CellCount {
        self.board.opened_count()
    }

    pub fn remaining_mine_budget(&self) -> CellCount {
        self.board.remaining_mine_budget()
    }

    pub fn triggered_mine(&self) -> Option<Coordinate> {
        self.board.triggered_mine()
    }

    pub fn tile(&self, coords: Coordinate) -> Result<&Tile> {
        self.board.tile(coords)
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(&self.board, self.phase)
    }

    /// Discards the current board and deals a fresh one for `difficulty`.
    ///
    /// An invalid difficulty is rejected before anything changes.
    pub fn start_new_game(&mut self, difficulty: Difficulty) -> Result<()> {
        let board = Board::generate(difficulty.config())?;

        self.timer.stop();
        self.timer.reset();
        self.difficulty = difficulty;
        self.board = board;
        self.phase = GamePhase::NotStarted;
        log::debug!("New game: {:?}", difficulty);
        Ok(())
    }

    /// Deals a fresh board with the current difficulty.
    pub fn restart_game(&mut self) -> Result<()> {
        self.start_new_game(self.difficulty)
    }

    /// Opens a hidden tile, or chords a revealed number.
    ///
    /// The first tap of a game places the mines around it and starts the timer. Placement clears every mark, so
    /// the first tap opens its tile even when it was flagged beforehand.
    pub fn tap_tile(&mut self, coords: Coordinate) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        if self.phase.is_initial() {
            self.place_mines(coords)?;
            self.phase = GamePhase::InProgress;
            self.timer.start();
            log::debug!("Game started at {}", coords);
        }

        let is_revealed = self.board.tile(coords)?.is_revealed();
        let mut engine = RevealEngine::new(&mut self.board);
        let outcome = if is_revealed {
            engine.chord_reveal(coords)?
        } else {
            engine.reveal(coords)?
        };

        match outcome {
            RevealOutcome::HitMine => self.end_game(GamePhase::Lost),
            RevealOutcome::Won => self.end_game(GamePhase::Won),
            RevealOutcome::NoChange | RevealOutcome::Revealed => {}
        }
        Ok(outcome)
    }

    /// Cycles the mark of a hidden tile, see [`Board::cycle_mark`].
    pub fn cycle_mark(&mut self, coords: Coordinate) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;
        self.board.cycle_mark(coords)
    }

    fn place_mines(&mut self, first_tap: Coordinate) -> Result<()> {
        match &mut self.mine_source {
            MineSource::Seeded(rng) => {
                let generator = RandomMineGenerator::new(rng.random());
                self.board.place_mines(first_tap, generator)
            }
            MineSource::Fixed(mines) => {
                let generator = FixedMineGenerator::new(mines.iter().copied());
                self.board.place_mines(first_tap, generator)
            }
        }
    }

    fn end_game(&mut self, phase: GamePhase) {
        if self.phase.is_final() {
            return;
        }

        self.phase = phase;
        self.timer.stop();
        log::debug!("Game ended: {:?}, opened {} tiles", phase, self.board.opened_count());
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.phase.is_final() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
