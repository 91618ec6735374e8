use std::mem;

use log::{debug, info};

use crate::{
    GameOverError, MoveError, PlacementError,
    core::{
        grid::{Grid, GridSize},
        line_clear::clear_completed_lines,
        piece::Piece,
        placement::is_valid_placement,
        shape::Cell,
    },
};

use super::{
    game_stats::GameStats,
    piece_generator::{PieceGenerator, PieceSeed},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EngineState {
    Playing,
    GameOver,
}

/// What happened when the falling piece was locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub cleared_lines: usize,
    /// `true` if the promoted piece did not fit and the game ended.
    pub game_over: bool,
}

/// Result of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The piece moved down one row.
    Fell,
    /// The piece could not move down and was locked.
    Locked(LockOutcome),
}

/// The game-state machine.
///
/// Owns the grid, the falling piece, the next piece and the score. The engine
/// starts in [`EngineState::Playing`] and enters [`EngineState::GameOver`]
/// only from [`GameEngine::lock_piece`], when the promoted piece does not fit
/// at its spawn anchor. Once over, every mutating operation fails with
/// [`GameOverError`] and leaves the state untouched.
///
/// While playing, the current piece always satisfies
/// `is_valid_placement(grid, current, 0, 0)`.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameEngine, GridSize, TickOutcome};
///
/// let mut engine = GameEngine::new(GridSize::STANDARD);
/// engine.try_move(-1, 0).ok();
/// engine.try_rotate().ok();
///
/// let outcome = engine.tick().unwrap();
/// assert_eq!(outcome, TickOutcome::Fell);
/// assert_eq!(engine.score(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine {
    grid: Grid,
    current: Piece,
    next: Piece,
    generator: PieceGenerator,
    stats: GameStats,
    state: EngineState,
    ticks: u64,
}

impl GameEngine {
    /// Starts a game on an empty grid with a random seed.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self::with_generator(Grid::new(size), PieceGenerator::new())
    }

    /// Starts a game on an empty grid with a reproducible piece sequence.
    #[must_use]
    pub fn with_seed(size: GridSize, seed: PieceSeed) -> Self {
        Self::with_generator(Grid::new(size), PieceGenerator::with_seed(seed))
    }

    fn with_generator(grid: Grid, mut generator: PieceGenerator) -> Self {
        let current = generator.spawn(grid.cols());
        let next = generator.spawn(grid.cols());
        Self::assemble(grid, current, next, generator)
    }

    /// Starts a game from an explicit position.
    ///
    /// Later pieces are drawn from `seed`. Fails if `current` does not fit on
    /// `grid`.
    pub fn from_parts(
        grid: Grid,
        current: Piece,
        next: Piece,
        seed: PieceSeed,
    ) -> Result<Self, PlacementError> {
        if !is_valid_placement(&grid, &current, 0, 0) {
            return Err(PlacementError);
        }
        Ok(Self::assemble(
            grid,
            current,
            next,
            PieceGenerator::with_seed(seed),
        ))
    }

    fn assemble(grid: Grid, current: Piece, next: Piece, generator: PieceGenerator) -> Self {
        Self {
            grid,
            current,
            next,
            generator,
            stats: GameStats::new(),
            state: EngineState::Playing,
            ticks: 0,
        }
    }

    /// Returns the grid of locked cells.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the falling piece.
    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    /// Returns the piece that spawns after the current one locks.
    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    /// Returns the current score.
    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    /// Returns score and piece counters.
    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Returns whether the game is still running.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Returns `true` once no further move is accepted.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Seed of the piece sequence, for replaying this game.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    /// Number of gravity steps applied so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn ensure_playing(&self) -> Result<(), GameOverError> {
        match self.state {
            EngineState::Playing => Ok(()),
            EngineState::GameOver => Err(GameOverError),
        }
    }

    /// Moves the falling piece by `(dx, dy)` if the target fits.
    ///
    /// A blocked move leaves everything unchanged. Moving never locks the
    /// piece; only [`Self::tick`] does.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> Result<(), MoveError> {
        self.ensure_playing()?;
        if !is_valid_placement(&self.grid, &self.current, dx, dy) {
            return Err(MoveError::Blocked);
        }
        self.current = self.current.moved(dx, dy);
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), MoveError> {
        self.try_move(-1, 0)
    }

    pub fn try_move_right(&mut self) -> Result<(), MoveError> {
        self.try_move(1, 0)
    }

    /// Moves down one row. Never locks.
    pub fn try_soft_drop(&mut self) -> Result<(), MoveError> {
        self.try_move(0, 1)
    }

    /// Rotates the falling piece 90° clockwise about its anchor.
    ///
    /// There is no wall kick: if the rotated shape does not fit where it is,
    /// the rotation is rejected.
    pub fn try_rotate(&mut self) -> Result<(), MoveError> {
        self.ensure_playing()?;
        let candidate = self.current.with_shape(self.current.rotated_clockwise());
        if !is_valid_placement(&self.grid, &candidate, 0, 0) {
            return Err(MoveError::Blocked);
        }
        self.current = candidate;
        Ok(())
    }

    /// Applies gravity: moves the piece down one row, or locks it if it
    /// cannot move.
    pub fn tick(&mut self) -> Result<TickOutcome, GameOverError> {
        self.ensure_playing()?;
        self.ticks += 1;
        if self.try_soft_drop().is_ok() {
            return Ok(TickOutcome::Fell);
        }
        self.lock_piece().map(TickOutcome::Locked)
    }

    /// Locks the falling piece where it is.
    ///
    /// Writes the piece into the grid, clears completed lines, promotes the
    /// next piece and draws a new one. If the promoted piece does not fit,
    /// the game is over.
    pub fn lock_piece(&mut self) -> Result<LockOutcome, GameOverError> {
        self.ensure_playing()?;

        for (x, y, shape_id) in self.current.blocks() {
            // cells above the board are dropped
            if let (Ok(row), Ok(col)) = (usize::try_from(y), usize::try_from(x))
                && let Some(cell) = self.grid.get_mut(row, col)
            {
                *cell = Cell::Filled(shape_id);
            }
        }
        debug!(
            "locked {:?} at {:?}",
            self.current.shape_id(),
            self.current.position()
        );

        let cleared_lines = clear_completed_lines(&mut self.grid);
        self.stats.complete_piece_drop(cleared_lines);
        if cleared_lines > 0 {
            debug!(
                "cleared {cleared_lines} line(s), score {}",
                self.stats.score()
            );
        }

        let next = self.generator.spawn(self.grid.cols());
        self.current = mem::replace(&mut self.next, next);
        debug!("spawned {:?}, next {:?}", self.current.shape_id(), self.next.shape_id());

        let game_over = !is_valid_placement(&self.grid, &self.current, 0, 0);
        if game_over {
            self.state = EngineState::GameOver;
            info!(
                "game over: score {}, {} lines, {} pieces",
                self.stats.score(),
                self.stats.total_cleared_lines(),
                self.stats.completed_pieces()
            );
        }
        Ok(LockOutcome {
            cleared_lines,
            game_over,
        })
    }
}
