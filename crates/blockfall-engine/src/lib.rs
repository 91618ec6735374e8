//! Game-state engine for a falling-block puzzle.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - passive data: the [`Grid`] of locked cells, [`ShapeId`] and
//!   [`ShapeMatrix`], the falling [`Piece`], the placement predicate and the
//!   line clearer.
//! - [`engine`] - the [`GameEngine`] state machine that owns a grid and two
//!   pieces and drives movement, gravity, locking, scoring and game over.
//!
//! Nothing here performs I/O or timing. A driver calls [`GameEngine::tick`]
//! at a fixed rate and forwards input to [`GameEngine::try_move`] and
//! [`GameEngine::try_rotate`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Returned by mutating engine operations once the game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("game is already over")]
pub struct GameOverError;

/// Why a move or rotation was not applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum MoveError {
    #[display("piece blocked by a wall, the floor or locked cells")]
    Blocked,
    #[display("{_0}")]
    GameOver(GameOverError),
}

impl From<GameOverError> for MoveError {
    fn from(err: GameOverError) -> Self {
        MoveError::GameOver(err)
    }
}

/// A piece handed to the engine does not fit on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece does not fit on the grid")]
pub struct PlacementError;
