//! Game-state machine built on top of [`crate::core`].
//!
//! - [`GameEngine`] - owns the grid, the falling and next pieces and the
//!   score; applies moves, rotations and gravity
//! - [`GameStats`] - score, cleared lines and locked pieces
//! - [`PieceGenerator`] - uniform random shape source
//! - [`PieceSeed`] - seed for reproducible piece sequences
//!
//! # Game Flow
//!
//! 1. Create a [`GameEngine`] for a [`GridSize`](crate::GridSize)
//! 2. Forward input to [`GameEngine::try_move`] and [`GameEngine::try_rotate`]
//! 3. Call [`GameEngine::tick`] at a fixed rate; a piece that can no longer
//!    fall is locked, full rows are cleared and the next piece spawns
//! 4. Stop when [`GameEngine::is_game_over`] returns `true`

pub use self::{game_engine::*, game_stats::*, piece_generator::*};

mod game_engine;
mod game_stats;
mod piece_generator;
