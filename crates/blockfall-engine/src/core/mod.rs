pub use self::{grid::*, line_clear::*, piece::*, placement::*, shape::*};

pub(crate) mod grid;
pub(crate) mod line_clear;
pub(crate) mod piece;
pub(crate) mod placement;
pub(crate) mod shape;
