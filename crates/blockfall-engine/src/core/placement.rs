use super::{grid::Grid, piece::Piece};

/// Returns `true` if `piece`, shifted by `(dx, dy)`, fits on `grid`.
///
/// Each occupied cell must lie inside the side walls and above the floor, and
/// must not overlap a locked cell. Cells above row 0 are exempt from the
/// overlap check so a piece can spawn or rotate partly above the board.
/// A shift that overflows the coordinate range never fits.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, GridSize, Piece, ShapeId, is_valid_placement};
///
/// let grid = Grid::new(GridSize::STANDARD);
/// let piece = Piece::spawn(ShapeId::I, grid.cols());
/// assert!(is_valid_placement(&grid, &piece, -3, 0));
/// assert!(!is_valid_placement(&grid, &piece, -4, 0));
/// ```
#[must_use]
pub fn is_valid_placement(grid: &Grid, piece: &Piece, dx: i32, dy: i32) -> bool {
    piece
        .occupied_positions()
        .all(|(x, y)| match (x.checked_add(dx), y.checked_add(dy)) {
            (Some(x), Some(y)) => is_free(grid, x, y),
            _ => false,
        })
}

fn is_free(grid: &Grid, x: i32, y: i32) -> bool {
    let Ok(col) = usize::try_from(x) else {
        return false;
    };
    if col >= grid.cols() {
        return false;
    }
    let Ok(row) = usize::try_from(y) else {
        // above the visible board
        return true;
    };
    grid.get(row, col).is_some_and(|cell| cell.is_empty())
}
