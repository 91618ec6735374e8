use super::shape::{ShapeId, ShapeMatrix};

/// Grid coordinate of a shape matrix's top-left corner.
///
/// `x` grows rightward (columns) and `y` downward (rows). Either may be
/// negative while part of the bounding box hangs outside the board.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiecePosition {
    pub x: i32,
    pub y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by `(dx, dy)`, saturating at the `i32`
    /// range.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// A falling tetromino: its type, current shape matrix and anchor.
///
/// Pieces are values. Moving or rotating produces a new `Piece`, which the
/// engine only commits after checking it against the grid.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PiecePosition, ShapeId};
///
/// let piece = Piece::spawn(ShapeId::I, 10);
/// assert_eq!(piece.position(), PiecePosition::new(3, 0));
///
/// let moved = piece.moved(1, 2);
/// assert_eq!(moved.position(), PiecePosition::new(4, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    shape_id: ShapeId,
    shape: ShapeMatrix,
    position: PiecePosition,
}

impl Piece {
    #[must_use]
    pub const fn new(shape_id: ShapeId, shape: ShapeMatrix, position: PiecePosition) -> Self {
        Self {
            shape_id,
            shape,
            position,
        }
    }

    /// Places a fresh piece horizontally centered on the top row of a board
    /// `cols` wide.
    #[must_use]
    pub fn spawn(shape_id: ShapeId, cols: usize) -> Self {
        let shape = shape_id.spawn_matrix();
        let x = (cols / 2).saturating_sub(shape.width() / 2);
        let x = i32::try_from(x).unwrap_or(i32::MAX);
        Self::new(shape_id, shape, PiecePosition::new(x, 0))
    }

    /// Returns the tetromino type.
    #[must_use]
    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }

    /// Returns the current shape matrix.
    #[must_use]
    pub fn shape(&self) -> &ShapeMatrix {
        &self.shape
    }

    /// Returns the anchor of the shape matrix.
    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    /// Iterates occupied cells in grid coordinates as `(x, y, shape)`.
    ///
    /// Coordinates saturate at `i32::MAX`, which is off any grid.
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32, ShapeId)> + '_ {
        self.shape.occupied_cells().map(move |(dx, dy, id)| {
            let (dx, dy) = (local_offset(dx), local_offset(dy));
            (
                self.position.x.saturating_add(dx),
                self.position.y.saturating_add(dy),
                id,
            )
        })
    }

    /// Iterates occupied cells in grid coordinates as `(x, y)`.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.blocks().map(|(x, y, _)| (x, y))
    }

    /// Returns this piece translated by `(dx, dy)`.
    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..*self
        }
    }

    /// Returns the current matrix rotated 90° clockwise. Does not touch the piece.
    #[must_use]
    pub fn rotated_clockwise(&self) -> ShapeMatrix {
        self.shape.rotated_clockwise()
    }

    /// Returns this piece at the same anchor with a different matrix.
    #[must_use]
    pub fn with_shape(&self, shape: ShapeMatrix) -> Self {
        Self { shape, ..*self }
    }
}

// Local offsets are bounded by `MAX_SHAPE_SIZE`.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn local_offset(offset: usize) -> i32 {
    offset as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_is_horizontally_centered() {
        let cases = [
            (ShapeId::I, 10, 3),
            (ShapeId::O, 10, 4),
            (ShapeId::T, 10, 4),
            (ShapeId::J, 10, 4),
            (ShapeId::I, 4, 0),
            (ShapeId::T, 7, 2),
        ];
        for (id, cols, x) in cases {
            let piece = Piece::spawn(id, cols);
            assert_eq!(piece.position(), PiecePosition::new(x, 0), "{id:?} on {cols}");
            assert_eq!(piece.shape(), &id.spawn_matrix());
            assert_eq!(piece.shape_id(), id);
        }
    }

    #[test]
    fn test_blocks_are_offset_by_anchor() {
        let piece = Piece::new(
            ShapeId::S,
            ShapeId::S.spawn_matrix(),
            PiecePosition::new(2, 5),
        );
        let blocks: Vec<_> = piece.blocks().collect();
        assert_eq!(
            blocks,
            [
                (3, 5, ShapeId::S),
                (4, 5, ShapeId::S),
                (2, 6, ShapeId::S),
                (3, 6, ShapeId::S),
            ]
        );
    }

    #[test]
    fn test_negative_anchor() {
        let piece = Piece::new(
            ShapeId::O,
            ShapeId::O.spawn_matrix(),
            PiecePosition::new(0, -1),
        );
        let positions: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(positions, [(0, -1), (1, -1), (0, 0), (1, 0)]);
    }

    #[test]
    fn test_coordinates_saturate() {
        let piece = Piece::new(
            ShapeId::I,
            ShapeId::I.spawn_matrix(),
            PiecePosition::new(i32::MAX - 1, i32::MAX),
        );
        let positions: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(
            positions,
            [
                (i32::MAX - 1, i32::MAX),
                (i32::MAX, i32::MAX),
                (i32::MAX, i32::MAX),
                (i32::MAX, i32::MAX),
            ]
        );
        assert_eq!(
            piece.moved(5, i32::MIN).position(),
            PiecePosition::new(i32::MAX, -1)
        );
        assert_eq!(
            PiecePosition::new(i32::MIN, 0).offset(-1, -1),
            PiecePosition::new(i32::MIN, -1)
        );
    }

    #[test]
    fn test_rotation_does_not_mutate_piece() {
        let piece = Piece::spawn(ShapeId::L, 10);
        let rotated = piece.rotated_clockwise();
        assert_ne!(&rotated, piece.shape());
        assert_eq!(piece.shape(), &ShapeId::L.spawn_matrix());

        let committed = piece.with_shape(rotated);
        assert_eq!(committed.position(), piece.position());
        assert_eq!(committed.shape(), &rotated);
        assert_eq!(committed.shape_id(), ShapeId::L);
    }
}
