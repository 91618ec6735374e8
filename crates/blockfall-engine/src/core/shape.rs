use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

/// Identifies one of the seven tetromino types.
///
/// The numeric value (1-7) is what a locked grid cell stores, and what the
/// render layer uses to pick a color. `0` is reserved for empty cells and is
/// never a valid `ShapeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum ShapeId {
    /// T-piece.
    T = 1,
    /// O-piece.
    O = 2,
    /// Z-piece.
    Z = 3,
    /// S-piece.
    S = 4,
    /// I-piece.
    I = 5,
    /// L-piece.
    L = 6,
    /// J-piece.
    J = 7,
}

/// A number outside `1..=7` was used as a [`ShapeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid shape id {_0}: expected 1-7")]
pub struct InvalidShapeId(#[error(not(source))] pub u8);

impl ShapeId {
    /// Number of shape types (7).
    pub const LEN: usize = 7;

    /// All shape ids in ascending numeric order.
    pub const ALL: [ShapeId; Self::LEN] = [
        ShapeId::T,
        ShapeId::O,
        ShapeId::Z,
        ShapeId::S,
        ShapeId::I,
        ShapeId::L,
        ShapeId::J,
    ];

    /// Numeric id, `1..=7`.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the single character name of this shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeId;
    ///
    /// assert_eq!(ShapeId::I.as_char(), 'I');
    /// assert_eq!(ShapeId::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeId::T => 'T',
            ShapeId::O => 'O',
            ShapeId::Z => 'Z',
            ShapeId::S => 'S',
            ShapeId::I => 'I',
            ShapeId::L => 'L',
            ShapeId::J => 'J',
        }
    }

    /// Returns the matrix this shape spawns with.
    #[must_use]
    pub const fn spawn_matrix(self) -> ShapeMatrix {
        SPAWN_MATRICES[self as usize - 1]
    }
}

impl TryFrom<u8> for ShapeId {
    type Error = InvalidShapeId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=7 => Ok(ShapeId::ALL[usize::from(value) - 1]),
            _ => Err(InvalidShapeId(value)),
        }
    }
}

impl From<ShapeId> for u8 {
    fn from(id: ShapeId) -> Self {
        id.as_u8()
    }
}

/// Uniform, independent draws over all seven shapes.
impl Distribution<ShapeId> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeId {
        ShapeId::ALL[rng.random_range(0..ShapeId::LEN)]
    }
}

/// Content of a single grid or shape-matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Filled(ShapeId),
}

impl Cell {
    /// Returns the shape that occupies this cell, if any.
    #[must_use]
    pub const fn shape_id(self) -> Option<ShapeId> {
        match self {
            Cell::Empty => None,
            Cell::Filled(id) => Some(id),
        }
    }

    /// Numeric form: `0` for empty, otherwise the shape id.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(id) => id.as_u8(),
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = InvalidShapeId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value == 0 {
            Ok(Cell::Empty)
        } else {
            ShapeId::try_from(value).map(Cell::Filled)
        }
    }
}

/// Largest side of any shape matrix.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Rows of a shape matrix could not be turned into a [`ShapeMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidShape {
    #[display("shape matrix must have between 1 and 4 rows and columns")]
    BadSize,
    #[display("shape matrix rows must all have the same length")]
    Ragged,
    #[display("{_0}")]
    Cell(InvalidShapeId),
}

impl From<InvalidShapeId> for InvalidShape {
    fn from(err: InvalidShapeId) -> Self {
        InvalidShape::Cell(err)
    }
}

/// Occupancy matrix of a piece inside its local bounding box.
///
/// Stored in a fixed 4x4 array; only the top-left `width x height` region is
/// meaningful and everything outside it is always [`Cell::Empty`].
/// Orientation is implicit: rotating produces a new matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMatrix {
    width: u8,
    height: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    const fn new(width: u8, height: u8, cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        Self {
            width,
            height,
            cells,
        }
    }

    /// Builds a matrix from numeric rows (`0` = empty, `1..=7` = shape id).
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::{ShapeId, ShapeMatrix};
    ///
    /// let matrix = ShapeMatrix::from_rows(&[[5_u8, 5, 5, 5]]).unwrap();
    /// assert_eq!(matrix, ShapeId::I.spawn_matrix());
    /// ```
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, InvalidShape>
    where
        R: AsRef<[u8]>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if !(1..=MAX_SHAPE_SIZE).contains(&height) || !(1..=MAX_SHAPE_SIZE).contains(&width) {
            return Err(InvalidShape::BadSize);
        }

        let mut cells = [[Cell::Empty; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(InvalidShape::Ragged);
            }
            for (x, &value) in row.iter().enumerate() {
                cells[y][x] = Cell::try_from(value)?;
            }
        }

        #[expect(clippy::cast_possible_truncation)]
        let (width, height) = (width as u8, height as u8);
        Ok(Self::new(width, height, cells))
    }

    /// Width of the bounding box.
    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    /// Height of the bounding box.
    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    /// Returns the cell at local `(x, y)`, or `Empty` outside the bounding box.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x < self.width() && y < self.height() {
            self.cells[y][x]
        } else {
            Cell::Empty
        }
    }

    /// Iterates the rows of the bounding box, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells[..self.height()]
            .iter()
            .map(|row| &row[..self.width()])
    }

    /// Iterates occupied cells as local `(x, y, shape)` triples in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, ShapeId)> + '_ {
        self.rows().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.shape_id().map(|id| (x, y, id)))
        })
    }

    /// Numeric form of the matrix, one `Vec` per row.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.as_u8()).collect())
            .collect()
    }

    /// Returns this matrix rotated 90° clockwise.
    ///
    /// The result is the transpose of the row-reversed matrix, so a
    /// `w x h` matrix becomes `h x w`. Pure: validity against a grid is the
    /// caller's concern.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeMatrix;
    ///
    /// let l = ShapeMatrix::from_rows(&[[6_u8, 6, 6], [6, 0, 0]]).unwrap();
    /// assert_eq!(l.rotated_clockwise().to_rows(), [[6, 6], [0, 6], [0, 6]]);
    /// ```
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        let old_height = self.height as usize;
        let new_width = self.height;
        let new_height = self.width;

        let mut cells = [[Cell::Empty; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < new_height as usize {
            let mut x = 0;
            while x < new_width as usize {
                cells[y][x] = self.cells[old_height - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        Self::new(new_width, new_height, cells)
    }
}

const SPAWN_MATRICES: [ShapeMatrix; ShapeId::LEN] = {
    use Cell::Empty as E;
    const T: Cell = Cell::Filled(ShapeId::T);
    const O: Cell = Cell::Filled(ShapeId::O);
    const Z: Cell = Cell::Filled(ShapeId::Z);
    const S: Cell = Cell::Filled(ShapeId::S);
    const I: Cell = Cell::Filled(ShapeId::I);
    const L: Cell = Cell::Filled(ShapeId::L);
    const J: Cell = Cell::Filled(ShapeId::J);
    const EEEE: [Cell; 4] = [E; 4];
    [
        ShapeMatrix::new(3, 2, [[T, T, T, E], [E, T, E, E], EEEE, EEEE]),
        ShapeMatrix::new(2, 2, [[O, O, E, E], [O, O, E, E], EEEE, EEEE]),
        ShapeMatrix::new(3, 2, [[Z, Z, E, E], [E, Z, Z, E], EEEE, EEEE]),
        ShapeMatrix::new(3, 2, [[E, S, S, E], [S, S, E, E], EEEE, EEEE]),
        ShapeMatrix::new(4, 1, [[I, I, I, I], EEEE, EEEE, EEEE]),
        ShapeMatrix::new(3, 2, [[L, L, L, E], [L, E, E, E], EEEE, EEEE]),
        ShapeMatrix::new(3, 2, [[J, J, J, E], [E, E, J, E], EEEE, EEEE]),
    ]
};
