use serde::{Deserialize, Serialize};

use super::shape::{Cell, MAX_SHAPE_SIZE};

/// Grid dimensions were too small to play on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid grid size {rows}x{cols}: need at least 1 row and 4 columns")]
pub struct InvalidDimensions {
    pub rows: usize,
    pub cols: usize,
}

/// A grid coordinate outside `[0, rows) x [0, cols)` was accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell (row {row}, col {col}) is outside the {rows}x{cols} grid")]
pub struct OutOfBounds {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

/// Fixed dimensions of a [`Grid`], in cells.
///
/// Deserialization goes through [`GridSize::new`], so a decoded size is always
/// playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGridSize")]
pub struct GridSize {
    rows: usize,
    cols: usize,
}

#[derive(Deserialize)]
struct RawGridSize {
    rows: usize,
    cols: usize,
}

impl TryFrom<RawGridSize> for GridSize {
    type Error = InvalidDimensions;

    fn try_from(raw: RawGridSize) -> Result<Self, Self::Error> {
        Self::new(raw.rows, raw.cols)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl GridSize {
    /// 20 rows by 10 columns.
    pub const STANDARD: Self = Self { rows: 20, cols: 10 };

    /// Creates a size, rejecting boards that cannot fit the widest shape.
    pub fn new(rows: usize, cols: usize) -> Result<Self, InvalidDimensions> {
        if rows == 0 || cols < MAX_SHAPE_SIZE {
            return Err(InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Derives the cell grid from a drawing surface measured in pixels.
    ///
    /// ```
    /// use blockfall_engine::GridSize;
    ///
    /// let size = GridSize::from_surface(300, 600, 30).unwrap();
    /// assert_eq!(size, GridSize::STANDARD);
    /// ```
    pub fn from_surface(
        width_px: usize,
        height_px: usize,
        cell_px: usize,
    ) -> Result<Self, InvalidDimensions> {
        if cell_px == 0 {
            return Err(InvalidDimensions { rows: 0, cols: 0 });
        }
        Self::new(height_px / cell_px, width_px / cell_px)
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }
}

/// The board of locked cells.
///
/// Row 0 is the top of the board. The dimensions are fixed at construction;
/// clearing a row shifts the rows above it down and inserts an empty row at
/// the top, so the row count never changes.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Cell, Grid, GridSize, ShapeId};
///
/// let mut grid = Grid::new(GridSize::STANDARD);
/// grid.set_cell(19, 0, Cell::Filled(ShapeId::O)).unwrap();
/// assert_eq!(grid.cell_at(19, 0).unwrap(), Cell::Filled(ShapeId::O));
/// assert!(grid.cell_at(20, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    rows: Vec<Box<[Cell]>>,
}

impl Grid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        let rows = (0..size.rows())
            .map(|_| vec![Cell::Empty; size.cols()].into_boxed_slice())
            .collect();
        Self { size, rows }
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.size.rows()
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.size.cols()
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> OutOfBounds {
        OutOfBounds {
            row,
            col,
            rows: self.rows(),
            cols: self.cols(),
        }
    }

    /// Returns the cell at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row)?.get(col).copied()
    }

    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row)?.get_mut(col)
    }

    /// Like [`Self::get`], but reports the bad coordinate.
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, OutOfBounds> {
        self.get(row, col)
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Overwrites the cell at `(row, col)` unconditionally.
    pub fn set_cell(&mut self, row: usize, col: usize, value: Cell) -> Result<(), OutOfBounds> {
        let err = self.out_of_bounds(row, col);
        let cell = self.get_mut(row, col).ok_or(err)?;
        *cell = value;
        Ok(())
    }

    /// Returns the cells of one row, left to right.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(|cells| &cells[..])
    }

    /// Iterates all rows, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(|cells| &cells[..])
    }

    /// Returns `true` if every cell in the row is filled.
    ///
    /// Rows outside the grid are never full.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|cell| cell.is_filled()))
    }

    /// Removes `row` and inserts an empty row at the top.
    ///
    /// Rows above the removed one move down by one; rows below stay put.
    pub fn clear_row(&mut self, row: usize) -> Result<(), OutOfBounds> {
        if row >= self.rows() {
            return Err(self.out_of_bounds(row, 0));
        }
        self.rows[..=row].rotate_right(1);
        self.rows[0].fill(Cell::Empty);
        Ok(())
    }

    /// Number of filled cells on the whole board.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.iter_rows()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count()
    }
}
