use super::grid::Grid;

/// Points awarded per cleared line. Multi-line clears are not multiplied.
pub const POINTS_PER_LINE: usize = 10;

/// Removes every full row from `grid` and returns how many were removed.
///
/// Rows are scanned from the bottom up. When a row is cleared, the row that
/// slides into its index is examined again before moving on, so runs of
/// adjacent full rows are all cleared and each is counted exactly once.
/// Retained rows keep their relative order and empty rows fill the top.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Cell, Grid, GridSize, ShapeId, clear_completed_lines};
///
/// let mut grid = Grid::new(GridSize::STANDARD);
/// for col in 0..grid.cols() {
///     grid.set_cell(19, col, Cell::Filled(ShapeId::I)).unwrap();
/// }
/// assert_eq!(clear_completed_lines(&mut grid), 1);
/// assert_eq!(grid.filled_count(), 0);
/// ```
pub fn clear_completed_lines(grid: &mut Grid) -> usize {
    let mut cleared = 0;
    let mut row = grid.rows();
    while row > 0 {
        if grid.is_row_full(row - 1) && grid.clear_row(row - 1).is_ok() {
            cleared += 1;
            continue;
        }
        row -= 1;
    }
    cleared
}

/// Score gained for clearing `lines` rows at once.
#[must_use]
pub const fn line_clear_points(lines: usize) -> usize {
    lines * POINTS_PER_LINE
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::core::{
        grid::GridSize,
        shape::{Cell, ShapeId},
    };

    fn grid_from_rows(rows: &[&[u8]]) -> Grid {
        let size = GridSize::new(rows.len(), rows[0].len()).unwrap();
        let mut grid = Grid::new(size);
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                grid.set_cell(row, col, Cell::try_from(value).unwrap())
                    .unwrap();
            }
        }
        grid
    }

    fn numeric_rows(grid: &Grid) -> Vec<Vec<u8>> {
        grid.iter_rows()
            .map(|row| row.iter().map(|cell| cell.as_u8()).collect())
            .collect()
    }

    #[test]
    fn test_no_full_rows() {
        let mut grid = grid_from_rows(&[
            &[0, 0, 0, 0],
            &[1, 1, 0, 1],
            &[2, 2, 2, 0],
        ]);
        let before = grid.clone();
        assert_eq!(clear_completed_lines(&mut grid), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_adjacent_full_rows_are_all_cleared() {
        let mut grid = grid_from_rows(&[
            &[0, 0, 0, 0],
            &[0, 3, 0, 0],
            &[1, 1, 1, 1],
            &[2, 2, 2, 2],
            &[4, 0, 4, 4],
        ]);
        assert_eq!(clear_completed_lines(&mut grid), 2);
        assert_eq!(
            numeric_rows(&grid),
            [
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 3, 0, 0],
                [4, 0, 4, 4],
            ]
        );
    }

    #[test]
    fn test_interleaved_full_rows_keep_relative_order() {
        let mut grid = grid_from_rows(&[
            &[5, 0, 0, 0],
            &[7, 7, 7, 7],
            &[0, 6, 0, 0],
            &[7, 7, 7, 7],
            &[0, 0, 2, 0],
            &[7, 7, 7, 7],
        ]);
        assert_eq!(clear_completed_lines(&mut grid), 3);
        assert_eq!(
            numeric_rows(&grid),
            [
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [5, 0, 0, 0],
                [0, 6, 0, 0],
                [0, 0, 2, 0],
            ]
        );
    }

    #[test]
    fn test_every_row_full() {
        let mut grid = grid_from_rows(&[&[1, 2, 3, 4], &[5, 6, 7, 1], &[2, 2, 2, 2]]);
        assert_eq!(clear_completed_lines(&mut grid), 3);
        assert_eq!(grid.filled_count(), 0);
        assert_eq!(grid.rows(), 3);
    }

    #[test]
    fn test_points_are_flat_per_line() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 10);
        assert_eq!(line_clear_points(4), 40);
    }

    proptest! {
        #[test]
        fn clearing_removes_exactly_the_full_rows(
            full in prop::collection::vec(any::<bool>(), 1..24),
            seed in any::<u8>(),
        ) {
            let size = GridSize::new(full.len(), 6).unwrap();
            let mut grid = Grid::new(size);
            for (row, &is_full) in full.iter().enumerate() {
                for col in 0..size.cols() {
                    // partial rows keep one hole whose column depends on the row
                    let hole = (usize::from(seed) + row) % size.cols();
                    if is_full || col != hole {
                        grid.set_cell(row, col, Cell::Filled(ShapeId::ALL[row % ShapeId::LEN]))
                            .unwrap();
                    }
                }
            }
            let retained: Vec<Vec<Cell>> = grid
                .iter_rows()
                .filter(|row| !row.iter().all(|cell| cell.is_filled()))
                .map(<[Cell]>::to_vec)
                .collect();
            let expected_cleared = full.iter().filter(|&&f| f).count();

            prop_assert_eq!(clear_completed_lines(&mut grid), expected_cleared);
            prop_assert_eq!(grid.rows(), full.len());

            let rows: Vec<Vec<Cell>> = grid.iter_rows().map(<[Cell]>::to_vec).collect();
            let (top, bottom) = rows.split_at(expected_cleared);
            prop_assert!(top.iter().flatten().all(|cell| cell.is_empty()));
            prop_assert_eq!(bottom, &retained[..]);
        }
    }
}
