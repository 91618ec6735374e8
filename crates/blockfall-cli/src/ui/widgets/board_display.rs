use std::iter;

use blockfall_engine::{Cell, Grid, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

/// The locked cells of a grid with the falling piece drawn on top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    falling_piece: Option<&'a Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            falling_piece: None,
            block: None,
        }
    }

    pub fn falling_piece(self, piece: &'a Piece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::cells_to_u16(self.grid.cols(), BlockDisplay::width())
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cells_to_u16(self.grid.rows(), BlockDisplay::height())
            + super::block_vertical_margin(self.block.as_ref())
    }

    /// Grid cells with the falling piece stamped in. Piece cells above the
    /// board are not shown.
    fn cells(&self) -> Vec<Vec<Cell>> {
        let mut cells: Vec<Vec<Cell>> = self.grid.iter_rows().map(<[Cell]>::to_vec).collect();
        if let Some(piece) = self.falling_piece {
            for (x, y, shape_id) in piece.blocks() {
                if let (Ok(row), Ok(col)) = (usize::try_from(y), usize::try_from(x))
                    && let Some(cell) = cells.get_mut(row).and_then(|r| r.get_mut(col))
                {
                    *cell = Cell::Filled(shape_id);
                }
            }
        }
        cells
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.grid.cols()).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..self.grid.rows()).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let screen_rows = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (screen_row, row) in iter::zip(screen_rows, self.cells()) {
            for (screen_cell, cell) in iter::zip(screen_row, row) {
                BlockDisplay::from_cell(cell, true).render(screen_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GridSize, PiecePosition, ShapeId};

    use super::*;

    #[test]
    fn test_falling_piece_is_overlaid() {
        let mut grid = Grid::new(GridSize::new(4, 4).unwrap());
        grid.set_cell(3, 0, Cell::Filled(ShapeId::Z)).unwrap();
        let piece = Piece::new(ShapeId::O, ShapeId::O.spawn_matrix(), PiecePosition::new(2, -1));

        let display = BoardDisplay::new(&grid).falling_piece(&piece);
        let cells = display.cells();
        let numeric: Vec<Vec<u8>> = cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.as_u8()).collect())
            .collect();
        assert_eq!(
            numeric,
            [[0, 0, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0], [3, 0, 0, 0]]
        );
        // the grid itself is untouched
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_size_includes_border() {
        let grid = Grid::new(GridSize::STANDARD);
        let display = BoardDisplay::new(&grid).block(BlockWidget::bordered());
        assert_eq!(display.width(), 22);
        assert_eq!(display.height(), 22);
    }
}
