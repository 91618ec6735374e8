use blockfall_engine::{Cell, MAX_SHAPE_SIZE, ShapeMatrix};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

/// Preview of a single shape, centered in a box that fits any spawn shape.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    shape: Option<&'a ShapeMatrix>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            shape: None,
            block: None,
        }
    }

    pub fn shape(self, shape: &'a ShapeMatrix) -> Self {
        Self {
            shape: Some(shape),
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
        super::cells_to_u16(MAX_SHAPE_SIZE, BlockDisplay::width())
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(shape) = self.shape else {
            return;
        };
        let (width, height) = (shape.width(), shape.height());
        let shape_area = area.centered(
            Constraint::Length(super::cells_to_u16(width, BlockDisplay::width())),
            Constraint::Length(super::cells_to_u16(height, BlockDisplay::height())),
        );

        let horizontal = Layout::horizontal((0..width).map(|_| Constraint::Length(BlockDisplay::width())))
            .flex(Flex::Center);
        let vertical = Layout::vertical((0..height).map(|_| Constraint::Length(BlockDisplay::height())));
        let screen_rows = shape_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (screen_row, cells) in screen_rows.zip(shape.rows()) {
            for (screen_cell, &cell) in screen_row.into_iter().zip(cells) {
                if let Cell::Filled(_) = cell {
                    BlockDisplay::from_cell(cell, false).render(screen_cell, buf);
                }
            }
        }
    }
}
