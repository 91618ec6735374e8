use blockfall_engine::{Cell, ShapeId};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_cell(cell: Cell, show_dots: bool) -> Self {
        match cell {
            Cell::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Cell::Empty => Self::new(style::EMPTY, ""),
            Cell::Filled(shape_id) => Self::new(shape_style(shape_id), ""),
        }
    }
}

pub fn shape_style(shape_id: ShapeId) -> Style {
    match shape_id {
        ShapeId::T => style::T_BLOCK,
        ShapeId::O => style::O_BLOCK,
        ShapeId::Z => style::Z_BLOCK,
        ShapeId::S => style::S_BLOCK,
        ShapeId::I => style::I_BLOCK,
        ShapeId::L => style::L_BLOCK,
        ShapeId::J => style::J_BLOCK,
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area, not just the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_its_own_color() {
        let styles: Vec<_> = ShapeId::ALL.into_iter().map(shape_style).collect();
        for (i, a) in styles.iter().enumerate() {
            for b in &styles[i + 1..] {
                assert_ne!(a, b);
            }
            assert_ne!(a, &style::EMPTY);
        }
    }

    #[test]
    fn test_empty_cell_symbol() {
        assert_eq!(BlockDisplay::from_cell(Cell::Empty, true).symbol, ".");
        assert_eq!(BlockDisplay::from_cell(Cell::Empty, false).symbol, "");
    }
}
