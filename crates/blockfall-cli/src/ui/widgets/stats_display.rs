use std::iter;

use blockfall_engine::GameEngine;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

/// Score panel shown beside the board.
pub struct StatsDisplay<'a> {
    stats: StatsView<'a>,
    block: Option<BlockWidget<'a>>,
}

#[derive(Clone, Copy)]
struct StatsView<'a> {
    engine: &'a GameEngine,
    player_name: &'a str,
    tick_rate: f64,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(engine: &'a GameEngine, player_name: &'a str, tick_rate: f64) -> Self {
        Self {
            stats: StatsView {
                engine,
                player_name,
                tick_rate,
            },
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

type Value = &'static dyn Fn(&StatsView<'_>) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(Value),
    LabelValue(&'static str, Value),
}

const ROWS: &[Row] = &[
    Row::FullLabel("PLAYER:"),
    Row::FullValue(&|stats| stats.player_name.to_owned()),
    Row::Empty,
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|stats| stats.engine.score().to_string()),
    Row::Empty,
    Row::LabelValue("LINES:", &|stats| {
        stats.engine.stats().total_cleared_lines().to_string()
    }),
    Row::LabelValue("PIECES:", &|stats| {
        stats.engine.stats().completed_pieces().to_string()
    }),
    Row::LabelValue("TIME:", &|stats| {
        format_elapsed(stats.engine.ticks(), stats.tick_rate)
    }),
];

/// Formats the time `ticks` gravity steps take as `m:ss`.
#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_elapsed(ticks: u64, tick_rate: f64) -> String {
    let secs = (ticks as f64 / tick_rate) as u64;
    format!("{}:{:02}", secs / 60, secs % 60)
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;
        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(&self.stats), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(&self.stats), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0, 6.0), "0:00");
        assert_eq!(format_elapsed(5, 6.0), "0:00");
        assert_eq!(format_elapsed(6, 6.0), "0:01");
        assert_eq!(format_elapsed(6 * 75, 6.0), "1:15");
    }
}
