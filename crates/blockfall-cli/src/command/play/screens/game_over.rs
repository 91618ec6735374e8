use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::Block as BlockWidget,
};

use crate::ui::widgets::{KeyBinding, KeyBindingDisplay, style};

const BINDINGS: &[KeyBinding<'static>] = &[(&["any key"], "Exit")];

/// Final screen. Any key exits.
#[derive(Debug)]
pub struct GameOverScreen {
    player_name: String,
    score: usize,
}

impl GameOverScreen {
    pub fn new(player_name: String, score: usize) -> Self {
        Self { player_name, score }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let area = frame.area().centered(Constraint::Length(30), Constraint::Length(7));
        let block = BlockWidget::bordered().border_style(style::DIM);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, _, name_area, score_area, help_area] =
            inner.layout(&Layout::vertical([Constraint::Length(1); 5]));
        frame.render_widget(Line::styled("Game Over!", style::TITLE).centered(), title_area);
        frame.render_widget(
            Line::styled(self.player_name.as_str(), style::DEFAULT).centered(),
            name_area,
        );
        frame.render_widget(
            Line::styled(format!("Score: {}", self.score), style::DEFAULT).centered(),
            score_area,
        );
        frame.render_widget(KeyBindingDisplay::new(BINDINGS), help_area);
    }
}
