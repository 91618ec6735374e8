use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::{Block as BlockWidget, Paragraph},
};

use crate::ui::widgets::{KeyBinding, KeyBindingDisplay, style};

/// Name used when the player submits a blank name.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

const MAX_NAME_LEN: usize = 20;

const BINDINGS: &[KeyBinding<'static>] = &[(&["Enter"], "Start"), (&["Esc"], "Quit")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEntryOutcome {
    Editing,
    Submitted(String),
    Cancelled,
}

/// Text input for the player's name.
#[derive(Debug, Default)]
pub struct NameEntryScreen {
    input: String,
}

impl NameEntryScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, code: KeyCode) -> NameEntryOutcome {
        match code {
            KeyCode::Enter => return NameEntryOutcome::Submitted(player_name(&self.input)),
            KeyCode::Esc => return NameEntryOutcome::Cancelled,
            KeyCode::Backspace => _ = self.input.pop(),
            KeyCode::Char(c) if !c.is_control() && self.input.chars().count() < MAX_NAME_LEN => {
                self.input.push(c);
            }
            _ => {}
        }
        NameEntryOutcome::Editing
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let area = frame.area().centered(
            Constraint::Length(u16::try_from(MAX_NAME_LEN).unwrap_or(u16::MAX) + 4),
            Constraint::Length(6),
        );
        let [prompt_area, input_area, _, help_area] = area.layout(&Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ]));

        frame.render_widget(
            Line::styled("Enter your name:", style::TITLE).centered(),
            prompt_area,
        );
        let input = Paragraph::new(format!("{}_", self.input))
            .style(style::DEFAULT)
            .block(BlockWidget::bordered().border_style(style::DIM));
        frame.render_widget(input, input_area);
        frame.render_widget(KeyBindingDisplay::new(BINDINGS), help_area);
    }
}

/// Returns `input` unchanged, or the default name if it is blank.
pub fn player_name(input: &str) -> String {
    if input.trim().is_empty() {
        DEFAULT_PLAYER_NAME.to_owned()
    } else {
        input.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(screen: &mut NameEntryScreen, text: &str) {
        for c in text.chars() {
            assert_eq!(screen.handle_key(KeyCode::Char(c)), NameEntryOutcome::Editing);
        }
    }

    #[test]
    fn test_blank_name_defaults() {
        assert_eq!(player_name(""), "Player");
        assert_eq!(player_name("   "), "Player");
        assert_eq!(player_name(" ada "), " ada ");
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut screen = NameEntryScreen::new();
        type_text(&mut screen, "adaa");
        screen.handle_key(KeyCode::Backspace);
        assert_eq!(
            screen.handle_key(KeyCode::Enter),
            NameEntryOutcome::Submitted("ada".to_owned())
        );
    }

    #[test]
    fn test_enter_without_input() {
        let mut screen = NameEntryScreen::new();
        screen.handle_key(KeyCode::Backspace);
        assert_eq!(
            screen.handle_key(KeyCode::Enter),
            NameEntryOutcome::Submitted("Player".to_owned())
        );
    }

    #[test]
    fn test_input_is_capped() {
        let mut screen = NameEntryScreen::new();
        type_text(&mut screen, &"x".repeat(MAX_NAME_LEN + 5));
        assert_eq!(screen.input.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_escape_cancels() {
        let mut screen = NameEntryScreen::new();
        type_text(&mut screen, "q");
        assert_eq!(screen.handle_key(KeyCode::Esc), NameEntryOutcome::Cancelled);
    }
}
