use blockfall_engine::GameEngine;
use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    widgets::Block as BlockWidget,
};

use crate::ui::widgets::{
    BoardDisplay, KeyBinding, KeyBindingDisplay, PieceDisplay, StatsDisplay, style,
};

const BINDINGS: &[KeyBinding<'static>] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Esc", "Q"], "Quit"),
];

/// A player command decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    Move { dx: i32, dy: i32 },
    Rotate,
    Quit,
}

/// Maps arrow keys to engine commands. One key, one command.
pub fn command_for_key(code: KeyCode) -> Option<PlayCommand> {
    let command = match code {
        KeyCode::Left => PlayCommand::Move { dx: -1, dy: 0 },
        KeyCode::Right => PlayCommand::Move { dx: 1, dy: 0 },
        KeyCode::Down => PlayCommand::Move { dx: 0, dy: 1 },
        KeyCode::Up => PlayCommand::Rotate,
        KeyCode::Esc | KeyCode::Char('q') => PlayCommand::Quit,
        _ => return None,
    };
    Some(command)
}

#[derive(Debug)]
pub struct PlayingScreen {
    engine: GameEngine,
    player_name: String,
    tick_rate: f64,
}

impl PlayingScreen {
    pub fn new(engine: GameEngine, player_name: String, tick_rate: f64) -> Self {
        Self {
            engine,
            player_name,
            tick_rate,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Applies a move or rotation. Blocked input is ignored.
    pub fn apply(&mut self, command: PlayCommand) {
        match command {
            PlayCommand::Move { dx, dy } => _ = self.engine.try_move(dx, dy),
            PlayCommand::Rotate => _ = self.engine.try_rotate(),
            PlayCommand::Quit => {}
        }
    }

    pub fn tick(&mut self) {
        _ = self.engine.tick();
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let board = BoardDisplay::new(self.engine.grid())
            .falling_piece(self.engine.current_piece())
            .block(BlockWidget::bordered().border_style(style::DIM));
        let next = PieceDisplay::new()
            .shape(self.engine.next_piece().shape())
            .block(
                BlockWidget::bordered()
                    .title("NEXT")
                    .border_style(style::DIM),
            );
        let stats = StatsDisplay::new(&self.engine, &self.player_name, self.tick_rate)
            .block(BlockWidget::bordered().border_style(style::DIM));

        let side_width = next.width().max(stats.width());
        let [main_area, help_area] = frame.area().layout(&Layout::vertical([
            Constraint::Length(board.height()),
            Constraint::Length(1),
        ]));
        let [board_area, side_area] = main_area.layout(
            &Layout::horizontal([
                Constraint::Length(board.width()),
                Constraint::Length(side_width),
            ])
            .flex(Flex::Center)
            .spacing(1),
        );
        let [next_area, stats_area] = side_area.layout(&Layout::vertical([
            Constraint::Length(next.height()),
            Constraint::Length(stats.height()),
        ]));

        frame.render_widget(board, board_area);
        frame.render_widget(next, next_area);
        frame.render_widget(stats, stats_area);
        frame.render_widget(KeyBindingDisplay::new(BINDINGS), help_area);
    }
}
