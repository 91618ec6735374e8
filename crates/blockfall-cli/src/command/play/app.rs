use std::time::Duration;

use blockfall_engine::{GameEngine, GridSize, PieceSeed};
use crossterm::event::{Event, KeyEventKind};
use log::{info, warn};
use ratatui::Frame;

use crate::{
    music::MusicPlayer,
    schema::score::ScoreRecord,
    score_store::ScoreStore,
    tui::{App, Runtime},
};

use super::screens::{
    GameOverScreen, NameEntryOutcome, NameEntryScreen, PlayCommand, PlayingScreen,
    command_for_key,
};

/// Engine settings fixed for the whole run.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub size: GridSize,
    pub seed: Option<PieceSeed>,
    pub tick_rate: f64,
    /// `1 / tick_rate`, validated by the caller.
    pub tick_interval: Duration,
}

#[derive(Debug, derive_more::IsVariant)]
enum Screen {
    NameEntry(NameEntryScreen),
    Playing(PlayingScreen),
    GameOver(GameOverScreen),
}

/// Name entry, then one game, then the game-over screen.
pub struct PlayApp {
    config: GameConfig,
    screen: Screen,
    store: Box<dyn ScoreStore>,
    music: Box<dyn MusicPlayer>,
    final_record: Option<ScoreRecord>,
    is_exiting: bool,
}

impl PlayApp {
    /// Skips name entry when `player_name` is given.
    pub fn new(
        config: GameConfig,
        player_name: Option<String>,
        store: Box<dyn ScoreStore>,
        music: Box<dyn MusicPlayer>,
    ) -> Self {
        let mut app = Self {
            config,
            screen: Screen::NameEntry(NameEntryScreen::new()),
            store,
            music,
            final_record: None,
            is_exiting: false,
        };
        if let Some(name) = player_name {
            app.start_game(super::screens::player_name(&name));
        }
        app
    }

    /// The saved result, if a game was played to the end.
    pub fn final_record(&self) -> Option<&ScoreRecord> {
        self.final_record.as_ref()
    }

    fn start_game(&mut self, player_name: String) {
        let engine = match self.config.seed {
            Some(seed) => GameEngine::with_seed(self.config.size, seed),
            None => GameEngine::new(self.config.size),
        };
        info!("{player_name} starts a game with seed {}", engine.seed());
        self.music.start();
        self.screen = Screen::Playing(PlayingScreen::new(
            engine,
            player_name,
            self.config.tick_rate,
        ));
    }

    fn finish_game(&mut self) {
        let Screen::Playing(screen) = &self.screen else {
            return;
        };
        let record = ScoreRecord::now(screen.player_name(), screen.engine().score());
        info!(
            "{} finished with score {}",
            record.player_name, record.score
        );
        if let Err(e) = self.store.save(&record) {
            warn!("failed to save score: {e:#}");
        }
        self.screen = Screen::GameOver(GameOverScreen::new(
            record.player_name.clone(),
            record.score,
        ));
        self.final_record = Some(record);
    }

    fn sync_tick_rate(&self, runtime: &mut Runtime) {
        let interval = self.screen.is_playing().then_some(self.config.tick_interval);
        runtime.set_tick_interval(interval);
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        self.sync_tick_rate(runtime);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match &mut self.screen {
            Screen::NameEntry(screen) => match screen.handle_key(key.code) {
                NameEntryOutcome::Editing => {}
                NameEntryOutcome::Submitted(name) => {
                    self.start_game(name);
                    self.sync_tick_rate(runtime);
                }
                NameEntryOutcome::Cancelled => self.is_exiting = true,
            },
            Screen::Playing(screen) => match command_for_key(key.code) {
                Some(PlayCommand::Quit) => {
                    info!("quit before the game ended, nothing saved");
                    self.is_exiting = true;
                }
                Some(command) => screen.apply(command),
                None => {}
            },
            Screen::GameOver(_) => self.is_exiting = true,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        match &self.screen {
            Screen::NameEntry(screen) => screen.draw(frame),
            Screen::Playing(screen) => screen.draw(frame),
            Screen::GameOver(screen) => screen.draw(frame),
        }
    }

    fn update(&mut self, runtime: &mut Runtime) {
        let Screen::Playing(screen) = &mut self.screen else {
            return;
        };
        screen.tick();
        if screen.engine().is_game_over() {
            self.finish_game();
            self.sync_tick_rate(runtime);
        }
    }
}
