use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use blockfall_engine::{GridSize, PieceSeed};
use log::{LevelFilter, info};

use crate::{
    logger, music,
    score_store::{JsonLinesScoreStore, NullScoreStore, ScoreStore},
    tui::Runtime,
};

use self::app::{GameConfig, PlayApp};

mod app;
mod screens;

const DEFAULT_ROWS: usize = 20;
const DEFAULT_COLS: usize = 10;
const DEFAULT_TICK_RATE: f64 = 6.0;
const DEFAULT_SCORES_PATH: &str = "./data/scores.jsonl";

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub(crate) struct PlayArg {
    /// Player name; asked for on screen when omitted
    #[clap(long)]
    pub(crate) name: Option<String>,
    /// Board height in cells
    #[clap(long, default_value_t = DEFAULT_ROWS)]
    pub(crate) rows: usize,
    /// Board width in cells (at least 4)
    #[clap(long, default_value_t = DEFAULT_COLS)]
    pub(crate) cols: usize,
    /// Gravity steps per second
    #[clap(long, default_value_t = DEFAULT_TICK_RATE)]
    pub(crate) tick_rate: f64,
    /// Piece sequence seed (32 hex digits); random when omitted
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// File the final score is appended to
    #[clap(long, default_value = DEFAULT_SCORES_PATH)]
    pub(crate) scores: PathBuf,
    /// Do not save the final score
    #[clap(long)]
    pub(crate) no_save: bool,
    /// Audio file looped during play (needs the `music` feature)
    #[clap(long)]
    pub(crate) music: Option<PathBuf>,
    /// Write log messages to this file
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
    /// Most verbose level written to the log file
    #[clap(long, default_value_t = LevelFilter::Warn)]
    pub(crate) log_level: LevelFilter,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            name: None,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            tick_rate: DEFAULT_TICK_RATE,
            seed: None,
            scores: PathBuf::from(DEFAULT_SCORES_PATH),
            no_save: false,
            music: None,
            log_file: None,
            log_level: LevelFilter::Warn,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        name,
        rows,
        cols,
        tick_rate,
        seed,
        scores,
        no_save,
        music: music_path,
        log_file,
        log_level,
    } = arg;

    if let Some(path) = log_file {
        logger::init(path, *log_level)?;
    }

    let size = GridSize::new(*rows, *cols).context("Invalid board size")?;
    let tick_interval = tick_interval(*tick_rate)?;

    let store: Box<dyn ScoreStore> = if *no_save {
        Box::new(NullScoreStore)
    } else {
        info!("scores are saved to {}", scores.display());
        Box::new(JsonLinesScoreStore::new(scores))
    };
    let config = GameConfig {
        size,
        seed: *seed,
        tick_rate: *tick_rate,
        tick_interval,
    };
    let music = music::from_path(music_path.as_deref());
    let mut app = PlayApp::new(config, name.clone(), store, music);

    let result = Runtime::new().run(&mut app);
    logger::flush();
    result.context("Terminal error")?;

    if let Some(record) = app.final_record() {
        println!("Game over! {}: {}", record.player_name, record.score);
    }
    Ok(())
}

fn tick_interval(tick_rate: f64) -> anyhow::Result<Duration> {
    anyhow::ensure!(
        tick_rate.is_finite() && tick_rate > 0.0,
        "Tick rate must be a positive number, got {tick_rate}"
    );
    Duration::try_from_secs_f64(1.0 / tick_rate)
        .ok()
        .filter(|interval| !interval.is_zero())
        .with_context(|| format!("Tick rate {tick_rate} is out of range"))
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    #[derive(Debug, clap::Parser)]
    struct Wrapper {
        #[clap(flatten)]
        arg: PlayArg,
    }

    #[test]
    fn test_default_matches_parsed_defaults() {
        let parsed = Wrapper::try_parse_from(["play"]).unwrap().arg;
        assert_eq!(parsed, PlayArg::default());
    }

    #[test]
    fn test_invalid_board_is_rejected_before_terminal_setup() {
        let arg = PlayArg {
            cols: 3,
            no_save: true,
            ..PlayArg::default()
        };
        let err = run(&arg).unwrap_err();
        assert!(format!("{err:#}").contains("invalid grid size 20x3"), "{err:#}");
    }

    #[test]
    fn test_invalid_tick_rate_is_rejected() {
        let arg = PlayArg {
            tick_rate: 0.0,
            no_save: true,
            ..PlayArg::default()
        };
        assert!(run(&arg).is_err());
    }

    #[test]
    fn test_tick_rate_out_of_duration_range_is_rejected() {
        for tick_rate in [1e-30, 1e300, f64::MIN_POSITIVE] {
            let err = tick_interval(tick_rate).unwrap_err();
            assert!(err.to_string().contains("out of range"), "{tick_rate}: {err}");
        }
        let arg = PlayArg {
            tick_rate: 1e-30,
            no_save: true,
            ..PlayArg::default()
        };
        assert!(run(&arg).is_err());
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(tick_interval(4.0).unwrap(), Duration::from_millis(250));
        assert_eq!(tick_interval(1.0).unwrap(), Duration::from_secs(1));
        assert!(tick_interval(f64::NAN).is_err());
        assert!(tick_interval(-6.0).is_err());
    }
}
