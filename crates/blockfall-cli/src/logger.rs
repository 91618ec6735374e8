use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write as _},
    path::Path,
    sync::Mutex,
};

use anyhow::Context as _;
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};

/// Appends log lines to a file.
///
/// The terminal belongs to the UI while playing, so this is the only place
/// log output goes.
struct FileLogger {
    level: LevelFilter,
    writer: Mutex<BufWriter<File>>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        let _ = writeln!(
            writer,
            "{} {:<5} {}: {}",
            Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

/// Installs the global logger writing to `path`.
pub fn init(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let logger = FileLogger {
        level,
        writer: Mutex::new(BufWriter::new(file)),
    };
    log::set_boxed_logger(Box::new(logger)).context("Logger already installed")?;
    log::set_max_level(level);
    Ok(())
}

/// Flushes buffered log lines. Call before the process exits.
pub fn flush() {
    log::logger().flush();
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use log::Level;

    use super::*;

    fn temp_log() -> (std::path::PathBuf, FileLogger) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "blockfall_log_{}_{nanos}.log",
            std::process::id()
        ));
        let file = File::create(&path).unwrap();
        let logger = FileLogger {
            level: LevelFilter::Info,
            writer: Mutex::new(BufWriter::new(file)),
        };
        (path, logger)
    }

    #[test]
    fn test_filters_by_level() {
        let (path, logger) = temp_log();
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("blockfall")
                .args(format_args!("kept"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("blockfall")
                .args(format_args!("dropped"))
                .build(),
        );
        logger.flush();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("INFO  blockfall: kept"), "{text}");
        fs::remove_file(path).unwrap();
    }
}
