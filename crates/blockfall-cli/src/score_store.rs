use std::{
    fs::{self, File, OpenOptions},
    io::{BufRead as _, BufReader, BufWriter, ErrorKind, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;

use crate::schema::score::ScoreRecord;

/// Destination for finished games.
pub trait ScoreStore {
    fn save(&mut self, record: &ScoreRecord) -> anyhow::Result<()>;
}

/// Discards every record. Used with `--no-save`.
#[derive(Debug, Default)]
pub struct NullScoreStore;

impl ScoreStore for NullScoreStore {
    fn save(&mut self, _record: &ScoreRecord) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Appends records to a file as JSON lines, one object per game.
#[derive(Debug, Clone)]
pub struct JsonLinesScoreStore {
    path: PathBuf,
}

impl JsonLinesScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads every saved record in file order.
    ///
    /// A missing file has no records. Blank lines are skipped.
    pub fn load_all(&self) -> anyhow::Result<Vec<ScoreRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open {}", self.path.display()));
            }
        };

        let mut records = vec![];
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let lineno = i + 1;
            let line = line.with_context(|| {
                format!("Failed to read {}:{lineno}", self.path.display())
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).with_context(|| {
                format!("Malformed score record at {}:{lineno}", self.path.display())
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

impl ScoreStore for JsonLinesScoreStore {
    fn save(&mut self, record: &ScoreRecord) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, record)
            .with_context(|| format!("Failed to write JSON to {}", self.path.display()))?;
        writeln!(writer)
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to flush output to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir()
            .join(format!("blockfall_{name}_{}_{nanos}", std::process::id()))
            .join("scores.jsonl")
    }

    #[test]
    fn test_save_creates_parent_and_appends() {
        let path = temp_path("append");
        let mut store = JsonLinesScoreStore::new(&path);
        let first = ScoreRecord::now("ada", 10);
        let second = ScoreRecord::now("Player", 0);

        store.save(&first).unwrap();
        store.save(&second).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(store.load_all().unwrap(), [first, second]);

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_missing_file_has_no_records() {
        let store = JsonLinesScoreStore::new(temp_path("missing"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_are_skipped_and_bad_lines_reported() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            "{\"player_name\":\"a\",\"score\":20,\"recorded_at\":\"2024-05-01T12:00:00Z\"}\n\
             \n\
             not json\n",
        )
        .unwrap();

        let store = JsonLinesScoreStore::new(&path);
        let err = store.load_all().unwrap_err();
        assert!(format!("{err}").ends_with("scores.jsonl:3"), "{err}");

        fs::write(
            &path,
            "\n{\"player_name\":\"a\",\"score\":20,\"recorded_at\":\"2024-05-01T12:00:00Z\"}\n\n",
        )
        .unwrap();
        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, 20);

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = temp_path("unwritable");
        fs::create_dir_all(&dir).unwrap();
        // the target path is a directory
        let mut store = JsonLinesScoreStore::new(&dir);
        assert!(store.save(&ScoreRecord::now("ada", 10)).is_err());
        fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_null_store_accepts_everything() {
        let mut store = NullScoreStore;
        store.save(&ScoreRecord::now("ada", 10)).unwrap();
    }
}
