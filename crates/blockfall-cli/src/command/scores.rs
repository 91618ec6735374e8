use std::{
    io,
    path::PathBuf,
};

use anyhow::Context as _;

use crate::{
    schema::score::{self, ScoreRecord},
    score_store::JsonLinesScoreStore,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoresArg {
    /// Score file written by `play`
    #[clap(long, default_value = "./data/scores.jsonl")]
    scores: PathBuf,
    /// Number of entries to show
    #[clap(long, default_value_t = 10)]
    pub(crate) limit: usize,
}

pub(crate) fn run(arg: &ScoresArg) -> anyhow::Result<()> {
    let ScoresArg { scores, limit } = arg;

    let mut records = JsonLinesScoreStore::new(scores).load_all()?;
    score::rank(&mut records);

    let mut stdout = io::stdout().lock();
    write_table(&mut stdout, &records[..records.len().min(*limit)])
        .context("Failed to write to stdout")?;
    Ok(())
}

fn write_table(out: &mut impl io::Write, records: &[ScoreRecord]) -> io::Result<()> {
    if records.is_empty() {
        writeln!(out, "No scores yet.")?;
        return Ok(());
    }
    writeln!(out, "{:>4}  {:<20}  {:>7}  {}", "RANK", "PLAYER", "SCORE", "DATE")?;
    for (i, record) in records.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<20}  {:>7}  {}",
            i + 1,
            record.player_name,
            record.score,
            record.recorded_at.format("%Y-%m-%d %H:%M")
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};

    use super::*;

    #[test]
    fn test_table_layout() {
        let records = [ScoreRecord {
            player_name: "ada".to_owned(),
            score: 120,
            recorded_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        }];
        let mut out = vec![];
        write_table(&mut out, &records).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("RANK  PLAYER"));
        assert!(lines[1].starts_with("   1  ada "));
        assert!(lines[1].ends_with("    120  2024-05-01 12:30"));
    }

    #[test]
    fn test_empty_table() {
        let mut out = vec![];
        write_table(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No scores yet.\n");
    }
}
