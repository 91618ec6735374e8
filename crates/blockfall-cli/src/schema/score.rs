use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One finished game, as written to the score file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_name: String,
    pub score: usize,
    /// When the game ended (RFC 3339)
    pub recorded_at: DateTime<Utc>,
}

impl ScoreRecord {
    /// Creates a record stamped with the current time.
    pub fn now(player_name: impl Into<String>, score: usize) -> Self {
        Self {
            player_name: player_name.into(),
            score,
            recorded_at: Utc::now(),
        }
    }
}

/// Orders records best first: higher score, then earlier game.
pub fn rank(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.recorded_at.cmp(&b.recorded_at))
    });
}
