use crate::core::line_clear::line_clear_points;

/// Running totals for one game.
///
/// - **Score**: 10 points per cleared line, no combo or multi-line bonus
/// - **Cleared lines**: total rows removed
/// - **Completed pieces**: pieces locked into the grid
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(0);
/// stats.complete_piece_drop(3);
///
/// assert_eq!(stats.score(), 30);
/// assert_eq!(stats.total_cleared_lines(), 3);
/// assert_eq!(stats.completed_pieces(), 2);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
        }
    }

    /// Returns the current score.
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the number of pieces locked so far.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns the total number of lines cleared.
    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Records one locked piece and the lines it cleared.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.score += line_clear_points(cleared_lines);
    }
}
