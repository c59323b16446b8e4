use crate::Edge;

/// Points awarded for every placed piece, regardless of lines cleared.
pub const SCORE_PER_PIECE: usize = 10;

/// Game statistics tracking score, placed pieces and cleared lines.
///
/// # Scoring
///
/// Scoring is flat: every placement adds [`SCORE_PER_PIECE`], however many
/// lines it cleared. Line counts are kept for display only.
///
/// # Example
///
/// ```
/// use edgetris_engine::{Edge, GameStats};
///
/// let mut stats = GameStats::new();
/// stats.complete_placement(Edge::Left, 3);
///
/// assert_eq!(stats.score(), 10);
/// assert_eq!(stats.cleared_lines(), 3);
/// assert_eq!(stats.cleared_lines_toward(Edge::Left), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    placed_pieces: usize,
    cleared_lines: usize,
    cleared_by_edge: [usize; 4],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            placed_pieces: 0,
            cleared_lines: 0,
            cleared_by_edge: [0; 4],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces that have been placed.
    #[must_use]
    pub const fn placed_pieces(&self) -> usize {
        self.placed_pieces
    }

    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Lines cleared by placements that travelled toward `edge`.
    #[must_use]
    pub const fn cleared_lines_toward(&self, edge: Edge) -> usize {
        self.cleared_by_edge[edge.index()]
    }

    /// Updates statistics after a piece is placed.
    pub const fn complete_placement(&mut self, edge: Edge, cleared_lines: usize) {
        self.placed_pieces += 1;
        self.cleared_lines += cleared_lines;
        self.cleared_by_edge[edge.index()] += cleared_lines;
        self.score += SCORE_PER_PIECE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_flat_per_piece() {
        let mut stats = GameStats::new();
        stats.complete_placement(Edge::Down, 0);
        assert_eq!(stats.score(), 10);
        stats.complete_placement(Edge::Down, 4);
        assert_eq!(stats.score(), 20);
        stats.complete_placement(Edge::Up, 1);
        assert_eq!(stats.score(), 30);
        assert_eq!(stats.placed_pieces(), 3);
        assert_eq!(stats.cleared_lines(), 5);
        assert_eq!(stats.cleared_lines_toward(Edge::Down), 4);
        assert_eq!(stats.cleared_lines_toward(Edge::Up), 1);
        assert_eq!(stats.cleared_lines_toward(Edge::Right), 0);
    }
}
