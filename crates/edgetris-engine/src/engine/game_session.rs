use std::time::Duration;

use crate::{Board, Edge, Piece, PieceCollisionError, is_valid_move};

use super::{
    GameStats,
    input::{GameKey, route_key},
    piece_queue::{PieceQueue, PieceSeed},
    travel::{TravelController, TravelStep},
};

/// Default period of the tick source.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum SessionState {
    /// Before the first [`GameSession::reset`] or after [`GameSession::stop`].
    #[default]
    NotStarted,
    Running,
    /// Terminal: a freshly spawned piece could not be placed at its spawn anchor.
    GameOver,
}

/// Outcome of a single [`GameSession::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The session is not running.
    Ignored,
    /// No edge committed yet; the piece stays at its spawn anchor.
    Floating,
    /// The piece advanced one cell toward its edge.
    Moved,
    /// The piece landed, was placed and the next piece spawned.
    Placed { edge: Edge, cleared_lines: usize },
    /// The piece was placed but the next piece could not spawn.
    GameOver { edge: Edge, cleared_lines: usize },
}

/// A complete game: board, active and preview pieces, travel, score and state.
///
/// The session is owned by the caller and driven through two handlers:
/// [`GameSession::tick`] (from the tick source) and
/// [`GameSession::handle_key`] (from the input source). Both leave the
/// session consistent when they return, and both do nothing unless the
/// session is [`SessionState::Running`].
///
/// # Example
///
/// ```
/// use edgetris_engine::{Edge, GameKey, GameSession, SessionState};
///
/// let mut session = GameSession::new();
/// session.reset();
/// assert_eq!(session.state(), SessionState::Running);
///
/// session.handle_key(GameKey::ChooseEdge(Edge::Down));
/// while session.stats().placed_pieces() == 0 {
///     session.tick();
/// }
/// assert_eq!(session.stats().score(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    queue: PieceQueue,
    travel: TravelController,
    stats: GameStats,
    state: SessionState,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::from_queue(PieceQueue::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_queue(PieceQueue::with_seed(seed))
    }

    fn from_queue(queue: PieceQueue) -> Self {
        Self {
            board: Board::INITIAL,
            queue,
            travel: TravelController::new(),
            stats: GameStats::new(),
            state: SessionState::NotStarted,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        self.queue.active()
    }

    #[must_use]
    pub fn preview_piece(&self) -> &Piece {
        self.queue.preview()
    }

    #[must_use]
    pub fn travel(&self) -> &TravelController {
        &self.travel
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Starts a new game: empty board, zero score, fresh active and preview
    /// pieces.
    pub fn reset(&mut self) {
        self.board = Board::INITIAL;
        self.stats = GameStats::new();
        self.queue.refill();
        self.travel.reset();
        self.state = SessionState::Running;
        tracing::debug!("session reset");
        self.check_spawn();
    }

    /// Halts the session. Ticks and keys are ignored until the next
    /// [`Self::reset`]. Calling it repeatedly has no further effect.
    pub fn stop(&mut self) {
        if self.state.is_not_started() {
            return;
        }
        tracing::debug!(state = ?self.state, "session stopped");
        self.state = SessionState::NotStarted;
    }

    /// Replaces the active piece, keeping the travel commitment.
    ///
    /// Fails if the piece collides with the board or lies out of bounds.
    pub fn replace_active_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if !is_valid_move(&self.board, &piece, 0, 0) {
            return Err(PieceCollisionError);
        }
        *self.queue.active_mut() = piece;
        Ok(())
    }

    /// Advances the active piece one step toward its committed edge, placing
    /// it when the step is blocked.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Ignored;
        }
        match self.travel.advance(&self.board, self.queue.active()) {
            TravelStep::Floating => TickOutcome::Floating,
            TravelStep::Moved(piece) => {
                *self.queue.active_mut() = piece;
                TickOutcome::Moved
            }
            TravelStep::Landed(edge) => self.place_active(edge),
        }
    }

    /// Handles one logical key. Returns whether anything changed.
    pub fn handle_key(&mut self, key: GameKey) -> bool {
        if !self.state.is_running() {
            return false;
        }
        route_key(key, &mut self.travel, &self.board, self.queue.active_mut())
    }

    fn place_active(&mut self, edge: Edge) -> TickOutcome {
        self.board.place(self.queue.active());
        let cleared_lines = self.board.clear_edge(edge);
        self.stats.complete_placement(edge, cleared_lines);
        tracing::info!(
            %edge,
            cleared_lines,
            occupied_cells = self.board.occupied_count(),
            score = self.stats.score(),
            "piece placed"
        );

        self.queue.promote();
        self.travel.reset();
        if self.check_spawn() {
            TickOutcome::Placed {
                edge,
                cleared_lines,
            }
        } else {
            TickOutcome::GameOver {
                edge,
                cleared_lines,
            }
        }
    }

    /// Ends the game if the active piece cannot sit at its spawn anchor.
    fn check_spawn(&mut self) -> bool {
        if is_valid_move(&self.board, self.queue.active(), 0, 0) {
            return true;
        }
        tracing::info!(
            score = self.stats.score(),
            placed_pieces = self.stats.placed_pieces(),
            "game over"
        );
        self.state = SessionState::GameOver;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Block, BlockColor, COLS, PieceKind, PiecePosition, ROWS, TravelState};

    const SEED: &str = "000102030405060708090a0b0c0d0e0f";

    fn running_session() -> GameSession {
        let mut session = GameSession::with_seed(SEED.parse().unwrap());
        session.reset();
        session
    }

    fn fill(board: &mut Board, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>) {
        for row in rows {
            for col in cols.clone() {
                board
                    .set_block(row, col, Block::Filled(BlockColor::Green))
                    .unwrap();
            }
        }
    }

    #[test]
    fn test_new_session_is_not_started() {
        let mut session = GameSession::with_seed(SEED.parse().unwrap());
        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert!(!session.handle_key(GameKey::ChooseEdge(Edge::Down)));
        assert!(session.travel().state().is_idle());
    }

    #[test]
    fn test_reset_spawns_centered_pieces() {
        let session = running_session();
        assert!(session.state().is_running());
        assert_eq!(*session.active_piece(), session.active_piece().respawned());
        assert_eq!(session.stats().score(), 0);
        assert_eq!(session.board().occupied_count(), 0);
    }

    #[test]
    fn test_idle_piece_floats() {
        let mut session = running_session();
        let before = *session.active_piece();
        for _ in 0..50 {
            assert_eq!(session.tick(), TickOutcome::Floating);
        }
        assert_eq!(*session.active_piece(), before);
    }

    #[test]
    fn test_o_piece_travels_down_and_lands() {
        let mut session = running_session();
        let o_piece = Piece::new(PieceKind::O, BlockColor::Yellow);
        assert_eq!(o_piece.position(), PiecePosition::new(9, 9));
        session.replace_active_piece(o_piece).unwrap();

        assert!(session.handle_key(GameKey::ChooseEdge(Edge::Down)));
        for expected_y in 10..=18 {
            assert_eq!(session.tick(), TickOutcome::Moved);
            assert_eq!(session.active_piece().position().y(), expected_y);
        }
        assert_eq!(
            session.tick(),
            TickOutcome::Placed {
                edge: Edge::Down,
                cleared_lines: 0
            }
        );
        assert_eq!(session.stats().score(), 10);
        for (row, col) in [(18, 9), (18, 10), (19, 9), (19, 10)] {
            assert_eq!(
                session.board().block(row, col),
                Ok(Block::Filled(BlockColor::Yellow))
            );
        }
        // Next piece spawns idle at the center.
        assert!(session.travel().state().is_idle());
        assert_eq!(*session.active_piece(), session.active_piece().respawned());
    }

    #[test]
    fn test_preview_is_promoted_on_placement() {
        let mut session = running_session();
        let preview = *session.preview_piece();
        session.handle_key(GameKey::ChooseEdge(Edge::Right));
        while session.stats().placed_pieces() == 0 {
            session.tick();
        }
        assert_eq!(*session.active_piece(), preview);
    }

    #[test]
    fn test_filling_top_row_clears_one_row_down() {
        let mut session = running_session();
        fill(&mut session.board, 0..1, 4..COLS);
        fill(&mut session.board, 1..2, 0..4);
        let i_piece = Piece::new(PieceKind::I, BlockColor::Cyan).at(PiecePosition::new(0, 0));
        session.replace_active_piece(i_piece).unwrap();

        session.handle_key(GameKey::ChooseEdge(Edge::Down));
        assert_eq!(
            session.tick(),
            TickOutcome::Placed {
                edge: Edge::Down,
                cleared_lines: 1
            }
        );
        assert_eq!(session.board().occupied_count(), 4);
        assert!(session.board().rows().next().unwrap().iter().all(|b| b.is_empty()));
        for col in 0..4 {
            assert_eq!(session.board().is_occupied(1, col), Ok(true));
        }
    }

    #[test]
    fn test_score_ignores_lines_cleared() {
        let mut session = running_session();
        fill(&mut session.board, 4..ROWS, 0..1);
        let i_piece = Piece::new(PieceKind::I, BlockColor::Cyan)
            .rotated()
            .at(PiecePosition::new(0, 0));
        session.replace_active_piece(i_piece).unwrap();

        session.handle_key(GameKey::ChooseEdge(Edge::Left));
        assert_eq!(
            session.tick(),
            TickOutcome::Placed {
                edge: Edge::Left,
                cleared_lines: 1
            }
        );
        assert_eq!(session.stats().score(), 10);
        assert_eq!(session.stats().cleared_lines_toward(Edge::Left), 1);
        assert_eq!(session.board().occupied_count(), 0);
    }

    #[test]
    fn test_game_over_when_spawn_is_blocked() {
        let mut session = running_session();
        fill(&mut session.board, 8..12, 8..12);
        let o_piece = Piece::new(PieceKind::O, BlockColor::Red).at(PiecePosition::new(0, 0));
        session.replace_active_piece(o_piece).unwrap();

        session.handle_key(GameKey::ChooseEdge(Edge::Up));
        let outcome = session.tick();
        assert!(outcome.is_game_over(), "{outcome:?}");
        assert!(session.state().is_game_over());
        assert_eq!(session.stats().score(), 10);

        // Terminal: nothing changes afterward.
        let board = session.board().clone();
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert!(!session.handle_key(GameKey::ChooseEdge(Edge::Down)));
        assert_eq!(*session.board(), board);
    }

    #[test]
    fn test_no_game_over_when_spawn_is_free() {
        let mut session = running_session();
        fill(&mut session.board, 15..20, 0..3);
        session.handle_key(GameKey::ChooseEdge(Edge::Down));
        while session.stats().placed_pieces() == 0 {
            assert!(!session.tick().is_game_over());
        }
        assert!(session.state().is_running());
    }

    #[test]
    fn test_replace_active_piece_rejects_collision() {
        let mut session = running_session();
        fill(&mut session.board, 0..1, 0..2);
        let piece = Piece::new(PieceKind::O, BlockColor::Red).at(PiecePosition::new(0, 0));
        assert!(session.replace_active_piece(piece).is_err());
        let piece = piece.at(PiecePosition::new(-1, 5));
        assert!(session.replace_active_piece(piece).is_err());
    }

    #[test]
    fn test_stop_is_idempotent_and_freezes_state() {
        let mut session = running_session();
        session.handle_key(GameKey::ChooseEdge(Edge::Left));
        session.tick();
        let piece = *session.active_piece();

        session.stop();
        session.stop();
        assert!(session.state().is_not_started());
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert!(!session.handle_key(GameKey::Direction(Edge::Up)));
        assert_eq!(*session.active_piece(), piece);
        assert_eq!(session.travel().state(), TravelState::Traveling(Edge::Left));

        session.reset();
        assert!(session.state().is_running());
        assert!(session.travel().state().is_idle());
        assert_eq!(session.stats().score(), 0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut session1 = running_session();
        let mut session2 = running_session();
        for edge in [Edge::Down, Edge::Left, Edge::Up, Edge::Right] {
            session1.handle_key(GameKey::ChooseEdge(edge));
            session2.handle_key(GameKey::ChooseEdge(edge));
            for _ in 0..12 {
                assert_eq!(session1.tick(), session2.tick());
            }
        }
        assert_eq!(session1.board(), session2.board());
        assert_eq!(session1.stats(), session2.stats());
    }
}
