use crate::{Board, Edge, Piece, is_valid_move};

/// Travel state of the active piece.
///
/// ```text
/// Idle ──commit(edge)──> Traveling(edge) ──blocked step──> Landed(edge)
///  ^                                                            │
///  └──────────────────────── next spawn ────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum TravelState {
    /// No edge chosen yet; the piece floats at its spawn anchor.
    #[default]
    Idle,
    /// The piece advances one cell per tick toward the edge.
    Traveling(Edge),
    /// The last step toward the edge was blocked.
    Landed(Edge),
}

/// Result of one tick of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TravelStep {
    /// No edge is committed; nothing moved.
    Floating,
    /// The piece advanced one cell.
    Moved(Piece),
    /// The piece cannot advance any further toward the edge.
    Landed(Edge),
}

/// Drives the active piece toward its committed edge.
///
/// The committed edge is set at most once per piece and only cleared by
/// [`TravelController::reset`] when the next piece spawns.
#[derive(Debug, Clone, Default)]
pub struct TravelController {
    state: TravelState,
}

impl TravelController {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TravelState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> TravelState {
        self.state
    }

    /// The committed edge, if any.
    #[must_use]
    pub const fn committed_edge(&self) -> Option<Edge> {
        match self.state {
            TravelState::Idle => None,
            TravelState::Traveling(edge) | TravelState::Landed(edge) => Some(edge),
        }
    }

    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed_edge().is_some()
    }

    /// Commits to `edge` if no edge has been chosen for this piece.
    ///
    /// Returns `false` (and changes nothing) when already committed.
    pub fn commit(&mut self, edge: Edge) -> bool {
        if self.is_committed() {
            return false;
        }
        tracing::debug!(%edge, "travel edge committed");
        self.state = TravelState::Traveling(edge);
        true
    }

    /// Returns to `Idle` for a freshly spawned piece.
    pub fn reset(&mut self) {
        self.state = TravelState::Idle;
    }

    /// Attempts the one-cell step toward the committed edge.
    pub fn advance(&mut self, board: &Board, piece: &Piece) -> TravelStep {
        let TravelState::Traveling(edge) = self.state else {
            return match self.state {
                TravelState::Landed(edge) => TravelStep::Landed(edge),
                _ => TravelStep::Floating,
            };
        };
        match step_toward(board, piece, edge) {
            Some(moved) => TravelStep::Moved(moved),
            None => {
                tracing::debug!(%edge, position = ?piece.position(), "piece landed");
                self.state = TravelState::Landed(edge);
                TravelStep::Landed(edge)
            }
        }
    }
}

/// One-cell step of `piece` toward `edge`, or `None` if the step is blocked.
///
/// Besides the collision check, the top edge acts as the landing wall for a
/// piece travelling up: the step is blocked once it would carry any cell
/// above row 0.
#[must_use]
pub fn step_toward(board: &Board, piece: &Piece, edge: Edge) -> Option<Piece> {
    let (dx, dy) = edge.offset();
    if !is_valid_move(board, piece, dx, dy) {
        return None;
    }
    if edge == Edge::Up && piece.occupied_positions().any(|(_, y)| y + dy < 0) {
        return None;
    }
    Some(piece.moved(dx, dy))
}
