use crate::{Board, Edge, Piece};

use super::travel::{TravelController, step_toward};

/// The eight logical keys delivered by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameKey {
    /// Edge-choice key: commits the active piece to travel toward the edge.
    ChooseEdge(Edge),
    /// Directional key: nudges or rotates, depending on the committed edge.
    Direction(Edge),
}

/// What a directional key does to the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PieceAction {
    /// Move one cell toward the given edge.
    Nudge(Edge),
    /// Rotate 90° clockwise.
    Rotate,
}

/// Maps a directional key to its action under the committed edge.
///
/// | committed | Left          | Right          | Up          | Down          |
/// |-----------|---------------|----------------|-------------|---------------|
/// | down      | nudge left    | nudge right    | rotate      | nudge down    |
/// | up        | nudge left    | nudge right    | nudge up    | rotate        |
/// | left      | nudge left    | rotate         | nudge up    | nudge down    |
/// | right     | rotate        | nudge right    | nudge up    | nudge down    |
#[must_use]
pub const fn action_for(committed: Edge, key: Edge) -> PieceAction {
    use Edge::{Down, Left, Right, Up};
    use PieceAction::{Nudge, Rotate};

    match (committed, key) {
        (Down, Left) => Nudge(Left),
        (Down, Right) => Nudge(Right),
        (Down, Up) => Rotate,
        (Down, Down) => Nudge(Down),

        (Up, Left) => Nudge(Left),
        (Up, Right) => Nudge(Right),
        (Up, Up) => Nudge(Up),
        (Up, Down) => Rotate,

        (Left, Left) => Nudge(Left),
        (Left, Right) => Rotate,
        (Left, Up) => Nudge(Up),
        (Left, Down) => Nudge(Down),

        (Right, Left) => Rotate,
        (Right, Right) => Nudge(Right),
        (Right, Up) => Nudge(Up),
        (Right, Down) => Nudge(Down),
    }
}

/// Applies `key` to the active piece.
///
/// Edge-choice keys only work while no edge is committed; directional keys
/// only work once one is. Every nudge and rotation goes through the
/// collision check and silently does nothing when illegal. Returns whether
/// the piece or the travel commitment changed.
pub fn route_key(
    key: GameKey,
    travel: &mut TravelController,
    board: &Board,
    piece: &mut Piece,
) -> bool {
    match key {
        GameKey::ChooseEdge(edge) => travel.commit(edge),
        GameKey::Direction(direction) => {
            let Some(committed) = travel.committed_edge() else {
                return false;
            };
            let next = match action_for(committed, direction) {
                // Nudging toward the committed edge is the same step as travel.
                PieceAction::Nudge(edge) if edge == committed => step_toward(board, piece, edge),
                PieceAction::Nudge(edge) => {
                    let (dx, dy) = edge.offset();
                    piece.moved_on(board, dx, dy)
                }
                PieceAction::Rotate => piece.rotated_on(board),
            };
            match next {
                Some(next) => {
                    *piece = next;
                    true
                }
                None => false,
            }
        }
    }
}
