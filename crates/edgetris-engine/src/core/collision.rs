use super::{COLS, ROWS, board::Board, piece::Piece};

/// Tests whether `piece`, shifted by `(dx, dy)`, may legally occupy the board.
///
/// Every occupied cell must land on a column in `[0, COLS)` and a row below
/// `ROWS`, on an empty board cell. Cells above row 0 are only checked against
/// the column bounds and never collide with board content, so pieces may
/// exist partially above the grid.
///
/// This is the single legality check used by translation, rotation, travel
/// and spawn.
///
/// # Example
///
/// ```
/// use edgetris_engine::{BlockColor, Board, Piece, PieceKind, is_valid_move};
///
/// let board = Board::INITIAL;
/// let piece = Piece::new(PieceKind::O, BlockColor::Yellow);
/// assert!(is_valid_move(&board, &piece, 0, 0));
/// assert!(!is_valid_move(&board, &piece, 0, 10));
/// ```
#[must_use]
#[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
pub fn is_valid_move(board: &Board, piece: &Piece, dx: i32, dy: i32) -> bool {
    piece.occupied_positions().all(|(x, y)| {
        let (Some(x), Some(y)) = (x.checked_add(dx), y.checked_add(dy)) else {
            return false;
        };
        if x < 0 || x >= COLS as i32 || y >= ROWS as i32 {
            return false;
        }
        if y < 0 {
            return true;
        }
        board.block_at(x, y).is_some_and(|b| b.is_empty())
    })
}
