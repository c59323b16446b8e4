pub use self::{board::*, collision::*, edge::*, piece::*};

pub(crate) mod board;
pub(crate) mod collision;
pub(crate) mod edge;
pub(crate) mod piece;

/// Number of rows on the board.
pub const ROWS: usize = 20;
/// Number of columns on the board.
pub const COLS: usize = 20;
