use std::array;

use crate::OutOfBoundsError;

use super::{
    COLS, Edge, ROWS,
    piece::{BlockColor, Piece},
};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell left behind by a placed piece of the given color.
    Filled(BlockColor),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    #[must_use]
    pub fn color(self) -> Option<BlockColor> {
        match self {
            Block::Empty => None,
            Block::Filled(color) => Some(color),
        }
    }
}

/// A single row of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRow {
    cells: [Block; COLS],
}

impl BlockRow {
    const EMPTY: Self = Self {
        cells: [Block::Empty; COLS],
    };

    #[must_use]
    pub fn cells(&self) -> &[Block; COLS] {
        &self.cells
    }

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|b| !b.is_empty())
    }
}

/// Fixed `ROWS × COLS` occupancy grid.
///
/// Row 0 is the top edge and column 0 the left edge. The board is mutated
/// only by [`Board::place`] and [`Board::clear_edge`].
///
/// # Example
///
/// ```
/// use edgetris_engine::{Board, Edge};
///
/// let mut board = Board::INITIAL;
/// assert_eq!(board.is_occupied(0, 0), Ok(false));
/// assert_eq!(board.clear_edge(Edge::Down), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BlockRow; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl Board {
    pub const INITIAL: Self = Self {
        rows: [BlockRow::EMPTY; ROWS],
    };

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block; COLS]> {
        self.rows.iter().map(BlockRow::cells)
    }

    pub fn block(&self, row: usize, col: usize) -> Result<Block, OutOfBoundsError> {
        if row >= ROWS || col >= COLS {
            return Err(OutOfBoundsError { row, col });
        }
        Ok(self.rows[row].cells[col])
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> Result<bool, OutOfBoundsError> {
        self.block(row, col).map(|b| !b.is_empty())
    }

    /// Writes a single cell.
    pub fn set_block(
        &mut self,
        row: usize,
        col: usize,
        block: Block,
    ) -> Result<(), OutOfBoundsError> {
        if row >= ROWS || col >= COLS {
            return Err(OutOfBoundsError { row, col });
        }
        self.rows[row].cells[col] = block;
        Ok(())
    }

    /// Cell at signed board coordinates, `None` outside the grid.
    pub(crate) fn block_at(&self, x: i32, y: i32) -> Option<Block> {
        let col = usize::try_from(x).ok().filter(|&c| c < COLS)?;
        let row = usize::try_from(y).ok().filter(|&r| r < ROWS)?;
        Some(self.rows[row].cells[col])
    }

    /// Writes the piece's color into every cell it covers.
    ///
    /// Cells above row 0 are skipped.
    pub fn place(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_positions() {
            if y < 0 {
                continue;
            }
            let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            debug_assert!(row < ROWS && col < COLS, "placing outside the board");
            if row < ROWS && col < COLS {
                self.rows[row].cells[col] = Block::Filled(piece.color());
            }
        }
    }

    #[must_use]
    pub fn is_row_filled(&self, row: usize) -> bool {
        self.rows[row].is_filled()
    }

    #[must_use]
    pub fn is_column_filled(&self, col: usize) -> bool {
        self.rows.iter().all(|r| !r.cells[col].is_empty())
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|b| !b.is_empty())
            .count()
    }

    /// Clears every filled line orthogonal to `edge` and returns how many
    /// were removed.
    ///
    /// Remaining lines keep their relative order and are compacted toward
    /// `edge`; the vacated lines on the opposite side become empty.
    pub fn clear_edge(&mut self, edge: Edge) -> usize {
        match edge {
            Edge::Down => self.clear_rows_down(),
            Edge::Up => self.clear_rows_up(),
            Edge::Left => self.clear_columns_left(),
            Edge::Right => self.clear_columns_right(),
        }
    }

    fn clear_rows_down(&mut self) -> usize {
        let mut count = 0;
        for y in (0..ROWS).rev() {
            if self.is_row_filled(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(BlockRow::EMPTY);
        count
    }

    fn clear_rows_up(&mut self) -> usize {
        let mut count = 0;
        for y in 0..ROWS {
            if self.is_row_filled(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y - count] = self.rows[y];
            }
        }
        self.rows[ROWS - count..].fill(BlockRow::EMPTY);
        count
    }

    fn filled_columns(&self) -> [bool; COLS] {
        array::from_fn(|x| self.is_column_filled(x))
    }

    fn clear_columns_left(&mut self) -> usize {
        let filled = self.filled_columns();
        for row in &mut self.rows {
            let mut write = 0;
            for (x, &is_filled) in filled.iter().enumerate() {
                if !is_filled {
                    row.cells[write] = row.cells[x];
                    write += 1;
                }
            }
            row.cells[write..].fill(Block::Empty);
        }
        filled.iter().filter(|&&f| f).count()
    }

    fn clear_columns_right(&mut self) -> usize {
        let filled = self.filled_columns();
        for row in &mut self.rows {
            let mut write = COLS;
            for (x, &is_filled) in filled.iter().enumerate().rev() {
                if !is_filled {
                    write -= 1;
                    row.cells[write] = row.cells[x];
                }
            }
            row.cells[..write].fill(Block::Empty);
        }
        filled.iter().filter(|&&f| f).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceKind, PiecePosition};

    const C: Block = Block::Filled(BlockColor::Cyan);
    const R: Block = Block::Filled(BlockColor::Red);

    fn fill_row(board: &mut Board, row: usize) {
        for col in 0..COLS {
            board.set_block(row, col, C).unwrap();
        }
    }

    fn fill_column(board: &mut Board, col: usize) {
        for row in 0..ROWS {
            board.set_block(row, col, C).unwrap();
        }
    }

    fn mirrored(board: &Board) -> Board {
        let mut out = board.clone();
        for row in &mut out.rows {
            row.cells.reverse();
        }
        out
    }

    /// Board whose row `y` holds a single marker at column `y % COLS`.
    fn marked_rows() -> Board {
        let mut board = Board::INITIAL;
        for row in 0..ROWS {
            board.set_block(row, row % COLS, R).unwrap();
        }
        board
    }

    #[test]
    fn test_initial_board_is_empty() {
        let board = Board::INITIAL;
        assert_eq!(board.rows().count(), ROWS);
        assert!(board.rows().all(|r| r.iter().all(|b| b.is_empty())));
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_is_occupied_out_of_bounds() {
        let board = Board::INITIAL;
        assert_eq!(
            board.is_occupied(ROWS, 0),
            Err(OutOfBoundsError { row: ROWS, col: 0 })
        );
        assert_eq!(
            board.is_occupied(0, COLS),
            Err(OutOfBoundsError { row: 0, col: COLS })
        );
        assert_eq!(board.is_occupied(ROWS - 1, COLS - 1), Ok(false));
    }

    #[test]
    fn test_place_writes_color() {
        let mut board = Board::INITIAL;
        let piece = Piece::new(PieceKind::O, BlockColor::Yellow);
        board.place(&piece);
        assert_eq!(board.occupied_count(), 4);
        for (row, col) in [(9, 9), (9, 10), (10, 9), (10, 10)] {
            assert_eq!(board.block(row, col), Ok(Block::Filled(BlockColor::Yellow)));
        }
    }

    #[test]
    fn test_place_skips_cells_above_grid() {
        let mut board = Board::INITIAL;
        let piece = Piece::new(PieceKind::O, BlockColor::Blue).at(PiecePosition::new(0, -1));
        board.place(&piece);
        assert_eq!(board.occupied_count(), 2);
        assert_eq!(board.is_occupied(0, 0), Ok(true));
        assert_eq!(board.is_occupied(0, 1), Ok(true));
    }

    #[test]
    fn test_clear_down_two_rows() {
        let mut board = marked_rows();
        fill_row(&mut board, 3);
        fill_row(&mut board, 5);
        let before = board.clone();

        assert_eq!(board.clear_edge(Edge::Down), 2);
        assert_eq!(board.rows().count(), ROWS);

        // Top two rows are empty.
        for row in 0..2 {
            assert!(board.rows[row].cells.iter().all(|b| b.is_empty()));
        }
        // Non-cleared rows keep their order, pushed toward the bottom.
        let survivors: Vec<_> = (0..ROWS)
            .filter(|&r| r != 3 && r != 5)
            .map(|r| before.rows[r])
            .collect();
        assert_eq!(&board.rows[2..], &survivors[..]);
    }

    #[test]
    fn test_clear_down_single_top_row() {
        let mut board = Board::INITIAL;
        fill_row(&mut board, 0);
        board.set_block(ROWS - 1, 4, R).unwrap();

        assert_eq!(board.clear_edge(Edge::Down), 1);
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board.block(ROWS - 1, 4), Ok(R));
    }

    #[test]
    fn test_clear_up_adjacent_rows() {
        let mut board = marked_rows();
        fill_row(&mut board, 7);
        fill_row(&mut board, 8);
        let before = board.clone();

        assert_eq!(board.clear_edge(Edge::Up), 2);

        let survivors: Vec<_> = (0..ROWS)
            .filter(|&r| r != 7 && r != 8)
            .map(|r| before.rows[r])
            .collect();
        assert_eq!(&board.rows[..ROWS - 2], &survivors[..]);
        for row in ROWS - 2..ROWS {
            assert!(board.rows[row].cells.iter().all(|b| b.is_empty()));
        }
    }

    #[test]
    fn test_clear_left_shifts_toward_left() {
        let mut board = Board::INITIAL;
        fill_column(&mut board, 0);
        fill_column(&mut board, 1);
        board.set_block(4, 5, R).unwrap();

        assert_eq!(board.clear_edge(Edge::Left), 2);
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board.block(4, 3), Ok(R));
        assert!(!board.is_column_filled(COLS - 1));
    }

    #[test]
    fn test_clear_right_shifts_toward_right() {
        let mut board = Board::INITIAL;
        fill_column(&mut board, COLS - 1);
        board.set_block(2, 10, R).unwrap();

        assert_eq!(board.clear_edge(Edge::Right), 1);
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board.block(2, 11), Ok(R));
    }

    #[test]
    fn test_clear_left_and_right_are_mirrors() {
        let mut board = Board::INITIAL;
        fill_column(&mut board, 0);
        fill_column(&mut board, 6);
        for row in 0..ROWS {
            board.set_block(row, (row * 7) % COLS, R).unwrap();
            board.set_block(row, (row * 3 + 1) % COLS, C).unwrap();
        }

        let mut left = board.clone();
        let left_count = left.clear_edge(Edge::Left);

        let mut right = mirrored(&board);
        let right_count = right.clear_edge(Edge::Right);

        assert_eq!(left_count, right_count);
        assert_eq!(left, mirrored(&right));
    }

    #[test]
    fn test_clear_ignores_other_axis() {
        let mut board = Board::INITIAL;
        fill_column(&mut board, 3);
        let before = board.clone();
        assert_eq!(board.clear_edge(Edge::Down), 0);
        assert_eq!(board.clear_edge(Edge::Up), 0);
        assert_eq!(board, before);

        fill_row(&mut board, 2);
        let before = board.clone();
        assert_eq!(board.clear_edge(Edge::Left), 1);
        assert_ne!(board, before);
    }

    #[test]
    fn test_clear_all_filled() {
        for edge in Edge::ALL {
            let mut board = Board::INITIAL;
            for row in 0..ROWS {
                fill_row(&mut board, row);
            }
            let expected = match edge {
                Edge::Up | Edge::Down => ROWS,
                Edge::Left | Edge::Right => COLS,
            };
            assert_eq!(board.clear_edge(edge), expected);
            assert_eq!(board, Board::INITIAL);
        }
    }
}
