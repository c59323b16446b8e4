use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::{COLS, ROWS, board::Board, collision::is_valid_move};

/// Largest side of any shape matrix.
pub const MAX_SHAPE_SIZE: usize = 4;

/// A piece: shape matrix, color and anchor position on the board.
///
/// The anchor is the board coordinate of the top-left cell of the shape
/// matrix. It is signed so that a piece may sit partially above row 0.
///
/// Pieces are values: moving and rotating return new `Piece` instances and
/// never check legality. Legality is decided by
/// [`is_valid_move`](super::collision::is_valid_move).
///
/// # Example
///
/// ```
/// use edgetris_engine::{BlockColor, Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::O, BlockColor::Yellow);
/// assert_eq!((piece.position().x(), piece.position().y()), (9, 9));
///
/// let moved = piece.moved(1, 0);
/// assert_eq!(moved.position().x(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    shape: PieceShape,
    color: BlockColor,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece in its initial orientation at the spawn anchor.
    #[must_use]
    pub fn new(kind: PieceKind, color: BlockColor) -> Self {
        let shape = kind.shape();
        Self {
            shape,
            color,
            position: PiecePosition::spawn(&shape),
        }
    }

    #[must_use]
    pub fn shape(&self) -> &PieceShape {
        &self.shape
    }

    #[must_use]
    pub fn color(&self) -> BlockColor {
        self.color
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns the same piece anchored at `position`.
    #[must_use]
    pub fn at(self, position: PiecePosition) -> Self {
        Self { position, ..self }
    }

    /// Re-anchors the piece at the spawn position for its current shape.
    #[must_use]
    pub fn respawned(self) -> Self {
        Self {
            position: PiecePosition::spawn(&self.shape),
            ..self
        }
    }

    /// Board coordinates `(x, y)` of every occupied cell.
    ///
    /// Coordinates saturate at the `i32` range.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.occupied_positions().map(move |(dx, dy)| {
            (
                self.position.x.saturating_add(dx),
                self.position.y.saturating_add(dy),
            )
        })
    }

    #[must_use]
    pub fn moved(self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.moved(dx, dy),
            ..self
        }
    }

    /// Rotates the shape 90° clockwise, keeping the anchor.
    #[must_use]
    pub fn rotated(self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..self
        }
    }

    /// Moves the piece if the destination is legal on `board`.
    #[must_use]
    pub fn moved_on(self, board: &Board, dx: i32, dy: i32) -> Option<Self> {
        is_valid_move(board, &self, dx, dy).then(|| self.moved(dx, dy))
    }

    /// Rotates the piece if the rotated shape is legal at the same anchor.
    ///
    /// There is no wall kick: a blocked rotation returns `None` and the
    /// caller keeps the previous shape.
    #[must_use]
    pub fn rotated_on(self, board: &Board) -> Option<Self> {
        let rotated = self.rotated();
        is_valid_move(board, &rotated, 0, 0).then_some(rotated)
    }
}

/// Anchor position of a piece in board coordinates.
///
/// - X increases rightward (columns)
/// - Y increases downward (rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Centered spawn anchor for a shape.
    ///
    /// `x = COLS / 2 - width / 2`, `y = ROWS / 2 - height / 2`.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub const fn spawn(shape: &PieceShape) -> Self {
        let x = (COLS / 2) as i32 - (shape.width() / 2) as i32;
        let y = (ROWS / 2) as i32 - (shape.height() / 2) as i32;
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    /// Shifts the anchor, saturating at the `i32` range.
    #[must_use]
    pub const fn moved(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Ordered matrix of occupied/empty cells, at most 4×4.
///
/// Only the top-left `height × width` region is meaningful; the rest is
/// always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl PieceShape {
    /// Builds a shape from a `H × W` 0/1 matrix.
    ///
    /// Panics (at compile time when used in a const) if the matrix is larger
    /// than 4×4 or if any of its rows or columns is entirely empty.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= MAX_SHAPE_SIZE);
        assert!(H > 0 && H <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut row_used = [false; MAX_SHAPE_SIZE];
        let mut col_used = [false; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                if rows[y][x] != 0 {
                    cells[y][x] = true;
                    row_used[y] = true;
                    col_used[x] = true;
                }
                x += 1;
            }
            y += 1;
        }
        let mut i = 0;
        while i < H {
            assert!(row_used[i], "shape has an empty row");
            i += 1;
        }
        let mut i = 0;
        while i < W {
            assert!(col_used[i], "shape has an empty column");
            i += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            cells,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Whether the cell at `(x, y)` of the matrix is occupied.
    ///
    /// Cells outside the matrix are empty.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Matrix-relative `(dx, dy)` of every occupied cell, row by row.
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height()).flat_map(move |y| {
            (0..self.width())
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (x as i32, y as i32))
        })
    }

    /// 90° clockwise rotation: `new[i][j] = old[rows - 1 - j][i]`.
    ///
    /// The result is `width × height` when the input is `height × width`.
    #[must_use]
    pub const fn rotated(&self) -> Self {
        let old_rows = self.height();
        let old_cols = self.width();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut i = 0;
        while i < old_cols {
            let mut j = 0;
            while j < old_rows {
                cells[i][j] = self.cells[old_rows - 1 - j][i];
                j += 1;
            }
            i += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// Color tag carried by a piece and by the board cells it leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockColor {
    Cyan = 0,
    Blue = 1,
    Orange = 2,
    Yellow = 3,
    Green = 4,
    Purple = 5,
    Red = 6,
}

impl BlockColor {
    /// Number of colors (7).
    pub const LEN: usize = 7;

    pub const ALL: [BlockColor; Self::LEN] = [
        BlockColor::Cyan,
        BlockColor::Blue,
        BlockColor::Orange,
        BlockColor::Yellow,
        BlockColor::Green,
        BlockColor::Purple,
        BlockColor::Red,
    ];
}

impl Distribution<BlockColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BlockColor {
        BlockColor::ALL[rng.random_range(0..BlockColor::LEN)]
    }
}

/// Enum representing the shape family of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Shape of this kind in its initial orientation.
    #[must_use]
    pub const fn shape(self) -> PieceShape {
        PIECE_SHAPES[self as usize]
    }
}

const PIECE_SHAPES: [PieceShape; PieceKind::LEN] = [
    // I-piece
    PieceShape::from_rows([[1, 1, 1, 1]]),
    // J-piece
    PieceShape::from_rows([[1, 1, 1], [0, 0, 1]]),
    // L-piece
    PieceShape::from_rows([[1, 1, 1], [1, 0, 0]]),
    // O-piece
    PieceShape::from_rows([[1, 1], [1, 1]]),
    // S-piece
    PieceShape::from_rows([[0, 1, 1], [1, 1, 0]]),
    // T-piece
    PieceShape::from_rows([[1, 1, 1], [0, 1, 0]]),
    // Z-piece
    PieceShape::from_rows([[1, 1, 0], [0, 1, 1]]),
];
