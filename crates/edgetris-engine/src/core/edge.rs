/// One of the four board edges.
///
/// An edge doubles as a direction: the directional keys, the travel
/// commitment of the active piece and the clear routine of the board are all
/// expressed as "toward this edge".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Edge {
    #[display("up")]
    Up,
    #[display("down")]
    Down,
    #[display("left")]
    Left,
    #[display("right")]
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Up, Edge::Down, Edge::Left, Edge::Right];

    /// One-cell `(dx, dy)` step toward this edge.
    ///
    /// ```
    /// use edgetris_engine::Edge;
    ///
    /// assert_eq!(Edge::Up.offset(), (0, -1));
    /// assert_eq!(Edge::Right.offset(), (1, 0));
    /// ```
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Edge::Up => (0, -1),
            Edge::Down => (0, 1),
            Edge::Left => (-1, 0),
            Edge::Right => (1, 0),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Edge::Up => Edge::Down,
            Edge::Down => Edge::Up,
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
        }
    }

    /// Index of this edge in [`Edge::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}
