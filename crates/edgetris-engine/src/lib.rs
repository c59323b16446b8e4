pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({row}, {col}) is outside the board")]
pub struct OutOfBoundsError {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting active piece")]
pub struct PieceCollisionError;
