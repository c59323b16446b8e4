use std::str::FromStr;

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;

use crate::Piece;

/// Holds the active piece and the preview piece.
///
/// The queue always contains exactly two pieces: the front is the active
/// piece, the back is the preview. [`PieceQueue::promote`] drops the front,
/// makes the preview active and generates a new preview.
///
/// Shape and color of each generated piece are drawn independently and
/// uniformly.
///
/// # Example
///
/// ```
/// use edgetris_engine::PieceQueue;
///
/// let mut queue = PieceQueue::new();
/// let preview = *queue.preview();
/// queue.promote();
/// assert_eq!(*queue.active(), preview);
/// ```
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    pieces: ArrayVec<Piece, 2>,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit (16-byte) seed used to initialize the random number generator.
/// The same seed produces the same sequence of pieces. Written and parsed as
/// a 32-character hex string.
///
/// # Example
///
/// ```
/// use edgetris_engine::{GameSession, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
///
/// let session1 = GameSession::with_seed(seed);
/// let session2 = GameSession::with_seed(seed);
/// assert_eq!(session1.preview_piece(), session2.preview_piece());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid hex: expected 32 characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid hex: {_0}")]
    InvalidDigit(#[error(not(source))] String),
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(ParseSeedError::InvalidLength(hex_str.len()));
        }
        let num = u128::from_str_radix(hex_str, 16)
            .map_err(|e| ParseSeedError::InvalidDigit(format!("{hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceSeed {
    /// Hex representation, big-endian, lowercase.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:032x}", u128::from_be_bytes(self.0))
    }
}

impl PieceQueue {
    /// Creates a queue with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut this = Self {
            rng: Pcg32::from_seed(seed.0),
            pieces: ArrayVec::new(),
        };
        this.refill();
        this
    }

    fn generate(&mut self) -> Piece {
        Piece::new(self.rng.random(), self.rng.random())
    }

    /// Discards both pieces and generates a fresh active and preview piece.
    pub fn refill(&mut self) {
        self.pieces.clear();
        while !self.pieces.is_full() {
            let piece = self.generate();
            self.pieces.push(piece);
        }
    }

    #[must_use]
    pub fn active(&self) -> &Piece {
        &self.pieces[0]
    }

    pub(crate) fn active_mut(&mut self) -> &mut Piece {
        &mut self.pieces[0]
    }

    #[must_use]
    pub fn preview(&self) -> &Piece {
        &self.pieces[1]
    }

    /// Makes the preview the active piece and generates a new preview.
    ///
    /// Returns the new active piece.
    pub fn promote(&mut self) -> &Piece {
        self.pieces.remove(0);
        let next = self.generate();
        self.pieces.push(next);
        self.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_from_bytes(bytes: [u8; 16]) -> PieceSeed {
        PieceSeed(bytes)
    }

    #[test]
    fn test_promote_moves_preview_to_front() {
        let mut queue = PieceQueue::with_seed(seed_from_bytes([7; 16]));
        for _ in 0..20 {
            let preview = *queue.preview();
            let active = *queue.promote();
            assert_eq!(active, preview);
            assert_eq!(queue.pieces.len(), 2);
        }
    }

    #[test]
    fn test_generated_pieces_spawn_centered() {
        let mut queue = PieceQueue::with_seed(seed_from_bytes([3; 16]));
        for _ in 0..20 {
            let piece = *queue.promote();
            assert_eq!(piece, piece.respawned());
        }
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let seed = seed_from_bytes([
            0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
            0x77, 0x88,
        ]);

        let mut queue1 = PieceQueue::with_seed(seed);
        let mut queue2 = PieceQueue::with_seed(seed);

        for _ in 0..20 {
            assert_eq!(queue1.promote(), queue2.promote());
        }
    }

    #[test]
    fn test_refill_replaces_both_pieces() {
        let mut queue = PieceQueue::with_seed(seed_from_bytes([1; 16]));
        let mut reference = queue.clone();
        queue.refill();
        reference.promote();
        reference.promote();
        assert_eq!(queue.active(), reference.active());
        assert_eq!(queue.preview(), reference.preview());
    }

    mod piece_seed_hex {
        use super::*;

        #[test]
        fn test_hex_parses_back() {
            let seed: PieceSeed = rand::rng().random();
            assert_eq!(seed.to_hex().parse::<PieceSeed>(), Ok(seed));
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = seed_from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            assert_eq!(seed.to_hex(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_parse_uppercase_hex() {
            let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed.to_hex(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_error_wrong_length() {
            assert_eq!(
                "0123".parse::<PieceSeed>(),
                Err(ParseSeedError::InvalidLength(4))
            );
            let err = "".parse::<PieceSeed>().unwrap_err();
            assert_eq!(err.to_string(), "invalid hex: expected 32 characters, got 0");
        }

        #[test]
        fn test_error_invalid_hex_characters() {
            let result = "ghijklmnopqrstuvwxyzghijklmnopqr".parse::<PieceSeed>();
            assert!(matches!(result, Err(ParseSeedError::InvalidDigit(_))));
        }
    }
}
