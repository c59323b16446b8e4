//! Game engine logic and state management.
//!
//! This module orchestrates the core data structures into the edge-travel
//! game:
//!
//! - [`PieceQueue`] - Active piece plus one preview piece
//! - [`TravelController`] - Per-tick travel toward the committed edge
//! - [`GameKey`] / [`route_key`] - Contextual meaning of the directional keys
//! - [`GameStats`] - Score and cleared-line counters
//! - [`GameSession`] - The whole game, driven by ticks and keys
//!
//! # Game Flow
//!
//! 1. [`GameSession::reset`] spawns a piece at the board center
//! 2. The player chooses an edge; the piece starts travelling toward it
//! 3. Directional keys nudge or rotate the piece while it travels
//! 4. When the next step is blocked the piece is placed and the lines
//!    orthogonal to its edge are cleared
//! 5. The preview piece spawns; if it does not fit, the game is over

pub use self::{game_session::*, game_stats::*, input::*, piece_queue::*, travel::*};

mod game_session;
mod game_stats;
mod input;
mod piece_queue;
mod travel;
