//! Slaps tournament core
//!
//! Pure logic behind the friend-tournament bracket and the rating ladder.
//! This crate is compiled to:
//! - Native (for the lobby host and tests)
//! - WASM (for the browser bracket renderer)

mod bracket;
mod random;
mod rating;
mod seeding;
mod slot;

#[cfg(feature = "wasm")]
mod wasm;

pub use bracket::{Bracket, BracketError};
pub use random::SeededRng;
pub use rating::{
    base_k_factor, compute_new_rating, expected_score, k_factor, RatingInput, RatingResult,
    DEFAULT_RATING, NEWBIE_GAMES,
};
pub use seeding::{distribute_side, seed, to_wire, Player, SlotAssignment, WireSlot};
pub use slot::{ParseSlotError, Round, Side, SlotId, Tier, MAX_PLAYERS};
