//! Slaps friend-tournament lobby
//!
//! Orchestration around `slaps-core`:
//! - lobby code allocation with bounded retry on collisions
//! - the host's tournament session (registration, seeding, progression)
//! - the tagged message protocol exchanged with guests
//! - post-match rating updates against a rating store

mod code;
mod config;
mod error;
mod protocol;
mod ratings;
mod session;
mod transport;
mod view;

pub use code::{allocate, AllocState, CodeAllocator, LobbyCode};
pub use config::LobbyConfig;
pub use error::LobbyError;
pub use protocol::Message;
pub use ratings::{apply_match_result, MemoryRatingStore, RatingRecord, RatingStore, RatingUpdate};
pub use session::{Phase, TournamentSession};
pub use transport::{Outbox, Transport};
pub use view::LobbyView;
