//! Lobby and session error codes

use slaps_core::{BracketError, ParseSlotError};

#[derive(thiserror::Error, Debug)]
pub enum LobbyError {
    #[error("invalid bracket size: {count} players (need {min} to {max})")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },

    #[error("player `{0}` has already joined this lobby")]
    AlreadyJoined(String),

    #[error("the name `{0}` is already taken in this lobby")]
    NameTaken(String),

    #[error("slot {slot} holds `{occupant}`, but `{reported}` was reported as winner")]
    WinnerMismatch { slot: String, occupant: String, reported: String },

    #[error("lobby is full ({0} players)")]
    LobbyFull(usize),

    #[error("action not allowed while the tournament is {0}")]
    InvalidPhase(&'static str),

    #[error("unexpected `{0}` message")]
    UnexpectedMessage(&'static str),

    #[error("no free lobby code after {0} attempts")]
    CodeSpaceExhausted(u32),

    #[error("no lobby code has been proposed")]
    NoPendingCode,

    #[error("bracket error: {0}")]
    Bracket(#[from] BracketError),

    #[error("bad slot id: {0}")]
    Slot(#[from] ParseSlotError),

    #[error("message codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("transport failed: {0}")]
    Transport(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
