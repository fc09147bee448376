//! Lobby configuration

use serde::{Deserialize, Serialize};
use slaps_core::{DEFAULT_RATING, MAX_PLAYERS};

use crate::error::LobbyError;

/// Settings the host fixes when opening a lobby
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LobbyConfig {
    /// Most players a tournament accepts (at most 16)
    pub max_players: usize,
    /// Fewest players needed to start (at least 2)
    pub min_players: usize,
    /// Characters in a lobby code
    pub code_length: usize,
    /// Lobby code collisions tolerated before giving up
    pub max_code_attempts: u32,
    /// Shuffle entrants before seeding
    pub shuffle_seeding: bool,
    /// Rating for players the store has never seen
    pub default_rating: i32,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            max_players: MAX_PLAYERS,
            min_players: 2,
            code_length: 5,
            max_code_attempts: 5,
            shuffle_seeding: true,
            default_rating: DEFAULT_RATING,
        }
    }
}

impl LobbyConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, LobbyError> {
        let config: LobbyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LobbyError> {
        if self.max_players > MAX_PLAYERS {
            return Err(LobbyError::InvalidConfig(format!(
                "maxPlayers {} exceeds bracket capacity {}",
                self.max_players, MAX_PLAYERS
            )));
        }
        // a lone entrant has no match to play
        if self.min_players < 2 || self.min_players > self.max_players {
            return Err(LobbyError::InvalidConfig(format!(
                "minPlayers must be in 2..={}, got {}",
                self.max_players, self.min_players
            )));
        }
        if self.code_length == 0 {
            return Err(LobbyError::InvalidConfig("codeLength must be positive".into()));
        }
        if self.max_code_attempts == 0 {
            return Err(LobbyError::InvalidConfig("maxCodeAttempts must be positive".into()));
        }
        Ok(())
    }
}
