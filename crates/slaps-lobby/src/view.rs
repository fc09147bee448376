//! Guest-side mirror of a hosted tournament

use slaps_core::{Bracket, Player, SlotId};

use crate::code::LobbyCode;
use crate::error::LobbyError;
use crate::protocol::Message;
use crate::session::check_reported_winner;

/// What a guest knows about the tournament, rebuilt from host broadcasts
#[derive(Debug, Default, Clone)]
pub struct LobbyView {
    code: Option<LobbyCode>,
    players: Vec<Player>,
    bracket: Option<Bracket>,
}

impl LobbyView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> Option<&LobbyCode> {
        self.code.as_ref()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn bracket(&self) -> Option<&Bracket> {
        self.bracket.as_ref()
    }

    pub fn champion(&self) -> Option<&Player> {
        self.bracket.as_ref().and_then(Bracket::champion)
    }

    /// Apply one broadcast from the host
    pub fn apply(&mut self, message: &Message) -> Result<(), LobbyError> {
        match message {
            Message::LobbyUpdate { code, players } => {
                self.code = Some(code.clone());
                self.players = players.clone();
                Ok(())
            }
            Message::StartTournament { tier, bracket } => {
                let mut assignment = Vec::with_capacity(bracket.len());
                for entry in bracket {
                    let slot: SlotId = entry.slot_id.parse()?;
                    assignment.push((slot, self.resolve(&entry.player_name)));
                }
                self.bracket = Some(Bracket::new(*tier, assignment)?);
                Ok(())
            }
            Message::MatchResult { slot_id, winner } => {
                let slot: SlotId = slot_id.parse()?;
                let bracket = self.bracket.as_mut().ok_or(LobbyError::InvalidPhase("open"))?;
                check_reported_winner(bracket, slot, winner)?;
                bracket.record_winner(slot)?;
                Ok(())
            }
            Message::JoinRequest { .. } => Err(LobbyError::UnexpectedMessage(message.kind())),
        }
    }

    /// Roster entry for a bracket name; unknown names stand in as their own id
    fn resolve(&self, name: &str) -> Player {
        self.players
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .unwrap_or_else(|| Player::new(name, name))
    }
}
