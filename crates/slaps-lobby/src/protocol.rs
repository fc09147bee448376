//! Wire protocol shared by the lobby host and its guests.

use serde::{Deserialize, Serialize};
use slaps_core::{Player, Tier, WireSlot};

use crate::code::LobbyCode;
use crate::error::LobbyError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Message {
    /// Guest → host: register for the tournament.
    JoinRequest { player: Player },

    /// Host → guests: current roster.
    LobbyUpdate { code: LobbyCode, players: Vec<Player> },

    /// Host → guests: seeded bracket, play begins.
    StartTournament { tier: Tier, bracket: Vec<WireSlot> },

    /// Either direction: the player in `slot_id` won their match.
    #[serde(rename_all = "camelCase")]
    MatchResult { slot_id: String, winner: String },
}

impl Message {
    pub fn kind(&self) -> &'static str {
        match self {
            Message::JoinRequest { .. } => "join-request",
            Message::LobbyUpdate { .. } => "lobby-update",
            Message::StartTournament { .. } => "start-tournament",
            Message::MatchResult { .. } => "match-result",
        }
    }

    pub fn to_json(&self) -> Result<String, LobbyError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, LobbyError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_request_shape() {
        let msg = Message::JoinRequest { player: Player::new("Ada", "peer-1") };
        let value: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"type": "join-request", "player": {"name": "Ada", "id": "peer-1"}})
        );
    }

    #[test]
    fn test_start_tournament_shape() {
        let msg = Message::StartTournament {
            tier: Tier::RoundOf16,
            bracket: vec![WireSlot { slot_id: "L16-1".into(), player_name: "Ada".into() }],
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "start-tournament",
                "tier": "round-of-16",
                "bracket": [{"slotId": "L16-1", "playerName": "Ada"}]
            })
        );
    }

    #[test]
    fn test_match_result_field_names() {
        let msg = Message::from_json(r#"{"type":"match-result","slotId":"LSF-2","winner":"Bo"}"#).unwrap();
        assert_eq!(
            msg,
            Message::MatchResult { slot_id: "LSF-2".into(), winner: "Bo".into() }
        );
        assert_eq!(msg.kind(), "match-result");
    }

    #[test]
    fn test_lobby_update_parses() {
        let msg = Message::from_json(
            r#"{"type":"lobby-update","code":"QX7PA","players":[{"name":"Ada","id":"p1"}]}"#,
        )
        .unwrap();
        match msg {
            Message::LobbyUpdate { code, players } => {
                assert_eq!(code.as_str(), "QX7PA");
                assert_eq!(players.len(), 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = Message::from_json(r#"{"type":"slap","card":3}"#).unwrap_err();
        assert!(matches!(err, LobbyError::Codec(_)));
    }
}
