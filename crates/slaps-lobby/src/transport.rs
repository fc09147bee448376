//! Outbound message channel
//!
//! Peer connections live outside this crate; anything that can deliver a
//! [`Message`] to every connected peer implements [`Transport`]. Inbound
//! messages are fed to `TournamentSession::handle_message`.

use crate::error::LobbyError;
use crate::protocol::Message;

pub trait Transport {
    /// Broadcast `message` to every connected peer
    fn send(&mut self, message: &Message) -> Result<(), LobbyError>;
}

/// In-memory transport that keeps every message sent through it
#[derive(Debug, Default)]
pub struct Outbox {
    sent: Vec<Message>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[Message] {
        &self.sent
    }

    pub fn last(&self) -> Option<&Message> {
        self.sent.last()
    }

    /// Take everything sent so far, e.g. to forward to real peers
    pub fn drain(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.sent)
    }
}

impl Transport for Outbox {
    fn send(&mut self, message: &Message) -> Result<(), LobbyError> {
        self.sent.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slaps_core::Player;

    #[test]
    fn test_outbox_records_in_order() {
        let mut outbox = Outbox::new();
        let a = Message::JoinRequest { player: Player::new("A", "a") };
        let b = Message::MatchResult { slot_id: "LF-1".into(), winner: "A".into() };
        outbox.send(&a).unwrap();
        outbox.send(&b).unwrap();

        assert_eq!(outbox.sent(), &[a.clone(), b.clone()]);
        assert_eq!(outbox.last(), Some(&b));
        assert_eq!(outbox.drain(), vec![a, b]);
        assert!(outbox.sent().is_empty());
    }
}
