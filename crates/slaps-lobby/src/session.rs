//! Host-side tournament session
//!
//! One `TournamentSession` per tournament, owned by whoever hosts it. It
//! collects registrations while the lobby is open, seeds the bracket on
//! start and advances winners until a champion is crowned. Every state
//! change is broadcast through the caller's [`Transport`].

use slaps_core::{Bracket, Player, SeededRng, SlotId, Tier};

use crate::code::{allocate, LobbyCode};
use crate::config::LobbyConfig;
use crate::error::LobbyError;
use crate::protocol::Message;
use crate::ratings::{apply_match_result, RatingStore, RatingUpdate};
use crate::transport::Transport;

/// RNG stream for lobby codes; seeding shuffles use `SEEDING_STREAM`
const CODE_STREAM: u32 = 0;
const SEEDING_STREAM: u32 = 1;

/// Tournament state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Lobby,
    Running,
    Finished,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Lobby => "open",
            Phase::Running => "running",
            Phase::Finished => "finished",
        }
    }
}

#[derive(Debug)]
pub struct TournamentSession {
    code: LobbyCode,
    config: LobbyConfig,
    players: Vec<Player>,
    phase: Phase,
    bracket: Option<Bracket>,
    rng: SeededRng,
}

impl TournamentSession {
    /// Open a session under an already-bound lobby code
    ///
    /// The host is the first registered player.
    pub fn new(
        code: LobbyCode,
        host: Player,
        config: LobbyConfig,
        seed: &[u8; 32],
    ) -> Result<Self, LobbyError> {
        config.validate()?;
        log::info!("lobby {} opened by {}", code, host.name);
        Ok(Self {
            code,
            config,
            players: vec![host],
            phase: Phase::Lobby,
            bracket: None,
            rng: SeededRng::new(seed, SEEDING_STREAM),
        })
    }

    /// Allocate a lobby code and open a session under it
    ///
    /// `is_taken` reports whether the peer network already knows a code.
    pub fn open(
        host: Player,
        config: LobbyConfig,
        seed: &[u8; 32],
        is_taken: impl FnMut(&LobbyCode) -> bool,
    ) -> Result<Self, LobbyError> {
        config.validate()?;
        let mut rng = SeededRng::new(seed, CODE_STREAM);
        let code = allocate(&config, &mut rng, is_taken)?;
        Self::new(code, host, config, seed)
    }

    pub fn code(&self) -> &LobbyCode {
        &self.code
    }

    pub fn config(&self) -> &LobbyConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
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

    /// Handle one inbound peer message
    pub fn handle_message(
        &mut self,
        message: Message,
        transport: &mut impl Transport,
    ) -> Result<(), LobbyError> {
        match message {
            Message::JoinRequest { player } => self.join(player, transport),
            Message::MatchResult { slot_id, winner } => {
                let slot: SlotId = slot_id.parse()?;
                self.require_phase(Phase::Running)?;
                if let Some(bracket) = &self.bracket {
                    check_reported_winner(bracket, slot, &winner)?;
                }
                self.report_winner(slot, transport).map(|_| ())
            }
            Message::LobbyUpdate { .. } | Message::StartTournament { .. } => {
                log::warn!("lobby {} ignoring host-only {} message", self.code, message.kind());
                Err(LobbyError::UnexpectedMessage(message.kind()))
            }
        }
    }

    /// Register a player and broadcast the new roster
    pub fn join(&mut self, player: Player, transport: &mut impl Transport) -> Result<(), LobbyError> {
        self.require_phase(Phase::Lobby)?;

        if self.players.iter().any(|p| p.id == player.id) {
            log::warn!("lobby {} rejected duplicate join from {}", self.code, player.id);
            return Err(LobbyError::AlreadyJoined(player.id));
        }
        // guests only see names, so names must identify players
        if self.players.iter().any(|p| p.name == player.name) {
            log::warn!("lobby {} rejected duplicate name {}", self.code, player.name);
            return Err(LobbyError::NameTaken(player.name));
        }
        if self.players.len() >= self.config.max_players {
            return Err(LobbyError::LobbyFull(self.config.max_players));
        }

        log::info!("{} joined lobby {}", player.name, self.code);
        self.players.push(player);
        self.broadcast_roster(transport)
    }

    pub fn broadcast_roster(&self, transport: &mut impl Transport) -> Result<(), LobbyError> {
        transport.send(&Message::LobbyUpdate {
            code: self.code.clone(),
            players: self.players.clone(),
        })
    }

    /// Seed the bracket and start play
    pub fn start(&mut self, transport: &mut impl Transport) -> Result<Tier, LobbyError> {
        self.require_phase(Phase::Lobby)?;

        let count = self.players.len();
        if count < self.config.min_players || count > self.config.max_players {
            return Err(LobbyError::InvalidPlayerCount {
                count,
                min: self.config.min_players,
                max: self.config.max_players,
            });
        }

        let mut entrants = self.players.clone();
        if self.config.shuffle_seeding {
            self.rng.shuffle(&mut entrants);
        }
        let bracket = Bracket::seeded(&entrants);
        let tier = bracket.tier();

        transport.send(&Message::StartTournament {
            tier,
            bracket: bracket.to_wire(),
        })?;

        log::info!("lobby {} started: {} players, {:?} tier", self.code, count, tier);
        self.bracket = Some(bracket);
        self.phase = Phase::Running;
        Ok(tier)
    }

    /// Advance the player in `slot` and broadcast the result
    ///
    /// Returns the slot the winner moved into.
    pub fn report_winner(
        &mut self,
        slot: SlotId,
        transport: &mut impl Transport,
    ) -> Result<SlotId, LobbyError> {
        self.require_phase(Phase::Running)?;
        let current = self.bracket.as_ref().ok_or(LobbyError::InvalidPhase(self.phase.name()))?;

        let mut next = current.clone();
        let target = next.record_winner(slot)?;
        let winner = next
            .occupant(target)
            .map(|p| p.name.clone())
            .unwrap_or_default();

        transport.send(&Message::MatchResult {
            slot_id: slot.to_string(),
            winner,
        })?;

        if next.is_finished() {
            if let Some(champion) = next.champion() {
                log::info!("lobby {} finished, champion {}", self.code, champion.name);
            }
            self.phase = Phase::Finished;
        }
        self.bracket = Some(next);
        Ok(target)
    }

    /// Advance the winner and update both players' ratings
    pub fn report_rated_winner(
        &mut self,
        slot: SlotId,
        transport: &mut impl Transport,
        store: &mut impl RatingStore,
    ) -> Result<RatingUpdate, LobbyError> {
        let (winner_id, loser_id) = {
            let bracket = self.bracket.as_ref().ok_or(LobbyError::InvalidPhase(self.phase.name()))?;
            let winner = bracket.occupant(slot);
            let loser = slot.sibling().and_then(|s| bracket.occupant(s));
            match (winner, loser) {
                (Some(w), Some(l)) => (w.id.clone(), l.id.clone()),
                (None, _) => return Err(slaps_core::BracketError::EmptySlot(slot).into()),
                (Some(_), None) => return Err(slaps_core::BracketError::AwaitingOpponent(slot).into()),
            }
        };

        self.report_winner(slot, transport)?;
        Ok(apply_match_result(store, &winner_id, &loser_id, self.config.default_rating))
    }

    /// Matches that can be played right now
    pub fn pending_matches(&self) -> Vec<(SlotId, SlotId)> {
        self.bracket
            .as_ref()
            .map(Bracket::pending_matches)
            .unwrap_or_default()
    }

    fn require_phase(&self, phase: Phase) -> Result<(), LobbyError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(LobbyError::InvalidPhase(self.phase.name()))
        }
    }
}

/// Reject a match report whose named winner is not the slot's occupant
pub(crate) fn check_reported_winner(
    bracket: &Bracket,
    slot: SlotId,
    winner: &str,
) -> Result<(), LobbyError> {
    match bracket.occupant(slot) {
        Some(occupant) if occupant.name != winner => Err(LobbyError::WinnerMismatch {
            slot: slot.to_string(),
            occupant: occupant.name.clone(),
            reported: winner.to_string(),
        }),
        _ => Ok(()),
    }
}
