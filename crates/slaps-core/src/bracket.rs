//! Bracket progression
//!
//! Owned bracket state built from a seeding. Winners are advanced one match
//! at a time until a single player holds the champion slot.

use core::fmt;
use std::collections::BTreeMap;

use crate::seeding::{seed, to_wire, Player, SlotAssignment, WireSlot};
use crate::slot::{Round, Side, SlotId, Tier};

/// Errors from building or advancing a bracket
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BracketError {
    /// Slot lies in a round this tier never plays, or names no seat.
    OutsideBracket(SlotId),
    /// Slot was assigned twice.
    DuplicateSlot(SlotId),
    /// Nobody sits in the slot.
    EmptySlot(SlotId),
    /// The opposing seat of the match is still empty.
    AwaitingOpponent(SlotId),
    /// The match feeding this slot already has a winner.
    AlreadyDecided(SlotId),
    /// The champion slot has no further match.
    Finished,
}

impl fmt::Display for BracketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketError::OutsideBracket(slot) => write!(f, "slot {} is not part of this bracket", slot),
            BracketError::DuplicateSlot(slot) => write!(f, "slot {} assigned more than once", slot),
            BracketError::EmptySlot(slot) => write!(f, "slot {} is empty", slot),
            BracketError::AwaitingOpponent(slot) => write!(f, "slot {} has no opponent yet", slot),
            BracketError::AlreadyDecided(slot) => write!(f, "slot {} is already filled", slot),
            BracketError::Finished => write!(f, "tournament already has a champion"),
        }
    }
}

impl std::error::Error for BracketError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bracket {
    tier: Tier,
    slots: BTreeMap<SlotId, Player>,
}

impl Bracket {
    /// Build a bracket from an existing assignment
    pub fn new(tier: Tier, assignment: SlotAssignment) -> Result<Self, BracketError> {
        let mut slots = BTreeMap::new();
        for (slot, player) in assignment {
            if !in_tier(tier, &slot) {
                return Err(BracketError::OutsideBracket(slot));
            }
            if slots.insert(slot, player).is_some() {
                return Err(BracketError::DuplicateSlot(slot));
            }
        }
        Ok(Self { tier, slots })
    }

    /// Seed `players` and build the bracket in one step
    pub fn seeded(players: &[Player]) -> Self {
        let tier = Tier::for_player_count(players.len());
        let slots = seed(players).into_iter().collect();
        Self { tier, slots }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn occupant(&self, slot: SlotId) -> Option<&Player> {
        self.slots.get(&slot)
    }

    pub fn champion(&self) -> Option<&Player> {
        self.slots.get(&SlotId::Champion)
    }

    /// Every filled slot in bracket order
    pub fn assignments(&self) -> SlotAssignment {
        self.slots
            .iter()
            .map(|(slot, player)| (*slot, player.clone()))
            .collect()
    }

    pub fn to_wire(&self) -> Vec<WireSlot> {
        to_wire(&self.assignments())
    }

    /// The player in `slot` wins its match and moves on
    ///
    /// Returns the slot the winner now occupies.
    pub fn record_winner(&mut self, slot: SlotId) -> Result<SlotId, BracketError> {
        if slot == SlotId::Champion {
            return Err(BracketError::Finished);
        }
        if !in_tier(self.tier, &slot) {
            return Err(BracketError::OutsideBracket(slot));
        }

        let winner = self.slots.get(&slot).ok_or(BracketError::EmptySlot(slot))?.clone();

        let sibling = slot.sibling().ok_or(BracketError::OutsideBracket(slot))?;
        if !self.slots.contains_key(&sibling) {
            return Err(BracketError::AwaitingOpponent(slot));
        }

        let target = slot.advances_to().ok_or(BracketError::Finished)?;
        if self.slots.contains_key(&target) {
            return Err(BracketError::AlreadyDecided(target));
        }

        log::debug!("{} advances from {} to {}", winner.name, slot, target);
        self.slots.insert(target, winner);
        Ok(target)
    }

    /// Matches ready to be played: both seats filled, no winner yet
    ///
    /// Ordered outer rounds first, left side before right, then by seat.
    pub fn pending_matches(&self) -> Vec<(SlotId, SlotId)> {
        let mut pending: Vec<(SlotId, SlotId)> = self
            .slots
            .keys()
            .filter(|slot| is_first_seat(slot))
            .filter_map(|slot| {
                let sibling = slot.sibling()?;
                let target = slot.advances_to()?;
                (self.slots.contains_key(&sibling) && !self.slots.contains_key(&target))
                    .then_some((*slot, sibling))
            })
            .collect();
        pending.sort_by_key(|(slot, _)| match slot {
            SlotId::Seat { side, round, index } => (*round, *side, *index),
            SlotId::Champion => (Round::Final, Side::Right, u8::MAX),
        });
        pending
    }

    pub fn is_finished(&self) -> bool {
        self.champion().is_some()
    }
}

fn in_tier(tier: Tier, slot: &SlotId) -> bool {
    slot.is_valid()
        && match slot.round() {
            Some(round) => round >= tier.opening_round(),
            None => true,
        }
}

/// Odd seat of a match; the left finalist stands for the final
fn is_first_seat(slot: &SlotId) -> bool {
    match slot {
        SlotId::Seat { side, round: Round::Final, .. } => *side == Side::Left,
        SlotId::Seat { index, .. } => index % 2 == 1,
        SlotId::Champion => false,
    }
}
