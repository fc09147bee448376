//! Bracket seeding
//!
//! Splits the entrants into two halves, picks the starting tier from the
//! total count and hands out byes so every opening match is either full or
//! replaced by a straight advance to the next round.

use serde::{Deserialize, Serialize};
use crate::slot::{Round, Side, SlotId, Tier};

/// Tournament entrant
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub id: String,
}

impl Player {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self { name: name.into(), id: id.into() }
    }
}

/// Ordered (slot, player) pairs; a slot appears at most once
pub type SlotAssignment = Vec<(SlotId, Player)>;

/// One bracket entry as it travels between peers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSlot {
    pub slot_id: String,
    pub player_name: String,
}

/// Flatten an assignment into its wire form, order preserved
pub fn to_wire(assignment: &[(SlotId, Player)]) -> Vec<WireSlot> {
    assignment
        .iter()
        .map(|(slot, player)| WireSlot {
            slot_id: slot.to_string(),
            player_name: player.name.clone(),
        })
        .collect()
}

/// Seed `players` into a bracket
///
/// Left half takes `ceil(N/2)` players and right half `floor(N/2)`, both in
/// input order. Shuffle beforehand for random seeding. Callers must keep
/// `N <= MAX_PLAYERS`; players that do not fit are dropped.
pub fn seed(players: &[Player]) -> SlotAssignment {
    let tier = Tier::for_player_count(players.len());
    let (left, right) = players.split_at(players.len().div_ceil(2));

    let mut assignment = distribute_side(left, Side::Left, tier.side_capacity());
    assignment.extend(distribute_side(right, Side::Right, tier.side_capacity()));
    assignment
}

/// Place one side's players into its opening round
///
/// `capacity` is the side's seat count in the opening round (8, 4 or 2).
/// With `k` players, `capacity - k` byes go to the lowest-numbered matches:
/// a bye puts the next player straight into inner-round seat `i` for match
/// `i`. Remaining matches take two players each into seats `2i-1` and `2i`.
pub fn distribute_side(players: &[Player], side: Side, capacity: usize) -> SlotAssignment {
    let mut assignment = Vec::new();
    if players.is_empty() {
        return assignment;
    }
    let Some(round) = Round::with_seats(capacity) else {
        return assignment;
    };
    // Final has a single seat; byes from the semifinal land there
    let bye_round = round.next().unwrap_or(Round::Final);

    let matches = capacity / 2;
    let byes = capacity.saturating_sub(players.len()).min(matches);
    let mut granted = 0;
    let mut cursor = 0;

    for i in 1..=matches {
        if cursor >= players.len() {
            break;
        }

        if granted < byes {
            assignment.push((SlotId::seat(side, bye_round, i as u8), players[cursor].clone()));
            granted += 1;
            cursor += 1;
            continue;
        }

        let first = (2 * i - 1) as u8;
        for (offset, player) in players[cursor..].iter().take(2).enumerate() {
            assignment.push((SlotId::seat(side, round, first + offset as u8), player.clone()));
        }
        cursor += players[cursor..].len().min(2);
    }

    if cursor < players.len() {
        log::warn!(
            "{} side over capacity {}: {} player(s) not seated",
            side.code(),
            capacity,
            players.len() - cursor
        );
    }

    assignment
}
