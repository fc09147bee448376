//! Bracket geometry: sides, rounds, tiers and slot identifiers
//!
//! Slot ids are the strings the bracket renderer knows about:
//! `L16-1..8`/`R16-1..8`, `LQF-1..4`/`RQF-1..4`, `LSF-1..2`/`RSF-1..2`,
//! then `LF-1`/`RF-1` for the two finalists and `CHAMPION`.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Half of the bracket
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn code(self) -> char {
        match self {
            Side::Left => 'L',
            Side::Right => 'R',
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Bracket round, outermost first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Round {
    RoundOf16,
    Quarterfinal,
    Semifinal,
    /// One seat per side; the two finalists meet across sides.
    Final,
}

impl Round {
    pub fn label(self) -> &'static str {
        match self {
            Round::RoundOf16 => "16",
            Round::Quarterfinal => "QF",
            Round::Semifinal => "SF",
            Round::Final => "F",
        }
    }

    /// Seats on one side of the bracket in this round
    pub fn seats(self) -> u8 {
        match self {
            Round::RoundOf16 => 8,
            Round::Quarterfinal => 4,
            Round::Semifinal => 2,
            Round::Final => 1,
        }
    }

    pub fn next(self) -> Option<Round> {
        match self {
            Round::RoundOf16 => Some(Round::Quarterfinal),
            Round::Quarterfinal => Some(Round::Semifinal),
            Round::Semifinal => Some(Round::Final),
            Round::Final => None,
        }
    }

    /// Round whose seat count per side equals `capacity`
    pub fn with_seats(capacity: usize) -> Option<Round> {
        match capacity {
            8 => Some(Round::RoundOf16),
            4 => Some(Round::Quarterfinal),
            2 => Some(Round::Semifinal),
            1 => Some(Round::Final),
            _ => None,
        }
    }

    fn from_label(label: &str) -> Option<Round> {
        match label {
            "16" => Some(Round::RoundOf16),
            "QF" => Some(Round::Quarterfinal),
            "SF" => Some(Round::Semifinal),
            "F" => Some(Round::Final),
            _ => None,
        }
    }
}

/// Round at which a bracket of a given size starts play
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Semifinal,
    Quarterfinal,
    RoundOf16,
}

/// Largest player count any tier can hold
pub const MAX_PLAYERS: usize = 16;

impl Tier {
    /// Pick the tier for `player_count` players
    ///
    /// `N <= 4` semifinal, `N <= 8` quarterfinal, anything larger round of 16.
    /// Counts above [`MAX_PLAYERS`] still map to round of 16; the excess
    /// cannot be seated.
    pub fn for_player_count(player_count: usize) -> Tier {
        if player_count <= 4 {
            Tier::Semifinal
        } else if player_count <= 8 {
            Tier::Quarterfinal
        } else {
            Tier::RoundOf16
        }
    }

    pub fn capacity(self) -> usize {
        self.side_capacity() * 2
    }

    pub fn side_capacity(self) -> usize {
        self.opening_round().seats() as usize
    }

    pub fn opening_round(self) -> Round {
        match self {
            Tier::Semifinal => Round::Semifinal,
            Tier::Quarterfinal => Round::Quarterfinal,
            Tier::RoundOf16 => Round::RoundOf16,
        }
    }
}

/// A named position in the bracket
///
/// Ordering is left side before right, outer rounds before inner, then by
/// seat index, with the champion last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SlotId {
    Seat { side: Side, round: Round, index: u8 },
    Champion,
}

impl SlotId {
    /// Seat constructor; `index` is 1-based
    pub const fn seat(side: Side, round: Round, index: u8) -> Self {
        SlotId::Seat { side, round, index }
    }

    pub fn round(&self) -> Option<Round> {
        match self {
            SlotId::Seat { round, .. } => Some(*round),
            SlotId::Champion => None,
        }
    }

    /// Whether the seat index exists for its round
    pub fn is_valid(&self) -> bool {
        match self {
            SlotId::Seat { round, index, .. } => (1..=round.seats()).contains(index),
            SlotId::Champion => true,
        }
    }

    /// The opposing seat of the same match
    pub fn sibling(&self) -> Option<SlotId> {
        match *self {
            SlotId::Seat { side, round: Round::Final, .. } => {
                Some(SlotId::seat(side.opposite(), Round::Final, 1))
            }
            SlotId::Seat { side, round, index } => {
                let other = if index % 2 == 1 { index + 1 } else { index - 1 };
                Some(SlotId::seat(side, round, other))
            }
            SlotId::Champion => None,
        }
    }

    /// Where the winner of this seat's match goes
    ///
    /// Seat `j` feeds seat `ceil(j/2)` of the next round on the same side, so
    /// match `i` (seats `2i-1`, `2i`) feeds seat `i`. Finalists feed the
    /// champion slot.
    pub fn advances_to(&self) -> Option<SlotId> {
        match *self {
            SlotId::Seat { side, round, index } => match round.next() {
                Some(next) => Some(SlotId::seat(side, next, index.div_ceil(2))),
                None => Some(SlotId::Champion),
            },
            SlotId::Champion => None,
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotId::Seat { side, round, index } => {
                write!(f, "{}{}-{}", side.code(), round.label(), index)
            }
            SlotId::Champion => write!(f, "CHAMPION"),
        }
    }
}

/// A slot id string that names no bracket position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseSlotError(pub String);

impl fmt::Display for ParseSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised slot id `{}`", self.0)
    }
}

impl std::error::Error for ParseSlotError {}

impl FromStr for SlotId {
    type Err = ParseSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSlotError(s.to_string());

        if s == "CHAMPION" {
            return Ok(SlotId::Champion);
        }

        let side = match s.chars().next() {
            Some('L') => Side::Left,
            Some('R') => Side::Right,
            _ => return Err(err()),
        };
        let (label, index) = s[1..].split_once('-').ok_or_else(err)?;
        let round = Round::from_label(label).ok_or_else(err)?;
        // plain decimal only: no sign, no leading zero
        if index.is_empty() || index.starts_with('0') || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let index: u8 = index.parse().map_err(|_| err())?;

        let slot = SlotId::seat(side, round, index);
        if slot.is_valid() {
            Ok(slot)
        } else {
            Err(err())
        }
    }
}

impl TryFrom<String> for SlotId {
    type Error = ParseSlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotId> for String {
    fn from(slot: SlotId) -> Self {
        slot.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::for_player_count(1), Tier::Semifinal);
        assert_eq!(Tier::for_player_count(4), Tier::Semifinal);
        assert_eq!(Tier::for_player_count(5), Tier::Quarterfinal);
        assert_eq!(Tier::for_player_count(8), Tier::Quarterfinal);
        assert_eq!(Tier::for_player_count(9), Tier::RoundOf16);
        assert_eq!(Tier::for_player_count(16), Tier::RoundOf16);
    }

    #[test]
    fn test_tier_capacity() {
        assert_eq!(Tier::Semifinal.capacity(), 4);
        assert_eq!(Tier::Quarterfinal.capacity(), 8);
        assert_eq!(Tier::RoundOf16.capacity(), 16);
        assert_eq!(Tier::RoundOf16.side_capacity(), 8);
    }

    #[test]
    fn test_display_matches_renderer_ids() {
        assert_eq!(SlotId::seat(Side::Left, Round::RoundOf16, 1).to_string(), "L16-1");
        assert_eq!(SlotId::seat(Side::Right, Round::Quarterfinal, 2).to_string(), "RQF-2");
        assert_eq!(SlotId::seat(Side::Left, Round::Semifinal, 1).to_string(), "LSF-1");
        assert_eq!(SlotId::seat(Side::Right, Round::Final, 1).to_string(), "RF-1");
        assert_eq!(SlotId::Champion.to_string(), "CHAMPION");
    }

    #[test]
    fn test_parse_every_seat() {
        for side in [Side::Left, Side::Right] {
            for round in [Round::RoundOf16, Round::Quarterfinal, Round::Semifinal, Round::Final] {
                for index in 1..=round.seats() {
                    let slot = SlotId::seat(side, round, index);
                    assert_eq!(slot.to_string().parse::<SlotId>(), Ok(slot));
                }
            }
        }
        assert_eq!("CHAMPION".parse::<SlotId>(), Ok(SlotId::Champion));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in [
            "", "X16-1", "L16-9", "LQF-0", "LSF-3", "RF-2", "L16", "LQ-1", "L16-a", "champion",
            "L16-+1", "LQF-01", "RSF-1 ",
        ] {
            assert!(bad.parse::<SlotId>().is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn test_sibling_pairs() {
        let a = SlotId::seat(Side::Left, Round::RoundOf16, 3);
        let b = SlotId::seat(Side::Left, Round::RoundOf16, 4);
        assert_eq!(a.sibling(), Some(b));
        assert_eq!(b.sibling(), Some(a));

        let lf = SlotId::seat(Side::Left, Round::Final, 1);
        let rf = SlotId::seat(Side::Right, Round::Final, 1);
        assert_eq!(lf.sibling(), Some(rf));
        assert_eq!(SlotId::Champion.sibling(), None);
    }

    #[test]
    fn test_advancement_targets() {
        let qf4 = SlotId::seat(Side::Right, Round::Quarterfinal, 4);
        assert_eq!(qf4.advances_to(), Some(SlotId::seat(Side::Right, Round::Semifinal, 2)));

        let r16_7 = SlotId::seat(Side::Left, Round::RoundOf16, 7);
        assert_eq!(r16_7.advances_to(), Some(SlotId::seat(Side::Left, Round::Quarterfinal, 4)));

        let sf1 = SlotId::seat(Side::Left, Round::Semifinal, 1);
        assert_eq!(sf1.advances_to(), Some(SlotId::seat(Side::Left, Round::Final, 1)));

        let rf = SlotId::seat(Side::Right, Round::Final, 1);
        assert_eq!(rf.advances_to(), Some(SlotId::Champion));
        assert_eq!(SlotId::Champion.advances_to(), None);
    }

    #[test]
    fn test_ordering_left_first_then_round() {
        let mut slots = vec![
            SlotId::Champion,
            SlotId::seat(Side::Right, Round::RoundOf16, 1),
            SlotId::seat(Side::Left, Round::Semifinal, 1),
            SlotId::seat(Side::Left, Round::RoundOf16, 2),
        ];
        slots.sort();
        let names: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["L16-2", "LSF-1", "R16-1", "CHAMPION"]);
    }

    #[test]
    fn test_serde_as_string() {
        let slot = SlotId::seat(Side::Left, Round::Quarterfinal, 3);
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"LQF-3\"");
        let back: SlotId = serde_json::from_str("\"LQF-3\"").unwrap();
        assert_eq!(back, slot);
        assert!(serde_json::from_str::<SlotId>("\"LQF-7\"").is_err());
    }
}
