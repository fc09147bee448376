//! Post-match rating updates against a rating store

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slaps_core::{compute_new_rating, RatingInput};

/// Persisted rating and experience of one player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    pub rating: i32,
    pub games_played: u32,
}

impl RatingRecord {
    pub fn new(rating: i32) -> Self {
        Self { rating, games_played: 0 }
    }
}

/// Where ratings live between matches (local storage, a database, ...)
pub trait RatingStore {
    fn record(&self, player_id: &str) -> Option<RatingRecord>;
    fn store(&mut self, player_id: &str, record: RatingRecord);
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemoryRatingStore {
    records: HashMap<String, RatingRecord>,
}

impl MemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records sorted by rating, best first
    pub fn leaderboard(&self) -> Vec<(String, RatingRecord)> {
        let mut entries: Vec<_> = self
            .records
            .iter()
            .map(|(id, record)| (id.clone(), *record))
            .collect();
        entries.sort_by(|a, b| b.1.rating.cmp(&a.1.rating).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

impl RatingStore for MemoryRatingStore {
    fn record(&self, player_id: &str) -> Option<RatingRecord> {
        self.records.get(player_id).copied()
    }

    fn store(&mut self, player_id: &str, record: RatingRecord) {
        self.records.insert(player_id.to_string(), record);
    }
}

/// New records for both players of a decided match
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RatingUpdate {
    pub winner: RatingRecord,
    pub loser: RatingRecord,
}

/// Rate a finished match and write both players back
///
/// Each side is computed from its own perspective using the records as they
/// stood before the match, then both game counts go up by one. Unknown
/// players start at `default_rating`.
pub fn apply_match_result(
    store: &mut impl RatingStore,
    winner_id: &str,
    loser_id: &str,
    default_rating: i32,
) -> RatingUpdate {
    let winner = store.record(winner_id).unwrap_or(RatingRecord::new(default_rating));
    let loser = store.record(loser_id).unwrap_or(RatingRecord::new(default_rating));

    let winner_view = RatingInput {
        my_rating: winner.rating,
        opponent_rating: loser.rating,
        my_games_played: winner.games_played,
        opponent_games_played: loser.games_played,
        did_i_win: true,
    };
    let loser_view = winner_view.mirrored();

    let update = RatingUpdate {
        winner: RatingRecord {
            rating: compute_new_rating(&winner_view).new_rating,
            games_played: winner.games_played + 1,
        },
        loser: RatingRecord {
            rating: compute_new_rating(&loser_view).new_rating,
            games_played: loser.games_played + 1,
        },
    };

    log::info!(
        "rated {} {} -> {}, {} {} -> {}",
        winner_id,
        winner.rating,
        update.winner.rating,
        loser_id,
        loser.rating,
        update.loser.rating
    );

    store.store(winner_id, update.winner);
    store.store(loser_id, update.loser);
    update
}
