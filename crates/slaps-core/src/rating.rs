//! Adaptive Elo rating engine
//!
//! Experience-weighted K-factor over the standard logistic expected score.
//! Each side of a match calls [`compute_new_rating`] from its own perspective.

use serde::{Deserialize, Serialize};

/// Rating assigned to a player with no recorded games
pub const DEFAULT_RATING: i32 = 1000;

/// Game count at or below which a player counts as new
pub const NEWBIE_GAMES: u32 = 5;

/// Everything the engine needs for one side of one match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingInput {
    pub my_rating: i32,
    pub opponent_rating: i32,
    pub my_games_played: u32,
    pub opponent_games_played: u32,
    pub did_i_win: bool,
}

impl RatingInput {
    /// The same match seen from the opponent's side
    pub fn mirrored(&self) -> Self {
        Self {
            my_rating: self.opponent_rating,
            opponent_rating: self.my_rating,
            my_games_played: self.opponent_games_played,
            opponent_games_played: self.my_games_played,
            did_i_win: !self.did_i_win,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResult {
    pub new_rating: i32,
}

/// Base K-factor from the player's own experience
///
/// | games  | K  |
/// |--------|----|
/// | 0-5    | 64 |
/// | 6-15   | 32 |
/// | 16-30  | 16 |
/// | 31+    | 8  |
pub fn base_k_factor(games_played: u32) -> f64 {
    match games_played {
        0..=5 => 64.0,
        6..=15 => 32.0,
        16..=30 => 16.0,
        _ => 8.0,
    }
}

/// K-factor after newbie dampening
///
/// Halved (not rounded) when the opponent has played `NEWBIE_GAMES` or fewer.
pub fn k_factor(my_games_played: u32, opponent_games_played: u32) -> f64 {
    let k = base_k_factor(my_games_played);
    if opponent_games_played <= NEWBIE_GAMES {
        log::debug!(
            "opponent is new ({} games), K-factor halved from {} to {}",
            opponent_games_played,
            k,
            k / 2.0
        );
        k / 2.0
    } else {
        k
    }
}

/// Logistic expected score of `my_rating` against `opponent_rating`
pub fn expected_score(my_rating: i32, opponent_rating: i32) -> f64 {
    let diff = (opponent_rating as f64 - my_rating as f64) / 400.0;
    1.0 / (1.0 + 10f64.powf(diff))
}

/// Compute a player's rating after one decided match
///
/// `round(my + K * (actual - expected))` with ties at .5 rounded away from
/// zero. Total over well-formed input; never fails.
pub fn compute_new_rating(input: &RatingInput) -> RatingResult {
    let k = k_factor(input.my_games_played, input.opponent_games_played);
    let expected = expected_score(input.my_rating, input.opponent_rating);
    let actual = if input.did_i_win { 1.0 } else { 0.0 };

    let new_rating = (input.my_rating as f64 + k * (actual - expected)).round() as i32;
    RatingResult { new_rating }
}
