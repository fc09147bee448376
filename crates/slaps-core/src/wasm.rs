//! WASM bindings for the browser bracket renderer

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{compute_new_rating, seed, Bracket, Player, RatingInput, SeededRng, SlotId, Tier};
use crate::seeding::WireSlot;

fn parse_players(json: &str) -> Result<Vec<Player>, JsError> {
    serde_json::from_str(json).map_err(|e| JsError::new(&format!("Invalid players: {}", e)))
}

/// Seed a bracket for the given players
///
/// # Arguments
/// * `players_json` - JSON array of `{name, id}` in seeding order
///
/// # Returns
/// Array of `{slotId, playerName}`
#[wasm_bindgen]
pub fn seed_bracket(players_json: &str) -> Result<JsValue, JsError> {
    let players = parse_players(players_json)?;
    let wire = crate::to_wire(&seed(&players));

    serde_wasm_bindgen::to_value(&wire)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Compute one player's new rating after a match
#[wasm_bindgen]
pub fn compute_rating(
    my_rating: i32,
    opponent_rating: i32,
    my_games_played: u32,
    opponent_games_played: u32,
    did_i_win: bool,
) -> i32 {
    compute_new_rating(&RatingInput {
        my_rating,
        opponent_rating,
        my_games_played,
        opponent_games_played,
        did_i_win,
    })
    .new_rating
}

/// Shuffle players for random seeding
///
/// With a 32-byte `seed` the order is reproducible; without one a seed is
/// drawn from `Math.random`.
#[wasm_bindgen]
pub fn shuffle_players(players_json: &str, seed: Option<Vec<u8>>) -> Result<JsValue, JsError> {
    let mut players = parse_players(players_json)?;

    let seed_arr: [u8; 32] = match seed {
        Some(bytes) => bytes
            .as_slice()
            .try_into()
            .map_err(|_| JsError::new("Seed must be exactly 32 bytes"))?,
        None => {
            let mut arr = [0u8; 32];
            for b in arr.iter_mut() {
                *b = (js_sys::Math::random() * 256.0) as u8;
            }
            arr
        }
    };

    SeededRng::new(&seed_arr, 0).shuffle(&mut players);

    serde_wasm_bindgen::to_value(&players)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Advance the winner in `slot_id` and return the updated bracket
///
/// # Arguments
/// * `tier` - `"semifinal"`, `"quarterfinal"` or `"round-of-16"`
/// * `bracket_json` - JSON array of `{slotId, playerName}`
/// * `slot_id` - Slot of the match winner, e.g. `"LQF-3"`
#[wasm_bindgen]
pub fn advance_winner(tier: &str, bracket_json: &str, slot_id: &str) -> Result<JsValue, JsError> {
    let tier: Tier = serde_json::from_value(serde_json::Value::String(tier.to_string()))
        .map_err(|e| JsError::new(&format!("Invalid tier: {}", e)))?;
    let wire: Vec<WireSlot> = serde_json::from_str(bracket_json)
        .map_err(|e| JsError::new(&format!("Invalid bracket: {}", e)))?;
    let slot: SlotId = slot_id
        .parse()
        .map_err(|e| JsError::new(&format!("{}", e)))?;

    // The renderer only tracks names, so names double as ids here
    let mut assignment = Vec::with_capacity(wire.len());
    for entry in wire {
        let entry_slot: SlotId = entry
            .slot_id
            .parse()
            .map_err(|e| JsError::new(&format!("{}", e)))?;
        assignment.push((entry_slot, Player::new(entry.player_name.clone(), entry.player_name)));
    }

    let mut bracket = Bracket::new(tier, assignment).map_err(|e| JsError::new(&e.to_string()))?;
    bracket.record_winner(slot).map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&bracket.to_wire())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
