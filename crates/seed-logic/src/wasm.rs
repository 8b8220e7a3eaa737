//! WASM bindings for frontend seed auditing
//!
//! Every input that feeds a published seed is public except the provider
//! reading, which is itself on-chain. These exports recompute each step so a
//! frontend can check a `SeedGenerated` event.

#![cfg(feature = "wasm")]

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::chain::{self, ChainInput};
use crate::engine::{final_seed, loop_count, try_selection_index};
use crate::feed::ProviderReading;
use crate::hasher::Sha256Hasher;
use crate::types::{parse_hex32, Address, Digest};

fn parse_address(s: &str, what: &str) -> Result<Address, JsError> {
    Address::from_hex(s).ok_or_else(|| JsError::new(&format!("Invalid {}: expected 32-byte hex", what)))
}

fn parse_digest(s: &str, what: &str) -> Result<Digest, JsError> {
    parse_hex32(s).ok_or_else(|| JsError::new(&format!("Invalid {}: expected 32-byte hex", what)))
}

/// Reading as JSON. Large integers are strings so JS numbers don't truncate them.
#[derive(Deserialize)]
struct ReadingJson {
    round_id: String,
    answer: String,
    updated_at: i64,
}

fn parse_reading(json: &str) -> Result<ProviderReading, JsError> {
    let raw: ReadingJson = serde_json::from_str(json)
        .map_err(|e| JsError::new(&format!("Invalid reading: {}", e)))?;
    let round_id = raw.round_id.parse::<u128>()
        .map_err(|e| JsError::new(&format!("Invalid round_id: {}", e)))?;
    let answer = raw.answer.parse::<i128>()
        .map_err(|e| JsError::new(&format!("Invalid answer: {}", e)))?;
    Ok(ProviderReading { round_id, answer, updated_at: raw.updated_at })
}

/// Provider index a request would select
#[wasm_bindgen]
pub fn compute_selection_index(
    block_context: u64,
    caller_hex: &str,
    last_seed_hex: &str,
    nonce: u64,
    active_len: u32,
) -> Result<u64, JsError> {
    let caller = parse_address(caller_hex, "caller")?;
    let last_seed = parse_digest(last_seed_hex, "last seed")?;
    try_selection_index(&Sha256Hasher, block_context, &caller, &last_seed, nonce, active_len as usize)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Returned seed, as hex
#[wasm_bindgen]
pub fn compute_final_seed(
    reading_json: &str,
    last_seed_hex: &str,
    caller_hex: &str,
) -> Result<String, JsError> {
    let reading = parse_reading(reading_json)?;
    let last_seed = parse_digest(last_seed_hex, "last seed")?;
    let caller = parse_address(caller_hex, "caller")?;
    Ok(hex::encode(final_seed(&Sha256Hasher, &reading, &last_seed, &caller)))
}

/// Unclamped chain loop count
#[wasm_bindgen]
pub fn compute_loop_count(
    round_id: &str,
    block_context: u64,
    final_seed_hex: &str,
    index: u64,
) -> Result<u64, JsError> {
    let round_id = round_id.parse::<u128>()
        .map_err(|e| JsError::new(&format!("Invalid round_id: {}", e)))?;
    let seed = parse_digest(final_seed_hex, "final seed")?;
    Ok(loop_count(round_id, block_context, &seed, index))
}

#[derive(Serialize)]
struct LinkedSeed {
    linked_seed: String,
    chain_length: u32,
}

/// Next linked seed after `chain_length` folds
#[wasm_bindgen]
pub fn compute_linked_seed(
    chain_length: u32,
    final_seed_hex: &str,
    caller_hex: &str,
    last_seed_hex: &str,
    nonce: u64,
    time_context: i64,
) -> Result<JsValue, JsError> {
    let seed = parse_digest(final_seed_hex, "final seed")?;
    let caller = parse_address(caller_hex, "caller")?;
    let last_seed = parse_digest(last_seed_hex, "last seed")?;

    let linked = chain::run(
        &Sha256Hasher,
        chain_length,
        &ChainInput { seed: &seed, caller: &caller, last_seed: &last_seed, nonce, time_context },
    );

    let result = LinkedSeed { linked_seed: hex::encode(linked), chain_length };
    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
