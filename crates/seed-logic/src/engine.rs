//! Seed engine
//!
//! Each request picks a trusted provider from
//! `H(block_context, caller, last_seed, nonce) mod len(active)`, folds its
//! latest reading into the returned seed, and advances the linked seed
//! through the hash chain so the next request's selection depends on this
//! one. State is only written once every fallible step has passed.

use serde::{Deserialize, Serialize};

use crate::chain::{self, ChainInput};
use crate::config::EngineConfig;
use crate::error::{Result, SeedError};
use crate::feed::{FeedResolver, ProviderReading};
use crate::hasher::{digest_mod, hash_fields, Field, SeedHasher};
use crate::registry::ProviderRegistry;
use crate::types::{Address, Digest, Invocation, ZERO_DIGEST};

/// Persistent engine state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    pub nonce: u64,
    pub last_seed: Digest,
}

impl Default for EngineState {
    fn default() -> Self {
        Self { nonce: 0, last_seed: ZERO_DIGEST }
    }
}

/// Everything a request derived, for auditing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReceipt {
    /// Returned seed
    pub seed: Digest,
    pub provider: Address,
    pub index: u64,
    pub reading: ProviderReading,
    /// Loop count before clamping
    pub loop_count: u64,
    /// Folds actually run
    pub chain_length: u32,
    /// Nonce used by this request
    pub nonce: u64,
    /// Linked seed committed for the next request
    pub next_linked_seed: Digest,
}

/// `uint(H(block_context, caller, last_seed, nonce)) mod active_len`
pub fn selection_index<H: SeedHasher + ?Sized>(
    hasher: &H,
    block_context: u64,
    caller: &Address,
    last_seed: &Digest,
    nonce: u64,
    active_len: usize,
) -> u64 {
    let digest = hash_fields(
        hasher,
        &[
            Field::U64(block_context),
            Field::Address(caller),
            Field::Digest(last_seed),
            Field::U64(nonce),
        ],
    );
    digest_mod(&digest, active_len as u64)
}

/// `H(answer, updated_at, round_id, last_seed, caller)`
pub fn final_seed<H: SeedHasher + ?Sized>(
    hasher: &H,
    reading: &ProviderReading,
    last_seed: &Digest,
    caller: &Address,
) -> Digest {
    hash_fields(
        hasher,
        &[
            Field::I128(reading.answer),
            Field::I64(reading.updated_at),
            Field::U128(reading.round_id),
            Field::Digest(last_seed),
            Field::Address(caller),
        ],
    )
}

/// `(round_id mod d) + ((round_id + block_context + uint(final_seed)) mod d)`
///
/// `d` is `index` clamped to at least 1, so index 0 yields a loop count of 0.
/// The sum is reduced exactly, without wrap-around.
pub fn loop_count(round_id: u128, block_context: u64, final_seed: &Digest, index: u64) -> u64 {
    let d = index.max(1);
    let d128 = d as u128;
    let round_rem = (round_id % d128) as u64;
    let sum_rem = ((round_id % d128) + (block_context as u128 % d128) + digest_mod(final_seed, d) as u128)
        % d128;
    round_rem + sum_rem as u64
}

/// [`selection_index`] that rejects an empty active set
pub fn try_selection_index<H: SeedHasher + ?Sized>(
    hasher: &H,
    block_context: u64,
    caller: &Address,
    last_seed: &Digest,
    nonce: u64,
    active_len: usize,
) -> Result<u64> {
    if active_len == 0 {
        return Err(SeedError::NoProviders);
    }
    Ok(selection_index(hasher, block_context, caller, last_seed, nonce, active_len))
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next request from `caller` at `block_context` would select
    pub fn preview_index<H: SeedHasher + ?Sized>(
        &self,
        hasher: &H,
        registry: &ProviderRegistry,
        caller: &Address,
        block_context: u64,
    ) -> Result<u64> {
        let active_len = registry.active_providers().len();
        try_selection_index(hasher, block_context, caller, &self.last_seed, self.nonce, active_len)
    }

    /// Derive a seed and advance the linked seed
    ///
    /// Authorization is checked by the caller. On error `self` is untouched.
    pub fn request_seed<H, R>(
        &mut self,
        hasher: &H,
        registry: &ProviderRegistry,
        feeds: &R,
        config: &EngineConfig,
        invocation: &Invocation,
    ) -> Result<SeedReceipt>
    where
        H: SeedHasher + ?Sized,
        R: FeedResolver + ?Sized,
    {
        let caller = &invocation.caller;

        let active = registry.active_providers();
        if active.is_empty() {
            return Err(SeedError::NoProviders);
        }

        let index = selection_index(
            hasher,
            invocation.block_context,
            caller,
            &self.last_seed,
            self.nonce,
            active.len(),
        );
        let provider = active[index as usize];

        let feed = feeds.resolve(&provider).ok_or_else(|| SeedError::ProviderQueryFailed {
            provider,
            reason: "no feed for provider".to_string(),
        })?;
        let reading: ProviderReading = feed
            .latest_round_data()
            .map_err(|e| SeedError::ProviderQueryFailed { provider, reason: e.to_string() })?
            .into();

        let seed = final_seed(hasher, &reading, &self.last_seed, caller);

        let loops = loop_count(reading.round_id, invocation.block_context, &seed, index);
        let chain_length = config.bound_chain_length(loops);

        let next_linked_seed = chain::run(
            hasher,
            chain_length,
            &ChainInput {
                seed: &seed,
                caller,
                last_seed: &self.last_seed,
                nonce: self.nonce,
                time_context: invocation.time_context,
            },
        );

        let next_nonce = self.nonce.checked_add(1).ok_or(SeedError::NonceExhausted)?;

        let receipt = SeedReceipt {
            seed,
            provider,
            index,
            reading,
            loop_count: loops,
            chain_length,
            nonce: self.nonce,
            next_linked_seed,
        };

        self.last_seed = next_linked_seed;
        self.nonce = next_nonce;

        log::debug!(
            "seed request {} by {}: provider #{} {} round {}, {} chain folds",
            receipt.nonce,
            caller,
            index,
            provider,
            reading.round_id,
            chain_length
        );

        Ok(receipt)
    }
}
