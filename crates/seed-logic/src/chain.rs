//! Linked-seed hash chain
//!
//! `root = H(time_context, caller, last_seed, nonce)`, then `count` folds of
//! `linked = H(i, linked, last_seed, seed)` for `i = 0..count`. Cost is
//! linear in `count`; callers bound it with `EngineConfig::max_chain_length`.

use crate::hasher::{hash_fields, Field, SeedHasher};
use crate::types::{Address, Digest};

/// Inputs to one chain run
#[derive(Clone, Copy, Debug)]
pub struct ChainInput<'a> {
    pub seed: &'a Digest,
    pub caller: &'a Address,
    pub last_seed: &'a Digest,
    pub nonce: u64,
    pub time_context: i64,
}

/// Root of the chain before any fold
pub fn chain_root<H: SeedHasher + ?Sized>(hasher: &H, input: &ChainInput<'_>) -> Digest {
    hash_fields(
        hasher,
        &[
            Field::I64(input.time_context),
            Field::Address(input.caller),
            Field::Digest(input.last_seed),
            Field::U64(input.nonce),
        ],
    )
}

/// Run `count` folds and return the final linked digest
pub fn run<H: SeedHasher + ?Sized>(hasher: &H, count: u32, input: &ChainInput<'_>) -> Digest {
    let mut linked = chain_root(hasher, input);
    for i in 0..count {
        linked = hash_fields(
            hasher,
            &[
                Field::U64(i as u64),
                Field::Digest(&linked),
                Field::Digest(input.last_seed),
                Field::Digest(input.seed),
            ],
        );
    }
    linked
}
