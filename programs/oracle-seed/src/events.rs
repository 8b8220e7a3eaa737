//! Program events

use anchor_lang::prelude::*;

/// Emitted by every successful `random_seed`, with enough detail to
/// recompute the seed and the next linked seed off-chain
#[event]
pub struct SeedGenerated {
    pub caller: Pubkey,
    pub provider: Pubkey,
    pub seed: [u8; 32],
    pub nonce: u64,
    pub round_id: u128,
    pub answer: i128,
    pub updated_at: i64,
    pub slot: u64,
    pub unix_timestamp: i64,
    pub chain_length: u32,
    pub next_linked_seed: [u8; 32],
}

#[event]
pub struct TrustedSourcesChanged {
    pub providers: Vec<Pubkey>,
    pub trusted: bool,
    pub trusted_count: u32,
}

#[event]
pub struct WhitelistChanged {
    pub owner: Pubkey,
    pub active: bool,
}
