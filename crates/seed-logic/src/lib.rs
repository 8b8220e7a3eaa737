//! Seed Logic for Oracle Seed
//!
//! Trust-gated pseudo-random seed derivation from price-feed readings.
//! This crate is compiled to:
//! - Native (for the on-chain program and off-chain hosts)
//! - WASM (for frontend seed auditing)

mod access;
mod chain;
mod config;
mod engine;
mod error;
mod feed;
mod hasher;
mod oracle;
mod registry;
mod types;

#[cfg(test)]
mod testing;

#[cfg(feature = "wasm")]
mod wasm;

pub use access::{authorize_admin, AdminCapability, SingleAdmin, Whitelist};
pub use chain::{chain_root, run as run_chain, ChainInput};
pub use config::{EngineConfig, DEFAULT_MAX_CHAIN_LENGTH};
pub use engine::{final_seed, loop_count, selection_index, try_selection_index, EngineState, SeedReceipt};
pub use error::{FeedError, Result, SeedError};
pub use feed::{FeedResolver, PriceFeed, ProviderReading, RoundData, StaticFeed};
pub use hasher::{digest_mod, encode_packed, hash_fields, Field, SeedHasher, Sha256Hasher};
pub use oracle::SeedOracle;
pub use registry::ProviderRegistry;
pub use types::{parse_hex32, Address, Digest, Invocation, ZERO_DIGEST};
