//! Oracle Seed - trust-gated seed generator
//!
//! A Solana program that derives unpredictable seeds from price-feed
//! readings: it picks one trusted feed pseudo-randomly, folds its latest
//! round into the seed, and chains every request to the previous one.

use anchor_lang::prelude::*;

mod state;
mod instructions;
mod error;
mod events;
mod host;

use instructions::*;
pub use state::{FeedRound, OracleState};
pub use events::{SeedGenerated, TrustedSourcesChanged, WhitelistChanged};

declare_id!("5eedXq2Nn4w7MfVH8QeRkPRzDPNycWmvkk6R9fE3sL1u");

#[program]
pub mod oracle_seed {
    use super::*;

    /// Initialize the oracle account (one-time setup)
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        params: InitializeConfigParams,
    ) -> Result<()> {
        instructions::admin::initialize_config(ctx, params)
    }

    /// Update admin or chain-length limit (admin only)
    pub fn update_config(
        ctx: Context<UpdateConfig>,
        params: UpdateConfigParams,
    ) -> Result<()> {
        instructions::admin::update_config(ctx, params)
    }

    /// Trust a batch of feed accounts (admin only)
    pub fn add_trusted_source(
        ctx: Context<ManageOracle>,
        providers: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::sources::add_trusted_source(ctx, providers)
    }

    /// Stop trusting a batch of feed accounts (admin only)
    pub fn remove_trusted_source(
        ctx: Context<ManageOracle>,
        providers: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::sources::remove_trusted_source(ctx, providers)
    }

    /// Allow or revoke a seed requester (admin only)
    pub fn grant_whitelist(
        ctx: Context<ManageOracle>,
        owner: Pubkey,
        active: bool,
    ) -> Result<()> {
        instructions::sources::grant_whitelist(ctx, owner, active)
    }

    /// Derive a seed from a pseudo-randomly selected trusted feed
    pub fn random_seed<'info>(
        ctx: Context<'_, '_, '_, 'info, RandomSeed<'info>>,
    ) -> Result<[u8; 32]> {
        instructions::seed::random_seed(ctx)
    }
}
