//! Seed request instruction

use anchor_lang::prelude::*;
use seed_logic::Invocation;
use crate::state::OracleState;
use crate::error::seed_error;
use crate::events::SeedGenerated;
use crate::host::{collect_feeds, to_address, to_pubkey};

/// Request a seed (whitelisted callers only)
#[derive(Accounts)]
pub struct RandomSeed<'info> {
    #[account(
        mut,
        seeds = [b"oracle"],
        bump = oracle.bump
    )]
    pub oracle: Account<'info, OracleState>,

    pub caller: Signer<'info>,
    // Feed accounts for the active sources passed via remaining_accounts
}

pub fn random_seed<'info>(
    ctx: Context<'_, '_, '_, 'info, RandomSeed<'info>>,
) -> Result<[u8; 32]> {
    let state = &mut ctx.accounts.oracle;
    let clock = Clock::get()?;

    let invocation = Invocation::new(
        to_address(&ctx.accounts.caller.key()),
        clock.slot,
        clock.unix_timestamp,
    );
    let feeds = collect_feeds(ctx.remaining_accounts);

    let mut oracle = state.load_oracle();
    let receipt = oracle
        .random_seed_with_receipt(&invocation, &feeds)
        .map_err(seed_error)?;
    state.store_oracle(oracle)?;

    msg!(
        "Seed #{} for {} from source {} (round {}), {} chain folds",
        receipt.nonce,
        ctx.accounts.caller.key(),
        to_pubkey(&receipt.provider),
        receipt.reading.round_id,
        receipt.chain_length
    );
    emit!(SeedGenerated {
        caller: ctx.accounts.caller.key(),
        provider: to_pubkey(&receipt.provider),
        seed: receipt.seed,
        nonce: receipt.nonce,
        round_id: receipt.reading.round_id,
        answer: receipt.reading.answer,
        updated_at: receipt.reading.updated_at,
        slot: clock.slot,
        unix_timestamp: clock.unix_timestamp,
        chain_length: receipt.chain_length,
        next_linked_seed: receipt.next_linked_seed,
    });

    Ok(receipt.seed)
}
