//! Trusted source and whitelist management (admin only)

use anchor_lang::prelude::*;
use crate::state::OracleState;
use crate::error::{seed_error, OracleError};
use crate::events::{TrustedSourcesChanged, WhitelistChanged};
use crate::host::to_address;

/// Shared accounts for every admin registry/whitelist change
#[derive(Accounts)]
pub struct ManageOracle<'info> {
    #[account(
        mut,
        seeds = [b"oracle"],
        bump = oracle.bump,
        has_one = admin @ OracleError::Forbidden
    )]
    pub oracle: Account<'info, OracleState>,

    pub admin: Signer<'info>,
}

pub fn add_trusted_source(ctx: Context<ManageOracle>, providers: Vec<Pubkey>) -> Result<()> {
    let state = &mut ctx.accounts.oracle;
    let caller = to_address(&ctx.accounts.admin.key());
    let batch: Vec<_> = providers.iter().map(to_address).collect();

    let mut oracle = state.load_oracle();
    oracle.add_trusted_source(&caller, &batch).map_err(seed_error)?;
    state.store_oracle(oracle)?;

    msg!(
        "Added {} trusted source(s), {} active",
        providers.len(),
        state.trusted_count
    );
    emit!(TrustedSourcesChanged {
        providers,
        trusted: true,
        trusted_count: state.trusted_count,
    });

    Ok(())
}

pub fn remove_trusted_source(ctx: Context<ManageOracle>, providers: Vec<Pubkey>) -> Result<()> {
    let state = &mut ctx.accounts.oracle;
    let caller = to_address(&ctx.accounts.admin.key());
    let batch: Vec<_> = providers.iter().map(to_address).collect();

    let mut oracle = state.load_oracle();
    oracle.remove_trusted_source(&caller, &batch).map_err(seed_error)?;
    state.store_oracle(oracle)?;

    msg!(
        "Removed {} trusted source(s), {} active",
        providers.len(),
        state.trusted_count
    );
    emit!(TrustedSourcesChanged {
        providers,
        trusted: false,
        trusted_count: state.trusted_count,
    });

    Ok(())
}

pub fn grant_whitelist(ctx: Context<ManageOracle>, owner: Pubkey, active: bool) -> Result<()> {
    let state = &mut ctx.accounts.oracle;
    let caller = to_address(&ctx.accounts.admin.key());

    let mut oracle = state.load_oracle();
    oracle
        .grant_whitelist(&caller, &to_address(&owner), active)
        .map_err(seed_error)?;
    state.store_oracle(oracle)?;

    msg!("Whitelist for {} set to {}", owner, active);
    emit!(WhitelistChanged { owner, active });

    Ok(())
}
