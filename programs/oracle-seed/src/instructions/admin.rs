//! Admin instructions

use anchor_lang::prelude::*;
use crate::state::{OracleState, MAX_CHAIN_LENGTH};
use crate::error::OracleError;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeConfigParams {
    pub max_chain_length: u32,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct UpdateConfigParams {
    pub admin: Option<Pubkey>,
    pub max_chain_length: Option<u32>,
}

/// Initialize the oracle account (one-time setup)
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = OracleState::LEN,
        seeds = [b"oracle"],
        bump
    )]
    pub oracle: Account<'info, OracleState>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_config(
    ctx: Context<InitializeConfig>,
    params: InitializeConfigParams,
) -> Result<()> {
    let InitializeConfigParams { max_chain_length } = params;

    require!(
        (1..=MAX_CHAIN_LENGTH).contains(&max_chain_length),
        OracleError::InvalidChainLength
    );

    let oracle = &mut ctx.accounts.oracle;

    oracle.admin = ctx.accounts.admin.key();
    oracle.nonce = 0;
    oracle.last_seed = [0u8; 32];
    oracle.max_chain_length = max_chain_length;
    oracle.trusted_count = 0;
    oracle.providers = Vec::new();
    oracle.trusted = Vec::new();
    oracle.whitelist = Vec::new();
    oracle.bump = ctx.bumps.oracle;

    msg!("Oracle initialized by {}, max chain length {}", oracle.admin, oracle.max_chain_length);

    Ok(())
}

/// Update config parameters
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [b"oracle"],
        bump = oracle.bump,
        has_one = admin @ OracleError::Forbidden
    )]
    pub oracle: Account<'info, OracleState>,

    pub admin: Signer<'info>,
}

pub fn update_config(
    ctx: Context<UpdateConfig>,
    params: UpdateConfigParams,
) -> Result<()> {
    let UpdateConfigParams {
        admin,
        max_chain_length,
    } = params;

    let oracle = &mut ctx.accounts.oracle;

    if let Some(new_admin) = admin {
        require!(new_admin != Pubkey::default(), OracleError::InvalidOwner);
        oracle.admin = new_admin;
    }

    if let Some(length) = max_chain_length {
        require!(
            (1..=MAX_CHAIN_LENGTH).contains(&length),
            OracleError::InvalidChainLength
        );
        oracle.max_chain_length = length;
    }

    msg!("Config updated, admin = {}", oracle.admin);
    Ok(())
}
