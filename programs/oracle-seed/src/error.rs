//! Custom error codes

use anchor_lang::prelude::*;
use seed_logic::SeedError;

#[error_code]
pub enum OracleError {
    #[msg("Not authorized to perform this action")]
    Forbidden = 6000,

    #[msg("Provider batch is empty")]
    InvalidInput = 6001,

    #[msg("Provider is the null or program handle")]
    InvalidProvider = 6002,

    #[msg("Provider is already trusted")]
    AlreadyRegistered = 6003,

    #[msg("Provider is not trusted")]
    NotRegistered = 6004,

    #[msg("Whitelist owner is the null or program handle")]
    InvalidOwner = 6005,

    #[msg("Whitelist flag already has the requested value")]
    NoOpChange = 6006,

    #[msg("No trusted providers available")]
    NoProviders = 6007,

    #[msg("Selected provider feed could not be read")]
    ProviderQueryFailed = 6008,

    #[msg("Nonce counter exhausted")]
    NonceExhausted = 6009,

    #[msg("Trusted source capacity reached")]
    TooManySources = 6010,

    #[msg("Whitelist capacity reached")]
    WhitelistFull = 6011,

    #[msg("max_chain_length must be between 1 and MAX_CHAIN_LENGTH")]
    InvalidChainLength = 6012,
}

impl From<SeedError> for OracleError {
    fn from(err: SeedError) -> Self {
        match err {
            SeedError::Forbidden(_) => OracleError::Forbidden,
            SeedError::InvalidInput => OracleError::InvalidInput,
            SeedError::InvalidProvider(_) => OracleError::InvalidProvider,
            SeedError::AlreadyRegistered(_) => OracleError::AlreadyRegistered,
            SeedError::NotRegistered(_) => OracleError::NotRegistered,
            SeedError::InvalidOwner(_) => OracleError::InvalidOwner,
            SeedError::NoOpChange(_) => OracleError::NoOpChange,
            SeedError::NoProviders => OracleError::NoProviders,
            SeedError::ProviderQueryFailed { .. } => OracleError::ProviderQueryFailed,
            SeedError::NonceExhausted => OracleError::NonceExhausted,
        }
    }
}

/// Log the detailed engine error, then map it to its code
pub fn seed_error(err: SeedError) -> OracleError {
    msg!("{}", err);
    err.into()
}
