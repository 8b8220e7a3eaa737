//! Error kinds surfaced by the seed engine

use thiserror::Error;

use crate::types::Address;

/// Every failure aborts the whole operation; no partial state survives.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SeedError {
    #[error("Caller {0} is not authorized for this operation")]
    Forbidden(Address),

    #[error("Empty provider batch")]
    InvalidInput,

    #[error("Provider {0} is the null or self handle")]
    InvalidProvider(Address),

    #[error("Provider {0} is already trusted")]
    AlreadyRegistered(Address),

    #[error("Provider {0} is not trusted")]
    NotRegistered(Address),

    #[error("Whitelist owner {0} is the null or self handle")]
    InvalidOwner(Address),

    #[error("Whitelist flag for {0} already has the requested value")]
    NoOpChange(Address),

    #[error("No trusted providers available")]
    NoProviders,

    #[error("Query to provider {provider} failed: {reason}")]
    ProviderQueryFailed { provider: Address, reason: String },

    #[error("Nonce counter exhausted")]
    NonceExhausted,
}

/// Failure reported by a price feed implementation
///
/// The engine never inspects these; any of them becomes
/// [`SeedError::ProviderQueryFailed`].
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum FeedError {
    #[error("Feed has no rounds yet")]
    NoData,

    #[error("Unknown round {0}")]
    UnknownRound(u128),

    #[error("Feed unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, SeedError>;
