//! Handles, digests and per-call host context

use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-byte output of the seed hash function
pub type Digest = [u8; 32];

/// Initial linked seed
pub const ZERO_DIGEST: Digest = [0u8; 32];

/// Opaque 32-byte handle for a provider or a caller
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// The null handle
    pub const NULL: Address = Address([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64-character hex string (optional `0x` prefix)
    pub fn from_hex(s: &str) -> Option<Self> {
        parse_hex32(s).map(Self)
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

/// Parse a 32-byte value from hex, accepting an optional `0x` prefix
pub fn parse_hex32(s: &str) -> Option<[u8; 32]> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).ok()?;
    bytes.try_into().ok()
}

/// Values supplied by the host for a single seed request
///
/// `block_context` is the per-invocation value mixed into provider
/// selection (the slot on Solana). `time_context` roots the hash chain
/// (the unix timestamp on Solana). Neither is assumed to be
/// cryptographically unpredictable on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub caller: Address,
    pub block_context: u64,
    pub time_context: i64,
}

impl Invocation {
    pub fn new(caller: Address, block_context: u64, time_context: i64) -> Self {
        Self { caller, block_context, time_context }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_address() {
        assert!(Address::NULL.is_null());
        assert!(!Address::new([1u8; 32]).is_null());
        assert_eq!(Address::default(), Address::NULL);
    }

    #[test]
    fn test_hex_parsing() {
        let addr = Address::new([0xab; 32]);
        let hex = addr.to_hex();
        assert_eq!(Address::from_hex(&hex), Some(addr));
        assert_eq!(Address::from_hex(&format!("0x{}", hex)), Some(addr));
        assert_eq!(addr.to_string(), format!("0x{}", hex));

        // Wrong length / bad characters
        assert_eq!(Address::from_hex("abcd"), None);
        assert_eq!(Address::from_hex(&"zz".repeat(32)), None);
    }
}
