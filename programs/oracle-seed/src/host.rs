//! Glue between Solana accounts and the seed engine

use anchor_lang::prelude::*;
use seed_logic::{
    Address, AdminCapability, Digest, FeedError, PriceFeed, RoundData, SeedHasher,
};
use std::collections::BTreeMap;

use crate::state::FeedRound;

pub fn to_address(key: &Pubkey) -> Address {
    Address::new(key.to_bytes())
}

pub fn to_pubkey(address: &Address) -> Pubkey {
    Pubkey::new_from_array(*address.as_bytes())
}

/// SHA-256 via the runtime syscall, or `sha2` off-chain
#[derive(Clone, Copy, Debug, Default)]
pub struct SyscallHasher;

impl SeedHasher for SyscallHasher {
    #[cfg(target_os = "solana")]
    fn hashv(&self, parts: &[&[u8]]) -> Digest {
        solana_sha256_hasher::hashv(parts).to_bytes()
    }

    // The syscall is only linked on-chain
    #[cfg(not(target_os = "solana"))]
    fn hashv(&self, parts: &[&[u8]]) -> Digest {
        seed_logic::Sha256Hasher.hashv(parts)
    }
}

/// The admin recorded in [`crate::state::OracleState`]
#[derive(Clone, Copy, Debug)]
pub struct ConfigAdmin(pub Pubkey);

impl AdminCapability for ConfigAdmin {
    fn is_admin(&self, caller: &Address) -> bool {
        self.0 != Pubkey::default() && to_address(&self.0) == *caller
    }
}

/// A feed account passed in `remaining_accounts`
#[derive(Clone, Debug)]
pub struct AccountFeed {
    round: Option<RoundData>,
}

impl AccountFeed {
    pub fn from_account(info: &AccountInfo<'_>) -> Self {
        let round = info
            .try_borrow_data()
            .ok()
            .and_then(|data| decode_feed_round(&data));
        Self { round }
    }
}

impl PriceFeed for AccountFeed {
    fn latest_round_data(&self) -> std::result::Result<RoundData, FeedError> {
        self.round
            .ok_or_else(|| FeedError::Unavailable("feed account data is not a FeedRound".to_string()))
    }
}

/// Decode a `FeedRound` record; `None` if the discriminator or layout is wrong
pub fn decode_feed_round(data: &[u8]) -> Option<RoundData> {
    if data.len() < 8 {
        return None;
    }
    let feed = FeedRound::try_deserialize(&mut &data[..]).ok()?;
    Some(RoundData {
        round_id: feed.round_id,
        answer: feed.answer,
        started_at: feed.started_at,
        updated_at: feed.updated_at,
        answered_in_round: feed.answered_in_round,
    })
}

/// Index the remaining accounts by key for provider lookup
pub fn collect_feeds(accounts: &[AccountInfo<'_>]) -> BTreeMap<Address, AccountFeed> {
    accounts
        .iter()
        .map(|info| (to_address(info.key), AccountFeed::from_account(info)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_logic::Sha256Hasher;

    #[test]
    fn test_syscall_hasher_matches_sha256() {
        let parts: [&[u8]; 3] = [b"linked", b"-", b"seed"];
        assert_eq!(SyscallHasher.hashv(&parts), Sha256Hasher.hashv(&parts));
    }

    #[test]
    fn test_syscall_hasher_known_vector() {
        // SHA-256("abc")
        let digest = SyscallHasher.hashv(&[b"abc".as_slice()]);
        assert_eq!(digest[..4], [0xba, 0x78, 0x16, 0xbf]);
        assert_eq!(digest[28..], [0xf2, 0x00, 0x15, 0xad]);
    }

    #[test]
    fn test_pubkey_address_roundtrip() {
        let key = Pubkey::new_from_array([7; 32]);
        assert_eq!(to_pubkey(&to_address(&key)), key);
    }

    #[test]
    fn test_config_admin() {
        let admin = ConfigAdmin(Pubkey::new_from_array([1; 32]));
        assert!(admin.is_admin(&Address::new([1; 32])));
        assert!(!admin.is_admin(&Address::new([2; 32])));
        assert!(!ConfigAdmin(Pubkey::default()).is_admin(&Address::NULL));
    }

    #[test]
    fn test_decode_feed_round() {
        let feed = FeedRound {
            round_id: 5,
            answer: 42,
            started_at: 900,
            updated_at: 1000,
            answered_in_round: 5,
        };
        let mut data = Vec::new();
        feed.try_serialize(&mut data).unwrap();

        let round = decode_feed_round(&data).unwrap();
        assert_eq!(round.round_id, 5);
        assert_eq!(round.answer, 42);
        assert_eq!(round.updated_at, 1000);

        assert!(decode_feed_round(&data[..4]).is_none());
        let mut corrupted = data.clone();
        corrupted[0] ^= 0xff;
        assert!(decode_feed_round(&corrupted).is_none());
    }

    #[test]
    fn test_undecodable_feed_fails_query() {
        let feed = AccountFeed { round: None };
        assert!(feed.latest_round_data().is_err());
    }
}
