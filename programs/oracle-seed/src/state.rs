//! Account state definitions

use anchor_lang::prelude::*;
use seed_logic::{
    Address, EngineConfig, EngineState, ProviderRegistry, SeedOracle, Whitelist,
};

use crate::error::OracleError;
use crate::host::{to_address, to_pubkey, ConfigAdmin, SyscallHasher};

/// Trusted sources ever added (trusted or not) per oracle
#[cfg(not(feature = "testing"))]
pub const MAX_TRUSTED_SOURCES: usize = 32;
#[cfg(feature = "testing")]
pub const MAX_TRUSTED_SOURCES: usize = 4;

/// Whitelisted callers per oracle
#[cfg(not(feature = "testing"))]
pub const MAX_WHITELIST: usize = 64;
#[cfg(feature = "testing")]
pub const MAX_WHITELIST: usize = 4;

/// Hard ceiling for the configurable chain length
pub const MAX_CHAIN_LENGTH: u32 = 1024;

/// Global oracle account: admin, registry, whitelist and linked-seed state
#[account]
#[derive(Default)]
pub struct OracleState {
    /// Admin who manages sources, the whitelist and config
    pub admin: Pubkey,
    /// Completed seed requests
    pub nonce: u64,
    /// Linked seed carried into the next request
    pub last_seed: [u8; 32],
    /// Upper bound on hash-chain folds per request
    pub max_chain_length: u32,
    /// Number of `providers` currently flagged trusted
    pub trusted_count: u32,
    /// Every source ever added, in insertion order
    pub providers: Vec<Pubkey>,
    /// Trusted flag per entry of `providers`
    pub trusted: Vec<bool>,
    /// Callers allowed to request seeds
    pub whitelist: Vec<Pubkey>,
    /// PDA bump seed
    pub bump: u8,
}

impl OracleState {
    pub const LEN: usize = 8 + // discriminator
        32 +  // admin
        8 +   // nonce
        32 +  // last_seed
        4 +   // max_chain_length
        4 +   // trusted_count
        4 + 32 * MAX_TRUSTED_SOURCES + // providers
        4 + MAX_TRUSTED_SOURCES +      // trusted
        4 + 32 * MAX_WHITELIST +       // whitelist
        1 +   // bump
        32;   // padding for future fields

    /// Rebuild the engine view of this account
    pub fn load_oracle(&self) -> SeedOracle<ConfigAdmin, SyscallHasher> {
        let order: Vec<Address> = self.providers.iter().map(to_address).collect();
        let callers: Vec<Address> = self.whitelist.iter().map(to_address).collect();

        SeedOracle::from_state(
            to_address(&crate::ID),
            ConfigAdmin(self.admin),
            SyscallHasher,
            EngineConfig::with_max_chain_length(self.max_chain_length),
            ProviderRegistry::from_parts(&order, &self.trusted),
            Whitelist::from_active(&callers),
            EngineState { nonce: self.nonce, last_seed: self.last_seed },
        )
    }

    /// Write the engine state back, enforcing account capacity
    pub fn store_oracle(&mut self, oracle: SeedOracle<ConfigAdmin, SyscallHasher>) -> Result<()> {
        let (registry, whitelist, engine) = oracle.into_state();
        let (order, flags) = registry.to_parts();
        let callers = whitelist.active();

        require!(order.len() <= MAX_TRUSTED_SOURCES, OracleError::TooManySources);
        require!(callers.len() <= MAX_WHITELIST, OracleError::WhitelistFull);

        self.trusted_count = registry.trusted_count();
        self.providers = order.iter().map(to_pubkey).collect();
        self.trusted = flags;
        self.whitelist = callers.iter().map(to_pubkey).collect();
        self.nonce = engine.nonce;
        self.last_seed = engine.last_seed;
        Ok(())
    }
}

/// Round report published by a price feed account
///
/// Feed accounts passed to `random_seed` must hold this record; they are
/// not required to be owned by this program.
#[account]
#[derive(Default)]
pub struct FeedRound {
    pub round_id: u128,
    pub answer: i128,
    pub started_at: i64,
    pub updated_at: i64,
    pub answered_in_round: u128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_logic::{Invocation, StaticFeed};
    use std::collections::BTreeMap;

    fn state() -> OracleState {
        OracleState {
            admin: Pubkey::new_from_array([0xad; 32]),
            max_chain_length: 256,
            ..Default::default()
        }
    }

    #[test]
    fn test_store_and_reload() {
        let admin = to_address(&Pubkey::new_from_array([0xad; 32]));
        let p1 = Address::new([1; 32]);
        let p2 = Address::new([2; 32]);
        let caller = Address::new([0xc0; 32]);

        let mut account = state();
        let mut oracle = account.load_oracle();
        oracle.add_trusted_source(&admin, &[p1, p2]).unwrap();
        oracle.remove_trusted_source(&admin, &[p1]).unwrap();
        oracle.grant_whitelist(&admin, &caller, true).unwrap();

        let mut feeds = BTreeMap::new();
        feeds.insert(p2, StaticFeed::with_reading(3, 30, 300));
        let seed = oracle.random_seed(&Invocation::new(caller, 10, 20), &feeds).unwrap();
        account.store_oracle(oracle).unwrap();

        assert_eq!(account.providers, vec![to_pubkey(&p1), to_pubkey(&p2)]);
        assert_eq!(account.trusted, vec![false, true]);
        assert_eq!(account.trusted_count, 1);
        assert_eq!(account.whitelist, vec![to_pubkey(&caller)]);
        assert_eq!(account.nonce, 1);
        assert_ne!(account.last_seed, [0u8; 32]);
        assert_ne!(seed, [0u8; 32]);

        let reloaded = account.load_oracle();
        assert_eq!(reloaded.active_providers(), vec![p2]);
        assert!(reloaded.whitelist().is_whitelisted(&caller));
        assert_eq!(reloaded.engine().nonce, 1);
    }

    #[test]
    fn test_program_id_is_self_handle() {
        let admin = to_address(&Pubkey::new_from_array([0xad; 32]));
        let account = state();
        let mut oracle = account.load_oracle();
        assert!(oracle.add_trusted_source(&admin, &[to_address(&crate::ID)]).is_err());
    }

    #[test]
    fn test_capacity_enforced() {
        let admin = to_address(&Pubkey::new_from_array([0xad; 32]));
        let mut account = state();
        let mut oracle = account.load_oracle();

        let too_many: Vec<Address> = (1..=(MAX_TRUSTED_SOURCES as u8 + 1))
            .map(|n| Address::new([n; 32]))
            .collect();
        oracle.add_trusted_source(&admin, &too_many).unwrap();
        assert!(account.store_oracle(oracle).is_err());
        assert!(account.providers.is_empty());
    }
}
