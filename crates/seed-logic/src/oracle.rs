//! Owned oracle context and its public operations
//!
//! All mutable state lives in one [`SeedOracle`] value and every operation
//! takes `&mut self`, so a host gets a single writer by construction. A
//! multi-threaded host wraps the whole value in one mutex.

use crate::access::{authorize_admin, AdminCapability, Whitelist};
use crate::config::EngineConfig;
use crate::engine::{EngineState, SeedReceipt};
use crate::error::Result;
use crate::feed::FeedResolver;
use crate::hasher::{SeedHasher, Sha256Hasher};
use crate::registry::ProviderRegistry;
use crate::types::{Address, Digest, Invocation};

pub struct SeedOracle<A, H = Sha256Hasher> {
    self_address: Address,
    admin: A,
    hasher: H,
    config: EngineConfig,
    registry: ProviderRegistry,
    whitelist: Whitelist,
    engine: EngineState,
}

impl<A: AdminCapability> SeedOracle<A, Sha256Hasher> {
    /// Fresh oracle with SHA-256 hashing: no providers, empty whitelist, nonce 0
    pub fn new(self_address: Address, admin: A, config: EngineConfig) -> Self {
        Self::with_hasher(self_address, admin, Sha256Hasher, config)
    }
}

impl<A: AdminCapability, H: SeedHasher> SeedOracle<A, H> {
    pub fn with_hasher(self_address: Address, admin: A, hasher: H, config: EngineConfig) -> Self {
        Self {
            self_address,
            admin,
            hasher,
            config,
            registry: ProviderRegistry::new(),
            whitelist: Whitelist::new(),
            engine: EngineState::new(),
        }
    }

    /// Rehydrate from persisted state
    pub fn from_state(
        self_address: Address,
        admin: A,
        hasher: H,
        config: EngineConfig,
        registry: ProviderRegistry,
        whitelist: Whitelist,
        engine: EngineState,
    ) -> Self {
        Self { self_address, admin, hasher, config, registry, whitelist, engine }
    }

    /// Admin only
    pub fn add_trusted_source(&mut self, caller: &Address, providers: &[Address]) -> Result<()> {
        authorize_admin(&self.admin, caller)?;
        self.registry.add(providers, &self.self_address)?;
        log::info!(
            "{} trusted source(s) added by {}, {} active",
            providers.len(),
            caller,
            self.registry.trusted_count()
        );
        Ok(())
    }

    /// Admin only
    pub fn remove_trusted_source(&mut self, caller: &Address, providers: &[Address]) -> Result<()> {
        authorize_admin(&self.admin, caller)?;
        self.registry.remove(providers)?;
        log::info!(
            "{} trusted source(s) removed by {}, {} active",
            providers.len(),
            caller,
            self.registry.trusted_count()
        );
        Ok(())
    }

    /// Admin only
    pub fn grant_whitelist(&mut self, caller: &Address, owner: &Address, active: bool) -> Result<()> {
        authorize_admin(&self.admin, caller)?;
        self.whitelist.set(owner, active, &self.self_address)?;
        log::info!("whitelist for {} set to {} by {}", owner, active, caller);
        Ok(())
    }

    /// Whitelisted callers only
    pub fn random_seed<R: FeedResolver + ?Sized>(
        &mut self,
        invocation: &Invocation,
        feeds: &R,
    ) -> Result<Digest> {
        self.random_seed_with_receipt(invocation, feeds).map(|r| r.seed)
    }

    /// Like [`Self::random_seed`] but returns every derived value
    pub fn random_seed_with_receipt<R: FeedResolver + ?Sized>(
        &mut self,
        invocation: &Invocation,
        feeds: &R,
    ) -> Result<SeedReceipt> {
        self.whitelist.authorize(&invocation.caller)?;
        self.engine
            .request_seed(&self.hasher, &self.registry, feeds, &self.config, invocation)
    }

    /// Index a request from `caller` at `block_context` would select right now
    pub fn preview_index(&self, caller: &Address, block_context: u64) -> Result<u64> {
        self.engine
            .preview_index(&self.hasher, &self.registry, caller, block_context)
    }

    pub fn active_providers(&self) -> Vec<Address> {
        self.registry.active_providers()
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    pub fn engine(&self) -> &EngineState {
        &self.engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn self_address(&self) -> &Address {
        &self.self_address
    }

    /// Persistable state: registry, whitelist, engine
    pub fn into_state(self) -> (ProviderRegistry, Whitelist, EngineState) {
        (self.registry, self.whitelist, self.engine)
    }
}
