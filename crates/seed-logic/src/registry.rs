//! Trusted provider registry
//!
//! Providers are never physically removed. `insertion_order` is append-only
//! and a removal only clears the trusted flag, so re-adding a provider puts
//! it back at its original position in the active list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SeedError};
use crate::types::Address;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRegistry {
    trusted_count: u32,
    /// Every provider ever added, keyed to its current trusted flag
    trusted: BTreeMap<Address, bool>,
    insertion_order: Vec<Address>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from its stored parts
    ///
    /// `flags[i]` is the trusted flag of `order[i]`. Duplicate handles keep
    /// their first position.
    pub fn from_parts(order: &[Address], flags: &[bool]) -> Self {
        let mut registry = Self::new();
        for (provider, &flag) in order.iter().zip(flags.iter()) {
            if registry.trusted.contains_key(provider) {
                continue;
            }
            registry.trusted.insert(*provider, flag);
            registry.insertion_order.push(*provider);
            if flag {
                registry.trusted_count += 1;
            }
        }
        registry
    }

    /// Stored parts: insertion order and the parallel trusted flags
    pub fn to_parts(&self) -> (Vec<Address>, Vec<bool>) {
        let flags = self
            .insertion_order
            .iter()
            .map(|p| self.is_trusted(p))
            .collect();
        (self.insertion_order.clone(), flags)
    }

    /// Mark a batch of providers trusted
    ///
    /// Fails without touching the registry if the batch is empty, names
    /// the null or `self_address` handle, or names a provider that is
    /// already trusted (a repeat inside the batch counts).
    pub fn add(&mut self, providers: &[Address], self_address: &Address) -> Result<()> {
        if providers.is_empty() {
            return Err(SeedError::InvalidInput);
        }

        let mut next = self.clone();
        for provider in providers {
            if provider.is_null() || provider == self_address {
                return Err(SeedError::InvalidProvider(*provider));
            }
            match next.trusted.get(provider) {
                Some(true) => return Err(SeedError::AlreadyRegistered(*provider)),
                Some(false) => {}
                None => next.insertion_order.push(*provider),
            }
            next.trusted.insert(*provider, true);
            next.trusted_count += 1;
        }

        *self = next;
        Ok(())
    }

    /// Clear the trusted flag on a batch of providers
    pub fn remove(&mut self, providers: &[Address]) -> Result<()> {
        if providers.is_empty() {
            return Err(SeedError::InvalidInput);
        }

        let mut next = self.clone();
        for provider in providers {
            match next.trusted.get_mut(provider) {
                Some(flag) if *flag => *flag = false,
                _ => return Err(SeedError::NotRegistered(*provider)),
            }
            next.trusted_count -= 1;
        }

        *self = next;
        Ok(())
    }

    /// Currently trusted providers in original insertion order
    pub fn active_providers(&self) -> Vec<Address> {
        self.insertion_order
            .iter()
            .filter(|p| self.is_trusted(p))
            .copied()
            .collect()
    }

    pub fn is_trusted(&self, provider: &Address) -> bool {
        self.trusted.get(provider).copied().unwrap_or(false)
    }

    pub fn trusted_count(&self) -> u32 {
        self.trusted_count
    }

    /// Number of providers ever added, trusted or not
    pub fn known_count(&self) -> usize {
        self.insertion_order.len()
    }
}
