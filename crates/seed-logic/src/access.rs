//! Caller authorization
//!
//! The administrator capability belongs to an external role system and is
//! consumed through [`AdminCapability`]. The whitelist of seed requesters
//! is owned here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SeedError};
use crate::types::Address;

/// Source of truth for the administrator capability
pub trait AdminCapability {
    fn is_admin(&self, caller: &Address) -> bool;
}

/// A single fixed administrator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleAdmin(pub Address);

impl AdminCapability for SingleAdmin {
    fn is_admin(&self, caller: &Address) -> bool {
        !caller.is_null() && *caller == self.0
    }
}

impl<F> AdminCapability for F
where
    F: Fn(&Address) -> bool,
{
    fn is_admin(&self, caller: &Address) -> bool {
        self(caller)
    }
}

pub fn authorize_admin<A: AdminCapability + ?Sized>(capability: &A, caller: &Address) -> Result<()> {
    if capability.is_admin(caller) {
        Ok(())
    } else {
        Err(SeedError::Forbidden(*caller))
    }
}

/// Callers allowed to request seeds
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whitelist {
    entries: BTreeMap<Address, bool>,
}

impl Whitelist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the list of currently whitelisted callers
    pub fn from_active(callers: &[Address]) -> Self {
        Self {
            entries: callers.iter().map(|c| (*c, true)).collect(),
        }
    }

    /// Currently whitelisted callers, in handle order
    pub fn active(&self) -> Vec<Address> {
        self.entries
            .iter()
            .filter(|(_, &active)| active)
            .map(|(caller, _)| *caller)
            .collect()
    }

    pub fn is_whitelisted(&self, caller: &Address) -> bool {
        self.entries.get(caller).copied().unwrap_or(false)
    }

    pub fn authorize(&self, caller: &Address) -> Result<()> {
        if self.is_whitelisted(caller) {
            Ok(())
        } else {
            Err(SeedError::Forbidden(*caller))
        }
    }

    /// Set `owner`'s flag; the admin check is the caller's job
    pub fn set(&mut self, owner: &Address, active: bool, self_address: &Address) -> Result<()> {
        if owner.is_null() || owner == self_address {
            return Err(SeedError::InvalidOwner(*owner));
        }
        if self.is_whitelisted(owner) == active {
            return Err(SeedError::NoOpChange(*owner));
        }
        self.entries.insert(*owner, active);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELF: Address = Address([0xee; 32]);

    #[test]
    fn test_single_admin() {
        let admin = SingleAdmin(Address([1; 32]));
        assert!(authorize_admin(&admin, &Address([1; 32])).is_ok());
        assert_eq!(
            authorize_admin(&admin, &Address([2; 32])),
            Err(SeedError::Forbidden(Address([2; 32])))
        );

        // A null admin never authorizes the null caller
        let nobody = SingleAdmin(Address::NULL);
        assert!(authorize_admin(&nobody, &Address::NULL).is_err());
    }

    #[test]
    fn test_closure_capability() {
        let capability = |caller: &Address| caller.0[0] == 7;
        assert!(authorize_admin(&capability, &Address([7; 32])).is_ok());
        assert!(authorize_admin(&capability, &Address([8; 32])).is_err());
    }

    #[test]
    fn test_whitelist_set_and_authorize() {
        let mut whitelist = Whitelist::new();
        let caller = Address([3; 32]);
        assert_eq!(whitelist.authorize(&caller), Err(SeedError::Forbidden(caller)));

        whitelist.set(&caller, true, &SELF).unwrap();
        assert!(whitelist.authorize(&caller).is_ok());
        assert_eq!(whitelist.active(), vec![caller]);

        whitelist.set(&caller, false, &SELF).unwrap();
        assert!(whitelist.authorize(&caller).is_err());
        assert!(whitelist.active().is_empty());
    }

    #[test]
    fn test_whitelist_noop_rejected() {
        let mut whitelist = Whitelist::new();
        let caller = Address([3; 32]);

        // Unknown callers are already inactive
        assert_eq!(whitelist.set(&caller, false, &SELF), Err(SeedError::NoOpChange(caller)));

        whitelist.set(&caller, true, &SELF).unwrap();
        let before = whitelist.clone();
        assert_eq!(whitelist.set(&caller, true, &SELF), Err(SeedError::NoOpChange(caller)));
        assert_eq!(whitelist, before);
    }

    #[test]
    fn test_whitelist_invalid_owner() {
        let mut whitelist = Whitelist::new();
        assert_eq!(
            whitelist.set(&Address::NULL, true, &SELF),
            Err(SeedError::InvalidOwner(Address::NULL))
        );
        assert_eq!(whitelist.set(&SELF, true, &SELF), Err(SeedError::InvalidOwner(SELF)));
        assert_eq!(whitelist, Whitelist::new());
    }

    #[test]
    fn test_from_active() {
        let callers = [Address([5; 32]), Address([4; 32])];
        let whitelist = Whitelist::from_active(&callers);
        assert!(whitelist.is_whitelisted(&callers[0]));
        assert!(whitelist.is_whitelisted(&callers[1]));
        assert_eq!(whitelist.active(), vec![Address([4; 32]), Address([5; 32])]);
    }
}
