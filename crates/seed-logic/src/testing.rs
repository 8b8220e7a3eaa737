//! Test doubles

use std::cell::RefCell;

use crate::hasher::SeedHasher;
use crate::types::Digest;

/// Hasher that returns scripted digests in order and records each preimage
pub struct ScriptedHasher {
    outputs: RefCell<std::vec::IntoIter<Digest>>,
    calls: RefCell<Vec<Vec<u8>>>,
}

impl ScriptedHasher {
    pub fn new(outputs: Vec<Digest>) -> Self {
        Self {
            outputs: RefCell::new(outputs.into_iter()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<u8>> {
        self.calls.borrow().clone()
    }
}

impl SeedHasher for ScriptedHasher {
    fn hashv(&self, parts: &[&[u8]]) -> Digest {
        self.calls.borrow_mut().push(parts.concat());
        self.outputs
            .borrow_mut()
            .next()
            .expect("scripted hasher ran out of outputs")
    }
}
