//! Engine configuration

use serde::{Deserialize, Serialize};

/// Default upper bound on hash-chain iterations per request
pub const DEFAULT_MAX_CHAIN_LENGTH: u32 = 256;

/// Tunables for the seed engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Loop counts above this are clamped before running the hash chain
    pub max_chain_length: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_chain_length: DEFAULT_MAX_CHAIN_LENGTH }
    }
}

impl EngineConfig {
    pub fn with_max_chain_length(max_chain_length: u32) -> Self {
        Self { max_chain_length }
    }

    /// Load from a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Clamp a derived loop count to the configured bound
    pub fn bound_chain_length(&self, loop_count: u64) -> u32 {
        loop_count.min(self.max_chain_length as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_chain_length, DEFAULT_MAX_CHAIN_LENGTH);
    }

    #[test]
    fn test_from_json() {
        let config = EngineConfig::from_json(r#"{"max_chain_length": 12}"#).unwrap();
        assert_eq!(config.max_chain_length, 12);

        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());

        assert!(EngineConfig::from_json(r#"{"max_chain_length": -1}"#).is_err());
    }

    #[test]
    fn test_bound_chain_length() {
        let config = EngineConfig::with_max_chain_length(10);
        assert_eq!(config.bound_chain_length(0), 0);
        assert_eq!(config.bound_chain_length(10), 10);
        assert_eq!(config.bound_chain_length(11), 10);
        assert_eq!(config.bound_chain_length(u64::MAX), 10);
    }
}
