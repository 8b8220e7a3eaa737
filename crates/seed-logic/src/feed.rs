//! Price feed interface consumed by the engine
//!
//! Only `latest_round_data` is used for seed derivation. Answers are taken
//! as reported: no staleness, deviation or authenticity checks.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::FeedError;
use crate::types::Address;

/// A full round report from a feed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundData {
    pub round_id: u128,
    pub answer: i128,
    pub started_at: i64,
    pub updated_at: i64,
    pub answered_in_round: u128,
}

/// The part of a round report folded into a seed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderReading {
    pub round_id: u128,
    pub answer: i128,
    pub updated_at: i64,
}

impl From<RoundData> for ProviderReading {
    fn from(round: RoundData) -> Self {
        Self {
            round_id: round.round_id,
            answer: round.answer,
            updated_at: round.updated_at,
        }
    }
}

/// Aggregator-style data feed
pub trait PriceFeed {
    fn latest_round_data(&self) -> Result<RoundData, FeedError>;

    fn latest_round(&self) -> Result<u128, FeedError> {
        self.latest_round_data().map(|r| r.round_id)
    }

    fn get_answer(&self, round_id: u128) -> Result<i128, FeedError> {
        self.get_round_data(round_id).map(|r| r.answer)
    }

    fn get_timestamp(&self, round_id: u128) -> Result<i64, FeedError> {
        self.get_round_data(round_id).map(|r| r.updated_at)
    }

    fn get_round_data(&self, round_id: u128) -> Result<RoundData, FeedError> {
        let latest = self.latest_round_data()?;
        if latest.round_id == round_id {
            Ok(latest)
        } else {
            Err(FeedError::UnknownRound(round_id))
        }
    }
}

/// Maps a provider handle to the feed that answers for it
pub trait FeedResolver {
    fn resolve(&self, provider: &Address) -> Option<&dyn PriceFeed>;
}

impl<F: PriceFeed> FeedResolver for HashMap<Address, F> {
    fn resolve(&self, provider: &Address) -> Option<&dyn PriceFeed> {
        self.get(provider).map(|f| f as &dyn PriceFeed)
    }
}

impl<F: PriceFeed> FeedResolver for BTreeMap<Address, F> {
    fn resolve(&self, provider: &Address) -> Option<&dyn PriceFeed> {
        self.get(provider).map(|f| f as &dyn PriceFeed)
    }
}

/// Feed that keeps its full round history in memory
#[derive(Clone, Debug, Default)]
pub struct StaticFeed {
    rounds: Vec<RoundData>,
}

impl StaticFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-round feed answering `(round_id, answer, updated_at)`
    pub fn with_reading(round_id: u128, answer: i128, updated_at: i64) -> Self {
        let mut feed = Self::new();
        feed.push(RoundData {
            round_id,
            answer,
            started_at: updated_at,
            updated_at,
            answered_in_round: round_id,
        });
        feed
    }

    pub fn push(&mut self, round: RoundData) {
        self.rounds.push(round);
    }
}

impl PriceFeed for StaticFeed {
    fn latest_round_data(&self) -> Result<RoundData, FeedError> {
        self.rounds.last().copied().ok_or(FeedError::NoData)
    }

    fn get_round_data(&self, round_id: u128) -> Result<RoundData, FeedError> {
        self.rounds
            .iter()
            .find(|r| r.round_id == round_id)
            .copied()
            .ok_or(FeedError::UnknownRound(round_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_feed_latest() {
        let feed = StaticFeed::with_reading(5, 42, 1000);
        let round = feed.latest_round_data().unwrap();
        assert_eq!(round.round_id, 5);
        assert_eq!(round.answer, 42);
        assert_eq!(round.updated_at, 1000);
        assert_eq!(feed.latest_round(), Ok(5));

        let reading = ProviderReading::from(round);
        assert_eq!(reading, ProviderReading { round_id: 5, answer: 42, updated_at: 1000 });
    }

    #[test]
    fn test_static_feed_history() {
        let mut feed = StaticFeed::new();
        assert_eq!(feed.latest_round_data(), Err(FeedError::NoData));

        for id in 1..=3u128 {
            feed.push(RoundData {
                round_id: id,
                answer: id as i128 * -10,
                started_at: id as i64,
                updated_at: id as i64 * 100,
                answered_in_round: id,
            });
        }

        assert_eq!(feed.get_answer(2), Ok(-20));
        assert_eq!(feed.get_timestamp(3), Ok(300));
        assert_eq!(feed.get_round_data(9), Err(FeedError::UnknownRound(9)));
    }

    #[test]
    fn test_resolver_lookup() {
        let mut feeds = HashMap::new();
        feeds.insert(Address([1; 32]), StaticFeed::with_reading(1, 1, 1));

        assert!(feeds.resolve(&Address([1; 32])).is_some());
        assert!(feeds.resolve(&Address([2; 32])).is_none());
    }
}
