//! Card source collaborator
//!
//! Deck provisioning lives behind an async trait so a network-backed
//! service can stand in for the local shuffler. The engine suspends on
//! `new_deck` and applies the rest of the game synchronously.

use crate::core::Card;
use crate::{Result, WarError};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Provider of shuffled decks
///
/// Implementations may be remote; failures surface as
/// `WarError::SourceUnavailable` and leave any in-progress game untouched.
#[allow(async_fn_in_trait)]
pub trait CardSource {
    /// Produce a shuffled deck of `count` cards
    async fn new_deck(&mut self, count: usize) -> Result<Vec<Card>>;
}

/// Local card source: shuffles a standard 52-card deck and serves the
/// first `count` cards
///
/// A fixed seed gives deterministic shuffles for testing and replay.
#[derive(Debug, Clone)]
pub struct ShuffledDeckSource {
    seed: Option<u64>,
}

impl ShuffledDeckSource {
    pub fn new() -> Self {
        ShuffledDeckSource { seed: None }
    }

    pub fn with_seed(seed: u64) -> Self {
        ShuffledDeckSource { seed: Some(seed) }
    }
}

impl Default for ShuffledDeckSource {
    fn default() -> Self {
        ShuffledDeckSource::new()
    }
}

impl CardSource for ShuffledDeckSource {
    async fn new_deck(&mut self, count: usize) -> Result<Vec<Card>> {
        let mut deck = Card::standard_deck();
        if count == 0 || count > deck.len() {
            return Err(WarError::InvalidDeck(format!(
                "cannot serve {count} cards from a {}-card deck",
                deck.len()
            )));
        }

        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        deck.shuffle(&mut rng);
        deck.truncate(count);
        Ok(deck)
    }
}
