//! A player's pile of face-down cards

use crate::core::{Card, Player};
use crate::{Result, WarError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Buffer for one round's draw; a war round draws at most 4 cards
pub type DrawnCards = SmallVec<[Card; 4]>;

/// An ordered pile of cards owned by exactly one player
///
/// Cards are drawn from the front in deal order and appended to the back
/// when won. Order is draw order, never rank order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pile {
    /// Owner of this pile
    pub owner: Player,

    /// Cards in the pile (front = next to draw)
    cards: Vec<Card>,
}

impl Pile {
    pub fn new(owner: Player) -> Self {
        Pile {
            owner,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Append a batch of won cards, preserving their order
    pub fn add_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Whether the next draw of `count` cards can be satisfied
    pub fn can_draw(&self, count: usize) -> bool {
        self.cards.len() >= count
    }

    /// Draw `count` cards from the front of the pile
    ///
    /// All-or-nothing: fails with `InsufficientCards` without removing
    /// anything when the pile is short. That failure is the end-of-game
    /// signal for this pile's owner.
    pub fn draw(&mut self, count: usize) -> Result<DrawnCards> {
        if !self.can_draw(count) {
            return Err(WarError::InsufficientCards {
                player: self.owner,
                needed: count,
                available: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..count).collect())
    }
}
