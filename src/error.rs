//! Error types for the War engine

use crate::core::Player;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarError {
    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    /// End-of-game signal: a pile cannot supply the next round's draw.
    /// The opponent of `player` is the winner.
    #[error("{player} has insufficient cards: needed {needed}, has {available}")]
    InsufficientCards {
        player: Player,
        needed: usize,
        available: usize,
    },

    #[error("Card source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WarError {
    /// True for the expected terminal signal, false for real faults
    pub fn is_game_over(&self) -> bool {
        matches!(self, WarError::InsufficientCards { .. })
    }
}

pub type Result<T> = std::result::Result<T, WarError>;
