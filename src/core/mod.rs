//! Core card and player types

pub mod card;
pub mod player;

pub use card::{Card, Rank, Suit};
pub use player::Player;
