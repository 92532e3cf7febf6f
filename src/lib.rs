//! War - a deterministic engine for the card game War
//!
//! This is a re-architecture of a browser-based War game into an explicit
//! game state machine: two piles, a staged stack at risk during wars, and
//! one atomic round transition per step.

pub mod core;
pub mod error;
pub mod game;
pub mod source;

pub use error::{Result, WarError};
