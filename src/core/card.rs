//! Card types and rank comparison values

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Card rank, ordered by War comparison value (Two lowest, Ace highest)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Comparison value: 2-10 literal, Jack=11, Queen=12, King=13, Ace=14
    pub fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    /// Single-character code used in card identifiers ("0" for Ten,
    /// matching the deckofcardsapi convention)
    pub fn code_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => '0',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

impl std::str::FromStr for Rank {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "10" => Ok(Rank::Ten),
            "JACK" | "J" => Ok(Rank::Jack),
            "QUEEN" | "Q" => Ok(Rank::Queen),
            "KING" | "K" => Ok(Rank::King),
            "ACE" | "A" => Ok(Rank::Ace),
            _ => Err(format!("invalid rank '{s}'")),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rank::Jack => "JACK",
            Rank::Queen => "QUEEN",
            Rank::King => "KING",
            Rank::Ace => "ACE",
            other => return write!(f, "{}", other.value()),
        };
        write!(f, "{name}")
    }
}

/// Card suit (no bearing on comparison; part of the card identity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn code_char(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }
}

/// An immutable playing card
///
/// Rank carries the comparison semantics; `code()` renders the opaque
/// identifier external services use to depict the card (e.g. "AS" for the
/// Ace of Spades).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    /// Two-character identifier, e.g. "AS", "0D" (Ten of Diamonds)
    pub fn code(&self) -> String {
        let mut code = String::with_capacity(2);
        code.push(self.rank.code_char());
        code.push(self.suit.code_char());
        code
    }

    /// Compare by rank value only; suits never break ties in War
    pub fn compare_rank(&self, other: &Card) -> Ordering {
        self.rank.value().cmp(&other.rank.value())
    }

    /// The full 52-card deck in a fixed order (shuffle before dealing)
    pub fn standard_deck() -> Vec<Card> {
        let mut deck = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                deck.push(Card::new(rank, suit));
            }
        }
        deck
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_rank_values() {
        assert_eq!(Rank::Two.value(), 2);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Jack.value(), 11);
        assert_eq!(Rank::Queen.value(), 12);
        assert_eq!(Rank::King.value(), 13);
        assert_eq!(Rank::Ace.value(), 14);
    }

    #[test]
    fn test_rank_parsing() {
        assert_eq!(Rank::from_str("2").unwrap(), Rank::Two);
        assert_eq!(Rank::from_str("10").unwrap(), Rank::Ten);
        assert_eq!(Rank::from_str("JACK").unwrap(), Rank::Jack);
        assert_eq!(Rank::from_str("queen").unwrap(), Rank::Queen);
        assert_eq!(Rank::from_str("ACE").unwrap(), Rank::Ace);
        assert!(Rank::from_str("JOKER").is_err());
    }

    #[test]
    fn test_card_codes() {
        let ace_spades = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(ace_spades.code(), "AS");

        let ten_diamonds = Card::new(Rank::Ten, Suit::Diamonds);
        assert_eq!(ten_diamonds.code(), "0D");

        let two_clubs = Card::new(Rank::Two, Suit::Clubs);
        assert_eq!(two_clubs.code(), "2C");
    }

    #[test]
    fn test_rank_ordering_matches_values() {
        for a in Rank::ALL {
            for b in Rank::ALL {
                assert_eq!(a.cmp(&b), a.value().cmp(&b.value()));
            }
        }
    }

    #[test]
    fn test_standard_deck() {
        let deck = Card::standard_deck();
        assert_eq!(deck.len(), 52);

        let codes: std::collections::HashSet<String> =
            deck.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), 52);
    }
}
