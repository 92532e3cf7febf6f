//! Game state and the one-round transition function
//!
//! Two states, `Normal` and `War`, tracked by `war_pending`:
//! `Normal -> War` on a tie, `War -> War` on a repeated tie, and
//! `War -> Normal` with a full staged-stack payout on a decisive round.
//! Terminal detection (pile exhaustion) is the caller's job via
//! `game_over`, checked before each round.

use crate::core::{Card, Player};
use crate::game::pile::{DrawnCards, Pile};
use crate::{Result, WarError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Cards each player must draw while a war is unresolved:
/// 3 burned face-down plus 1 comparison card, all of them staked.
pub const WAR_DRAW: usize = 4;

/// Outcome of a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Decisive comparison; the winner takes this round's draws plus the
    /// entire staged stack
    Winner(Player),
    /// Tie; everything drawn this round moves to the staged stack
    War,
}

/// Transient descriptor of one executed round, handed to the sink
#[derive(Debug, Clone, Serialize)]
pub struct Round {
    /// True when this round resolved (or re-escalated) a pending war
    pub war_round: bool,
    /// Cards drawn this round, indexed by `Player::index()`; the last
    /// card of each buffer is the comparison card
    pub drawn: [DrawnCards; 2],
    pub outcome: RoundOutcome,
}

impl Round {
    /// The comparison card a player showed this round
    pub fn comparison_card(&self, player: Player) -> Card {
        let drawn = &self.drawn[player.index()];
        drawn[drawn.len() - 1]
    }
}

/// Terminal result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Winner(Player),
    /// Both piles exhausted at once during an unresolved war; staged cards
    /// stay on the table, awarded to neither player
    Draw,
}

/// Full state of a War game between rounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    piles: [Pile; 2],
    /// Cards at risk during escalating wars, paid out en masse on the
    /// next decisive round
    staged: Vec<Card>,
    war_pending: bool,
    initial_count: usize,
}

impl GameState {
    /// Split an already-shuffled deck alternately between the two players
    /// (even positions to P1, odd to P2), preserving draw order.
    pub fn deal(deck: Vec<Card>) -> Result<GameState> {
        if deck.is_empty() {
            return Err(WarError::InvalidDeck("deck is empty".to_string()));
        }
        if deck.len() % 2 != 0 {
            return Err(WarError::InvalidDeck(format!(
                "deck has odd length {}",
                deck.len()
            )));
        }

        let initial_count = deck.len();
        let mut piles = [Pile::new(Player::P1), Pile::new(Player::P2)];
        for (i, card) in deck.into_iter().enumerate() {
            piles[i % 2].add(card);
        }

        Ok(GameState {
            piles,
            staged: Vec::new(),
            war_pending: false,
            initial_count,
        })
    }

    pub fn pile(&self, player: Player) -> &Pile {
        &self.piles[player.index()]
    }

    /// Remaining pile sizes, indexed by `Player::index()`
    pub fn pile_sizes(&self) -> [usize; 2] {
        [self.piles[0].len(), self.piles[1].len()]
    }

    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    pub fn war_pending(&self) -> bool {
        self.war_pending
    }

    pub fn initial_count(&self) -> usize {
        self.initial_count
    }

    /// Cards each player must draw next round: 1 normally, 4 during a war
    pub fn required_draw(&self) -> usize {
        if self.war_pending {
            WAR_DRAW
        } else {
            1
        }
    }

    /// Total cards across both piles and the staged stack; equals
    /// `initial_count` for every reachable state
    pub fn total_cards(&self) -> usize {
        self.piles[0].len() + self.piles[1].len() + self.staged.len()
    }

    /// Check terminal conditions before a round is played
    ///
    /// Returns the winner once the opposing pile cannot satisfy the next
    /// required draw, or `Draw` when both piles are short at once.
    pub fn game_over(&self) -> Option<GameOutcome> {
        let needed = self.required_draw();
        let p1_short = !self.piles[0].can_draw(needed);
        let p2_short = !self.piles[1].can_draw(needed);
        match (p1_short, p2_short) {
            (true, true) => Some(GameOutcome::Draw),
            (true, false) => Some(GameOutcome::Winner(Player::P2)),
            (false, true) => Some(GameOutcome::Winner(Player::P1)),
            (false, false) => None,
        }
    }

    /// Execute exactly one round transition
    ///
    /// Draws from both piles, compares the last-drawn cards, and either
    /// pays out (decisive) or stages everything drawn (tie). Fails with
    /// `InsufficientCards` before touching any pile when a player cannot
    /// meet the draw count; that failure identifies the loser and leaves
    /// the state unchanged.
    pub fn play_round(&mut self) -> Result<Round> {
        let needed = self.required_draw();

        // Atomic pre-check: both piles, before any mutation.
        for player in Player::BOTH {
            let pile = &self.piles[player.index()];
            if !pile.can_draw(needed) {
                return Err(WarError::InsufficientCards {
                    player,
                    needed,
                    available: pile.len(),
                });
            }
        }

        let war_round = self.war_pending;
        let p1_drawn = self.piles[0].draw(needed)?;
        let p2_drawn = self.piles[1].draw(needed)?;

        // Only the last-drawn card of each side is compared; in a war
        // round the first three are the face-down burn.
        let p1_card = p1_drawn[needed - 1];
        let p2_card = p2_drawn[needed - 1];

        let outcome = match p1_card.compare_rank(&p2_card) {
            Ordering::Greater => RoundOutcome::Winner(Player::P1),
            Ordering::Less => RoundOutcome::Winner(Player::P2),
            Ordering::Equal => RoundOutcome::War,
        };

        match outcome {
            RoundOutcome::Winner(winner) => {
                let pile = &mut self.piles[winner.index()];
                pile.add_all(self.staged.drain(..));
                pile.add_all(p1_drawn.iter().copied());
                pile.add_all(p2_drawn.iter().copied());
                self.war_pending = false;
            }
            RoundOutcome::War => {
                self.staged.extend(p1_drawn.iter().copied());
                self.staged.extend(p2_drawn.iter().copied());
                self.war_pending = true;
            }
        }

        debug_assert_eq!(self.total_cards(), self.initial_count);

        Ok(Round {
            war_round,
            drawn: [p1_drawn, p2_drawn],
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rank, Suit};

    /// Build a deck from ranks, cycling suits so card identities stay
    /// unique even when ranks repeat
    fn deck_of(ranks: &[Rank]) -> Vec<Card> {
        ranks
            .iter()
            .enumerate()
            .map(|(i, &rank)| Card::new(rank, Suit::ALL[i % 4]))
            .collect()
    }

    #[test]
    fn test_deal_alternates() {
        let state = GameState::deal(deck_of(&[
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
        ]))
        .unwrap();

        let p1: Vec<Rank> = state.pile(Player::P1).cards().iter().map(|c| c.rank).collect();
        let p2: Vec<Rank> = state.pile(Player::P2).cards().iter().map(|c| c.rank).collect();
        assert_eq!(p1, vec![Rank::Two, Rank::Four]);
        assert_eq!(p2, vec![Rank::Three, Rank::Five]);
        assert!(!state.war_pending());
        assert_eq!(state.staged_len(), 0);
    }

    #[test]
    fn test_deal_rejects_odd_and_empty_decks() {
        assert!(matches!(
            GameState::deal(vec![]),
            Err(WarError::InvalidDeck(_))
        ));
        assert!(matches!(
            GameState::deal(deck_of(&[Rank::Two, Rank::Three, Rank::Four])),
            Err(WarError::InvalidDeck(_))
        ));
    }

    #[test]
    fn test_higher_card_takes_the_pair() {
        // Deal order: p1 = [9], p2 = [7]
        let mut state = GameState::deal(deck_of(&[Rank::Nine, Rank::Seven])).unwrap();
        let round = state.play_round().unwrap();

        assert!(!round.war_round);
        assert_eq!(round.outcome, RoundOutcome::Winner(Player::P1));
        assert_eq!(state.pile_sizes(), [2, 0]);
        assert_eq!(state.total_cards(), 2);
    }

    #[test]
    fn test_tie_stages_both_cards() {
        let mut state = GameState::deal(deck_of(&[Rank::King, Rank::King])).unwrap();
        let round = state.play_round().unwrap();

        assert_eq!(round.outcome, RoundOutcome::War);
        assert!(state.war_pending());
        assert_eq!(state.staged_len(), 2);
        assert_eq!(state.pile_sizes(), [0, 0]);
        // Both piles empty during an unresolved war: declared draw
        assert_eq!(state.game_over(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_war_draws_four_and_pays_out_everything() {
        // Deal order interleaves: p1 = [Q, 2, 3, 4, A], p2 = [Q, 5, 6, 7, 9]
        let mut state = GameState::deal(deck_of(&[
            Rank::Queen,
            Rank::Queen,
            Rank::Two,
            Rank::Five,
            Rank::Three,
            Rank::Six,
            Rank::Four,
            Rank::Seven,
            Rank::Ace,
            Rank::Nine,
        ]))
        .unwrap();

        // Round 1: Q vs Q, tie
        let round = state.play_round().unwrap();
        assert_eq!(round.outcome, RoundOutcome::War);
        assert_eq!(state.required_draw(), WAR_DRAW);
        assert_eq!(state.staged_len(), 2);

        // Round 2: each draws 4, comparison is the 4th (A vs 9)
        let round = state.play_round().unwrap();
        assert!(round.war_round);
        assert_eq!(round.drawn[0].len(), 4);
        assert_eq!(round.drawn[1].len(), 4);
        assert_eq!(round.comparison_card(Player::P1).rank, Rank::Ace);
        assert_eq!(round.comparison_card(Player::P2).rank, Rank::Nine);
        assert_eq!(round.outcome, RoundOutcome::Winner(Player::P1));

        // P1 takes the staged pair plus all 8 war cards
        assert_eq!(state.pile_sizes(), [10, 0]);
        assert_eq!(state.staged_len(), 0);
        assert!(!state.war_pending());
        assert_eq!(state.game_over(), Some(GameOutcome::Winner(Player::P1)));
    }

    #[test]
    fn test_repeated_tie_keeps_draw_at_four() {
        // p1 = [K, 2, 3, 4, K, ...], p2 = [K, 5, 6, 7, K, ...]: war, then
        // a second tie on the comparison card, then a decisive round.
        let mut state = GameState::deal(deck_of(&[
            Rank::King,
            Rank::King,
            Rank::Two,
            Rank::Five,
            Rank::Three,
            Rank::Six,
            Rank::Four,
            Rank::Seven,
            Rank::King,
            Rank::King,
            Rank::Two,
            Rank::Five,
            Rank::Three,
            Rank::Six,
            Rank::Four,
            Rank::Seven,
            Rank::Ace,
            Rank::Nine,
        ]))
        .unwrap();

        assert_eq!(state.play_round().unwrap().outcome, RoundOutcome::War);
        assert_eq!(state.required_draw(), WAR_DRAW);

        let second = state.play_round().unwrap();
        assert_eq!(second.outcome, RoundOutcome::War);
        // Escalation never grows past 4 per round
        assert_eq!(state.required_draw(), WAR_DRAW);
        assert_eq!(state.staged_len(), 10);

        let third = state.play_round().unwrap();
        assert_eq!(third.outcome, RoundOutcome::Winner(Player::P1));
        assert_eq!(state.staged_len(), 0);
        assert_eq!(state.pile_sizes(), [18, 0]);
    }

    #[test]
    fn test_insufficient_cards_identifies_loser_without_mutation() {
        // Four cards dealt 2/2: p1 = [2, 3], p2 = [A, K]
        let mut state = GameState::deal(deck_of(&[
            Rank::Two,
            Rank::Ace,
            Rank::Three,
            Rank::King,
        ]))
        .unwrap();

        // Round 1: 2 vs A, p2 takes the pair
        let round = state.play_round().unwrap();
        assert_eq!(round.outcome, RoundOutcome::Winner(Player::P2));
        assert_eq!(state.pile_sizes(), [1, 3]);

        // Round 2: 3 vs K, p1 is emptied out
        let round = state.play_round().unwrap();
        assert_eq!(round.outcome, RoundOutcome::Winner(Player::P2));
        assert_eq!(state.pile_sizes(), [0, 4]);
        assert_eq!(state.game_over(), Some(GameOutcome::Winner(Player::P2)));

        // Round 3 fails naming p1, and the failed round mutates nothing
        let err = state.play_round().unwrap_err();
        match err {
            WarError::InsufficientCards {
                player,
                needed,
                available,
            } => {
                assert_eq!(player, Player::P1);
                assert_eq!(needed, 1);
                assert_eq!(available, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(state.pile_sizes(), [0, 4]);
        assert_eq!(state.total_cards(), 4);
    }

    #[test]
    fn test_conservation_across_a_full_game() {
        let deck = Card::standard_deck();
        let initial = deck.len();
        let mut state = GameState::deal(deck).unwrap();

        let mut rounds = 0;
        while state.game_over().is_none() && rounds < 10_000 {
            state.play_round().unwrap();
            assert_eq!(state.total_cards(), initial);
            rounds += 1;
        }
    }
}
