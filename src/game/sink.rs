//! Presentation sinks for round results
//!
//! The engine never renders anything itself; it reports each round plus
//! current pile sizes through a `RoundSink`. Sinks are observational
//! only, nothing they do can influence engine state.

use crate::core::Player;
use crate::game::state::{GameOutcome, Round, RoundOutcome};
use serde::Serialize;

/// Verbosity level for game output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - one line per round (default)
    #[default]
    Normal = 2,
    /// Verbose - burned cards and staged-stack size per round
    Verbose = 3,
}

/// Output format for round reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Observer of round results and terminal notifications
pub trait RoundSink {
    /// A fresh game was dealt
    fn on_deal(&mut self, pile_sizes: [usize; 2]);

    /// One round was executed
    fn on_round(&mut self, number: u32, round: &Round, pile_sizes: [usize; 2], staged: usize);

    /// The game reached a terminal state
    fn on_game_over(&mut self, outcome: GameOutcome, rounds_played: u32, staged_left: usize);
}

/// JSON line emitted per round by `TextSink` in Json mode
#[derive(Serialize)]
struct RoundRecord<'a> {
    round: u32,
    #[serde(flatten)]
    detail: &'a Round,
    pile_sizes: [usize; 2],
    staged: usize,
}

/// Sink that prints to stdout, honoring verbosity and output format
#[derive(Debug, Default)]
pub struct TextSink {
    verbosity: VerbosityLevel,
    format: OutputFormat,
}

impl TextSink {
    pub fn new(verbosity: VerbosityLevel, format: OutputFormat) -> Self {
        TextSink { verbosity, format }
    }

    fn deal_line(&self, pile_sizes: [usize; 2]) -> String {
        match self.format {
            OutputFormat::Json => serde_json::json!({ "dealt": pile_sizes }).to_string(),
            OutputFormat::Text => format!(
                "Dealt {} cards each ({} total)",
                pile_sizes[0],
                pile_sizes[0] + pile_sizes[1]
            ),
        }
    }
}

impl RoundSink for TextSink {
    fn on_deal(&mut self, pile_sizes: [usize; 2]) {
        if self.verbosity >= VerbosityLevel::Normal {
            println!("{}", self.deal_line(pile_sizes));
        }
    }

    fn on_round(&mut self, number: u32, round: &Round, pile_sizes: [usize; 2], staged: usize) {
        if self.verbosity < VerbosityLevel::Normal {
            return;
        }

        if self.format == OutputFormat::Json {
            let record = RoundRecord {
                round: number,
                detail: round,
                pile_sizes,
                staged,
            };
            match serde_json::to_string(&record) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("failed to serialize round {number}: {e}"),
            }
            return;
        }

        let p1_card = round.comparison_card(Player::P1);
        let p2_card = round.comparison_card(Player::P2);
        let prefix = if round.war_round { "WAR round" } else { "Round" };
        match round.outcome {
            RoundOutcome::Winner(winner) => println!(
                "{prefix} {number}: {p1_card} vs {p2_card} -> {winner} wins ({}/{})",
                pile_sizes[0], pile_sizes[1]
            ),
            RoundOutcome::War => println!(
                "{prefix} {number}: {p1_card} vs {p2_card} -> WAR! ({}/{})",
                pile_sizes[0], pile_sizes[1]
            ),
        }

        if self.verbosity >= VerbosityLevel::Verbose {
            for player in Player::BOTH {
                let drawn = &round.drawn[player.index()];
                if drawn.len() > 1 {
                    let burned: Vec<String> = drawn[..drawn.len() - 1]
                        .iter()
                        .map(|c| c.code())
                        .collect();
                    println!("  {player} burned: {}", burned.join(" "));
                }
            }
            println!("  staged stack: {staged}");
        }
    }

    fn on_game_over(&mut self, outcome: GameOutcome, rounds_played: u32, staged_left: usize) {
        if self.verbosity == VerbosityLevel::Silent {
            return;
        }
        if self.format == OutputFormat::Json {
            let line = serde_json::json!({
                "game_over": outcome,
                "rounds_played": rounds_played,
                "staged_left": staged_left,
            });
            println!("{line}");
            return;
        }
        match outcome {
            GameOutcome::Winner(winner) => {
                println!("{winner} wins after {rounds_played} rounds!")
            }
            GameOutcome::Draw => println!(
                "Draw after {rounds_played} rounds ({staged_left} cards left on the table)"
            ),
        }
    }
}

/// Sink that captures everything in memory, for tests and inspection
#[derive(Debug, Default)]
pub struct MemorySink {
    pub rounds: Vec<(u32, Round)>,
    pub deals: Vec<[usize; 2]>,
    pub outcome: Option<(GameOutcome, u32)>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }
}

impl RoundSink for MemorySink {
    fn on_deal(&mut self, pile_sizes: [usize; 2]) {
        self.deals.push(pile_sizes);
    }

    fn on_round(&mut self, number: u32, round: &Round, _pile_sizes: [usize; 2], _staged: usize) {
        self.rounds.push((number, round.clone()));
    }

    fn on_game_over(&mut self, outcome: GameOutcome, rounds_played: u32, _staged_left: usize) {
        self.outcome = Some((outcome, rounds_played));
    }
}

/// Sink that discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl RoundSink for NullSink {
    fn on_deal(&mut self, _pile_sizes: [usize; 2]) {}

    fn on_round(&mut self, _number: u32, _round: &Round, _pile_sizes: [usize; 2], _staged: usize) {
    }

    fn on_game_over(&mut self, _outcome: GameOutcome, _rounds_played: u32, _staged_left: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, Rank, Suit};
    use crate::game::state::GameState;

    #[test]
    fn test_deal_record_in_both_formats() {
        let json_sink = TextSink::new(VerbosityLevel::Normal, OutputFormat::Json);
        let line = json_sink.deal_line([8, 8]);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["dealt"], serde_json::json!([8, 8]));

        let text_sink = TextSink::new(VerbosityLevel::Normal, OutputFormat::Text);
        assert_eq!(text_sink.deal_line([8, 8]), "Dealt 8 cards each (16 total)");
    }

    #[test]
    fn test_memory_sink_captures_rounds() {
        let deck = vec![
            Card::new(Rank::Nine, Suit::Spades),
            Card::new(Rank::Seven, Suit::Hearts),
        ];
        let mut state = GameState::deal(deck).unwrap();
        let mut sink = MemorySink::new();

        sink.on_deal(state.pile_sizes());
        let round = state.play_round().unwrap();
        sink.on_round(1, &round, state.pile_sizes(), state.staged_len());
        sink.on_game_over(GameOutcome::Winner(Player::P1), 1, 0);

        assert_eq!(sink.deals, vec![[1, 1]]);
        assert_eq!(sink.rounds.len(), 1);
        assert_eq!(
            sink.rounds[0].1.outcome,
            RoundOutcome::Winner(Player::P1)
        );
        assert_eq!(sink.outcome, Some((GameOutcome::Winner(Player::P1), 1)));
    }
}
