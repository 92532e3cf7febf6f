//! Game session driver
//!
//! Owns the GameState exclusively and funnels every round through
//! `&mut self`, so only one round can ever be in flight. Auto-play runs
//! on a tokio interval with a watch-channel stop handle; cancellation
//! lands between rounds, never mid-round.

use crate::core::Player;
use crate::game::sink::RoundSink;
use crate::game::state::{GameOutcome, GameState};
use crate::source::CardSource;
use crate::{Result, WarError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Result of a single `step` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A round was played; the game continues
    Played,
    /// Terminal state reached (possibly on an earlier step)
    Finished(GameOutcome),
}

/// Why an auto-play run returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEndReason {
    /// A pile was exhausted (or both at once)
    Terminal,
    /// The round limit guard tripped
    RoundLimit,
    /// The stop handle was triggered
    Stopped,
}

/// Result of running auto-play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// Winner, if any (None on a draw, stop, or round limit)
    pub winner: Option<Player>,
    pub rounds_played: u32,
    pub end_reason: RunEndReason,
}

/// Handle for cancelling auto-play between rounds
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: watch::Sender<bool>,
}

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a linked stop handle and receiver for `run_auto`
pub fn stop_channel() -> (StopHandle, watch::Receiver<bool>) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx }, rx)
}

/// Drives one War game: deal, step, auto-play
pub struct GameSession<S: RoundSink> {
    state: Option<GameState>,
    sink: S,
    rounds_played: u32,
    max_rounds: u32,
    finished: Option<GameOutcome>,
}

impl<S: RoundSink> GameSession<S> {
    pub fn new(sink: S) -> Self {
        GameSession {
            state: None,
            sink,
            rounds_played: 0,
            max_rounds: 10_000,
            finished: None,
        }
    }

    /// Cap the number of rounds auto-play will run
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Start (or restart) a game with a fresh deck from the source
    ///
    /// A source failure leaves any previous game untouched, so the caller
    /// may retry or abandon.
    pub async fn start<C: CardSource>(&mut self, source: &mut C, count: usize) -> Result<()> {
        let deck = source.new_deck(count).await?;
        let state = GameState::deal(deck)?;

        self.sink.on_deal(state.pile_sizes());
        self.state = Some(state);
        self.rounds_played = 0;
        self.finished = None;
        Ok(())
    }

    /// Execute one round, or report the terminal state if one is reached
    pub fn step(&mut self) -> Result<StepOutcome> {
        if let Some(outcome) = self.finished {
            return Ok(StepOutcome::Finished(outcome));
        }
        let state = self.state.as_mut().ok_or_else(|| {
            WarError::InvalidAction("no game in progress; start one first".to_string())
        })?;

        // Terminal check before playing mirrors the engine's atomic
        // pre-check: a finished game is reported, never mutated.
        if let Some(outcome) = state.game_over() {
            self.finished = Some(outcome);
            self.sink
                .on_game_over(outcome, self.rounds_played, state.staged_len());
            return Ok(StepOutcome::Finished(outcome));
        }

        let round = state.play_round()?;
        self.rounds_played += 1;
        self.sink.on_round(
            self.rounds_played,
            &round,
            state.pile_sizes(),
            state.staged_len(),
        );
        Ok(StepOutcome::Played)
    }

    /// Auto-play: repeatedly step on a fixed interval until the game ends,
    /// the round limit trips, or the stop handle fires
    ///
    /// A zero interval steps as fast as possible (yielding between
    /// rounds). Otherwise the interval uses `Delay` missed-tick behavior,
    /// so a slow round never causes a burst of catch-up rounds; exactly
    /// one round is in flight at a time.
    pub async fn run_auto(
        &mut self,
        interval: Duration,
        stop: Option<watch::Receiver<bool>>,
    ) -> Result<GameResult> {
        let mut ticker = if interval.is_zero() {
            None
        } else {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            Some(ticker)
        };

        // Fallback receiver whose sender stays alive, so its changed()
        // never resolves; used when no stop handle was given or the
        // caller dropped theirs.
        let (_keep_alive, fallback_rx) = watch::channel(false);
        let mut rx = stop.unwrap_or_else(|| fallback_rx.clone());

        loop {
            let tick = async {
                match ticker.as_mut() {
                    Some(ticker) => {
                        ticker.tick().await;
                    }
                    None => tokio::task::yield_now().await,
                }
            };

            // Biased: a pending stop wins over an already-due tick.
            tokio::select! {
                biased;
                changed = rx.changed() => {
                    match changed {
                        Ok(()) if *rx.borrow() => {
                            return Ok(self.result(RunEndReason::Stopped));
                        }
                        Ok(()) => continue,
                        // Sender dropped: nobody can stop us anymore
                        Err(_) => {
                            rx = fallback_rx.clone();
                            continue;
                        }
                    }
                }
                _ = tick => {}
            }

            match self.step()? {
                StepOutcome::Finished(_) => {
                    return Ok(self.result(RunEndReason::Terminal));
                }
                StepOutcome::Played => {
                    if self.rounds_played >= self.max_rounds {
                        return Ok(self.result(RunEndReason::RoundLimit));
                    }
                }
            }
        }
    }

    fn result(&self, end_reason: RunEndReason) -> GameResult {
        let winner = match self.finished {
            Some(GameOutcome::Winner(player)) => Some(player),
            _ => None,
        };
        GameResult {
            winner,
            rounds_played: self.rounds_played,
            end_reason,
        }
    }
}
