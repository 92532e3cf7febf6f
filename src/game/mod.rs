//! Game state, round execution, and the session driver

pub mod pile;
pub mod session;
pub mod sink;
pub mod state;

pub use pile::{DrawnCards, Pile};
pub use session::{stop_channel, GameResult, GameSession, RunEndReason, StepOutcome, StopHandle};
pub use sink::{MemorySink, NullSink, OutputFormat, RoundSink, TextSink, VerbosityLevel};
pub use state::{GameOutcome, GameState, Round, RoundOutcome, WAR_DRAW};
