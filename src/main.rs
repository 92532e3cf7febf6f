//! War - command line front end for the War engine

use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use war_rs::{
    game::{
        stop_channel, GameSession, OutputFormat, RoundSink, RunEndReason, StepOutcome, TextSink,
        VerbosityLevel,
    },
    source::ShuffledDeckSource,
    Result, WarError,
};

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// Output format for round reports
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// One JSON object per round
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "war")]
#[command(about = "War - card game engine and simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deal a game and auto-play it to completion
    Play {
        /// Number of cards to deal (even, at most 52)
        #[arg(long, default_value_t = 16)]
        cards: usize,

        /// Set random seed for deterministic shuffles
        #[arg(long)]
        seed: Option<u64>,

        /// Delay between rounds in milliseconds (0 = as fast as possible)
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,

        /// Maximum rounds before the game is called off
        #[arg(long, default_value_t = 10_000)]
        max_rounds: u32,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Output format for round reports
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,
    },

    /// Interactive shell: start, step, auto, stop
    Shell {
        /// Number of cards to deal (even, at most 52)
        #[arg(long, default_value_t = 16)]
        cards: usize,

        /// Set random seed for deterministic shuffles
        #[arg(long)]
        seed: Option<u64>,

        /// Delay between auto-played rounds in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            cards,
            seed,
            interval_ms,
            max_rounds,
            verbosity,
            format,
        } => run_play(cards, seed, interval_ms, max_rounds, verbosity.0, format.into()).await?,
        Commands::Shell {
            cards,
            seed,
            interval_ms,
            verbosity,
        } => run_shell(cards, seed, interval_ms, verbosity.0).await?,
    }
    Ok(())
}

fn make_source(seed: Option<u64>) -> ShuffledDeckSource {
    match seed {
        Some(seed) => ShuffledDeckSource::with_seed(seed),
        None => ShuffledDeckSource::new(),
    }
}

async fn run_play(
    cards: usize,
    seed: Option<u64>,
    interval_ms: u64,
    max_rounds: u32,
    verbosity: VerbosityLevel,
    format: OutputFormat,
) -> Result<()> {
    let mut source = make_source(seed);
    let mut session =
        GameSession::new(TextSink::new(verbosity, format)).with_max_rounds(max_rounds);
    session.start(&mut source, cards).await?;

    // Ctrl-C cancels between rounds, never mid-round
    let (handle, rx) = stop_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.stop();
        }
    });

    let result = session
        .run_auto(Duration::from_millis(interval_ms), Some(rx))
        .await?;

    match result.end_reason {
        RunEndReason::Terminal => {}
        RunEndReason::RoundLimit => {
            println!(
                "Game called off after {} rounds (round limit)",
                result.rounds_played
            );
        }
        RunEndReason::Stopped => {
            println!("Auto-play stopped after {} rounds", result.rounds_played);
        }
    }
    Ok(())
}

fn print_shell_help() {
    println!("Commands:");
    println!("  start   deal a fresh game (resets any game in progress)");
    println!("  step    play one round");
    println!("  auto    auto-play on a timer until stopped or game over");
    println!("  stop    halt auto-play (only while auto is running)");
    println!("  status  show pile sizes and war state");
    println!("  quit    leave the shell");
}

async fn run_shell(
    cards: usize,
    seed: Option<u64>,
    interval_ms: u64,
    verbosity: VerbosityLevel,
) -> Result<()> {
    let mut source = make_source(seed);
    let mut session = GameSession::new(TextSink::new(verbosity, OutputFormat::Text));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("war shell - type 'start' to deal, '?' for help");
    loop {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => {}
            "?" | "help" => print_shell_help(),
            "start" => match session.start(&mut source, cards).await {
                Ok(()) => println!("Game on. 'step' plays a round."),
                // A flaky source is not fatal to the shell; state is unchanged
                Err(WarError::SourceUnavailable(msg)) => {
                    eprintln!("card source unavailable: {msg}")
                }
                Err(e) => return Err(e),
            },
            "step" => match session.step() {
                Ok(StepOutcome::Played) => {}
                Ok(StepOutcome::Finished(_)) => println!("game over; 'start' deals a new one"),
                Err(WarError::InvalidAction(msg)) => println!("{msg}"),
                // End-of-game signal is not a shell fault
                Err(e) if e.is_game_over() => println!("{e}"),
                Err(e) => return Err(e),
            },
            "auto" => {
                if session.state().is_none() {
                    println!("no game in progress; start one first");
                    continue;
                }
                run_shell_auto(&mut session, &mut lines, interval_ms).await?;
            }
            "stop" => println!("auto-play is not running"),
            "status" => print_status(&session),
            "quit" | "exit" => break,
            other => println!("unknown command '{other}' (try '?')"),
        }
    }
    Ok(())
}

/// Auto-play inside the shell: rounds tick on the interval while stdin is
/// watched for 'stop'. The round itself is synchronous, so cancellation
/// always lands between rounds.
async fn run_shell_auto(
    session: &mut GameSession<TextSink>,
    lines: &mut Lines<BufReader<Stdin>>,
    interval_ms: u64,
) -> Result<()> {
    let (handle, rx) = stop_channel();
    let auto = session.run_auto(Duration::from_millis(interval_ms), Some(rx));
    tokio::pin!(auto);

    loop {
        tokio::select! {
            result = &mut auto => {
                let result = result?;
                if result.end_reason == RunEndReason::Stopped {
                    println!("auto-play stopped after {} rounds", result.rounds_played);
                }
                return Ok(());
            }
            line = lines.next_line() => {
                match line?.as_deref().map(str::trim) {
                    Some("stop") | None => handle.stop(),
                    Some(_) => println!("auto-playing; type 'stop' to halt"),
                }
            }
        }
    }
}

fn print_status<S: RoundSink>(session: &GameSession<S>) {
    match session.state() {
        Some(state) => {
            let [p1, p2] = state.pile_sizes();
            println!(
                "round {}: P1 {} cards, P2 {} cards, staged {}{}",
                session.rounds_played(),
                p1,
                p2,
                state.staged_len(),
                if state.war_pending() {
                    " (war pending)"
                } else {
                    ""
                }
            );
        }
        None => println!("no game in progress"),
    }
}
