//! Simulation runner (default binary).
//!
//! Plays a chosen policy against the in-process simulated game, optionally
//! rendering every turn to the terminal and recording a JSONL transcript.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;

use puyo_ai::core::PuyoState;
use puyo_ai::policy::{ComboPolicy, GreedyPolicy, Policy, RandomPolicy};
use puyo_ai::runner::{Driver, GameSource, RunStats, SimulatedGame, TranscriptSink};
use puyo_ai::term::{BoardView, Hud, Screen};

#[derive(Parser, Debug)]
#[command(name = "puyo-ai")]
struct Args {
    /// Policy to play with: random | greedy | combo
    #[arg(long, default_value = "greedy")]
    policy: String,

    /// Turns to play before stopping (topping out stops the run earlier).
    #[arg(long, default_value_t = 200)]
    turns: u32,

    /// Seed for the piece queue and for policy tie-breaking.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Draw the board to the terminal after every move.
    #[arg(long)]
    render: bool,

    /// Pause between rendered frames.
    #[arg(long, value_name = "ms", default_value_t = 120)]
    sleep_ms: u64,

    /// Write a JSONL transcript of the run to this file.
    #[arg(long, value_name = "path")]
    transcript: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Boxed so the binary can pick the implementation at runtime.
    let policy: Box<dyn Policy<PuyoState>> = match args.policy.as_str() {
        "random" => Box::new(RandomPolicy::new(args.seed)),
        "greedy" => Box::new(GreedyPolicy::new(args.seed)),
        "combo" => Box::new(ComboPolicy::new(args.seed)),
        other => {
            return Err(anyhow!(
                "unknown policy '{other}' (expected random, greedy, or combo)"
            ))
        }
    };

    let driver = Driver::new(SimulatedGame::new(args.seed), policy);

    let stats = if args.render {
        let mut screen = Screen::new();
        screen.enter()?;

        let result = run(driver, &args, Some(&mut screen));

        // Always try to restore terminal state.
        let _ = screen.exit();
        result?
    } else {
        run(driver, &args, None)?
    };

    println!(
        "DONE: policy={} turns={} score={} best_chain={} cells_cleared={} divergences={} game_over={}",
        args.policy,
        stats.turns,
        stats.score,
        stats.best_chain,
        stats.cells_cleared,
        stats.divergences,
        stats.game_over,
    );
    Ok(())
}

fn run(
    mut driver: Driver<SimulatedGame, Box<dyn Policy<PuyoState>>>,
    args: &Args,
    mut screen: Option<&mut Screen>,
) -> Result<RunStats> {
    let mut sink = match &args.transcript {
        Some(path) => Some(TranscriptSink::create(path)?),
        None => None,
    };
    let view = BoardView::default();

    while driver.stats().turns < args.turns {
        // The policy returns no move once the queue runs dry.
        let Some(record) = driver.step()? else {
            break;
        };

        if let Some(sink) = sink.as_mut() {
            sink.record(&record)?;
        }

        if let Some(screen) = screen.as_mut() {
            let stats = driver.stats();
            let hud = Hud {
                turn: stats.turns,
                score: stats.score,
                best_chain: stats.best_chain,
            };
            let state = driver.source().get_state();
            screen.draw(&view.render(&state, &hud))?;
            thread::sleep(Duration::from_millis(args.sleep_ms));
        }

        if record.game_over {
            break;
        }
    }

    let stats = driver.stats();
    if let Some(sink) = sink {
        sink.finish(&stats)?;
    }
    Ok(stats)
}
