//! Batch driver: run one random-policy session and print the result

use anyhow::{bail, Result};
use clap::Parser;
use forbidden_desert::game::{display, GameLoop, GameState, RandomPolicy, VerbosityLevel};

#[derive(Parser)]
#[command(name = "desert", about = "Simulate a desert expedition session")]
struct Args {
    /// Seed for the session RNG and the random policy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stop a session that never terminates after this many rounds
    #[arg(long, default_value_t = 1000)]
    max_rounds: u32,

    /// Output detail: silent, minimal, normal, or verbose
    #[arg(long, default_value = "normal")]
    verbosity: String,
}

fn parse_verbosity(name: &str) -> Result<VerbosityLevel> {
    match name {
        "silent" => Ok(VerbosityLevel::Silent),
        "minimal" => Ok(VerbosityLevel::Minimal),
        "normal" => Ok(VerbosityLevel::Normal),
        "verbose" => Ok(VerbosityLevel::Verbose),
        other => bail!("unknown verbosity level: {}", other),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = parse_verbosity(&args.verbosity)?;

    let mut game = GameState::new_session(args.seed);
    let mut policy = RandomPolicy::with_seed(args.seed);
    let result = GameLoop::new(&mut game)
        .with_max_rounds(args.max_rounds)
        .with_verbosity(verbosity)
        .run_game(&mut policy)?;

    println!("{}", display::render_state(&game));
    match result.outcome {
        Some(outcome) => println!(
            "Outcome after {} turns: {}",
            result.turns_taken, outcome
        ),
        None => println!(
            "No outcome after {} rounds; session stopped",
            result.rounds_played
        ),
    }

    Ok(())
}
