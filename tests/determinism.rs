//! End-to-end determinism tests
//!
//! The whole engine is seeded: board layout, deck order, player order
//! and the default policy all flow from the session seed. Two runs with
//! the same seed must therefore produce byte-identical logs.

use forbidden_desert::game::{display, GameLoop, GameState, RandomPolicy};
use similar_asserts::assert_eq;

/// Run a capped session and return its captured log plus final state
fn run_session(seed: u64) -> String {
    let mut game = GameState::new_session(seed);
    game.logger.enable_capture();
    let mut policy = RandomPolicy::with_seed(seed);

    let result = GameLoop::new(&mut game)
        .with_max_rounds(50)
        .run_game(&mut policy)
        .expect("a driven session never errors");

    let log: Vec<String> = game
        .logger
        .logs()
        .iter()
        .map(|entry| entry.message.clone())
        .collect();
    format!(
        "{}\n{:?}\n{}",
        log.join("\n"),
        result,
        display::render_state(&game)
    )
}

#[test]
fn test_same_seed_is_reproducible() {
    let run1 = run_session(42);
    let run2 = run_session(42);
    assert!(!run1.is_empty(), "session produced no log output");
    assert_eq!(run1, run2, "same seed diverged between runs");
}

#[test]
fn test_multiple_seeds_are_each_consistent() {
    for seed in [7, 100, 31337] {
        assert_eq!(
            run_session(seed),
            run_session(seed),
            "seed {} produced inconsistent output",
            seed
        );
    }
}

#[test]
fn test_different_seeds_diverge() {
    // Different seeds deal different boards, so identical transcripts
    // would point at a seeding bug.
    assert_ne!(run_session(42), run_session(100));
}
