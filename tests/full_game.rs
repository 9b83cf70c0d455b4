//! Full-session integration tests
//!
//! Drives randomized sessions through the raw engine surface
//! (legal_actions / apply_action / end_of_turn_draw) and asserts the
//! structural invariants continuously, after every mutation.

use forbidden_desert::core::Role;
use forbidden_desert::game::{Action, GameLoop, GameState, RandomPolicy};
use rand::{Rng, SeedableRng};

/// The invariants that must hold after every mutation
fn assert_invariants(game: &GameState) {
    // The global sand counter tracks the per-tile markers exactly
    let sum: u32 = game.board.tiles().map(|t| u32::from(t.sand)).sum();
    assert_eq!(sum, game.board.total_sand, "sand total out of sync");

    // Blocked is derived from sand
    for tile in game.board.tiles() {
        assert_eq!(tile.is_blocked(), tile.sand >= 2);
    }

    // The storm never carries sand
    let storm = game.board.tile(game.board.storm_tile());
    assert_eq!(storm.sand, 0, "storm tile accumulated sand");

    // Water stays within each role's canteen
    for adventurer in &game.adventurers {
        assert!(adventurer.water <= adventurer.role.max_water());
    }

    // The hazard deck is conserved across reshuffles
    assert_eq!(game.hazard_deck.total_cards(), 19);

    // Position bookkeeping stays bijective
    for adventurer in &game.adventurers {
        let tile = game.board.tile(adventurer.tile);
        assert_eq!(game.board.tile_at(tile.coord), Some(adventurer.tile));
    }
}

#[test]
fn test_random_sessions_hold_invariants() {
    for seed in 0..6 {
        let mut game = GameState::new_session(seed);
        game.logger.enable_capture();
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        assert_invariants(&game);

        'session: for _round in 0..40 {
            let order = game.player_order.clone();
            for actor in order {
                if game.adventurer(actor).shield_active {
                    game.adventurer_mut(actor).shield_active = false;
                }

                game.action_points = 4;
                while game.action_points > 0 && game.outcome().is_none() {
                    let legal = game.legal_actions(actor);
                    assert!(legal.contains(&Action::Pass));
                    let action = legal[rng.gen_range(0..legal.len())].clone();
                    if action == Action::Pass {
                        break;
                    }
                    game.apply_action(actor, &action)
                        .expect("listed actions always apply");
                    assert_invariants(&game);
                }

                if game.adventurer(Role::Climber).carrying.is_some() {
                    game.adventurer_mut(Role::Climber).carrying = None;
                }
                if game.outcome().is_some() {
                    break 'session;
                }
                game.end_of_turn_draw();
                assert_invariants(&game);

                if game.outcome().is_some() {
                    break 'session;
                }
            }
        }
    }
}

#[test]
fn test_driven_sessions_terminate_or_cap() {
    for seed in [1, 2, 3] {
        let mut game = GameState::new_session(seed);
        game.logger.enable_capture();
        let mut policy = RandomPolicy::with_seed(seed);

        let result = GameLoop::new(&mut game)
            .with_max_rounds(200)
            .run_game(&mut policy)
            .expect("a driven session never errors");

        assert_invariants(&game);
        assert_eq!(result.outcome, game.outcome());
        assert!(result.turns_taken > 0);
    }
}

#[test]
fn test_session_survives_serde_round_trip_mid_game() {
    let mut game = GameState::new_session(4);
    game.logger.enable_capture();
    let mut policy = RandomPolicy::with_seed(4);
    GameLoop::new(&mut game)
        .with_max_rounds(3)
        .run_game(&mut policy)
        .unwrap();

    let json = serde_json::to_string(&game).expect("session serializes");
    let restored: GameState = serde_json::from_str(&json).expect("session deserializes");
    assert_invariants(&restored);
    assert_eq!(restored.outcome(), game.outcome());
    assert_eq!(restored.board.total_sand, game.board.total_sand);
}
