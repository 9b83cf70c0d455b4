//! Turn and round driver
//!
//! Runs adventurer turns in the fixed player order until the outcome
//! evaluator reports a terminal state (or an external round cap trips).

/// Macro for conditional logging that avoids allocation when the
/// feature is disabled
///
/// With the verbose-logging feature off this compiles to a no-op,
/// eliminating the format! allocations on the hot simulation path.
macro_rules! log_if_verbose {
    ($self:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.game.logger.verbose(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self; // Suppress unused variable warning
        }
    };
}

use crate::core::Role;
use crate::game::actions::Action;
use crate::game::controller::{ActionPolicy, GameStateView};
#[cfg(feature = "verbose-logging")]
use crate::game::display;
use crate::game::state::{GameState, Outcome};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Verbosity level for session output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during the session
    Silent = 0,
    /// Minimal - only the session outcome
    Minimal = 1,
    /// Normal - turns and actions (default)
    #[default]
    Normal = 2,
    /// Verbose - full state snapshot after every action
    Verbose = 3,
}

/// Result of running a session to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// Terminal outcome, or None if the round cap tripped first
    pub outcome: Option<Outcome>,
    /// Rounds played (a round is one turn per adventurer)
    pub rounds_played: u32,
    /// Individual adventurer turns taken
    pub turns_taken: u32,
}

/// Session driver
///
/// Owns the turn structure: per-turn action loop, forced passenger
/// drop, the end-of-turn hazard draw, and round advancement.
pub struct GameLoop<'a> {
    /// The session being driven
    pub game: &'a mut GameState,
    /// External cap for runs that might never terminate
    max_rounds: u32,
}

impl<'a> GameLoop<'a> {
    pub fn new(game: &'a mut GameState) -> Self {
        GameLoop {
            game,
            max_rounds: 1000,
        }
    }

    /// Cap the session at a number of rounds (for testing)
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set the verbosity of the session's logger
    pub fn with_verbosity(self, verbosity: VerbosityLevel) -> Self {
        self.game.logger.set_verbosity(verbosity);
        self
    }

    /// Run turns until a terminal outcome or the round cap
    pub fn run_game(&mut self, policy: &mut dyn ActionPolicy) -> Result<GameResult> {
        let mut turns_taken = 0;
        loop {
            let order = self.game.player_order.clone();
            for actor in order {
                // A solar shield wears off at the start of its
                // owner's own turn.
                if self.game.adventurer(actor).shield_active {
                    self.game.adventurer_mut(actor).shield_active = false;
                    self.game
                        .logger
                        .normal(&format!("{}'s solar shield has worn off", actor));
                }

                let outcome = self.execute_turn(actor, policy)?;
                turns_taken += 1;

                if let Some(outcome) = outcome {
                    self.game.logger.minimal(&format!("Game over: {}", outcome));
                    let view = GameStateView::new(self.game, actor);
                    policy.on_game_end(&view, outcome);
                    return Ok(GameResult {
                        outcome: Some(outcome),
                        rounds_played: self.game.round,
                        turns_taken,
                    });
                }
            }
            self.game.round += 1;
            self.game.turn = 1;

            if self.game.round > self.max_rounds {
                return Ok(GameResult {
                    outcome: None,
                    rounds_played: self.max_rounds,
                    turns_taken,
                });
            }
        }
    }

    /// One adventurer's turn: spend the action budget, then drop any
    /// pending carry and draw from the hazard deck exactly once.
    fn execute_turn(
        &mut self,
        actor: Role,
        policy: &mut dyn ActionPolicy,
    ) -> Result<Option<Outcome>> {
        self.game.action = 1;
        self.game.action_points = 4;
        log_if_verbose!(
            self,
            "--- round {} turn {}: {} ---",
            self.game.round,
            self.game.turn,
            actor
        );

        while self.game.action_points > 0 && self.game.outcome().is_none() {
            let legal = self.game.legal_actions(actor);
            let action = {
                let view = GameStateView::new(self.game, actor);
                policy.choose_action(&view, &legal)
            };
            if action == Action::Pass {
                self.game.logger.normal(&format!("{} passes", actor));
                break;
            }
            self.game.apply_action(actor, &action)?;
            log_if_verbose!(self, "{}", display::render_state(self.game));
        }

        // A pending carry never outlives the turn.
        if self.game.adventurer(Role::Climber).carrying.is_some() {
            self.game.adventurer_mut(Role::Climber).carrying = None;
            self.game
                .logger
                .normal("climber sets their passenger down at turn end");
        }

        // A terminal state reached mid-turn stops the turn outright;
        // no hazard is drawn over a finished game.
        if let Some(outcome) = self.game.outcome() {
            return Ok(Some(outcome));
        }

        self.game.turn += 1;
        self.game.end_of_turn_draw();

        Ok(self.game.outcome())
    }
}
