//! Uniform-random action policy
//!
//! Picks uniformly from the legal set. Serves as the default policy and
//! as a baseline for anything smarter.

use crate::game::actions::Action;
use crate::game::controller::{ActionPolicy, GameStateView};
use rand::Rng;

/// A policy that makes uniform-random choices
pub struct RandomPolicy {
    rng: Box<dyn rand::RngCore>,
}

impl RandomPolicy {
    /// Create a random policy with a default RNG
    pub fn new() -> Self {
        RandomPolicy {
            rng: Box::new(rand::thread_rng()),
        }
    }

    /// Create a random policy with a seeded RNG (for deterministic runs)
    pub fn with_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        RandomPolicy {
            rng: Box::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionPolicy for RandomPolicy {
    fn choose_action(&mut self, _view: &GameStateView, legal: &[Action]) -> Action {
        let index = self.rng.gen_range(0..legal.len());
        legal[index].clone()
    }
}
