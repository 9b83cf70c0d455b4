//! Session state and turn structure

pub mod actions;
pub mod controller;
pub mod display;
pub mod game_loop;
pub mod gear;
pub mod hazard;
pub mod logger;
pub mod pathfind;
pub mod random_controller;
pub mod state;

pub use actions::{Action, ActionOutcome};
pub use controller::{ActionPolicy, GameStateView};
pub use game_loop::{GameLoop, GameResult, VerbosityLevel};
pub use gear::{GearCard, GearDeck};
pub use hazard::{HazardCard, HazardDeck};
pub use logger::GameLogger;
pub use random_controller::RandomPolicy;
pub use state::{GameState, Outcome};
