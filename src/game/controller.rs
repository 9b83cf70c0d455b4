//! Action policy trait and game state view
//!
//! This module defines the boundary between the rules engine and the
//! decision maker (AI or human). The engine enumerates the legal
//! actions; the policy inspects a read-only view of the session and
//! picks one of them.

use crate::core::{Role, TileId};
use crate::game::actions::Action;
use crate::game::state::{GameState, Outcome};

/// Read-only view of session state for policies
///
/// Provides the information a decision maker may inspect without
/// allowing mutation.
pub struct GameStateView<'a> {
    game: &'a GameState,
    actor: Role,
}

impl<'a> GameStateView<'a> {
    /// View the session from one adventurer's perspective
    pub fn new(game: &'a GameState, actor: Role) -> Self {
        GameStateView { game, actor }
    }

    pub fn actor(&self) -> Role {
        self.actor
    }

    pub fn water(&self) -> u8 {
        self.game.adventurer(self.actor).water
    }

    pub fn action_points(&self) -> i8 {
        self.game.action_points
    }

    pub fn storm_level(&self) -> u8 {
        self.game.hazard_deck.storm_level
    }

    pub fn total_sand(&self) -> u32 {
        self.game.board.total_sand
    }

    pub fn parts_collected(&self) -> u8 {
        self.game.boat_parts_picked
    }

    pub fn tile_name(&self, tile: TileId) -> &str {
        &self.game.board.tile(tile).name
    }

    /// The name of the tile the acting adventurer stands on
    pub fn current_tile_name(&self) -> &str {
        &self.game.board.tile(self.game.adventurer(self.actor).tile).name
    }
}

/// Decision-maker boundary
///
/// Implement this to plug in an AI or UI. The engine calls
/// `choose_action` with the freshly enumerated legal set; the list is
/// never empty because passing is always legal.
pub trait ActionPolicy {
    /// Pick one of the listed legal actions
    fn choose_action(&mut self, view: &GameStateView, legal: &[Action]) -> Action;

    /// Called once when the session reaches a terminal state
    fn on_game_end(&mut self, _view: &GameStateView, _outcome: Outcome) {}
}
