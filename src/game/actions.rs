//! Legal-action enumeration and resolution
//!
//! The legal-action list is the single source of truth: enumeration and
//! application are kept exactly in sync, so applying a listed action
//! never fails and applying an unlisted one is a hard error.

use crate::core::{Direction, PartKind, Role, TileId, TileKind};
use crate::game::gear::GearCard;
use crate::game::pathfind::{escort_paths, EscortPath};
use crate::game::GameState;
use crate::{DesertError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// One thing an adventurer can do with (part of) their turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// End the turn early; always available
    Pass,
    /// Step onto an adjacent tile
    Move(Direction),
    /// Flip the tile stood on (must be sand-free and unflipped)
    Flip,
    /// Remove one sand marker from an accessible tile
    ClearSand(TileId),
    /// Archeologist: remove two sand markers in one action
    Excavate(TileId),
    /// Water carrier: draw 2 water from the flipped well stood on
    DrawWater,
    /// Navigator: walk another adventurer up to 3 steps
    Escort {
        passenger: Role,
        destination: TileId,
        steps: SmallVec<[Direction; 3]>,
    },
    /// Meteorologist: reduce the coming hazard draw by one card
    Mitigate,
    /// Climber: shoulder a co-located adventurer
    PickUpAdventurer(Role),
    /// Climber: set the carried adventurer down
    DropOffAdventurer,
    /// Collect a part token from the tile stood on
    PickUpPart(PartKind),
    /// Hand an item to a co-located adventurer
    GiveItem { to: Role, item: GearCard },
    /// Pour one water into a co-located adventurer's canteen
    GiveWater { to: Role },
    /// Travel between flipped tunnels
    UseTunnel(TileId),
    UseDuneBlaster { holder: Role, target: TileId },
    UseJetPack { holder: Role, destination: TileId },
    UseTerrascope { holder: Role, target: TileId },
    UseSolarShield { holder: Role },
    UseSecretWaterReserve { holder: Role },
    /// Refunds two action points; usable only from the actor's own
    /// inventory
    UseTimeThrottle,
}

impl Action {
    /// Action-point cost: most actions cost 1, helping hands are free,
    /// the time throttle refunds 2.
    pub fn cost(&self) -> i8 {
        match self {
            Action::Pass
            | Action::PickUpAdventurer(_)
            | Action::DropOffAdventurer
            | Action::GiveItem { .. }
            | Action::GiveWater { .. }
            | Action::UseDuneBlaster { .. }
            | Action::UseJetPack { .. }
            | Action::UseTerrascope { .. }
            | Action::UseSolarShield { .. }
            | Action::UseSecretWaterReserve { .. } => 0,
            Action::UseTimeThrottle => -2,
            Action::Move(_)
            | Action::Flip
            | Action::ClearSand(_)
            | Action::Excavate(_)
            | Action::DrawWater
            | Action::Escort { .. }
            | Action::Mitigate
            | Action::PickUpPart(_)
            | Action::UseTunnel(_) => 1,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Pass => write!(f, "pass"),
            Action::Move(d) => write!(f, "move {}", d),
            Action::Flip => write!(f, "flip"),
            Action::ClearSand(t) => write!(f, "clear sand (tile {})", t),
            Action::Excavate(t) => write!(f, "excavate (tile {})", t),
            Action::DrawWater => write!(f, "draw water"),
            Action::Escort {
                passenger,
                destination,
                steps,
            } => write!(
                f,
                "escort {} {} steps to tile {}",
                passenger,
                steps.len(),
                destination
            ),
            Action::Mitigate => write!(f, "mitigate the coming storm"),
            Action::PickUpAdventurer(r) => write!(f, "pick up {}", r),
            Action::DropOffAdventurer => write!(f, "drop off passenger"),
            Action::PickUpPart(p) => write!(f, "pick up the {}", p),
            Action::GiveItem { to, item } => write!(f, "give {} to {}", item, to),
            Action::GiveWater { to } => write!(f, "give water to {}", to),
            Action::UseTunnel(t) => write!(f, "travel to tunnel (tile {})", t),
            Action::UseDuneBlaster { holder, target } => {
                write!(f, "{} fires the dune blaster at tile {}", holder, target)
            }
            Action::UseJetPack {
                holder,
                destination,
            } => write!(f, "{} jets to tile {}", holder, destination),
            Action::UseTerrascope { holder, target } => {
                write!(f, "{} scopes tile {}", holder, target)
            }
            Action::UseSolarShield { holder } => write!(f, "{} raises a solar shield", holder),
            Action::UseSecretWaterReserve { holder } => {
                write!(f, "{} opens the secret water reserve", holder)
            }
            Action::UseTimeThrottle => write!(f, "use the time throttle"),
        }
    }
}

/// Effect summary returned by [`GameState::apply_action`] for logging
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    /// Action points spent (negative for a refund)
    pub cost: i8,
    pub summary: String,
}

/// Gear kinds held, first copy wins; keeps the enumeration free of
/// duplicate identical actions when someone holds two of a kind.
fn held_kinds(inventory: &[GearCard]) -> SmallVec<[GearCard; 6]> {
    let mut kinds = SmallVec::new();
    for &card in inventory {
        if !kinds.contains(&card) {
            kinds.push(card);
        }
    }
    kinds
}

impl GameState {
    /// Enumerate every action `actor` may legally take right now
    pub fn legal_actions(&self, actor: Role) -> Vec<Action> {
        let mut actions = Vec::new();
        let here = self.adventurer(actor).tile;
        let here_tile = self.board.tile(here);

        // Adventurers take UP TO four actions, so passing is always on
        // the table.
        actions.push(Action::Pass);

        for direction in self.legal_moves_at(actor, here_tile.coord) {
            actions.push(Action::Move(direction));
        }

        if !here_tile.flipped && here_tile.sand == 0 {
            actions.push(Action::Flip);
        }

        for target in self.sand_targets(actor) {
            actions.push(Action::ClearSand(target));
        }

        if self.adventurer(actor).has_item(GearCard::TimeThrottle) {
            actions.push(Action::UseTimeThrottle);
        }

        // Gear can be used on anyone's behalf during this turn.
        for holder in Role::ALL {
            for item in held_kinds(&self.adventurer(holder).inventory) {
                match item {
                    GearCard::JetPack => {
                        for tile in self.board.tiles() {
                            if !tile.is_blocked() && !tile.is_storm() {
                                actions.push(Action::UseJetPack {
                                    holder,
                                    destination: tile.id,
                                });
                            }
                        }
                    }
                    GearCard::Terrascope => {
                        for tile in self.board.tiles() {
                            if !tile.flipped && !tile.is_storm() {
                                actions.push(Action::UseTerrascope {
                                    holder,
                                    target: tile.id,
                                });
                            }
                        }
                    }
                    GearCard::DuneBlaster => {
                        for target in self.sand_targets(holder) {
                            actions.push(Action::UseDuneBlaster { holder, target });
                        }
                    }
                    GearCard::SolarShield => {
                        actions.push(Action::UseSolarShield { holder });
                    }
                    GearCard::SecretWaterReserve => {
                        actions.push(Action::UseSecretWaterReserve { holder });
                    }
                    // Refund only makes sense for the turn being played
                    GearCard::TimeThrottle => {}
                }
            }
        }

        match actor {
            Role::Archeologist => {
                for target in self.sand_targets(actor) {
                    actions.push(Action::Excavate(target));
                }
            }
            Role::WaterCarrier => {
                if here_tile.flipped
                    && here_tile.kind == TileKind::Water
                    && !here_tile.is_blocked()
                {
                    actions.push(Action::DrawWater);
                }
            }
            Role::Navigator => {
                for passenger in Role::ALL {
                    if passenger == Role::Navigator {
                        continue;
                    }
                    for EscortPath { destination, steps } in escort_paths(self, passenger) {
                        actions.push(Action::Escort {
                            passenger,
                            destination,
                            steps,
                        });
                    }
                }
            }
            Role::Climber => {
                if self.adventurer(actor).carrying.is_none() {
                    for other in self.adventurers_on(here) {
                        if other != actor {
                            actions.push(Action::PickUpAdventurer(other));
                        }
                    }
                } else {
                    actions.push(Action::DropOffAdventurer);
                }
            }
            Role::Meteorologist => {
                if let Some(amount) = self.hazard_deck.scheduled_draws() {
                    if self.hazard_deck.mitigated < amount {
                        actions.push(Action::Mitigate);
                    }
                }
            }
            Role::Explorer => {}
        }

        if here_tile.flipped && !here_tile.is_blocked() {
            for &part in &here_tile.parts {
                actions.push(Action::PickUpPart(part));
            }
        }

        let actor_state = self.adventurer(actor);
        for other in self.adventurers_on(here) {
            if other == actor {
                continue;
            }
            for item in held_kinds(&actor_state.inventory) {
                actions.push(Action::GiveItem { to: other, item });
            }
            if actor_state.water > 0 {
                let receiver = self.adventurer(other);
                if receiver.water < receiver.role.max_water() {
                    actions.push(Action::GiveWater { to: other });
                }
            }
        }

        if here_tile.shelters_from_sun() && !here_tile.is_blocked() {
            for tile in self.board.tiles() {
                if tile.id != here && tile.shelters_from_sun() && !tile.is_blocked() {
                    actions.push(Action::UseTunnel(tile.id));
                }
            }
        }

        actions
    }

    /// Apply one action, mutating the session and deducting its cost
    ///
    /// The action must come from the current [`legal_actions`] list;
    /// anything else is a caller bug and returns
    /// [`DesertError::IllegalAction`].
    ///
    /// [`legal_actions`]: GameState::legal_actions
    pub fn apply_action(&mut self, actor: Role, action: &Action) -> Result<ActionOutcome> {
        if !self.legal_actions(actor).contains(action) {
            return Err(DesertError::IllegalAction(format!(
                "{} cannot {}",
                actor, action
            )));
        }

        let summary = match action {
            Action::Pass => format!("{} passes", actor),
            Action::Move(direction) => {
                let from = self.coord_of(actor);
                let next = from.step(*direction).expect("legal move stays on the board");
                let dest = self
                    .board
                    .tile_at(next)
                    .expect("every board coordinate is occupied");
                self.relocate_adventurer(actor, dest);
                // A carried adventurer walks wherever the climber walks
                if actor == Role::Climber {
                    if let Some(passenger) = self.adventurer(actor).carrying {
                        self.relocate_adventurer(passenger, dest);
                    }
                }
                format!("{} moves {} to {}", actor, direction, self.board.tile(dest).name)
            }
            Action::Flip => {
                let here = self.adventurer(actor).tile;
                self.resolve_flip(actor, here)
            }
            Action::ClearSand(target) => {
                self.board.remove_sand(*target);
                format!("{} clears sand from {}", actor, self.board.tile(*target).name)
            }
            Action::Excavate(target) => {
                self.board.remove_sand(*target);
                self.board.remove_sand(*target);
                format!("{} excavates {}", actor, self.board.tile(*target).name)
            }
            Action::DrawWater => {
                let adventurer = self.adventurer_mut(actor);
                adventurer.gain_water();
                adventurer.gain_water();
                format!("{} draws water from the well", actor)
            }
            Action::Escort {
                passenger,
                destination,
                steps,
            } => {
                self.replay_escort(*passenger, steps)?;
                debug_assert_eq!(self.adventurer(*passenger).tile, *destination);
                format!(
                    "{} escorts {} to {}",
                    actor,
                    passenger,
                    self.board.tile(*destination).name
                )
            }
            Action::Mitigate => {
                self.hazard_deck.mitigate();
                format!(
                    "{} mitigates the coming draw ({} card(s) held back)",
                    actor, self.hazard_deck.mitigated
                )
            }
            Action::PickUpAdventurer(other) => {
                self.adventurer_mut(actor).carrying = Some(*other);
                format!("{} picks up {}", actor, other)
            }
            Action::DropOffAdventurer => {
                self.adventurer_mut(actor).carrying = None;
                format!("{} drops off their passenger", actor)
            }
            Action::PickUpPart(part) => {
                let here = self.adventurer(actor).tile;
                let tile = self.board.tile_mut(here);
                let pos = tile
                    .parts
                    .iter()
                    .position(|p| p == part)
                    .expect("listed part rests on the tile");
                tile.parts.remove(pos);
                self.adventurer_mut(actor).boat_parts.push(*part);
                self.boat_parts_picked += 1;
                format!(
                    "{} picks up the {} ({}/4 collected)",
                    actor, part, self.boat_parts_picked
                )
            }
            Action::GiveItem { to, item } => {
                let card = self
                    .adventurer_mut(actor)
                    .take_item(*item)
                    .expect("listed item is held");
                self.adventurer_mut(*to).inventory.push(card);
                format!("{} gives the {} to {}", actor, item, to)
            }
            Action::GiveWater { to } => {
                self.adventurer_mut(actor).lose_water();
                self.adventurer_mut(*to).gain_water();
                format!("{} gives water to {}", actor, to)
            }
            Action::UseTunnel(dest) => {
                self.relocate_adventurer(actor, *dest);
                format!("{} travels through to {}", actor, self.board.tile(*dest).name)
            }
            Action::UseDuneBlaster { holder, target } => {
                self.adventurer_mut(*holder)
                    .take_item(GearCard::DuneBlaster)
                    .expect("listed item is held");
                self.board.blast_sand(*target);
                format!(
                    "{} blasts every sand marker off {}",
                    holder, self.board.tile(*target).name
                )
            }
            Action::UseJetPack {
                holder,
                destination,
            } => {
                self.adventurer_mut(*holder)
                    .take_item(GearCard::JetPack)
                    .expect("listed item is held");
                self.relocate_adventurer(*holder, *destination);
                format!("{} jets to {}", holder, self.board.tile(*destination).name)
            }
            Action::UseTerrascope { holder, target } => {
                self.adventurer_mut(*holder)
                    .take_item(GearCard::Terrascope)
                    .expect("listed item is held");
                format!(
                    "{} scopes the tile at {}: it is {}",
                    holder,
                    self.board.tile(*target).coord,
                    self.board.tile(*target).name
                )
            }
            Action::UseSolarShield { holder } => {
                self.adventurer_mut(*holder)
                    .take_item(GearCard::SolarShield)
                    .expect("listed item is held");
                self.adventurer_mut(*holder).shield_active = true;
                format!("{} shelters under the solar shield", holder)
            }
            Action::UseSecretWaterReserve { holder } => {
                self.adventurer_mut(*holder)
                    .take_item(GearCard::SecretWaterReserve)
                    .expect("listed item is held");
                let here = self.adventurer(*holder).tile;
                for role in self.adventurers_on(here) {
                    let adventurer = self.adventurer_mut(role);
                    adventurer.gain_water();
                    adventurer.gain_water();
                }
                format!("{} opens the secret water reserve", holder)
            }
            Action::UseTimeThrottle => {
                self.adventurer_mut(actor)
                    .take_item(GearCard::TimeThrottle)
                    .expect("listed item is held");
                format!("{} bends time for two extra actions", actor)
            }
        };

        let cost = action.cost();
        if cost > 0 {
            self.action += 1;
        }
        self.action_points -= cost;
        self.logger.normal(&summary);

        Ok(ActionOutcome { cost, summary })
    }

    /// Walk an escorted passenger along a recorded path, one validated
    /// step at a time.
    fn replay_escort(&mut self, passenger: Role, steps: &[Direction]) -> Result<()> {
        for &step in steps {
            let from = self.coord_of(passenger);
            let legal = self.legal_moves_at(passenger, from);
            if !legal.contains(&step) {
                return Err(DesertError::IllegalAction(format!(
                    "escort step {} is not legal for {} at {}",
                    step, passenger, from
                )));
            }
            let next = from.step(step).expect("legal move stays on the board");
            let dest = self
                .board
                .tile_at(next)
                .expect("every board coordinate is occupied");
            self.relocate_adventurer(passenger, dest);
        }
        Ok(())
    }
}
