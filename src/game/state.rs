//! The session aggregate: board, roster, decks, counters

use crate::core::{
    Adventurer, Board, Coordinate, Direction, FlipEffect, Role, TileId, SAND_LIMIT,
};
use crate::game::gear::GearDeck;
use crate::game::hazard::{HazardCard, HazardDeck, STORM_LEVEL_CAP};
use crate::game::logger::GameLogger;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Terminal result of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// All four parts collected and everyone on the unblocked boat
    Won,
    /// An adventurer's water ran out
    LostNoWater,
    /// The board accumulated more than 48 sand
    LostBuried,
    /// The storm level blew past the cap
    LostStormTooStrong,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Won => "the expedition escaped",
            Outcome::LostNoWater => "an adventurer ran out of water",
            Outcome::LostBuried => "the expedition was buried in sand",
            Outcome::LostStormTooStrong => "the storm grew too strong",
        };
        write!(f, "{}", text)
    }
}

/// Complete session state
///
/// The single owned aggregate the engine mutates: board, roster, both
/// decks, the RNG, and the turn counters. All engine entry points take
/// this by reference; nothing lives in globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    /// All six adventurers, in [`Role::ALL`] order
    pub adventurers: Vec<Adventurer>,
    pub hazard_deck: HazardDeck,
    pub gear_deck: GearDeck,
    /// Parts picked up off the board; 4 are needed to escape
    pub boat_parts_picked: u8,
    /// Fixed at session start: least water first, the rest shuffled
    pub player_order: Vec<Role>,

    /// A round is one turn for each adventurer (logging only)
    pub round: u32,
    /// A turn is one adventurer's action-point budget (logging only)
    pub turn: u32,
    /// Costed actions taken within the current turn (logging only)
    pub action: u32,
    /// Remaining budget for the current turn
    pub action_points: i8,

    /// Session RNG: tile placement, shuffles, player order. Serialized
    /// so a restored session continues the same card sequence.
    pub rng: ChaCha12Rng,
    pub logger: GameLogger,
}

impl GameState {
    /// Set up a full session from a seed: tiles dealt, initial sand
    /// laid, adventurers on the start tile, decks shuffled, player
    /// order fixed.
    pub fn new_session(seed: u64) -> Self {
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        let board = Board::new(&mut rng);
        let start = board.tile_named("start").expect("board has a start tile");
        let adventurers = Role::ALL
            .iter()
            .map(|&role| Adventurer::new(role, start))
            .collect();
        let hazard_deck = HazardDeck::new(&mut rng);
        let gear_deck = GearDeck::new(&mut rng);

        let mut state = GameState {
            board,
            adventurers,
            hazard_deck,
            gear_deck,
            boat_parts_picked: 0,
            player_order: Vec::new(),
            round: 1,
            turn: 1,
            action: 1,
            action_points: 4,
            rng,
            logger: GameLogger::new(),
        };
        state.set_player_order();
        state
    }

    pub fn adventurer(&self, role: Role) -> &Adventurer {
        self.adventurers
            .iter()
            .find(|a| a.role == role)
            .expect("all six roles exist")
    }

    pub fn adventurer_mut(&mut self, role: Role) -> &mut Adventurer {
        self.adventurers
            .iter_mut()
            .find(|a| a.role == role)
            .expect("all six roles exist")
    }

    /// Everyone standing on a tile, in roster order
    pub fn adventurers_on(&self, tile: TileId) -> SmallVec<[Role; 6]> {
        self.adventurers
            .iter()
            .filter(|a| a.tile == tile)
            .map(|a| a.role)
            .collect()
    }

    pub fn coord_of(&self, role: Role) -> Coordinate {
        self.board.tile(self.adventurer(role).tile).coord
    }

    /// Unit steps legal for `role` standing at `from`
    ///
    /// Evaluated against a hypothetical position so the navigator's
    /// path search can probe the passenger's legality mid-path. The
    /// storm is never a destination; blocked tiles bar everyone but the
    /// climber, who is also the only role that can leave a blocked tile.
    pub fn legal_moves_at(&self, role: Role, from: Coordinate) -> SmallVec<[Direction; 8]> {
        let mut moves = SmallVec::new();
        let here = self
            .board
            .tile_at(from)
            .expect("every board coordinate is occupied");
        if !role.ignores_blocked() && self.board.tile(here).is_blocked() {
            return moves;
        }
        for &direction in role.directions() {
            let Some(next) = from.step(direction) else {
                continue;
            };
            let id = self
                .board
                .tile_at(next)
                .expect("every board coordinate is occupied");
            let tile = self.board.tile(id);
            if tile.is_storm() {
                continue;
            }
            if tile.is_blocked() && !role.ignores_blocked() {
                continue;
            }
            moves.push(direction);
        }
        moves
    }

    /// Tiles `role` may currently clear sand from
    ///
    /// A buried adventurer can only dig out their own tile. Otherwise:
    /// the own tile whenever it has sand, plus adjacent (per the role's
    /// pattern) sanded tiles that are neither the storm nor blocked —
    /// blocked tiles are un-clearable from the outside.
    pub fn sand_targets(&self, role: Role) -> Vec<TileId> {
        let own = self.adventurer(role).tile;
        let here = self.board.tile(own);
        if here.is_blocked() {
            return vec![own];
        }

        let mut targets = Vec::new();
        if here.sand > 0 {
            targets.push(own);
        }
        for &direction in role.directions() {
            let Some(next) = here.coord.step(direction) else {
                continue;
            };
            let id = self
                .board
                .tile_at(next)
                .expect("every board coordinate is occupied");
            let tile = self.board.tile(id);
            if !tile.is_storm() && tile.sand > 0 && !tile.is_blocked() {
                targets.push(id);
            }
        }
        targets
    }

    /// Put an adventurer on a tile (no passenger handling)
    pub fn relocate_adventurer(&mut self, role: Role, dest: TileId) {
        self.adventurer_mut(role).tile = dest;
    }

    /// Flip a tile underneath `actor` and apply its one-time effect.
    /// Returns a summary line for the action log.
    pub fn resolve_flip(&mut self, actor: Role, tile: TileId) -> String {
        let name = self.board.tile(tile).name.clone();
        match self.board.flip(tile) {
            FlipEffect::Nothing => format!("{} flips {}: nothing underneath", actor, name),
            FlipEffect::WaterRevealed => {
                for role in self.adventurers_on(tile) {
                    let adventurer = self.adventurer_mut(role);
                    adventurer.gain_water();
                    adventurer.gain_water();
                }
                format!("{} flips {}: the well flows for everyone here", actor, name)
            }
            FlipEffect::GearFound => match self.gear_deck.draw() {
                Some(card) => {
                    self.adventurer_mut(actor).inventory.push(card);
                    format!("{} flips {} and finds a {}", actor, name, card)
                }
                None => format!("{} flips {}: the gear supply is exhausted", actor, name),
            },
            FlipEffect::PartLocated { part, appeared_at } => match appeared_at {
                Some(at) => {
                    let at_name = &self.board.tile(at).name;
                    format!("{} flips {}: the {} appears at {}", actor, name, part, at_name)
                }
                None => format!("{} flips {}: half of the {} clue", actor, name, part),
            },
        }
    }

    /// Apply one hazard card to the session
    pub fn apply_hazard_card(&mut self, card: &HazardCard) {
        match card {
            HazardCard::Storm { moves } => {
                // Each step works from the storm's position as moved by
                // the previous step.
                for &step in moves {
                    let storm = self.board.storm_tile();
                    let from = self.board.tile(storm).coord;
                    let Some(next) = from.step(step) else {
                        continue;
                    };
                    let target = self
                        .board
                        .tile_at(next)
                        .expect("every board coordinate is occupied");
                    self.board.add_sand(target);
                    for role in self.adventurers_on(target) {
                        self.adventurer_mut(role).lose_water();
                    }
                    let displaced = self.board.swap(storm, target);
                    for part in displaced {
                        let resting = &self.board.tile(target).name;
                        self.logger
                            .normal(&format!("the {} is now on {}", part, resting));
                    }
                }
            }
            HazardCard::SunBeatsDown => {
                for i in 0..self.adventurers.len() {
                    let tile = self.adventurers[i].tile;
                    let sheltered = self.board.tile(tile).shelters_from_sun();
                    if !sheltered && !self.adventurers[i].shield_active {
                        self.adventurers[i].lose_water();
                    }
                }
            }
            HazardCard::StormPicksUp => {
                self.hazard_deck.escalate();
                let next = self.hazard_deck.scheduled_draws();
                self.logger.normal(&format!(
                    "storm level: {}. Next turn draws {} cards",
                    self.hazard_deck.storm_level,
                    next.map_or_else(|| "no".to_string(), |n| n.to_string()),
                ));
            }
        }
    }

    /// The end-of-turn hazard draw: one draw per adventurer turn
    ///
    /// Loses immediately (without drawing) once the storm level is past
    /// the cap. Stops early if a card ends the game mid-draw. Consumes
    /// the meteorologist's banked mitigation.
    pub fn end_of_turn_draw(&mut self) {
        if let Some(amount) = self.hazard_deck.effective_draws() {
            for _ in 0..amount {
                let card = self.hazard_deck.draw_one(&mut self.rng);
                self.logger.normal(&format!("hazard: {}", card));
                self.apply_hazard_card(&card);
                if self.outcome().is_some() {
                    break;
                }
            }
        }
        self.hazard_deck.reset_mitigation();
    }

    /// Check the terminal conditions, losses before the win
    pub fn outcome(&self) -> Option<Outcome> {
        if self.adventurers.iter().any(|a| a.water == 0) {
            return Some(Outcome::LostNoWater);
        }
        if self.board.total_sand > SAND_LIMIT {
            return Some(Outcome::LostBuried);
        }
        if self.hazard_deck.storm_level > STORM_LEVEL_CAP {
            return Some(Outcome::LostStormTooStrong);
        }
        let boat = self.board.boat_tile();
        if self.boat_parts_picked == 4
            && !self.board.tile(boat).is_blocked()
            && self.adventurers.iter().all(|a| a.tile == boat)
        {
            return Some(Outcome::Won);
        }
        None
    }

    /// Fix the turn order for the session: the adventurer with the
    /// least water goes first (random among ties), the rest shuffled.
    fn set_player_order(&mut self) {
        let min_water = self
            .adventurers
            .iter()
            .map(|a| a.water)
            .min()
            .expect("roster is non-empty");
        let thirsty: Vec<Role> = self
            .adventurers
            .iter()
            .filter(|a| a.water == min_water)
            .map(|a| a.role)
            .collect();
        let first = thirsty[self.rng.gen_range(0..thirsty.len())];

        let mut rest: Vec<Role> = Role::ALL.iter().copied().filter(|&r| r != first).collect();
        rest.shuffle(&mut self.rng);

        self.player_order = std::iter::once(first).chain(rest).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TileKind;
    use smallvec::smallvec;

    fn session() -> GameState {
        GameState::new_session(42)
    }

    #[test]
    fn test_setup_roster() {
        let state = session();
        assert_eq!(state.adventurers.len(), 6);
        let start = state.board.tile_named("start").unwrap();
        assert!(state.adventurers.iter().all(|a| a.tile == start));
        assert_eq!(state.adventurer(Role::WaterCarrier).water, 5);
        assert_eq!(state.adventurer(Role::Archeologist).water, 3);
    }

    #[test]
    fn test_player_order_starts_thirsty() {
        let state = session();
        assert_eq!(state.player_order.len(), 6);
        let first = state.player_order[0];
        // Archeologist and climber start with the least water (3)
        assert!(matches!(first, Role::Archeologist | Role::Climber));
    }

    #[test]
    fn test_storm_never_a_destination() {
        let state = session();
        let storm_coord = state.board.tile(state.board.storm_tile()).coord;
        // From just east of the storm, west must not be offered
        let from = Coordinate::new(storm_coord.x + 1, storm_coord.y);
        let moves = state.legal_moves_at(Role::Navigator, from);
        assert!(!moves.contains(&Direction::West));
    }

    #[test]
    fn test_blocked_tile_bars_all_but_climber() {
        let mut state = session();
        let storm_coord = state.board.tile(state.board.storm_tile()).coord;
        let east = Coordinate::new(storm_coord.x + 1, storm_coord.y);
        let east_id = state.board.tile_at(east).unwrap();
        state.board.add_sand(east_id);
        state.board.add_sand(east_id);

        let from = Coordinate::new(east.x + 1, east.y);
        assert!(!state
            .legal_moves_at(Role::Navigator, from)
            .contains(&Direction::West));
        assert!(state
            .legal_moves_at(Role::Climber, from)
            .contains(&Direction::West));
    }

    #[test]
    fn test_buried_adventurer_digs_own_tile_only() {
        let mut state = session();
        let own = state.adventurer(Role::Archeologist).tile;
        state.board.blast_sand(own);
        state.board.add_sand(own);
        state.board.add_sand(own);

        assert_eq!(state.sand_targets(Role::Archeologist), vec![own]);
        assert!(state
            .legal_moves_at(Role::Archeologist, state.coord_of(Role::Archeologist))
            .is_empty());
    }

    #[test]
    fn test_storm_swap_example() {
        // The storm sits at (2,2); a single east step must bury the
        // tile at (3,2), dehydrate its occupants, and transpose the
        // coordinate map.
        let mut state = session();
        let storm = state.board.storm_tile();
        assert_eq!(state.board.tile(storm).coord, Coordinate::new(2, 2));

        let target = state.board.tile_at(Coordinate::new(3, 2)).unwrap();
        state.relocate_adventurer(Role::Explorer, target);
        let water_before = state.adventurer(Role::Explorer).water;
        let sand_before = state.board.tile(target).sand;

        state.apply_hazard_card(&HazardCard::Storm {
            moves: smallvec![Direction::East],
        });

        assert_eq!(state.board.tile(target).sand, sand_before + 1);
        assert_eq!(state.adventurer(Role::Explorer).water, water_before - 1);
        assert_eq!(state.board.tile_at(Coordinate::new(3, 2)), Some(storm));
        assert_eq!(state.board.tile_at(Coordinate::new(2, 2)), Some(target));
    }

    #[test]
    fn test_storm_steps_are_sequential() {
        let mut state = session();
        let storm = state.board.storm_tile();

        state.apply_hazard_card(&HazardCard::Storm {
            moves: smallvec![Direction::North; 3],
        });

        // Three north steps from the center: (2,2) -> (2,1) -> (2,0),
        // third step leaves the board and is skipped.
        assert_eq!(state.board.tile(storm).coord, Coordinate::new(2, 0));
    }

    #[test]
    fn test_sun_beats_down_respects_shelter_and_shield() {
        let mut state = session();
        let tunnel = state.board.tile_named("tunnel_1").unwrap();
        state.board.flip(tunnel);
        state.relocate_adventurer(Role::Explorer, tunnel);
        state.adventurer_mut(Role::Navigator).shield_active = true;

        let explorer_before = state.adventurer(Role::Explorer).water;
        let navigator_before = state.adventurer(Role::Navigator).water;
        let climber_before = state.adventurer(Role::Climber).water;

        state.apply_hazard_card(&HazardCard::SunBeatsDown);

        assert_eq!(state.adventurer(Role::Explorer).water, explorer_before);
        assert_eq!(state.adventurer(Role::Navigator).water, navigator_before);
        assert_eq!(state.adventurer(Role::Climber).water, climber_before - 1);
    }

    #[test]
    fn test_shield_is_individual_not_tile_wide() {
        let mut state = session();
        // Climber and navigator share the start tile; only the
        // navigator holds a shield.
        state.adventurer_mut(Role::Navigator).shield_active = true;
        let climber_before = state.adventurer(Role::Climber).water;

        state.apply_hazard_card(&HazardCard::SunBeatsDown);

        assert_eq!(state.adventurer(Role::Climber).water, climber_before - 1);
    }

    #[test]
    fn test_water_tile_flip_waters_everyone_present() {
        let mut state = session();
        let well = state.board.tile_named("water_1").unwrap();
        state.relocate_adventurer(Role::Archeologist, well);
        state.relocate_adventurer(Role::Climber, well);
        state.adventurer_mut(Role::Archeologist).water = 1;
        state.adventurer_mut(Role::Climber).water = 1;

        state.resolve_flip(Role::Archeologist, well);

        assert_eq!(state.adventurer(Role::Archeologist).water, 3);
        assert_eq!(state.adventurer(Role::Climber).water, 3);
        // Flipping again grants nothing
        state.adventurer_mut(Role::Archeologist).water = 1;
        state.resolve_flip(Role::Archeologist, well);
        assert_eq!(state.adventurer(Role::Archeologist).water, 1);
    }

    #[test]
    fn test_gear_tile_flip_draws_for_the_actor() {
        let mut state = session();
        let dune = state.board.tile_named("dune_1").unwrap();
        state.relocate_adventurer(Role::Navigator, dune);
        let remaining = state.gear_deck.remaining();

        state.resolve_flip(Role::Navigator, dune);

        assert_eq!(state.gear_deck.remaining(), remaining - 1);
        assert_eq!(state.adventurer(Role::Navigator).inventory.len(), 1);
    }

    #[test]
    fn test_outcome_losses() {
        let mut state = session();
        assert_eq!(state.outcome(), None);

        state.adventurer_mut(Role::Explorer).water = 0;
        assert_eq!(state.outcome(), Some(Outcome::LostNoWater));
        state.adventurer_mut(Role::Explorer).water = 2;

        let dune = state.board.tile_named("dune_2").unwrap();
        while state.board.total_sand <= SAND_LIMIT {
            state.board.add_sand(dune);
        }
        assert_eq!(state.outcome(), Some(Outcome::LostBuried));
        state.board.blast_sand(dune);

        state.hazard_deck.storm_level = 16;
        assert_eq!(state.outcome(), Some(Outcome::LostStormTooStrong));
    }

    #[test]
    fn test_outcome_win() {
        let mut state = session();
        state.boat_parts_picked = 4;
        let boat = state.board.boat_tile();
        for role in Role::ALL {
            state.relocate_adventurer(role, boat);
        }
        assert_eq!(state.outcome(), Some(Outcome::Won));

        // A blocked boat cannot be boarded for the escape
        state.board.add_sand(boat);
        state.board.add_sand(boat);
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn test_level_sixteen_loses_before_drawing() {
        let mut state = session();
        state.hazard_deck.storm_level = 16;
        let total = state.hazard_deck.total_cards();
        let discarded_before = total - state.hazard_deck.draw_pile_len();

        state.end_of_turn_draw();

        assert_eq!(state.outcome(), Some(Outcome::LostStormTooStrong));
        assert_eq!(
            state.hazard_deck.total_cards() - state.hazard_deck.draw_pile_len(),
            discarded_before
        );
    }

    #[test]
    fn test_session_serialization_round_trip() {
        let state = session();
        let json = serde_json::to_string(&state).expect("session serializes");
        let restored: GameState = serde_json::from_str(&json).expect("session deserializes");
        assert_eq!(restored.board.total_sand, state.board.total_sand);
        assert_eq!(restored.player_order, state.player_order);
        assert_eq!(
            restored.adventurer(Role::Explorer).water,
            state.adventurer(Role::Explorer).water
        );
    }

    #[test]
    fn test_tile_kinds_census() {
        let state = session();
        let count = |kind: fn(&TileKind) -> bool| {
            state.board.tiles().filter(|t| kind(&t.kind)).count()
        };
        assert_eq!(count(|k| matches!(k, TileKind::Tunnel)), 3);
        assert_eq!(count(|k| matches!(k, TileKind::Gear)), 8);
        assert_eq!(count(|k| matches!(k, TileKind::PartHalf { .. })), 8);
        assert_eq!(count(|k| matches!(k, TileKind::Water)), 2);
    }
}
