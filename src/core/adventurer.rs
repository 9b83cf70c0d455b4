//! Adventurer roster: roles, water bookkeeping, inventory

use crate::core::tile::{Direction, PartKind, TileId};
use crate::game::gear::GearCard;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six fixed expedition roles
///
/// Roles differ in carrying capacity, movement/sand-access pattern and
/// special ability; the set is closed, so behavior dispatches through
/// exhaustive matches rather than trait objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Archeologist,
    Climber,
    Explorer,
    Meteorologist,
    Navigator,
    WaterCarrier,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Archeologist,
        Role::Climber,
        Role::Explorer,
        Role::Meteorologist,
        Role::Navigator,
        Role::WaterCarrier,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Role::Archeologist => "archeologist",
            Role::Climber => "climber",
            Role::Explorer => "explorer",
            Role::Meteorologist => "meteorologist",
            Role::Navigator => "navigator",
            Role::WaterCarrier => "water_carrier",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Role::Archeologist => "A",
            Role::Climber => "C",
            Role::Explorer => "E",
            Role::Meteorologist => "Mt",
            Role::Navigator => "N",
            Role::WaterCarrier => "WC",
        }
    }

    /// Canteen capacity; water is clamped to `[0, max_water]`
    pub fn max_water(self) -> u8 {
        match self {
            Role::Archeologist | Role::Climber => 3,
            Role::Explorer | Role::Meteorologist | Role::Navigator => 4,
            Role::WaterCarrier => 5,
        }
    }

    /// Unit steps this role may take; the explorer also moves and digs
    /// diagonally.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Role::Explorer => &Direction::ALL,
            _ => &Direction::CARDINAL[..],
        }
    }

    /// The climber walks into (and out of) blocked tiles
    pub fn ignores_blocked(self) -> bool {
        self == Role::Climber
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One member of the expedition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adventurer {
    pub role: Role,
    /// The tile currently stood on; kept consistent with the board
    pub tile: TileId,
    pub water: u8,
    /// Unordered multiset of held gear cards
    pub inventory: Vec<GearCard>,
    /// Boat parts picked up by this adventurer
    pub boat_parts: Vec<PartKind>,
    /// Active until the start of this adventurer's own next turn
    pub shield_active: bool,
    /// Climber only: the co-located adventurer being carried
    pub carrying: Option<Role>,
}

impl Adventurer {
    pub fn new(role: Role, start: TileId) -> Self {
        Adventurer {
            role,
            tile: start,
            water: role.max_water(),
            inventory: Vec::new(),
            boat_parts: Vec::new(),
            shield_active: false,
            carrying: None,
        }
    }

    /// Gain one water, capped at the role's canteen size
    pub fn gain_water(&mut self) {
        if self.water < self.role.max_water() {
            self.water += 1;
        }
    }

    /// Lose one water, floored at zero (zero is a loss condition,
    /// checked by the outcome evaluator)
    pub fn lose_water(&mut self) {
        self.water = self.water.saturating_sub(1);
    }

    pub fn has_item(&self, item: GearCard) -> bool {
        self.inventory.contains(&item)
    }

    /// Remove one copy of an item from the inventory
    pub fn take_item(&mut self, item: GearCard) -> Option<GearCard> {
        let pos = self.inventory.iter().position(|&i| i == item)?;
        Some(self.inventory.remove(pos))
    }
}

impl fmt::Display for Adventurer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}/{} water",
            self.role.name(),
            self.role.symbol(),
            self.water,
            self.role.max_water()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_clamps_to_role_max() {
        let mut climber = Adventurer::new(Role::Climber, TileId::new(0));
        assert_eq!(climber.water, 3);
        climber.gain_water();
        assert_eq!(climber.water, 3);

        let mut carrier = Adventurer::new(Role::WaterCarrier, TileId::new(0));
        carrier.lose_water();
        carrier.gain_water();
        carrier.gain_water();
        assert_eq!(carrier.water, 5);
    }

    #[test]
    fn test_water_floors_at_zero() {
        let mut adv = Adventurer::new(Role::Archeologist, TileId::new(0));
        for _ in 0..5 {
            adv.lose_water();
        }
        assert_eq!(adv.water, 0);
    }

    #[test]
    fn test_take_item_removes_one_copy() {
        let mut adv = Adventurer::new(Role::Explorer, TileId::new(0));
        adv.inventory.push(GearCard::JetPack);
        adv.inventory.push(GearCard::JetPack);

        assert_eq!(adv.take_item(GearCard::JetPack), Some(GearCard::JetPack));
        assert_eq!(adv.inventory.len(), 1);
        assert_eq!(adv.take_item(GearCard::DuneBlaster), None);
    }
}
