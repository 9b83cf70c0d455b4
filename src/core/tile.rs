//! Board tiles: coordinates, directions, tile kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width/height of the square board
pub const BOARD_SIZE: i8 = 5;

/// A board position in `[0,4]×[0,4]`
///
/// `x` is the column and `y` is the row; `(0,0)` is the top-left corner
/// of the rendered board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i8,
    pub y: i8,
}

impl Coordinate {
    pub fn new(x: i8, y: i8) -> Self {
        Coordinate { x, y }
    }

    /// Step one tile in the given direction, or None if that would
    /// leave the board.
    pub fn step(&self, direction: Direction) -> Option<Coordinate> {
        let (dx, dy) = direction.delta();
        let x = self.x + dx;
        let y = self.y + dy;
        if (0..BOARD_SIZE).contains(&x) && (0..BOARD_SIZE).contains(&y) {
            Some(Coordinate { x, y })
        } else {
            None
        }
    }

    /// All 25 board coordinates
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE)
            .flat_map(|x| (0..BOARD_SIZE).map(move |y| Coordinate { x, y }))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A unit step on the board
///
/// Cardinal directions are available to every role; the diagonals only
/// to roles with an 8-directional pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const CARDINAL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
        Direction::SouthEast,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// The `(dx, dy)` offset of a single step
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::NorthEast => "north-east",
            Direction::NorthWest => "north-west",
            Direction::SouthEast => "south-east",
            Direction::SouthWest => "south-west",
        };
        write!(f, "{}", name)
    }
}

/// Stable identifier for a tile
///
/// Tiles are never created or destroyed mid-session, so indices into the
/// board's tile vector stay valid for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(u8);

impl TileId {
    pub fn new(id: u8) -> Self {
        TileId(id)
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four boat parts hidden under the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    Gem,
    Motor,
    Compass,
    Propeller,
}

impl PartKind {
    pub const ALL: [PartKind; 4] = [
        PartKind::Gem,
        PartKind::Motor,
        PartKind::Compass,
        PartKind::Propeller,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PartKind::Gem => "gem",
            PartKind::Motor => "motor",
            PartKind::Compass => "compass",
            PartKind::Propeller => "propeller",
        }
    }

    /// Dense index for per-part counters
    pub fn index(self) -> usize {
        match self {
            PartKind::Gem => 0,
            PartKind::Motor => 1,
            PartKind::Compass => 2,
            PartKind::Propeller => 3,
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which half of a part's location clue a tile shows
///
/// The horizontal half fixes the part's row, the vertical half its
/// column; the part materializes at the intersection once both flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// What a tile turns out to be when flipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Nothing underneath
    Plain,
    /// Grants 2 water to everyone present when flipped
    Water,
    /// Looks like a well, but it's dry
    Mirage,
    /// Buried equipment: flipping draws a gear card
    Gear,
    /// Shelter from the sun; flipped tunnels connect to each other
    Tunnel,
    /// One half of a part's location clue
    PartHalf {
        part: PartKind,
        orientation: Orientation,
    },
    /// The moving sandstorm; never enterable, never buried
    Storm,
    /// The escape vehicle
    Boat,
    /// Launch pad: all adventurers begin here, flipping draws a gear card
    Start,
}

/// A single cell of the 5×5 board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub name: String,
    pub symbol: String,
    pub coord: Coordinate,
    pub sand: u8,
    pub flipped: bool,
    pub kind: TileKind,
    /// Assembled boat-part tokens resting on this tile
    pub parts: Vec<PartKind>,
}

impl Tile {
    pub fn new(id: TileId, name: &str, symbol: &str, kind: TileKind) -> Self {
        Tile {
            id,
            name: name.to_string(),
            symbol: symbol.to_string(),
            coord: Coordinate::new(0, 0),
            sand: 0,
            flipped: false,
            kind,
            parts: Vec::new(),
        }
    }

    /// A tile with 2+ sand is blocked: impassable and (except as the
    /// occupant's own tile) un-clearable.
    pub fn is_blocked(&self) -> bool {
        self.sand >= 2
    }

    pub fn is_storm(&self) -> bool {
        self.kind == TileKind::Storm
    }

    pub fn is_tunnel(&self) -> bool {
        self.kind == TileKind::Tunnel
    }

    /// Flipped tunnels shelter their occupants from dehydration
    pub fn shelters_from_sun(&self) -> bool {
        self.flipped && self.is_tunnel()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}. Sand: {}", self.name, self.coord, self.sand)
    }
}
