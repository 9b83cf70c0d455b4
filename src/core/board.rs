//! The 5×5 board: tile storage, coordinate mapping, sand and flip bookkeeping

use crate::core::tile::{
    Coordinate, Orientation, PartKind, Tile, TileId, TileKind,
};
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Losing sand threshold: the expedition is buried once the board holds
/// more than this many sand markers.
pub const SAND_LIMIT: u32 = 48;

/// Coordinates that start the game with one sand marker each
const INITIAL_SAND: [(i8, i8); 8] = [
    (0, 2),
    (1, 1),
    (1, 3),
    (2, 0),
    (2, 4),
    (3, 1),
    (3, 3),
    (4, 2),
];

/// What happened when a tile was flipped
///
/// Flip effects that touch state outside the board (water grants, gear
/// draws) are reported to the session rather than applied here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipEffect {
    /// Already flipped, or nothing underneath
    Nothing,
    /// A water well: everyone present gains 2 water
    WaterRevealed,
    /// Buried equipment: the flipping adventurer draws a gear card
    GearFound,
    /// A part-location clue; `appeared_at` is set when this was the
    /// second half and the part token just materialized there
    PartLocated {
        part: PartKind,
        appeared_at: Option<TileId>,
    },
}

/// The board: 25 tiles and the bijective coordinate↔tile mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "BoardSnapshot", into = "BoardSnapshot")]
pub struct Board {
    tiles: Vec<Tile>,
    coord_to_tile: FxHashMap<Coordinate, TileId>,
    /// Cumulative sand markers on the board
    pub total_sand: u32,
    /// Flipped-half count per part kind; a part materializes at 2
    part_progress: [u8; 4],
    storm: TileId,
    boat: TileId,
}

// The coordinate map is derived from the tiles, so snapshots carry the
// tiles alone and rebuild the map on the way back in.
#[derive(Serialize, Deserialize)]
struct BoardSnapshot {
    tiles: Vec<Tile>,
    total_sand: u32,
    part_progress: [u8; 4],
    storm: TileId,
    boat: TileId,
}

impl From<Board> for BoardSnapshot {
    fn from(board: Board) -> Self {
        BoardSnapshot {
            tiles: board.tiles,
            total_sand: board.total_sand,
            part_progress: board.part_progress,
            storm: board.storm,
            boat: board.boat,
        }
    }
}

impl From<BoardSnapshot> for Board {
    fn from(snapshot: BoardSnapshot) -> Self {
        let coord_to_tile = snapshot.tiles.iter().map(|t| (t.coord, t.id)).collect();
        Board {
            tiles: snapshot.tiles,
            coord_to_tile,
            total_sand: snapshot.total_sand,
            part_progress: snapshot.part_progress,
            storm: snapshot.storm,
            boat: snapshot.boat,
        }
    }
}

impl Board {
    /// Build the board: the storm fixed at the center, every other tile
    /// placed on a shuffled coordinate, and the initial sand laid down.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut tiles = Vec::with_capacity(25);
        let push = |tiles: &mut Vec<Tile>, name: &str, symbol: &str, kind: TileKind| {
            let id = TileId::new(tiles.len() as u8);
            tiles.push(Tile::new(id, name, symbol, kind));
            id
        };

        push(&mut tiles, "start", "S", TileKind::Start);
        let storm = push(&mut tiles, "storm", "X", TileKind::Storm);
        push(&mut tiles, "tunnel_1", "T1", TileKind::Tunnel);
        push(&mut tiles, "tunnel_2", "T2", TileKind::Tunnel);
        push(&mut tiles, "tunnel_3", "T3", TileKind::Tunnel);
        let boat = push(&mut tiles, "boat", "B", TileKind::Boat);
        for part in PartKind::ALL {
            let initial = part.name()[..1].to_uppercase();
            for (orientation, suffix, tag) in [
                (Orientation::Horizontal, "_h", "h"),
                (Orientation::Vertical, "_v", "v"),
            ] {
                push(
                    &mut tiles,
                    &format!("{}{}", part.name(), suffix),
                    &format!("{}{}", initial, tag),
                    TileKind::PartHalf { part, orientation },
                );
            }
        }
        push(&mut tiles, "water_1", "W1", TileKind::Water);
        push(&mut tiles, "water_2", "W2", TileKind::Water);
        push(&mut tiles, "mirage", "M", TileKind::Mirage);
        for i in 1..=8 {
            push(
                &mut tiles,
                &format!("dune_{}", i),
                &format!("D{}", i),
                TileKind::Gear,
            );
        }
        debug_assert_eq!(tiles.len(), 25);

        // Only the storm starts at a fixed place; everything else is
        // dealt onto a shuffled coordinate.
        let center = Coordinate::new(2, 2);
        let mut open: Vec<Coordinate> =
            Coordinate::all().filter(|c| *c != center).collect();
        open.shuffle(rng);

        let mut coord_to_tile = FxHashMap::default();
        tiles[storm.as_usize()].coord = center;
        coord_to_tile.insert(center, storm);
        for tile in tiles.iter_mut() {
            if tile.id != storm {
                let coord = open.pop().expect("24 open coordinates for 24 tiles");
                tile.coord = coord;
                coord_to_tile.insert(coord, tile.id);
            }
        }

        let mut board = Board {
            tiles,
            coord_to_tile,
            total_sand: 0,
            part_progress: [0; 4],
            storm,
            boat,
        };

        for (x, y) in INITIAL_SAND {
            let id = board
                .tile_at(Coordinate::new(x, y))
                .expect("initial sand coordinate is on the board");
            board.add_sand(id);
        }

        board
    }

    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.as_usize()]
    }

    pub fn tile_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id.as_usize()]
    }

    /// The tile currently occupying a coordinate
    pub fn tile_at(&self, coord: Coordinate) -> Option<TileId> {
        self.coord_to_tile.get(&coord).copied()
    }

    /// Look up a tile by its stable name
    pub fn tile_named(&self, name: &str) -> Option<TileId> {
        self.tiles.iter().find(|t| t.name == name).map(|t| t.id)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn storm_tile(&self) -> TileId {
        self.storm
    }

    pub fn boat_tile(&self) -> TileId {
        self.boat
    }

    /// Exchange the coordinates of two tiles atomically
    ///
    /// Boat-part tokens never stay on the storm: if either tile is the
    /// storm, its tokens are handed to the other tile. Returns the
    /// displaced tokens.
    pub fn swap(&mut self, a: TileId, b: TileId) -> Vec<PartKind> {
        let mut displaced = Vec::new();
        let (storm_side, other) = if a == self.storm {
            (a, b)
        } else if b == self.storm {
            (b, a)
        } else {
            (a, b)
        };
        if storm_side == self.storm {
            let parts = std::mem::take(&mut self.tiles[storm_side.as_usize()].parts);
            displaced.extend(parts.iter().copied());
            self.tiles[other.as_usize()].parts.extend(parts);
        }

        let coord_a = self.tiles[a.as_usize()].coord;
        let coord_b = self.tiles[b.as_usize()].coord;
        self.tiles[a.as_usize()].coord = coord_b;
        self.tiles[b.as_usize()].coord = coord_a;
        self.coord_to_tile.insert(coord_b, a);
        self.coord_to_tile.insert(coord_a, b);

        displaced
    }

    /// Drop one sand marker on a tile
    pub fn add_sand(&mut self, id: TileId) {
        debug_assert!(!self.tile(id).is_storm(), "the storm never carries sand");
        self.tiles[id.as_usize()].sand += 1;
        self.total_sand += 1;
    }

    /// Remove one sand marker (no-op on a clean tile)
    pub fn remove_sand(&mut self, id: TileId) {
        let tile = &mut self.tiles[id.as_usize()];
        if tile.sand > 0 {
            tile.sand -= 1;
            self.total_sand -= 1;
        }
    }

    /// Clear every sand marker from a tile at once (Dune Blaster)
    pub fn blast_sand(&mut self, id: TileId) {
        let tile = &mut self.tiles[id.as_usize()];
        self.total_sand -= u32::from(tile.sand);
        tile.sand = 0;
    }

    /// Flip a tile and report its one-time effect
    ///
    /// A second flip of the same tile is a no-op: counters, gear draws
    /// and water grants never double-apply.
    pub fn flip(&mut self, id: TileId) -> FlipEffect {
        if self.tiles[id.as_usize()].flipped {
            return FlipEffect::Nothing;
        }
        self.tiles[id.as_usize()].flipped = true;

        match self.tiles[id.as_usize()].kind {
            TileKind::Water => FlipEffect::WaterRevealed,
            TileKind::Gear | TileKind::Tunnel | TileKind::Start => FlipEffect::GearFound,
            TileKind::PartHalf { part, .. } => {
                self.part_progress[part.index()] += 1;
                let appeared_at = if self.part_progress[part.index()] == 2 {
                    let at = self.part_intersection(part);
                    self.tiles[at.as_usize()].parts.push(part);
                    Some(at)
                } else {
                    None
                };
                FlipEffect::PartLocated { part, appeared_at }
            }
            TileKind::Plain | TileKind::Mirage | TileKind::Storm | TileKind::Boat => {
                FlipEffect::Nothing
            }
        }
    }

    /// How many halves of a part's clue have been flipped
    pub fn part_progress(&self, part: PartKind) -> u8 {
        self.part_progress[part.index()]
    }

    /// Where a part materializes: the column of its vertical half
    /// crossed with the row of its horizontal half.
    fn part_intersection(&self, part: PartKind) -> TileId {
        let half = |wanted: Orientation| {
            self.tiles
                .iter()
                .find(|t| {
                    t.kind
                        == TileKind::PartHalf {
                            part,
                            orientation: wanted,
                        }
                })
                .expect("both halves of every part exist")
                .coord
        };
        let x = half(Orientation::Vertical).x;
        let y = half(Orientation::Horizontal).y;
        self.tile_at(Coordinate::new(x, y))
            .expect("intersection is on the board")
    }
}
