//! Core data model: tiles, the board, adventurers

pub mod adventurer;
pub mod board;
pub mod tile;

pub use adventurer::{Adventurer, Role};
pub use board::{Board, FlipEffect, SAND_LIMIT};
pub use tile::{
    Coordinate, Direction, Orientation, PartKind, Tile, TileId, TileKind, BOARD_SIZE,
};
