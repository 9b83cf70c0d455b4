//! Forbidden Desert - cooperative expedition simulation engine
//!
//! A rules engine for the tile-based desert expedition game: six
//! role-differentiated adventurers dig boat parts out of a shifting
//! 5×5 board while a hazard deck buries tiles and drains their water.
//! The engine enumerates legal actions every step; the decision policy
//! is pluggable and seeded for reproducible simulations.

pub mod core;
pub mod error;
pub mod game;

pub use error::{DesertError, Result};
