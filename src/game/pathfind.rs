//! Bounded breadth-first path search for the navigator's escort ability

use crate::core::{Coordinate, Direction, Role, TileId};
use crate::game::GameState;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// The navigator moves a passenger at most this many steps per action
pub const ESCORT_RANGE: usize = 3;

/// A reachable destination and the unit steps that get there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscortPath {
    pub destination: TileId,
    pub steps: SmallVec<[Direction; 3]>,
}

/// All tiles the passenger can be escorted to, with the shortest path
/// to each.
///
/// Transitions are the PASSENGER's own movement legality evaluated as
/// if they stood at the intermediate tile — the explorer is escorted
/// diagonally, the climber through blocked tiles. Ties between
/// equal-length paths go to the first one discovered, so the output
/// order is the BFS discovery order and stable for a given board.
pub fn escort_paths(state: &GameState, passenger: Role) -> Vec<EscortPath> {
    let start = state.coord_of(passenger);
    let mut visited: FxHashSet<Coordinate> = FxHashSet::default();
    visited.insert(start);

    let mut paths = Vec::new();
    let mut queue: VecDeque<(Coordinate, SmallVec<[Direction; 3]>)> = VecDeque::new();
    queue.push_back((start, SmallVec::new()));

    while let Some((coord, path)) = queue.pop_front() {
        if path.len() >= ESCORT_RANGE {
            continue;
        }
        for direction in state.legal_moves_at(passenger, coord) {
            let next = coord
                .step(direction)
                .expect("legal moves stay on the board");
            if !visited.insert(next) {
                continue;
            }
            let mut steps = path.clone();
            steps.push(direction);
            let destination = state
                .board
                .tile_at(next)
                .expect("every board coordinate is occupied");
            paths.push(EscortPath {
                destination,
                steps: steps.clone(),
            });
            queue.push_back((next, steps));
        }
    }
    paths
}
