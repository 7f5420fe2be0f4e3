//! Directional traversal primitive
//!
//! A position on the board is a tile plus the way the walker faces. Stepping
//! looks up the neighbor graph slot for the facing rotated by a number of
//! quarter turns and takes over both the stored tile and the stored facing.
//! This is the only place that knows what "forward" means from a given tile;
//! all movement rules are written as compositions of these steps.
//!
//! A position that has left the board is `None` and stays `None` through any
//! further composition, so chained steps need no checks in between.

use crate::topology::{NeighborGraph, Step};
use crate::types::{Direction, TileId};

/// Tile plus facing, or `None` once a walk has left the board
pub type Position = Option<Step>;

/// Starting position on `tile` facing `direction`
#[inline]
pub const fn start(tile: TileId, direction: Direction) -> Position {
    Some(Step::new(tile, direction))
}

/// Step helper over a borrowed neighbor graph
#[derive(Clone, Copy)]
pub struct Walker<'a> {
    graph: &'a NeighborGraph,
}

impl<'a> Walker<'a> {
    pub fn new(graph: &'a NeighborGraph) -> Self {
        Walker { graph }
    }

    /// Step towards the facing rotated clockwise by `quarter_turns`
    #[inline]
    pub fn step(&self, pos: Position, quarter_turns: usize) -> Position {
        let Step { tile, direction } = pos?;
        self.graph
            .get(tile as usize)
            .and_then(|slots| slots[direction.rotate(quarter_turns).index()])
    }

    #[inline]
    pub fn forward(&self, pos: Position) -> Position {
        self.step(pos, 0)
    }

    #[inline]
    pub fn right(&self, pos: Position) -> Position {
        self.step(pos, 1)
    }

    #[inline]
    pub fn left(&self, pos: Position) -> Position {
        self.step(pos, 3)
    }

    /// Right, then left: one tile forward-right of the facing
    #[inline]
    pub fn diagonal_right(&self, pos: Position) -> Position {
        self.left(self.right(pos))
    }

    /// Left, then right: one tile forward-left of the facing
    #[inline]
    pub fn diagonal_left(&self, pos: Position) -> Position {
        self.right(self.left(pos))
    }
}

/// Tile of a position, if it is still on the board
#[inline]
pub fn tile_of(pos: Position) -> Option<TileId> {
    pos.map(|step| step.tile)
}
