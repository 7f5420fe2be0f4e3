//! Sliding piece rays
//!
//! Common functionality for sliding pieces (bishops, rooks, queens). A ray
//! repeats one step composition from a start position until:
//! 1. the walk leaves the board, or
//! 2. it lands on an occupied tile (which is still produced, enabling captures), or
//! 3. the step budget for the ray is used up.
//!
//! Rays are plain iterators and hold nothing but a borrowed board and the
//! current position, so a fresh ray can be started at any time.

use crate::traversal::{tile_of, Position, Walker};
use crate::types::{Candidate, Field, Figure};

/// Step composition a ray repeats
pub type Advance<'a> = fn(&Walker<'a>, Position) -> Position;

/// Lazy walk along one ray
pub struct Ray<'a> {
    field: &'a Field,
    walker: Walker<'a>,
    pos: Position,
    advance: Advance<'a>,
    remaining: usize,
    pattern: Figure,
}

impl<'a> Ray<'a> {
    /// Ray whose first candidate is `advance(origin)`
    pub fn new(
        field: &'a Field,
        origin: Position,
        advance: Advance<'a>,
        max_steps: usize,
        pattern: Figure,
    ) -> Self {
        let walker = Walker::new(&field.neighbors);
        Ray {
            field,
            walker,
            pos: advance(&walker, origin),
            advance,
            remaining: max_steps,
            pattern,
        }
    }
}

impl Iterator for Ray<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        if self.remaining == 0 {
            return None;
        }

        let tile = tile_of(self.pos)?;
        if !self.field.is_valid_tile(tile) {
            self.pos = None;
            return None;
        }

        self.remaining -= 1;
        if self.field.tiles[tile as usize].is_empty() {
            self.pos = (self.advance)(&self.walker, self.pos);
        } else {
            // blocked; the occupied tile itself is still a candidate
            self.pos = None;
        }

        Some(Candidate {
            tile,
            pattern: self.pattern,
        })
    }
}
