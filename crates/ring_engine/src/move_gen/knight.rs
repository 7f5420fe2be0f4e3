//! Knight traversal
//!
//! Knights jump, so occupancy never stops them; deciding between move, capture
//! and "blocked by a friend" is left to the caller.
//!
//! From every starting facing four L-shapes are derived:
//! - two forward, then turn right
//! - two forward, then turn left
//! - one forward, one right, one forward in the new facing
//! - one forward, one left, one forward in the new facing
//!
//! That gives 16 compositions; jumps that fall off the board are dropped and the
//! eight real destinations show up twice each in open space.

use crate::traversal::{start, tile_of, Walker};
use crate::types::{Candidate, Direction, Field, Figure, TileId};

/// Up to four L-jumps starting with a step towards `facing`
fn jumps(walker: &Walker<'_>, from: TileId, facing: Direction) -> [Option<TileId>; 4] {
    let origin = start(from, facing);
    let one = walker.forward(origin);
    let two = walker.forward(one);

    [
        tile_of(walker.right(two)),
        tile_of(walker.left(two)),
        tile_of(walker.forward(walker.right(one))),
        tile_of(walker.forward(walker.left(one))),
    ]
}

/// Tiles a knight on `from` can jump to
pub fn knight_candidates(field: &Field, from: TileId) -> impl Iterator<Item = Candidate> + '_ {
    let walker = Walker::new(&field.neighbors);
    Direction::ALL
        .into_iter()
        .flat_map(move |facing| jumps(&walker, from, facing).into_iter().flatten())
        .filter(move |tile| field.is_valid_tile(*tile))
        .map(|tile| Candidate {
            tile,
            pattern: Figure::Knight,
        })
}
