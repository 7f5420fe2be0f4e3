//! Pawn traversal
//!
//! Handles pawn-specific candidates:
//! - Forward step onto an empty tile
//! - Double step from a pawn that never moved, when both tiles are empty
//! - Captures onto occupied tiles forward-left and forward-right
//!
//! ## Facing
//!
//! A pawn on its owner's segment faces North (up its own half, over the bridge).
//! Once it stands on somebody else's segment it faces South, walking down
//! towards that segment's back rank where it promotes. The facing therefore
//! depends on who is moving compared to the segment, not on absolute
//! coordinates.
//!
//! ## Capture Geometry
//!
//! Two capture squares are tried on each side: the tile beside the forward
//! square (forward, then turn) and the diagonal composed from the start (turn,
//! then forward). Away from the bridge both name the same tile; at the seam
//! they differ, and both count.
//!
//! En passant is not generated.

use crate::board::segment_of;
use crate::traversal::{start, tile_of, Walker};
use crate::types::{Candidate, Direction, Field, Figure, PlayerIndex, TileId};

/// Facing of a pawn owned by `mover` standing on `tile`
#[inline]
pub fn pawn_facing(mover: PlayerIndex, tile: TileId) -> Direction {
    if mover != segment_of(tile) {
        Direction::South
    } else {
        Direction::North
    }
}

/// Tiles a pawn of `mover` standing on `from` can move to or capture on
///
/// Forward steps are produced only onto empty tiles; capture squares only when
/// occupied (by anyone, ownership is judged by the caller).
pub fn pawn_candidates(
    field: &Field,
    from: TileId,
    mover: PlayerIndex,
) -> impl Iterator<Item = Candidate> + '_ {
    let walker = Walker::new(&field.neighbors);
    let origin = start(from, pawn_facing(mover, from));

    let is_free = |tile: Option<TileId>| -> Option<TileId> {
        tile.filter(|t| field.is_valid_tile(*t) && field.tiles[*t as usize].is_empty())
    };
    let is_taken = |tile: Option<TileId>| -> Option<TileId> {
        tile.filter(|t| field.is_valid_tile(*t) && !field.tiles[*t as usize].is_empty())
    };

    let ahead = walker.forward(origin);
    let single = is_free(tile_of(ahead));

    let double = if single.is_some() && field.tiles[from as usize].move_count == 0 {
        is_free(tile_of(walker.forward(ahead)))
    } else {
        None
    };

    [
        single,
        is_taken(tile_of(walker.left(ahead))),
        is_taken(tile_of(walker.diagonal_left(origin))),
        is_taken(tile_of(walker.right(ahead))),
        is_taken(tile_of(walker.diagonal_right(origin))),
        double,
    ]
    .into_iter()
    .flatten()
    .map(|tile| Candidate {
        tile,
        pattern: Figure::Pawn,
    })
}
