//! King traversal
//!
//! For each facing the king looks one tile forward and at the tiles beside that
//! one. Four facings times three tiles cover the eight surrounding tiles, most
//! of them twice; callers mark destinations idempotently so duplicates are
//! harmless.
//!
//! Safety of the destination (not moving into an attack) and castling are
//! handled in [`crate::rules`].

use crate::traversal::{start, tile_of, Walker};
use crate::types::{Candidate, Direction, Field, Figure, TileId};

pub fn king_candidates(field: &Field, from: TileId) -> impl Iterator<Item = Candidate> + '_ {
    let walker = Walker::new(&field.neighbors);
    Direction::ALL
        .into_iter()
        .flat_map(move |facing| {
            let ahead = walker.forward(start(from, facing));
            if ahead.is_none() {
                return [None; 3];
            }
            [
                tile_of(ahead),
                tile_of(walker.right(ahead)),
                tile_of(walker.left(ahead)),
            ]
        })
        .flatten()
        .filter(move |tile| field.is_valid_tile(*tile))
        .map(|tile| Candidate {
            tile,
            pattern: Figure::King,
        })
}
