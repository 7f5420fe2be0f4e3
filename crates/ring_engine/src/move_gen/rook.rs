//! Rook traversal
//!
//! Rooks walk straight forward from each of the four facings. Crossing the ring
//! bridge flips the facing, so a rook leaving the top of its half continues
//! down the neighboring half.

use crate::constants::MAX_CARDINAL_STEPS;
use crate::move_gen::sliding::Ray;
use crate::traversal::{start, Walker};
use crate::types::{Candidate, Direction, Field, Figure, TileId};

/// Tiles a rook on `from` reaches, up to and including the first blocker
pub fn rook_candidates(field: &Field, from: TileId) -> impl Iterator<Item = Candidate> + '_ {
    Direction::ALL.into_iter().flat_map(move |facing| {
        Ray::new(
            field,
            start(from, facing),
            Walker::forward,
            MAX_CARDINAL_STEPS,
            Figure::Rook,
        )
    })
}
