//! Bishop traversal
//!
//! Bishops walk the four diagonal rays. With no absolute geometry to lean on,
//! each diagonal is produced by composing turns: from every starting facing the
//! engine walks forward-right (`right` then `left`) and forward-left (`left`
//! then `right`). Opposite facings produce the same diagonals mirrored, so
//! tiles may be produced more than once.

use crate::constants::MAX_DIAGONAL_STEPS;
use crate::move_gen::sliding::Ray;
use crate::traversal::{start, Walker};
use crate::types::{Candidate, Direction, Field, Figure, TileId};

/// Tiles a bishop on `from` reaches, up to and including the first blocker
pub fn bishop_candidates(field: &Field, from: TileId) -> impl Iterator<Item = Candidate> + '_ {
    Direction::ALL.into_iter().flat_map(move |facing| {
        let origin = start(from, facing);
        [
            Ray::new(
                field,
                origin,
                Walker::diagonal_right,
                MAX_DIAGONAL_STEPS,
                Figure::Bishop,
            ),
            Ray::new(
                field,
                origin,
                Walker::diagonal_left,
                MAX_DIAGONAL_STEPS,
                Figure::Bishop,
            ),
        ]
        .into_iter()
        .flatten()
    })
}
