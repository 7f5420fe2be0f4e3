//! Queen traversal
//!
//! A queen is a bishop and a rook on the same tile. Candidates keep the pattern
//! that produced them (`Bishop` or `Rook`).

use super::bishop::bishop_candidates;
use super::rook::rook_candidates;
use crate::types::{Candidate, Field, TileId};

pub fn queen_candidates(field: &Field, from: TileId) -> impl Iterator<Item = Candidate> + '_ {
    bishop_candidates(field, from).chain(rook_candidates(field, from))
}
