//! Castling
//!
//! A castle is encoded as the king moving onto its own rook's tile. When applied
//! the king lands two files towards the rook and the rook one file towards the
//! king's start, see [`super::apply`].
//!
//! Requirements, checked in this order:
//! 1. the king has never moved, stands on its back rank and is not attacked
//! 2. the rook tile holds the same player's rook which has never moved
//! 3. every tile strictly between king and rook is empty
//! 4. the two tiles the king passes and lands on are not attacked

use tracing::debug;

use crate::board::{coords_of, tile_id};
use crate::constants::{KINGSIDE_ROOK_FILE, QUEENSIDE_ROOK_FILE};
use crate::move_gen::tile_attacked;
use crate::types::{Field, Figure, MoveKind, MoveTarget, PlayerIndex, TileId};

/// Castle destinations for the king of `player` standing on `king_tile`
pub fn castle_targets(field: &Field, king_tile: TileId, player: PlayerIndex) -> Vec<MoveTarget> {
    if !field.is_valid_tile(king_tile) {
        return Vec::new();
    }
    let king = field.tiles[king_tile as usize];
    let (king_file, rank, segment) = coords_of(king_tile);

    if king.figure != Figure::King || king.owner() != player || king.move_count != 0 || rank != 0 {
        return Vec::new();
    }

    if tile_attacked(field, king_tile, player) {
        debug!("player {} cannot castle out of check", player);
        return Vec::new();
    }

    [QUEENSIDE_ROOK_FILE, KINGSIDE_ROOK_FILE]
        .into_iter()
        .filter(|&rook_file| can_castle_with(field, player, king_file, rook_file, segment))
        .map(|rook_file| MoveTarget {
            tile: tile_id(rook_file, 0, segment),
            kind: MoveKind::Castle,
        })
        .collect()
}

fn can_castle_with(
    field: &Field,
    player: PlayerIndex,
    king_file: u32,
    rook_file: u32,
    segment: u32,
) -> bool {
    let rook = field.tiles[tile_id(rook_file, 0, segment) as usize];
    if rook.figure != Figure::Rook || rook.owner() != player || rook.move_count != 0 {
        return false;
    }

    // the king travels two files, so the rook must be at least that far away
    if king_file.abs_diff(rook_file) < 2 {
        return false;
    }

    let (low, high) = if king_file < rook_file {
        (king_file + 1, rook_file)
    } else {
        (rook_file + 1, king_file)
    };
    let path_clear = (low..high).all(|file| field.tiles[tile_id(file, 0, segment) as usize].is_empty());
    if !path_clear {
        debug!("castling blocked between files {} and {}", king_file, rook_file);
        return false;
    }

    let transit = if king_file < rook_file {
        [king_file + 1, king_file + 2]
    } else {
        [king_file - 1, king_file - 2]
    };
    let safe = transit
        .into_iter()
        .all(|file| !tile_attacked(field, tile_id(file, 0, segment), player));
    if !safe {
        debug!("castling towards file {} passes an attacked tile", rook_file);
    }
    safe
}
