//! Move application and promotion
//!
//! [`apply_move`] does not re-check legality or turn order; callers validate
//! first (see `api::play_move`). It does refuse ids outside the board and
//! empty source tiles.

use tracing::{info, warn};

use crate::board::{clear_tile, coords_of, rank_of, tile_id};
use crate::constants::{FILES, PROMOTION_RANK};
use crate::error::{EngineError, EngineResult};
use crate::types::{Field, Figure, MoveKind, Tile, TileId};

/// Apply a move of `kind` from `from` to `to`
///
/// - `Move`/`Capture`: the figure and its owner move to `to`, the move count
///   continues from the source, `from` is cleared
/// - `Castle`: `to` is the rook's tile; the king moves two files towards it,
///   the rook lands on the file the king crossed
/// - `EnPassant`, `None`: no effect
///
/// # Errors
///
/// - [`EngineError::InvalidTileId`] for ids outside the board
/// - [`EngineError::NoFigureAtTile`] when `from` is empty
/// - [`EngineError::InvalidPlayer`] when the moving figure has no owner in the
///   match
/// - [`EngineError::IllegalMove`] for a castle that would leave the rank
pub fn apply_move(field: &mut Field, kind: MoveKind, from: TileId, to: TileId) -> EngineResult<()> {
    field.check_tile(from)?;
    field.check_tile(to)?;

    match kind {
        MoveKind::Move | MoveKind::Capture => relocate(field, from, to),
        MoveKind::Castle => castle(field, from, to),
        MoveKind::EnPassant => {
            warn!("en passant from {} to {} has no effect", from, to);
            Ok(())
        }
        MoveKind::None => Ok(()),
    }
}

fn relocate(field: &mut Field, from: TileId, to: TileId) -> EngineResult<()> {
    let moving = field.tiles[from as usize];
    if moving.is_empty() {
        return Err(EngineError::NoFigureAtTile { tile: from });
    }
    field.check_player(moving.owner())?;

    let captured = field.tiles[to as usize];
    field.tiles[to as usize] = Tile {
        figure: moving.figure,
        player: moving.player,
        annotation: MoveKind::None,
        move_count: moving.move_count.saturating_add(1),
    };
    clear_tile(field, from);

    if moving.figure == Figure::King {
        field.players[moving.player as usize].king_position = to;
    }

    if captured.is_empty() {
        info!("player {} moved {:?} {} -> {}", moving.player, moving.figure, from, to);
    } else {
        info!(
            "player {} moved {:?} {} -> {}, capturing {:?} of player {}",
            moving.player, moving.figure, from, to, captured.figure, captured.player
        );
    }
    Ok(())
}

fn castle(field: &mut Field, from: TileId, to: TileId) -> EngineResult<()> {
    let king = field.tiles[from as usize];
    let rook = field.tiles[to as usize];
    if king.is_empty() {
        return Err(EngineError::NoFigureAtTile { tile: from });
    }
    if rook.is_empty() {
        return Err(EngineError::NoFigureAtTile { tile: to });
    }
    field.check_player(king.owner())?;

    let (king_file, rank, segment) = coords_of(from);
    let (rook_file, _, _) = coords_of(to);

    let landing = if king_file < rook_file {
        Some((king_file + 2, king_file + 1))
    } else {
        king_file.checked_sub(2).map(|file| (file, file + 1))
    };
    let (king_to, rook_to) = match landing {
        Some((king_to, rook_to)) if king_to < FILES => {
            (tile_id(king_to, rank, segment), tile_id(rook_to, rank, segment))
        }
        _ => return Err(EngineError::IllegalMove { from, to }),
    };

    clear_tile(field, from);
    clear_tile(field, to);

    field.tiles[king_to as usize] = Tile {
        annotation: MoveKind::None,
        move_count: king.move_count.saturating_add(1),
        ..king
    };
    field.tiles[rook_to as usize] = Tile {
        annotation: MoveKind::None,
        move_count: rook.move_count.saturating_add(1),
        ..rook
    };
    field.players[king.player as usize].king_position = king_to;

    info!("player {} castled: king {} -> {}, rook {} -> {}", king.player, from, king_to, to, rook_to);
    Ok(())
}

/// Promote the pawn on `tile` to `figure`
///
/// Only a pawn standing on rank 0 can be promoted, and only to a figure from
/// the promotion palette. Owner and move count are kept.
///
/// # Errors
///
/// - [`EngineError::InvalidTileId`] for ids outside the board
/// - [`EngineError::NotPromotable`] when `tile` holds no pawn on rank 0
/// - [`EngineError::InvalidPromotion`] for figures not on the palette
pub fn promote(field: &mut Field, tile: TileId, figure: Figure) -> EngineResult<()> {
    let pawn = *field.tile(tile)?;
    if pawn.figure != Figure::Pawn || rank_of(tile) != PROMOTION_RANK {
        return Err(EngineError::NotPromotable { tile });
    }
    if !field.promotion_palette().contains(&figure) {
        return Err(EngineError::InvalidPromotion { figure });
    }

    field.tiles[tile as usize].figure = figure;
    info!("player {} promoted pawn on {} to {:?}", pawn.player, tile, figure);
    Ok(())
}
