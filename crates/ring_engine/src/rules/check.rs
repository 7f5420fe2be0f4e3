//! Check and checkmate
//!
//! `is_checkmate` only asks whether the king itself can step out of the
//! attack. Captures of the attacker or blocks by other figures are not
//! considered, so some positions with a defence are reported as mate.
//!
//! A player whose king is no longer on the board counts as checkmated.

use super::legal::legal_targets;
use crate::error::EngineResult;
use crate::move_gen::tile_attacked;
use crate::types::{Field, Figure, PlayerIndex};

/// Whether the king of `player` is attacked
pub fn is_check(field: &Field, player: PlayerIndex) -> EngineResult<bool> {
    field.check_player(player)?;
    Ok(king_in_check(field, player))
}

/// Whether `player` is in check and their king has no legal move
pub fn is_checkmate(field: &Field, player: PlayerIndex) -> EngineResult<bool> {
    field.check_player(player)?;
    Ok(king_checkmated(field, player))
}

/// [`is_check`] for a player already known to be in the match
pub(crate) fn king_in_check(field: &Field, player: PlayerIndex) -> bool {
    let king_position = field.players[player as usize].king_position;
    king_on_board(field, player) && tile_attacked(field, king_position, player)
}

/// [`is_checkmate`] for a player already known to be in the match
pub(crate) fn king_checkmated(field: &Field, player: PlayerIndex) -> bool {
    if !king_on_board(field, player) {
        return true;
    }
    let king_position = field.players[player as usize].king_position;
    tile_attacked(field, king_position, player) && legal_targets(field, king_position).is_empty()
}

fn king_on_board(field: &Field, player: PlayerIndex) -> bool {
    let position = field.players[player as usize].king_position;
    field.is_valid_tile(position) && {
        let tile = &field.tiles[position as usize];
        tile.figure == Figure::King && tile.owner() == player
    }
}
