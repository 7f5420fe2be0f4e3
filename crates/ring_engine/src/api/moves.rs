//! Move execution and validation
//!
//! Functions for executing moves and checking move legality.

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::rules::legal_moves;
use crate::types::{Field, MoveKind, MoveTarget, TileId};

pub use crate::rules::{apply_move, promote};

/// Legal destinations of the figure on `tile`, for highlighting
///
/// Does not modify the field; see [`crate::rules::mark_legal_moves`] for the
/// annotating variant.
pub fn legal_destinations(field: &Field, tile: TileId) -> EngineResult<Vec<MoveTarget>> {
    legal_moves(field, tile)
}

/// Check if moving the figure on `from` to `to` is legal
///
/// Turn order is not considered. Invalid ids are simply not legal.
pub fn is_legal_move(field: &Field, from: TileId, to: TileId) -> bool {
    legal_moves(field, from)
        .map(|targets| targets.iter().any(|target| target.tile == to))
        .unwrap_or(false)
}

/// Play a move for the current player
///
/// Validates that the figure on `from` belongs to the player whose turn it is
/// and that `to` is one of its legal destinations, then applies the move.
/// The turn is not advanced, so a pending promotion can be handled first.
///
/// # Returns
///
/// The kind of move that was played.
///
/// # Errors
///
/// - [`EngineError::InvalidTileId`] for ids outside the board
/// - [`EngineError::NoFigureAtTile`] when `from` is empty
/// - [`EngineError::NotYourTurn`] when the figure belongs to someone else
/// - [`EngineError::IllegalMove`] when `to` is not a legal destination
///
/// # Examples
///
/// ```rust
/// use ring_engine::api::{new_game, play_move};
/// use ring_engine::board::tile_id;
/// use ring_engine::types::MoveKind;
///
/// let mut field = new_game(2).unwrap();
/// let kind = play_move(&mut field, tile_id(4, 1, 0), tile_id(4, 3, 0)).unwrap();
/// assert_eq!(kind, MoveKind::Move);
/// ```
pub fn play_move(field: &mut Field, from: TileId, to: TileId) -> EngineResult<MoveKind> {
    let origin = *field.tile(from)?;
    field.check_tile(to)?;

    if origin.is_empty() {
        return Err(EngineError::NoFigureAtTile { tile: from });
    }

    let player = origin.owner();
    if player != field.current_player {
        warn!(
            "player {} tried to move on player {}'s turn",
            player, field.current_player
        );
        return Err(EngineError::NotYourTurn {
            player,
            current: field.current_player,
        });
    }

    let kind = legal_moves(field, from)?
        .into_iter()
        .find(|target| target.tile == to)
        .map(|target| target.kind)
        .ok_or(EngineError::IllegalMove { from, to })?;

    apply_move(field, kind, from, to)?;
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tile_id;
    use crate::types::Figure;

    #[test]
    fn test_play_move_checks_turn() {
        let mut field = Field::new(2).unwrap();
        assert_eq!(
            play_move(&mut field, tile_id(4, 1, 1), tile_id(4, 2, 1)),
            Err(EngineError::NotYourTurn { player: 1, current: 0 })
        );
    }

    #[test]
    fn test_play_move_rejects_illegal_destination() {
        let mut field = Field::new(2).unwrap();
        assert_eq!(
            play_move(&mut field, tile_id(4, 1, 0), tile_id(4, 1, 1)),
            Err(EngineError::IllegalMove {
                from: tile_id(4, 1, 0),
                to: tile_id(4, 1, 1)
            })
        );
        assert_eq!(
            play_move(&mut field, tile_id(4, 2, 0), tile_id(4, 3, 0)),
            Err(EngineError::NoFigureAtTile { tile: tile_id(4, 2, 0) })
        );
        // board untouched
        assert_eq!(field.tiles[tile_id(4, 1, 0) as usize].figure, Figure::Pawn);
    }

    #[test]
    fn test_play_move_derives_castle() {
        let mut field = Field::new_empty(2).unwrap();
        field.place(tile_id(4, 0, 0), Figure::King, 0).unwrap();
        field.place(tile_id(7, 0, 0), Figure::Rook, 0).unwrap();
        field.place(tile_id(4, 0, 1), Figure::King, 1).unwrap();

        let kind = play_move(&mut field, tile_id(4, 0, 0), tile_id(7, 0, 0)).unwrap();
        assert_eq!(kind, MoveKind::Castle);
        assert_eq!(field.players[0].king_position, tile_id(6, 0, 0));
    }

    #[test]
    fn test_is_legal_move() {
        let field = Field::new(2).unwrap();
        assert!(is_legal_move(&field, tile_id(6, 0, 0), tile_id(5, 2, 0)));
        assert!(!is_legal_move(&field, tile_id(6, 0, 0), tile_id(6, 2, 0)));
        assert!(!is_legal_move(&field, 300, 0));
    }
}
