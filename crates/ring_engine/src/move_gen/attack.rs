//! Attack detection
//!
//! Provides functions to check whether tiles are under attack. Critical for king
//! safety, castling legality and check detection.
//!
//! ## Algorithm
//!
//! Instead of walking every enemy figure towards the target, the engine walks
//! *from* the target with [`Reach::Any`]. Each candidate carries the pattern it
//! was reached with; an enemy figure on a candidate attacks the target if it
//! moves along that pattern (queens along the rook and bishop patterns). This
//! works because every movement here is its own mirror image: if a rook on `A`
//! reaches `B`, a rook walk from `B` reaches `A`.

use super::candidates_from;
use crate::error::EngineResult;
use crate::types::{Field, PlayerIndex, Reach, TileId};

/// Enemy figures attacking `tile`, as seen by `player`
///
/// A figure counts as an enemy when it belongs to anybody but `player`. The
/// same attacker may be produced more than once.
///
/// # Errors
///
/// [`crate::error::EngineError::InvalidTileId`] or
/// [`crate::error::EngineError::InvalidPlayer`] for ids outside the match.
pub fn attackers(
    field: &Field,
    tile: TileId,
    player: PlayerIndex,
) -> EngineResult<impl Iterator<Item = TileId> + '_> {
    field.check_tile(tile)?;
    field.check_player(player)?;
    Ok(attackers_of(field, tile, player))
}

/// Check if `tile` is attacked by any opponent of `player`
///
/// # Examples
///
/// ```rust
/// use ring_engine::board::tile_id;
/// use ring_engine::move_gen::is_tile_attacked;
/// use ring_engine::types::{Field, Figure};
///
/// let mut field = Field::new_empty(2).unwrap();
/// field.place(tile_id(0, 3, 0), Figure::Rook, 1).unwrap();
/// assert!(is_tile_attacked(&field, tile_id(0, 0, 0), 0).unwrap());
/// assert!(!is_tile_attacked(&field, tile_id(1, 0, 0), 0).unwrap());
/// assert!(is_tile_attacked(&field, 100, 0).is_err());
/// ```
pub fn is_tile_attacked(field: &Field, tile: TileId, player: PlayerIndex) -> EngineResult<bool> {
    Ok(attackers(field, tile, player)?.next().is_some())
}

fn attackers_of(field: &Field, tile: TileId, player: PlayerIndex) -> impl Iterator<Item = TileId> + '_ {
    candidates_from(field, tile, Reach::Any, player)
        .filter(move |candidate| {
            let occupant = &field.tiles[candidate.tile as usize];
            !occupant.is_empty()
                && occupant.owner() != player
                && occupant.figure.attacks_along(candidate.pattern)
        })
        .map(|candidate| candidate.tile)
}

/// [`is_tile_attacked`] for a tile and player already known to be valid
pub(crate) fn tile_attacked(field: &Field, tile: TileId, player: PlayerIndex) -> bool {
    attackers_of(field, tile, player).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tile_id;
    use crate::error::EngineError;
    use crate::types::Figure;

    #[test]
    fn test_rook_attack_is_blocked() {
        let mut field = Field::new_empty(2).unwrap();
        field.place(tile_id(0, 3, 0), Figure::Rook, 1).unwrap();
        assert!(tile_attacked(&field, tile_id(0, 0, 0), 0));

        field.place(tile_id(0, 2, 0), Figure::Pawn, 0).unwrap();
        assert!(!tile_attacked(&field, tile_id(0, 0, 0), 0));
    }

    #[test]
    fn test_own_figures_do_not_attack() {
        let mut field = Field::new_empty(2).unwrap();
        field.place(tile_id(0, 3, 0), Figure::Rook, 0).unwrap();
        assert!(!tile_attacked(&field, tile_id(0, 0, 0), 0));
        assert!(tile_attacked(&field, tile_id(0, 0, 0), 1));
    }

    #[test]
    fn test_queen_attacks_along_both_patterns() {
        let mut field = Field::new_empty(2).unwrap();
        field.place(tile_id(3, 3, 0), Figure::Queen, 1).unwrap();
        assert!(tile_attacked(&field, tile_id(3, 0, 0), 0));
        assert!(tile_attacked(&field, tile_id(0, 0, 0), 0));
        assert!(!tile_attacked(&field, tile_id(1, 0, 0), 0));
    }

    #[test]
    fn test_rook_does_not_attack_diagonally() {
        let mut field = Field::new_empty(2).unwrap();
        field.place(tile_id(3, 3, 0), Figure::Rook, 1).unwrap();
        assert!(!tile_attacked(&field, tile_id(0, 0, 0), 0));
    }

    #[test]
    fn test_knight_and_king_attacks() {
        let mut field = Field::new_empty(2).unwrap();
        field.place(tile_id(2, 1, 0), Figure::Knight, 1).unwrap();
        assert!(tile_attacked(&field, tile_id(0, 0, 0), 0));
        assert!(!tile_attacked(&field, tile_id(1, 0, 0), 0));

        field.place(tile_id(6, 1, 0), Figure::King, 1).unwrap();
        assert!(tile_attacked(&field, tile_id(7, 0, 0), 0));
    }

    #[test]
    fn test_pawn_attacks_forward_diagonal() {
        let mut field = Field::new_empty(2).unwrap();
        // a pawn of player 1 walking down segment 0
        field.place(tile_id(5, 2, 0), Figure::Pawn, 1).unwrap();
        assert!(tile_attacked(&field, tile_id(4, 1, 0), 0));
        // straight ahead is not a capture square
        assert!(!tile_attacked(&field, tile_id(5, 1, 0), 0));
    }

    #[test]
    fn test_attacker_across_the_bridge() {
        let mut field = Field::new_empty(3).unwrap();
        // rook on segment 1 looking up its file, over the bridge into segment 0
        field.place(tile_id(4, 1, 1), Figure::Rook, 1).unwrap();
        assert!(tile_attacked(&field, tile_id(3, 0, 0), 0));
        let found: Vec<_> = attackers(&field, tile_id(3, 0, 0), 0).unwrap().collect();
        assert!(found.contains(&tile_id(4, 1, 1)));
    }

    #[test]
    fn test_attack_queries_reject_bad_ids() {
        let mut field = Field::new_empty(2).unwrap();
        field.place(tile_id(4, 0, 0), Figure::King, 0).unwrap();

        // tile 100 is past the two active segments
        assert!(matches!(
            is_tile_attacked(&field, 100, 0),
            Err(EngineError::InvalidTileId { tile: 100, board_tiles: 64 })
        ));
        assert!(matches!(
            is_tile_attacked(&field, tile_id(4, 0, 0), 5),
            Err(EngineError::InvalidPlayer { player: 5, num_players: 2 })
        ));
        assert!(attackers(&field, 300, 0).is_err());
        assert_eq!(is_tile_attacked(&field, tile_id(4, 0, 0), 0), Ok(false));
    }
}
