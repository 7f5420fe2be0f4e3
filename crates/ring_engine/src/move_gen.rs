//! Piece movement and reachability
//!
//! Every figure's movement is expressed as a lazy sequence of [`Candidate`]s:
//! tiles the figure could move to or capture on, each tagged with the movement
//! pattern that reached it. Sequences borrow the [`Field`] and keep no other
//! state, so they are finite and can be restarted by calling again.
//!
//! ## Candidates vs. Moves
//!
//! Traversal knows about occupancy only as far as movement needs it: rays stop
//! on (and include) the first occupied tile, pawns step only onto empty tiles
//! and capture only onto occupied ones. Whether an occupied candidate is an
//! enemy (capture) or a friend (blocked) is decided by the caller, see
//! [`crate::rules`].
//!
//! ## `Reach::Any`
//!
//! The union of every pattern. Attack detection runs it from the attacked tile
//! and checks whether the figure found at the end of each branch actually moves
//! like the branch it was found on (see [`attack`]).
//!
//! ## Module Organization
//!
//! - `pawn`, `bishop`, `knight`, `rook`, `queen`, `king` - per-figure traversal
//! - `sliding` - shared ray walker for bishops, rooks and queens
//! - `attack` - attack detection built on `Reach::Any`

pub mod attack;
mod bishop;
mod king;
mod knight;
mod pawn;
mod queen;
mod rook;
mod sliding;

pub use attack::{attackers, is_tile_attacked};
pub(crate) use attack::tile_attacked;
pub use pawn::pawn_facing;

use bishop::bishop_candidates;
use king::king_candidates;
use knight::knight_candidates;
use pawn::pawn_candidates;
use queen::queen_candidates;
use rook::rook_candidates;

use std::iter;

use crate::error::EngineResult;
use crate::types::{Candidate, Field, Figure, PlayerIndex, Reach, TileId};

/// Boxed candidate sequence returned by [`reachable_tiles`]
pub type Reachable<'a> = Box<dyn Iterator<Item = Candidate> + 'a>;

/// Tiles reachable from `from` following `reach`
///
/// `mover` decides the pawn facing: the player owning the figure for ordinary
/// moves, the defending player for attack detection.
///
/// # Errors
///
/// - [`crate::error::EngineError::InvalidTileId`] when `from` is off the board
/// - [`crate::error::EngineError::InvalidPlayer`] when `mover` is not playing
///
/// # Examples
///
/// ```rust
/// use ring_engine::board::tile_id;
/// use ring_engine::move_gen::reachable_tiles;
/// use ring_engine::types::{Field, Figure, Reach};
///
/// let field = Field::new(2).unwrap();
/// let knight = tile_id(1, 0, 0);
/// let count = reachable_tiles(&field, knight, Reach::Of(Figure::Knight), 0).unwrap().count();
/// assert!(count > 0);
/// ```
pub fn reachable_tiles(
    field: &Field,
    from: TileId,
    reach: Reach,
    mover: PlayerIndex,
) -> EngineResult<Reachable<'_>> {
    field.check_tile(from)?;
    field.check_player(mover)?;
    Ok(candidates_from(field, from, reach, mover))
}

/// Tiles the figure standing on `from` can reach, using its owner as mover
///
/// An empty tile reaches nothing.
pub fn figure_reach(field: &Field, from: TileId) -> EngineResult<Reachable<'_>> {
    field.check_tile(from)?;
    Ok(figure_candidates(field, from))
}

/// [`reachable_tiles`] for a tile and mover already known to be valid
pub(crate) fn candidates_from(
    field: &Field,
    from: TileId,
    reach: Reach,
    mover: PlayerIndex,
) -> Reachable<'_> {
    match reach {
        Reach::Of(Figure::None) => Box::new(iter::empty()),
        Reach::Of(Figure::Pawn) => Box::new(pawn_candidates(field, from, mover)),
        Reach::Of(Figure::Bishop) => Box::new(bishop_candidates(field, from)),
        Reach::Of(Figure::Knight) => Box::new(knight_candidates(field, from)),
        Reach::Of(Figure::Rook) => Box::new(rook_candidates(field, from)),
        Reach::Of(Figure::Queen) => Box::new(queen_candidates(field, from)),
        Reach::Of(Figure::King) => Box::new(king_candidates(field, from)),
        Reach::Any => Box::new(
            pawn_candidates(field, from, mover)
                .chain(bishop_candidates(field, from))
                .chain(knight_candidates(field, from))
                .chain(rook_candidates(field, from))
                .chain(king_candidates(field, from)),
        ),
    }
}

pub(crate) fn figure_candidates(field: &Field, from: TileId) -> Reachable<'_> {
    let tile = field.tiles[from as usize];
    candidates_from(field, from, Reach::Of(tile.figure), tile.owner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tile_id;
    use crate::error::EngineError;
    use std::collections::BTreeSet;

    fn tiles_of(candidates: impl Iterator<Item = Candidate>) -> BTreeSet<TileId> {
        candidates.map(|c| c.tile).collect()
    }

    #[test]
    fn test_rook_on_empty_eight_player_board() {
        let mut field = Field::new_empty(8).unwrap();
        let rook = tile_id(3, 1, 0);
        field.place(rook, Figure::Rook, 0).unwrap();

        let expected: BTreeSet<TileId> = [
            // up the file and over the bridge into segment 1
            tile_id(3, 2, 0),
            tile_id(3, 3, 0),
            tile_id(4, 3, 1),
            tile_id(4, 2, 1),
            tile_id(4, 1, 1),
            tile_id(4, 0, 1),
            // down the file
            tile_id(3, 0, 0),
            // along the rank
            tile_id(0, 1, 0),
            tile_id(1, 1, 0),
            tile_id(2, 1, 0),
            tile_id(4, 1, 0),
            tile_id(5, 1, 0),
            tile_id(6, 1, 0),
            tile_id(7, 1, 0),
        ]
        .into_iter()
        .collect();

        assert_eq!(tiles_of(figure_candidates(&field, rook)), expected);
    }

    #[test]
    fn test_rook_stops_on_first_occupant() {
        let mut field = Field::new_empty(8).unwrap();
        let rook = tile_id(3, 1, 0);
        field.place(rook, Figure::Rook, 0).unwrap();
        field.place(tile_id(3, 3, 0), Figure::Pawn, 0).unwrap();
        field.place(tile_id(5, 1, 0), Figure::Knight, 1).unwrap();

        let reached = tiles_of(figure_candidates(&field, rook));
        assert!(reached.contains(&tile_id(3, 3, 0)), "blocker itself is included");
        assert!(!reached.contains(&tile_id(4, 3, 1)));
        assert!(reached.contains(&tile_id(5, 1, 0)));
        assert!(!reached.contains(&tile_id(6, 1, 0)));
        assert_eq!(reached.len(), 8);
    }

    #[test]
    fn test_knight_in_corner_stays_on_board() {
        let mut field = Field::new_empty(2).unwrap();
        let knight = tile_id(0, 0, 0);
        field.place(knight, Figure::Knight, 0).unwrap();

        let reached = tiles_of(figure_candidates(&field, knight));
        assert_eq!(reached, BTreeSet::from([tile_id(1, 2, 0), tile_id(2, 1, 0)]));
    }

    #[test]
    fn test_knight_jumps_near_back_rank() {
        let mut field = Field::new_empty(2).unwrap();
        let knight = tile_id(3, 1, 0);
        field.place(knight, Figure::Knight, 0).unwrap();

        let candidates: Vec<_> = figure_candidates(&field, knight).collect();
        assert!(candidates.iter().all(|c| c.pattern == Figure::Knight));
        assert!(candidates.len() <= 16);

        let expected = BTreeSet::from([
            tile_id(1, 0, 0),
            tile_id(5, 0, 0),
            tile_id(1, 2, 0),
            tile_id(5, 2, 0),
            tile_id(2, 3, 0),
            tile_id(4, 3, 0),
        ]);
        assert_eq!(tiles_of(candidates.into_iter()), expected);
    }

    #[test]
    fn test_bishop_diagonals() {
        let mut field = Field::new_empty(2).unwrap();
        let bishop = tile_id(2, 0, 0);
        field.place(bishop, Figure::Bishop, 0).unwrap();

        let reached = tiles_of(figure_candidates(&field, bishop));
        assert!(reached.contains(&tile_id(3, 1, 0)));
        assert!(reached.contains(&tile_id(4, 2, 0)));
        assert!(reached.contains(&tile_id(1, 1, 0)));
        assert!(reached.contains(&tile_id(0, 2, 0)));
        assert!(!reached.contains(&tile_id(2, 1, 0)));
    }

    #[test]
    fn test_bishop_stops_on_blocker() {
        let mut field = Field::new_empty(2).unwrap();
        let bishop = tile_id(2, 0, 0);
        field.place(bishop, Figure::Bishop, 0).unwrap();
        field.place(tile_id(3, 1, 0), Figure::Pawn, 1).unwrap();

        let reached = tiles_of(figure_candidates(&field, bishop));
        assert!(reached.contains(&tile_id(3, 1, 0)));
        assert!(!reached.contains(&tile_id(4, 2, 0)));
    }

    #[test]
    fn test_queen_tags_bishop_and_rook_patterns() {
        let mut field = Field::new_empty(2).unwrap();
        let queen = tile_id(3, 1, 0);
        field.place(queen, Figure::Queen, 0).unwrap();

        let candidates: Vec<_> = figure_candidates(&field, queen).collect();
        assert!(candidates.iter().any(|c| c.pattern == Figure::Bishop));
        assert!(candidates.iter().any(|c| c.pattern == Figure::Rook));
        assert!(candidates
            .iter()
            .all(|c| matches!(c.pattern, Figure::Bishop | Figure::Rook)));
    }

    #[test]
    fn test_king_covers_surrounding_tiles() {
        let mut field = Field::new_empty(2).unwrap();
        let king = tile_id(3, 1, 0);
        field.place(king, Figure::King, 0).unwrap();

        let expected: BTreeSet<TileId> = [
            tile_id(2, 0, 0),
            tile_id(3, 0, 0),
            tile_id(4, 0, 0),
            tile_id(2, 1, 0),
            tile_id(4, 1, 0),
            tile_id(2, 2, 0),
            tile_id(3, 2, 0),
            tile_id(4, 2, 0),
        ]
        .into_iter()
        .collect();
        assert_eq!(tiles_of(figure_candidates(&field, king)), expected);
    }

    #[test]
    fn test_pawn_steps_and_captures() {
        let mut field = Field::new_empty(2).unwrap();
        let pawn = tile_id(4, 1, 0);
        field.place(pawn, Figure::Pawn, 0).unwrap();

        let reached = tiles_of(figure_candidates(&field, pawn));
        assert_eq!(reached, BTreeSet::from([tile_id(4, 2, 0), tile_id(4, 3, 0)]));

        // empty diagonals are not offered, occupied ones are
        field.place(tile_id(5, 2, 0), Figure::Knight, 1).unwrap();
        let reached = tiles_of(figure_candidates(&field, pawn));
        assert!(reached.contains(&tile_id(5, 2, 0)));
        assert!(!reached.contains(&tile_id(3, 2, 0)));
    }

    #[test]
    fn test_pawn_double_step_needs_clear_path_and_no_moves() {
        let mut field = Field::new_empty(2).unwrap();
        let pawn = tile_id(4, 1, 0);
        field.place(pawn, Figure::Pawn, 0).unwrap();
        field.tiles[pawn as usize].move_count = 1;
        assert_eq!(
            tiles_of(figure_candidates(&field, pawn)),
            BTreeSet::from([tile_id(4, 2, 0)])
        );

        field.tiles[pawn as usize].move_count = 0;
        field.place(tile_id(4, 2, 0), Figure::Rook, 1).unwrap();
        assert!(tiles_of(figure_candidates(&field, pawn)).is_empty());
    }

    #[test]
    fn test_pawn_on_opposing_half_walks_down() {
        let mut field = Field::new_empty(2).unwrap();
        let pawn = tile_id(4, 2, 1);
        field.place(pawn, Figure::Pawn, 0).unwrap();
        field.tiles[pawn as usize].move_count = 3;

        assert_eq!(
            tiles_of(figure_candidates(&field, pawn)),
            BTreeSet::from([tile_id(4, 1, 1)])
        );
    }

    #[test]
    fn test_reachable_is_restartable() {
        let field = Field::new(3).unwrap();
        let queen = tile_id(3, 0, 1);
        let first: Vec<_> = figure_candidates(&field, queen).collect();
        let second: Vec<_> = figure_candidates(&field, queen).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_any_includes_every_pattern() {
        let mut field = Field::new_empty(2).unwrap();
        let centre = tile_id(3, 1, 0);
        for tile in [tile_id(3, 2, 0), tile_id(4, 2, 0), tile_id(2, 2, 0)] {
            field.place(tile, Figure::Pawn, 1).unwrap();
        }
        let patterns: BTreeSet<_> = reachable_tiles(&field, centre, Reach::Any, 0)
            .unwrap()
            .map(|c| format!("{:?}", c.pattern))
            .collect();
        for name in ["Pawn", "Bishop", "Knight", "Rook", "King"] {
            assert!(patterns.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_reach_rejects_bad_ids() {
        let field = Field::new(2).unwrap();

        assert!(matches!(
            figure_reach(&field, 300),
            Err(EngineError::InvalidTileId { tile: 300, board_tiles: 64 })
        ));
        // past the active segments but inside the tile array
        assert!(matches!(
            figure_reach(&field, 100),
            Err(EngineError::InvalidTileId { tile: 100, .. })
        ));
        assert!(matches!(
            reachable_tiles(&field, tile_id(1, 0, 0), Reach::Any, 5),
            Err(EngineError::InvalidPlayer { player: 5, num_players: 2 })
        ));
        assert!(figure_reach(&field, tile_id(1, 0, 0)).unwrap().count() > 0);
    }
}
