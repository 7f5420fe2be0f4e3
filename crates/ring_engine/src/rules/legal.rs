//! Legal move enumeration
//!
//! A candidate becomes a legal destination when it is empty (Move) or holds an
//! opponent's figure (Capture). Kings additionally refuse attacked tiles and
//! gain castle destinations.

use tracing::debug;

use super::castling::castle_targets;
use crate::error::EngineResult;
use crate::move_gen::{attackers, figure_candidates, tile_attacked};
use crate::types::{Field, Figure, MoveKind, MoveTarget, PlayerIndex, TileId};

/// Legal destinations of the figure on `from`, without touching the board
///
/// An empty tile has no destinations. Each destination appears once.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidTileId`] for tiles outside the
/// board.
pub fn legal_moves(field: &Field, from: TileId) -> EngineResult<Vec<MoveTarget>> {
    field.check_tile(from)?;
    Ok(legal_targets(field, from))
}

/// [`legal_moves`] for a tile already known to be on the board
///
/// The king-safety test runs with the king still on `from`, so a king may
/// step back along the line of a sliding attacker it is itself shielding.
pub(crate) fn legal_targets(field: &Field, from: TileId) -> Vec<MoveTarget> {
    let origin = field.tiles[from as usize];
    if origin.is_empty() {
        return Vec::new();
    }

    let mover = origin.owner();
    let mut targets: Vec<MoveTarget> = Vec::new();

    for candidate in figure_candidates(field, from) {
        let tile = candidate.tile;
        if targets.iter().any(|target| target.tile == tile) {
            continue;
        }

        let occupant = &field.tiles[tile as usize];
        if !occupant.is_empty() && occupant.owner() == mover {
            continue;
        }

        if origin.figure == Figure::King && tile_attacked(field, tile, mover) {
            continue;
        }

        let kind = if occupant.is_empty() {
            MoveKind::Move
        } else {
            MoveKind::Capture
        };
        targets.push(MoveTarget { tile, kind });
    }

    if origin.figure == Figure::King {
        targets.extend(castle_targets(field, from, mover));
    }

    debug!(
        "{:?} of player {} on tile {} has {} legal moves",
        origin.figure,
        mover,
        from,
        targets.len()
    );

    targets
}

/// Reset every move annotation on the board
pub fn clear_marks(field: &mut Field) {
    let board_tiles = field.board_tiles() as usize;
    for tile in &mut field.tiles[..board_tiles] {
        tile.annotation = MoveKind::None;
    }
}

/// Annotate the legal destinations of the figure on `from`
///
/// Previous annotations are cleared first. Returns the number of destinations.
pub fn mark_legal_moves(field: &mut Field, from: TileId) -> EngineResult<usize> {
    let targets = legal_moves(field, from)?;
    clear_marks(field);
    for target in &targets {
        field.tiles[target.tile as usize].annotation = target.kind;
    }
    Ok(targets.len())
}

/// Annotate every figure attacking `tile` from `player`'s point of view as a
/// capture
///
/// Existing annotations are kept, so attackers can be overlaid on a move
/// preview. Returns the number of distinct attackers.
pub fn mark_attackers(field: &mut Field, tile: TileId, player: PlayerIndex) -> EngineResult<usize> {
    let mut found: Vec<TileId> = attackers(field, tile, player)?.collect();
    found.sort_unstable();
    found.dedup();

    for attacker in &found {
        field.tiles[*attacker as usize].annotation = MoveKind::Capture;
    }
    Ok(found.len())
}
