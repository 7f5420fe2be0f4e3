//! Match lifecycle
//!
//! Functions for creating and resetting matches.

use tracing::info;

use crate::board::setup_starting_position;
use crate::error::EngineResult;
use crate::types::Field;

/// Create a match for `num_players` (2-8) in the starting position
pub fn new_game(num_players: u32) -> EngineResult<Field> {
    let field = Field::new(num_players)?;
    info!("new game for {} players ({} tiles)", num_players, field.board_tiles());
    Ok(field)
}

/// Reset a match to the starting position, keeping its player count
///
/// Elimination flags, annotations and UI indices are reset too.
pub fn reset_game(field: &mut Field) {
    setup_starting_position(field);
    info!("game reset for {} players", field.num_players);
}
