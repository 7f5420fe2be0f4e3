//! Match state queries
//!
//! Functions for querying check, checkmate and the overall outcome, and for
//! handing the turn on.

use crate::rules::check::king_in_check;
use crate::types::{Field, PlayerIndex};

pub use crate::rules::{advance_turn, is_check, is_checkmate};

/// Overall state of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// At least two players are still in the game
    Playing {
        current_player: PlayerIndex,
        in_check: bool,
    },
    /// Every other player has been checkmated
    Won { winner: PlayerIndex },
    /// Nobody is left
    Over,
}

/// Get the current match state from the elimination flags
///
/// Flags are set by [`advance_turn`]; this does not look for new checkmates.
pub fn game_status(field: &Field) -> GameStatus {
    let mut standing =
        (0..field.num_players).filter(|&player| !field.players[player as usize].is_checkmate);

    match (standing.next(), standing.next()) {
        (None, _) => GameStatus::Over,
        (Some(winner), None) => GameStatus::Won { winner },
        _ => GameStatus::Playing {
            current_player: field.current_player,
            in_check: field.is_valid_player(field.current_player)
                && king_in_check(field, field.current_player),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tile_id;
    use crate::types::Figure;

    #[test]
    fn test_game_status() {
        let mut field = Field::new(3).unwrap();
        assert_eq!(
            game_status(&field),
            GameStatus::Playing {
                current_player: 0,
                in_check: false
            }
        );

        field.players[0].is_checkmate = true;
        field.players[2].is_checkmate = true;
        assert_eq!(game_status(&field), GameStatus::Won { winner: 1 });

        field.players[1].is_checkmate = true;
        assert_eq!(game_status(&field), GameStatus::Over);
    }

    #[test]
    fn test_game_status_reports_check() {
        let mut field = Field::new_empty(2).unwrap();
        field.place(tile_id(4, 0, 0), Figure::King, 0).unwrap();
        field.place(tile_id(4, 3, 0), Figure::Rook, 1).unwrap();
        assert_eq!(
            game_status(&field),
            GameStatus::Playing {
                current_player: 0,
                in_check: true
            }
        );
    }
}
