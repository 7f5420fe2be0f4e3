//! Turn rotation
//!
//! The turn passes to the next player in seat order who is not checkmated.
//! Players already flagged are skipped; every other candidate is tested for
//! checkmate on the spot and flagged if mated, so one rotation can eliminate
//! several players.

use tracing::{debug, info};

use super::check::{king_checkmated, king_in_check};
use crate::types::{Field, PlayerIndex, TurnReport};

/// Hand the turn to the next player who can still play
///
/// If nobody is left, `current_player` stays where it was and the report says
/// so.
pub fn advance_turn(field: &mut Field) -> TurnReport {
    let num_players = field.num_players;
    let mut report = TurnReport {
        current_player: field.current_player,
        ..TurnReport::default()
    };

    let mut candidate = field.current_player;
    let mut found = None;
    for _ in 0..num_players {
        candidate = (candidate + 1) % num_players;

        if field.players[candidate as usize].is_checkmate {
            debug!("skipping checkmated player {}", candidate);
            continue;
        }

        if king_checkmated(field, candidate) {
            field.players[candidate as usize].is_checkmate = true;
            report.eliminated.push(candidate);
            info!("player {} is checkmated", candidate);
            continue;
        }

        found = Some(candidate);
        break;
    }

    match found {
        Some(player) => {
            field.current_player = player;
            report.current_player = player;
            report.in_check = king_in_check(field, player);
            debug!("turn passes to player {} (in check: {})", player, report.in_check);
        }
        None => {
            report.all_checkmated = true;
            info!("no player is left who can move");
        }
    }

    let standing: Vec<PlayerIndex> = (0..num_players)
        .filter(|&player| !field.players[player as usize].is_checkmate)
        .collect();
    if let [winner] = standing[..] {
        report.winner = Some(winner);
        info!("player {} wins", winner);
    }

    report
}
