//! Game rules on top of raw reachability
//!
//! `move_gen` only knows how figures walk. This module turns candidates into
//! moves a player may actually make and applies them:
//!
//! - `legal` - legal destinations of a figure, board annotations for the UI
//! - `castling` - castle destinations for an unmoved king
//! - `apply` - move application and pawn promotion
//! - `check` - check and checkmate queries
//! - `turn` - turn rotation past eliminated players
//!
//! # Known Gaps
//!
//! Only king moves are filtered for self-check. A figure pinned against its own
//! king may still move away, and checkmate is declared as soon as the king
//! itself has nowhere to go, even if another figure could capture the attacker
//! or block. King destinations are tested for attacks with the king still on
//! its tile, so stepping back along the line of a rook or bishop that gives
//! check looks safe. En passant is a move kind without effect.

pub mod apply;
pub mod castling;
pub mod check;
pub mod legal;
pub mod turn;


pub use apply::{apply_move, promote};
pub use castling::castle_targets;
pub use check::{is_check, is_checkmate};
pub use legal::{clear_marks, legal_moves, mark_attackers, mark_legal_moves};
pub use turn::advance_turn;
