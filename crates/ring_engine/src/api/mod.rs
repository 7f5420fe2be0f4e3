//! Public API for the ring engine
//!
//! Provides the operations a session or UI drives a match with. Every function
//! validates tile ids and player indices and reports problems as
//! [`crate::error::EngineError`].
//!
//! ## Module Organization
//!
//! - `game` - Match lifecycle (new_game, reset_game)
//! - `moves` - Move execution and validation (play_move, apply_move, promote)
//! - `state` - State queries and turn handling (is_check, advance_turn, game_status)

mod game;
mod moves;
mod state;

pub use game::{new_game, reset_game};
pub use moves::{apply_move, is_legal_move, legal_destinations, play_move, promote};
pub use state::{advance_turn, game_status, is_check, is_checkmate, GameStatus};
