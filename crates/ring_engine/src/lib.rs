//! Board engine for multiplayer chess on a ring of half-boards
//!
//! Two to eight players each own an 8x4 segment; the segments are joined at
//! their far ranks into one closed ring. Movement is computed by walking an
//! explicit neighbor graph instead of coordinate arithmetic, so the seams
//! between segments need no special cases in the figure rules.
//!
//! ## Module Organization
//!
//! - `constants` - board dimensions and starting layout
//! - `types` - tiles, figures, directions and the [`types::Field`]
//! - `error` - engine error type
//! - `board` - tile id packing, validation and setup
//! - `topology` - neighbor graph construction
//! - `traversal` - relative steps through the neighbor graph
//! - `move_gen` - lazy per-figure reachability and attack detection
//! - `rules` - legal moves, castling, check, move application, turn rotation
//! - `api` - high-level entry points for sessions and UIs

pub mod api;
pub mod board;
pub mod constants;
pub mod error;
pub mod move_gen;
pub mod rules;
pub mod topology;
pub mod traversal;
pub mod types;

pub use error::{EngineError, EngineResult};
pub use types::{Field, Figure, MoveKind, MoveTarget, PlayerIndex, Tile, TileId, TurnReport};
