//! Error types for the ring engine
//!
//! The engine works on plain indices. Every public entry point checks tile ids
//! and player indices against the active player count and reports a typed error
//! instead of reading outside the board.

use thiserror::Error;

use crate::types::{Figure, PlayerIndex, TileId};

/// Errors that can occur in the ring engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Tile id outside the active board
    #[error("Invalid tile id: {tile} (board has {board_tiles} tiles)")]
    InvalidTileId { tile: TileId, board_tiles: u32 },

    /// Player index outside the active player range
    #[error("Invalid player: {player} (match has {num_players} players)")]
    InvalidPlayer { player: PlayerIndex, num_players: u32 },

    /// Unsupported number of players for a table
    #[error("Invalid player count: {count} (must be 2-8)")]
    InvalidPlayerCount { count: u32 },

    /// No figure on the source tile
    #[error("No figure at tile {tile}")]
    NoFigureAtTile { tile: TileId },

    /// A player tried to act outside their turn
    #[error("Player {player} moved out of turn (current player is {current})")]
    NotYourTurn {
        player: PlayerIndex,
        current: PlayerIndex,
    },

    /// Destination is not among the legal moves of the figure
    #[error("Illegal move: from tile {from} to tile {to}")]
    IllegalMove { from: TileId, to: TileId },

    /// Tile does not hold a pawn waiting for promotion
    #[error("Tile {tile} does not hold a pawn on a promotion rank")]
    NotPromotable { tile: TileId },

    /// Requested promotion figure is not on the palette
    #[error("Cannot promote to {figure:?}")]
    InvalidPromotion { figure: Figure },

    /// Tile snapshot does not match the board size
    #[error("Snapshot holds {got} tiles, board has {expected}")]
    SnapshotSize { expected: usize, got: usize },
}

/// Result type alias for ring engine operations
pub type EngineResult<T> = Result<T, EngineError>;
