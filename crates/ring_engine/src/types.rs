//! # Ring Engine Core Types
//!
//! ## Overview
//!
//! This module defines the data the engine works on. Everything is kept in flat,
//! fixed-size arrays of plain `Copy` records so a whole board can be handed to the
//! wire layer as-is:
//!
//! 1. **Tiles** (`tiles: [Tile; TILE_CAPACITY]`) - occupant, owner, last move
//!    annotation and move counter per tile, followed by the promotion palette
//! 2. **Neighbor graph** (`neighbors`) - per tile and per direction, where a step
//!    leads and which way the walker faces afterwards
//! 3. **Players** (`players: [PlayerData; MAX_PLAYERS]`) - elimination flag and
//!    king position
//! 4. **Indices** - cursor, selection, point of view, current player
//!
//! ## Tile Layout
//!
//! A [`Tile`] is four bytes: figure, owning player, move annotation and move
//! count. The move count is what detects "never moved" for the pawn double step
//! and for castling.
//!
//! ## Directions
//!
//! [`Direction`] doubles as a facing and as a rotation offset. Turning right adds
//! one quarter turn, turning left adds three:
//!
//! ```text
//!            North (0)
//!               |
//!   East (1) ---+--- West (3)
//!               |
//!            South (2)
//! ```
//!
//! East and West look mirrored because "West" is the direction of increasing
//! file on every segment; only the neighbor graph gives them meaning.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_PLAYERS, TILE_CAPACITY};
use crate::topology::NeighborGraph;

/// Packed tile id, `segment * 32 + rank * 8 + file`
pub type TileId = u32;

/// Index of a player (and of the segment they start on)
pub type PlayerIndex = u32;

/// Facing of a walker on the board, and rotation offset between facings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four facings in rotation order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Direction {
        Self::ALL[index % 4]
    }

    /// Rotate clockwise by `quarter_turns`
    #[inline]
    pub fn rotate(self, quarter_turns: usize) -> Direction {
        Self::from_index(self.index() + quarter_turns)
    }

    #[inline]
    pub fn right(self) -> Direction {
        self.rotate(1)
    }

    #[inline]
    pub fn left(self) -> Direction {
        self.rotate(3)
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        self.rotate(2)
    }
}

/// Figure occupying a tile
///
/// `None` marks an empty tile. Queens never show up as a traversal pattern; a
/// queen reaches tiles through the bishop and rook patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Figure {
    #[default]
    None,
    Pawn,
    Bishop,
    Knight,
    Rook,
    Queen,
    King,
}

impl Figure {
    #[inline]
    pub fn is_none(self) -> bool {
        self == Figure::None
    }

    /// Whether a figure standing on a tile can attack along `pattern`
    #[inline]
    pub fn attacks_along(self, pattern: Figure) -> bool {
        self == pattern
            || (self == Figure::Queen && matches!(pattern, Figure::Rook | Figure::Bishop))
    }
}

/// Annotation left on a tile by move enumeration, and kind of an applied move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MoveKind {
    #[default]
    None,
    Move,
    Capture,
    /// Encoded as "king moves onto its own rook's tile"
    Castle,
    /// Reserved; never produced and a no-op when applied
    EnPassant,
}

/// Which figures a traversal should follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Movement of one figure kind
    Of(Figure),
    /// Union of every movement pattern, used for attack detection
    Any,
}

/// A tile produced by traversal, tagged with the movement pattern that reached it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub tile: TileId,
    pub pattern: Figure,
}

/// Contents of one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    pub figure: Figure,
    pub player: u8,
    pub annotation: MoveKind,
    pub move_count: u8,
}

impl Tile {
    pub const EMPTY: Tile = Tile {
        figure: Figure::None,
        player: 0,
        annotation: MoveKind::None,
        move_count: 0,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.figure.is_none()
    }

    #[inline]
    pub fn owner(&self) -> PlayerIndex {
        self.player as PlayerIndex
    }
}

/// Per-player state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerData {
    pub is_checkmate: bool,
    pub king_position: TileId,
}

/// A destination offered by legal move enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveTarget {
    pub tile: TileId,
    pub kind: MoveKind,
}

/// Central board state for one match
///
/// Created once per match with a fixed player count. The neighbor graph is
/// built at construction and never changes afterwards; tile contents change on
/// every move.
#[derive(Debug, Clone)]
pub struct Field {
    pub neighbors: NeighborGraph,
    pub tiles: [Tile; TILE_CAPACITY],
    pub players: [PlayerData; MAX_PLAYERS as usize],
    pub num_players: u32,
    pub cursor: TileId,
    pub selected: TileId,
    pub point_of_view: PlayerIndex,
    pub current_player: PlayerIndex,
}

/// Summary of one turn rotation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnReport {
    /// Player whose turn it is now
    pub current_player: PlayerIndex,
    /// Players found checkmated (and flagged) while rotating
    pub eliminated: Vec<PlayerIndex>,
    /// Whether the new current player's king is attacked
    pub in_check: bool,
    /// Set once a single player is left standing
    pub winner: Option<PlayerIndex>,
    /// No player is left who could move; `current_player` is unchanged
    pub all_checkmated: bool,
}
