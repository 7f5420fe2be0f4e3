//! # Ring Board Constants
//!
//! ## Overview
//!
//! The ring board is built from one 8×4 half-board ("segment") per player. Every
//! segment contributes 32 tiles, so a tile id packs its coordinates as
//! `segment * 32 + rank * 8 + file`:
//!
//! - **file** (`x`): bits 0-2, `0..8`
//! - **rank** (`y`): bits 3-4, `0..4` (rank 0 is the owner's back rank)
//! - **segment** (`z`): bits 5+, `0..num_players`
//!
//! The tile array is sized for the largest supported table ([`MAX_PLAYERS`]) plus
//! four reserved slots holding the promotion palette. Those slots are never part
//! of the neighbor graph and never host a real figure.

use crate::types::Figure;

/// Smallest supported number of players
pub const MIN_PLAYERS: u32 = 2;

/// Largest supported number of players
pub const MAX_PLAYERS: u32 = 8;

/// Files per segment
pub const FILES: u32 = 8;

/// Ranks per segment
pub const RANKS: u32 = 4;

/// Tiles contributed by every player segment
pub const TILES_PER_SEGMENT: u32 = FILES * RANKS;

/// Number of real board tiles on the largest table
pub const MAX_BOARD_TILES: usize = (TILES_PER_SEGMENT * MAX_PLAYERS) as usize;

/// Number of reserved promotion palette slots after the board tiles
pub const PALETTE_SLOTS: usize = 4;

/// Total tile slots in a [`crate::types::Field`]
pub const TILE_CAPACITY: usize = MAX_BOARD_TILES + PALETTE_SLOTS;

/// Figures a pawn may promote to, in palette order
pub const PROMOTION_FIGURES: [Figure; PALETTE_SLOTS] =
    [Figure::Bishop, Figure::Knight, Figure::Rook, Figure::Queen];

/// Back-rank layout, replicated on rank 0 of every segment
pub const BACK_RANK: [Figure; FILES as usize] = [
    Figure::Rook,
    Figure::Knight,
    Figure::Bishop,
    Figure::Queen,
    Figure::King,
    Figure::Bishop,
    Figure::Knight,
    Figure::Rook,
];

/// File of the king on its starting back rank
pub const KING_FILE: u32 = 4;

/// File of the queenside rook
pub const QUEENSIDE_ROOK_FILE: u32 = 0;

/// File of the kingside rook
pub const KINGSIDE_ROOK_FILE: u32 = 7;

/// Rank the pawns start on
pub const PAWN_RANK: u32 = 1;

/// Rank on which a pawn walking down an opposing segment promotes
pub const PROMOTION_RANK: u32 = 0;

/// Longest diagonal walk a bishop (or queen) makes in one ray
pub const MAX_DIAGONAL_STEPS: usize = 8;

/// Hard upper bound for cardinal rays; no straight line is longer than the board
pub const MAX_CARDINAL_STEPS: usize = MAX_BOARD_TILES;
