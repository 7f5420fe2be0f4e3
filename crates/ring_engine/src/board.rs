//! Board utilities and setup
//!
//! Provides fundamental board operations used throughout the engine:
//! - Tile id packing and unpacking
//! - Tile and player validation
//! - Field construction and the starting position
//! - Flat snapshots of the tile array for the wire layer

use crate::constants::*;
use crate::error::{EngineError, EngineResult};
use crate::topology::build_topology;
use crate::types::*;

/// Pack file, rank and segment into a tile id
#[inline]
pub const fn tile_id(file: u32, rank: u32, segment: u32) -> TileId {
    (segment << 5) | (rank << 3) | file
}

/// File (`x`) of a tile
#[inline]
pub const fn file_of(tile: TileId) -> u32 {
    tile & 0b111
}

/// Rank (`y`) of a tile within its segment
#[inline]
pub const fn rank_of(tile: TileId) -> u32 {
    (tile >> 3) & 0b11
}

/// Segment (`z`) of a tile
#[inline]
pub const fn segment_of(tile: TileId) -> u32 {
    tile >> 5
}

/// Unpack a tile id into `(file, rank, segment)`
#[inline]
pub const fn coords_of(tile: TileId) -> (u32, u32, u32) {
    (file_of(tile), rank_of(tile), segment_of(tile))
}

/// Number of real board tiles for `num_players`
#[inline]
pub const fn board_tiles(num_players: u32) -> u32 {
    num_players * TILES_PER_SEGMENT
}

/// Check a player count against the supported range
pub fn check_player_count(count: u32) -> EngineResult<()> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        Ok(())
    } else {
        Err(EngineError::InvalidPlayerCount { count })
    }
}

impl Field {
    /// Create a field with the standard starting position
    ///
    /// Builds the neighbor graph for `num_players` segments, puts the back rank
    /// and a row of pawns on every segment and hands the first turn to player 0.
    pub fn new(num_players: u32) -> EngineResult<Field> {
        let mut field = Field::new_empty(num_players)?;
        setup_starting_position(&mut field);
        Ok(field)
    }

    /// Create a field with topology but without any figures
    ///
    /// King positions point at each player's starting king tile until a king is
    /// placed with [`Field::place`].
    pub fn new_empty(num_players: u32) -> EngineResult<Field> {
        check_player_count(num_players)?;

        let mut field = Field {
            neighbors: build_topology(num_players)?,
            tiles: [Tile::EMPTY; TILE_CAPACITY],
            players: [PlayerData::default(); MAX_PLAYERS as usize],
            num_players,
            cursor: 0,
            selected: 0,
            point_of_view: 0,
            current_player: 0,
        };

        for player in 0..num_players {
            field.players[player as usize] = PlayerData {
                is_checkmate: false,
                king_position: tile_id(KING_FILE, 0, player),
            };
            for tile in segment_tiles(player) {
                field.tiles[tile as usize].player = player as u8;
            }
        }

        for (slot, figure) in PROMOTION_FIGURES.iter().enumerate() {
            field.tiles[MAX_BOARD_TILES + slot].figure = *figure;
        }

        Ok(field)
    }

    /// Number of real board tiles in this match
    #[inline]
    pub fn board_tiles(&self) -> u32 {
        board_tiles(self.num_players)
    }

    #[inline]
    pub fn is_valid_tile(&self, tile: TileId) -> bool {
        tile < self.board_tiles()
    }

    #[inline]
    pub fn is_valid_player(&self, player: PlayerIndex) -> bool {
        player < self.num_players
    }

    pub fn check_tile(&self, tile: TileId) -> EngineResult<()> {
        if self.is_valid_tile(tile) {
            Ok(())
        } else {
            Err(EngineError::InvalidTileId {
                tile,
                board_tiles: self.board_tiles(),
            })
        }
    }

    pub fn check_player(&self, player: PlayerIndex) -> EngineResult<()> {
        if self.is_valid_player(player) {
            Ok(())
        } else {
            Err(EngineError::InvalidPlayer {
                player,
                num_players: self.num_players,
            })
        }
    }

    /// Contents of a board tile
    pub fn tile(&self, tile: TileId) -> EngineResult<&Tile> {
        self.check_tile(tile)?;
        Ok(&self.tiles[tile as usize])
    }

    /// Player data for `player`
    pub fn player(&self, player: PlayerIndex) -> EngineResult<&PlayerData> {
        self.check_player(player)?;
        Ok(&self.players[player as usize])
    }

    /// Put a figure on a tile, replacing whatever was there
    ///
    /// Placing a king moves that player's recorded king position along.
    /// Placing [`Figure::None`] clears the tile.
    pub fn place(&mut self, tile: TileId, figure: Figure, player: PlayerIndex) -> EngineResult<()> {
        self.check_tile(tile)?;
        self.check_player(player)?;

        if figure.is_none() {
            clear_tile(self, tile);
            return Ok(());
        }

        self.tiles[tile as usize] = Tile {
            figure,
            player: player as u8,
            annotation: MoveKind::None,
            move_count: 0,
        };

        if figure == Figure::King {
            self.players[player as usize].king_position = tile;
        }

        Ok(())
    }

    /// Select a tile (UI state only)
    pub fn set_selected(&mut self, tile: TileId) -> EngineResult<()> {
        self.check_tile(tile)?;
        self.selected = tile;
        Ok(())
    }

    /// Move the cursor (UI state only)
    pub fn set_cursor(&mut self, tile: TileId) -> EngineResult<()> {
        self.check_tile(tile)?;
        self.cursor = tile;
        Ok(())
    }

    /// Change the player the board is viewed from
    pub fn set_point_of_view(&mut self, player: PlayerIndex) -> EngineResult<()> {
        self.check_player(player)?;
        self.point_of_view = player;
        Ok(())
    }

    /// Figures offered to a promoting pawn, read from the reserved palette slots
    pub fn promotion_palette(&self) -> [Figure; PALETTE_SLOTS] {
        let mut palette = [Figure::None; PALETTE_SLOTS];
        for (slot, figure) in palette.iter_mut().enumerate() {
            *figure = self.tiles[MAX_BOARD_TILES + slot].figure;
        }
        palette
    }

    /// Copy the active board tiles into a flat vector (`num_players * 32` entries)
    pub fn snapshot(&self) -> Vec<Tile> {
        self.tiles[..self.board_tiles() as usize].to_vec()
    }

    /// Replace the active board tiles with a snapshot taken from a field of the
    /// same size
    ///
    /// King positions are recomputed from the restored kings. A figure owned
    /// by a player outside the match rejects the whole snapshot.
    pub fn restore(&mut self, tiles: &[Tile]) -> EngineResult<()> {
        let expected = self.board_tiles() as usize;
        if tiles.len() != expected {
            return Err(EngineError::SnapshotSize {
                expected,
                got: tiles.len(),
            });
        }
        let stray = tiles
            .iter()
            .find(|tile| !tile.is_empty() && !self.is_valid_player(tile.owner()));
        if let Some(stray) = stray {
            return Err(EngineError::InvalidPlayer {
                player: stray.owner(),
                num_players: self.num_players,
            });
        }

        self.tiles[..expected].copy_from_slice(tiles);

        for tile in 0..self.board_tiles() {
            let contents = self.tiles[tile as usize];
            if contents.figure == Figure::King {
                self.players[contents.player as usize].king_position = tile;
            }
        }

        Ok(())
    }
}

/// All tile ids of one segment
pub fn segment_tiles(segment: u32) -> impl Iterator<Item = TileId> {
    let first = segment * TILES_PER_SEGMENT;
    first..first + TILES_PER_SEGMENT
}

/// Empty a tile and give it back to the player whose segment it belongs to
pub(crate) fn clear_tile(field: &mut Field, tile: TileId) {
    field.tiles[tile as usize] = Tile {
        player: segment_of(tile) as u8,
        ..Tile::EMPTY
    };
}

/// Put the starting position on every segment
///
/// The back rank follows [`BACK_RANK`], pawns fill rank 1, and every figure
/// belongs to the player owning the segment.
pub fn setup_starting_position(field: &mut Field) {
    for tile in 0..field.board_tiles() {
        clear_tile(field, tile);
    }

    for z in 0..field.num_players {
        for x in 0..FILES {
            field.tiles[tile_id(x, PAWN_RANK, z) as usize].figure = Figure::Pawn;
            field.tiles[tile_id(x, 0, z) as usize].figure = BACK_RANK[x as usize];
        }

        field.players[z as usize] = PlayerData {
            is_checkmate: false,
            king_position: tile_id(KING_FILE, 0, z),
        };
    }

    field.cursor = 0;
    field.selected = 0;
    field.point_of_view = 0;
    field.current_player = 0;
}
