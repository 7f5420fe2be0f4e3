//! Board topology builder
//!
//! The ring board is not a rectangle, so adjacency is stored explicitly: for
//! every tile and every direction slot the graph holds either the neighboring
//! tile together with the direction a walker faces after the step, or `None`
//! at the edge of the board.
//!
//! ## Wiring
//!
//! Inside a segment the tiles form a plain 8×4 grid. Increasing rank is North
//! (with South back), increasing file is West (with East back).
//!
//! The far edge of every segment (rank 3) is the ring bridge: files 0-3 of
//! segment `z` meet files 7-4 of segment `z + 1` (mod N). Both endpoints of a
//! bridge edge use their North slot, and the walker arrives facing South, so a
//! piece walking off the top of its own half keeps going "forward" down into the
//! neighbor's half.
//!
//! ```text
//!   segment z, rank 3:     0 1 2 3 | 4 5 6 7
//!                          | | | |
//!   segment z+1, rank 3:   7 6 5 4 | 3 2 1 0
//! ```
//!
//! The graph is built once per player count; there is no incremental update.

use tracing::debug;

use crate::board::{file_of, rank_of, segment_of, tile_id};
use crate::board::check_player_count;
use crate::constants::{FILES, MAX_BOARD_TILES, RANKS};
use crate::error::EngineResult;
use crate::types::{Direction, TileId};

/// Where a step leads: the next tile and the facing on arrival
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub tile: TileId,
    pub direction: Direction,
}

impl Step {
    #[inline]
    pub const fn new(tile: TileId, direction: Direction) -> Self {
        Step { tile, direction }
    }
}

/// Per tile, per direction slot adjacency for the largest supported board
pub type NeighborGraph = [[Option<Step>; 4]; MAX_BOARD_TILES];

/// Build the neighbor graph for `num_players` segments
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidPlayerCount`] outside 2-8 players.
///
/// # Examples
///
/// ```rust
/// use ring_engine::board::tile_id;
/// use ring_engine::topology::build_topology;
/// use ring_engine::types::Direction;
///
/// let graph = build_topology(3).unwrap();
/// let step = graph[tile_id(0, 3, 0) as usize][Direction::North.index()].unwrap();
/// assert_eq!(step.tile, tile_id(7, 3, 1));
/// assert_eq!(step.direction, Direction::South);
/// ```
pub fn build_topology(num_players: u32) -> EngineResult<NeighborGraph> {
    check_player_count(num_players)?;

    let mut graph: NeighborGraph = [[None; 4]; MAX_BOARD_TILES];

    for z in 0..num_players {
        // interior grid, one edge east-west and one north-south per tile
        for y in 0..RANKS - 1 {
            for x in 0..FILES - 1 {
                create_edge(&mut graph, tile_id(x, y, z), tile_id(x + 1, y, z));
                create_edge(&mut graph, tile_id(x, y, z), tile_id(x, y + 1, z));
            }
        }

        for x in 0..FILES - 1 {
            create_edge(&mut graph, tile_id(x, RANKS - 1, z), tile_id(x + 1, RANKS - 1, z));
        }

        for y in 0..RANKS - 1 {
            create_edge(&mut graph, tile_id(FILES - 1, y, z), tile_id(FILES - 1, y + 1, z));
        }

        let next = (z + 1) % num_players;
        for x in 0..FILES / 2 {
            create_edge(
                &mut graph,
                tile_id(x, RANKS - 1, z),
                tile_id(FILES - 1 - x, RANKS - 1, next),
            );
        }
    }

    debug!(num_players, "built ring topology");
    Ok(graph)
}

/// Connect two tiles in both directions
///
/// Within a segment `a` must be the lower coordinate (smaller file, or same
/// file and smaller rank). Across segments both tiles use their North slot.
pub fn create_edge(graph: &mut NeighborGraph, a: TileId, b: TileId) {
    if segment_of(a) != segment_of(b) {
        graph[a as usize][Direction::North.index()] = Some(Step::new(b, Direction::South));
        graph[b as usize][Direction::North.index()] = Some(Step::new(a, Direction::South));
    } else if file_of(a) < file_of(b) {
        debug_assert_eq!(rank_of(a), rank_of(b));
        graph[a as usize][Direction::West.index()] = Some(Step::new(b, Direction::West));
        graph[b as usize][Direction::East.index()] = Some(Step::new(a, Direction::East));
    } else {
        debug_assert!(file_of(a) == file_of(b) && rank_of(a) < rank_of(b));
        graph[a as usize][Direction::North.index()] = Some(Step::new(b, Direction::North));
        graph[b as usize][Direction::South.index()] = Some(Step::new(a, Direction::South));
    }
}
