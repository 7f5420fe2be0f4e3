//! Match event log
//!
//! Everything that happened in a match, in order. Kept in memory only.

use ring_engine::{Figure, MoveKind, PlayerIndex, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Move,
    Capture,
    Castle,
    EnPassant,
    Promote,
    Check,
    CheckMate,
    Surrender,
}

/// One log entry
///
/// `from`/`to` are only meaningful for moves; a promotion stores the pawn's
/// tile in `from` and the new figure in `promotion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub player: PlayerIndex,
    pub from: TileId,
    pub to: TileId,
    pub promotion: Figure,
    pub kind: EventKind,
}

impl Event {
    fn about(player: PlayerIndex, kind: EventKind) -> Event {
        Event {
            player,
            from: 0,
            to: 0,
            promotion: Figure::None,
            kind,
        }
    }

    /// Entry for an applied move; `MoveKind::None` is not logged
    pub fn movement(player: PlayerIndex, from: TileId, to: TileId, kind: MoveKind) -> Option<Event> {
        let kind = match kind {
            MoveKind::None => return None,
            MoveKind::Move => EventKind::Move,
            MoveKind::Capture => EventKind::Capture,
            MoveKind::Castle => EventKind::Castle,
            MoveKind::EnPassant => EventKind::EnPassant,
        };
        Some(Event {
            from,
            to,
            ..Event::about(player, kind)
        })
    }

    pub fn promotion(player: PlayerIndex, tile: TileId, figure: Figure) -> Event {
        Event {
            from: tile,
            promotion: figure,
            ..Event::about(player, EventKind::Promote)
        }
    }

    pub fn check(player: PlayerIndex) -> Event {
        Event::about(player, EventKind::Check)
    }

    pub fn checkmate(player: PlayerIndex) -> Event {
        Event::about(player, EventKind::CheckMate)
    }

    pub fn surrender(player: PlayerIndex) -> Event {
        Event::about(player, EventKind::Surrender)
    }
}
