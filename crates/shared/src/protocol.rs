use std::fmt;

use ring_engine::board::{board_tiles, check_player_count};
use ring_engine::{EngineError, Field, Figure, MoveKind, PlayerIndex, Tile, TileId};
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Bytes reserved for a player name
pub const NAME_LEN: usize = 20;

/// Slot value in a join request asking the host to pick any free slot
pub const ANY_SLOT: PlayerIndex = PlayerIndex::MAX;

/// Player name as a zero padded UTF-8 buffer of fixed size
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PlayerName([u8; NAME_LEN]);

impl PlayerName {
    pub fn new(name: &str) -> Result<Self, ProtocolError> {
        let bytes = name.as_bytes();
        if bytes.len() > NAME_LEN {
            return Err(ProtocolError::NameTooLong { len: bytes.len() });
        }

        let mut buffer = [0u8; NAME_LEN];
        buffer[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(buffer))
    }

    /// The name without padding; names that are not valid UTF-8 read as empty
    pub fn as_str(&self) -> &str {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        std::str::from_utf8(&self.0[..len]).unwrap_or("")
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Messages exchanged between a host and its clients
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Message {
    #[default]
    None,

    // Client → Host: request a slot ([`ANY_SLOT`] for any)
    // Host → Client: a player sits in `player`
    Join {
        player: PlayerIndex,
        session: u32,
        name: PlayerName,
    },

    // Host → Client
    Accept {
        player: PlayerIndex,
        num_players: u32,
    },
    Reject,

    // Both directions; `next_player` is filled in by the host
    Move {
        player: PlayerIndex,
        from: TileId,
        to: TileId,
        kind: MoveKind,
        next_player: PlayerIndex,
    },
    Promotion {
        player: PlayerIndex,
        tile: TileId,
        figure: Figure,
        next_player: PlayerIndex,
    },
}

impl Message {
    pub fn join(session: u32, player: PlayerIndex, name: &str) -> Result<Message, ProtocolError> {
        Ok(Message::Join {
            player,
            session,
            name: PlayerName::new(name)?,
        })
    }

    pub fn accept(player: PlayerIndex, num_players: u32) -> Message {
        Message::Accept { player, num_players }
    }

    pub fn movement(player: PlayerIndex, from: TileId, to: TileId, kind: MoveKind) -> Message {
        Message::Move {
            player,
            from,
            to,
            kind,
            next_player: player,
        }
    }

    pub fn promotion(player: PlayerIndex, tile: TileId, figure: Figure) -> Message {
        Message::Promotion {
            player,
            tile,
            figure,
            next_player: player,
        }
    }

    /// Player the message is about, if any
    pub fn player(&self) -> Option<PlayerIndex> {
        match *self {
            Message::Join { player, .. }
            | Message::Accept { player, .. }
            | Message::Move { player, .. }
            | Message::Promotion { player, .. } => Some(player),
            Message::None | Message::Reject => None,
        }
    }

    /// Copy of a move or promotion announcing whose turn follows
    pub fn with_next_player(self, next: PlayerIndex) -> Message {
        match self {
            Message::Move { player, from, to, kind, .. } => Message::Move {
                player,
                from,
                to,
                kind,
                next_player: next,
            },
            Message::Promotion { player, tile, figure, .. } => Message::Promotion {
                player,
                tile,
                figure,
                next_player: next,
            },
            other => other,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        bincode::serialize(self).map_err(ProtocolError::Encode)
    }

    pub fn decode(bytes: &[u8]) -> Result<Message, ProtocolError> {
        bincode::deserialize(bytes).map_err(ProtocolError::Decode)
    }
}

/// Tile contents of a whole board, sent to a client after it is accepted
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BoardRecord {
    pub num_players: u32,
    pub tiles: Vec<Tile>,
}

impl BoardRecord {
    pub fn from_field(field: &Field) -> BoardRecord {
        BoardRecord {
            num_players: field.num_players,
            tiles: field.snapshot(),
        }
    }

    /// Check that the record holds exactly one segment per player and that
    /// every figure belongs to one of them
    pub fn validate(&self) -> Result<(), ProtocolError> {
        check_player_count(self.num_players)?;

        let expected = board_tiles(self.num_players) as usize;
        if self.tiles.len() != expected {
            return Err(ProtocolError::TruncatedBoard {
                expected,
                got: self.tiles.len(),
            });
        }

        if let Some(stray) = self
            .tiles
            .iter()
            .find(|tile| !tile.is_empty() && tile.owner() >= self.num_players)
        {
            return Err(EngineError::InvalidPlayer {
                player: stray.owner(),
                num_players: self.num_players,
            }
            .into());
        }
        Ok(())
    }

    /// Replace the tiles of `field` with this record
    pub fn apply_to(&self, field: &mut Field) -> Result<(), ProtocolError> {
        self.validate()?;
        field.restore(&self.tiles)?;
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        bincode::serialize(self).map_err(ProtocolError::Encode)
    }

    pub fn decode(bytes: &[u8]) -> Result<BoardRecord, ProtocolError> {
        let record: BoardRecord = bincode::deserialize(bytes).map_err(ProtocolError::Decode)?;
        record.validate()?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ring_engine::board::tile_id;

    #[test]
    fn test_move_message_serialization() {
        let msg = Message::movement(0, tile_id(4, 1, 0), tile_id(4, 3, 0), MoveKind::Move)
            .with_next_player(1);
        let bytes = msg.encode().expect("Should serialize");
        let decoded = Message::decode(&bytes).expect("Should deserialize");

        match decoded {
            Message::Move {
                player,
                from,
                to,
                kind,
                next_player,
            } => {
                assert_eq!(player, 0);
                assert_eq!(from, tile_id(4, 1, 0));
                assert_eq!(to, tile_id(4, 3, 0));
                assert_eq!(kind, MoveKind::Move);
                assert_eq!(next_player, 1);
            }
            _ => panic!("Wrong message type after deserialization"),
        }
    }

    #[test]
    fn test_message_layout_is_fixed() {
        let short = Message::movement(0, 0, 1, MoveKind::Move).encode().expect("Should serialize");
        let long = Message::movement(7, 255, 200, MoveKind::Castle)
            .encode()
            .expect("Should serialize");
        assert_eq!(short.len(), long.len());

        let a = Message::join(0, ANY_SLOT, "a").expect("Should build");
        let b = Message::join(3, 2, "twenty_bytes_long_xx").expect("Should build");
        assert_eq!(
            a.encode().expect("Should serialize").len(),
            b.encode().expect("Should serialize").len()
        );
    }

    #[test]
    fn test_join_message_carries_name() {
        let msg = Message::join(0, ANY_SLOT, "Magnus").expect("Should build");
        let bytes = msg.encode().expect("Should serialize");

        match Message::decode(&bytes).expect("Should deserialize") {
            Message::Join { player, name, .. } => {
                assert_eq!(player, ANY_SLOT);
                assert_eq!(name.as_str(), "Magnus");
                assert_eq!(name.to_string(), "Magnus");
            }
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn test_name_too_long() {
        let result = PlayerName::new("a name that does not fit");
        assert!(matches!(result, Err(ProtocolError::NameTooLong { len: 24 })));
    }

    #[test]
    fn test_promotion_and_plain_messages() {
        let msg = Message::promotion(1, tile_id(2, 0, 0), Figure::Knight).with_next_player(0);
        let bytes = msg.encode().expect("Should serialize");
        assert_eq!(Message::decode(&bytes).expect("Should deserialize"), msg);
        assert_eq!(msg.player(), Some(1));

        for msg in [Message::None, Message::Reject, Message::accept(2, 4)] {
            let bytes = msg.encode().expect("Should serialize");
            assert_eq!(Message::decode(&bytes).expect("Should deserialize"), msg);
        }
        assert_eq!(Message::Reject.with_next_player(3), Message::Reject);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(Message::decode(&[]), Err(ProtocolError::Decode(_))));
        assert!(matches!(
            Message::decode(&[42, 0, 0, 0]),
            Err(ProtocolError::Decode(_))
        ));
    }

    #[test]
    fn test_board_record_transfers_position() {
        let mut host = Field::new(3).expect("Should build field");
        host.place(tile_id(4, 2, 1), Figure::Queen, 2).expect("Should place");

        let bytes = BoardRecord::from_field(&host).encode().expect("Should serialize");
        let record = BoardRecord::decode(&bytes).expect("Should deserialize");
        assert_eq!(record.num_players, 3);

        let mut client = Field::new_empty(3).expect("Should build field");
        record.apply_to(&mut client).expect("Should apply");
        assert_eq!(client.snapshot(), host.snapshot());
        assert_eq!(client.players[0].king_position, tile_id(4, 0, 0));
    }

    #[test]
    fn test_board_record_size_checks() {
        let field = Field::new(2).expect("Should build field");
        let mut record = BoardRecord::from_field(&field);
        record.tiles.truncate(40);
        assert!(matches!(
            record.validate(),
            Err(ProtocolError::TruncatedBoard { expected: 64, got: 40 })
        ));

        let bytes = record.encode().expect("Should serialize");
        assert!(BoardRecord::decode(&bytes).is_err());

        // a full record for two players does not fit a three player board
        let record = BoardRecord::from_field(&field);
        let mut other = Field::new(3).expect("Should build field");
        assert!(matches!(
            record.apply_to(&mut other),
            Err(ProtocolError::Engine(_))
        ));
    }

    #[test]
    fn test_board_record_rejects_unknown_owner() {
        let field = Field::new(2).expect("Should build field");
        let mut record = BoardRecord::from_field(&field);
        record.tiles[tile_id(4, 1, 0) as usize] = Tile {
            figure: Figure::King,
            player: 9,
            ..Tile::EMPTY
        };

        assert!(matches!(
            record.validate(),
            Err(ProtocolError::Engine(EngineError::InvalidPlayer { player: 9, num_players: 2 }))
        ));

        let bytes = record.encode().expect("Should serialize");
        assert!(BoardRecord::decode(&bytes).is_err());

        let mut client = Field::new(2).expect("Should build field");
        assert!(record.apply_to(&mut client).is_err());
        assert_eq!(client.snapshot(), field.snapshot());
    }
}
