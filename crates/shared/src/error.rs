//! Protocol error types

use ring_engine::EngineError;
use thiserror::Error;

/// Errors raised while encoding or decoding wire records
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Failed to encode record: {0}")]
    Encode(#[source] bincode::Error),

    #[error("Failed to decode record: {0}")]
    Decode(#[source] bincode::Error),

    /// Player names are limited to 20 bytes of UTF-8
    #[error("Player name is {len} bytes long (at most 20 allowed)")]
    NameTooLong { len: usize },

    /// Board record does not hold one full segment per player
    #[error("Board record holds {got} tiles, expected {expected}")]
    TruncatedBoard { expected: usize, got: usize },

    /// Record does not fit the receiving board
    #[error("Engine rejected record: {0}")]
    Engine(#[from] EngineError),
}
