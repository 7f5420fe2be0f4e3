//! Session error types

use ring_engine::EngineError;
use shared::ProtocolError;
use thiserror::Error;

use super::Mode;

/// Errors that can occur while running a session
#[derive(Error, Debug)]
pub enum SessionError {
    /// The board engine rejected the action
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// A wire record could not be used
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The action is not available in the current mode
    #[error("Operation not available in {mode:?} mode")]
    WrongMode { mode: Mode },

    /// A client has not received its board yet
    #[error("No board yet, the host has not accepted this client")]
    NoBoard,

    /// A join request named a slot past the last player
    #[error("Slot {slot} is out of range ({num_players} players)")]
    SlotOutOfRange { slot: u32, num_players: u32 },

    /// A join request named a slot somebody already sits in
    #[error("Slot {slot} is already taken")]
    SlotTaken { slot: u32 },
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
