//! Wire protocol shared by ring chess hosts and clients
//!
//! Messages are plain records with a fixed layout per kind, encoded with
//! `bincode`. The board travels separately as a [`protocol::BoardRecord`].

pub mod error;
pub mod protocol;

pub use error::ProtocolError;
pub use protocol::{BoardRecord, Message, PlayerName, ANY_SLOT, NAME_LEN};
