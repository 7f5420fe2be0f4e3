//! Radial multiplayer chess
//!
//! The board engine lives in `ring_engine`, the wire format in `shared`. This
//! crate adds user settings ([`core`]) and the session layer that runs a match
//! locally or between a host and its clients ([`session`]).

pub mod core;
pub mod session;
