//! Join queue
//!
//! Connections are accepted on whatever thread the transport uses, while the
//! field belongs to the session's own thread. Join requests are therefore
//! parked here and merged into the seat table by
//! [`super::Session::accept_queued_players`].

use parking_lot::Mutex;
use ring_engine::PlayerIndex;
use shared::PlayerName;

/// A client waiting for a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinRequest {
    /// Transport handle the answer goes to
    pub connection: u64,
    pub name: PlayerName,
    /// Requested seat, or [`shared::ANY_SLOT`]
    pub slot: PlayerIndex,
}

#[derive(Debug, Default)]
pub struct JoinQueue {
    pending: Mutex<Vec<JoinRequest>>,
}

impl JoinQueue {
    pub fn push(&self, request: JoinRequest) {
        self.pending.lock().push(request);
    }

    /// Take every waiting request, oldest first
    pub fn drain(&self) -> Vec<JoinRequest> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
