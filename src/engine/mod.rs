mod error;
mod mutations;
mod queries;

pub use error::{EngineError, ErrorKind};

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;
use ulid::Ulid;

use crate::model::*;
use crate::notify::NotifyHub;

pub type SharedSlotState = Arc<RwLock<SlotState>>;

/// What `cancel` hands back. `promoted` is set when the freed seat was
/// consumed by the head of the waitlist inside the same critical section —
/// the caller's cue to notify that participant.
#[derive(Debug, Clone)]
pub struct CancelOutcome {
    pub slot_id: Ulid,
    pub cancelled: Ulid,
    pub promoted: Option<Booking>,
}

/// The slot booking engine. One lock per slot; slots never share a lock, so
/// load on one event cannot serialize another.
pub struct Engine {
    pub(super) slots: DashMap<Ulid, SharedSlotState>,
    pub notify: Arc<NotifyHub>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
            notify: Arc::new(NotifyHub::new()),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn get_slot_state(&self, id: &Ulid) -> Option<SharedSlotState> {
        self.slots.get(id).map(|e| e.value().clone())
    }

    pub(super) fn slot_or_not_found(&self, id: &Ulid) -> Result<SharedSlotState, EngineError> {
        self.get_slot_state(id).ok_or(EngineError::SlotNotFound(*id))
    }
}

/// Seat accounting going out of `[0, capacity]` or a waitlist position gap
/// means a serialization bug, not bad input: panic under test, log a fault
/// in release. Callers never see this as an error.
pub(super) fn enforce_invariants(rs: &SlotState) {
    if !rs.invariants_ok() {
        debug_assert!(false, "slot {} invariants violated", rs.id);
        tracing::error!(
            slot = %rs.id,
            available = rs.available,
            capacity = rs.capacity,
            bookings = rs.bookings.len(),
            waitlist = rs.waitlist.len(),
            "slot invariants violated"
        );
    }
}
