use ulid::Ulid;

use crate::model::*;

use super::{Engine, EngineError};

impl Engine {
    pub async fn get_slot(&self, slot_id: Ulid) -> Result<SlotInfo, EngineError> {
        let rs = self.slot_or_not_found(&slot_id)?;
        let guard = rs.read().await;
        Ok(SlotInfo::from_state(&guard))
    }

    /// All slots, sorted by display order (ties broken by id for a stable
    /// listing).
    pub async fn list_slots(&self) -> Vec<SlotInfo> {
        let shared: Vec<_> = self.slots.iter().map(|e| e.value().clone()).collect();
        let mut infos = Vec::with_capacity(shared.len());
        for rs in shared {
            let guard = rs.read().await;
            infos.push(SlotInfo::from_state(&guard));
        }
        infos.sort_by(|a, b| a.order.cmp(&b.order).then(a.id.cmp(&b.id)));
        infos
    }

    /// Snapshot of a slot's active bookings. Unknown slots read as empty.
    pub async fn list_bookings(&self, slot_id: Ulid) -> Vec<Booking> {
        let rs = match self.get_slot_state(&slot_id) {
            Some(rs) => rs,
            None => return Vec::new(),
        };
        let guard = rs.read().await;
        guard.bookings.clone()
    }

    /// Snapshot of the waitlist in promotion order. Read-only: calling this
    /// repeatedly without an interleaved mutation yields identical output.
    pub async fn list_waitlist(&self, slot_id: Ulid) -> Vec<WaitlistEntry> {
        let rs = match self.get_slot_state(&slot_id) {
            Some(rs) => rs,
            None => return Vec::new(),
        };
        let guard = rs.read().await;
        guard.waitlist.clone()
    }
}
