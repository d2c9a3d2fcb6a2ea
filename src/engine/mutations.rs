use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::info;
use ulid::Ulid;

use crate::limits::*;
use crate::model::*;
use crate::recurrence::{generate_occurrences, RecurrenceRule};

use super::{enforce_invariants, CancelOutcome, Engine, EngineError};

fn validate_participant(p: &Participant) -> Result<(), EngineError> {
    if p.name.trim().is_empty() {
        return Err(EngineError::InvalidParticipant("name is empty"));
    }
    if p.name.len() > MAX_NAME_LEN {
        return Err(EngineError::LimitExceeded("participant name too long"));
    }
    let email = p.email.trim();
    if email.is_empty() {
        return Err(EngineError::InvalidParticipant("email is empty"));
    }
    // Deliverability is the mailer's problem; we only reject the obviously broken.
    if !email.contains('@') {
        return Err(EngineError::InvalidParticipant("email has no '@'"));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(EngineError::LimitExceeded("email too long"));
    }
    Ok(())
}

impl Engine {
    pub fn create_slot(
        &self,
        name: impl Into<String>,
        capacity: u32,
        order: i32,
    ) -> Result<SlotInfo, EngineError> {
        let name = name.into();
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(EngineError::InvalidCapacity(capacity));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(EngineError::LimitExceeded("slot name too long"));
        }
        if self.slots.len() >= MAX_SLOTS {
            return Err(EngineError::LimitExceeded("too many slots"));
        }

        let id = Ulid::new();
        let rs = SlotState::new(id, name.clone(), capacity, order);
        let info = SlotInfo::from_state(&rs);
        self.slots.insert(id, Arc::new(RwLock::new(rs)));

        info!(slot = %id, %name, capacity, "slot created");
        metrics::counter!(crate::observability::SLOTS_CREATED_TOTAL).increment(1);
        metrics::gauge!(crate::observability::SLOTS_ACTIVE).increment(1.0);
        self.notify.send(
            id,
            &EngineEvent::SlotCreated {
                id,
                name,
                capacity,
                order,
            },
        );
        Ok(info)
    }

    /// Expand a recurrence rule and create one slot per occurrence, ordered
    /// by occurrence index. An absent rule materializes a single standalone
    /// slot at the anchor date.
    pub fn materialize_event(
        &self,
        name: &str,
        capacity: u32,
        anchor: NaiveDate,
        rule: Option<&RecurrenceRule>,
    ) -> Result<Vec<SlotInfo>, EngineError> {
        let dates = match rule {
            Some(rule) => generate_occurrences(anchor, Some(rule)),
            None => vec![anchor],
        };
        let mut slots = Vec::with_capacity(dates.len());
        for (i, date) in dates.iter().enumerate() {
            slots.push(self.create_slot(format!("{name} {date}"), capacity, i as i32)?);
        }
        Ok(slots)
    }

    /// Claim one seat. Fails with `SlotFull` when none remain; the caller is
    /// expected to offer `join_waitlist` instead.
    pub async fn book(
        &self,
        slot_id: Ulid,
        participant: &Participant,
    ) -> Result<Booking, EngineError> {
        validate_participant(participant)?;
        let rs = self.slot_or_not_found(&slot_id)?;
        let mut guard = rs.write().await;
        if guard.archived {
            return Err(EngineError::SlotArchived(slot_id));
        }
        if guard.is_full() {
            metrics::counter!(crate::observability::BOOKINGS_REJECTED_TOTAL).increment(1);
            return Err(EngineError::SlotFull(slot_id));
        }

        guard.available -= 1;
        let booking = Booking {
            id: Ulid::new(),
            slot_id,
            name: participant.name.clone(),
            email: participant.email.trim().to_string(),
            created_at: now_ms(),
            from_waitlist: false,
        };
        guard.bookings.push(booking.clone());
        enforce_invariants(&guard);

        metrics::counter!(crate::observability::BOOKINGS_TOTAL).increment(1);
        self.notify.send(
            slot_id,
            &EngineEvent::BookingCreated {
                booking: booking.clone(),
            },
        );
        Ok(booking)
    }

    /// Release a seat. If anyone is waiting, the longest-waiting entry is
    /// promoted inside the same critical section — the freed seat transfers
    /// directly, and `available` never visibly bumps up in between.
    pub async fn cancel(&self, slot_id: Ulid, booking_id: Ulid) -> Result<CancelOutcome, EngineError> {
        let rs = self.slot_or_not_found(&slot_id)?;
        let mut guard = rs.write().await;
        if guard.archived {
            return Err(EngineError::SlotArchived(slot_id));
        }
        guard
            .remove_booking(booking_id)
            .ok_or(EngineError::BookingNotFound(booking_id))?;
        guard.available += 1;

        let promoted = promote_head(&mut guard);
        enforce_invariants(&guard);

        metrics::counter!(crate::observability::CANCELLATIONS_TOTAL).increment(1);
        self.notify.send(
            slot_id,
            &EngineEvent::BookingCancelled {
                slot_id,
                booking_id,
            },
        );
        if let Some((entry_id, booking)) = &promoted {
            info!(slot = %slot_id, entry = %entry_id, booking = %booking.id, "waitlist entry promoted");
            metrics::counter!(crate::observability::PROMOTIONS_TOTAL).increment(1);
            self.notify.send(
                slot_id,
                &EngineEvent::WaitlistPromoted {
                    entry_id: *entry_id,
                    booking: booking.clone(),
                },
            );
        }

        Ok(CancelOutcome {
            slot_id,
            cancelled: booking_id,
            promoted: promoted.map(|(_, b)| b),
        })
    }

    /// Queue behind a full slot. Position is arrival order, 1-based.
    pub async fn join_waitlist(
        &self,
        slot_id: Ulid,
        participant: &Participant,
    ) -> Result<WaitlistEntry, EngineError> {
        validate_participant(participant)?;
        let rs = self.slot_or_not_found(&slot_id)?;
        let mut guard = rs.write().await;
        if guard.archived {
            return Err(EngineError::SlotArchived(slot_id));
        }
        if !guard.is_full() {
            return Err(EngineError::SlotNotFull(slot_id));
        }
        if guard.waitlist.len() >= MAX_WAITLIST_LEN {
            return Err(EngineError::LimitExceeded("waitlist full"));
        }

        let entry = guard
            .push_waitlist(
                Ulid::new(),
                participant.name.clone(),
                participant.email.trim().to_string(),
                now_ms(),
            )
            .clone();
        enforce_invariants(&guard);

        metrics::counter!(crate::observability::WAITLIST_JOINS_TOTAL).increment(1);
        self.notify.send(
            slot_id,
            &EngineEvent::WaitlistJoined {
                entry: entry.clone(),
            },
        );
        Ok(entry)
    }

    /// Leave the waitlist voluntarily. Everyone behind moves up one.
    pub async fn withdraw(&self, slot_id: Ulid, entry_id: Ulid) -> Result<(), EngineError> {
        let rs = self.slot_or_not_found(&slot_id)?;
        let mut guard = rs.write().await;
        if guard.archived {
            return Err(EngineError::SlotArchived(slot_id));
        }
        guard
            .remove_waitlist(entry_id)
            .ok_or(EngineError::WaitlistEntryNotFound(entry_id))?;
        enforce_invariants(&guard);

        metrics::counter!(crate::observability::WAITLIST_WITHDRAWALS_TOTAL).increment(1);
        self.notify.send(
            slot_id,
            &EngineEvent::WaitlistWithdrawn { slot_id, entry_id },
        );
        Ok(())
    }

    /// Soft-delete: cancel every booking, clear the waitlist, keep the slot
    /// readable. Idempotent — archiving twice is a no-op.
    pub async fn archive_slot(&self, slot_id: Ulid) -> Result<(), EngineError> {
        let rs = self.slot_or_not_found(&slot_id)?;
        let mut guard = rs.write().await;
        if guard.archived {
            return Ok(());
        }
        guard.bookings.clear();
        guard.waitlist.clear();
        guard.available = guard.capacity;
        guard.archived = true;
        enforce_invariants(&guard);

        info!(slot = %slot_id, "slot archived");
        metrics::gauge!(crate::observability::SLOTS_ACTIVE).decrement(1.0);
        self.notify
            .send(slot_id, &EngineEvent::SlotArchived { id: slot_id });
        self.notify.remove(&slot_id);
        Ok(())
    }
}

/// Promotion itself: pop position 1, convert it into a booking, consume the
/// seat. Runs under the slot's write lock, only ever from `cancel`.
fn promote_head(rs: &mut SlotState) -> Option<(Ulid, Booking)> {
    let entry = rs.pop_waitlist_head()?;
    rs.available -= 1;
    let booking = Booking {
        id: Ulid::new(),
        slot_id: rs.id,
        name: entry.name,
        email: entry.email,
        created_at: now_ms(),
        from_waitlist: true,
    };
    rs.bookings.push(booking.clone());
    Some((entry.id, booking))
}
