use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unix milliseconds — the only time-of-day type.
pub type Ms = i64;

pub(crate) fn now_ms() -> Ms {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as Ms
}

/// Who is booking or waiting. Validated at the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub email: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A confirmed claim on one seat of a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Ulid,
    pub slot_id: Ulid,
    pub name: String,
    pub email: String,
    pub created_at: Ms,
    /// True when this booking was created by promoting a waitlist entry.
    pub from_waitlist: bool,
}

/// A pending claim, ordered strictly by arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: Ulid,
    pub slot_id: Ulid,
    pub name: String,
    pub email: String,
    /// Dense 1-based rank. Position 1 is the longest-waiting entry.
    pub position: u32,
    pub created_at: Ms,
    /// Per-slot monotonic arrival sequence. Breaks `created_at` ties.
    pub(crate) arrival: u64,
}

#[derive(Debug, Clone)]
pub struct SlotState {
    pub id: Ulid,
    pub name: String,
    /// Total seats (>= 1).
    pub capacity: u32,
    /// Seats still open, in `[0, capacity]`.
    pub available: u32,
    /// Display-ordering integer, owned by the organizer.
    pub order: i32,
    pub archived: bool,
    pub bookings: Vec<Booking>,
    /// Storage order is waitlist order.
    pub waitlist: Vec<WaitlistEntry>,
    pub(crate) next_arrival: u64,
}

impl SlotState {
    pub fn new(id: Ulid, name: String, capacity: u32, order: i32) -> Self {
        Self {
            id,
            name,
            capacity,
            available: capacity,
            order,
            archived: false,
            bookings: Vec::new(),
            waitlist: Vec::new(),
            next_arrival: 0,
        }
    }

    pub fn is_full(&self) -> bool {
        self.available == 0
    }

    pub fn find_booking(&self, id: Ulid) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    /// Remove a booking by id. Does not touch `available` — the caller owns
    /// the seat accounting.
    pub fn remove_booking(&mut self, id: Ulid) -> Option<Booking> {
        let pos = self.bookings.iter().position(|b| b.id == id)?;
        Some(self.bookings.remove(pos))
    }

    /// Append a waitlist entry, assigning its position and arrival sequence.
    pub fn push_waitlist(
        &mut self,
        id: Ulid,
        name: String,
        email: String,
        created_at: Ms,
    ) -> &WaitlistEntry {
        let arrival = self.next_arrival;
        self.next_arrival += 1;
        self.waitlist.push(WaitlistEntry {
            id,
            slot_id: self.id,
            name,
            email,
            position: self.waitlist.len() as u32 + 1,
            created_at,
            arrival,
        });
        self.waitlist.last().unwrap()
    }

    /// Remove the longest-waiting entry (position 1) and renumber the rest.
    pub fn pop_waitlist_head(&mut self) -> Option<WaitlistEntry> {
        if self.waitlist.is_empty() {
            return None;
        }
        let head = self.waitlist.remove(0);
        self.renumber();
        Some(head)
    }

    /// Remove an arbitrary entry by id and renumber everything behind it.
    pub fn remove_waitlist(&mut self, id: Ulid) -> Option<WaitlistEntry> {
        let pos = self.waitlist.iter().position(|e| e.id == id)?;
        let entry = self.waitlist.remove(pos);
        self.renumber();
        Some(entry)
    }

    fn renumber(&mut self) {
        for (i, entry) in self.waitlist.iter_mut().enumerate() {
            entry.position = i as u32 + 1;
        }
    }

    /// The structural invariants every operation must preserve: seat
    /// accounting balances and waitlist positions are dense from 1.
    pub fn invariants_ok(&self) -> bool {
        let active = self.bookings.len() as u32;
        self.available <= self.capacity
            && active <= self.capacity
            && self.available + active == self.capacity
            && self
                .waitlist
                .iter()
                .enumerate()
                .all(|(i, e)| e.position == i as u32 + 1)
            && self
                .waitlist
                .windows(2)
                .all(|w| w[0].arrival < w[1].arrival)
    }
}

/// What the engine broadcasts to listeners after each successful mutation.
/// `WaitlistPromoted` is the signal an embedder uses to notify the promoted
/// participant; it is always preceded by the `BookingCancelled` that freed
/// the seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    SlotCreated {
        id: Ulid,
        name: String,
        capacity: u32,
        order: i32,
    },
    SlotArchived {
        id: Ulid,
    },
    BookingCreated {
        booking: Booking,
    },
    BookingCancelled {
        slot_id: Ulid,
        booking_id: Ulid,
    },
    WaitlistJoined {
        entry: WaitlistEntry,
    },
    WaitlistPromoted {
        entry_id: Ulid,
        booking: Booking,
    },
    WaitlistWithdrawn {
        slot_id: Ulid,
        entry_id: Ulid,
    },
}

// ── Query result types ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInfo {
    pub id: Ulid,
    pub name: String,
    pub capacity: u32,
    pub available: u32,
    pub order: i32,
    pub archived: bool,
    pub waitlist_len: usize,
}

impl SlotInfo {
    pub(crate) fn from_state(rs: &SlotState) -> Self {
        Self {
            id: rs.id,
            name: rs.name.clone(),
            capacity: rs.capacity,
            available: rs.available,
            order: rs.order,
            archived: rs.archived,
            waitlist_len: rs.waitlist.len(),
        }
    }
}
