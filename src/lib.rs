//! muster — event occurrence & slot-capacity engine.
//!
//! Two independent pieces composed by the embedding service:
//!
//! - [`recurrence`]: pure expansion of a recurrence rule into concrete
//!   occurrence dates.
//! - [`engine`]: the per-slot capacity/waitlist state machine — book,
//!   cancel, join-waitlist, and promotion in strict arrival order, safe
//!   under concurrent callers.
//!
//! HTTP, auth, persistence, and notification delivery are the embedder's
//! job; the engine reports what happened via return values and the
//! per-slot [`notify::NotifyHub`] broadcast.

pub mod engine;
pub mod limits;
pub mod model;
pub mod notify;
pub mod observability;
pub mod recurrence;

pub use engine::{CancelOutcome, Engine, EngineError, ErrorKind};
pub use model::{Booking, EngineEvent, Participant, SlotInfo, WaitlistEntry};
pub use recurrence::{generate_occurrences, Frequency, RecurrenceRule};
