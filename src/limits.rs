//! Hard caps. Every unbounded input hits one of these before it can grow
//! engine state without limit.

/// Max slots a single engine will hold.
pub const MAX_SLOTS: usize = 100_000;

/// Max seats on one slot.
pub const MAX_CAPACITY: u32 = 100_000;

/// Max entries queued on one slot's waitlist.
pub const MAX_WAITLIST_LEN: usize = 10_000;

/// Max length of a slot or participant name.
pub const MAX_NAME_LEN: usize = 256;

/// Max length of a participant email.
pub const MAX_EMAIL_LEN: usize = 320;

/// Max occurrences one recurrence rule may expand to.
pub const MAX_OCCURRENCES: u32 = 1_000;
