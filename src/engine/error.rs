use ulid::Ulid;

/// Coarse classification for callers mapping errors to responses:
/// bad input vs a state the caller raced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UserInput,
    StateConflict,
}

#[derive(Debug)]
pub enum EngineError {
    SlotNotFound(Ulid),
    /// No seats left; the caller should offer the waitlist.
    SlotFull(Ulid),
    /// Seats are still open — joining the waitlist now is a caller error.
    SlotNotFull(Ulid),
    BookingNotFound(Ulid),
    WaitlistEntryNotFound(Ulid),
    SlotArchived(Ulid),
    InvalidCapacity(u32),
    InvalidParticipant(&'static str),
    InvalidRule(&'static str),
    LimitExceeded(&'static str),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidCapacity(_)
            | EngineError::InvalidParticipant(_)
            | EngineError::InvalidRule(_)
            | EngineError::LimitExceeded(_) => ErrorKind::UserInput,
            EngineError::SlotNotFound(_)
            | EngineError::SlotFull(_)
            | EngineError::SlotNotFull(_)
            | EngineError::BookingNotFound(_)
            | EngineError::WaitlistEntryNotFound(_)
            | EngineError::SlotArchived(_) => ErrorKind::StateConflict,
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::SlotNotFound(id) => write!(f, "slot not found: {id}"),
            EngineError::SlotFull(id) => write!(f, "slot full: {id}"),
            EngineError::SlotNotFull(id) => {
                write!(f, "slot {id} still has open seats; book instead of waitlisting")
            }
            EngineError::BookingNotFound(id) => write!(f, "booking not found: {id}"),
            EngineError::WaitlistEntryNotFound(id) => {
                write!(f, "waitlist entry not found: {id}")
            }
            EngineError::SlotArchived(id) => write!(f, "slot archived: {id}"),
            EngineError::InvalidCapacity(cap) => {
                write!(f, "invalid capacity {cap}: must be >= 1")
            }
            EngineError::InvalidParticipant(msg) => write!(f, "invalid participant: {msg}"),
            EngineError::InvalidRule(msg) => write!(f, "invalid recurrence rule: {msg}"),
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
