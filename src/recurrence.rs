//! Pure expansion of a recurrence rule into concrete occurrence dates.
//!
//! Calendar-month addition uses chrono's `checked_add_months`, which clamps
//! to the last valid day of the target month: 2024-01-31 + 1 month is
//! 2024-02-29. That is the one rollover rule this crate commits to.

use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::engine::EngineError;
use crate::limits::MAX_OCCURRENCES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for Frequency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(EngineError::InvalidRule("unknown frequency")),
        }
    }
}

/// A repeating pattern anchored to a start date. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Units of `frequency` between occurrences (>= 1).
    pub interval: u32,
    /// Number of occurrences to generate.
    pub count: u32,
}

impl RecurrenceRule {
    pub const DEFAULT_INTERVAL: u32 = 1;
    pub const DEFAULT_COUNT: u32 = 4;

    pub fn new(frequency: Frequency, interval: u32, count: u32) -> Result<Self, EngineError> {
        if interval == 0 {
            return Err(EngineError::InvalidRule("interval must be >= 1"));
        }
        if count > MAX_OCCURRENCES {
            return Err(EngineError::LimitExceeded("too many occurrences"));
        }
        Ok(Self {
            frequency,
            interval,
            count,
        })
    }

    /// Parse the wire form: a frequency string plus optional interval/count.
    /// `"none"` (or empty) means no recurrence and yields `None`; any other
    /// unrecognized frequency is a user error, never a silent no-op.
    pub fn parse(
        frequency: &str,
        interval: Option<u32>,
        count: Option<u32>,
    ) -> Result<Option<Self>, EngineError> {
        if frequency.is_empty() || frequency == "none" {
            return Ok(None);
        }
        let frequency = frequency.parse()?;
        Self::new(
            frequency,
            interval.unwrap_or(Self::DEFAULT_INTERVAL),
            count.unwrap_or(Self::DEFAULT_COUNT),
        )
        .map(Some)
    }
}

/// Expand `rule` into its occurrence dates, oldest first.
///
/// Pure and infallible: an absent rule or `count == 0` yields an empty
/// sequence. Occurrence `i` is the anchor plus `i * interval` units. If date
/// arithmetic would leave chrono's representable range the expansion stops
/// early; with validated rules that is unreachable.
pub fn generate_occurrences(anchor: NaiveDate, rule: Option<&RecurrenceRule>) -> Vec<NaiveDate> {
    let Some(rule) = rule else {
        return Vec::new();
    };
    let mut dates = Vec::with_capacity(rule.count as usize);
    for i in 0..rule.count {
        let date = match rule.frequency {
            Frequency::Daily => {
                anchor.checked_add_days(Days::new(u64::from(i) * u64::from(rule.interval)))
            }
            Frequency::Weekly => {
                anchor.checked_add_days(Days::new(u64::from(i) * u64::from(rule.interval) * 7))
            }
            Frequency::Monthly => i
                .checked_mul(rule.interval)
                .and_then(|months| anchor.checked_add_months(Months::new(months))),
        };
        match date {
            Some(d) => dates.push(d),
            None => break,
        }
    }
    dates
}
