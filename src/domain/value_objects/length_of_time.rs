//! Length of time value object.
//!
//! A duration expressed as a count of some calendar-ish unit, as supplied by
//! clients (e.g. "keep messages for 3 weeks").

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Unit of a [`LengthOfTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    /// Every unit, in increasing order of size.
    pub const ALL: [TimeUnit; 8] = [
        Self::Millis,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::Days,
        Self::Weeks,
        Self::Months,
        Self::Years,
    ];

    /// Milliseconds in one unit. Months are 30 days and years 365 days.
    pub fn millis(&self) -> i64 {
        const SECOND: i64 = 1_000;
        const MINUTE: i64 = 60 * SECOND;
        const HOUR: i64 = 60 * MINUTE;
        const DAY: i64 = 24 * HOUR;

        match self {
            Self::Millis => 1,
            Self::Seconds => SECOND,
            Self::Minutes => MINUTE,
            Self::Hours => HOUR,
            Self::Days => DAY,
            Self::Weeks => 7 * DAY,
            Self::Months => 30 * DAY,
            Self::Years => 365 * DAY,
        }
    }
}

/// A (unit, value) pair.
///
/// The unit is optional because requests may omit it; such values never pass
/// validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthOfTime {
    pub unit: Option<TimeUnit>,
    pub value: i64,
}

impl LengthOfTime {
    pub fn new(unit: TimeUnit, value: i64) -> Self {
        Self {
            unit: Some(unit),
            value,
        }
    }

    /// Convert to a [`Duration`].
    ///
    /// Returns `None` when the unit is unset or the result overflows.
    pub fn to_duration(&self) -> Option<Duration> {
        let unit = self.unit?;
        self.value
            .checked_mul(unit.millis())
            .and_then(Duration::try_milliseconds)
    }
}
