// Civil-date helpers: epoch seconds -> calendar date under a configured UTC offset.
// The offset is explicit so bucketing never depends on the host timezone.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};

/// Weekday names indexed by days since Sunday.
const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Offsets must stay strictly inside ±18h.
pub const MAX_OFFSET_SECS: i32 = 18 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Calendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// UTC calendar.
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Builds a calendar from an offset in seconds east of UTC. None when out of ±18h.
    pub fn from_offset_secs(secs: i32) -> Option<Self> {
        if secs.unsigned_abs() >= MAX_OFFSET_SECS.unsigned_abs() {
            return None;
        }
        FixedOffset::east_opt(secs).map(Self::new)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date of `ts` in this calendar's offset. None if `ts` is out of chrono's range.
    pub fn civil_date(&self, ts: i64) -> Option<NaiveDate> {
        DateTime::from_timestamp(ts, 0).map(|dt| dt.with_timezone(&self.offset).date_naive())
    }

    /// True iff both timestamps fall on the same calendar day (year, month, day).
    pub fn is_same_date(&self, t1: i64, t2: i64) -> bool {
        match (self.civil_date(t1), self.civil_date(t2)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Weekday name of `ts`, e.g. "Monday".
    pub fn day_of_week(&self, ts: i64) -> Option<&'static str> {
        self.civil_date(ts).map(weekday_name)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

/// Weekday name of a calendar date.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}
