// src/gps/timestamp.rs
//! Timestamp composition from an NMEA time-of-day field

use crate::error::FixError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Pattern for the composed `HHMMSS[.fff],YYYY,MM,DD` string
pub const TIMESTAMP_FORMAT: &str = "%H%M%S%.f,%Y,%m,%d";

/// Calendar date attached to the time-of-day of every sentence.
///
/// GGA and RMC time fields carry no date. With `SystemClock` a fix is always
/// stamped with today's UTC date at parse time, not the day it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceDate {
    #[default]
    SystemClock,
    Fixed(NaiveDate),
}

impl ReferenceDate {
    pub fn resolve(&self) -> NaiveDate {
        match self {
            ReferenceDate::SystemClock => Utc::now().date_naive(),
            ReferenceDate::Fixed(date) => *date,
        }
    }
}

impl From<Option<NaiveDate>> for ReferenceDate {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(ReferenceDate::SystemClock, ReferenceDate::Fixed)
    }
}

/// Combine a `HHMMSS[.fff]` time of day with `date` into a UTC timestamp
pub fn compose_timestamp(time_of_day: &str, date: NaiveDate) -> Result<DateTime<Utc>, FixError> {
    let whole_seconds = time_of_day
        .split_once('.')
        .map_or(time_of_day, |(whole, _)| whole);
    if whole_seconds.len() != 6 || !whole_seconds.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FixError::MalformedTimestamp(time_of_day.to_string()));
    }

    let composed = format!(
        "{},{:04},{:02},{:02}",
        time_of_day,
        date.year(),
        date.month(),
        date.day()
    );

    NaiveDateTime::parse_from_str(&composed, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| FixError::MalformedTimestamp(composed))
}
