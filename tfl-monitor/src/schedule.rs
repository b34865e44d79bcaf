//! Active-window gating.
//!
//! A schedule is a set of weekdays plus a daily time window. Features (and
//! individual journey destinations) only poll the upstream API while their
//! schedule is active; outside the window the poller emits an inactive
//! outcome instead of making a request.

use std::fmt;

use chrono::{DateTime, Datelike, Local, Timelike};
use serde::Deserialize;

/// Error returned when parsing an invalid "HH:MM" string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time of day: {reason}")]
pub struct TimeOfDayError {
    reason: &'static str,
}

impl TimeOfDayError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A wall-clock time of day, stored as minutes since midnight.
///
/// Schedule boundaries are minute-granular, so this deliberately carries no
/// seconds and no date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Parse a time from "HH:MM" format.
    pub fn parse(s: &str) -> Result<Self, TimeOfDayError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeOfDayError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeOfDayError::new("expected colon at position 2"));
        }

        let hour = parse_two_digits(&bytes[0..2])
            .ok_or_else(|| TimeOfDayError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeOfDayError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeOfDayError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeOfDayError::new("minute must be 0-59"));
        }

        Ok(Self(hour * 60 + minute))
    }

    /// Construct from minutes since midnight. Returns `None` past 23:59.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < 24 * 60 {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Minutes since midnight (0..1440).
    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TimeOfDay::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse exactly two ASCII digits.
fn parse_two_digits(bytes: &[u8]) -> Option<u16> {
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some((d1 * 10 + d2) as u16)
}

/// Daily active hours, start inclusive and end exclusive.
///
/// `start > end` is an overnight window wrapping past midnight;
/// `start == end` is an empty window that never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveHours {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// A day-set plus time-range gate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Weekday indices, 0 = Sunday through 6 = Saturday.
    pub active_days: Vec<u8>,

    /// Daily window during which the schedule is active.
    pub active_hours: ActiveHours,
}

impl Schedule {
    /// Whether the schedule is active at the given weekday and minute.
    ///
    /// `day` uses 0 = Sunday through 6 = Saturday; `minutes` is minutes
    /// since midnight.
    pub fn contains(&self, day: u8, minutes: u16) -> bool {
        if !self.active_days.contains(&day) {
            return false;
        }

        let start = self.active_hours.start.minutes();
        let end = self.active_hours.end.minutes();

        if start <= end {
            start <= minutes && minutes < end
        } else {
            // Overnight window, e.g. 22:00 to 08:00
            minutes >= start || minutes < end
        }
    }
}

/// Whether `schedule` is active at `now`. An absent schedule is always active.
pub fn is_active(schedule: Option<&Schedule>, now: DateTime<Local>) -> bool {
    let Some(schedule) = schedule else {
        return true;
    };

    let day = now.weekday().num_days_from_sunday() as u8;
    let minutes = (now.hour() * 60 + now.minute()) as u16;
    schedule.contains(day, minutes)
}
