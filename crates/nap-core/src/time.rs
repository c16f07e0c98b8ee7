//! Time-of-day model.
//!
//! # Design
//!
//! A day is a ring of 1,440 minutes.  `TimeOfDay` stores minutes since
//! midnight in `[0, 1440)` and every operation on it is modulo 1440:
//!
//!   t + delta = (t.minutes + delta) mod 1440
//!
//! No calendar dates are modeled.  A nap or bedtime that crosses midnight is
//! representable, but a round trip cannot tell "same day" from "next day"
//! beyond the single wraparound assumption made by
//! [`TimeOfDay::minutes_until`]: the end is always taken to be at or after
//! the start, at most one day later.
//!
//! The free functions at the bottom of the module are string-in/string-out
//! wrappers for callers that hold raw `"HH:MM"` text.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// Minutes in one day; the modulus of all time-of-day arithmetic.
pub const MINUTES_PER_DAY: u32 = 1_440;

// ── TimeOfDay ─────────────────────────────────────────────────────────────────

/// A wall-clock time with minute resolution and no date.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// `00:00`.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Compile-time constructor for literal times in rule tables.
    ///
    /// # Panics
    /// Panics if `hour >= 24` or `minute >= 60`.
    pub const fn hm(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "time of day out of range");
        TimeOfDay(hour * 60 + minute)
    }

    /// Build from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> CoreResult<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(CoreError::InvalidTime(format!("{hour}:{minute:02}")));
        }
        Ok(TimeOfDay((hour * 60 + minute) as u16))
    }

    /// Build from any minute count, wrapping into `[0, 1440)`.
    ///
    /// Negative counts wrap backwards: `-30` is `23:30`.
    #[inline]
    pub fn from_minutes(minutes: i64) -> Self {
        TimeOfDay(minutes.rem_euclid(MINUTES_PER_DAY as i64) as u16)
    }

    /// Minutes since midnight, always `< 1440`.
    #[inline]
    pub fn minutes(self) -> u32 {
        self.0 as u32
    }

    /// Hour component, `0..24`.
    #[inline]
    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    /// Minute component, `0..60`.
    #[inline]
    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }

    /// The time `delta` minutes after `self` (before, if negative).
    #[inline]
    pub fn add_minutes(self, delta: i64) -> Self {
        Self::from_minutes(self.minutes() as i64 + delta)
    }

    /// Minutes from `self` forward to `end`, in `[0, 1440)`.
    ///
    /// `end` is assumed to be later the same day or the next day, never
    /// earlier.
    #[inline]
    pub fn minutes_until(self, end: TimeOfDay) -> u32 {
        let diff = end.minutes() as i64 - self.minutes() as i64;
        diff.rem_euclid(MINUTES_PER_DAY as i64) as u32
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = CoreError;

    /// Parse `H:MM` or `HH:MM`.  Surrounding whitespace is ignored; anything
    /// else that is not a valid 24-hour time is rejected.
    fn from_str(s: &str) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour = parse_component(h, 2).ok_or_else(invalid)?;
        let minute = parse_component(m, 2).ok_or_else(invalid)?;
        if m.len() != 2 {
            return Err(invalid());
        }
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> String {
        t.to_string()
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = CoreError;
    fn try_from(s: String) -> CoreResult<Self> {
        s.parse()
    }
}

/// Up to `max_len` ASCII digits.
fn parse_component(s: &str, max_len: usize) -> Option<u32> {
    if s.is_empty() || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// ── String helpers ────────────────────────────────────────────────────────────

/// Minutes since midnight for an `"HH:MM"` string.
///
/// Blank input yields `Ok(0)`.  Malformed input is an error rather than a
/// best-effort guess.
pub fn time_to_minutes(t: &str) -> CoreResult<u32> {
    if t.trim().is_empty() {
        return Ok(0);
    }
    t.parse::<TimeOfDay>().map(TimeOfDay::minutes)
}

/// Render a minute count as zero-padded `"HH:MM"`, wrapping into one day.
pub fn minutes_to_time(minutes: i64) -> String {
    TimeOfDay::from_minutes(minutes).to_string()
}

/// `t` shifted by `delta` minutes, wrapping around midnight.
pub fn add_minutes(t: &str, delta: i64) -> CoreResult<String> {
    Ok(minutes_to_time(time_to_minutes(t)? as i64 + delta))
}

/// Minutes from `start` forward to `end`; adds a day if `end` is earlier.
pub fn duration_between(start: &str, end: &str) -> CoreResult<u32> {
    let start = time_to_minutes(start)?;
    let end = time_to_minutes(end)?;
    Ok(TimeOfDay::from_minutes(start as i64).minutes_until(TimeOfDay::from_minutes(end as i64)))
}
