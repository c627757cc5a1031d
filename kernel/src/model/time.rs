use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shared::error::{AppError, AppResult};

/// Wall-clock time of day, stored as minutes since midnight.
///
/// All interval arithmetic in the scheduler runs on this integer form;
/// the "HH:MM" string only exists at the wire and in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

const MINUTES_PER_DAY: u16 = 24 * 60;

impl TimeOfDay {
    /// Builds a time from an hour/minute pair known to be valid.
    /// Panics on out-of-range input, so only use with literals.
    pub const fn at(hours: u16, minutes: u16) -> Self {
        assert!(hours < 24 && minutes < 60);
        Self(hours * 60 + minutes)
    }

    /// Strict "HH:MM" parser: exactly two digits, a colon, two digits,
    /// hours 00-23 and minutes 00-59. "9:30" and "12:30:00" are rejected.
    pub fn parse(s: &str) -> AppResult<Self> {
        let b = s.as_bytes();
        let well_formed = b.len() == 5
            && b[0].is_ascii_digit()
            && b[1].is_ascii_digit()
            && b[2] == b':'
            && b[3].is_ascii_digit()
            && b[4].is_ascii_digit();
        if !well_formed {
            return Err(AppError::InvalidTimeFormat(s.to_owned()));
        }
        let hours = u16::from((b[0] - b'0') * 10 + (b[1] - b'0'));
        let minutes = u16::from((b[3] - b'0') * 10 + (b[4] - b'0'));
        if hours > 23 || minutes > 59 {
            return Err(AppError::InvalidTimeFormat(s.to_owned()));
        }
        Ok(Self(hours * 60 + minutes))
    }

    /// Recovers a time from its persisted minute count.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

/// Strict "YYYY-MM-DD" parser for reservation dates.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDateFormat(s.to_owned()))
}
