//! Calendar dates and offset-preserving timestamps as the Oura API writes them.
//!
//! # Design
//! The API mixes two temporal shapes: a bare `YYYY-MM-DD` day and a full
//! ISO-8601 timestamp carrying its own UTC offset
//! (`2024-01-01T04:00:00.000-05:00`). Both are parsed strictly, without a
//! timezone database or locale. `OffsetTimestamp` keeps the offset it was
//! given; equality and ordering compare instants, so `04:00-05:00` equals
//! `09:00Z`.
//!
//! Serde impls route through `parse`/`format`, so any record field of these
//! types goes through the same codec.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// A temporal string that did not match its expected pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemporalError {
    #[error("invalid calendar date `{raw}`, expected YYYY-MM-DD")]
    CalendarDate { raw: String },

    #[error("invalid offset timestamp `{raw}`: {reason}")]
    OffsetTimestamp { raw: String, reason: String },
}

/// A day with no time-of-day or offset, e.g. `2024-01-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Returns `None` for dates that do not exist (`2024-02-30`).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn parse(raw: &str) -> Result<Self, TemporalError> {
        // chrono accepts single-digit months and days; the API never sends them.
        let bytes = raw.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });
        if !well_formed {
            return Err(TemporalError::CalendarDate { raw: raw.to_string() });
        }
        NaiveDate::parse_from_str(raw, CALENDAR_DATE_FORMAT)
            .map(Self)
            .map_err(|_| TemporalError::CalendarDate { raw: raw.to_string() })
    }

    pub fn format(&self) -> String {
        self.0.format(CALENDAR_DATE_FORMAT).to_string()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for CalendarDate {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

/// An instant together with the UTC offset it was reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetTimestamp(DateTime<FixedOffset>);

impl OffsetTimestamp {
    /// Accepts `YYYY-MM-DDTHH:MM:SS[.fff]` followed by `Z` or `±HH:MM`.
    pub fn parse(raw: &str) -> Result<Self, TemporalError> {
        if raw.as_bytes().get(10) != Some(&b'T') {
            return Err(TemporalError::OffsetTimestamp {
                raw: raw.to_string(),
                reason: "expected `T` between date and time".to_string(),
            });
        }
        // chrono also takes a lowercase `z`.
        if raw.ends_with('z') {
            return Err(TemporalError::OffsetTimestamp {
                raw: raw.to_string(),
                reason: "expected `Z` or `±HH:MM` offset".to_string(),
            });
        }
        DateTime::parse_from_rfc3339(raw)
            .map(Self)
            .map_err(|e| TemporalError::OffsetTimestamp {
                raw: raw.to_string(),
                reason: e.to_string(),
            })
    }

    /// Fractional seconds are written only when non-zero; a zero offset is
    /// written as `+00:00`.
    pub fn format(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }

    pub fn as_datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    pub fn offset(&self) -> FixedOffset {
        *self.0.offset()
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }
}

impl From<DateTime<FixedOffset>> for OffsetTimestamp {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime)
    }
}

impl fmt::Display for OffsetTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for OffsetTimestamp {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for OffsetTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for OffsetTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}
