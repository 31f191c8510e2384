//! Validated field values shared by the tracked record types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Serialize, Serializer};

/// Maximum length of short labels such as an activity type.
pub const LABEL_MAX: usize = 100;
/// Maximum length of free-form notes.
pub const NOTES_MAX: usize = 2000;

/// Field-level validation failure for record payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A required field was absent.
    Missing { field: &'static str },
    /// A text field was blank once trimmed.
    Blank { field: &'static str },
    /// A text field exceeded its maximum length.
    TooLong { field: &'static str, max: usize },
    /// A numeric field was negative, NaN or infinite.
    InvalidNumber { field: &'static str },
    /// A date field was neither RFC 3339 nor `YYYY-MM-DD`.
    InvalidDate { field: &'static str },
    /// A time-of-day field was not `HH:MM`.
    InvalidClockTime { field: &'static str },
}

impl RecordValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::Blank { field }
            | Self::TooLong { field, .. }
            | Self::InvalidNumber { field }
            | Self::InvalidDate { field }
            | Self::InvalidClockTime { field } => field,
        }
    }

    /// Stable machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing",
            Self::Blank { .. } => "blank",
            Self::TooLong { .. } => "too_long",
            Self::InvalidNumber { .. } => "invalid_number",
            Self::InvalidDate { .. } => "invalid_date",
            Self::InvalidClockTime { .. } => "invalid_time",
        }
    }
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{field} is required"),
            Self::Blank { field } => write!(f, "{field} must not be blank"),
            Self::TooLong { field, max } => write!(f, "{field} must be at most {max} characters"),
            Self::InvalidNumber { field } => {
                write!(f, "{field} must be a finite, non-negative number")
            }
            Self::InvalidDate { field } => {
                write!(f, "{field} must be an RFC 3339 timestamp or YYYY-MM-DD")
            }
            Self::InvalidClockTime { field } => write!(f, "{field} must be HH:MM"),
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// Non-negative, finite measurement (minutes, kilometres, grams, kcal...).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Quantity(f64);

impl Quantity {
    /// The zero quantity.
    pub const ZERO: Self = Self(0.0);

    /// Validate a raw number for `field`.
    pub fn new(field: &'static str, value: f64) -> Result<Self, RecordValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(RecordValidationError::InvalidNumber { field });
        }
        Ok(Self(value))
    }

    /// Raw value.
    pub fn get(self) -> f64 {
        self.0
    }
}

fn bounded_text(
    field: &'static str,
    raw: &str,
    max: usize,
) -> Result<String, RecordValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RecordValidationError::Blank { field });
    }
    if trimmed.chars().count() > max {
        return Err(RecordValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

/// Short, non-blank, trimmed text such as an activity type or goal title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Validate `raw` for `field`.
    pub fn new(field: &'static str, raw: &str) -> Result<Self, RecordValidationError> {
        bounded_text(field, raw, LABEL_MAX).map(Self)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Free-form trimmed notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Notes(String);

impl Notes {
    /// Validate `raw`; blank notes are treated as absent.
    pub fn parse(field: &'static str, raw: &str) -> Result<Option<Self>, RecordValidationError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        bounded_text(field, raw, NOTES_MAX).map(|text| Some(Self(text)))
    }
}

impl AsRef<str> for Notes {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Parse a record date. Accepts RFC 3339 or a bare `YYYY-MM-DD`, which is
/// read as midnight UTC.
pub fn parse_record_date(
    field: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, RecordValidationError> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or(RecordValidationError::InvalidDate { field })
}

/// 24-hour wall clock time written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parse `HH:MM` for `field`.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, RecordValidationError> {
        let trimmed = raw.trim();
        let well_formed = trimmed.len() == 5 && trimmed.as_bytes().get(2) == Some(&b':');
        if !well_formed {
            return Err(RecordValidationError::InvalidClockTime { field });
        }
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(Self)
            .map_err(|_| RecordValidationError::InvalidClockTime { field })
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for ClockTime {
    type Err = RecordValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("time", s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
