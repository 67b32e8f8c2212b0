//! Core value types for the itinerary library
//!
//! Everything in here is an immutable value: section geometry snapshots, parsed
//! clock times and date labels, and the error types. Nothing in this module
//! holds state between calls.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, ItineraryError>;

/// A navigable content block and its vertical extent in viewport coordinates.
///
/// Produced by a geometry provider for a single evaluation pass. The tracker
/// never keeps these around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Stable section identifier (a day id on the itinerary page)
    pub id: String,
    /// Top edge, relative to the top of the viewport
    pub top: f64,
    /// Bottom edge, relative to the top of the viewport
    pub bottom: f64,
}

impl Section {
    /// Create a new section snapshot
    pub fn new(id: impl Into<String>, top: f64, bottom: f64) -> Self {
        Self {
            id: id.into(),
            top,
            bottom,
        }
    }

    /// Vertical midpoint of the section
    pub fn midpoint(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    /// True when the section overlaps the viewport by more than `padding` at
    /// either edge. Both comparisons are strict.
    pub fn is_visible(&self, viewport_height: f64, padding: f64) -> bool {
        self.bottom > padding && self.top < viewport_height - padding
    }
}

/// A wall-clock time parsed from an `HH:MM` literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Minute of hour (0-59)
    pub minute: u32,
}

impl ClockTime {
    /// Create a clock time, rejecting out-of-range components
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn to_naive(self) -> NaiveTime {
        // Range was checked on construction.
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for ClockTime {
    type Err = ConversionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || ConversionError::InvalidTime(s.to_string());

        let (hh, mm) = s.split_once(':').ok_or_else(invalid)?;
        let hour = parse_digits(hh, 2).ok_or_else(invalid)?;
        let minute = parse_digits(mm, 2).ok_or_else(invalid)?;

        ClockTime::new(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A partial calendar date as written on the itinerary
///
/// Two shapes are understood:
/// - `MM/DD` with any trailing text (`09/12 Fri`, `09/12–13`); the year is
///   supplied later as a fallback
/// - `YYYY/MM/DD` or `YYYY-MM-DD` with any trailing text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateLabel {
    /// Embedded year, if the label carried one
    pub year: Option<i32>,
    pub month: u32,
    pub day: u32,
}

impl DateLabel {
    /// Resolve to a calendar date, using `fallback_year` when the label has no
    /// year of its own. Returns `None` for impossible dates such as `13/40`.
    pub fn resolve(&self, fallback_year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year.unwrap_or(fallback_year), self.month, self.day)
    }
}

impl FromStr for DateLabel {
    type Err = ConversionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let b = s.as_bytes();

        // MM/DD...
        if b.len() >= 5 && is_digits(&b[0..2]) && b[2] == b'/' && is_digits(&b[3..5]) {
            return Ok(DateLabel {
                year: None,
                month: ascii_number(&b[0..2]),
                day: ascii_number(&b[3..5]),
            });
        }

        // YYYY/MM/DD... or YYYY-MM-DD...
        if b.len() >= 10
            && is_digits(&b[0..4])
            && is_date_separator(b[4])
            && is_digits(&b[5..7])
            && is_date_separator(b[7])
            && is_digits(&b[8..10])
        {
            return Ok(DateLabel {
                year: Some(ascii_number(&b[0..4]) as i32),
                month: ascii_number(&b[5..7]),
                day: ascii_number(&b[8..10]),
            });
        }

        Err(ConversionError::InvalidDate(s.to_string()))
    }
}

fn is_digits(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit)
}

fn is_date_separator(b: u8) -> bool {
    b == b'/' || b == b'-'
}

fn ascii_number(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

/// Parse 1..=max_len ASCII digits
fn parse_digits(s: &str, max_len: usize) -> Option<u32> {
    if s.len() > max_len || !is_digits(s.as_bytes()) {
        return None;
    }
    Some(ascii_number(s.as_bytes()))
}

/// Reasons a dual-time conversion falls back to the degraded form
///
/// These never escape [`crate::format_dual`]; they are exposed for callers that
/// want to know why an annotation is missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("Unknown location or timezone: {0}")]
    UnknownZone(String),

    #[error("Unrecognised date label: {0:?}")]
    InvalidDate(String),

    #[error("Invalid clock time: {0:?}")]
    InvalidTime(String),

    #[error("No instant in {zone} shows {civil}")]
    SearchExhausted { zone: String, civil: String },

    #[error("Date outside the supported calendar range: {0}")]
    OutOfRange(String),
}

/// Errors that can occur while loading or validating an itinerary dataset
#[derive(Debug, thiserror::Error)]
pub enum ItineraryError {
    #[error("Failed to parse itinerary dataset: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate day id: {0}")]
    DuplicateDayId(String),

    #[error("Day at position {0} has an empty id")]
    EmptyDayId(usize),

    #[error("Day not found: {0}")]
    DayNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_visibility() {
        let section = Section::new("d1", 10.0, 50.0);
        assert!(section.is_visible(100.0, 12.0));
        assert_eq!(section.midpoint(), 30.0);

        // Bottom edge exactly at the padding line does not count
        assert!(!Section::new("d2", -40.0, 12.0).is_visible(100.0, 12.0));
        // Top edge exactly at the lower padding line does not count
        assert!(!Section::new("d3", 88.0, 200.0).is_visible(100.0, 12.0));
        // Zero-height sections are fine as long as they sit inside the band
        assert!(Section::new("d4", 50.0, 50.0).is_visible(100.0, 12.0));
    }

    #[test]
    fn test_clock_time_parsing() {
        assert_eq!("17:45".parse::<ClockTime>(), Ok(ClockTime { hour: 17, minute: 45 }));
        assert_eq!("7:05".parse::<ClockTime>(), Ok(ClockTime { hour: 7, minute: 5 }));
        assert_eq!("00:00".parse::<ClockTime>().unwrap().to_string(), "00:00");

        assert!("99:99".parse::<ClockTime>().is_err());
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("ab:cd".parse::<ClockTime>().is_err());
        assert!("1745".parse::<ClockTime>().is_err());
        assert!("17:45:00".parse::<ClockTime>().is_err());
        assert!(":45".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_date_label_short_form() {
        let label: DateLabel = "09/12 Fri".parse().unwrap();
        assert_eq!(label, DateLabel { year: None, month: 9, day: 12 });
        assert_eq!(label.resolve(2025), NaiveDate::from_ymd_opt(2025, 9, 12));

        let range: DateLabel = "09/25–26".parse().unwrap();
        assert_eq!((range.month, range.day), (9, 25));

        let dashed: DateLabel = "10/10-11".parse().unwrap();
        assert_eq!((dashed.month, dashed.day), (10, 10));
    }

    #[test]
    fn test_date_label_full_form() {
        let slash: DateLabel = "2025/09/19 Fri".parse().unwrap();
        assert_eq!(slash.year, Some(2025));
        assert_eq!(slash.resolve(1999), NaiveDate::from_ymd_opt(2025, 9, 19));

        let iso: DateLabel = "2024-02-29".parse().unwrap();
        assert_eq!(iso.resolve(2025), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_date_label_rejects_garbage() {
        assert!("".parse::<DateLabel>().is_err());
        assert!("Fri 09/12".parse::<DateLabel>().is_err());
        assert!("9/12".parse::<DateLabel>().is_err());
        assert!("2025.09.12".parse::<DateLabel>().is_err());

        // Shape is fine but the date does not exist
        let impossible: DateLabel = "13/40 Abc".parse().unwrap();
        assert_eq!(impossible.resolve(2025), None);
    }
}
