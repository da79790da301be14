//! Date-range entry, validation, and UTC conversion.
//!
//! The two bounds are stored as raw `YYYY-MM-DDTHH:MM[:SS]` wall-clock
//! strings until submission, so they stay editable and redisplayable.
//! Conversion to UTC happens once, at submission time, against the
//! local timezone (or any [`TimeZone`] in tests).

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Local, NaiveDateTime, Offset, SecondsFormat, TimeZone, Utc};
use thiserror::Error;

/// The two editable bounds of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateField {
    Start,
    End,
}

impl DateField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start date and time",
            Self::End => "End date and time",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Field → message, recomputed on every submit attempt.
pub type ValidationErrors = BTreeMap<DateField, String>;

pub const MSG_START_REQUIRED: &str = "Start date and time are required";
pub const MSG_END_REQUIRED: &str = "End date and time are required";
pub const MSG_END_BEFORE_START: &str = "End must be after start";

/// Conversion failures for a single bound.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("'{value}' is not a valid date and time")]
    Unparseable { value: String },

    /// The wall-clock time does not exist in the given zone (spring-
    /// forward gap).
    #[error("'{value}' does not exist in the local timezone")]
    NonexistentLocalTime { value: String },
}

/// Raw local-datetime strings as the user typed them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DateRangeInput {
    pub start: String,
    pub end: String,
}

impl DateRangeInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw field value. No parsing happens here.
    pub fn set(&mut self, field: DateField, value: impl Into<String>) {
        match field {
            DateField::Start => self.start = value.into(),
            DateField::End => self.end = value.into(),
        }
    }

    pub fn get(&self, field: DateField) -> &str {
        match field {
            DateField::Start => &self.start,
            DateField::End => &self.end,
        }
    }

    /// Validate presence of both bounds and, when both parse, their
    /// ordering. An empty map means the range is submittable.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if self.start.trim().is_empty() {
            errors.insert(DateField::Start, MSG_START_REQUIRED.to_owned());
        }
        if self.end.trim().is_empty() {
            errors.insert(DateField::End, MSG_END_REQUIRED.to_owned());
        }

        if errors.is_empty() {
            let bounds = (parse_wall_clock(&self.start), parse_wall_clock(&self.end));
            if let (Ok(start), Ok(end)) = bounds {
                if end <= start {
                    errors.insert(DateField::End, MSG_END_BEFORE_START.to_owned());
                }
            }
        }

        errors
    }
}

/// Parse a `datetime-local`-shaped string (`YYYY-MM-DDTHH:MM`, seconds
/// optional) into a naive wall-clock time.
pub fn parse_wall_clock(value: &str) -> Result<NaiveDateTime, DateRangeError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| DateRangeError::Unparseable {
            value: value.to_owned(),
        })
}

/// Convert a wall-clock string in the given zone to an ISO-8601 UTC
/// string with millisecond precision and a `Z` suffix.
///
/// DST-ambiguous times resolve to the earlier instant.
pub fn to_utc_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Result<String, DateRangeError> {
    let naive = parse_wall_clock(value)?;
    let zoned = tz
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| DateRangeError::NonexistentLocalTime {
            value: value.trim().to_owned(),
        })?;
    Ok(zoned
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Convert using the system's local timezone.
pub fn to_utc(value: &str) -> Result<String, DateRangeError> {
    to_utc_in(value, &Local)
}

/// Label for the local zone's current UTC offset, shown next to the
/// date inputs for disambiguation. Informational only — the submitted
/// payload carries plain UTC timestamps.
pub fn local_zone_label() -> String {
    let offset = Local::now().offset().fix();
    format!("UTC{offset}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_start_yields_exactly_one_error() {
        let mut range = DateRangeInput::new();
        range.set(DateField::End, "2024-01-01T10:00");

        let errors = range.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&DateField::Start], MSG_START_REQUIRED);
    }

    #[test]
    fn missing_both_yields_both_errors() {
        let errors = DateRangeInput::new().validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[&DateField::Start], MSG_START_REQUIRED);
        assert_eq!(errors[&DateField::End], MSG_END_REQUIRED);
    }

    #[test]
    fn present_and_ordered_range_is_valid() {
        let mut range = DateRangeInput::new();
        range.set(DateField::Start, "2024-06-01T09:00");
        range.set(DateField::End, "2024-06-01T10:00");
        assert!(range.validate().is_empty());
    }

    #[test]
    fn end_not_after_start_is_rejected() {
        let mut range = DateRangeInput::new();
        range.set(DateField::Start, "2024-06-01T10:00");
        range.set(DateField::End, "2024-06-01T10:00");

        let errors = range.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&DateField::End], MSG_END_BEFORE_START);
    }

    #[test]
    fn parse_accepts_optional_seconds() {
        assert!(parse_wall_clock("2024-06-01T09:00").is_ok());
        assert!(parse_wall_clock("2024-06-01T09:00:30").is_ok());
        assert!(parse_wall_clock("yesterday").is_err());
    }

    #[test]
    fn to_utc_applies_the_zone_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let utc = to_utc_in("2024-06-01T09:00", &tz).unwrap();
        assert_eq!(utc, "2024-06-01T07:00:00.000Z");
    }

    #[test]
    fn to_utc_round_trips_through_the_same_offset() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let original = "2024-06-01T09:30:00";

        let utc = to_utc_in(original, &tz).unwrap();
        let parsed = chrono::DateTime::parse_from_rfc3339(&utc).unwrap();
        let local_again = parsed.with_timezone(&tz).naive_local();

        assert_eq!(local_again, parse_wall_clock(original).unwrap());
    }
}
