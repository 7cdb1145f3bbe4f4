//! Show submission form and start time parsing

use chrono::{DateTime, NaiveDateTime, Utc};

use super::form::{FormFields, FromFormFields};
use super::ValidationError;

/// Naive layouts accepted for `start_time`; interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Validated show submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowForm {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

impl FromFormFields for ShowForm {
    fn from_fields(f: &FormFields) -> Result<Self, ValidationError> {
        let artist_id = f.id("artist_id")?;
        let venue_id = f.id("venue_id")?;
        let raw = f
            .get("start_time")
            .ok_or(ValidationError::Missing { field: "start_time" })?;

        Ok(Self {
            artist_id,
            venue_id,
            start_time: parse_start_time(raw)?,
        })
    }
}

/// Parse a submitted show time.
///
/// Accepts RFC 3339 (`2035-04-01T20:00:00.000Z`) and the naive layouts a
/// datetime widget produces (`2035-04-01 20:00:00`, `2035-04-01T20:00`).
pub fn parse_start_time(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field: "start_time" });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or(ValidationError::InvalidFormat {
            field: "start_time",
            reason: "expected a date and time such as 2035-04-01 20:00:00",
        })
}
