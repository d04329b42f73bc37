//! Parsing of assignment due timestamps.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, Utc};
use thiserror::Error;

/// Seconds precision with a `±HH:MM` offset; `Z` is accepted for UTC.
const DUE_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Error, Debug)]
pub enum DueDateError {
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
    /// Parsed, but not written in the fixed zero-padded shape.
    #[error("expected yyyy-MM-ddTHH:mm:ss followed by Z or ±HH:MM")]
    Shape,
}

/// Parse a `dueAt` value such as `2024-03-01T23:59:59-08:00` into a UTC
/// instant.
///
/// # Errors
///
/// Returns a [`DueDateError`] when `raw` does not follow the format exactly.
/// Fractional seconds, missing offsets, unpadded fields, colon-less offsets
/// and surrounding whitespace are all rejected.
pub fn parse_due_at(raw: &str) -> Result<DateTime<Utc>, DueDateError> {
    let zulu = raw.strip_suffix('Z');
    let normalised = zulu.map_or(Cow::Borrowed(raw), |head| Cow::Owned(format!("{head}+00:00")));
    let parsed = DateTime::parse_from_str(&normalised, DUE_AT_FORMAT)?;
    if canonical(&parsed, zulu.is_some()) != raw {
        return Err(DueDateError::Shape);
    }
    Ok(parsed.with_timezone(&Utc))
}

/// Render `dt` in the fixed shape, with `Z` in place of the offset when
/// `zulu` is set.
fn canonical(dt: &DateTime<FixedOffset>, zulu: bool) -> String {
    let stamp = dt.format(DATE_TIME_FORMAT);
    if zulu {
        format!("{stamp}Z")
    } else {
        format!("{stamp}{}", dt.format("%:z"))
    }
}
