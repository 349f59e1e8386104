//! Fixed-offset timezone table and conversion.
//!
//! Offsets are whole hours and never change with daylight saving time.

use chrono::Duration;
use tracing::debug;

use crate::utils::datetime::{ensure_year_in_range, DateTimeError, IsoDateTime};
use crate::utils::logging::log_unknown_timezone;

/// Label reported when a timezone code is not in the table
pub const FALLBACK_TIMEZONE: &str = "UTC";

/// Supported timezone codes and their hour offset from UTC
pub const TIMEZONE_OFFSETS: [(&str, i32); 6] = [
    ("UTC", 0),
    ("EST", -5),
    ("PST", -8),
    ("CET", 1),
    ("JST", 9),
    ("AEST", 10),
];

/// Looks up the hour offset for a code, case-insensitively.
pub fn offset_hours(code: &str) -> Option<i32> {
    let code = code.to_uppercase();
    TIMEZONE_OFFSETS
        .iter()
        .find(|(name, _)| *name == code)
        .map(|(_, offset)| *offset)
}

/// Result of shifting an instant into a timezone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedTime {
    /// Shifted value, always offset-aware
    pub local: IsoDateTime,
    /// Canonical uppercase code, or `UTC` on fallback
    pub timezone: String,
}

impl ConvertedTime {
    /// ISO-8601 rendering of the shifted value
    pub fn to_iso_string(&self) -> String {
        self.local.to_iso_string()
    }
}

/// Shifts `dt` by the table offset for `code`.
///
/// Naive values are treated as UTC. The shifted value keeps the offset label
/// of its input, so `12:00+00:00` in EST renders as `07:00+00:00`. Unknown
/// codes fall back to the unshifted value labelled `UTC`. Shifting past year
/// 1 or year 9999 is an error.
pub fn convert_to_timezone(dt: &IsoDateTime, code: &str) -> Result<ConvertedTime, DateTimeError> {
    let anchored = dt.anchor_utc();

    let Some(offset) = offset_hours(code) else {
        log_unknown_timezone(code, "defaulting to UTC");
        return Ok(ConvertedTime {
            local: IsoDateTime::Aware(anchored),
            timezone: FALLBACK_TIMEZONE.to_string(),
        });
    };

    let local = anchored
        .checked_add_signed(Duration::hours(i64::from(offset)))
        .ok_or(DateTimeError::OutOfRange)
        .and_then(ensure_year_in_range)?;
    let timezone = code.to_uppercase();
    debug!("Converted {} to {}: {}", anchored, timezone, local);

    Ok(ConvertedTime {
        local: IsoDateTime::Aware(local),
        timezone,
    })
}

/// Hour value reported alongside a conversion.
///
/// This is the table offset itself, not a difference from the source
/// value's own offset. Unknown codes report `0.0`.
pub fn calculate_time_difference(code: &str) -> f64 {
    offset_hours(code).map_or(0.0, f64::from)
}
