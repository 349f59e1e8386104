use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MICROS_PER_SECOND: i128 = 1_000_000;
const MICROS_PER_DAY: i128 = 86_400 * MICROS_PER_SECOND;

/// Earliest year that renders and parses as four digits
pub const MIN_YEAR: i32 = 1;
/// Latest year that renders and parses as four digits
pub const MAX_YEAR: i32 = 9999;

/// Failures while parsing or doing arithmetic on datetimes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    /// The input is not an ISO-8601 datetime
    #[error("Invalid isoformat string: '{0}'")]
    InvalidFormat(String),
    /// A naive and an offset-aware value cannot be compared
    #[error("can't subtract offset-naive and offset-aware datetimes")]
    MixedOffsets,
    /// Arithmetic left the representable date range
    #[error("date value out of range")]
    OutOfRange,
}

/// A parsed ISO-8601 datetime. Values without offset information stay naive
/// until something needs to anchor them to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsoDateTime {
    /// Wall-clock value without an offset
    Naive(NaiveDateTime),
    /// Value carrying a fixed UTC offset
    Aware(DateTime<FixedOffset>),
}

impl IsoDateTime {
    /// Returns the value with an offset, treating naive values as UTC.
    pub fn anchor_utc(&self) -> DateTime<FixedOffset> {
        match self {
            IsoDateTime::Naive(naive) => naive.and_utc().fixed_offset(),
            IsoDateTime::Aware(dt) => *dt,
        }
    }

    /// Signed duration `self - earlier`.
    pub fn signed_duration_since(&self, earlier: &IsoDateTime) -> Result<Duration, DateTimeError> {
        match (self, earlier) {
            (IsoDateTime::Naive(a), IsoDateTime::Naive(b)) => Ok(a.signed_duration_since(*b)),
            (IsoDateTime::Aware(a), IsoDateTime::Aware(b)) => Ok(a.signed_duration_since(*b)),
            _ => Err(DateTimeError::MixedOffsets),
        }
    }

    /// Renders the value the way it was parsed: no offset for naive values.
    pub fn to_iso_string(&self) -> String {
        match self {
            IsoDateTime::Naive(naive) => format_naive(naive),
            IsoDateTime::Aware(dt) => format_aware(dt),
        }
    }
}

impl From<DateTime<Utc>> for IsoDateTime {
    fn from(value: DateTime<Utc>) -> Self {
        IsoDateTime::Aware(value.fixed_offset())
    }
}

/// Rejects values whose local year falls outside `MIN_YEAR..=MAX_YEAR`.
pub fn ensure_year_in_range(dt: DateTime<FixedOffset>) -> Result<DateTime<FixedOffset>, DateTimeError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&dt.year()) {
        Ok(dt)
    } else {
        Err(DateTimeError::OutOfRange)
    }
}

/// Parses an ISO-8601 datetime, accepting `Z` as `+00:00`.
///
/// Accepted shapes: `YYYY-MM-DD`, optionally followed by `T` or a space and
/// `HH[:MM[:SS[.fff...]]]`, optionally followed by `±HH[:MM[:SS]]` or `±HHMM`.
pub fn parse_iso_datetime(input: &str) -> Result<IsoDateTime, DateTimeError> {
    let normalized = input.replace('Z', "+00:00");
    let invalid = || DateTimeError::InvalidFormat(normalized.clone());

    let date_part = normalized.get(..10).ok_or_else(invalid)?;
    if !matches_shape(date_part, "dddd-dd-dd") {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| invalid())?;

    let mut rest = normalized[10..].chars();
    let separator = match rest.next() {
        None => return Ok(IsoDateTime::Naive(date.and_time(NaiveTime::MIN))),
        Some(c) => c,
    };
    if separator != 'T' && separator != ' ' {
        return Err(invalid());
    }

    let remainder = rest.as_str();
    let (time_part, offset_part) = match remainder.find(|c: char| c == '+' || c == '-') {
        Some(idx) => (&remainder[..idx], Some(&remainder[idx..])),
        None => (remainder, None),
    };

    let time = parse_time(time_part).ok_or_else(invalid)?;
    let naive = date.and_time(time);

    match offset_part {
        None => Ok(IsoDateTime::Naive(naive)),
        Some(raw) => {
            let offset = parse_offset(raw).ok_or_else(invalid)?;
            naive
                .and_local_timezone(offset)
                .single()
                .map(IsoDateTime::Aware)
                .ok_or_else(invalid)
        }
    }
}

fn matches_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(v, s)| match s {
            b'd' => v.is_ascii_digit(),
            other => v == other,
        })
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    let (clock, fraction) = match value.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (value, None),
    };

    let fields: Vec<&str> = clock.split(':').collect();
    if fields.len() > 3 || !fields.iter().all(|f| matches_shape(f, "dd")) {
        return None;
    }

    let hour = fields.first()?.parse().ok()?;
    let minute = fields.get(1).map_or(Some(0), |f| f.parse().ok())?;
    let second = fields.get(2).map_or(Some(0), |f| f.parse().ok())?;

    let micros = match fraction {
        None => 0,
        Some(digits) => {
            if fields.len() != 3 || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            // Anything past microseconds is dropped
            let mut padded: String = digits.chars().take(6).collect();
            while padded.len() < 6 {
                padded.push('0');
            }
            padded.parse().ok()?
        }
    };

    NaiveTime::from_hms_micro_opt(hour, minute, second, micros)
}

fn parse_offset(value: &str) -> Option<FixedOffset> {
    let sign = match value.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let body = &value[1..];

    let fields: Vec<&str> = if body.contains(':') {
        body.split(':').collect()
    } else if matches_shape(body, "dddd") {
        vec![&body[..2], &body[2..]]
    } else {
        vec![body]
    };
    if fields.len() > 3 || !fields.iter().all(|f| matches_shape(f, "dd")) {
        return None;
    }

    let hours: i32 = fields.first()?.parse().ok()?;
    let minutes: i32 = fields.get(1).map_or(Some(0), |f| f.parse().ok())?;
    let seconds: i32 = fields.get(2).map_or(Some(0), |f| f.parse().ok())?;
    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    let total = hours * 3600 + minutes * 60 + seconds;
    if total >= 86_400 {
        return None;
    }
    FixedOffset::east_opt(sign * total)
}

/// `YYYY-MM-DDTHH:MM:SS` with `.ffffff` appended only for non-zero microseconds
pub fn format_naive(dt: &NaiveDateTime) -> String {
    let base = dt.format("%Y-%m-%dT%H:%M:%S");
    let micros = dt.nanosecond() / 1_000;
    if micros == 0 {
        base.to_string()
    } else {
        format!("{base}.{micros:06}")
    }
}

/// Renders an offset as `±HH:MM`, adding `:SS` only when needed.
pub fn format_offset(offset: &FixedOffset) -> String {
    let total = offset.local_minus_utc();
    let sign = if total < 0 { '-' } else { '+' };
    let total = total.abs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if seconds == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Wall-clock rendering followed by the offset
pub fn format_aware(dt: &DateTime<FixedOffset>) -> String {
    format!("{}{}", format_naive(&dt.naive_local()), format_offset(dt.offset()))
}

/// Unix timestamp in fractional seconds
pub fn unix_timestamp(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp_micros() as f64 / MICROS_PER_SECOND as f64
}

/// Current UTC time at microsecond precision
pub fn system_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A signed duration broken down into whole units and fractional totals.
///
/// `days` and `seconds` use floor division over the microsecond total, so a
/// negative duration yields a negative day count and a non-negative remainder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationBreakdown {
    /// Whole days, floored
    pub days: i64,
    /// Seconds left over after whole days, always in `0..86400`
    pub seconds: i64,
    /// Exact signed total
    pub total_seconds: f64,
    /// `total_seconds / 60`
    pub total_minutes: f64,
    /// `total_seconds / 3600`
    pub total_hours: f64,
    /// `total_seconds / 86400`
    pub total_days: f64,
}

impl From<Duration> for DurationBreakdown {
    fn from(duration: Duration) -> Self {
        let total_micros = i128::from(duration.num_seconds()) * MICROS_PER_SECOND
            + i128::from(duration.subsec_nanos() / 1_000);

        let days = total_micros.div_euclid(MICROS_PER_DAY);
        let seconds = total_micros.rem_euclid(MICROS_PER_DAY) / MICROS_PER_SECOND;
        let total_seconds = total_micros as f64 / MICROS_PER_SECOND as f64;

        Self {
            days: days as i64,
            seconds: seconds as i64,
            total_seconds,
            total_minutes: total_seconds / 60.0,
            total_hours: total_seconds / 3600.0,
            total_days: total_seconds / 86400.0,
        }
    }
}
