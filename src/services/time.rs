//! The four time queries, as pure functions over their parameters and a
//! clock reading.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::services::business_hours::{business_window, check_if_business_hours};
use crate::services::timezone::{calculate_time_difference, convert_to_timezone, offset_hours, FALLBACK_TIMEZONE};
use crate::utils::datetime::{format_aware, parse_iso_datetime, unix_timestamp, DurationBreakdown, IsoDateTime};
use crate::utils::logging::{log_result, log_unknown_timezone, log_validation_error};
use crate::utils::validation::{parse_timezone_list, validate_hour};

/// Timezones used by the conversion query when none are given
pub const DEFAULT_TIMEZONES: &str = "EST,PST,CET";
/// Timezone used by the business-hours query when none is given
pub const DEFAULT_BUSINESS_TIMEZONE: &str = "EST";
/// Default opening hour
pub const DEFAULT_START_HOUR: i64 = 9;
/// Default closing hour
pub const DEFAULT_END_HOUR: i64 = 17;

/// Service description returned from the root endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service name and summary
    pub message: String,
    /// Paths of the query endpoints
    pub endpoints: Vec<String>,
}

/// Current time, optionally shifted into a timezone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateTimeResponse {
    /// Current instant in UTC
    pub utc_datetime: String,
    /// Unix timestamp in fractional seconds
    pub timestamp: f64,
    /// Resolved timezone label
    pub timezone: String,
    /// Shifted rendering, only when a timezone was requested
    pub local_datetime: Option<String>,
}

/// One datetime shifted into several timezones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimezoneConversion {
    /// Parsed input, rendered back
    pub original_time: String,
    /// Shifted rendering per recognized timezone
    pub converted_times: BTreeMap<String, String>,
    /// Raw table offset per timezone, in hours
    pub time_differences: BTreeMap<String, f64>,
}

/// Business-hours check for the current local time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessHoursResponse {
    /// Whether the local time is inside `[start_hour, end_hour)`
    pub is_business_hours: bool,
    /// Local time in the requested timezone
    pub current_time: String,
    /// Opening time on the local date
    pub business_start: String,
    /// Closing time on the local date
    pub business_end: String,
    /// Hours until opening, when closed
    pub hours_until_open: Option<f64>,
    /// Hours until closing, when open
    pub hours_until_close: Option<f64>,
}

/// Signed difference `time2 - time1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeDiffResponse {
    /// First input, rendered back
    pub time1: String,
    /// Second input, rendered back
    pub time2: String,
    /// `time2 - time1` broken down
    pub difference: DurationBreakdown,
}

/// Describes the service and lists its endpoints.
pub fn service_info() -> ServiceInfo {
    ServiceInfo {
        message: "DateTime API - Advanced time operations".to_string(),
        endpoints: ["/datetime", "/datetime/convert", "/business-hours", "/time-diff"]
            .iter()
            .map(|e| e.to_string())
            .collect(),
    }
}

/// Reports `now` in UTC, plus its local rendering when a timezone is given.
///
/// An empty `tz` counts as absent; an unknown one falls back to UTC.
pub fn current_time(now: DateTime<Utc>, tz: Option<&str>) -> Result<DateTimeResponse, ApiError> {
    let utc = IsoDateTime::from(now);

    let (local_datetime, timezone) = match tz.filter(|code| !code.is_empty()) {
        Some(code) => {
            let converted = convert_to_timezone(&utc, code)?;
            let local = converted.to_iso_string();
            log_result("current_time", &format!("converted UTC time to {}: {}", converted.timezone, local));
            (Some(local), converted.timezone)
        }
        None => (None, FALLBACK_TIMEZONE.to_string()),
    };

    Ok(DateTimeResponse {
        utc_datetime: utc.to_iso_string(),
        timestamp: unix_timestamp(&now),
        timezone,
        local_datetime,
    })
}

/// Shifts `time_str` into every recognized code from `timezones`.
///
/// Unknown codes are skipped rather than rejected.
pub fn convert_timezones(time_str: &str, timezones: &str) -> Result<TimezoneConversion, ApiError> {
    let original = parse_iso_datetime(time_str).map_err(|e| {
        log_validation_error("time_str", time_str, &e.to_string());
        e
    })?;

    let mut converted_times = BTreeMap::new();
    let mut time_differences = BTreeMap::new();

    for code in parse_timezone_list(timezones) {
        if offset_hours(&code).is_none() {
            log_unknown_timezone(&code, "skipping");
            continue;
        }

        let converted = convert_to_timezone(&original, &code)?;
        let difference = calculate_time_difference(&code);
        debug!("Timezone {}: {} (diff: {}h)", code, converted.to_iso_string(), difference);

        converted_times.insert(code.clone(), converted.to_iso_string());
        time_differences.insert(code, difference);
    }

    log_result("convert_timezones", &format!("{} timezone(s) converted", converted_times.len()));

    Ok(TimezoneConversion {
        original_time: original.to_iso_string(),
        converted_times,
        time_differences,
    })
}

/// Checks whether `now`, seen in `tz`, falls inside `[start_hour, end_hour)`.
pub fn check_business_hours(
    now: DateTime<Utc>,
    tz: &str,
    start_hour: i64,
    end_hour: i64,
) -> Result<BusinessHoursResponse, ApiError> {
    let start_hour = checked_hour("start_hour", start_hour)?;
    let end_hour = checked_hour("end_hour", end_hour)?;

    let converted = convert_to_timezone(&IsoDateTime::from(now), tz)?;
    // Round-trip through the rendered string so the local value is exactly
    // what callers see in `current_time`.
    let local = parse_iso_datetime(&converted.to_iso_string())?.anchor_utc();

    let status = check_if_business_hours(&local.naive_local(), start_hour, end_hour);
    let (business_start, business_end) = business_window(&local, start_hour, end_hour)?;

    log_result(
        "check_business_hours",
        &format!("{} {}-{} open={}", converted.timezone, start_hour, end_hour, status.is_business_hours),
    );

    Ok(BusinessHoursResponse {
        is_business_hours: status.is_business_hours,
        current_time: format_aware(&local),
        business_start: format_aware(&business_start),
        business_end: format_aware(&business_end),
        hours_until_open: status.hours_until_open,
        hours_until_close: status.hours_until_close,
    })
}

fn checked_hour(field: &str, value: i64) -> Result<u32, ApiError> {
    validate_hour(field, value).map_err(|e| {
        log_validation_error(field, &value.to_string(), &e.to_string());
        ApiError::InvalidParameter(e.to_string())
    })
}

/// Computes `time2 - time1` and breaks it down into days, seconds and totals.
pub fn time_difference(time1: &str, time2: &str) -> Result<TimeDiffResponse, ApiError> {
    let parse = |field: &str, value: &str| {
        parse_iso_datetime(value).map_err(|e| {
            log_validation_error(field, value, &e.to_string());
            e
        })
    };
    let first = parse("time1", time1)?;
    let second = parse("time2", time2)?;

    let difference = DurationBreakdown::from(second.signed_duration_since(&first)?);
    log_result("time_difference", &format!("{}s", difference.total_seconds));

    Ok(TimeDiffResponse {
        time1: first.to_iso_string(),
        time2: second.to_iso_string(),
        difference,
    })
}
