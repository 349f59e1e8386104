use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use tracing::debug;

use crate::utils::datetime::DateTimeError;

/// Outcome of checking a local time against a business-hours window.
///
/// At most one of `hours_until_open` and `hours_until_close` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusinessHoursStatus {
    /// Whether the local time is inside the window
    pub is_business_hours: bool,
    /// Hours until the next opening, when closed
    pub hours_until_open: Option<f64>,
    /// Hours until closing, when open
    pub hours_until_close: Option<f64>,
}

/// Hour of day including minutes as a fraction, e.g. 14:30 is 14.5
pub fn decimal_hour(local: &NaiveDateTime) -> f64 {
    f64::from(local.hour()) + f64::from(local.minute()) / 60.0
}

/// Checks `start_hour <= now < end_hour` on the local clock.
///
/// Windows where `start_hour > end_hour` are compared numerically as well and
/// never wrap past midnight. Past closing, opening is assumed to be on the
/// next calendar day.
pub fn check_if_business_hours(local: &NaiveDateTime, start_hour: u32, end_hour: u32) -> BusinessHoursStatus {
    let current = decimal_hour(local);
    let start = f64::from(start_hour);
    let end = f64::from(end_hour);

    debug!("Current time: {:.2}, Business hours: {}-{}", current, start_hour, end_hour);

    let is_business_hours = start <= current && current < end;

    if is_business_hours {
        let hours_until_close = end - current;
        debug!("Currently open, closes in {:.2}h", hours_until_close);
        return BusinessHoursStatus {
            is_business_hours,
            hours_until_open: None,
            hours_until_close: Some(hours_until_close),
        };
    }

    let hours_until_open = if current < start {
        let hours = start - current;
        debug!("Before business hours, opens in {:.2}h", hours);
        hours
    } else {
        let hours = (24.0 - current) + start;
        debug!("After business hours, opens in {:.2}h", hours);
        hours
    };

    BusinessHoursStatus {
        is_business_hours,
        hours_until_open: Some(hours_until_open),
        hours_until_close: None,
    }
}

/// Today's opening and closing instants on the local date of `local`.
pub fn business_window(
    local: &DateTime<FixedOffset>,
    start_hour: u32,
    end_hour: u32,
) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>), DateTimeError> {
    let at_hour = |hour: u32| {
        local
            .with_hour(hour)
            .and_then(|dt| dt.with_minute(0))
            .and_then(|dt| dt.with_second(0))
            .and_then(|dt| dt.with_nanosecond(0))
            .ok_or(DateTimeError::OutOfRange)
    };

    Ok((at_hour(start_hour)?, at_hour(end_hour)?))
}
