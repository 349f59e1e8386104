use anyhow::{anyhow, Result};

/// Highest hour of day accepted for business-hours bounds
pub const MAX_HOUR: i64 = 23;

/// Checks that an hour parameter lies in `0..=23`.
pub fn validate_hour(field: &str, value: i64) -> Result<u32> {
    if !(0..=MAX_HOUR).contains(&value) {
        return Err(anyhow!("{} must be between 0 and {}, got {}", field, MAX_HOUR, value));
    }

    u32::try_from(value).map_err(|_| anyhow!("{} is out of range", field))
}

/// Splits a comma-separated list of timezone codes, trimming and uppercasing
/// each entry. Empty entries are kept so they can be reported as unknown.
pub fn parse_timezone_list(timezones: &str) -> Vec<String> {
    timezones
        .split(',')
        .map(|code| code.trim().to_uppercase())
        .collect()
}
