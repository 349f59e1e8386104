use tracing::{debug, info, warn};

/// Logs an incoming request with consistent format
pub fn log_request(endpoint: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("REQUEST: {} - {}", endpoint, d),
        None => debug!("REQUEST: {}", endpoint),
    }
}

/// Logs a computed result with consistent format
pub fn log_result(endpoint: &str, details: &str) {
    info!("RESULT: {} - {}", endpoint, details);
}

/// Logs validation errors with consistent format
pub fn log_validation_error(field: &str, value: &str, error: &str) {
    warn!("VALIDATION_ERROR: field '{}' value '{}' invalid: {}", field, value, error);
}

/// Logs rejected requests with consistent format
pub fn log_request_rejected(status: u16, error: &str) {
    warn!("REJECTED: {} - {}", status, error);
}

/// Logs a timezone code missing from the offset table
pub fn log_unknown_timezone(code: &str, action: &str) {
    warn!("UNKNOWN_TIMEZONE: '{}' - {}", code, action);
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
