/// HTTP router and request handlers
pub mod api;
/// Business-hours window checks
pub mod business_hours;
/// Liveness and health endpoints
pub mod health;
/// Current time, conversion, business hours and time difference queries
pub mod time;
/// Fixed-offset timezone table and conversion
pub mod timezone;
