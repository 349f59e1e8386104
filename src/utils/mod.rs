/// ISO-8601 parsing, rendering and duration breakdown
pub mod datetime;
/// Log helpers with consistent prefixes
pub mod logging;
/// Query parameter validation
pub mod validation;
