//! # DateTime API
//! 
//! A small HTTP service for date and time utilities.
//! 
//! ## Features
//! - Current time in UTC, optionally shifted into a timezone
//! - Conversion of one datetime into several timezones
//! - Business-hours checks with time until opening or closing
//! - Signed differences between two datetimes
//! 
//! Timezones come from a fixed table of whole-hour offsets with no DST.

/// Configuration management and environment variables
pub mod config;
/// API errors and their HTTP responses
pub mod error;
/// HTTP router, time operations, and the timezone table
pub mod services;
/// Utility functions for datetime parsing, validation, and logging
pub mod utils;
