#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use datetime_api::error::ErrorResponse;
use datetime_api::services::api::TimeService;
use datetime_api::services::time::{BusinessHoursResponse, DateTimeResponse, TimeDiffResponse, TimezoneConversion};

fn morning_clock() -> DateTime<Utc> {
    // 08:00 in EST
    Utc.with_ymd_and_hms(2024, 3, 4, 13, 0, 0).unwrap()
}

fn evening_clock() -> DateTime<Utc> {
    // 18:00 in EST
    Utc.with_ymd_and_hms(2024, 3, 4, 23, 0, 0).unwrap()
}

fn server_with_clock(clock: fn() -> DateTime<Utc>) -> TestServer {
    TestServer::new(TimeService::with_clock(clock).router).unwrap()
}

#[tokio::test]
async fn test_convert_endpoint_skips_unknown_codes() {
    let server = server_with_clock(morning_clock);

    let response = server
        .get("/datetime/convert")
        .add_query_param("time_str", "2024-01-01T12:00:00Z")
        .add_query_param("timezones", "EST,PST,XXX")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: TimezoneConversion = response.json();
    assert_eq!(body.original_time, "2024-01-01T12:00:00+00:00");
    assert_eq!(body.converted_times.get("EST").map(String::as_str), Some("2024-01-01T07:00:00+00:00"));
    assert_eq!(body.time_differences.get("EST"), Some(&-5.0));
    assert_eq!(body.time_differences.get("PST"), Some(&-8.0));
    assert!(body.converted_times.get("XXX").is_none());
    assert!(body.time_differences.get("XXX").is_none());
}

#[tokio::test]
async fn test_convert_endpoint_default_timezones() {
    let server = server_with_clock(morning_clock);

    let response = server
        .get("/datetime/convert")
        .add_query_param("time_str", "2024-01-01T12:00:00Z")
        .await;

    let body: TimezoneConversion = response.json();
    let mut codes: Vec<&String> = body.converted_times.keys().collect();
    codes.sort();
    assert_eq!(codes, vec!["CET", "EST", "PST"]);
}

#[tokio::test]
async fn test_time_diff_endpoint() {
    let server = server_with_clock(morning_clock);

    let response = server
        .get("/time-diff")
        .add_query_param("time1", "2024-01-01T00:00:00Z")
        .add_query_param("time2", "2024-01-02T06:00:00Z")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: TimeDiffResponse = response.json();
    assert_eq!(body.difference.total_seconds, 108000.0);
    assert_eq!(body.difference.total_hours, 30.0);
    assert_eq!(body.difference.total_days, 1.25);
    assert_eq!(body.difference.days, 1);
    assert_eq!(body.difference.seconds, 21600);
}

#[tokio::test]
async fn test_time_diff_endpoint_negative() {
    let server = server_with_clock(morning_clock);

    let response = server
        .get("/time-diff")
        .add_query_param("time1", "2024-01-02T00:00:00Z")
        .add_query_param("time2", "2024-01-01T00:00:00Z")
        .await;

    let body: TimeDiffResponse = response.json();
    assert_eq!(body.difference.total_seconds, -86400.0);
    assert_eq!(body.difference.days, -1);
    assert_eq!(body.difference.seconds, 0);
}

#[tokio::test]
async fn test_malformed_datetime_is_bad_request_and_service_recovers() {
    let server = server_with_clock(morning_clock);

    let response = server
        .get("/time-diff")
        .add_query_param("time1", "not-a-date")
        .add_query_param("time2", "2024-01-01T00:00:00Z")
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert!(body.detail.contains("Invalid isoformat string: 'not-a-date'"));

    let response = server
        .get("/datetime/convert")
        .add_query_param("time_str", "not-a-date")
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert!(body.detail.starts_with("Invalid datetime format:"));

    let response = server.get("/datetime").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_identical_requests_give_identical_results() {
    let server = server_with_clock(morning_clock);

    let first: TimeDiffResponse = server
        .get("/time-diff")
        .add_query_param("time1", "2024-01-01T00:00:00+05:30")
        .add_query_param("time2", "2024-07-01T12:34:56.789Z")
        .await
        .json();
    let second: TimeDiffResponse = server
        .get("/time-diff")
        .add_query_param("time1", "2024-01-01T00:00:00+05:30")
        .add_query_param("time2", "2024-07-01T12:34:56.789Z")
        .await
        .json();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_business_hours_before_and_after() {
    let server = server_with_clock(morning_clock);
    let body: BusinessHoursResponse = server.get("/business-hours").await.json();
    assert!(!body.is_business_hours);
    assert_eq!(body.current_time, "2024-03-04T08:00:00+00:00");
    assert_eq!(body.hours_until_open, Some(1.0));
    assert_eq!(body.hours_until_close, None);

    let server = server_with_clock(evening_clock);
    let body: BusinessHoursResponse = server.get("/business-hours").await.json();
    assert!(!body.is_business_hours);
    assert_eq!(body.hours_until_open, Some(15.0));
    assert_eq!(body.business_start, "2024-03-04T09:00:00+00:00");
    assert_eq!(body.business_end, "2024-03-04T17:00:00+00:00");
}

#[tokio::test]
async fn test_business_hours_custom_window_and_timezone() {
    let server = server_with_clock(evening_clock);

    // 23:00 UTC is 08:00 the next day in JST
    let body: BusinessHoursResponse = server
        .get("/business-hours")
        .add_query_param("tz", "jst")
        .add_query_param("start_hour", "7")
        .add_query_param("end_hour", "12")
        .await
        .json();

    assert!(body.is_business_hours);
    assert_eq!(body.current_time, "2024-03-05T08:00:00+00:00");
    assert_eq!(body.hours_until_close, Some(4.0));
}

#[tokio::test]
async fn test_datetime_unknown_timezone_falls_back_to_utc() {
    let server = server_with_clock(morning_clock);

    let body: DateTimeResponse = server
        .get("/datetime")
        .add_query_param("tz", "XXX")
        .await
        .json();

    assert_eq!(body.timezone, "UTC");
    assert_eq!(body.utc_datetime, "2024-03-04T13:00:00+00:00");
    assert_eq!(body.local_datetime.as_deref(), Some("2024-03-04T13:00:00+00:00"));
    assert_eq!(body.timestamp, morning_clock().timestamp() as f64);
}

#[tokio::test]
async fn test_convert_endpoint_rejects_shift_past_year_9999() {
    let server = server_with_clock(morning_clock);

    let response = server
        .get("/datetime/convert")
        .add_query_param("time_str", "9999-12-31T20:00:00Z")
        .add_query_param("timezones", "JST")
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.detail, "date value out of range");
}
