use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::services::health;
use crate::services::time::{
    self, BusinessHoursResponse, DateTimeResponse, ServiceInfo, TimeDiffResponse, TimezoneConversion,
    DEFAULT_BUSINESS_TIMEZONE, DEFAULT_END_HOUR, DEFAULT_START_HOUR, DEFAULT_TIMEZONES,
};
use crate::utils::datetime::system_now;
use crate::utils::logging::log_request;

/// Source of the current instant
pub type Clock = fn() -> DateTime<Utc>;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Current-time source for every handler
    pub clock: Clock,
    /// Clock reading when the router was built
    pub start_time: DateTime<Utc>,
}

/// HTTP surface of the time service
pub struct TimeService {
    /// Router with all routes and state attached
    pub router: Router,
}

impl TimeService {
    /// Service backed by the system clock
    pub fn new() -> Self {
        Self::with_clock(system_now)
    }

    /// Service reading the current time from `clock`
    pub fn with_clock(clock: Clock) -> Self {
        let state = AppState {
            clock,
            start_time: clock(),
        };

        let router = Router::new()
            .route("/", get(root))
            .route("/datetime", get(get_current_datetime))
            .route("/datetime/convert", get(convert_timezones))
            .route("/business-hours", get(check_business_hours))
            .route("/time-diff", get(calculate_time_difference))
            .merge(health::routes())
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
            .with_state(state);

        Self { router }
    }
}

impl Default for TimeService {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct CurrentTimeParams {
    tz: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConvertParams {
    time_str: String,
    #[serde(default = "default_timezones")]
    timezones: String,
}

#[derive(Debug, Deserialize)]
struct BusinessHoursParams {
    #[serde(default = "default_business_timezone")]
    tz: String,
    #[serde(default = "default_start_hour")]
    start_hour: i64,
    #[serde(default = "default_end_hour")]
    end_hour: i64,
}

#[derive(Debug, Deserialize)]
struct TimeDiffParams {
    time1: String,
    time2: String,
}

fn default_timezones() -> String {
    DEFAULT_TIMEZONES.to_string()
}

fn default_business_timezone() -> String {
    DEFAULT_BUSINESS_TIMEZONE.to_string()
}

fn default_start_hour() -> i64 {
    DEFAULT_START_HOUR
}

fn default_end_hour() -> i64 {
    DEFAULT_END_HOUR
}

async fn root() -> Json<ServiceInfo> {
    log_request("/", None);
    Json(time::service_info())
}

async fn get_current_datetime(
    State(state): State<AppState>,
    query: Result<Query<CurrentTimeParams>, QueryRejection>,
) -> Result<Json<DateTimeResponse>, ApiError> {
    let Query(params) = query?;
    log_request("/datetime", params.tz.as_deref());

    time::current_time((state.clock)(), params.tz.as_deref()).map(Json)
}

async fn convert_timezones(
    query: Result<Query<ConvertParams>, QueryRejection>,
) -> Result<Json<TimezoneConversion>, ApiError> {
    let Query(params) = query?;
    log_request(
        "/datetime/convert",
        Some(&format!("{} -> {}", params.time_str, params.timezones)),
    );

    time::convert_timezones(&params.time_str, &params.timezones).map(Json)
}

async fn check_business_hours(
    State(state): State<AppState>,
    query: Result<Query<BusinessHoursParams>, QueryRejection>,
) -> Result<Json<BusinessHoursResponse>, ApiError> {
    let Query(params) = query?;
    log_request(
        "/business-hours",
        Some(&format!("{} {}-{}", params.tz, params.start_hour, params.end_hour)),
    );

    time::check_business_hours((state.clock)(), &params.tz, params.start_hour, params.end_hour).map(Json)
}

async fn calculate_time_difference(
    query: Result<Query<TimeDiffParams>, QueryRejection>,
) -> Result<Json<TimeDiffResponse>, ApiError> {
    let Query(params) = query?;
    log_request("/time-diff", Some(&format!("{} -> {}", params.time1, params.time2)));

    time::time_difference(&params.time1, &params.time2).map(Json)
}
