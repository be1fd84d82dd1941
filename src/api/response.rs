//! Response types for the payroll engine API.
//!
//! This module defines the success bodies, the error response structures and
//! the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, Violation};
use crate::models::{PayrollParameters, PayrollResult, Period, RateSet};
use crate::resolver::RateSource;

/// Body returned by `POST /payroll/compute` on success.
///
/// Everything outside `result` describes this particular call and differs
/// between calls; `result` is identical for identical inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeResponse {
    /// Unique identifier of this computation.
    pub calculation_id: Uuid,
    /// When the computation ran.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Time spent computing, in microseconds.
    pub duration_us: u64,
    /// Where the rates came from.
    pub rate_source: RateSource,
    /// The payslip.
    pub result: PayrollResult,
}

/// Body returned by `GET /payroll/defaults`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsResponse {
    /// The period the defaults apply to.
    pub period: Period,
    /// The regime code.
    pub regime: String,
    /// Effective date of the rate table in force.
    pub effective_date: NaiveDate,
    /// Ceilings, standard hours and overtime premiums.
    pub parameters: PayrollParameters,
    /// The default contribution rates.
    pub rates: RateSet,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Every broken input rule, for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<Violation>>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            violations: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error response for a request missing fields.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid period error response.
    pub fn invalid_period(value: &str) -> Self {
        Self::with_details(
            "INVALID_PERIOD",
            format!("Invalid period: {}", value),
            "Periods are written YYYY-MM",
        )
    }

    /// Creates a failed validation response listing every violation.
    pub fn validation_failed(message: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            violations: Some(violations),
            ..Self::new("VALIDATION_FAILED", message)
        }
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            ),
            EngineError::ConfigParseError { path, message } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            ),
            EngineError::InvalidConfig { field, message } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration",
                    format!("{}: {}", field, message),
                ),
            ),
            EngineError::RateTableNotFound { period } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "RATE_TABLE_NOT_FOUND",
                    format!("No rate table effective for period {}", period),
                    "The requested period predates every configured rate table",
                ),
            ),
            EngineError::ConventionNotFound {
                employer_id,
                employee_id,
            } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new(
                    "CONVENTION_NOT_FOUND",
                    format!(
                        "No convention found for employer '{}' and employee '{}'",
                        employer_id, employee_id
                    ),
                ),
            ),
            EngineError::Validation(failure) => {
                let message = failure.to_string();
                ApiErrorResponse::new(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ApiError::validation_failed(message, failure.violations),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFailure;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
        assert!(!json.contains("violations"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_validation_failure_maps_to_422() {
        let engine_error: EngineError = ValidationFailure {
            violations: vec![Violation::MissingBaseGross],
        }
        .into();

        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "VALIDATION_FAILED");
        assert_eq!(
            api_error.error.violations,
            Some(vec![Violation::MissingBaseGross])
        );
    }

    #[test]
    fn test_rate_table_not_found_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::RateTableNotFound {
            period: "2019-01".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "RATE_TABLE_NOT_FOUND");
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let api_error: ApiErrorResponse = EngineError::InvalidConfig {
            field: "annual_ceiling".to_string(),
            message: "must be strictly positive".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
