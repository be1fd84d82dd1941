//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Datelike, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_payroll;
use crate::error::EngineError;
use crate::models::{PayrollParameters, Period, RateSet};
use crate::resolver::{StaticResolver, resolve_or_default};

use super::request::{ComputeRequest, DefaultsQuery};
use super::response::{ApiError, ApiErrorResponse, ComputeResponse, DefaultsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/compute", post(compute_handler))
        .route("/payroll/defaults", get(defaults_handler))
        .with_state(state)
}

/// Handler for POST /payroll/compute.
///
/// Accepts a payroll request and returns the computed payslip.
async fn compute_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComputeRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let ComputeRequest { request, rates } = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    // An unparseable period is reported by the validator with the other
    // violations; reference parameters stand in until then.
    let (params, default_rates) = match request.period.parse::<Period>() {
        Ok(period) => match period_defaults(&state, &period) {
            Ok(defaults) => defaults,
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    period = %period,
                    error = %err,
                    "No configuration for period"
                );
                return ApiErrorResponse::from(err).into_response();
            }
        },
        Err(_) => (PayrollParameters::default(), RateSet::reference_2025()),
    };

    let resolved = match rates {
        Some(rates) => resolve_or_default(
            &StaticResolver::new(rates),
            &request.employer_id,
            &request.employee_id,
            &default_rates,
        ),
        None => resolve_or_default(
            state.resolver(),
            &request.employer_id,
            &request.employee_id,
            &default_rates,
        ),
    };

    let start_time = Instant::now();
    match compute_payroll(&request, &resolved.rates, &params) {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                employer_id = %result.employer_id,
                employee_id = %result.employee_id,
                period = %result.period,
                gross = %result.totals.gross,
                net_payable = %result.totals.net_payable,
                duration_us = duration.as_micros(),
                "Payroll computed successfully"
            );

            let response = ComputeResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
                rate_source: resolved.source,
                result,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(failure) => {
            warn!(
                correlation_id = %correlation_id,
                violations = failure.violations.len(),
                error = %failure,
                "Payroll request rejected"
            );
            ApiErrorResponse::from(EngineError::from(failure)).into_response()
        }
    }
}

/// Handler for GET /payroll/defaults.
///
/// Returns the parameters and default rates in force for a period.
async fn defaults_handler(
    State(state): State<AppState>,
    Query(query): Query<DefaultsQuery>,
) -> Response {
    let period = match query.period {
        Some(text) => match text.parse::<Period>() {
            Ok(period) => period,
            Err(_) => {
                return ApiErrorResponse::new(StatusCode::BAD_REQUEST, ApiError::invalid_period(&text))
                    .into_response();
            }
        },
        None => {
            let today = Utc::now().date_naive();
            match Period::new(today.year(), today.month()) {
                Some(period) => period,
                None => {
                    return ApiErrorResponse::new(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("INTERNAL_ERROR", "Could not derive the current period"),
                    )
                    .into_response();
                }
            }
        }
    };

    let config = state.config();
    let defaults = config.rate_config_for(&period).and_then(|rate_config| {
        Ok(DefaultsResponse {
            period,
            regime: config.regime().code.clone(),
            effective_date: rate_config.effective_date,
            parameters: config.parameters_for(&period)?,
            rates: rate_config.rates.clone(),
        })
    });

    match defaults {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => {
            warn!(period = %period, error = %err, "No defaults for period");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn period_defaults(
    state: &AppState,
    period: &Period,
) -> Result<(PayrollParameters, RateSet), EngineError> {
    let config = state.config();
    Ok((
        config.parameters_for(period)?,
        config.default_rates_for(period)?.clone(),
    ))
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed serde error
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::resolver::RateSource;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/fr").expect("Failed to load config");
        AppState::new(config)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_compute(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/payroll/compute")
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    fn valid_body() -> serde_json::Value {
        serde_json::json!({
            "request": {
                "base_gross": "3000.00",
                "normal_hours": "151.67",
                "period": "2025-03",
                "employer_id": "ent_001",
                "employee_id": "sal_001"
            }
        })
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_compute(valid_body().to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: ComputeResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.result.totals.net_payable, dec("2373.00"));
        assert_eq!(parsed.rate_source, RateSource::Default);
        assert_eq!(parsed.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let (status, body) = send(router, post_compute("{invalid json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_employer_id_returns_400() {
        let router = create_router(create_test_state());

        let body = r#"{"request": {"base_gross": "3000.00", "period": "2025-03", "employee_id": "sal_001"}}"#;
        let (status, body) = send(router, post_compute(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("employer_id"));
    }

    #[tokio::test]
    async fn test_invalid_request_returns_422_with_violations() {
        let router = create_router(create_test_state());

        let body = serde_json::json!({
            "request": {
                "normal_hours": "-1",
                "period": "2025-13",
                "employer_id": "ent_001",
                "employee_id": ""
            }
        });
        let (status, body) = send(router, post_compute(body.to_string())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_FAILED");

        let rules: Vec<&str> = body["violations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["rule"].as_str().unwrap())
            .collect();
        assert_eq!(
            rules,
            vec![
                "missing_base_gross",
                "negative_hours",
                "invalid_period",
                "empty_identifier"
            ]
        );
    }

    #[tokio::test]
    async fn test_defaults_for_period() {
        let router = create_router(create_test_state());

        let request = Request::builder()
            .uri("/payroll/defaults?period=2025-03")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["effective_date"], "2025-01-01");
        assert_eq!(body["parameters"]["ceilings"]["monthly"], "3852.00");
        assert_eq!(body["rates"]["health_employer"], "0.07");
    }

    #[tokio::test]
    async fn test_defaults_with_invalid_period_returns_400() {
        let router = create_router(create_test_state());

        let request = Request::builder()
            .uri("/payroll/defaults?period=2025-3")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_PERIOD");
    }
}
