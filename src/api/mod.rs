//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for computing payslips and
//! inspecting the defaults in force for a period.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ComputeRequest, DefaultsQuery};
pub use response::{ApiError, ApiErrorResponse, ComputeResponse, DefaultsResponse};
pub use state::AppState;
