//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/payroll`
//! endpoints.

use serde::{Deserialize, Serialize};

use crate::models::{PayrollRequest, RateSet};

/// Request body for `POST /payroll/compute`.
///
/// When `rates` is omitted the server resolves them from the employer
/// conventions, falling back to the default table for the period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeRequest {
    /// The payslip inputs.
    #[serde(alias = "payroll")]
    pub request: PayrollRequest,
    /// Rates to compute with, bypassing resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<RateSet>,
}

/// Query string for `GET /payroll/defaults`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsQuery {
    /// The period to report, `YYYY-MM`; the current month when absent.
    #[serde(default)]
    pub period: Option<String>,
}
