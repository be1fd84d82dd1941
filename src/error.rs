//! Error types for the payroll engine.
//!
//! Two families live here. [`ValidationFailure`] is the only error the pure
//! engine produces: it lists every [`Violation`] found in a request so a caller
//! can report them all at once. [`EngineError`] covers the surrounding layer
//! (configuration loading, rate resolution) and wraps validation failures when
//! they cross into it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single broken input rule.
///
/// # Example
///
/// ```
/// use payroll_engine::error::Violation;
///
/// let violation = Violation::EmptyIdentifier {
///     field: "employer_id".to_string(),
/// };
/// assert_eq!(violation.to_string(), "employer_id must not be empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    /// The base gross amount was not supplied.
    #[error("base gross is required")]
    MissingBaseGross,

    /// The base gross amount was zero or negative.
    #[error("base gross must be strictly positive, got {value}")]
    NonPositiveBaseGross {
        /// The rejected amount.
        value: Decimal,
    },

    /// An hour count was negative.
    #[error("hour count '{field}' must not be negative, got {value}")]
    NegativeHours {
        /// The request field holding the hour count.
        field: String,
        /// The rejected value.
        value: Decimal,
    },

    /// A bonus or benefit-in-kind amount was negative.
    #[error("amount '{field}' must not be negative, got {value}")]
    NegativeAmount {
        /// The request field holding the amount.
        field: String,
        /// The rejected value.
        value: Decimal,
    },

    /// An amount or hour count exceeded the largest accepted monthly value.
    #[error("'{field}' must not exceed {max}, got {value}")]
    AmountOutOfRange {
        /// The request field holding the value.
        field: String,
        /// The rejected value.
        value: Decimal,
        /// The largest accepted value.
        max: Decimal,
    },

    /// A computed amount could not be represented.
    #[error("computed amount '{field}' is too large to represent")]
    AmountOverflow {
        /// The computed amount that overflowed.
        field: String,
    },

    /// The period was not a `YYYY-MM` year-month.
    #[error("period '{value}' is not a valid year-month (expected YYYY-MM)")]
    InvalidPeriod {
        /// The rejected period text.
        value: String,
    },

    /// An employer or employee identifier was empty.
    #[error("{field} must not be empty")]
    EmptyIdentifier {
        /// The request field holding the identifier.
        field: String,
    },

    /// A contribution rate fell outside `[0, 1]`.
    #[error("rate '{field}' must lie between 0 and 1, got {value}")]
    RateOutOfRange {
        /// The rate set field holding the rate.
        field: String,
        /// The rejected rate.
        value: Decimal,
    },
}

/// Every structural problem found in one payroll request.
///
/// Returned as data by [`compute_payroll`](crate::calculation::compute_payroll);
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("invalid payroll request: {}", describe(.violations))]
pub struct ValidationFailure {
    /// The violated rules, in the order they were checked.
    pub violations: Vec<Violation>,
}

impl ValidationFailure {
    /// Returns true if any violation matches the predicate.
    pub fn contains(&self, predicate: impl Fn(&Violation) -> bool) -> bool {
        self.violations.iter().any(predicate)
    }
}

fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The error type for configuration loading and rate resolution.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/regime.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/regime.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value parsed but breaks an invariant.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// No rate table is effective for the requested period.
    #[error("No rate table effective for period {period}")]
    RateTableNotFound {
        /// The requested period.
        period: String,
    },

    /// No convention applies to the employer/employee pair.
    #[error("No convention found for employer '{employer_id}' and employee '{employee_id}'")]
    ConventionNotFound {
        /// The employer identifier.
        employer_id: String,
        /// The employee identifier.
        employee_id: String,
    },

    /// The payroll request was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
