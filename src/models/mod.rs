//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod parameters;
mod pay_line;
mod payroll_result;
mod period;
mod rate_set;
mod request;

pub use parameters::{
    Ceilings, OVERTIME_TIER_1_MULTIPLIER, OVERTIME_TIER_2_MULTIPLIER, PayrollParameters,
    REFERENCE_MONTHLY_CEILING, STANDARD_MONTHLY_HOURS,
};
pub use pay_line::{LineCode, LineGroup, LineRole, PayLine};
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, ContributionBases, PayrollResult, PayrollTotals,
};
pub use period::{InvalidPeriod, Period};
pub use rate_set::RateSet;
pub use request::PayrollRequest;
