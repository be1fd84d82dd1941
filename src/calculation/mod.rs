//! Calculation logic for the payroll engine.
//!
//! This module contains the stages of the gross-to-net pipeline: request
//! validation, gross composition, ceiling-based contribution bases, the
//! contribution rule table and line builder, and the final aggregation into
//! totals. [`compute_payroll`] runs them in order.

mod aggregation;
mod ceilings;
mod contribution_table;
mod contributions;
mod engine;
mod gross;
mod money;
mod validation;

pub use aggregation::{AggregationResult, SUMMARY_ORDER_START, aggregate};
pub use ceilings::{BasesResult, capped_base, compute_bases, extended_base};
pub use contribution_table::{
    BaseSelector, CONTRIBUTION_ORDER_START, ContributionRule, ContributionTable,
};
pub use contributions::{
    ContributionLineResult, ContributionLinesResult, build_contribution_line,
    build_contribution_lines,
};
pub use engine::compute_payroll;
pub use gross::{
    EARNINGS_ORDER_START, GrossComposition, MAX_TOTAL_GROSS, compose_gross, hourly_rate,
};
pub use money::{MONEY_SCALE, as_deduction, round_money};
pub use validation::{
    MAX_MONTHLY_AMOUNT, MAX_MONTHLY_HOURS, ValidatedRequest, validate_request,
};
