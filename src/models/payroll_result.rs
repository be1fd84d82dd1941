//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and its associated structures
//! that capture all outputs of a gross-to-net computation: ordered payslip
//! lines, reconciled totals, the bases used and an audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayLine, Period};

/// The two taxable bases derived from the gross and the ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBases {
    /// Gross clipped to the monthly ceiling.
    pub capped: Decimal,
    /// Gross clipped to three monthly ceilings.
    pub extended: Decimal,
}

/// Aggregated totals for a payslip.
///
/// The totals always reconcile with the lines:
/// `net_payable = gross - employee_contributions` and
/// `employer_cost = gross + employer_contributions`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollTotals;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let totals = PayrollTotals {
///     gross: Decimal::from_str("3000.00").unwrap(),
///     employee_contributions: Decimal::from_str("627.00").unwrap(),
///     employer_contributions: Decimal::from_str("957.30").unwrap(),
///     taxable_net: Decimal::from_str("2460.00").unwrap(),
///     net_payable: Decimal::from_str("2373.00").unwrap(),
///     employer_cost: Decimal::from_str("3957.30").unwrap(),
/// };
/// assert!(totals.reconciles());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Total gross salary.
    pub gross: Decimal,
    /// Sum of employee contributions, as a positive amount.
    pub employee_contributions: Decimal,
    /// Sum of employer contributions.
    pub employer_contributions: Decimal,
    /// Gross less the deductible employee contributions.
    pub taxable_net: Decimal,
    /// Gross less every employee contribution.
    pub net_payable: Decimal,
    /// Gross plus every employer contribution.
    pub employer_cost: Decimal,
}

impl PayrollTotals {
    /// Checks the identities linking the totals.
    pub fn reconciles(&self) -> bool {
        self.net_payable + self.employee_contributions == self.gross
            && self.employer_cost - self.employer_contributions == self.gross
            && self.taxable_net >= self.net_payable
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate inputs that are legal but worth a second look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// The trace is deterministic: two identical computations produce identical
/// traces. Timing belongs to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a payroll computation.
///
/// `lines` holds earnings, then contributions, then the five summary lines,
/// sorted by display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The payroll month.
    pub period: Period,
    /// The employer the payslip belongs to.
    pub employer_id: String,
    /// The employee the payslip belongs to.
    pub employee_id: String,
    /// Hourly rate overtime was paid on, unrounded.
    pub hourly_rate: Decimal,
    /// The bases contributions were computed on.
    pub bases: ContributionBases,
    /// Reconciled totals.
    pub totals: PayrollTotals,
    /// Every payslip line, in display order.
    pub lines: Vec<PayLine>,
    /// Record of each rule applied.
    pub audit_trace: AuditTrace,
}

impl PayrollResult {
    /// Returns the first line with the given code.
    pub fn line(&self, code: super::LineCode) -> Option<&PayLine> {
        self.lines.iter().find(|line| line.code == code)
    }

    /// Iterates over the contribution lines only.
    pub fn contribution_lines(&self) -> impl Iterator<Item = &PayLine> {
        self.lines.iter().filter(|line| line.is_contribution())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineCode, LineGroup};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_totals() -> PayrollTotals {
        PayrollTotals {
            gross: dec("3000.00"),
            employee_contributions: dec("627.00"),
            employer_contributions: dec("957.30"),
            taxable_net: dec("2460.00"),
            net_payable: dec("2373.00"),
            employer_cost: dec("3957.30"),
        }
    }

    fn sample_result() -> PayrollResult {
        let mut health = PayLine::payable(LineCode::Health, dec("0"), 100, LineGroup::Health);
        health.payable = None;
        health.base = Some(dec("3000.00"));
        health.employee_rate = Some(dec("0.0075"));
        health.employee_amount = Some(dec("-22.50"));

        PayrollResult {
            period: Period::new(2025, 3).unwrap(),
            employer_id: "ent_001".to_string(),
            employee_id: "sal_001".to_string(),
            hourly_rate: dec("3000.00") / dec("151.67"),
            bases: ContributionBases {
                capped: dec("3000.00"),
                extended: dec("3000.00"),
            },
            totals: sample_totals(),
            lines: vec![
                PayLine::payable(LineCode::BaseSalary, dec("3000.00"), 10, LineGroup::Earnings),
                health,
                PayLine::payable(LineCode::NetPayable, dec("2373.00"), 930, LineGroup::Totals),
            ],
            audit_trace: AuditTrace::default(),
        }
    }

    #[test]
    fn test_totals_reconcile() {
        assert!(sample_totals().reconciles());
    }

    #[test]
    fn test_totals_detect_drift() {
        let mut totals = sample_totals();
        totals.net_payable = dec("2373.01");
        assert!(!totals.reconciles());
    }

    #[test]
    fn test_line_lookup_by_code() {
        let result = sample_result();
        assert_eq!(
            result.line(LineCode::NetPayable).unwrap().payable,
            Some(dec("2373.00"))
        );
        assert!(result.line(LineCode::Bonus).is_none());
    }

    #[test]
    fn test_contribution_lines_skip_earnings_and_summary() {
        let result = sample_result();
        let codes: Vec<LineCode> = result.contribution_lines().map(|l| l.code).collect();
        assert_eq!(codes, vec![LineCode::Health]);
    }

    #[test]
    fn test_result_serialization() {
        let json = serde_json::to_value(sample_result()).unwrap();
        assert_eq!(json["period"], "2025-03");
        assert_eq!(json["totals"]["net_payable"], "2373.00");
        assert_eq!(json["bases"]["capped"], "3000.00");
        assert_eq!(json["lines"][1]["employee_amount"], "-22.50");
    }

    #[test]
    fn test_result_round_trip() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let parsed: PayrollResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
