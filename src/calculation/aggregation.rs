//! Totals and summary lines.
//!
//! This module rolls the contribution lines up into the payslip totals and
//! appends the five summary lines. Only contribution lines are summed; summary
//! lines are output for the renderer and never fed back into a sum.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, LineCode, LineGroup, PayLine, PayrollTotals};

use super::contribution_table::ContributionTable;

/// Display order of the first summary line; later rows follow in steps of 10.
pub const SUMMARY_ORDER_START: u32 = 900;

/// The result of aggregating a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// The reconciled totals.
    pub totals: PayrollTotals,
    /// The five summary lines, in display order.
    pub summary_lines: Vec<PayLine>,
    /// The audit step recording the aggregation.
    pub audit_step: AuditStep,
}

/// Aggregates contribution lines into totals.
///
/// Lines that are not contribution lines are ignored, so passing the full
/// payslip is safe.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{
///     aggregate, build_contribution_lines, ContributionTable,
/// };
/// use payroll_engine::models::{ContributionBases, RateSet};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// let table = ContributionTable::from_rates(&RateSet::reference_2025());
/// let bases = ContributionBases { capped: dec("3000.00"), extended: dec("3000.00") };
/// let contributions = build_contribution_lines(&table, &bases, 4);
///
/// let result = aggregate(dec("3000.00"), &contributions.lines, &table, 13);
/// assert_eq!(result.totals.employee_contributions, dec("627.00"));
/// assert_eq!(result.totals.net_payable, dec("2373.00"));
/// assert_eq!(result.totals.employer_cost, dec("3957.30"));
/// assert_eq!(result.summary_lines.len(), 5);
/// ```
pub fn aggregate(
    total_gross: Decimal,
    lines: &[PayLine],
    table: &ContributionTable,
    step_number: u32,
) -> AggregationResult {
    let contributions = || lines.iter().filter(|line| line.is_contribution());

    let employee_contributions: Decimal = contributions()
        .filter_map(|line| line.employee_amount)
        .map(|amount| amount.abs())
        .sum();

    let employer_contributions: Decimal = contributions()
        .filter_map(|line| line.employer_amount)
        .sum();

    let deductible_contributions: Decimal = contributions()
        .filter(|line| table.is_deductible(line.code))
        .filter_map(|line| line.employee_amount)
        .map(|amount| amount.abs())
        .sum();

    let totals = PayrollTotals {
        gross: total_gross,
        employee_contributions,
        employer_contributions,
        taxable_net: total_gross - deductible_contributions,
        net_payable: total_gross - employee_contributions,
        employer_cost: total_gross + employer_contributions,
    };

    let summary_lines = [
        (LineCode::TotalEmployeeShare, totals.employee_contributions),
        (LineCode::TotalEmployerShare, totals.employer_contributions),
        (LineCode::TaxableNet, totals.taxable_net),
        (LineCode::NetPayable, totals.net_payable),
        (LineCode::TotalEmployerCost, totals.employer_cost),
    ]
    .into_iter()
    .zip((SUMMARY_ORDER_START..).step_by(10))
    .map(|((code, amount), order)| PayLine::payable(code, amount, order, LineGroup::Totals))
    .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "aggregation".to_string(),
        rule_name: "Totals Aggregation".to_string(),
        input: serde_json::json!({
            "total_gross": total_gross.to_string(),
            "contribution_lines": contributions().count()
        }),
        output: serde_json::json!({
            "employee_contributions": employee_contributions.to_string(),
            "deductible_contributions": deductible_contributions.to_string(),
            "employer_contributions": employer_contributions.to_string(),
            "taxable_net": totals.taxable_net.to_string(),
            "net_payable": totals.net_payable.to_string(),
            "employer_cost": totals.employer_cost.to_string()
        }),
        reasoning: format!(
            "Gross {} - employee contributions {} = net payable {}; \
             gross {} + employer contributions {} = employer cost {}",
            total_gross,
            employee_contributions,
            totals.net_payable,
            total_gross,
            employer_contributions,
            totals.employer_cost
        ),
    };

    AggregationResult {
        totals,
        summary_lines,
        audit_step,
    }
}
