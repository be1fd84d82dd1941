//! Contribution line building.
//!
//! This module applies each [`ContributionRule`] to its base and produces one
//! payslip line per category. Employee shares are recorded as negative
//! amounts, employer shares as positive amounts, each rounded to the cent
//! exactly once.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, ContributionBases, PayLine};

use super::contribution_table::{ContributionRule, ContributionTable};
use super::money::{as_deduction, round_money};

/// The result of building one contribution line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLineResult {
    /// The payslip line.
    pub line: PayLine,
    /// The audit step recording the computation.
    pub audit_step: AuditStep,
}

/// The result of building every contribution line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLinesResult {
    /// One line per category, in table order.
    pub lines: Vec<PayLine>,
    /// One audit step per category.
    pub audit_steps: Vec<AuditStep>,
}

/// Applies one rule to the bases.
///
/// A zero rate or a zero base still yields a line, with `0.00` amounts, so the
/// category stays visible on the payslip.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{build_contribution_line, ContributionTable};
/// use payroll_engine::models::{ContributionBases, LineCode, RateSet};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// let table = ContributionTable::from_rates(&RateSet::reference_2025());
/// let bases = ContributionBases { capped: dec("3000.00"), extended: dec("3000.00") };
///
/// let result = build_contribution_line(table.rule(LineCode::Health).unwrap(), &bases, 4);
/// assert_eq!(result.line.employee_amount, Some(dec("-22.50")));
/// assert_eq!(result.line.employer_amount, Some(dec("210.00")));
/// ```
pub fn build_contribution_line(
    rule: &ContributionRule,
    bases: &ContributionBases,
    step_number: u32,
) -> ContributionLineResult {
    let base = rule.base.select(bases);

    let employee_amount = rule
        .employee_rate
        .map(|rate| as_deduction(round_money(base * rate)));
    let employer_amount = rule.employer_rate.map(|rate| round_money(base * rate));

    let line = PayLine {
        code: rule.code,
        label: rule.code.label().to_string(),
        base: Some(base),
        employee_rate: rule.employee_rate,
        employee_amount,
        employer_rate: rule.employer_rate,
        employer_amount,
        payable: None,
        order: rule.order,
        group: rule.group,
    };

    let describe = |rate: Option<Decimal>, amount: Option<Decimal>| match (rate, amount) {
        (Some(rate), Some(amount)) => format!("{} × {} = {}", base, rate, amount),
        _ => "none".to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: format!("contribution_{}", rule.code.as_str().to_lowercase()),
        rule_name: rule.code.label().to_string(),
        input: serde_json::json!({
            "base_selector": rule.base,
            "base": base.to_string(),
            "employee_rate": rule.employee_rate.map(|r| r.to_string()),
            "employer_rate": rule.employer_rate.map(|r| r.to_string())
        }),
        output: serde_json::json!({
            "employee_amount": employee_amount.map(|a| a.to_string()),
            "employer_amount": employer_amount.map(|a| a.to_string())
        }),
        reasoning: format!(
            "{}: employee {}; employer {}",
            rule.code.as_str(),
            describe(rule.employee_rate, employee_amount),
            describe(rule.employer_rate, employer_amount)
        ),
    };

    ContributionLineResult { line, audit_step }
}

/// Applies every rule of the table, in order.
pub fn build_contribution_lines(
    table: &ContributionTable,
    bases: &ContributionBases,
    step_number_start: u32,
) -> ContributionLinesResult {
    let (lines, audit_steps) = table
        .rules()
        .iter()
        .zip(step_number_start..)
        .map(|(rule, step_number)| {
            let result = build_contribution_line(rule, bases, step_number);
            (result.line, result.audit_step)
        })
        .unzip();

    ContributionLinesResult { lines, audit_steps }
}
