//! The gross-to-net pipeline.
//!
//! [`compute_payroll`] chains validation, gross composition, base derivation,
//! contribution lines and aggregation into one pure call.

use rust_decimal::Decimal;

use crate::error::ValidationFailure;
use crate::models::{
    AuditTrace, AuditWarning, Ceilings, PayLine, PayrollParameters, PayrollRequest,
    PayrollResult, RateSet,
};

use super::aggregation::aggregate;
use super::ceilings::compute_bases;
use super::contribution_table::ContributionTable;
use super::contributions::build_contribution_lines;
use super::gross::compose_gross;
use super::validation::validate_request;

/// Computes a payslip from a request, a resolved rate set and the period
/// parameters.
///
/// The function is pure: identical arguments always produce an identical
/// [`PayrollResult`], and nothing outside the arguments is read. A request that
/// breaks any input rule is rejected with every violation listed.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_payroll;
/// use payroll_engine::models::{LineCode, PayrollParameters, PayrollRequest, RateSet};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// let request = PayrollRequest {
///     base_gross: Some(dec("3000.00")),
///     normal_hours: dec("151.67"),
///     overtime_25_hours: Decimal::ZERO,
///     overtime_50_hours: Decimal::ZERO,
///     bonus: Decimal::ZERO,
///     benefits_in_kind: Decimal::ZERO,
///     period: "2025-03".to_string(),
///     employer_id: "ent_001".to_string(),
///     employee_id: "sal_001".to_string(),
/// };
///
/// let result = compute_payroll(
///     &request,
///     &RateSet::reference_2025(),
///     &PayrollParameters::default(),
/// ).unwrap();
///
/// assert_eq!(result.totals.net_payable, dec("2373.00"));
/// let health = result.line(LineCode::Health).unwrap();
/// assert_eq!(health.employee_amount, Some(dec("-22.50")));
/// ```
pub fn compute_payroll(
    request: &PayrollRequest,
    rates: &RateSet,
    params: &PayrollParameters,
) -> Result<PayrollResult, ValidationFailure> {
    let mut steps = Vec::new();

    let validated = validate_request(request, rates, 1)?;
    steps.push(validated.audit_step);

    let gross = compose_gross(request, validated.base_gross, params, 2)?;
    steps.push(gross.audit_step);

    let bases = compute_bases(gross.total_gross, &params.ceilings, 3);
    steps.push(bases.audit_step);

    let table = ContributionTable::from_rates(rates);
    let contributions = build_contribution_lines(&table, &bases.bases, 4);
    let aggregation_step = 4 + contributions.audit_steps.len() as u32;
    steps.extend(contributions.audit_steps);

    let aggregation = aggregate(
        gross.total_gross,
        &contributions.lines,
        &table,
        aggregation_step,
    );
    steps.push(aggregation.audit_step);

    let warnings = collect_warnings(request, gross.total_gross, params);

    let mut lines: Vec<PayLine> = gross.earnings_lines;
    lines.extend(contributions.lines);
    lines.extend(aggregation.summary_lines);
    lines.sort_by_key(|line| line.order);

    Ok(PayrollResult {
        period: validated.period,
        employer_id: request.employer_id.clone(),
        employee_id: request.employee_id.clone(),
        hourly_rate: gross.hourly_rate,
        bases: bases.bases,
        totals: aggregation.totals,
        lines,
        audit_trace: AuditTrace { steps, warnings },
    })
}

fn collect_warnings(
    request: &PayrollRequest,
    total_gross: Decimal,
    params: &PayrollParameters,
) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();
    let ceilings: &Ceilings = &params.ceilings;

    if total_gross > ceilings.extended() {
        warnings.push(AuditWarning {
            code: "GROSS_ABOVE_EXTENDED_CEILING".to_string(),
            message: format!(
                "Gross {} exceeds the extended ceiling {}; the excess bears no capped or extended contribution",
                total_gross,
                ceilings.extended()
            ),
            severity: "low".to_string(),
        });
    }

    if request.normal_hours > params.standard_monthly_hours {
        warnings.push(AuditWarning {
            code: "NORMAL_HOURS_ABOVE_STANDARD".to_string(),
            message: format!(
                "{} normal hours exceed the standard {} monthly hours; extra hours should be declared as overtime",
                request.normal_hours, params.standard_monthly_hours
            ),
            severity: "medium".to_string(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;
    use crate::models::{LineCode, LineGroup, LineRole};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn request(base_gross: &str) -> PayrollRequest {
        PayrollRequest {
            base_gross: Some(dec(base_gross)),
            normal_hours: dec("151.67"),
            overtime_25_hours: Decimal::ZERO,
            overtime_50_hours: Decimal::ZERO,
            bonus: Decimal::ZERO,
            benefits_in_kind: Decimal::ZERO,
            period: "2025-03".to_string(),
            employer_id: "ent_001".to_string(),
            employee_id: "sal_001".to_string(),
        }
    }

    fn compute(request: &PayrollRequest, rates: &RateSet) -> PayrollResult {
        compute_payroll(request, rates, &PayrollParameters::default()).unwrap()
    }

    #[test]
    fn test_scenario_3000_reference_rates() {
        let result = compute(&request("3000.00"), &RateSet::reference_2025());

        assert_eq!(result.bases.capped, dec("3000.00"));
        assert_eq!(result.bases.extended, dec("3000.00"));

        let health = result.line(LineCode::Health).unwrap();
        assert_eq!(health.employee_amount, Some(dec("-22.50")));
        assert_eq!(health.employer_amount, Some(dec("210.00")));
    }

    #[test]
    fn test_scenario_5000_uses_both_bases() {
        let result = compute(&request("5000.00"), &RateSet::reference_2025());

        assert_eq!(result.bases.capped, dec("3852.00"));
        assert_eq!(result.bases.extended, dec("5000.00"));

        for line in result.contribution_lines() {
            let expected = match line.code {
                LineCode::Health
                | LineCode::RetirementCapped
                | LineCode::Unemployment
                | LineCode::SupplementaryRetirement => dec("3852.00"),
                _ => dec("5000.00"),
            };
            assert_eq!(line.base, Some(expected), "{:?}", line.code);
        }
    }

    #[test]
    fn test_lines_ordered_earnings_contributions_summary() {
        let result = compute(&request("3000.00"), &RateSet::reference_2025());

        let roles: Vec<LineRole> = result.lines.iter().map(|l| l.role()).collect();
        assert_eq!(roles.len(), 1 + 9 + 5);
        assert_eq!(roles[0], LineRole::Earnings);
        assert!(roles[1..10].iter().all(|r| *r == LineRole::Contribution));
        assert!(roles[10..].iter().all(|r| *r == LineRole::Summary));

        let orders: Vec<u32> = result.lines.iter().map(|l| l.order).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted);
    }

    #[test]
    fn test_totals_reconcile_with_lines() {
        let mut req = request("2875.40");
        req.overtime_25_hours = dec("6.5");
        req.overtime_50_hours = dec("2");
        req.bonus = dec("310.00");
        req.benefits_in_kind = dec("48.30");

        let result = compute(&req, &RateSet::reference_2025());

        let employee: Decimal = result
            .contribution_lines()
            .filter_map(|l| l.employee_amount)
            .map(|a| a.abs())
            .sum();
        let employer: Decimal = result
            .contribution_lines()
            .filter_map(|l| l.employer_amount)
            .sum();
        let earnings: Decimal = result
            .lines
            .iter()
            .filter(|l| l.role() == LineRole::Earnings)
            .filter_map(|l| l.payable)
            .sum();

        assert_eq!(employee, result.totals.employee_contributions);
        assert_eq!(employer, result.totals.employer_contributions);
        assert_eq!(earnings, result.totals.gross);
        assert!(result.totals.reconciles());
    }

    #[test]
    fn test_all_zero_rates() {
        let result = compute(&request("3000.00"), &RateSet::zero());

        for line in result.contribution_lines() {
            assert!(line.employee_amount.unwrap_or_default().is_zero());
            assert!(line.employer_amount.unwrap_or_default().is_zero());
        }
        assert_eq!(result.totals.net_payable, dec("3000.00"));
        assert_eq!(result.totals.employer_cost, dec("3000.00"));
    }

    #[test]
    fn test_identical_inputs_give_identical_results() {
        let mut req = request("4321.09");
        req.overtime_25_hours = dec("3");
        let rates = RateSet::reference_2025();

        assert_eq!(compute(&req, &rates), compute(&req, &rates));
    }

    #[test]
    fn test_validation_failure_returned_as_data() {
        let mut req = request("3000.00");
        req.base_gross = None;
        req.period = "2025-3".to_string();

        let failure =
            compute_payroll(&req, &RateSet::reference_2025(), &PayrollParameters::default())
                .unwrap_err();
        assert_eq!(failure.violations.len(), 2);
        assert_eq!(failure.violations[0], Violation::MissingBaseGross);
    }

    #[test]
    fn test_huge_hours_rejected_without_panicking() {
        let mut req = request("3000.00");
        req.overtime_25_hours = dec("79228162514264337593543950335");

        let failure =
            compute_payroll(&req, &RateSet::reference_2025(), &PayrollParameters::default())
                .unwrap_err();
        assert!(failure.contains(|v| matches!(
            v,
            Violation::AmountOutOfRange { field, .. } if field == "overtime_25_hours"
        )));
    }

    #[test]
    fn test_huge_bonus_rejected_without_panicking() {
        let mut req = request("3000.00");
        req.bonus = Decimal::MAX;
        req.benefits_in_kind = Decimal::ONE;

        let failure =
            compute_payroll(&req, &RateSet::reference_2025(), &PayrollParameters::default())
                .unwrap_err();
        assert!(failure.contains(|v| matches!(
            v,
            Violation::AmountOutOfRange { field, .. } if field == "bonus"
        )));
    }

    #[test]
    fn test_overflow_from_parameters_returned_as_data() {
        let mut params = PayrollParameters::default();
        params.standard_monthly_hours = dec("0.0000000001");
        let mut req = request("3000.00");
        req.overtime_50_hours = dec("744");

        let failure = compute_payroll(&req, &RateSet::reference_2025(), &params).unwrap_err();
        assert_eq!(
            failure.violations,
            vec![Violation::AmountOverflow {
                field: "total_gross".to_string(),
            }]
        );
    }

    #[test]
    fn test_negative_bonus_cannot_lower_gross() {
        let mut req = request("3000.00");
        req.bonus = dec("-5000.00");

        let failure =
            compute_payroll(&req, &RateSet::reference_2025(), &PayrollParameters::default())
                .unwrap_err();
        assert_eq!(
            failure.violations,
            vec![Violation::NegativeAmount {
                field: "bonus".to_string(),
                value: dec("-5000.00"),
            }]
        );
    }

    #[test]
    fn test_audit_trace_covers_every_stage() {
        let result = compute(&request("3000.00"), &RateSet::reference_2025());

        let steps = &result.audit_trace.steps;
        assert_eq!(steps.len(), 1 + 1 + 1 + 9 + 1);
        assert_eq!(steps[0].rule_id, "request_validation");
        assert_eq!(steps[1].rule_id, "gross_composition");
        assert_eq!(steps[2].rule_id, "contribution_bases");
        assert_eq!(steps[12].rule_id, "aggregation");
        let numbers: Vec<u32> = steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, (1..=13).collect::<Vec<u32>>());
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_warning_when_gross_exceeds_extended_ceiling() {
        let result = compute(&request("15000.00"), &RateSet::reference_2025());

        assert_eq!(result.bases.extended, dec("11556.00"));
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(
            result.audit_trace.warnings[0].code,
            "GROSS_ABOVE_EXTENDED_CEILING"
        );
    }

    #[test]
    fn test_warning_when_normal_hours_exceed_standard() {
        let mut req = request("3000.00");
        req.normal_hours = dec("160");

        let result = compute(&req, &RateSet::reference_2025());
        assert_eq!(
            result.audit_trace.warnings[0].code,
            "NORMAL_HOURS_ABOVE_STANDARD"
        );
    }

    #[test]
    fn test_summary_group_is_totals() {
        let result = compute(&request("3000.00"), &RateSet::reference_2025());
        let summary = result.line(LineCode::TotalEmployerCost).unwrap();
        assert_eq!(summary.group, LineGroup::Totals);
        assert_eq!(summary.payable, Some(dec("3957.30")));
    }
}
