//! Request validation.
//!
//! This module checks a [`PayrollRequest`] and its [`RateSet`] before anything
//! is computed. Every rule is evaluated so the caller receives the complete
//! list of problems in a single [`ValidationFailure`].

use rust_decimal::Decimal;

use crate::error::{ValidationFailure, Violation};
use crate::models::{AuditStep, PayrollRequest, Period, RateSet};

/// Largest accepted monthly amount for the base gross, bonus and benefits in
/// kind.
pub const MAX_MONTHLY_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest accepted hour count: every hour of a 31-day month.
pub const MAX_MONTHLY_HOURS: Decimal = Decimal::from_parts(744, 0, 0, false, 0);

/// A request that passed validation, with its parsed values.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    /// The base gross, known to be strictly positive.
    pub base_gross: Decimal,
    /// The parsed payroll month.
    pub period: Period,
    /// The audit step recording the validation.
    pub audit_step: AuditStep,
}

/// Validates a payroll request and the rates it will be computed with.
///
/// The request is rejected when:
/// - the base gross is absent or not strictly positive;
/// - any hour count is negative;
/// - the bonus or the benefits in kind are negative;
/// - an amount exceeds [`MAX_MONTHLY_AMOUNT`] or an hour count exceeds
///   [`MAX_MONTHLY_HOURS`];
/// - the period is not a `YYYY-MM` year-month;
/// - the employer or employee identifier is empty;
/// - any rate lies outside `[0, 1]`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::validate_request;
/// use payroll_engine::error::Violation;
/// use payroll_engine::models::{PayrollRequest, RateSet};
/// use rust_decimal::Decimal;
///
/// let request = PayrollRequest {
///     base_gross: None,
///     normal_hours: Decimal::ZERO,
///     overtime_25_hours: Decimal::ZERO,
///     overtime_50_hours: Decimal::ZERO,
///     bonus: Decimal::ZERO,
///     benefits_in_kind: Decimal::ZERO,
///     period: "2025-13".to_string(),
///     employer_id: "ent_001".to_string(),
///     employee_id: String::new(),
/// };
///
/// let failure = validate_request(&request, &RateSet::reference_2025(), 1).unwrap_err();
/// assert_eq!(failure.violations.len(), 3);
/// assert_eq!(failure.violations[0], Violation::MissingBaseGross);
/// ```
pub fn validate_request(
    request: &PayrollRequest,
    rates: &RateSet,
    step_number: u32,
) -> Result<ValidatedRequest, ValidationFailure> {
    let mut violations = Vec::new();

    match request.base_gross {
        None => violations.push(Violation::MissingBaseGross),
        Some(value) if value <= Decimal::ZERO => {
            violations.push(Violation::NonPositiveBaseGross { value })
        }
        Some(value) if value > MAX_MONTHLY_AMOUNT => {
            violations.push(out_of_range("base_gross", value, MAX_MONTHLY_AMOUNT))
        }
        Some(_) => {}
    }

    for (field, value) in [
        ("normal_hours", request.normal_hours),
        ("overtime_25_hours", request.overtime_25_hours),
        ("overtime_50_hours", request.overtime_50_hours),
    ] {
        if value < Decimal::ZERO {
            violations.push(Violation::NegativeHours {
                field: field.to_string(),
                value,
            });
        } else if value > MAX_MONTHLY_HOURS {
            violations.push(out_of_range(field, value, MAX_MONTHLY_HOURS));
        }
    }

    for (field, value) in [
        ("bonus", request.bonus),
        ("benefits_in_kind", request.benefits_in_kind),
    ] {
        if value < Decimal::ZERO {
            violations.push(Violation::NegativeAmount {
                field: field.to_string(),
                value,
            });
        } else if value > MAX_MONTHLY_AMOUNT {
            violations.push(out_of_range(field, value, MAX_MONTHLY_AMOUNT));
        }
    }

    let period = request.period.parse::<Period>().ok();
    if period.is_none() {
        violations.push(Violation::InvalidPeriod {
            value: request.period.clone(),
        });
    }

    for (field, value) in [
        ("employer_id", &request.employer_id),
        ("employee_id", &request.employee_id),
    ] {
        if value.trim().is_empty() {
            violations.push(Violation::EmptyIdentifier {
                field: field.to_string(),
            });
        }
    }

    for (field, value) in rates.out_of_range() {
        violations.push(Violation::RateOutOfRange {
            field: field.to_string(),
            value,
        });
    }

    match (request.base_gross, period) {
        (Some(base_gross), Some(period)) if violations.is_empty() => {
            let audit_step = AuditStep {
                step_number,
                rule_id: "request_validation".to_string(),
                rule_name: "Request Validation".to_string(),
                input: serde_json::json!({
                    "base_gross": base_gross.to_string(),
                    "normal_hours": request.normal_hours.to_string(),
                    "overtime_25_hours": request.overtime_25_hours.to_string(),
                    "overtime_50_hours": request.overtime_50_hours.to_string(),
                    "period": request.period,
                    "employer_id": request.employer_id,
                    "employee_id": request.employee_id
                }),
                output: serde_json::json!({
                    "valid": true,
                    "period": period.to_string()
                }),
                reasoning: format!(
                    "Request for period {} accepted with base gross {}",
                    period, base_gross
                ),
            };

            Ok(ValidatedRequest {
                base_gross,
                period,
                audit_step,
            })
        }
        _ => Err(ValidationFailure { violations }),
    }
}

fn out_of_range(field: &str, value: Decimal, max: Decimal) -> Violation {
    Violation::AmountOutOfRange {
        field: field.to_string(),
        value,
        max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn valid_request() -> PayrollRequest {
        PayrollRequest {
            base_gross: Some(dec("3000.00")),
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

    #[test]
    fn test_valid_request_passes() {
        let validated = validate_request(&valid_request(), &RateSet::reference_2025(), 1).unwrap();
        assert_eq!(validated.base_gross, dec("3000.00"));
        assert_eq!(validated.period, Period::new(2025, 3).unwrap());
        assert_eq!(validated.audit_step.rule_id, "request_validation");
        assert_eq!(validated.audit_step.step_number, 1);
    }

    #[test]
    fn test_missing_base_gross_rejected() {
        let mut request = valid_request();
        request.base_gross = None;

        let failure = validate_request(&request, &RateSet::reference_2025(), 1).unwrap_err();
        assert_eq!(failure.violations, vec![Violation::MissingBaseGross]);
    }

    #[test]
    fn test_zero_and_negative_base_gross_rejected() {
        for value in ["0", "0.00", "-100"] {
            let mut request = valid_request();
            request.base_gross = Some(dec(value));

            let failure = validate_request(&request, &RateSet::reference_2025(), 1).unwrap_err();
            assert_eq!(
                failure.violations,
                vec![Violation::NonPositiveBaseGross { value: dec(value) }]
            );
        }
    }

    #[test]
    fn test_negative_hours_rejected_per_field() {
        let mut request = valid_request();
        request.normal_hours = dec("-1");
        request.overtime_50_hours = dec("-0.5");

        let failure = validate_request(&request, &RateSet::reference_2025(), 1).unwrap_err();
        assert_eq!(
            failure.violations,
            vec![
                Violation::NegativeHours {
                    field: "normal_hours".to_string(),
                    value: dec("-1"),
                },
                Violation::NegativeHours {
                    field: "overtime_50_hours".to_string(),
                    value: dec("-0.5"),
                },
            ]
        );
    }

    #[test]
    fn test_zero_hours_accepted() {
        let mut request = valid_request();
        request.normal_hours = Decimal::ZERO;
        assert!(validate_request(&request, &RateSet::reference_2025(), 1).is_ok());
    }

    #[test]
    fn test_invalid_period_rejected() {
        let mut request = valid_request();
        request.period = "March 2025".to_string();

        let failure = validate_request(&request, &RateSet::reference_2025(), 1).unwrap_err();
        assert_eq!(
            failure.violations,
            vec![Violation::InvalidPeriod {
                value: "March 2025".to_string()
            }]
        );
    }

    #[test]
    fn test_blank_identifiers_rejected() {
        let mut request = valid_request();
        request.employer_id = "   ".to_string();
        request.employee_id = String::new();

        let failure = validate_request(&request, &RateSet::reference_2025(), 1).unwrap_err();
        assert_eq!(
            failure.violations,
            vec![
                Violation::EmptyIdentifier {
                    field: "employer_id".to_string()
                },
                Violation::EmptyIdentifier {
                    field: "employee_id".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_out_of_range_rate_rejected() {
        let mut rates = RateSet::reference_2025();
        rates.unemployment_employer = dec("4.05");

        let failure = validate_request(&valid_request(), &rates, 1).unwrap_err();
        assert_eq!(
            failure.violations,
            vec![Violation::RateOutOfRange {
                field: "unemployment_employer".to_string(),
                value: dec("4.05"),
            }]
        );
    }

    #[test]
    fn test_negative_bonus_and_benefits_rejected() {
        let mut request = valid_request();
        request.bonus = dec("-5000.00");
        request.benefits_in_kind = dec("-0.01");

        let failure = validate_request(&request, &RateSet::reference_2025(), 1).unwrap_err();
        assert_eq!(
            failure.violations,
            vec![
                Violation::NegativeAmount {
                    field: "bonus".to_string(),
                    value: dec("-5000.00"),
                },
                Violation::NegativeAmount {
                    field: "benefits_in_kind".to_string(),
                    value: dec("-0.01"),
                },
            ]
        );
    }

    #[test]
    fn test_amounts_above_monthly_maximum_rejected() {
        let mut request = valid_request();
        request.base_gross = Some(Decimal::MAX);
        request.overtime_25_hours = dec("79228162514264337593543950335");
        request.bonus = Decimal::MAX;
        request.benefits_in_kind = dec("1000000000.01");

        let failure = validate_request(&request, &RateSet::reference_2025(), 1).unwrap_err();
        let fields: Vec<&str> = failure
            .violations
            .iter()
            .filter_map(|v| match v {
                Violation::AmountOutOfRange { field, .. } => Some(field.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            fields,
            vec!["base_gross", "overtime_25_hours", "bonus", "benefits_in_kind"]
        );
    }

    #[test]
    fn test_values_at_maximum_accepted() {
        let mut request = valid_request();
        request.base_gross = Some(MAX_MONTHLY_AMOUNT);
        request.overtime_25_hours = MAX_MONTHLY_HOURS;
        request.overtime_50_hours = MAX_MONTHLY_HOURS;
        request.bonus = MAX_MONTHLY_AMOUNT;
        request.benefits_in_kind = MAX_MONTHLY_AMOUNT;

        assert!(validate_request(&request, &RateSet::reference_2025(), 1).is_ok());
    }

    #[test]
    fn test_all_violations_reported_together() {
        let request = PayrollRequest {
            base_gross: Some(dec("-1")),
            normal_hours: dec("-1"),
            overtime_25_hours: dec("-1"),
            overtime_50_hours: dec("-1"),
            bonus: Decimal::ZERO,
            benefits_in_kind: Decimal::ZERO,
            period: "2025-00".to_string(),
            employer_id: String::new(),
            employee_id: String::new(),
        };
        let mut rates = RateSet::reference_2025();
        rates.health_employee = dec("-0.01");

        let failure = validate_request(&request, &rates, 1).unwrap_err();
        assert_eq!(failure.violations.len(), 8);
        assert!(failure.contains(|v| matches!(v, Violation::InvalidPeriod { .. })));
        assert!(failure.contains(|v| matches!(v, Violation::RateOutOfRange { .. })));
    }
}
