//! Gross salary composition.
//!
//! This module expands the raw period inputs (base salary, two overtime tiers,
//! bonus and benefits in kind) into the total gross and its earnings lines.
//!
//! ## Overtime
//!
//! Overtime is paid on the hourly rate implied by the base salary:
//! - **Tier 1:** hours × hourly rate × 1.25
//! - **Tier 2:** hours × hourly rate × 1.50
//!
//! The hourly rate is not rounded; each tier amount is rounded once.
//!
//! Products and sums are checked. An amount that cannot be represented, or a
//! total gross above [`MAX_TOTAL_GROSS`], fails the composition with an
//! [`AmountOverflow`](Violation::AmountOverflow) violation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationFailure, Violation};
use crate::models::{AuditStep, LineCode, LineGroup, PayLine, PayrollParameters, PayrollRequest};

use super::money::round_money;

/// Display order of the base salary line; later earnings follow in steps of 10.
pub const EARNINGS_ORDER_START: u32 = 10;

/// Largest total gross the later steps accept, one thousand billion.
pub const MAX_TOTAL_GROSS: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// The result of composing the gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossComposition {
    /// Total gross salary.
    pub total_gross: Decimal,
    /// Hourly rate derived from the base salary, unrounded.
    pub hourly_rate: Decimal,
    /// One line per non-zero component; the base salary is always present.
    pub earnings_lines: Vec<PayLine>,
    /// The audit step recording the composition.
    pub audit_step: AuditStep,
}

/// Computes the hourly rate implied by a monthly base salary.
///
/// Returns zero rather than dividing by zero when the standard hours are zero.
pub fn hourly_rate(base_gross: Decimal, standard_monthly_hours: Decimal) -> Decimal {
    base_gross
        .checked_div(standard_monthly_hours)
        .unwrap_or(Decimal::ZERO)
}

/// Composes the gross salary from the request inputs.
///
/// `base_gross` is the validated base salary. The total gross is the sum of the
/// earnings lines' payable amounts, so the two can never drift apart.
///
/// Fails when an overtime amount or the total gross overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compose_gross;
/// use payroll_engine::models::{LineCode, PayrollParameters, PayrollRequest};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// let request = PayrollRequest {
///     base_gross: Some(dec("3000.00")),
///     normal_hours: dec("151.67"),
///     overtime_25_hours: dec("10"),
///     overtime_50_hours: Decimal::ZERO,
///     bonus: dec("200.00"),
///     benefits_in_kind: Decimal::ZERO,
///     period: "2025-03".to_string(),
///     employer_id: "ent_001".to_string(),
///     employee_id: "sal_001".to_string(),
/// };
///
/// let gross = compose_gross(&request, dec("3000.00"), &PayrollParameters::default(), 2).unwrap();
///
/// assert_eq!(gross.earnings_lines.len(), 3);
/// assert_eq!(gross.earnings_lines[1].code, LineCode::Overtime25);
/// assert_eq!(gross.earnings_lines[1].payable, Some(dec("247.25")));
/// assert_eq!(gross.total_gross, dec("3447.25"));
/// ```
pub fn compose_gross(
    request: &PayrollRequest,
    base_gross: Decimal,
    params: &PayrollParameters,
    step_number: u32,
) -> Result<GrossComposition, ValidationFailure> {
    let hourly = hourly_rate(base_gross, params.standard_monthly_hours);

    let tier1_pay = overtime_pay(
        request.overtime_25_hours,
        hourly,
        params.overtime_tier_1_multiplier,
    );
    let tier2_pay = overtime_pay(
        request.overtime_50_hours,
        hourly,
        params.overtime_tier_2_multiplier,
    );
    let (tier1_pay, tier2_pay) = match (tier1_pay, tier2_pay) {
        (Some(tier1), Some(tier2)) => (tier1, tier2),
        (tier1, tier2) => {
            let violations = [("overtime_25_pay", tier1), ("overtime_50_pay", tier2)]
                .into_iter()
                .filter(|(_, pay)| pay.is_none())
                .map(|(field, _)| overflow(field))
                .collect();
            return Err(ValidationFailure { violations });
        }
    };

    let components = [
        (LineCode::BaseSalary, base_gross),
        (LineCode::Overtime25, tier1_pay),
        (LineCode::Overtime50, tier2_pay),
        (LineCode::Bonus, request.bonus),
        (LineCode::BenefitsInKind, request.benefits_in_kind),
    ];

    let earnings_lines: Vec<PayLine> = components
        .iter()
        .enumerate()
        .filter(|(_, (code, amount))| *code == LineCode::BaseSalary || !amount.is_zero())
        .map(|(index, (code, amount))| {
            PayLine::payable(
                *code,
                *amount,
                EARNINGS_ORDER_START * (index as u32 + 1),
                LineGroup::Earnings,
            )
        })
        .collect();

    let total_gross = earnings_lines
        .iter()
        .filter_map(|line| line.payable)
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .filter(|total| *total <= MAX_TOTAL_GROSS)
        .ok_or_else(|| ValidationFailure {
            violations: vec![overflow("total_gross")],
        })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_composition".to_string(),
        rule_name: "Gross Composition".to_string(),
        input: serde_json::json!({
            "base_gross": base_gross.to_string(),
            "standard_monthly_hours": params.standard_monthly_hours.to_string(),
            "overtime_25_hours": request.overtime_25_hours.to_string(),
            "overtime_50_hours": request.overtime_50_hours.to_string(),
            "bonus": request.bonus.to_string(),
            "benefits_in_kind": request.benefits_in_kind.to_string()
        }),
        output: serde_json::json!({
            "hourly_rate": hourly.round_dp(4).to_string(),
            "overtime_25_pay": tier1_pay.to_string(),
            "overtime_50_pay": tier2_pay.to_string(),
            "total_gross": total_gross.to_string(),
            "earnings_lines": earnings_lines.len()
        }),
        reasoning: format!(
            "Base {} + overtime {} + {} + bonus {} + benefits {} = gross {}",
            base_gross,
            tier1_pay,
            tier2_pay,
            request.bonus,
            request.benefits_in_kind,
            total_gross
        ),
    };

    Ok(GrossComposition {
        total_gross,
        hourly_rate: hourly,
        earnings_lines,
        audit_step,
    })
}

/// hours × hourly rate × multiplier, rounded; `None` on overflow.
fn overtime_pay(hours: Decimal, hourly: Decimal, multiplier: Decimal) -> Option<Decimal> {
    hours
        .checked_mul(hourly)
        .and_then(|amount| amount.checked_mul(multiplier))
        .map(round_money)
}

fn overflow(field: &str) -> Violation {
    Violation::AmountOverflow {
        field: field.to_string(),
    }
}
