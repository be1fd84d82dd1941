//! Ceiling-based contribution bases.
//!
//! French contributions are charged either on the gross clipped to the monthly
//! social security ceiling (the capped base) or on the gross clipped to three
//! ceilings (the extended base). No rounding happens here.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Ceilings, ContributionBases};

/// The result of deriving the contribution bases.
#[derive(Debug, Clone)]
pub struct BasesResult {
    /// The capped and extended bases.
    pub bases: ContributionBases,
    /// The audit step recording the derivation.
    pub audit_step: AuditStep,
}

/// Clips a gross amount to the monthly ceiling.
///
/// A negative gross clips to zero.
pub fn capped_base(total_gross: Decimal, ceilings: &Ceilings) -> Decimal {
    total_gross.max(Decimal::ZERO).min(ceilings.monthly())
}

/// Clips a gross amount to the extended ceiling.
///
/// A negative gross clips to zero.
pub fn extended_base(total_gross: Decimal, ceilings: &Ceilings) -> Decimal {
    total_gross.max(Decimal::ZERO).min(ceilings.extended())
}

/// Derives both contribution bases from the total gross.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_bases;
/// use payroll_engine::models::Ceilings;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// let ceilings = Ceilings::from_monthly(dec("3852.00")).unwrap();
///
/// let result = compute_bases(dec("5000.00"), &ceilings, 3);
/// assert_eq!(result.bases.capped, dec("3852.00"));
/// assert_eq!(result.bases.extended, dec("5000.00"));
/// ```
pub fn compute_bases(total_gross: Decimal, ceilings: &Ceilings, step_number: u32) -> BasesResult {
    let bases = ContributionBases {
        capped: capped_base(total_gross, ceilings),
        extended: extended_base(total_gross, ceilings),
    };

    let reasoning = if total_gross > ceilings.extended() {
        format!(
            "Gross {} exceeds the extended ceiling {}: both bases are clipped",
            total_gross,
            ceilings.extended()
        )
    } else if total_gross > ceilings.monthly() {
        format!(
            "Gross {} exceeds the monthly ceiling {}: capped base clipped, extended base is the gross",
            total_gross,
            ceilings.monthly()
        )
    } else {
        format!(
            "Gross {} is within the monthly ceiling {}: both bases equal the gross",
            total_gross,
            ceilings.monthly()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "contribution_bases".to_string(),
        rule_name: "Contribution Bases".to_string(),
        input: serde_json::json!({
            "total_gross": total_gross.to_string(),
            "monthly_ceiling": ceilings.monthly().to_string(),
            "extended_ceiling": ceilings.extended().to_string()
        }),
        output: serde_json::json!({
            "capped_base": bases.capped.to_string(),
            "extended_base": bases.extended.to_string()
        }),
        reasoning,
    };

    BasesResult { bases, audit_step }
}
