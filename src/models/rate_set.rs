//! Resolved contribution rates.
//!
//! A [`RateSet`] is the fully resolved table of employee-side and employer-side
//! rates for one employer/employee pair. The engine consumes it whole; which
//! convention produced it is decided upstream.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Builds a rate from its mantissa and scale, e.g. `rate(75, 4)` is 0.0075.
const fn rate(mantissa: u32, scale: u32) -> Decimal {
    Decimal::from_parts(mantissa, 0, 0, false, scale)
}

/// Fourteen contribution rates, each a fraction (0.0075 means 0.75%).
///
/// Seven rates are charged to the employee and seven to the employer. The two
/// sides are not mirrors: family allowance and work accident are employer-only,
/// the CSG/CRDS components are employee-only.
///
/// # Example
///
/// ```
/// use payroll_engine::models::RateSet;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = RateSet::reference_2025();
/// assert_eq!(rates.health_employee, Decimal::from_str("0.0075").unwrap());
/// assert_eq!(rates.health_employer, Decimal::from_str("0.07").unwrap());
/// assert!(rates.out_of_range().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateSet {
    /// Health, maternity, invalidity, death (employee share).
    pub health_employee: Decimal,
    /// Health, maternity, invalidity, death (employer share).
    pub health_employer: Decimal,
    /// Old-age insurance on the capped base (employee share).
    pub retirement_capped_employee: Decimal,
    /// Old-age insurance on the capped base (employer share).
    pub retirement_capped_employer: Decimal,
    /// Old-age insurance on the extended base (employee share).
    pub retirement_extended_employee: Decimal,
    /// Old-age insurance on the extended base (employer share).
    pub retirement_extended_employer: Decimal,
    /// Family allowance (employer only).
    pub family_allowance_employer: Decimal,
    /// Work accident and occupational disease (employer only).
    pub work_accident_employer: Decimal,
    /// Unemployment insurance (employee share).
    pub unemployment_employee: Decimal,
    /// Unemployment insurance (employer share).
    pub unemployment_employer: Decimal,
    /// Supplementary retirement, tranche 1 (employee share).
    pub supplementary_retirement_employee: Decimal,
    /// Supplementary retirement, tranche 1 (employer share).
    pub supplementary_retirement_employer: Decimal,
    /// CSG deductible from taxable income (employee only).
    pub csg_deductible_employee: Decimal,
    /// CSG and CRDS not deductible from taxable income (employee only).
    pub csg_crds_non_deductible_employee: Decimal,
}

impl RateSet {
    /// The reference rate table of the worked payslip examples.
    ///
    /// Callers substitute this table when no convention-specific rates can be
    /// resolved for an employer/employee pair.
    pub const fn reference_2025() -> Self {
        Self {
            health_employee: rate(75, 4),
            health_employer: rate(700, 4),
            retirement_capped_employee: rate(690, 4),
            retirement_capped_employer: rate(855, 4),
            retirement_extended_employee: rate(40, 4),
            retirement_extended_employer: rate(202, 4),
            family_allowance_employer: rate(345, 4),
            work_accident_employer: rate(212, 4),
            unemployment_employee: rate(0, 4),
            unemployment_employer: rate(405, 4),
            supplementary_retirement_employee: rate(315, 4),
            supplementary_retirement_employer: rate(472, 4),
            csg_deductible_employee: rate(680, 4),
            csg_crds_non_deductible_employee: rate(290, 4),
        }
    }

    /// A rate set where every rate is zero.
    pub const fn zero() -> Self {
        Self {
            health_employee: Decimal::ZERO,
            health_employer: Decimal::ZERO,
            retirement_capped_employee: Decimal::ZERO,
            retirement_capped_employer: Decimal::ZERO,
            retirement_extended_employee: Decimal::ZERO,
            retirement_extended_employer: Decimal::ZERO,
            family_allowance_employer: Decimal::ZERO,
            work_accident_employer: Decimal::ZERO,
            unemployment_employee: Decimal::ZERO,
            unemployment_employer: Decimal::ZERO,
            supplementary_retirement_employee: Decimal::ZERO,
            supplementary_retirement_employer: Decimal::ZERO,
            csg_deductible_employee: Decimal::ZERO,
            csg_crds_non_deductible_employee: Decimal::ZERO,
        }
    }

    /// Every rate paired with its field name, in declaration order.
    pub fn entries(&self) -> [(&'static str, Decimal); 14] {
        [
            ("health_employee", self.health_employee),
            ("health_employer", self.health_employer),
            ("retirement_capped_employee", self.retirement_capped_employee),
            ("retirement_capped_employer", self.retirement_capped_employer),
            ("retirement_extended_employee", self.retirement_extended_employee),
            ("retirement_extended_employer", self.retirement_extended_employer),
            ("family_allowance_employer", self.family_allowance_employer),
            ("work_accident_employer", self.work_accident_employer),
            ("unemployment_employee", self.unemployment_employee),
            ("unemployment_employer", self.unemployment_employer),
            (
                "supplementary_retirement_employee",
                self.supplementary_retirement_employee,
            ),
            (
                "supplementary_retirement_employer",
                self.supplementary_retirement_employer,
            ),
            ("csg_deductible_employee", self.csg_deductible_employee),
            (
                "csg_crds_non_deductible_employee",
                self.csg_crds_non_deductible_employee,
            ),
        ]
    }

    /// Rates outside `[0, 1]`, with their field names.
    pub fn out_of_range(&self) -> Vec<(&'static str, Decimal)> {
        self.entries()
            .into_iter()
            .filter(|(_, value)| *value < Decimal::ZERO || *value > Decimal::ONE)
            .collect()
    }
}

impl Default for RateSet {
    fn default() -> Self {
        Self::reference_2025()
    }
}
