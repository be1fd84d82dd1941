//! Statutory constants the computation depends on.
//!
//! These are the period-dependent values that are not rates: the social
//! security ceilings, the standard monthly hours and the overtime premiums.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::round_money;
use crate::error::{EngineError, EngineResult};

/// The monthly ceiling used by the worked payslip examples (annual 46 224.00
/// / 12). Not a published PASS; real periods take their ceiling from the
/// dated rate files.
pub const REFERENCE_MONTHLY_CEILING: Decimal = Decimal::from_parts(385200, 0, 0, false, 2);

/// Legal monthly working time for a 35-hour week.
pub const STANDARD_MONTHLY_HOURS: Decimal = Decimal::from_parts(15167, 0, 0, false, 2);

/// Premium multiplier for the first overtime tier (+25%).
pub const OVERTIME_TIER_1_MULTIPLIER: Decimal = Decimal::from_parts(125, 0, 0, false, 2);

/// Premium multiplier for the second overtime tier (+50%).
pub const OVERTIME_TIER_2_MULTIPLIER: Decimal = Decimal::from_parts(150, 0, 0, false, 2);

/// How many monthly ceilings make up the extended ceiling.
const EXTENDED_CEILING_FACTOR: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// The monthly social security ceiling and its extended multiple.
///
/// The extended ceiling is always three times the monthly ceiling and both
/// are strictly positive; the constructors refuse anything else.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Ceilings;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let ceilings = Ceilings::from_annual(Decimal::from_str("46224.00").unwrap()).unwrap();
/// assert_eq!(ceilings.monthly(), Decimal::from_str("3852.00").unwrap());
/// assert_eq!(ceilings.extended(), Decimal::from_str("11556.00").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CeilingsRepr")]
pub struct Ceilings {
    monthly: Decimal,
    extended: Decimal,
}

#[derive(Deserialize)]
struct CeilingsRepr {
    monthly: Decimal,
}

impl TryFrom<CeilingsRepr> for Ceilings {
    type Error = EngineError;

    fn try_from(repr: CeilingsRepr) -> Result<Self, Self::Error> {
        Self::from_monthly(repr.monthly)
    }
}

impl Ceilings {
    /// Builds the ceilings from a monthly ceiling.
    ///
    /// Returns `InvalidConfig` if the ceiling is not strictly positive.
    pub fn from_monthly(monthly: Decimal) -> EngineResult<Self> {
        if monthly <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "monthly_ceiling".to_string(),
                message: format!("must be strictly positive, got {monthly}"),
            });
        }

        let extended = monthly
            .checked_mul(EXTENDED_CEILING_FACTOR)
            .ok_or_else(|| EngineError::InvalidConfig {
                field: "monthly_ceiling".to_string(),
                message: format!("{monthly} is too large to triple"),
            })?;

        Ok(Self { monthly, extended })
    }

    /// Builds the ceilings from an annual ceiling (PASS).
    ///
    /// The monthly ceiling is the annual value divided by twelve, rounded to
    /// the cent.
    pub fn from_annual(annual: Decimal) -> EngineResult<Self> {
        if annual <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "annual_ceiling".to_string(),
                message: format!("must be strictly positive, got {annual}"),
            });
        }

        Self::from_monthly(round_money(annual / Decimal::from(12)))
    }

    /// The monthly ceiling bounding the capped base.
    pub fn monthly(&self) -> Decimal {
        self.monthly
    }

    /// Three monthly ceilings, bounding the extended base.
    pub fn extended(&self) -> Decimal {
        self.extended
    }
}

impl Default for Ceilings {
    fn default() -> Self {
        Self {
            monthly: REFERENCE_MONTHLY_CEILING,
            extended: REFERENCE_MONTHLY_CEILING * EXTENDED_CEILING_FACTOR,
        }
    }
}

/// Everything besides rates that a computation needs.
///
/// Passed explicitly to [`compute_payroll`](crate::calculation::compute_payroll)
/// so the computation has no hidden inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollParameters {
    /// Social security ceilings for the period.
    pub ceilings: Ceilings,
    /// Monthly hours the base salary pays for.
    pub standard_monthly_hours: Decimal,
    /// Multiplier applied to tier 1 overtime hours.
    pub overtime_tier_1_multiplier: Decimal,
    /// Multiplier applied to tier 2 overtime hours.
    pub overtime_tier_2_multiplier: Decimal,
}

impl Default for PayrollParameters {
    fn default() -> Self {
        Self {
            ceilings: Ceilings::default(),
            standard_monthly_hours: STANDARD_MONTHLY_HOURS,
            overtime_tier_1_multiplier: OVERTIME_TIER_1_MULTIPLIER,
            overtime_tier_2_multiplier: OVERTIME_TIER_2_MULTIPLIER,
        }
    }
}
