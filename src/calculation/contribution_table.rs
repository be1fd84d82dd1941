//! Contribution rule table.
//!
//! Every contribution category is one row of data: which rates apply, which
//! base they apply to, whether the employee share is deductible from taxable
//! income, and where the line is printed. Adding or removing a category means
//! editing [`ContributionTable::from_rates`], never the line builder or the
//! aggregation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ContributionBases, LineCode, LineGroup, RateSet};

/// Display order of the first contribution line; later rows follow in steps of 10.
pub const CONTRIBUTION_ORDER_START: u32 = 100;

/// Which taxable base a category is charged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseSelector {
    /// Gross clipped to the monthly ceiling.
    Capped,
    /// Gross clipped to three monthly ceilings.
    Extended,
}

impl BaseSelector {
    /// Picks the matching base.
    pub fn select(&self, bases: &ContributionBases) -> Decimal {
        match self {
            BaseSelector::Capped => bases.capped,
            BaseSelector::Extended => bases.extended,
        }
    }
}

/// One contribution category with its resolved rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRule {
    /// The category code.
    pub code: LineCode,
    /// Employee-side rate, if the category charges the employee.
    pub employee_rate: Option<Decimal>,
    /// Employer-side rate, if the category charges the employer.
    pub employer_rate: Option<Decimal>,
    /// The base the rates apply to.
    pub base: BaseSelector,
    /// Whether the employee share reduces taxable income.
    pub deductible: bool,
    /// Position on the payslip.
    pub order: u32,
    /// Payslip section.
    pub group: LineGroup,
}

/// The ordered set of contribution rules for one computation.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{BaseSelector, ContributionTable};
/// use payroll_engine::models::{LineCode, RateSet};
///
/// let table = ContributionTable::from_rates(&RateSet::reference_2025());
/// assert_eq!(table.rules().len(), 9);
///
/// let csg = table.rule(LineCode::CsgCrdsNonDeductible).unwrap();
/// assert_eq!(csg.base, BaseSelector::Extended);
/// assert!(csg.employer_rate.is_none());
/// assert!(!csg.deductible);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionTable {
    rules: Vec<ContributionRule>,
}

impl ContributionTable {
    /// Wires a rate set into the category table.
    pub fn from_rates(rates: &RateSet) -> Self {
        use BaseSelector::{Capped, Extended};

        let rows = [
            (
                LineCode::Health,
                Some(rates.health_employee),
                Some(rates.health_employer),
                Capped,
                true,
                LineGroup::Health,
            ),
            (
                LineCode::RetirementCapped,
                Some(rates.retirement_capped_employee),
                Some(rates.retirement_capped_employer),
                Capped,
                true,
                LineGroup::Retirement,
            ),
            (
                LineCode::RetirementExtended,
                Some(rates.retirement_extended_employee),
                Some(rates.retirement_extended_employer),
                Extended,
                true,
                LineGroup::Retirement,
            ),
            (
                LineCode::FamilyAllowance,
                None,
                Some(rates.family_allowance_employer),
                Extended,
                false,
                LineGroup::Family,
            ),
            (
                LineCode::WorkAccident,
                None,
                Some(rates.work_accident_employer),
                Extended,
                false,
                LineGroup::WorkAccident,
            ),
            (
                LineCode::Unemployment,
                Some(rates.unemployment_employee),
                Some(rates.unemployment_employer),
                Capped,
                true,
                LineGroup::Unemployment,
            ),
            (
                LineCode::SupplementaryRetirement,
                Some(rates.supplementary_retirement_employee),
                Some(rates.supplementary_retirement_employer),
                Capped,
                true,
                LineGroup::Retirement,
            ),
            (
                LineCode::CsgDeductible,
                Some(rates.csg_deductible_employee),
                None,
                Extended,
                true,
                LineGroup::CsgCrds,
            ),
            (
                LineCode::CsgCrdsNonDeductible,
                Some(rates.csg_crds_non_deductible_employee),
                None,
                Extended,
                false,
                LineGroup::CsgCrds,
            ),
        ];

        let rules = rows
            .into_iter()
            .enumerate()
            .map(
                |(index, (code, employee_rate, employer_rate, base, deductible, group))| {
                    ContributionRule {
                        code,
                        employee_rate,
                        employer_rate,
                        base,
                        deductible,
                        order: CONTRIBUTION_ORDER_START + 10 * index as u32,
                        group,
                    }
                },
            )
            .collect();

        Self { rules }
    }

    /// The rules in payslip order.
    pub fn rules(&self) -> &[ContributionRule] {
        &self.rules
    }

    /// The rule for a category code.
    pub fn rule(&self, code: LineCode) -> Option<&ContributionRule> {
        self.rules.iter().find(|rule| rule.code == code)
    }

    /// Whether the employee share of a category is deductible.
    ///
    /// Unknown codes are not deductible.
    pub fn is_deductible(&self, code: LineCode) -> bool {
        self.rule(code).is_some_and(|rule| rule.deductible)
    }
}
