//! Payslip line models.
//!
//! A [`PayLine`] is one printable row of the payslip. Its [`LineCode`] and
//! display order are stable so that renderers and persistence never need to
//! know how the engine produced the row.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stable code identifying what a payslip line represents.
///
/// # Example
///
/// ```
/// use payroll_engine::models::LineCode;
///
/// assert_eq!(LineCode::CsgDeductible.as_str(), "CSG_DEDUCTIBLE");
/// assert_eq!(
///     serde_json::to_string(&LineCode::Overtime25).unwrap(),
///     "\"OVERTIME_25\""
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineCode {
    /// Monthly base salary.
    #[serde(rename = "BASE_SALARY")]
    BaseSalary,
    /// Overtime paid at +25%.
    #[serde(rename = "OVERTIME_25")]
    Overtime25,
    /// Overtime paid at +50%.
    #[serde(rename = "OVERTIME_50")]
    Overtime50,
    /// Bonus.
    #[serde(rename = "BONUS")]
    Bonus,
    /// Benefits in kind.
    #[serde(rename = "BENEFITS_IN_KIND")]
    BenefitsInKind,
    /// Health, maternity, invalidity, death.
    #[serde(rename = "HEALTH")]
    Health,
    /// Old-age insurance, capped base.
    #[serde(rename = "RETIREMENT_CAPPED")]
    RetirementCapped,
    /// Old-age insurance, extended base.
    #[serde(rename = "RETIREMENT_EXTENDED")]
    RetirementExtended,
    /// Family allowance.
    #[serde(rename = "FAMILY_ALLOWANCE")]
    FamilyAllowance,
    /// Work accident and occupational disease.
    #[serde(rename = "WORK_ACCIDENT")]
    WorkAccident,
    /// Unemployment insurance.
    #[serde(rename = "UNEMPLOYMENT")]
    Unemployment,
    /// Supplementary retirement, tranche 1.
    #[serde(rename = "SUPPLEMENTARY_RETIREMENT")]
    SupplementaryRetirement,
    /// CSG deductible from taxable income.
    #[serde(rename = "CSG_DEDUCTIBLE")]
    CsgDeductible,
    /// CSG and CRDS not deductible from taxable income.
    #[serde(rename = "CSG_CRDS_NON_DEDUCTIBLE")]
    CsgCrdsNonDeductible,
    /// Sum of employee contributions.
    #[serde(rename = "TOTAL_EMPLOYEE_SHARE")]
    TotalEmployeeShare,
    /// Sum of employer contributions.
    #[serde(rename = "TOTAL_EMPLOYER_SHARE")]
    TotalEmployerShare,
    /// Net taxable salary.
    #[serde(rename = "TAXABLE_NET")]
    TaxableNet,
    /// Net amount paid to the employee.
    #[serde(rename = "NET_PAYABLE")]
    NetPayable,
    /// Gross plus employer contributions.
    #[serde(rename = "TOTAL_EMPLOYER_COST")]
    TotalEmployerCost,
}

impl LineCode {
    /// The wire form of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCode::BaseSalary => "BASE_SALARY",
            LineCode::Overtime25 => "OVERTIME_25",
            LineCode::Overtime50 => "OVERTIME_50",
            LineCode::Bonus => "BONUS",
            LineCode::BenefitsInKind => "BENEFITS_IN_KIND",
            LineCode::Health => "HEALTH",
            LineCode::RetirementCapped => "RETIREMENT_CAPPED",
            LineCode::RetirementExtended => "RETIREMENT_EXTENDED",
            LineCode::FamilyAllowance => "FAMILY_ALLOWANCE",
            LineCode::WorkAccident => "WORK_ACCIDENT",
            LineCode::Unemployment => "UNEMPLOYMENT",
            LineCode::SupplementaryRetirement => "SUPPLEMENTARY_RETIREMENT",
            LineCode::CsgDeductible => "CSG_DEDUCTIBLE",
            LineCode::CsgCrdsNonDeductible => "CSG_CRDS_NON_DEDUCTIBLE",
            LineCode::TotalEmployeeShare => "TOTAL_EMPLOYEE_SHARE",
            LineCode::TotalEmployerShare => "TOTAL_EMPLOYER_SHARE",
            LineCode::TaxableNet => "TAXABLE_NET",
            LineCode::NetPayable => "NET_PAYABLE",
            LineCode::TotalEmployerCost => "TOTAL_EMPLOYER_COST",
        }
    }

    /// The French payslip label for the line.
    pub fn label(&self) -> &'static str {
        match self {
            LineCode::BaseSalary => "Salaire de base",
            LineCode::Overtime25 => "Heures supplémentaires à 25 %",
            LineCode::Overtime50 => "Heures supplémentaires à 50 %",
            LineCode::Bonus => "Primes",
            LineCode::BenefitsInKind => "Avantages en nature",
            LineCode::Health => "Sécurité sociale - Maladie, maternité, invalidité, décès",
            LineCode::RetirementCapped => "Sécurité sociale - Vieillesse plafonnée",
            LineCode::RetirementExtended => "Sécurité sociale - Vieillesse déplafonnée",
            LineCode::FamilyAllowance => "Allocations familiales",
            LineCode::WorkAccident => "Accidents du travail - Maladies professionnelles",
            LineCode::Unemployment => "Assurance chômage",
            LineCode::SupplementaryRetirement => "Retraite complémentaire Tranche 1",
            LineCode::CsgDeductible => "CSG déductible de l'impôt sur le revenu",
            LineCode::CsgCrdsNonDeductible => {
                "CSG/CRDS non déductible de l'impôt sur le revenu"
            }
            LineCode::TotalEmployeeShare => "Total des cotisations salariales",
            LineCode::TotalEmployerShare => "Total des cotisations patronales",
            LineCode::TaxableNet => "Net imposable",
            LineCode::NetPayable => "Net à payer",
            LineCode::TotalEmployerCost => "Coût total employeur",
        }
    }
}

/// Payslip section a line is printed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineGroup {
    /// Salary components making up the gross.
    Earnings,
    /// Health insurance.
    Health,
    /// Work accident insurance.
    WorkAccident,
    /// Basic and supplementary retirement.
    Retirement,
    /// Family allowance.
    Family,
    /// Unemployment insurance.
    Unemployment,
    /// CSG and CRDS.
    CsgCrds,
    /// Totals printed at the foot of the payslip.
    Totals,
}

/// What a line means, inferred from its populated fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    /// A component of the gross salary.
    Earnings,
    /// A social contribution with an employee and/or employer share.
    Contribution,
    /// A total for the renderer; never summed again.
    Summary,
}

/// A single row of the payslip.
///
/// Earnings and summary rows carry only `payable`; contribution rows carry a
/// base and an employee and/or employer rate and amount. Employee amounts are
/// negative (a deduction from the gross), employer amounts positive.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{LineCode, LineGroup, LineRole, PayLine};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let line = PayLine::payable(
///     LineCode::BaseSalary,
///     Decimal::from_str("3000.00").unwrap(),
///     10,
///     LineGroup::Earnings,
/// );
/// assert_eq!(line.label, "Salaire de base");
/// assert_eq!(line.role(), LineRole::Earnings);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLine {
    /// Stable code for the line.
    pub code: LineCode,
    /// Human-readable label.
    pub label: String,
    /// Taxable base the rates were applied to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<Decimal>,
    /// Employee-side rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_rate: Option<Decimal>,
    /// Employee-side amount, negative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_amount: Option<Decimal>,
    /// Employer-side rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_rate: Option<Decimal>,
    /// Employer-side amount, positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_amount: Option<Decimal>,
    /// Amount for earnings and summary rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payable: Option<Decimal>,
    /// Position on the payslip, ascending.
    pub order: u32,
    /// Section the line is printed under.
    pub group: LineGroup,
}

impl PayLine {
    /// Creates an earnings or summary line carrying only a payable amount.
    pub fn payable(code: LineCode, amount: Decimal, order: u32, group: LineGroup) -> Self {
        Self {
            code,
            label: code.label().to_string(),
            base: None,
            employee_rate: None,
            employee_amount: None,
            employer_rate: None,
            employer_amount: None,
            payable: Some(amount),
            order,
            group,
        }
    }

    /// The role of the line.
    pub fn role(&self) -> LineRole {
        if self.employee_amount.is_some() || self.employer_amount.is_some() {
            LineRole::Contribution
        } else if self.group == LineGroup::Totals {
            LineRole::Summary
        } else {
            LineRole::Earnings
        }
    }

    /// Returns true for contribution lines.
    pub fn is_contribution(&self) -> bool {
        self.role() == LineRole::Contribution
    }
}
