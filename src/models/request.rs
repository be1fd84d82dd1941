//! Payroll request model.
//!
//! This module defines [`PayrollRequest`], the raw inputs of one gross-to-net
//! computation as the surrounding application collects them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inputs for one payslip computation.
///
/// Values arrive unchecked; the validator decides whether the request can be
/// computed. `base_gross` is optional so that an absent salary can be reported
/// alongside every other problem instead of failing deserialization.
///
/// The employer and employee identifiers are only used to resolve a
/// [`RateSet`](crate::models::RateSet) upstream; the computation never reads
/// them beyond checking they are present.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollRequest;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let request: PayrollRequest = serde_json::from_str(r#"{
///     "base_gross": "3000.00",
///     "normal_hours": "151.67",
///     "period": "2025-03",
///     "employer_id": "ent_001",
///     "employee_id": "sal_001"
/// }"#).unwrap();
///
/// assert_eq!(request.base_gross, Some(Decimal::from_str("3000.00").unwrap()));
/// assert_eq!(request.overtime_25_hours, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Monthly base salary before overtime and extras.
    #[serde(default)]
    pub base_gross: Option<Decimal>,
    /// Normal hours worked in the month.
    #[serde(default)]
    pub normal_hours: Decimal,
    /// Overtime hours paid at the +25% premium.
    #[serde(default)]
    pub overtime_25_hours: Decimal,
    /// Overtime hours paid at the +50% premium.
    #[serde(default)]
    pub overtime_50_hours: Decimal,
    /// Bonus amount for the month.
    #[serde(default)]
    pub bonus: Decimal,
    /// Benefits in kind valued for the month.
    #[serde(default)]
    pub benefits_in_kind: Decimal,
    /// The payroll month, `YYYY-MM`.
    pub period: String,
    /// Identifier of the employer.
    pub employer_id: String,
    /// Identifier of the employee.
    pub employee_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_full_request() {
        let json = r#"{
            "base_gross": "2500.00",
            "normal_hours": "151.67",
            "overtime_25_hours": "8",
            "overtime_50_hours": "2",
            "bonus": "150.00",
            "benefits_in_kind": "60.00",
            "period": "2025-06",
            "employer_id": "ent_001",
            "employee_id": "sal_007"
        }"#;

        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.base_gross, Some(dec("2500.00")));
        assert_eq!(request.overtime_25_hours, dec("8"));
        assert_eq!(request.overtime_50_hours, dec("2"));
        assert_eq!(request.bonus, dec("150.00"));
        assert_eq!(request.benefits_in_kind, dec("60.00"));
        assert_eq!(request.period, "2025-06");
    }

    #[test]
    fn test_missing_base_gross_deserializes_as_none() {
        let json = r#"{
            "period": "2025-06",
            "employer_id": "ent_001",
            "employee_id": "sal_007"
        }"#;

        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.base_gross, None);
        assert_eq!(request.normal_hours, Decimal::ZERO);
    }

    #[test]
    fn test_missing_identifier_fails_deserialization() {
        let json = r#"{ "base_gross": "2500.00", "period": "2025-06", "employer_id": "ent_001" }"#;
        let result = serde_json::from_str::<PayrollRequest>(json);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("employee_id"));
    }

    #[test]
    fn test_amounts_serialize_as_strings() {
        let request = PayrollRequest {
            base_gross: Some(dec("3000.00")),
            normal_hours: dec("151.67"),
            overtime_25_hours: Decimal::ZERO,
            overtime_50_hours: Decimal::ZERO,
            bonus: Decimal::ZERO,
            benefits_in_kind: Decimal::ZERO,
            period: "2025-01".to_string(),
            employer_id: "ent_001".to_string(),
            employee_id: "sal_001".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"base_gross\":\"3000.00\""));
        assert!(json.contains("\"normal_hours\":\"151.67\""));
    }
}
