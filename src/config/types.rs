//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Period, RateSet};

/// Metadata about the contribution regime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeMetadata {
    /// Short regime code (e.g., "FR-RG").
    pub code: String,
    /// The human-readable name of the regime.
    pub name: String,
    /// The version or effective date of the configuration.
    pub version: String,
    /// URL to the official rate publication.
    pub source_url: String,
}

/// Overtime premium multipliers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeMultipliers {
    /// Multiplier for the first overtime tier.
    pub tier_1_multiplier: Decimal,
    /// Multiplier for the second overtime tier.
    pub tier_2_multiplier: Decimal,
}

/// Parameters configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParametersConfig {
    /// Monthly hours the base salary pays for.
    pub standard_monthly_hours: Decimal,
    /// Overtime premiums.
    pub overtime: OvertimeMultipliers,
}

/// Rate configuration for a specific effective date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateConfig {
    /// The effective date for this table.
    pub effective_date: NaiveDate,
    /// The annual social security ceiling (PASS).
    pub annual_ceiling: Decimal,
    /// The default contribution rates.
    pub rates: RateSet,
}

/// An employer-specific rate set.
///
/// A convention with no `employee_ids` covers every employee of the employer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Convention {
    /// The employer the convention belongs to.
    pub employer_id: String,
    /// The human-readable name of the convention.
    pub name: String,
    /// Employees the convention is restricted to.
    #[serde(default)]
    pub employee_ids: Vec<String>,
    /// The rates the convention applies.
    pub rates: RateSet,
}

impl Convention {
    /// Returns true if the convention covers the employee.
    pub fn covers(&self, employer_id: &str, employee_id: &str) -> bool {
        self.employer_id == employer_id
            && (self.employee_ids.is_empty() || self.employee_ids.iter().any(|id| id == employee_id))
    }

    /// Returns true if the convention names its employees explicitly.
    pub fn is_employee_specific(&self) -> bool {
        !self.employee_ids.is_empty()
    }
}

/// Conventions configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConventionsConfig {
    /// Every known convention.
    #[serde(default)]
    pub conventions: Vec<Convention>,
}

/// The complete payroll configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in a regime configuration directory.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Regime metadata.
    metadata: RegimeMetadata,
    /// Period-independent parameters.
    parameters: ParametersConfig,
    /// Rate configurations by effective date (sorted oldest first).
    rates: Vec<RateConfig>,
    /// Employer conventions.
    conventions: Vec<Convention>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        metadata: RegimeMetadata,
        parameters: ParametersConfig,
        rates: Vec<RateConfig>,
        conventions: Vec<Convention>,
    ) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            parameters,
            rates: sorted_rates,
            conventions,
        }
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        &self.metadata
    }

    /// Returns the period-independent parameters.
    pub fn parameters(&self) -> &ParametersConfig {
        &self.parameters
    }

    /// Returns all rate configurations.
    pub fn rates(&self) -> &[RateConfig] {
        &self.rates
    }

    /// Returns all conventions.
    pub fn conventions(&self) -> &[Convention] {
        &self.conventions
    }

    /// Returns the most recent rate configuration effective on or before the
    /// first day of the period.
    pub fn rate_config_for(&self, period: &Period) -> Option<&RateConfig> {
        self.rates
            .iter()
            .rev()
            .find(|rc| rc.effective_date <= period.first_day())
    }
}
