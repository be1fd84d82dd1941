//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{Ceilings, PayrollParameters, Period, RateSet};

use super::types::{
    Convention, ConventionsConfig, ParametersConfig, PayrollConfig, RateConfig, RegimeMetadata,
};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// checks them, and answers period-dependent queries: which ceilings,
/// parameters and default rates apply to a payroll month.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/fr/
/// ├── regime.yaml          # Regime metadata
/// ├── parameters.yaml      # Standard hours and overtime premiums
/// ├── conventions.yaml     # Employer-specific rate sets
/// └── rates/
///     └── 2025-01-01.yaml  # Ceiling and default rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::Period;
///
/// let loader = ConfigLoader::load("./config/fr").unwrap();
///
/// let period = Period::new(2025, 3).unwrap();
/// let params = loader.parameters_for(&period).unwrap();
/// println!("Monthly ceiling: {}", params.ceilings.monthly());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/fr")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any value breaks an invariant (non-positive ceiling or hours,
    ///   premium below 1, rate outside `[0, 1]`, duplicate effective date)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RegimeMetadata>(&path.join("regime.yaml"))?;

        let parameters = Self::load_yaml::<ParametersConfig>(&path.join("parameters.yaml"))?;
        Self::check_parameters(&parameters)?;

        let conventions = Self::load_yaml::<ConventionsConfig>(&path.join("conventions.yaml"))?;
        for convention in &conventions.conventions {
            Self::check_rates(
                &convention.rates,
                &format!("conventions[{}]", convention.name),
            )?;
        }

        let rates = Self::load_rates(&path.join("rates"))?;

        let config = PayrollConfig::new(metadata, parameters, rates, conventions.conventions);

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();
        let mut seen_dates = HashSet::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let rate_config = Self::load_yaml::<RateConfig>(&path)?;

                Ceilings::from_annual(rate_config.annual_ceiling)?;
                Self::check_rates(
                    &rate_config.rates,
                    &format!("rates[{}]", rate_config.effective_date),
                )?;
                if !seen_dates.insert(rate_config.effective_date) {
                    return Err(EngineError::InvalidConfig {
                        field: "effective_date".to_string(),
                        message: format!(
                            "more than one rate file is effective from {}",
                            rate_config.effective_date
                        ),
                    });
                }

                rates.push(rate_config);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    fn check_parameters(parameters: &ParametersConfig) -> EngineResult<()> {
        if parameters.standard_monthly_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "standard_monthly_hours".to_string(),
                message: format!(
                    "must be strictly positive, got {}",
                    parameters.standard_monthly_hours
                ),
            });
        }

        for (field, multiplier) in [
            ("overtime.tier_1_multiplier", parameters.overtime.tier_1_multiplier),
            ("overtime.tier_2_multiplier", parameters.overtime.tier_2_multiplier),
        ] {
            if multiplier < Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("must be at least 1, got {}", multiplier),
                });
            }
        }

        Ok(())
    }

    fn check_rates(rates: &RateSet, context: &str) -> EngineResult<()> {
        match rates.out_of_range().first() {
            Some((field, value)) => Err(EngineError::InvalidConfig {
                field: format!("{}.{}", context, field),
                message: format!("rate must lie between 0 and 1, got {}", value),
            }),
            None => Ok(()),
        }
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        self.config.regime()
    }

    /// Returns every configured convention.
    pub fn conventions(&self) -> &[Convention] {
        self.config.conventions()
    }

    /// Gets the rate configuration in force for a period.
    ///
    /// The most recent rate file effective on or before the first day of the
    /// period applies.
    pub fn rate_config_for(&self, period: &Period) -> EngineResult<&RateConfig> {
        self.config
            .rate_config_for(period)
            .ok_or_else(|| EngineError::RateTableNotFound {
                period: period.to_string(),
            })
    }

    /// Gets the default rates in force for a period.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    /// use payroll_engine::models::Period;
    ///
    /// let loader = ConfigLoader::load("./config/fr")?;
    /// let rates = loader.default_rates_for(&Period::new(2025, 3).unwrap())?;
    /// println!("Health employer rate: {}", rates.health_employer);
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn default_rates_for(&self, period: &Period) -> EngineResult<&RateSet> {
        self.rate_config_for(period).map(|rc| &rc.rates)
    }

    /// Gets the computation parameters in force for a period.
    ///
    /// Combines the period's ceiling with the standard hours and overtime
    /// premiums.
    pub fn parameters_for(&self, period: &Period) -> EngineResult<PayrollParameters> {
        let rate_config = self.rate_config_for(period)?;
        let parameters = self.config.parameters();

        Ok(PayrollParameters {
            ceilings: Ceilings::from_annual(rate_config.annual_ceiling)?,
            standard_monthly_hours: parameters.standard_monthly_hours,
            overtime_tier_1_multiplier: parameters.overtime.tier_1_multiplier,
            overtime_tier_2_multiplier: parameters.overtime.tier_2_multiplier,
        })
    }
}
