//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load a contribution regime from YAML
//! files: regime metadata, payroll parameters, dated rate tables with their
//! social security ceiling, and employer conventions.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/fr").unwrap();
//! println!("Loaded regime: {}", config.regime().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Convention, ConventionsConfig, OvertimeMultipliers, ParametersConfig, PayrollConfig,
    RateConfig, RegimeMetadata,
};
