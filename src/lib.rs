//! Gross-to-net payroll engine for French payslips
//!
//! This crate computes the social-contribution lines of a monthly payslip from
//! a gross salary, a working-time breakdown and a resolved set of contribution
//! rates, applying the capped and extended ceiling bases, and rolls them up
//! into net pay and employer cost totals that reconcile to the cent.
//!
//! The computation itself is [`calculation::compute_payroll`], a pure
//! function. Configuration loading, rate resolution and the HTTP adapter sit
//! around it.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
