//! Contribution rate resolution.
//!
//! The engine consumes a fully resolved [`RateSet`] and never looks one up
//! itself. Callers obtain it through a [`RateResolver`] before computing, and
//! use [`resolve_or_default`] to fall back to the default table when no
//! convention applies.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Convention;
use crate::error::{EngineError, EngineResult};
use crate::models::RateSet;

/// Where a resolved rate set came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateSource {
    /// An employer convention, by name.
    Convention {
        /// The convention name.
        name: String,
    },
    /// A rate set supplied directly by the caller.
    Supplied,
    /// The default table for the period.
    Default,
}

/// A rate set together with its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRates {
    /// The rates to compute with.
    pub rates: RateSet,
    /// Where they came from.
    pub source: RateSource,
}

/// Looks up the contribution rates for an employer/employee pair.
///
/// Resolvers must be thread-safe (`Send + Sync`) because the HTTP layer
/// shares one across concurrent requests.
pub trait RateResolver: Send + Sync {
    /// Resolves the rates for the pair, or fails with
    /// [`EngineError::ConventionNotFound`] when nothing applies.
    fn resolve(&self, employer_id: &str, employee_id: &str) -> EngineResult<ResolvedRates>;
}

/// A resolver that always returns the same rate set.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    rates: RateSet,
}

impl StaticResolver {
    /// Creates a resolver returning `rates` for every pair.
    pub fn new(rates: RateSet) -> Self {
        Self { rates }
    }
}

impl RateResolver for StaticResolver {
    fn resolve(&self, _employer_id: &str, _employee_id: &str) -> EngineResult<ResolvedRates> {
        Ok(ResolvedRates {
            rates: self.rates.clone(),
            source: RateSource::Supplied,
        })
    }
}

/// A resolver backed by the configured employer conventions.
///
/// A convention naming the employee wins over the employer-wide convention.
/// Within each kind the first matching entry wins.
///
/// # Example
///
/// ```
/// use payroll_engine::config::Convention;
/// use payroll_engine::models::RateSet;
/// use payroll_engine::resolver::{ConventionResolver, RateResolver, RateSource};
///
/// let resolver = ConventionResolver::new(vec![Convention {
///     employer_id: "ent_001".to_string(),
///     name: "Retail".to_string(),
///     employee_ids: Vec::new(),
///     rates: RateSet::reference_2025(),
/// }]);
///
/// let resolved = resolver.resolve("ent_001", "sal_042").unwrap();
/// assert_eq!(resolved.source, RateSource::Convention { name: "Retail".to_string() });
/// assert!(resolver.resolve("ent_999", "sal_042").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConventionResolver {
    conventions: Vec<Convention>,
}

impl ConventionResolver {
    /// Creates a resolver over the given conventions.
    pub fn new(conventions: Vec<Convention>) -> Self {
        Self { conventions }
    }

    fn find(&self, employer_id: &str, employee_id: &str) -> Option<&Convention> {
        let mut matching = self
            .conventions
            .iter()
            .filter(|c| c.covers(employer_id, employee_id));

        let first = matching.next()?;
        if first.is_employee_specific() {
            return Some(first);
        }
        matching.find(|c| c.is_employee_specific()).or(Some(first))
    }
}

impl RateResolver for ConventionResolver {
    fn resolve(&self, employer_id: &str, employee_id: &str) -> EngineResult<ResolvedRates> {
        self.find(employer_id, employee_id)
            .map(|convention| ResolvedRates {
                rates: convention.rates.clone(),
                source: RateSource::Convention {
                    name: convention.name.clone(),
                },
            })
            .ok_or_else(|| EngineError::ConventionNotFound {
                employer_id: employer_id.to_string(),
                employee_id: employee_id.to_string(),
            })
    }
}

/// Resolves rates, substituting `default` when the resolver fails.
///
/// The substitution is logged as a warning; it never fails.
pub fn resolve_or_default(
    resolver: &dyn RateResolver,
    employer_id: &str,
    employee_id: &str,
    default: &RateSet,
) -> ResolvedRates {
    match resolver.resolve(employer_id, employee_id) {
        Ok(resolved) => resolved,
        Err(error) => {
            warn!(
                employer_id = %employer_id,
                employee_id = %employee_id,
                error = %error,
                "Rate resolution failed, using default rates"
            );
            ResolvedRates {
                rates: default.clone(),
                source: RateSource::Default,
            }
        }
    }
}
