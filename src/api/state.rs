//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::resolver::{ConventionResolver, RateResolver};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded regime configuration and the resolver used when a request does not
/// carry its own rates.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
    /// Resolves rates for requests that omit them.
    resolver: Arc<dyn RateResolver>,
}

impl AppState {
    /// Creates a new application state resolving rates from the configured
    /// conventions.
    pub fn new(config: ConfigLoader) -> Self {
        let resolver = ConventionResolver::new(config.conventions().to_vec());
        Self::with_resolver(config, Arc::new(resolver))
    }

    /// Creates a new application state with a custom resolver.
    pub fn with_resolver(config: ConfigLoader, resolver: Arc<dyn RateResolver>) -> Self {
        Self {
            config: Arc::new(config),
            resolver,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the rate resolver.
    pub fn resolver(&self) -> &dyn RateResolver {
        self.resolver.as_ref()
    }
}
