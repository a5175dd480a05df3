//! Engine configuration

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits, timeouts and pool sizing for the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum raw chemical ids per request
    pub max_chemicals: usize,

    /// Minimum distinct groups after resolution
    pub min_groups: usize,

    /// Maximum time for a single store call (milliseconds)
    pub store_timeout_ms: u64,

    /// Overall request budget for `reference_inputs` inputs (milliseconds)
    pub request_budget_ms: u64,

    /// Input count the request budget is calibrated for
    pub reference_inputs: usize,

    /// Concurrent store calls per engine (0 = available cores)
    pub worker_threads: usize,

    /// Infer hazard categories for rules that link none
    pub infer_hazards: bool,

    /// Wrap the store in a read-through cache
    pub cache_lookups: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_chemicals: 20,
            min_groups: 2,
            store_timeout_ms: 250,
            request_budget_ms: 500,
            reference_inputs: 10,
            worker_threads: 0,
            infer_hazards: true,
            cache_lookups: true,
        }
    }
}

impl EngineConfig {
    /// Lenient preset: generous timeouts for slow or remote storage
    pub fn lenient() -> Self {
        Self {
            store_timeout_ms: 2_000,
            request_budget_ms: 5_000,
            ..Self::default()
        }
    }

    /// Get the store call timeout as a Duration
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Overall budget for a request with `inputs` distinct inputs
    ///
    /// Scales linearly above `reference_inputs`, never below the base budget.
    pub fn request_budget(&self, inputs: usize) -> Duration {
        let reference = self.reference_inputs.max(1) as u64;
        let inputs = (inputs as u64).max(reference);
        Duration::from_millis(self.request_budget_ms.saturating_mul(inputs) / reference)
    }

    /// Number of concurrent store calls
    pub fn worker_count(&self) -> usize {
        if self.worker_threads > 0 {
            return self.worker_threads;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chemicals == 0 {
            return Err(ConfigError::Invalid(
                "max_chemicals must be greater than 0".to_string(),
            ));
        }
        if self.min_groups < 2 {
            return Err(ConfigError::Invalid("min_groups must be at least 2".to_string()));
        }
        if self.store_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "store_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.request_budget_ms < self.store_timeout_ms {
            return Err(ConfigError::Invalid(
                "request_budget_ms cannot be shorter than store_timeout_ms".to_string(),
            ));
        }
        if self.reference_inputs == 0 {
            return Err(ConfigError::Invalid(
                "reference_inputs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
