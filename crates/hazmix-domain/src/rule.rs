//! Compatibility rule module

use crate::{CompatibilityLevel, HazardCategoryId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The stored verdict for one unordered group pair
///
/// Exactly one rule exists per pair, so `rule(a, b)` and `rule(b, a)` are the
/// same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityRule {
    /// Compatibility level
    pub level: CompatibilityLevel,

    /// Gas or byproduct description (free text, may be empty)
    pub gas_products: String,

    /// Hazard documentation (free text, may be empty)
    pub documentation: String,

    /// Linked hazard categories
    pub hazard_categories: BTreeSet<HazardCategoryId>,
}

impl CompatibilityRule {
    /// Create a rule with no text and no hazard categories
    pub fn new(level: CompatibilityLevel) -> Self {
        Self {
            level,
            gas_products: String::new(),
            documentation: String::new(),
            hazard_categories: BTreeSet::new(),
        }
    }

    /// Attach gas/byproduct text
    pub fn with_gas_products(mut self, gas_products: impl Into<String>) -> Self {
        self.gas_products = gas_products.into();
        self
    }

    /// Attach hazard documentation text
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    /// Attach hazard categories
    pub fn with_hazards<I>(mut self, hazards: I) -> Self
    where
        I: IntoIterator<Item = HazardCategoryId>,
    {
        self.hazard_categories.extend(hazards);
        self
    }
}
