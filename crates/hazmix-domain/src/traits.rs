//! Trait definitions for the reference database
//!
//! These traits define the boundary between the engine and the read-only
//! reference store. Infrastructure implementations live in other crates.

use crate::{
    Chemical, ChemicalId, CompatibilityRule, GroupId, HazardCategory, HazardCategoryId,
    ReactiveGroup,
};
use std::collections::BTreeSet;

/// Read access to the data the compatibility engine depends on
///
/// Implemented by the infrastructure layer (hazmix-store). All methods are
/// reads; implementations must be safe to call from several threads at once.
pub trait ReferenceStore {
    /// Error type for store operations
    type Error;

    /// Reactive groups of a chemical
    ///
    /// Returns `Ok(None)` when the chemical does not exist, which is distinct
    /// from `Ok(Some(empty))` for a known chemical with no group assignments.
    fn groups_for_chemical(&self, id: ChemicalId) -> Result<Option<BTreeSet<GroupId>>, Self::Error>;

    /// Reactive groups that represent water
    ///
    /// Resolved through the store's own water mapping, never a hardcoded id.
    fn groups_for_water(&self) -> Result<BTreeSet<GroupId>, Self::Error>;

    /// Compatibility rule for a group pair
    ///
    /// Must return the same rule for `(a, b)` and `(b, a)`.
    fn rule(&self, a: GroupId, b: GroupId) -> Result<Option<CompatibilityRule>, Self::Error>;

    /// Hazard category metadata
    fn hazard_category(&self, id: HazardCategoryId) -> Result<Option<HazardCategory>, Self::Error>;

    /// Reactive group metadata
    fn reactive_group(&self, id: GroupId) -> Result<Option<ReactiveGroup>, Self::Error>;

    /// Chemical record
    fn chemical(&self, id: ChemicalId) -> Result<Option<Chemical>, Self::Error>;
}

/// Counts describing a reference database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceStats {
    /// Number of chemicals
    pub total_chemicals: usize,

    /// Number of reactive groups
    pub total_groups: usize,

    /// Number of compatibility rules
    pub total_rules: usize,

    /// Number of rules at dangerous level
    pub dangerous_rules: usize,
}

/// Auxiliary lookups that are not part of the compatibility core
///
/// Identifier tables, group listings and database statistics. The engine
/// never calls these; they back the detail and listing views.
pub trait ChemicalDirectory {
    /// Error type for directory operations
    type Error;

    /// CAS registry numbers of a chemical, in store order
    fn cas_numbers(&self, id: ChemicalId) -> Result<Vec<String>, Self::Error>;

    /// UN/NA numbers of a chemical, in store order
    fn un_numbers(&self, id: ChemicalId) -> Result<Vec<String>, Self::Error>;

    /// Every reactive group, ordered by id
    fn list_groups(&self) -> Result<Vec<ReactiveGroup>, Self::Error>;

    /// Reactive groups a chemical belongs to, ordered by id
    fn groups_of(&self, id: ChemicalId) -> Result<Vec<ReactiveGroup>, Self::Error>;

    /// Database statistics
    fn statistics(&self) -> Result<ReferenceStats, Self::Error>;
}
