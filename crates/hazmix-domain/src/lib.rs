//! hazmix Domain Layer
//!
//! Value objects and accessor traits shared by every other hazmix crate.
//! Nothing in here performs I/O: the reference database lives behind the
//! traits in [`traits`], and the engine only ever talks to those.
//!
//! ## Key Concepts
//!
//! - **Reactive Group**: a bucket of chemicals with similar reactivity behavior
//! - **Group Pair**: an unordered pair of groups, the key of every rule lookup
//! - **Compatibility Rule**: the stored verdict for one group pair
//! - **Severity**: the per-pair result level, including `unknown` for missing rules
//! - **Hazard Category**: the kind of consequence a rule predicts
//!
//! ## Architecture
//!
//! - No I/O, no async
//! - Infrastructure implementations live in `hazmix-store`
//! - Trait definitions for the read-only reference store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chemical;
pub mod group;
pub mod hazard;
pub mod ids;
pub mod level;
pub mod pair;
pub mod rule;
pub mod traits;

// Re-exports for convenience
pub use chemical::{Chemical, SpecialHazard};
pub use group::ReactiveGroup;
pub use hazard::{HazardCategory, HazardKind};
pub use ids::{ChemicalId, GroupId, HazardCategoryId, ParseIdError};
pub use level::{Assessment, CompatibilityLevel, Severity};
pub use pair::GroupPair;
pub use rule::CompatibilityRule;
