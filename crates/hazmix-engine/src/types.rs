//! Request and result types
//!
//! All types serialize to camelCase JSON.

use hazmix_domain::{
    Assessment, ChemicalId, GroupId, HazardCategory, HazardCategoryId, ReactiveGroup, Severity,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A request to analyze a mixture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Chemical ids (duplicates allowed, de-duplicated during validation)
    pub chemical_ids: Vec<ChemicalId>,

    /// Reactive groups added directly
    #[serde(default)]
    pub explicit_group_ids: Vec<GroupId>,

    /// Add water as an implicit participant
    #[serde(default)]
    pub include_water: bool,
}

impl AnalysisRequest {
    /// Request for a list of chemicals
    pub fn new(chemical_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            chemical_ids: chemical_ids.into_iter().map(ChemicalId::new).collect(),
            ..Self::default()
        }
    }

    /// Add explicit reactive groups
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = u32>) -> Self {
        self.explicit_group_ids.extend(groups.into_iter().map(GroupId::new));
        self
    }

    /// Include water
    pub fn with_water(mut self) -> Self {
        self.include_water = true;
        self
    }
}

/// Why a group is part of the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupOrigin {
    /// Membership of an input chemical
    Chemical(ChemicalId),
    /// Supplied directly in the request
    Explicit,
    /// Injected for water
    Water,
}

/// A group in the resolved set, with its metadata and origins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGroup {
    /// Group identifier
    pub id: GroupId,

    /// Display name
    pub name: String,

    /// Descriptive text
    pub description: String,

    /// Whether the group needs special handling
    pub special_handling: bool,

    /// Where the group came from
    pub origins: BTreeSet<GroupOrigin>,
}

impl ResolvedGroup {
    pub(crate) fn from_metadata(group: ReactiveGroup) -> Self {
        Self {
            id: group.id,
            name: group.name,
            description: group.description,
            special_handling: group.special_handling,
            origins: BTreeSet::new(),
        }
    }
}

/// Evaluated compatibility of one group pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairResult {
    /// Lower group id
    pub group_a: GroupId,

    /// Higher group id (equal to `group_a` for a self-pair)
    pub group_b: GroupId,

    /// Pair severity
    pub level: Severity,

    /// Hazard categories, ascending
    pub hazards: Vec<HazardCategoryId>,

    /// Gas or byproduct text
    pub gas_products: String,

    /// Hazard documentation
    pub documentation: String,

    /// Origins of `group_a`
    pub sources_a: Vec<GroupOrigin>,

    /// Origins of `group_b`
    pub sources_b: Vec<GroupOrigin>,

    /// Explanation for unknown pairs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PairResult {
    /// Whether this pair is a group reacting with itself
    pub fn is_self_pair(&self) -> bool {
        self.group_a == self.group_b
    }
}

/// Per-severity counts and the overall verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Pairs at `none`
    pub none_count: usize,
    /// Pairs at `unknown`
    pub unknown_count: usize,
    /// Pairs at `caution`
    pub caution_count: usize,
    /// Pairs at `warning`
    pub warning_count: usize,
    /// Pairs at `dangerous`
    pub dangerous_count: usize,
    /// All evaluated pairs
    pub total_pairs: usize,
    /// Worst-case verdict
    pub overall_assessment: Assessment,
    /// Some pairs have no rule
    pub incomplete_data: bool,
}

impl Summary {
    /// Count for one severity
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::None => self.none_count,
            Severity::Unknown => self.unknown_count,
            Severity::Caution => self.caution_count,
            Severity::Warning => self.warning_count,
            Severity::Dangerous => self.dangerous_count,
        }
    }
}

/// The full outcome of an analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Resolved group ids, ascending
    pub resolved_groups: Vec<GroupId>,

    /// Resolved groups with metadata, ascending by id
    pub groups: Vec<ResolvedGroup>,

    /// Every evaluated pair, ordered by `(group_a, group_b)`
    pub pairwise_matrix: Vec<PairResult>,

    /// Pairs at `warning` or above, worst first
    pub critical_pairs: Vec<PairResult>,

    /// Counts and verdict
    pub summary: Summary,

    /// Distinct hazard categories over pairs at `caution` or above
    pub hazard_rollup: Vec<HazardCategory>,

    /// Advisory messages about the inputs
    pub warnings: Vec<String>,
}
