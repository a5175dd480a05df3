//! Group Resolver
//!
//! Maps the validated inputs to the set of reactive groups taking part in the
//! analysis. Runs synchronously against the store; the engine executes it on
//! a blocking worker.

use crate::types::{GroupOrigin, ResolvedGroup};
use crate::validator::ValidatedRequest;
use crate::AnalysisError;
use hazmix_domain::traits::ReferenceStore;
use hazmix_domain::{Chemical, ChemicalId, GroupId, ReactiveGroup};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use tracing::{debug, warn};

/// An input chemical after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChemical {
    /// Input id
    pub id: ChemicalId,

    /// Display record, when the store has one
    pub record: Option<Chemical>,

    /// Group memberships (may be empty)
    pub groups: BTreeSet<GroupId>,
}

impl ResolvedChemical {
    /// Name for messages, falling back to the id
    pub fn label(&self) -> String {
        match &self.record {
            Some(chemical) => format!("{} ({})", chemical.name, self.id),
            None => format!("chemical {}", self.id),
        }
    }
}

/// Output of group resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedGroups {
    /// Every participating group, keyed by id
    pub groups: BTreeMap<GroupId, ResolvedGroup>,

    /// Input chemicals in ascending id order
    pub chemicals: Vec<ResolvedChemical>,

    /// Groups contributed by water (empty unless requested)
    pub water_groups: BTreeSet<GroupId>,
}

impl ResolvedGroups {
    /// The distinct group ids
    pub fn group_ids(&self) -> BTreeSet<GroupId> {
        self.groups.keys().copied().collect()
    }

    /// Origins of a group, ascending
    pub fn origins(&self, id: GroupId) -> Vec<GroupOrigin> {
        self.groups
            .get(&id)
            .map(|group| group.origins.iter().copied().collect())
            .unwrap_or_default()
    }

    fn add(&mut self, id: GroupId, origin: GroupOrigin) {
        self.groups
            .entry(id)
            .or_insert_with(|| ResolvedGroup::from_metadata(ReactiveGroup::new(id, "", "")))
            .origins
            .insert(origin);
    }
}

/// Resolve chemicals, explicit groups and water to the participating groups
///
/// # Errors
///
/// - `UnknownChemical` listing every id the store does not know
/// - `InvalidInput` for explicit groups the store does not know
/// - `StoreUnavailable` when a lookup fails
pub fn resolve<S>(store: &S, request: &ValidatedRequest) -> Result<ResolvedGroups, AnalysisError>
where
    S: ReferenceStore,
    S::Error: Display,
{
    let mut resolved = ResolvedGroups::default();
    let mut unknown = Vec::new();

    for &id in &request.chemicals {
        match store
            .groups_for_chemical(id)
            .map_err(|e| AnalysisError::store("chemical group lookup", e))?
        {
            Some(groups) => {
                for &group in &groups {
                    resolved.add(group, GroupOrigin::Chemical(id));
                }
                resolved.chemicals.push(ResolvedChemical {
                    id,
                    record: None,
                    groups,
                });
            }
            None => unknown.push(id),
        }
    }

    if !unknown.is_empty() {
        return Err(AnalysisError::UnknownChemical { ids: unknown });
    }

    let mut unknown_groups = Vec::new();
    for &id in &request.explicit_groups {
        let known = store
            .reactive_group(id)
            .map_err(|e| AnalysisError::store("reactive group lookup", e))?
            .is_some();
        if known {
            resolved.add(id, GroupOrigin::Explicit);
        } else {
            unknown_groups.push(id.to_string());
        }
    }
    if !unknown_groups.is_empty() {
        return Err(AnalysisError::InvalidInput(format!(
            "unknown reactive group id(s): {}",
            unknown_groups.join(", ")
        )));
    }

    if request.include_water {
        resolved.water_groups = store
            .groups_for_water()
            .map_err(|e| AnalysisError::store("water group lookup", e))?;
        let water_groups = resolved.water_groups.clone();
        for group in water_groups {
            resolved.add(group, GroupOrigin::Water);
        }
    }

    for chemical in &mut resolved.chemicals {
        chemical.record = store
            .chemical(chemical.id)
            .map_err(|e| AnalysisError::store("chemical lookup", e))?;
    }

    for (id, entry) in resolved.groups.iter_mut() {
        let metadata = store
            .reactive_group(*id)
            .map_err(|e| AnalysisError::store("reactive group lookup", e))?;
        let origins = std::mem::take(&mut entry.origins);
        *entry = match metadata {
            Some(group) => ResolvedGroup::from_metadata(group),
            None => {
                warn!("Reactive group {} has no metadata in the store", id);
                ResolvedGroup::from_metadata(ReactiveGroup::new(*id, format!("Group {}", id), ""))
            }
        };
        entry.origins = origins;
    }

    debug!(
        "Resolved {} chemical(s) to {} group(s)",
        resolved.chemicals.len(),
        resolved.groups.len()
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnalysisRequest, EngineConfig};
    use crate::validator::validate_request;
    use hazmix_domain::{CompatibilityRule, HazardCategory, HazardCategoryId};

    /// In-memory store for resolver tests
    struct MockStore {
        memberships: BTreeMap<i64, Vec<u32>>,
        groups: Vec<u32>,
        water: Option<Vec<u32>>,
        fail: bool,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                memberships: BTreeMap::from([
                    (8, vec![1]),
                    (10, vec![5, 1]),
                    (12, vec![]),
                    (30024, vec![100]),
                ]),
                groups: vec![1, 5, 21, 100],
                water: Some(vec![100]),
                fail: false,
            }
        }
    }

    impl ReferenceStore for MockStore {
        type Error = String;

        fn groups_for_chemical(&self, id: ChemicalId) -> Result<Option<BTreeSet<GroupId>>, String> {
            if self.fail {
                return Err("disk I/O error".to_string());
            }
            Ok(self
                .memberships
                .get(&id.value())
                .map(|groups| groups.iter().copied().map(GroupId::new).collect()))
        }

        fn groups_for_water(&self) -> Result<BTreeSet<GroupId>, String> {
            self.water
                .as_ref()
                .map(|groups| groups.iter().copied().map(GroupId::new).collect())
                .ok_or_else(|| "water_chemical_id is not set".to_string())
        }

        fn rule(&self, _a: GroupId, _b: GroupId) -> Result<Option<CompatibilityRule>, String> {
            Ok(None)
        }

        fn hazard_category(&self, _id: HazardCategoryId) -> Result<Option<HazardCategory>, String> {
            Ok(None)
        }

        fn reactive_group(&self, id: GroupId) -> Result<Option<ReactiveGroup>, String> {
            Ok(self
                .groups
                .contains(&id.value())
                .then(|| ReactiveGroup::new(id, format!("Group {}", id), "")))
        }

        fn chemical(&self, id: ChemicalId) -> Result<Option<Chemical>, String> {
            Ok(self.memberships.contains_key(&id.value()).then(|| Chemical {
                id,
                name: format!("CHEMICAL {}", id),
                formula: None,
                special_hazards: None,
            }))
        }
    }

    fn run(store: &MockStore, request: AnalysisRequest) -> Result<ResolvedGroups, AnalysisError> {
        let validated = validate_request(&request, &EngineConfig::default())?;
        resolve(store, &validated)
    }

    fn ids(resolved: &ResolvedGroups) -> Vec<u32> {
        resolved.group_ids().iter().map(|g| g.value()).collect()
    }

    #[test]
    fn test_union_without_duplicates() {
        let resolved = run(&MockStore::new(), AnalysisRequest::new([8, 10])).unwrap();
        assert_eq!(ids(&resolved), vec![1, 5]);
        assert_eq!(
            resolved.origins(GroupId::new(1)),
            vec![
                GroupOrigin::Chemical(ChemicalId::new(8)),
                GroupOrigin::Chemical(ChemicalId::new(10)),
            ]
        );
    }

    #[test]
    fn test_explicit_groups_and_water() {
        let resolved =
            run(&MockStore::new(), AnalysisRequest::new([8]).with_groups([21]).with_water()).unwrap();
        assert_eq!(ids(&resolved), vec![1, 21, 100]);
        assert_eq!(resolved.origins(GroupId::new(21)), vec![GroupOrigin::Explicit]);
        assert_eq!(resolved.origins(GroupId::new(100)), vec![GroupOrigin::Water]);
        assert_eq!(resolved.water_groups, BTreeSet::from([GroupId::new(100)]));
    }

    #[test]
    fn test_unknown_chemicals_reported_together() {
        let err = run(&MockStore::new(), AnalysisRequest::new([99, 8, 77])).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::UnknownChemical {
                ids: vec![ChemicalId::new(77), ChemicalId::new(99)]
            }
        );
    }

    #[test]
    fn test_known_chemical_without_groups() {
        let resolved = run(&MockStore::new(), AnalysisRequest::new([8, 12])).unwrap();
        assert_eq!(ids(&resolved), vec![1]);
        let orphan = &resolved.chemicals[1];
        assert!(orphan.groups.is_empty());
        assert_eq!(orphan.label(), "CHEMICAL 12 (12)");
    }

    #[test]
    fn test_unknown_explicit_group() {
        let err = run(&MockStore::new(), AnalysisRequest::new([8]).with_groups([42])).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(msg) if msg.contains("42")));
    }

    #[test]
    fn test_store_failure() {
        let mut store = MockStore::new();
        store.fail = true;
        let err = run(&store, AnalysisRequest::new([8, 10])).unwrap_err();
        assert!(matches!(err, AnalysisError::StoreUnavailable(_)));

        let mut store = MockStore::new();
        store.water = None;
        let err = run(&store, AnalysisRequest::new([8, 10]).with_water()).unwrap_err();
        assert!(matches!(err, AnalysisError::StoreUnavailable(_)));
    }
}
