//! Result Formatter
//!
//! Shapes resolved groups and evaluated pairs into an [`AnalysisResult`],
//! including the advisory warnings.

use crate::aggregator;
use crate::resolver::ResolvedGroups;
use crate::types::{AnalysisResult, PairResult};
use hazmix_domain::{HazardCategory, Severity};

/// Build the final result
///
/// Pairs may arrive in any order; the matrix is sorted by `(group_a, group_b)`.
pub fn build_result(
    resolved: &ResolvedGroups,
    mut pairs: Vec<PairResult>,
    hazard_rollup: Vec<HazardCategory>,
) -> AnalysisResult {
    pairs.sort_by_key(|pair| (pair.group_a, pair.group_b));

    let summary = aggregator::summarize(&pairs);
    let critical_pairs = aggregator::critical_pairs(&pairs);
    let warnings = collect_warnings(resolved, &pairs);

    AnalysisResult {
        resolved_groups: resolved.groups.keys().copied().collect(),
        groups: resolved.groups.values().cloned().collect(),
        pairwise_matrix: pairs,
        critical_pairs,
        summary,
        hazard_rollup,
        warnings,
    }
}

/// Advisory messages, in a fixed order
///
/// Chemicals without groups, chemical self-hazards, groups needing special
/// handling, then chemicals that react with water when water was requested.
pub fn collect_warnings(resolved: &ResolvedGroups, pairs: &[PairResult]) -> Vec<String> {
    let mut warnings = Vec::new();

    for chemical in resolved.chemicals.iter().filter(|c| c.groups.is_empty()) {
        warnings.push(format!(
            "{} has no reactive group assignments; its reactivity was not evaluated",
            chemical.label()
        ));
    }

    for chemical in &resolved.chemicals {
        let hazards = chemical
            .record
            .as_ref()
            .map(|record| record.special_hazard_kinds())
            .unwrap_or_default();
        if !hazards.is_empty() {
            let labels: Vec<&str> = hazards.iter().map(|h| h.label()).collect();
            warnings.push(format!(
                "{} has special hazards: {}",
                chemical.label(),
                labels.join(", ")
            ));
        }
    }

    for group in resolved.groups.values().filter(|g| g.special_handling) {
        warnings.push(format!(
            "Group {} ({}) requires special handling",
            group.id, group.name
        ));
    }

    if !resolved.water_groups.is_empty() {
        let water = &resolved.water_groups;
        for chemical in &resolved.chemicals {
            if chemical.groups.is_subset(water) {
                continue;
            }
            let reacts = pairs.iter().filter(|p| p.level >= Severity::Caution).any(|p| {
                (chemical.groups.contains(&p.group_a) && water.contains(&p.group_b))
                    || (chemical.groups.contains(&p.group_b) && water.contains(&p.group_a))
            });
            if reacts {
                warnings.push(format!(
                    "{} is water-reactive; store in dry conditions",
                    chemical.label()
                ));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolvedChemical;
    use crate::types::{GroupOrigin, ResolvedGroup};
    use hazmix_domain::{Chemical, ChemicalId, GroupId, HazardCategoryId, ReactiveGroup};
    use std::collections::BTreeSet;

    fn pair(a: u32, b: u32, level: Severity) -> PairResult {
        PairResult {
            group_a: GroupId::new(a),
            group_b: GroupId::new(b),
            level,
            hazards: vec![],
            gas_products: String::new(),
            documentation: String::new(),
            sources_a: vec![],
            sources_b: vec![],
            note: None,
        }
    }

    fn chemical(id: i64, name: &str, special: Option<&str>, groups: &[u32]) -> ResolvedChemical {
        ResolvedChemical {
            id: ChemicalId::new(id),
            record: Some(Chemical {
                id: ChemicalId::new(id),
                name: name.to_string(),
                formula: None,
                special_hazards: special.map(str::to_string),
            }),
            groups: groups.iter().copied().map(GroupId::new).collect(),
        }
    }

    fn resolved() -> ResolvedGroups {
        let mut resolved = ResolvedGroups::default();
        for (id, special) in [(1, false), (21, true), (100, false)] {
            let mut group = ReactiveGroup::new(GroupId::new(id), format!("G{}", id), "");
            group.special_handling = special;
            let mut entry = ResolvedGroup::from_metadata(group);
            entry.origins.insert(GroupOrigin::Explicit);
            resolved.groups.insert(GroupId::new(id), entry);
        }
        resolved.chemicals = vec![
            chemical(10, "NITRIC ACID", None, &[1]),
            chemical(30, "SAMPLE", None, &[]),
            chemical(40, "SODIUM", Some("Water reactive. Pyrophoric."), &[21]),
        ];
        resolved.water_groups = BTreeSet::from([GroupId::new(100)]);
        resolved
    }

    #[test]
    fn test_warning_order() {
        let pairs = vec![
            pair(1, 100, Severity::None),
            pair(21, 100, Severity::Dangerous),
        ];
        let warnings = collect_warnings(&resolved(), &pairs);
        assert_eq!(
            warnings,
            vec![
                "SAMPLE (30) has no reactive group assignments; its reactivity was not evaluated",
                "SODIUM (40) has special hazards: pyrophoric, water reactive",
                "Group 21 (G21) requires special handling",
                "SODIUM (40) is water-reactive; store in dry conditions",
            ]
        );
    }

    #[test]
    fn test_no_water_warning_without_water() {
        let mut resolved = resolved();
        resolved.water_groups.clear();
        let pairs = vec![pair(21, 100, Severity::Dangerous)];
        let warnings = collect_warnings(&resolved, &pairs);
        assert!(warnings.iter().all(|w| !w.contains("water-reactive")));
    }

    #[test]
    fn test_build_result_sorts_matrix() {
        let pairs = vec![
            pair(21, 100, Severity::Dangerous),
            pair(1, 21, Severity::Unknown),
            pair(1, 100, Severity::None),
        ];
        let rollup = vec![HazardCategory {
            id: HazardCategoryId::new(2),
            name: "Explosive".to_string(),
            short_phrase: String::new(),
        }];
        let result = build_result(&resolved(), pairs, rollup);

        let order: Vec<(u32, u32)> = result
            .pairwise_matrix
            .iter()
            .map(|p| (p.group_a.value(), p.group_b.value()))
            .collect();
        assert_eq!(order, vec![(1, 21), (1, 100), (21, 100)]);
        assert_eq!(result.resolved_groups.len(), 3);
        assert_eq!(result.critical_pairs.len(), 1);
        assert_eq!(result.summary.total_pairs, 3);
        assert!(result.summary.incomplete_data);
        assert_eq!(result.hazard_rollup.len(), 1);
    }
}
