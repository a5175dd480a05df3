//! Pairwise Rule Evaluator
//!
//! Pair generation and per-pair evaluation. Both are pure; the engine does
//! the store lookups in between.

use crate::resolver::ResolvedGroups;
use crate::types::PairResult;
use hazmix_domain::{
    CompatibilityLevel, CompatibilityRule, GroupId, GroupPair, HazardCategoryId, HazardKind,
    Severity,
};
use std::collections::BTreeSet;

/// Every pair that needs a rule lookup
///
/// All `C(k, 2)` distinct pairs plus one self-pair candidate per group.
/// Self-pairs only become results when a rule exists.
pub fn candidate_pairs(groups: &BTreeSet<GroupId>) -> BTreeSet<GroupPair> {
    let mut pairs = BTreeSet::new();
    for (i, &a) in groups.iter().enumerate() {
        for &b in groups.iter().skip(i) {
            pairs.insert(GroupPair::new(a, b));
        }
    }
    pairs
}

/// Turn a pair and its (possibly missing) rule into a result
///
/// Returns `None` only for a self-pair without a rule.
pub fn evaluate_pair(
    pair: GroupPair,
    rule: Option<CompatibilityRule>,
    resolved: &ResolvedGroups,
    infer_hazards: bool,
) -> Option<PairResult> {
    let sources_a = resolved.origins(pair.low());
    let sources_b = resolved.origins(pair.high());

    let Some(rule) = rule else {
        if pair.is_self_pair() {
            return None;
        }
        return Some(PairResult {
            group_a: pair.low(),
            group_b: pair.high(),
            level: Severity::Unknown,
            hazards: vec![HazardKind::UnknownPotentiallyHazardous.id()],
            gas_products: String::new(),
            documentation: String::new(),
            sources_a,
            sources_b,
            note: Some(format!(
                "No compatibility rule is recorded for groups {} and {}; treat as potentially hazardous",
                pair.low(),
                pair.high()
            )),
        });
    };

    let hazards = effective_hazards(&rule, infer_hazards);
    Some(PairResult {
        group_a: pair.low(),
        group_b: pair.high(),
        level: Severity::from(rule.level),
        hazards: hazards.into_iter().collect(),
        gas_products: rule.gas_products,
        documentation: rule.documentation,
        sources_a,
        sources_b,
        note: None,
    })
}

/// Hazard categories of a rule, inferred from its text when none are linked
///
/// Inference applies to rules at `caution` or above. A `dangerous` rule that
/// yields nothing falls back to heat and intense reaction.
pub fn effective_hazards(rule: &CompatibilityRule, infer: bool) -> BTreeSet<HazardCategoryId> {
    if !rule.hazard_categories.is_empty() || !infer || rule.level == CompatibilityLevel::None {
        return rule.hazard_categories.clone();
    }

    let mut kinds = HazardKind::infer_from_text(&rule.documentation, &rule.gas_products);
    if kinds.is_empty() && rule.level == CompatibilityLevel::Dangerous {
        kinds.insert(HazardKind::GeneratesHeat);
        kinds.insert(HazardKind::IntenseReaction);
    }
    kinds.iter().map(HazardKind::id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GroupOrigin, ResolvedGroup};
    use hazmix_domain::{ChemicalId, ReactiveGroup};

    fn groups(ids: &[u32]) -> BTreeSet<GroupId> {
        ids.iter().copied().map(GroupId::new).collect()
    }

    fn resolved(ids: &[u32]) -> ResolvedGroups {
        let mut resolved = ResolvedGroups::default();
        for &id in ids {
            let mut group =
                ResolvedGroup::from_metadata(ReactiveGroup::new(GroupId::new(id), "", ""));
            group.origins.insert(GroupOrigin::Chemical(ChemicalId::new(id as i64 * 10)));
            resolved.groups.insert(GroupId::new(id), group);
        }
        resolved
    }

    #[test]
    fn test_candidate_pairs_count() {
        // C(4, 2) distinct pairs plus 4 self-pair candidates
        let pairs = candidate_pairs(&groups(&[1, 5, 9, 21]));
        assert_eq!(pairs.len(), 6 + 4);
        assert_eq!(pairs.iter().filter(|p| p.is_self_pair()).count(), 4);
        assert!(pairs.contains(&GroupPair::new(GroupId::new(21), GroupId::new(1))));
    }

    #[test]
    fn test_candidate_pairs_single_group() {
        let pairs = candidate_pairs(&groups(&[3]));
        assert_eq!(pairs.into_iter().collect::<Vec<_>>(), vec![GroupPair::self_pair(GroupId::new(3))]);
    }

    #[test]
    fn test_missing_distinct_rule_is_unknown() {
        let pair = GroupPair::new(GroupId::new(5), GroupId::new(1));
        let result = evaluate_pair(pair, None, &resolved(&[1, 5]), true).unwrap();

        assert_eq!(result.level, Severity::Unknown);
        assert_eq!(result.group_a, GroupId::new(1));
        assert_eq!(result.group_b, GroupId::new(5));
        assert_eq!(result.hazards, vec![HazardCategoryId::new(12)]);
        assert!(result.note.is_some());
        assert_eq!(result.sources_b, vec![GroupOrigin::Chemical(ChemicalId::new(50))]);
    }

    #[test]
    fn test_missing_self_rule_is_skipped() {
        let pair = GroupPair::self_pair(GroupId::new(1));
        assert!(evaluate_pair(pair, None, &resolved(&[1]), true).is_none());
    }

    #[test]
    fn test_self_rule_is_emitted() {
        let pair = GroupPair::self_pair(GroupId::new(1));
        let rule = CompatibilityRule::new(CompatibilityLevel::Caution)
            .with_hazards([HazardKind::PolymerizationHazard.id()]);
        let result = evaluate_pair(pair, Some(rule), &resolved(&[1]), true).unwrap();
        assert!(result.is_self_pair());
        assert_eq!(result.level, Severity::Caution);
        assert_eq!(result.hazards, vec![HazardKind::PolymerizationHazard.id()]);
    }

    #[test]
    fn test_linked_hazards_win_over_inference() {
        let rule = CompatibilityRule::new(CompatibilityLevel::Warning)
            .with_documentation("Toxic fumes")
            .with_hazards([HazardKind::Corrosive.id()]);
        assert_eq!(
            effective_hazards(&rule, true),
            BTreeSet::from([HazardKind::Corrosive.id()])
        );
    }

    #[test]
    fn test_inference_from_text() {
        let rule = CompatibilityRule::new(CompatibilityLevel::Warning)
            .with_documentation("Generates heat")
            .with_gas_products("HCN");
        assert_eq!(
            effective_hazards(&rule, true),
            BTreeSet::from([
                HazardKind::GeneratesGas.id(),
                HazardKind::GeneratesHeat.id(),
                HazardKind::Toxic.id(),
            ])
        );
        assert!(effective_hazards(&rule, false).is_empty());
    }

    #[test]
    fn test_no_inference_for_compatible_rules() {
        let rule = CompatibilityRule::new(CompatibilityLevel::None).with_documentation("No heat");
        assert!(effective_hazards(&rule, true).is_empty());
    }

    #[test]
    fn test_dangerous_fallback() {
        let rule = CompatibilityRule::new(CompatibilityLevel::Dangerous);
        assert_eq!(
            effective_hazards(&rule, true),
            BTreeSet::from([HazardKind::GeneratesHeat.id(), HazardKind::IntenseReaction.id()])
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn candidate_pairs_cover_every_combination(ids in proptest::collection::btree_set(1u32..80, 1..20)) {
                let set: BTreeSet<GroupId> = ids.iter().copied().map(GroupId::new).collect();
                let k = set.len();
                let pairs = candidate_pairs(&set);
                prop_assert_eq!(pairs.len(), k * (k - 1) / 2 + k);
                for pair in &pairs {
                    prop_assert!(pair.low() <= pair.high());
                    prop_assert!(set.contains(&pair.low()) && set.contains(&pair.high()));
                }
            }
        }
    }
}
