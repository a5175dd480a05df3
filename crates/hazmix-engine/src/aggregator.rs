//! Aggregator / Verdict Calculator

use crate::types::{PairResult, Summary};
use hazmix_domain::{Assessment, HazardCategoryId, Severity};
use std::collections::BTreeSet;

/// Reduce pair results to counts and an overall assessment
///
/// The overall assessment follows the worst pair; unknown pairs never let it
/// read `COMPATIBLE`.
pub fn summarize(pairs: &[PairResult]) -> Summary {
    let mut summary = Summary {
        none_count: 0,
        unknown_count: 0,
        caution_count: 0,
        warning_count: 0,
        dangerous_count: 0,
        total_pairs: pairs.len(),
        overall_assessment: Assessment::Compatible,
        incomplete_data: false,
    };

    let mut worst = Severity::None;
    for pair in pairs {
        match pair.level {
            Severity::None => summary.none_count += 1,
            Severity::Unknown => summary.unknown_count += 1,
            Severity::Caution => summary.caution_count += 1,
            Severity::Warning => summary.warning_count += 1,
            Severity::Dangerous => summary.dangerous_count += 1,
        }
        worst = worst.max(pair.level);
    }

    summary.overall_assessment = Assessment::from_worst(worst);
    summary.incomplete_data = summary.unknown_count > 0;
    summary
}

/// Pairs at `warning` or above, by severity descending then pair ascending
pub fn critical_pairs(pairs: &[PairResult]) -> Vec<PairResult> {
    let mut critical: Vec<PairResult> = pairs
        .iter()
        .filter(|pair| pair.level.is_critical())
        .cloned()
        .collect();
    critical.sort_by(|a, b| {
        b.level
            .cmp(&a.level)
            .then_with(|| (a.group_a, a.group_b).cmp(&(b.group_a, b.group_b)))
    });
    critical
}

/// Distinct hazard categories over pairs at `caution` or above
pub fn hazard_rollup(pairs: &[PairResult]) -> BTreeSet<HazardCategoryId> {
    pairs
        .iter()
        .filter(|pair| pair.level >= Severity::Caution)
        .flat_map(|pair| pair.hazards.iter().copied())
        .collect()
}
