//! Request validation
//!
//! Every check here runs before the store is touched. The group-count check
//! that depends on resolution lives in the engine.

use crate::{AnalysisError, AnalysisRequest, EngineConfig};
use hazmix_domain::{ChemicalId, GroupId};
use std::collections::BTreeSet;

/// A request that passed validation, with duplicates removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    /// Distinct chemical ids, ascending
    pub chemicals: BTreeSet<ChemicalId>,

    /// Distinct explicit groups, ascending
    pub explicit_groups: BTreeSet<GroupId>,

    /// Add water as a participant
    pub include_water: bool,
}

impl ValidatedRequest {
    /// Distinct inputs, used to scale the request budget
    pub fn input_count(&self) -> usize {
        self.chemicals.len() + self.explicit_groups.len() + usize::from(self.include_water)
    }
}

/// Validate a request against the configured limits
///
/// # Errors
///
/// `InvalidInput` when the request is empty, has too many chemical ids, names
/// a malformed id, or has fewer than two participants.
pub fn validate_request(
    request: &AnalysisRequest,
    config: &EngineConfig,
) -> Result<ValidatedRequest, AnalysisError> {
    if request.chemical_ids.is_empty() && request.explicit_group_ids.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "request names no chemicals or groups".to_string(),
        ));
    }

    if request.chemical_ids.len() > config.max_chemicals {
        return Err(AnalysisError::InvalidInput(format!(
            "{} chemical ids supplied, at most {} allowed",
            request.chemical_ids.len(),
            config.max_chemicals
        )));
    }

    let malformed: BTreeSet<ChemicalId> = request
        .chemical_ids
        .iter()
        .filter(|id| !id.is_well_formed())
        .copied()
        .collect();
    if !malformed.is_empty() {
        let ids: Vec<String> = malformed.iter().map(ToString::to_string).collect();
        return Err(AnalysisError::InvalidInput(format!(
            "malformed chemical id(s): {}",
            ids.join(", ")
        )));
    }

    let validated = ValidatedRequest {
        chemicals: request.chemical_ids.iter().copied().collect(),
        explicit_groups: request.explicit_group_ids.iter().copied().collect(),
        include_water: request.include_water,
    };

    if validated.input_count() < 2 {
        return Err(AnalysisError::InvalidInput(
            "at least two distinct chemicals or groups are required".to_string(),
        ));
    }

    Ok(validated)
}
