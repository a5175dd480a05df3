//! Chemical records and their self-hazards

use crate::ChemicalId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A chemical as recorded in the reference store
///
/// The engine only needs the id to resolve reactive groups; the rest is used
/// for display and for self-hazard warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chemical {
    /// Store identifier
    pub id: ChemicalId,

    /// Primary name
    pub name: String,

    /// Molecular formula, if recorded
    pub formula: Option<String>,

    /// Free-text special hazards, if recorded
    pub special_hazards: Option<String>,
}

impl Chemical {
    /// Self-hazards named in the special-hazards text
    pub fn special_hazard_kinds(&self) -> Vec<SpecialHazard> {
        self.special_hazards
            .as_deref()
            .map(SpecialHazard::scan)
            .unwrap_or_default()
    }
}

/// A hazard a chemical poses on its own, independent of any mixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialHazard {
    /// Forms explosive peroxides on storage
    PeroxideFormer,
    /// Ignites spontaneously in air
    Pyrophoric,
    /// Reacts with water
    WaterReactive,
    /// Reacts with air
    AirReactive,
    /// Explosive on its own
    Explosive,
    /// Can polymerize on its own
    Polymerizable,
}

impl SpecialHazard {
    /// Scan free text for self-hazard keywords
    ///
    /// Returns each hazard at most once, in declaration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use hazmix_domain::SpecialHazard;
    ///
    /// let found = SpecialHazard::scan("Water reactive. May form peroxides.");
    /// assert_eq!(found, vec![SpecialHazard::PeroxideFormer, SpecialHazard::WaterReactive]);
    /// ```
    pub fn scan(text: &str) -> Vec<SpecialHazard> {
        let lower = text.to_lowercase();
        let keywords = [
            ("peroxide", SpecialHazard::PeroxideFormer),
            ("pyrophoric", SpecialHazard::Pyrophoric),
            ("water reactive", SpecialHazard::WaterReactive),
            ("water-reactive", SpecialHazard::WaterReactive),
            ("air reactive", SpecialHazard::AirReactive),
            ("air-reactive", SpecialHazard::AirReactive),
            ("explosive", SpecialHazard::Explosive),
            ("polymeriz", SpecialHazard::Polymerizable),
        ];

        let mut found: Vec<SpecialHazard> = keywords
            .iter()
            .filter(|(keyword, _)| lower.contains(keyword))
            .map(|(_, hazard)| *hazard)
            .collect();
        found.sort();
        found.dedup();
        found
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SpecialHazard::PeroxideFormer => "peroxide former",
            SpecialHazard::Pyrophoric => "pyrophoric",
            SpecialHazard::WaterReactive => "water reactive",
            SpecialHazard::AirReactive => "air reactive",
            SpecialHazard::Explosive => "explosive",
            SpecialHazard::Polymerizable => "polymerizable",
        }
    }
}

impl fmt::Display for SpecialHazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chemical(special: Option<&str>) -> Chemical {
        Chemical {
            id: ChemicalId::new(7794),
            name: "SODIUM".to_string(),
            formula: Some("Na".to_string()),
            special_hazards: special.map(str::to_string),
        }
    }

    #[test]
    fn test_no_special_hazards() {
        assert!(chemical(None).special_hazard_kinds().is_empty());
        assert!(chemical(Some("")).special_hazard_kinds().is_empty());
    }

    #[test]
    fn test_scan_deduplicates() {
        let found = SpecialHazard::scan("WATER-REACTIVE; water reactive metal");
        assert_eq!(found, vec![SpecialHazard::WaterReactive]);
    }

    #[test]
    fn test_scan_multiple() {
        let chem = chemical(Some("Pyrophoric. Air reactive. Explosive when dry."));
        assert_eq!(
            chem.special_hazard_kinds(),
            vec![
                SpecialHazard::Pyrophoric,
                SpecialHazard::AirReactive,
                SpecialHazard::Explosive,
            ]
        );
    }
}
