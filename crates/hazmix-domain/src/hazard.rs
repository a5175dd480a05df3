//! Hazard categories
//!
//! The category list is a fixed enumeration. The store carries one row per
//! [`HazardKind`] under its canonical id, and rules link to those ids.

use crate::HazardCategoryId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Hazard category metadata as served by the reference store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardCategory {
    /// Category identifier
    pub id: HazardCategoryId,

    /// Display name
    pub name: String,

    /// One-line description of the consequence
    pub short_phrase: String,
}

/// The fixed set of hazard categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HazardKind {
    /// Corrosive products
    Corrosive,
    /// Explosion risk
    Explosive,
    /// Fire or flammable products
    Flammable,
    /// Gas evolution
    GeneratesGas,
    /// Heat evolution
    GeneratesHeat,
    /// Toxic products
    Toxic,
    /// Violent polymerization
    PolymerizationHazard,
    /// Radioactive material involved
    Radiation,
    /// May become unstable when heated
    UnstableWhenHeated,
    /// Intense or explosive reaction
    IntenseReaction,
    /// No known hazard
    NoKnownHazard,
    /// Unknown, potentially hazardous
    UnknownPotentiallyHazardous,
}

// Gas formulas as they appear in rule gas-product text
const TOXIC_GASES: &[&str] = &["HCN", "H2S", "CO", "Cl2", "NH3", "NOx", "NO2", "SO2", "HCl", "HF"];
const FLAMMABLE_GASES: &[&str] = &["H2", "CH4", "C2H2", "C2H4"];

impl HazardKind {
    /// All categories in canonical id order
    pub const ALL: [HazardKind; 12] = [
        HazardKind::Corrosive,
        HazardKind::Explosive,
        HazardKind::Flammable,
        HazardKind::GeneratesGas,
        HazardKind::GeneratesHeat,
        HazardKind::Toxic,
        HazardKind::PolymerizationHazard,
        HazardKind::Radiation,
        HazardKind::UnstableWhenHeated,
        HazardKind::IntenseReaction,
        HazardKind::NoKnownHazard,
        HazardKind::UnknownPotentiallyHazardous,
    ];

    /// Canonical store id (1-based, in [`HazardKind::ALL`] order)
    pub fn id(&self) -> HazardCategoryId {
        let index = Self::ALL
            .iter()
            .position(|kind| kind == self)
            .unwrap_or_default();
        HazardCategoryId::new(index as u32 + 1)
    }

    /// Look up a kind by its canonical id
    pub fn from_id(id: HazardCategoryId) -> Option<Self> {
        let index = (id.value() as usize).checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            HazardKind::Corrosive => "Corrosive",
            HazardKind::Explosive => "Explosive",
            HazardKind::Flammable => "Flammable",
            HazardKind::GeneratesGas => "Generates Gas",
            HazardKind::GeneratesHeat => "Generates Heat",
            HazardKind::Toxic => "Toxic",
            HazardKind::PolymerizationHazard => "Polymerization Hazard",
            HazardKind::Radiation => "Radiation",
            HazardKind::UnstableWhenHeated => "Unstable When Heated",
            HazardKind::IntenseReaction => "Intense or Explosive Reaction",
            HazardKind::NoKnownHazard => "No Known Hazard",
            HazardKind::UnknownPotentiallyHazardous => "Unknown, Potentially Hazardous",
        }
    }

    /// Short consequence phrase
    pub fn short_phrase(&self) -> &'static str {
        match self {
            HazardKind::Corrosive => "Reaction products may be corrosive",
            HazardKind::Explosive => "Reaction products may be explosive or sensitive to shock or friction",
            HazardKind::Flammable => "Reaction products may be flammable",
            HazardKind::GeneratesGas => "May produce gas, possibly pressurizing closed containers",
            HazardKind::GeneratesHeat => "Exothermic reaction at ambient temperatures",
            HazardKind::Toxic => "Reaction products may be toxic",
            HazardKind::PolymerizationHazard => "May cause violent polymerization",
            HazardKind::Radiation => "Reaction involves radioactive material",
            HazardKind::UnstableWhenHeated => "May become unstable when heated",
            HazardKind::IntenseReaction => "Reaction may be particularly intense, violent or explosive",
            HazardKind::NoKnownHazard => "No known hazardous reaction",
            HazardKind::UnknownPotentiallyHazardous => "Reaction is unknown and may be hazardous",
        }
    }

    /// Category metadata for this kind under its canonical id
    pub fn category(&self) -> HazardCategory {
        HazardCategory {
            id: self.id(),
            name: self.name().to_string(),
            short_phrase: self.short_phrase().to_string(),
        }
    }

    /// Infer hazard kinds from a rule's free text
    ///
    /// Used for rules whose hazard links are missing. Documentation is scanned
    /// for keywords; gas products are split into tokens and matched against
    /// known toxic and flammable gas formulas.
    ///
    /// # Examples
    ///
    /// ```
    /// use hazmix_domain::HazardKind;
    ///
    /// let kinds = HazardKind::infer_from_text("Violent reaction, generates heat", "HCN");
    /// assert!(kinds.contains(&HazardKind::IntenseReaction));
    /// assert!(kinds.contains(&HazardKind::GeneratesHeat));
    /// assert!(kinds.contains(&HazardKind::Toxic));
    /// ```
    pub fn infer_from_text(documentation: &str, gas_products: &str) -> BTreeSet<HazardKind> {
        let mut kinds = BTreeSet::new();
        let doc = documentation.to_lowercase();

        let keywords: [(&str, HazardKind); 10] = [
            ("fire", HazardKind::Flammable),
            ("flammable", HazardKind::Flammable),
            ("ignit", HazardKind::Flammable),
            ("explos", HazardKind::Explosive),
            ("heat", HazardKind::GeneratesHeat),
            ("toxic", HazardKind::Toxic),
            ("corros", HazardKind::Corrosive),
            ("violent", HazardKind::IntenseReaction),
            ("polymer", HazardKind::PolymerizationHazard),
            ("gas", HazardKind::GeneratesGas),
        ];
        for (keyword, kind) in keywords {
            if doc.contains(keyword) {
                kinds.insert(kind);
            }
        }

        for token in gas_products
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            if TOXIC_GASES.contains(&token) {
                kinds.insert(HazardKind::Toxic);
                kinds.insert(HazardKind::GeneratesGas);
            }
            if FLAMMABLE_GASES.contains(&token) {
                kinds.insert(HazardKind::Flammable);
                kinds.insert(HazardKind::GeneratesGas);
            }
        }

        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_ids() {
        assert_eq!(HazardKind::Corrosive.id(), HazardCategoryId::new(1));
        assert_eq!(HazardKind::Toxic.id(), HazardCategoryId::new(6));
        assert_eq!(HazardKind::UnknownPotentiallyHazardous.id(), HazardCategoryId::new(12));
        for kind in HazardKind::ALL {
            assert_eq!(HazardKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(HazardKind::from_id(HazardCategoryId::new(0)), None);
        assert_eq!(HazardKind::from_id(HazardCategoryId::new(13)), None);
    }

    #[test]
    fn test_gas_tokens_are_exact() {
        // CO2 is not carbon monoxide
        let kinds = HazardKind::infer_from_text("", "CO2");
        assert!(kinds.is_empty());

        let kinds = HazardKind::infer_from_text("", "H2 | CO");
        assert!(kinds.contains(&HazardKind::Flammable));
        assert!(kinds.contains(&HazardKind::Toxic));
        assert!(kinds.contains(&HazardKind::GeneratesGas));
    }

    #[test]
    fn test_keyword_inference() {
        let kinds = HazardKind::infer_from_text("May ignite; polymerization can occur", "");
        assert_eq!(
            kinds,
            BTreeSet::from([HazardKind::Flammable, HazardKind::PolymerizationHazard])
        );
    }

    #[test]
    fn test_empty_text_infers_nothing() {
        assert!(HazardKind::infer_from_text("", "").is_empty());
    }
}
