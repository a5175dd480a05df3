//! Identifier newtypes for chemicals, reactive groups and hazard categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when an identifier string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// Kind of identifier that was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub input: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {} id", self.input, self.kind)
    }
}

impl std::error::Error for ParseIdError {}

/// Identifier of a chemical in the reference store
///
/// The engine never interprets it beyond format validation; existence is
/// checked against the store during group resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChemicalId(i64);

impl ChemicalId {
    /// Wrap a raw store identifier
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whether the id can exist in the reference store at all
    ///
    /// Store row ids start at 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use hazmix_domain::ChemicalId;
    ///
    /// assert!(ChemicalId::new(8).is_well_formed());
    /// assert!(!ChemicalId::new(0).is_well_formed());
    /// assert!(!ChemicalId::new(-3).is_well_formed());
    /// ```
    pub fn is_well_formed(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for ChemicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChemicalId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self).map_err(|_| ParseIdError {
            kind: "chemical",
            input: s.to_string(),
        })
    }
}

/// Identifier of a reactive group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(u32);

impl GroupId {
    /// Wrap a raw group identifier
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GroupId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Self).map_err(|_| ParseIdError {
            kind: "reactive group",
            input: s.to_string(),
        })
    }
}

/// Identifier of a hazard category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HazardCategoryId(u32);

impl HazardCategoryId {
    /// Wrap a raw hazard category identifier
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for HazardCategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chemical_id_parse() {
        assert_eq!("8".parse::<ChemicalId>().unwrap(), ChemicalId::new(8));
        assert_eq!(" 5193 ".parse::<ChemicalId>().unwrap(), ChemicalId::new(5193));
        assert!("67-64-1".parse::<ChemicalId>().is_err());
        assert!("".parse::<ChemicalId>().is_err());
    }

    #[test]
    fn test_group_id_parse() {
        assert_eq!("104".parse::<GroupId>().unwrap(), GroupId::new(104));
        assert!("-1".parse::<GroupId>().is_err());
    }

    #[test]
    fn test_parse_error_message() {
        let err = "acetone".parse::<ChemicalId>().unwrap_err();
        assert_eq!(err.to_string(), "'acetone' is not a valid chemical id");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&GroupId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
