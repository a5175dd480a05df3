//! Engine error types

use hazmix_domain::ChemicalId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that abort an analysis
///
/// Missing rules are not errors; they surface as `unknown` pairs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Malformed or out-of-bounds request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// One or more chemical ids are not in the reference store
    #[error("Unknown chemical(s): {}", join_ids(.ids))]
    UnknownChemical {
        /// Every unknown id in the request, ascending
        ids: Vec<ChemicalId>,
    },

    /// The reference store failed or did not answer in time
    #[error("Reference store unavailable: {0}")]
    StoreUnavailable(String),
}

fn join_ids(ids: &[ChemicalId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl AnalysisError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::InvalidInput(_) => "INVALID_INPUT",
            AnalysisError::UnknownChemical { .. } => "UNKNOWN_CHEMICAL",
            AnalysisError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, AnalysisError::StoreUnavailable(_))
    }

    /// Wrap a store failure for the operation `what`
    pub fn store(what: &str, err: impl fmt::Display) -> Self {
        AnalysisError::StoreUnavailable(format!("{} failed: {}", what, err))
    }
}

/// Serializable form of an [`AnalysisError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Machine-readable code
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// The offending chemical ids, for `UNKNOWN_CHEMICAL`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chemical_ids: Option<Vec<ChemicalId>>,
}

impl From<&AnalysisError> for ErrorResponse {
    fn from(err: &AnalysisError) -> Self {
        let chemical_ids = match err {
            AnalysisError::UnknownChemical { ids } => Some(ids.clone()),
            _ => None,
        };
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            chemical_ids,
        }
    }
}

/// Errors in engine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML could not be parsed
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML could not be written
    #[error("Failed to serialize to TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A setting is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AnalysisError::InvalidInput("x".into()).code(), "INVALID_INPUT");
        assert_eq!(
            AnalysisError::UnknownChemical { ids: vec![] }.code(),
            "UNKNOWN_CHEMICAL"
        );
        assert_eq!(
            AnalysisError::StoreUnavailable("x".into()).code(),
            "STORE_UNAVAILABLE"
        );
    }

    #[test]
    fn test_unknown_chemical_response() {
        let err = AnalysisError::UnknownChemical {
            ids: vec![ChemicalId::new(4), ChemicalId::new(9)],
        };
        assert_eq!(err.to_string(), "Unknown chemical(s): 4, 9");

        let json = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
        assert_eq!(json["code"], "UNKNOWN_CHEMICAL");
        assert_eq!(json["chemicalIds"], serde_json::json!([4, 9]));
    }

    #[test]
    fn test_response_omits_ids_for_other_errors() {
        let err = AnalysisError::InvalidInput("too many chemicals".into());
        let json = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
        assert!(json.get("chemicalIds").is_none());
        assert!(!err.is_transient());
        assert!(AnalysisError::StoreUnavailable("timeout".into()).is_transient());
    }
}
