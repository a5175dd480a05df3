//! Compatibility levels, result severities and the overall assessment

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compatibility level recorded on a stored rule
///
/// This is what the reference table says about a pair. A pair with no rule at
/// all has no `CompatibilityLevel`; see [`Severity::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityLevel {
    /// No adverse reaction expected
    None,

    /// Reaction possible under some conditions
    Caution,

    /// Reaction likely; keep apart
    Warning,

    /// Violent or toxic reaction expected
    Dangerous,
}

impl CompatibilityLevel {
    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityLevel::None => "none",
            CompatibilityLevel::Caution => "caution",
            CompatibilityLevel::Warning => "warning",
            CompatibilityLevel::Dangerous => "dangerous",
        }
    }

    /// Parse a level as stored in the reference database
    ///
    /// Accepts the level names as well as the legacy CAMEO-style codes
    /// (`C`, `I-C`, `I`) and their long forms. The legacy `N` ("no data")
    /// code is not a level and yields `None` here, as does anything unknown.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "compatible" | "c" => Some(CompatibilityLevel::None),
            "caution" | "i-c" => Some(CompatibilityLevel::Caution),
            "warning" => Some(CompatibilityLevel::Warning),
            "dangerous" | "incompatible" | "i" => Some(CompatibilityLevel::Dangerous),
            _ => None,
        }
    }
}

impl fmt::Display for CompatibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of one evaluated pair
///
/// Declaration order is the severity order used for every comparison:
/// `None < Unknown < Caution < Warning < Dangerous`. `Unknown` sits above
/// `None` so that missing data can never read as verified compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rule found, no adverse reaction
    None,

    /// No rule found for the pair
    Unknown,

    /// Rule found at caution level
    Caution,

    /// Rule found at warning level
    Warning,

    /// Rule found at dangerous level
    Dangerous,
}

impl Severity {
    /// All severities, least to most severe
    pub const ALL: [Severity; 5] = [
        Severity::None,
        Severity::Unknown,
        Severity::Caution,
        Severity::Warning,
        Severity::Dangerous,
    ];

    /// Get the severity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Unknown => "unknown",
            Severity::Caution => "caution",
            Severity::Warning => "warning",
            Severity::Dangerous => "dangerous",
        }
    }

    /// Whether a pair at this severity is a critical pair
    pub fn is_critical(&self) -> bool {
        *self >= Severity::Warning
    }
}

impl From<CompatibilityLevel> for Severity {
    fn from(level: CompatibilityLevel) -> Self {
        match level {
            CompatibilityLevel::None => Severity::None,
            CompatibilityLevel::Caution => Severity::Caution,
            CompatibilityLevel::Warning => Severity::Warning,
            CompatibilityLevel::Dangerous => Severity::Dangerous,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall verdict for a whole analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Assessment {
    /// Every pair was verified `none`
    Compatible,

    /// Worst pair is `caution`, or some pairs are unverified
    Caution,

    /// Worst pair is `warning`
    Warning,

    /// Worst pair is `dangerous`
    Dangerous,
}

impl Assessment {
    /// Map the worst pair severity to an assessment
    ///
    /// `Unknown` maps to `Caution`: absent data is never reported as compatible.
    pub fn from_worst(worst: Severity) -> Self {
        match worst {
            Severity::None => Assessment::Compatible,
            Severity::Unknown | Severity::Caution => Assessment::Caution,
            Severity::Warning => Assessment::Warning,
            Severity::Dangerous => Assessment::Dangerous,
        }
    }

    /// Get the assessment label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Assessment::Compatible => "COMPATIBLE",
            Assessment::Caution => "CAUTION",
            Assessment::Warning => "WARNING",
            Assessment::Dangerous => "DANGEROUS",
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
