//! Reactive group module

use crate::GroupId;
use serde::{Deserialize, Serialize};

/// A reactivity classification shared by many chemicals
///
/// Groups are reference data: they come from the read-only store and never
/// change during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactiveGroup {
    /// Group identifier
    pub id: GroupId,

    /// Display name, e.g. "Acids, Strong Oxidizing"
    pub name: String,

    /// Descriptive text
    pub description: String,

    /// Whether chemicals in this group need special handling
    pub special_handling: bool,
}

impl ReactiveGroup {
    /// Create a group without special handling
    pub fn new(id: GroupId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            special_handling: false,
        }
    }

    /// Mark the group as needing special handling
    pub fn with_special_handling(mut self) -> Self {
        self.special_handling = true;
        self
    }
}
