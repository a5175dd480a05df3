//! Unordered reactive-group pairs
//!
//! Every rule lookup is keyed by a `GroupPair`. Normalization happens once, at
//! construction, so `(a, b)` and `(b, a)` are the same value everywhere.

use crate::GroupId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An unordered pair of reactive groups
///
/// Stored as `(low, high)` with `low <= high`. Ordering is lexicographic on
/// that normalized form, which gives the engine its deterministic output order.
///
/// # Examples
///
/// ```
/// use hazmix_domain::{GroupId, GroupPair};
///
/// let ab = GroupPair::new(GroupId::new(5), GroupId::new(1));
/// let ba = GroupPair::new(GroupId::new(1), GroupId::new(5));
/// assert_eq!(ab, ba);
/// assert_eq!(ab.low(), GroupId::new(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupPair {
    low: GroupId,
    high: GroupId,
}

impl GroupPair {
    /// Create a normalized pair from two groups in any order
    pub fn new(a: GroupId, b: GroupId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The pair of a group with itself
    pub fn self_pair(group: GroupId) -> Self {
        Self { low: group, high: group }
    }

    /// The smaller group id
    pub fn low(&self) -> GroupId {
        self.low
    }

    /// The larger group id
    pub fn high(&self) -> GroupId {
        self.high
    }

    /// Whether both sides are the same group
    pub fn is_self_pair(&self) -> bool {
        self.low == self.high
    }

    /// Whether `group` is one of the two sides
    pub fn contains(&self, group: GroupId) -> bool {
        self.low == group || self.high == group
    }

    /// The side that is not `group`, if `group` is part of the pair
    pub fn other(&self, group: GroupId) -> Option<GroupId> {
        if self.low == group {
            Some(self.high)
        } else if self.high == group {
            Some(self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for GroupPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(id: u32) -> GroupId {
        GroupId::new(id)
    }

    #[test]
    fn test_self_pair() {
        let pair = GroupPair::self_pair(g(3));
        assert!(pair.is_self_pair());
        assert_eq!(pair, GroupPair::new(g(3), g(3)));
    }

    #[test]
    fn test_other_side() {
        let pair = GroupPair::new(g(10), g(2));
        assert_eq!(pair.other(g(10)), Some(g(2)));
        assert_eq!(pair.other(g(2)), Some(g(10)));
        assert_eq!(pair.other(g(7)), None);
        assert!(pair.contains(g(2)));
    }

    #[test]
    fn test_ordering_is_by_low_then_high() {
        let mut pairs = vec![
            GroupPair::new(g(5), g(2)),
            GroupPair::new(g(1), g(9)),
            GroupPair::new(g(2), g(3)),
        ];
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                GroupPair::new(g(1), g(9)),
                GroupPair::new(g(2), g(3)),
                GroupPair::new(g(2), g(5)),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(GroupPair::new(g(5), g(1)).to_string(), "(1, 5)");
    }
}
