//! Read-through cache for reference lookups
//!
//! Reference data is static for the lifetime of a session, so membership and
//! rule lookups can be memoized safely. [`CachedStore::clear`] drops every
//! cached entry, e.g. after the underlying database was replaced.

use hazmix_domain::traits::{ChemicalDirectory, ReferenceStats, ReferenceStore};
use hazmix_domain::{
    Chemical, ChemicalId, CompatibilityRule, GroupId, GroupPair, HazardCategory, HazardCategoryId,
    ReactiveGroup,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

/// Caching wrapper around any [`ReferenceStore`]
///
/// Caches chemical memberships, water groups and rules (including negative
/// results). Metadata lookups pass straight through.
pub struct CachedStore<S> {
    inner: S,
    memberships: RwLock<HashMap<ChemicalId, Option<BTreeSet<GroupId>>>>,
    rules: RwLock<HashMap<GroupPair, Option<CompatibilityRule>>>,
    water: RwLock<Option<BTreeSet<GroupId>>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<S> CachedStore<S> {
    /// Wrap a store with empty caches
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            memberships: RwLock::new(HashMap::new()),
            rules: RwLock::new(HashMap::new()),
            water: RwLock::new(None),
        }
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drop all cached entries
    pub fn clear(&self) {
        write(&self.memberships).clear();
        write(&self.rules).clear();
        *write(&self.water) = None;
        trace!("Reference cache cleared");
    }

    /// Number of cached memberships and rules
    pub fn cached_entries(&self) -> (usize, usize) {
        (read(&self.memberships).len(), read(&self.rules).len())
    }
}

impl<S: ReferenceStore> ReferenceStore for CachedStore<S> {
    type Error = S::Error;

    fn groups_for_chemical(&self, id: ChemicalId) -> Result<Option<BTreeSet<GroupId>>, Self::Error> {
        if let Some(cached) = read(&self.memberships).get(&id) {
            return Ok(cached.clone());
        }
        let groups = self.inner.groups_for_chemical(id)?;
        write(&self.memberships).insert(id, groups.clone());
        Ok(groups)
    }

    fn groups_for_water(&self) -> Result<BTreeSet<GroupId>, Self::Error> {
        if let Some(cached) = read(&self.water).as_ref() {
            return Ok(cached.clone());
        }
        let groups = self.inner.groups_for_water()?;
        *write(&self.water) = Some(groups.clone());
        Ok(groups)
    }

    fn rule(&self, a: GroupId, b: GroupId) -> Result<Option<CompatibilityRule>, Self::Error> {
        let pair = GroupPair::new(a, b);
        if let Some(cached) = read(&self.rules).get(&pair) {
            return Ok(cached.clone());
        }
        let rule = self.inner.rule(pair.low(), pair.high())?;
        write(&self.rules).insert(pair, rule.clone());
        Ok(rule)
    }

    fn hazard_category(&self, id: HazardCategoryId) -> Result<Option<HazardCategory>, Self::Error> {
        self.inner.hazard_category(id)
    }

    fn reactive_group(&self, id: GroupId) -> Result<Option<ReactiveGroup>, Self::Error> {
        self.inner.reactive_group(id)
    }

    fn chemical(&self, id: ChemicalId) -> Result<Option<Chemical>, Self::Error> {
        self.inner.chemical(id)
    }
}

impl<S: ChemicalDirectory> ChemicalDirectory for CachedStore<S> {
    type Error = S::Error;

    fn cas_numbers(&self, id: ChemicalId) -> Result<Vec<String>, Self::Error> {
        self.inner.cas_numbers(id)
    }

    fn un_numbers(&self, id: ChemicalId) -> Result<Vec<String>, Self::Error> {
        self.inner.un_numbers(id)
    }

    fn list_groups(&self) -> Result<Vec<ReactiveGroup>, Self::Error> {
        self.inner.list_groups()
    }

    fn groups_of(&self, id: ChemicalId) -> Result<Vec<ReactiveGroup>, Self::Error> {
        self.inner.groups_of(id)
    }

    fn statistics(&self) -> Result<ReferenceStats, Self::Error> {
        self.inner.statistics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazmix_domain::CompatibilityLevel;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store that counts rule lookups
    #[derive(Default)]
    struct CountingStore {
        rule_calls: AtomicUsize,
        membership_calls: AtomicUsize,
    }

    impl ReferenceStore for CountingStore {
        type Error = String;

        fn groups_for_chemical(&self, id: ChemicalId) -> Result<Option<BTreeSet<GroupId>>, String> {
            self.membership_calls.fetch_add(1, Ordering::SeqCst);
            if id.value() == 1 {
                Ok(Some(BTreeSet::from([GroupId::new(1)])))
            } else {
                Ok(None)
            }
        }

        fn groups_for_water(&self) -> Result<BTreeSet<GroupId>, String> {
            Ok(BTreeSet::from([GroupId::new(100)]))
        }

        fn rule(&self, a: GroupId, b: GroupId) -> Result<Option<CompatibilityRule>, String> {
            self.rule_calls.fetch_add(1, Ordering::SeqCst);
            assert!(a <= b, "cache must normalize before delegating");
            Ok(Some(CompatibilityRule::new(CompatibilityLevel::Warning)))
        }

        fn hazard_category(&self, _id: HazardCategoryId) -> Result<Option<HazardCategory>, String> {
            Ok(None)
        }

        fn reactive_group(&self, _id: GroupId) -> Result<Option<ReactiveGroup>, String> {
            Ok(None)
        }

        fn chemical(&self, _id: ChemicalId) -> Result<Option<Chemical>, String> {
            Ok(None)
        }
    }

    #[test]
    fn test_rule_cached_for_both_orderings() {
        let cache = CachedStore::new(CountingStore::default());
        let first = cache.rule(GroupId::new(5), GroupId::new(1)).unwrap();
        let second = cache.rule(GroupId::new(1), GroupId::new(5)).unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.inner().rule_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_negative_membership_is_cached() {
        let cache = CachedStore::new(CountingStore::default());
        assert!(cache.groups_for_chemical(ChemicalId::new(9)).unwrap().is_none());
        assert!(cache.groups_for_chemical(ChemicalId::new(9)).unwrap().is_none());
        assert_eq!(cache.inner().membership_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear_drops_entries() {
        let cache = CachedStore::new(CountingStore::default());
        cache.groups_for_chemical(ChemicalId::new(1)).unwrap();
        cache.rule(GroupId::new(1), GroupId::new(2)).unwrap();
        assert_eq!(cache.cached_entries(), (1, 1));

        cache.clear();
        assert_eq!(cache.cached_entries(), (0, 0));

        cache.rule(GroupId::new(1), GroupId::new(2)).unwrap();
        assert_eq!(cache.inner().rule_calls.load(Ordering::SeqCst), 2);
    }
}
