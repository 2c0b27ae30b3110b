// ── Query cache ──
//
// Concurrent storage for completed query results, keyed by `QueryKey`.
// Entries hold the last-completed JSON value: whichever fetch for a key
// finishes last wins, regardless of issue order. Invalidation marks
// entries stale (the data stays visible until the refetch lands) and
// bumps an epoch watch channel so dependent readers know to refetch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::watch;

use super::key::{QueryKey, Selector};

/// One cached result.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Arc<serde_json::Value>,
    pub fetched_at: DateTime<Utc>,
    pub stale: bool,
}

/// Concurrent map of query results with selector-based invalidation.
pub struct QueryCache {
    entries: DashMap<QueryKey, CacheEntry>,
    /// Bumped on every store/invalidation that changed something.
    epoch: watch::Sender<u64>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let (epoch, _) = watch::channel(0u64);
        Self {
            entries: DashMap::new(),
            epoch,
        }
    }

    /// Fresh value for the key, if any. Stale entries return `None` so
    /// the caller refetches.
    pub fn fresh(&self, key: &QueryKey) -> Option<Arc<serde_json::Value>> {
        self.entries
            .get(key)
            .filter(|e| !e.stale)
            .map(|e| Arc::clone(&e.value))
    }

    /// The entry for a key, fresh or stale (for optimistic display).
    pub fn entry(&self, key: &QueryKey) -> Option<CacheEntry> {
        self.entries.get(key).map(|e| e.value().clone())
    }

    /// Store a completed fetch. Unconditional: the most recently
    /// completed fetch for a key is authoritative.
    pub fn store(&self, key: QueryKey, value: serde_json::Value) {
        self.entries.insert(
            key,
            CacheEntry {
                value: Arc::new(value),
                fetched_at: Utc::now(),
                stale: false,
            },
        );
        self.bump();
    }

    /// Mark every entry the selector covers as stale. Returns how many
    /// entries were marked. No-ops never bump the epoch.
    pub fn invalidate(&self, selector: &Selector) -> usize {
        let mut marked = 0;
        for mut entry in self.entries.iter_mut() {
            if !entry.stale && selector.matches(entry.key()) {
                entry.stale = true;
                marked += 1;
            }
        }
        if marked > 0 {
            self.bump();
        }
        marked
    }

    /// Drop everything. Used on session teardown: cached data is scoped
    /// to the authenticated user.
    pub fn clear(&self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.bump();
        }
    }

    /// Subscribe to epoch bumps.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.epoch.subscribe()
    }

    pub fn epoch(&self) -> u64 {
        *self.epoch.borrow()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn bump(&self) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.epoch.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::query::key::{Collection, FilterSet, Relation};

    fn id(n: u8) -> Uuid {
        Uuid::from_u128(u128::from(n))
    }

    #[test]
    fn store_then_fresh_round_trips() {
        let cache = QueryCache::new();
        let key = QueryKey::list(Collection::Subjects, FilterSet::empty());

        assert!(cache.fresh(&key).is_none());
        cache.store(key.clone(), json!([{"name": "Math"}]));

        let value = cache.fresh(&key).unwrap();
        assert_eq!(*value, json!([{"name": "Math"}]));
    }

    #[test]
    fn invalidating_lists_marks_all_filtered_variants() {
        let cache = QueryCache::new();
        let plain = QueryKey::list(Collection::Students, FilterSet::empty());
        let filtered = QueryKey::list(
            Collection::Students,
            FilterSet::new([("grade_level", "3")]),
        );
        let detail = QueryKey::detail(Collection::Students, id(1));

        cache.store(plain.clone(), json!([]));
        cache.store(filtered.clone(), json!([]));
        cache.store(detail.clone(), json!({}));

        let marked = cache.invalidate(&Selector::Lists(Collection::Students));
        assert_eq!(marked, 2);

        assert!(cache.fresh(&plain).is_none());
        assert!(cache.fresh(&filtered).is_none());
        // Details untouched by a lists selector.
        assert!(cache.fresh(&detail).is_some());
    }

    #[test]
    fn stale_entry_stays_readable_until_refetched() {
        let cache = QueryCache::new();
        let key = QueryKey::list(Collection::Rooms, FilterSet::empty());
        cache.store(key.clone(), json!([1]));

        cache.invalidate(&Selector::Lists(Collection::Rooms));
        assert!(cache.fresh(&key).is_none());
        let entry = cache.entry(&key).unwrap();
        assert!(entry.stale);
        assert_eq!(*entry.value, json!([1]));

        // A completed refetch makes the key fresh again.
        cache.store(key.clone(), json!([2]));
        assert_eq!(*cache.fresh(&key).unwrap(), json!([2]));
    }

    #[test]
    fn invalidation_bumps_epoch_only_when_something_was_marked() {
        let cache = QueryCache::new();
        let key = QueryKey::relation(
            Collection::Classrooms,
            Relation::ClassroomRoster,
            id(5),
            FilterSet::empty(),
        );
        cache.store(key, json!([]));
        let before = cache.epoch();

        // Nothing under Years is cached.
        cache.invalidate(&Selector::Lists(Collection::Years));
        assert_eq!(cache.epoch(), before);

        cache.invalidate(&Selector::Relation(
            Collection::Classrooms,
            Relation::ClassroomRoster,
            id(5),
        ));
        assert_eq!(cache.epoch(), before + 1);

        // Already stale: marking again is a no-op.
        cache.invalidate(&Selector::Relation(
            Collection::Classrooms,
            Relation::ClassroomRoster,
            id(5),
        ));
        assert_eq!(cache.epoch(), before + 1);
    }

    #[test]
    fn clear_empties_everything() {
        let cache = QueryCache::new();
        cache.store(
            QueryKey::list(Collection::Years, FilterSet::empty()),
            json!([]),
        );
        cache.store(QueryKey::detail(Collection::Years, id(1)), json!({}));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn last_completed_write_wins() {
        let cache = QueryCache::new();
        let key = QueryKey::list(Collection::Enrollments, FilterSet::empty());

        // Two in-flight fetches for the same key complete out of issue
        // order; the later completion is authoritative.
        cache.store(key.clone(), json!(["issued-second, finished-first"]));
        cache.store(key.clone(), json!(["issued-first, finished-last"]));

        assert_eq!(
            *cache.fresh(&key).unwrap(),
            json!(["issued-first, finished-last"])
        );
    }
}
