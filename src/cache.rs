//! An in-memory read cache whose entries are dropped by tag.
//!
//! Month listings are cached under [CacheTag::Expenses] and every create,
//! update or delete invalidates that tag, so reads never observe a listing
//! older than the last successful mutation. The cache holds a fixed number of
//! entries; once full, new keys are not cached until the next invalidation.

use std::{
    collections::HashMap,
    hash::Hash,
    sync::{PoisonError, RwLock},
};

use crate::{
    expense::Expense,
    month::{MonthBound, MonthScope},
};

/// Groups of cache entries that are invalidated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTag {
    /// Entries derived from the expense table.
    Expenses,
}

#[derive(Debug)]
struct CacheEntry<V> {
    tag: CacheTag,
    value: V,
}

/// The most month listings kept in the [ExpenseCache].
pub const EXPENSE_CACHE_CAPACITY: usize = 64;

/// A thread-safe map of cached values, each labelled with a [CacheTag].
#[derive(Debug)]
pub struct TaggedCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    capacity: usize,
}

impl<K, V> TaggedCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create an empty cache that holds at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// A copy of the value cached for `key`, if any.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .map(|entry| entry.value.clone())
    }

    /// Cache `value` for `key` under `tag`, replacing any previous value.
    ///
    /// Returns `false` without caching anything if `key` is new and the cache
    /// is full.
    pub fn insert(&self, key: K, tag: CacheTag, value: V) -> bool {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            tracing::debug!("Cache full at {} entries, skipping insert", self.capacity);
            return false;
        }

        entries.insert(key, CacheEntry { tag, value });
        true
    }

    /// Drop every entry cached under `tag`, returning how many were dropped.
    pub fn invalidate(&self, tag: CacheTag) -> usize {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let count_before = entries.len();
        entries.retain(|_, entry| entry.tag != tag);

        let dropped = count_before - entries.len();
        if dropped > 0 {
            tracing::debug!("Invalidated {dropped} cache entries tagged {tag:?}");
        }

        dropped
    }

    /// The number of cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The cache of month listings, keyed by month and bound policy.
pub type ExpenseCache = TaggedCache<(MonthScope, MonthBound), Vec<Expense>>;
