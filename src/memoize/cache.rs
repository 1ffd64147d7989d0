//! The single-threaded cache shared by [`Memoized`](super::Memoized) and
//! [`TryMemoized`](super::TryMemoized).

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::trace;

use super::CacheHasher;

/// Insert-only mapping from cache keys to computed values.
///
/// The interior borrow is never held while a value is being computed, so the
/// computation may panic or call back into the same cache without tripping
/// the `RefCell`.
pub(crate) struct MemoCache<K, V> {
    entries: RefCell<HashMap<K, V, CacheHasher>>,
}

impl<K, V> MemoCache<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::with_capacity_and_hasher(
                capacity,
                CacheHasher::default(),
            )),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

impl<K: Hash + Eq, V: Clone> MemoCache<K, V> {
    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// An `Err` from `compute` is returned as is and leaves the cache
    /// unchanged. If the key was populated while `compute` ran, the earlier
    /// entry is kept and returned.
    pub(crate) fn get_or_try_insert_with<E>(
        &self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.entries.borrow().get(&key) {
            trace!(target: "curry_memo::memoize", "cache hit");
            return Ok(value.clone());
        }

        trace!(target: "curry_memo::memoize", "cache miss");
        let value = compute()?;

        let mut entries = self.entries.borrow_mut();
        let stored = entries.entry(key).or_insert(value).clone();
        trace!(target: "curry_memo::memoize", entries = entries.len(), "cache store");
        Ok(stored)
    }

    pub(crate) fn contains_key(&self, key: &K) -> bool {
        self.entries.borrow().contains_key(key)
    }
}
