//! Key → record association
//!
//! One hash lookup resolves an access key to the arena id of its record; the
//! tree side is reached through the same `NodeId`. A key maps to at most one
//! live record at a time.

use std::collections::{HashMap, TryReserveError};

use crate::tree::NodeId;

/// Hash index from access key to record id.
#[derive(Debug, Default)]
pub struct KeyIndex {
    map: HashMap<u64, NodeId>,
}

impl KeyIndex {
    /// Empty index.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Record id currently tracking `key`, if any.
    #[inline]
    pub fn find(&self, key: u64) -> Option<NodeId> {
        self.map.get(&key).copied()
    }

    /// Register `key -> id`. The caller removes any stale mapping first;
    /// overwriting is never relied upon.
    pub fn insert(&mut self, key: u64, id: NodeId) {
        let prev = self.map.insert(key, id);
        debug_assert!(prev.is_none(), "key {key} already indexed");
    }

    /// Drop the mapping for `key`, returning the id it pointed at.
    pub fn remove(&mut self, key: u64) -> Option<NodeId> {
        self.map.remove(&key)
    }

    /// Reserve room for `additional` more keys, failing instead of aborting
    /// when the table cannot grow.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.map.try_reserve(additional)
    }

    /// Number of tracked keys
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when no key is tracked
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop every mapping.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterate over `(key, id)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, NodeId)> + '_ {
        self.map.iter().map(|(&key, &id)| (key, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_after_insert() {
        let mut index = KeyIndex::new();
        index.insert(7, 0);
        index.insert(99, 1);

        assert_eq!(index.find(7), Some(0));
        assert_eq!(index.find(99), Some(1));
        assert_eq!(index.find(8), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_remove_then_reinsert() {
        let mut index = KeyIndex::new();
        index.insert(5, 3);

        assert_eq!(index.remove(5), Some(3));
        assert_eq!(index.find(5), None);

        index.insert(5, 8);
        assert_eq!(index.find(5), Some(8));
    }

    #[test]
    fn test_clear_empties_index() {
        let mut index = KeyIndex::new();
        for k in 0..32 {
            index.insert(k, k as NodeId);
        }

        index.clear();

        assert!(index.is_empty());
        assert_eq!(index.find(0), None);
    }

    #[test]
    fn test_try_reserve_succeeds_for_small_counts() {
        let mut index = KeyIndex::new();
        index.try_reserve(1024).expect("reservation");
        for k in 0..1024 {
            index.insert(k, k as NodeId);
        }
        assert_eq!(index.len(), 1024);
    }
}
