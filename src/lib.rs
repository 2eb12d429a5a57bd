//! # Online Reuse-Distance Analysis
//!
//! This library computes the reuse distance (Mattson / LRU stack distance)
//! of every access in a key stream, online and in amortized O(log n) per
//! access, where n is the number of distinct keys currently tracked.
//!
//! ## Core Algorithm
//!
//! 1. **Hash index**: resolve the key to the record of its previous access
//! 2. **Splay**: rotate that record to the top of a tree ordered by
//!    last-access time; everything accessed more recently lands in its
//!    right subtree
//! 3. **Order statistics**: each record carries its subtree size, so the
//!    right subtree's size *is* the reuse distance
//! 4. **Re-stamp**: unlink the record, stamp it with the logical clock, and
//!    reinsert it as the newest record
//!
//! First references have no previous access and report an infinite
//! distance (-1 in the signed convention).
//!
//! ## Usage Example
//!
//! ```
//! use stackdist::ReuseAnalyzer;
//!
//! # fn main() -> Result<(), stackdist::AnalysisError> {
//! let mut analyzer = ReuseAnalyzer::new();
//! assert_eq!(analyzer.record(7)?.as_i64(), -1); // first touch
//! assert_eq!(analyzer.record(9)?.as_i64(), -1);
//! assert_eq!(analyzer.record(7)?.as_i64(), 1); // one distinct key in between
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules - each implements one layer of the analyzer
pub mod histogram; // Distance histogram + LRU hit-ratio readout
pub mod index; // Key -> record association
pub mod tree; // Order-statistics splay tree over the record arena

/// Python bindings exposing the analyzer to external runtimes.
#[cfg(feature = "python-bindings")]
pub mod python_bindings;

// Re-exports for convenience
pub use histogram::DistanceHistogram;
pub use index::KeyIndex;
pub use tree::{InOrder, NodeId, Record, RecordArena};

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;
use tracing::debug;

/// Reuse distance of a single access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    /// First reference to the key; there is no previous access to measure
    /// from
    Infinite,

    /// Number of distinct other keys referenced since the key's previous
    /// access
    Finite(u64),
}

impl Distance {
    /// Signed convention used at FFI and text boundaries: -1 for
    /// [`Distance::Infinite`], the distance itself otherwise.
    #[inline]
    pub fn as_i64(self) -> i64 {
        match self {
            Distance::Infinite => -1,
            Distance::Finite(d) => d as i64,
        }
    }

    /// True for a first reference
    #[inline]
    pub fn is_infinite(self) -> bool {
        matches!(self, Distance::Infinite)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// Errors an analyzer can report.
///
/// Operating on a torn-down analyzer is not here: teardown is `Drop`, so a
/// handle that still exists is always valid.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A nonzero size hint was passed; only the unknown-size mode (hint 0)
    /// exists
    #[error("size hint must be 0 (unknown size), got {0}")]
    InvalidSizeHint(usize),

    /// Growing the record arena or the key index failed; the analyzer is
    /// unchanged and remains usable
    #[error("out of memory while growing the tracked-key set")]
    OutOfMemory(#[from] TryReserveError),
}

/// Online reuse-distance analyzer.
///
/// Owns the record arena, the key index, and the tree root. Not
/// synchronized: use one instance per thread, or guard a shared one with a
/// lock.
#[derive(Debug, Default)]
pub struct ReuseAnalyzer {
    /// Logical clock: stamped on each access, then advanced by one
    clock: u64,
    index: KeyIndex,
    records: RecordArena,
    root: Option<NodeId>,
}

impl ReuseAnalyzer {
    /// Analyzer for a trace with an unknown number of distinct keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer with an explicit size hint.
    ///
    /// Only `0` ("unknown") is accepted; capacity pre-sizing does not
    /// exist, and a nonzero hint fails with
    /// [`AnalysisError::InvalidSizeHint`] instead of silently pre-sizing
    /// nothing.
    pub fn with_size_hint(size_hint: usize) -> Result<Self, AnalysisError> {
        if size_hint != 0 {
            return Err(AnalysisError::InvalidSizeHint(size_hint));
        }
        Ok(Self::new())
    }

    /// Observe one access and return its reuse distance.
    ///
    /// 1. Look the key up in the index
    /// 2. Known key: splay its record to the root; the right subtree size
    ///    is the distance; unlink the record from the tree
    /// 3. Unknown key: allocate a fresh record; the distance is infinite
    /// 4. Stamp the record with the clock and advance the clock
    /// 5. Reinsert the record, which splays it back to the root
    ///
    /// All fallible growth happens before any state changes, so an
    /// [`AnalysisError::OutOfMemory`] leaves the analyzer exactly as it
    /// was.
    pub fn record(&mut self, key: u64) -> Result<Distance, AnalysisError> {
        let (id, distance) = match self.index.find(key) {
            Some(id) => {
                // The record keeps its arena slot and index entry; only its
                // position in the tree changes.
                tree::splay(&mut self.records, id);
                let newer = tree::subtree_size(&self.records, self.records[id].right());
                self.root = tree::remove(&mut self.records, id, id);
                (id, Distance::Finite(newer as u64))
            }
            None => {
                self.index.try_reserve(1)?;
                let id = self.records.alloc(key, self.clock)?;
                self.index.insert(key, id);
                (id, Distance::Infinite)
            }
        };

        self.records[id].last_access = self.clock;
        self.clock += 1;
        self.root = Some(tree::insert(&mut self.records, self.root, id));

        Ok(distance)
    }

    /// Forget every tracked key and restart the logical clock.
    ///
    /// Equivalent to a fresh analyzer: the same trace replayed afterwards
    /// produces the same distances a new instance would.
    pub fn reset(&mut self) {
        debug!(
            tracked = self.records.len(),
            accesses = self.clock,
            "resetting analyzer"
        );
        self.index.clear();
        self.records.clear();
        self.root = None;
        self.clock = 0;
    }

    /// Number of distinct keys currently tracked
    #[inline]
    pub fn tracked_keys(&self) -> usize {
        self.records.len()
    }

    /// Accesses observed since construction or the last reset
    #[inline]
    pub fn accesses(&self) -> u64 {
        self.clock
    }

    /// Full structural audit: subtree sizes, timestamp ordering, and
    /// tree/index agreement. O(n); meant for tests and debugging.
    pub fn is_consistent(&self) -> bool {
        if self.index.len() != self.records.len() {
            return false;
        }
        if tree::subtree_size(&self.records, self.root) != self.records.len() {
            return false;
        }
        if !tree::is_size_consistent(&self.records, self.root) {
            return false;
        }
        let mut prev: Option<u64> = None;
        for id in InOrder::new(&self.records, self.root) {
            let t = self.records[id].last_access();
            if t >= self.clock || prev.is_some_and(|p| p >= t) {
                return false;
            }
            prev = Some(t);
        }
        self.index
            .iter()
            .all(|(key, id)| self.records[id].key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_rereference_has_distance_zero() {
        let mut analyzer = ReuseAnalyzer::new();

        assert_eq!(analyzer.record(42).unwrap(), Distance::Infinite);
        assert_eq!(analyzer.record(42).unwrap(), Distance::Finite(0));
        assert!(analyzer.is_consistent());
    }

    #[test]
    fn test_nonzero_size_hint_is_rejected() {
        let err = ReuseAnalyzer::with_size_hint(1024).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSizeHint(1024)));

        assert!(ReuseAnalyzer::with_size_hint(0).is_ok());
    }

    #[test]
    fn test_reset_matches_fresh_instance() {
        let mut analyzer = ReuseAnalyzer::new();
        for key in [1u64, 2, 3, 1, 2] {
            analyzer.record(key).unwrap();
        }

        analyzer.reset();

        assert_eq!(analyzer.tracked_keys(), 0);
        assert_eq!(analyzer.accesses(), 0);
        assert_eq!(analyzer.record(3).unwrap(), Distance::Infinite);
    }

    #[test]
    fn test_distance_sign_convention() {
        assert_eq!(Distance::Infinite.as_i64(), -1);
        assert_eq!(Distance::Finite(0).as_i64(), 0);
        assert_eq!(Distance::Finite(17).as_i64(), 17);
        assert_eq!(Distance::Infinite.to_string(), "-1");
        assert_eq!(Distance::Finite(3).to_string(), "3");
    }
}
