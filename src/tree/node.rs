//! Arena-backed tree records
//!
//! Record = one tracked key: (key, last_access) + tree links + subtree size
//! Links are arena indices (`NodeId`), never pointers
//! Invariant: size = 1 + size(left) + size(right), maintained by every
//! structural operation in [`crate::tree`]

use std::collections::TryReserveError;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Stable identifier of a record inside its [`RecordArena`].
///
/// Valid until the next [`RecordArena::clear`].
pub type NodeId = usize;

/// One tracked key: tree node and index entry in a single allocation.
#[derive(Debug, Clone)]
pub struct Record {
    /// Access key this record tracks (unique among live records)
    pub(crate) key: u64,

    /// Logical timestamp of the most recent access (unique, BST order key)
    pub(crate) last_access: u64,

    /// Records in the subtree rooted here, including this one
    pub(crate) size: usize,

    /// Left child (all timestamps strictly smaller)
    pub(crate) left: Option<NodeId>,

    /// Right child (all timestamps strictly greater)
    pub(crate) right: Option<NodeId>,

    /// Parent link; `None` iff this record is the root or detached
    pub(crate) parent: Option<NodeId>,
}

impl Record {
    /// Fresh detached record: unit subtree, no links.
    pub(crate) fn new(key: u64, last_access: u64) -> Self {
        Self {
            key,
            last_access,
            size: 1,
            left: None,
            right: None,
            parent: None,
        }
    }

    /// Access key this record tracks
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    /// Logical timestamp of the most recent access
    #[inline]
    pub fn last_access(&self) -> u64 {
        self.last_access
    }

    /// Number of records in the subtree rooted here (≥ 1)
    #[inline]
    pub fn subtree_size(&self) -> usize {
        self.size
    }

    /// Left child id, if any
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child id, if any
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Parent id; `None` for the root
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Detach all links and shrink back to a unit subtree.
    pub(crate) fn reset_links(&mut self) {
        self.left = None;
        self.right = None;
        self.parent = None;
        self.size = 1;
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} (size {})", self.key, self.last_access, self.size)
    }
}

/// Owner of every [`Record`]; ids are indices into the backing vector.
///
/// Slots are only appended or cleared wholesale, so a `NodeId` handed out by
/// [`alloc`](Self::alloc) stays valid until [`clear`](Self::clear). Clearing
/// releases all records in O(1) slots-dropped time with no tree walk.
#[derive(Debug, Default)]
pub struct RecordArena {
    records: Vec<Record>,
}

impl RecordArena {
    /// Empty arena.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Allocate a detached record, failing (instead of aborting) when the
    /// backing vector cannot grow.
    pub fn alloc(&mut self, key: u64, last_access: u64) -> Result<NodeId, TryReserveError> {
        self.records.try_reserve(1)?;
        let id = self.records.len();
        self.records.push(Record::new(key, last_access));
        Ok(id)
    }

    /// Reserve room for `additional` more records without allocating them.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.records.try_reserve(additional)
    }

    /// Number of live records
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records are live
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Release every record and invalidate all outstanding ids.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Shared view of a record
    #[inline]
    pub fn get(&self, id: NodeId) -> &Record {
        &self.records[id]
    }
}

impl Index<NodeId> for RecordArena {
    type Output = Record;

    #[inline]
    fn index(&self, id: NodeId) -> &Record {
        &self.records[id]
    }
}

impl IndexMut<NodeId> for RecordArena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Record {
        &mut self.records[id]
    }
}
