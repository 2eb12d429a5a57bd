//! Stack-based in-order traversal
//!
//! Splay trees can degenerate into chains as long as the record count, so
//! full-tree walks never use native recursion; the descent path lives in an
//! explicit `Vec`.

use super::node::{NodeId, RecordArena};

/// In-order iterator over record ids, i.e. ascending `last_access`.
///
/// Stack depth tracks the current tree height.
#[derive(Debug)]
pub struct InOrder<'a> {
    arena: &'a RecordArena,
    stack: Vec<NodeId>,
}

impl<'a> InOrder<'a> {
    /// Start a walk at `root` (`None` yields an empty iterator).
    pub fn new(arena: &'a RecordArena, root: Option<NodeId>) -> Self {
        let mut iter = Self {
            arena,
            stack: Vec::new(),
        };
        iter.descend_left(root);
        iter
    }

    /// Push the left spine of the subtree at `cur` onto the stack.
    fn descend_left(&mut self, mut cur: Option<NodeId>) {
        while let Some(id) = cur {
            self.stack.push(id);
            cur = self.arena[id].left();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.descend_left(self.arena[id].right());
        Some(id)
    }
}
