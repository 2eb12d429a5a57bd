//! Order-statistics splay tree keyed by last-access time
//!
//! Nodes live in a [`RecordArena`]; links are arena indices. Every record
//! carries the size of its subtree, so "how many records were accessed after
//! time t" is a single root-to-leaf descent.
//!
//! All operations are free functions over `(&mut RecordArena, root)` and
//! return the new root where the shape can change. Rotations recompute the
//! sizes of exactly the nodes whose children changed, demoted node before
//! promoted node, so the size invariant holds after every step of a splay.

mod node;
mod traversal;

pub use node::{NodeId, Record, RecordArena};
pub use traversal::InOrder;

/// Size of an optional subtree; 0 for an absent child.
#[inline]
pub fn subtree_size(arena: &RecordArena, id: Option<NodeId>) -> usize {
    id.map_or(0, |id| arena[id].size)
}

/// Recompute one record's size from its children.
#[inline]
fn update_size(arena: &mut RecordArena, id: NodeId) {
    let size = 1 + subtree_size(arena, arena[id].left) + subtree_size(arena, arena[id].right);
    arena[id].size = size;
}

/// Promote `id`'s left child one level.
///
/// ```text
///       id            l
///      /  \          / \
///     l    c   →    a   id
///    / \               /  \
///   a   b             b    c
/// ```
fn rotate_right(arena: &mut RecordArena, id: NodeId) {
    let promoted = arena[id].left.expect("right rotation requires a left child");
    let moved = arena[promoted].right;
    let parent = arena[id].parent;

    arena[id].left = moved;
    if let Some(m) = moved {
        arena[m].parent = Some(id);
    }

    arena[promoted].parent = parent;
    if let Some(p) = parent {
        if arena[p].left == Some(id) {
            arena[p].left = Some(promoted);
        } else {
            arena[p].right = Some(promoted);
        }
    }

    arena[promoted].right = Some(id);
    arena[id].parent = Some(promoted);

    update_size(arena, id);
    update_size(arena, promoted);
}

/// Promote `id`'s right child one level (mirror of [`rotate_right`]).
fn rotate_left(arena: &mut RecordArena, id: NodeId) {
    let promoted = arena[id].right.expect("left rotation requires a right child");
    let moved = arena[promoted].left;
    let parent = arena[id].parent;

    arena[id].right = moved;
    if let Some(m) = moved {
        arena[m].parent = Some(id);
    }

    arena[promoted].parent = parent;
    if let Some(p) = parent {
        if arena[p].left == Some(id) {
            arena[p].left = Some(promoted);
        } else {
            arena[p].right = Some(promoted);
        }
    }

    arena[promoted].left = Some(id);
    arena[id].parent = Some(promoted);

    update_size(arena, id);
    update_size(arena, promoted);
}

/// Splay `id` to the root and return it.
///
/// Bottom-up: zig when the parent is the root, zig-zig (grandparent rotated
/// first) when node and parent are same-side children, zig-zag (parent
/// rotated first) otherwise. Since each rotation repairs the sizes it
/// disturbs, the whole access path ends up recomputed by the time `id`
/// reaches the top.
pub fn splay(arena: &mut RecordArena, id: NodeId) -> NodeId {
    while let Some(parent) = arena[id].parent {
        match arena[parent].parent {
            None => {
                // zig
                if arena[parent].left == Some(id) {
                    rotate_right(arena, parent);
                } else {
                    rotate_left(arena, parent);
                }
            }
            Some(grand) => {
                let node_is_left = arena[parent].left == Some(id);
                let parent_is_left = arena[grand].left == Some(parent);
                match (node_is_left, parent_is_left) {
                    // zig-zig
                    (true, true) => {
                        rotate_right(arena, grand);
                        rotate_right(arena, parent);
                    }
                    (false, false) => {
                        rotate_left(arena, grand);
                        rotate_left(arena, parent);
                    }
                    // zig-zag
                    (true, false) => {
                        rotate_right(arena, parent);
                        rotate_left(arena, grand);
                    }
                    (false, true) => {
                        rotate_left(arena, parent);
                        rotate_right(arena, grand);
                    }
                }
            }
        }
    }
    id
}

/// Insert a detached record into the tree and splay it to the root.
///
/// Descends by `last_access` (duplicates are impossible: the logical clock
/// never repeats), incrementing each visited ancestor's size, attaches the
/// record as a leaf, then splays. Returns the new root, which is `id`.
pub fn insert(arena: &mut RecordArena, root: Option<NodeId>, id: NodeId) -> NodeId {
    debug_assert_eq!(arena[id].size, 1, "insert expects a detached record");
    debug_assert!(arena[id].parent.is_none(), "insert expects a detached record");

    let Some(top) = root else {
        return id;
    };

    let time = arena[id].last_access;
    let mut cur = top;
    loop {
        arena[cur].size += 1;
        if time < arena[cur].last_access {
            match arena[cur].left {
                Some(next) => cur = next,
                None => {
                    arena[cur].left = Some(id);
                    arena[id].parent = Some(cur);
                    break;
                }
            }
        } else {
            debug_assert!(
                time > arena[cur].last_access,
                "duplicate last-access time {time}"
            );
            match arena[cur].right {
                Some(next) => cur = next,
                None => {
                    arena[cur].right = Some(id);
                    arena[id].parent = Some(cur);
                    break;
                }
            }
        }
    }

    splay(arena, id)
}

/// Unlink `id` from the tree rooted at `root` and return the new root
/// (`None` when the tree becomes empty).
///
/// Three cases: a record with at most one child is replaced by that child;
/// a record with two children is replaced by its in-order successor, which
/// is spliced out of the right subtree first. Sizes are repaired bottom-up
/// along the successor's old path and then along the removed record's old
/// ancestor path. The slot keeps its key and timestamp; only its links are
/// cleared, so the caller may re-stamp and re-insert it.
pub fn remove(arena: &mut RecordArena, root: NodeId, id: NodeId) -> Option<NodeId> {
    debug_assert!(arena[root].parent.is_none(), "root must have no parent");

    let parent = arena[id].parent;
    let replacement = match (arena[id].left, arena[id].right) {
        (None, None) => None,
        (Some(l), None) => Some(l),
        (None, Some(r)) => Some(r),
        (Some(l), Some(r)) => {
            // in-order successor: leftmost record of the right subtree
            let mut succ = r;
            while let Some(next) = arena[succ].left {
                succ = next;
            }
            if succ != r {
                // splice out succ (it has no left child), then graft the
                // whole right subtree beneath it
                let succ_parent = arena[succ].parent.expect("successor below r has a parent");
                let succ_right = arena[succ].right;
                arena[succ_parent].left = succ_right;
                if let Some(sr) = succ_right {
                    arena[sr].parent = Some(succ_parent);
                }
                arena[succ].right = Some(r);
                arena[r].parent = Some(succ);
                // repair sizes from the splice point up through r
                let mut cur = succ_parent;
                loop {
                    update_size(arena, cur);
                    match arena[cur].parent {
                        Some(p) if p != succ => cur = p,
                        _ => break,
                    }
                }
            }
            arena[succ].left = Some(l);
            arena[l].parent = Some(succ);
            update_size(arena, succ);
            Some(succ)
        }
    };

    if let Some(rep) = replacement {
        arena[rep].parent = parent;
    }
    let new_root = match parent {
        None => replacement,
        Some(p) => {
            if arena[p].left == Some(id) {
                arena[p].left = replacement;
            } else {
                arena[p].right = replacement;
            }
            let mut cur = Some(p);
            while let Some(c) = cur {
                update_size(arena, c);
                cur = arena[c].parent;
            }
            Some(root)
        }
    };

    arena[id].reset_links();
    new_root
}

/// Count records whose `last_access` is strictly greater than `time`.
///
/// One descent from the root; same-or-smaller nodes send it right, greater
/// nodes contribute `1 + size(right child)` and send it left. The deepest
/// record visited is splayed, so repeated queries keep the amortized bound.
/// Returns the count and the new root.
pub fn count_greater(
    arena: &mut RecordArena,
    root: Option<NodeId>,
    time: u64,
) -> (usize, Option<NodeId>) {
    let Some(top) = root else {
        return (0, None);
    };

    let mut count = 0usize;
    let mut cur = top;
    loop {
        let next = if arena[cur].last_access > time {
            count += 1 + subtree_size(arena, arena[cur].right);
            arena[cur].left
        } else {
            arena[cur].right
        };
        match next {
            Some(n) => cur = n,
            None => break,
        }
    }

    let new_root = splay(arena, cur);
    (count, Some(new_root))
}

/// Audit the size invariant over the whole tree (iterative, explicit stack).
pub fn is_size_consistent(arena: &RecordArena, root: Option<NodeId>) -> bool {
    let mut stack = Vec::new();
    if let Some(top) = root {
        stack.push(top);
    }
    while let Some(id) = stack.pop() {
        let rec = &arena[id];
        let expected = 1 + subtree_size(arena, rec.left) + subtree_size(arena, rec.right);
        if rec.size != expected {
            return false;
        }
        if let Some(l) = rec.left {
            stack.push(l);
        }
        if let Some(r) = rec.right {
            stack.push(r);
        }
    }
    true
}
