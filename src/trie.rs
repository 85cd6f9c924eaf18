use crate::arena::Arena;
use crate::key::{branch, prefix};
use crate::level::LevelTables;
use crate::node::{Internal, Leaf, Link, Node, NodeId, LEFT, RIGHT};

/// The x-fast trie over already normalized keys.
///
/// Levels run from 0 (the root, empty prefix) to `width` (the leaves, full
/// key). Every node is owned by exactly one level table entry; all links
/// between nodes are [NodeId]s into the arena.
#[derive(Clone)]
pub(crate) struct RawTrie {
    width: u32,
    pub(crate) levels: LevelTables,
    pub(crate) arena: Arena,
    min: Option<NodeId>,
    max: Option<NodeId>,
    count: usize,
}

impl RawTrie {
    pub(crate) fn new(width: u32) -> Self {
        RawTrie {
            width,
            levels: LevelTables::new(width),
            arena: Arena::default(),
            min: None,
            max: None,
            count: 0,
        }
    }

    #[inline]
    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn min_node(&self) -> Option<NodeId> {
        self.min
    }

    #[inline]
    pub(crate) fn max_node(&self) -> Option<NodeId> {
        self.max
    }

    #[inline]
    pub(crate) fn value(&self, leaf: NodeId) -> u64 {
        self.arena.leaf(leaf).value
    }

    #[inline]
    pub(crate) fn find(&self, key: u64) -> Option<NodeId> {
        self.levels.get(self.width, key)
    }

    /// Binary search over depth for the deepest node whose prefix matches
    /// `key`. Returns the node and its level, or `None` on an empty trie.
    ///
    /// A level of `width` means the key is stored and the node is its leaf.
    /// Otherwise the node is internal and has no child on `key`'s side.
    pub(crate) fn closest_ancestor(&self, key: u64) -> Option<(NodeId, u32)> {
        let mut best = self.levels.get(0, 0)?;
        let mut lo: u32 = 0;
        let mut hi = self.width;

        while lo < hi {
            let mid = lo + (hi - lo).div_ceil(2);
            match self.levels.get(mid, prefix(key, mid, self.width)) {
                Some(node) => {
                    best = node;
                    lo = mid;
                }
                None => hi = mid - 1,
            }
        }

        Some((best, lo))
    }

    /// The stored leaf nearest to `key`: the key's own leaf if present,
    /// otherwise whichever of its predecessor and successor is closer.
    pub(crate) fn closest_leaf(&self, key: u64) -> Option<NodeId> {
        let (ancestor, level) = self.closest_ancestor(key)?;
        if level == self.width {
            return Some(ancestor);
        }

        let side = branch(key, level, self.width);
        let descendant = match self.arena.internal(ancestor).children[side] {
            Link::Descendant(leaf) => leaf,
            Link::Child(_) => unreachable!("a child on the key's side would be a deeper ancestor"),
        };

        // A missing left side points at the subtree minimum, which is above
        // `key`, so the only closer candidate is below it. And vice versa.
        let leaf = self.arena.leaf(descendant);
        let neighbour = if side == LEFT { leaf.pred } else { leaf.succ };
        match neighbour {
            Some(n) if self.value(n).abs_diff(key) <= leaf.value.abs_diff(key) => Some(n),
            _ => Some(descendant),
        }
    }

    /// Leaf holding the largest stored key strictly below `key`.
    pub(crate) fn predecessor(&self, key: u64) -> Option<NodeId> {
        if let Some(leaf) = self.find(key) {
            return self.arena.leaf(leaf).pred;
        }
        let near = self.closest_leaf(key)?;
        if self.value(near) < key {
            Some(near)
        } else {
            self.arena.leaf(near).pred
        }
    }

    /// Leaf holding the smallest stored key strictly above `key`.
    pub(crate) fn successor(&self, key: u64) -> Option<NodeId> {
        if let Some(leaf) = self.find(key) {
            return self.arena.leaf(leaf).succ;
        }
        let near = self.closest_leaf(key)?;
        if self.value(near) > key {
            Some(near)
        } else {
            self.arena.leaf(near).succ
        }
    }

    /// Inserts `key`, returns false if it was already present.
    pub(crate) fn insert(&mut self, key: u64) -> bool {
        if self.find(key).is_some() {
            return false;
        }

        // Find the list position before the new leaf exists.
        let (pred, succ) = match self.closest_leaf(key) {
            None => (None, None),
            Some(near) => {
                let n = self.arena.leaf(near);
                if n.value < key {
                    (Some(near), n.succ)
                } else {
                    (n.pred, Some(near))
                }
            }
        };

        let leaf = self.arena.alloc(Node::Leaf(Leaf {
            value: key,
            pred,
            succ,
            parent: None,
        }));
        self.levels.insert(self.width, key, leaf);
        self.link_leaf(leaf, pred, succ);

        let mut child = leaf;
        for level in (0..self.width).rev() {
            let p = prefix(key, level, self.width);
            let side = branch(key, level, self.width);

            let node = match self.levels.get(level, p) {
                Some(node) => {
                    self.arena.internal_mut(node).children[side] = Link::Child(child);
                    node
                }
                None => {
                    let mut children = [Link::Descendant(leaf); 2];
                    children[side] = Link::Child(child);
                    let node = self.arena.alloc(Node::Internal(Internal {
                        children,
                        parent: None,
                    }));
                    self.levels.insert(level, p, node);
                    log::trace!("created node {p:#b} at level {level}");
                    node
                }
            };
            self.arena.get_mut(child).set_parent(Some(node));
            self.widen_descendant(node, 1 - side, leaf, key);
            child = node;
        }

        self.count += 1;
        true
    }

    /// Removes `key`, returns false if it was not present.
    pub(crate) fn remove(&mut self, key: u64) -> bool {
        let Some(leaf) = self.levels.remove(self.width, key) else {
            return false;
        };
        let Some(Node::Leaf(removed)) = self.arena.free(leaf) else {
            unreachable!("leaf table entry {key} is not a leaf");
        };
        self.unlink_leaf(removed.pred, removed.succ);

        // Walk up through parents. `emptied` is set while the node below was
        // removed, which leaves the current node without a child on that side.
        let mut emptied = true;
        let mut cursor = removed.parent;
        let mut level = self.width;
        while let Some(node) = cursor {
            level -= 1;
            let side = branch(key, level, self.width);
            let internal = self.arena.internal_mut(node);
            cursor = internal.parent;

            if emptied {
                if internal.children[1 - side].child().is_none() {
                    self.levels.remove(level, prefix(key, level, self.width));
                    self.arena.free(node);
                    log::trace!("removed node at level {level}");
                    continue;
                }
                match Self::nearest_remaining(side, removed.pred, removed.succ) {
                    Some(nearest) => internal.children[side] = Link::Descendant(nearest),
                    None => unreachable!("sibling subtree of a removed branch is empty"),
                }
                emptied = false;
            } else {
                Self::retarget_descendants(internal, leaf, removed.pred, removed.succ);
            }
        }
        debug_assert_eq!(level, 0);

        self.count -= 1;
        debug_assert!(self.count > 0 || self.levels.total() == 0);
        true
    }

    pub(crate) fn clear(&mut self) {
        self.levels.clear();
        self.arena.clear();
        self.min = None;
        self.max = None;
        self.count = 0;
    }

    /// Splices a new leaf between `pred` and `succ`, moving the global
    /// extremes when either neighbour is missing.
    fn link_leaf(&mut self, leaf: NodeId, pred: Option<NodeId>, succ: Option<NodeId>) {
        match pred {
            Some(p) => self.arena.leaf_mut(p).succ = Some(leaf),
            None => self.min = Some(leaf),
        }
        match succ {
            Some(s) => self.arena.leaf_mut(s).pred = Some(leaf),
            None => self.max = Some(leaf),
        }
    }

    /// Joins the two neighbours of a removed leaf.
    fn unlink_leaf(&mut self, pred: Option<NodeId>, succ: Option<NodeId>) {
        match pred {
            Some(p) => self.arena.leaf_mut(p).succ = succ,
            None => self.min = succ,
        }
        match succ {
            Some(s) => self.arena.leaf_mut(s).pred = pred,
            None => self.max = pred,
        }
    }

    /// After `key` joined the subtree of `node`, moves the descendant on
    /// `side` to the new leaf if it is now the subtree's extreme.
    fn widen_descendant(&mut self, node: NodeId, side: usize, leaf: NodeId, key: u64) {
        let Link::Descendant(current) = self.arena.internal(node).children[side] else {
            return;
        };
        let current = self.value(current);
        let closer = if side == LEFT { key < current } else { key > current };
        if closer {
            self.arena.internal_mut(node).children[side] = Link::Descendant(leaf);
        }
    }

    /// The leaf that takes over a descendant slot on `side` once the removed
    /// leaf is gone: subtree minimum moves to the successor, maximum to the
    /// predecessor.
    #[inline]
    fn nearest_remaining(
        side: usize,
        pred: Option<NodeId>,
        succ: Option<NodeId>,
    ) -> Option<NodeId> {
        if side == LEFT {
            succ
        } else {
            pred
        }
    }

    fn retarget_descendants(
        internal: &mut Internal,
        removed: NodeId,
        pred: Option<NodeId>,
        succ: Option<NodeId>,
    ) {
        for side in [LEFT, RIGHT] {
            if internal.children[side].descendant() != Some(removed) {
                continue;
            }
            match Self::nearest_remaining(side, pred, succ) {
                Some(nearest) => internal.children[side] = Link::Descendant(nearest),
                None => unreachable!("subtree with a child has no remaining leaf"),
            }
        }
    }
}

#[cfg(test)]
impl RawTrie {
    /// Panics if any structural invariant is broken.
    pub(crate) fn check_invariants(&self) {
        use std::collections::BTreeSet;

        let width = self.width;
        let keys: BTreeSet<u64> = self.levels.entries(width).map(|(k, _)| k).collect();
        assert_eq!(keys.len(), self.count, "count must match the leaf table");
        assert_eq!(
            self.arena.live(),
            self.levels.total(),
            "every live node must be owned by a level table"
        );

        // Key range covered by a prefix at a level.
        let span = |p: u64, level: u32| -> (u64, u64) {
            let shift = width - level;
            if shift == 64 {
                (0, u64::MAX)
            } else {
                let lo = p << shift;
                (lo, lo | ((1u64 << shift) - 1))
            }
        };

        for level in 0..=width {
            for (p, id) in self.levels.entries(level) {
                let node = self.arena.get(id);
                let (lo, hi) = span(p, level);
                assert!(
                    keys.range(lo..=hi).next().is_some(),
                    "node {p:#b} at level {level} covers no key"
                );

                match level.checked_sub(1) {
                    None => assert_eq!(node.parent(), None, "root has no parent"),
                    Some(up) => assert_eq!(
                        node.parent(),
                        self.levels.get(up, p >> 1),
                        "parent of {p:#b} at level {level}"
                    ),
                }

                if level == width {
                    assert!(node.is_leaf());
                    assert_eq!(self.value(id), p);
                    continue;
                }

                let internal = self.arena.internal(id);
                assert!(internal.child_count() >= 1, "internal node without children");
                for side in [LEFT, RIGHT] {
                    let child_prefix = (p << 1) | side as u64;
                    match (self.levels.get(level + 1, child_prefix), internal.children[side]) {
                        (Some(c), Link::Child(l)) => assert_eq!(c, l),
                        (None, Link::Descendant(d)) => {
                            let expected = if side == LEFT {
                                keys.range(lo..=hi).next()
                            } else {
                                keys.range(lo..=hi).next_back()
                            };
                            assert_eq!(Some(&self.value(d)), expected, "descendant of {p:#b}");
                        }
                        (c, l) => panic!("side {side} of {p:#b} at level {level}: {c:?} vs {l:?}"),
                    }
                }
            }
        }

        assert_eq!(self.levels.len(0), usize::from(self.count > 0));
        assert_eq!(self.min.is_none(), self.count == 0);
        assert_eq!(self.max.is_none(), self.count == 0);

        let mut walked = Vec::with_capacity(self.count);
        let mut prev: Option<NodeId> = None;
        let mut cursor = self.min;
        while let Some(id) = cursor {
            let leaf = self.arena.leaf(id);
            assert_eq!(leaf.pred, prev, "pred link of {}", leaf.value);
            walked.push(leaf.value);
            prev = Some(id);
            cursor = leaf.succ;
        }
        assert_eq!(prev, self.max);
        assert!(walked.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(walked, keys.into_iter().collect::<Vec<_>>());
    }
}
