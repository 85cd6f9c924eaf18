/// Stable handle to a node slot in the [crate::arena::Arena].
///
/// Handles are plain indices: holding one never keeps a node alive, the level
/// tables are the only owners.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// Panics if `idx` does not fit a `u32`: an arena holds at most
    /// `u32::MAX + 1` slots.
    #[inline]
    pub(crate) fn new(idx: usize) -> Self {
        match u32::try_from(idx) {
            Ok(idx) => NodeId(idx),
            Err(_) => panic!("node arena is full, slot {idx} has no handle"),
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One side of an internal node.
///
/// A side either holds the child one level down, or, when that child does not
/// exist, a shortcut to the nearest leaf in the subtree: the minimum leaf on a
/// missing left side, the maximum leaf on a missing right side.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Link {
    Child(NodeId),
    Descendant(NodeId),
}

impl Link {
    #[inline]
    pub(crate) fn child(self) -> Option<NodeId> {
        match self {
            Link::Child(id) => Some(id),
            Link::Descendant(_) => None,
        }
    }

    #[inline]
    pub(crate) fn descendant(self) -> Option<NodeId> {
        match self {
            Link::Child(_) => None,
            Link::Descendant(id) => Some(id),
        }
    }
}

pub(crate) const LEFT: usize = 0;
pub(crate) const RIGHT: usize = 1;

#[derive(Clone, Debug)]
pub(crate) struct Internal {
    /// Indexed by [LEFT] and [RIGHT].
    pub(crate) children: [Link; 2],
    /// `None` only for the root.
    pub(crate) parent: Option<NodeId>,
}

impl Internal {
    #[cfg(any(test, feature = "stats"))]
    #[inline]
    pub(crate) fn child_count(&self) -> usize {
        self.children.iter().filter(|l| l.child().is_some()).count()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Leaf {
    pub(crate) value: u64,
    pub(crate) pred: Option<NodeId>,
    pub(crate) succ: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

#[derive(Clone, Debug)]
pub(crate) enum Node {
    Internal(Internal),
    Leaf(Leaf),
}

impl Node {
    #[cfg(test)]
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    #[cfg(test)]
    #[inline]
    pub(crate) fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Internal(n) => n.parent,
            Node::Leaf(l) => l.parent,
        }
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        match self {
            Node::Internal(n) => n.parent = parent,
            Node::Leaf(l) => l.parent = parent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_keep_their_index() {
        assert_eq!(NodeId::new(0).index(), 0);
        assert_eq!(NodeId::new(u32::MAX as usize).index(), u32::MAX as usize);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    #[should_panic(expected = "node arena is full")]
    fn handle_overflow_panics() {
        NodeId::new(u32::MAX as usize + 1);
    }
}
