use crate::node::{Internal, Leaf, Node, NodeId};

/// Slot storage for every node of a trie.
///
/// Freed slots are recycled through a free list, so a [NodeId] may be reused
/// once the node it named has been removed from its level table.
#[derive(Clone, Default)]
pub(crate) struct Arena {
    slots: Vec<Option<Node>>,
    free: Vec<NodeId>,
}

impl Arena {
    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                debug_assert!(self.slots[id.index()].is_none());
                self.slots[id.index()] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId::new(self.slots.len() - 1)
            }
        }
    }

    /// Releases the slot and hands the node back to the caller.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<Node> {
        let node = self.slots.get_mut(id.index())?.take()?;
        self.free.push(id);
        Some(node)
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node {
        match self.slots.get(id.index()) {
            Some(Some(node)) => node,
            _ => unreachable!("dangling node handle {id:?}"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slots.get_mut(id.index()) {
            Some(Some(node)) => node,
            _ => unreachable!("dangling node handle {id:?}"),
        }
    }

    #[inline]
    pub(crate) fn leaf(&self, id: NodeId) -> &Leaf {
        match self.get(id) {
            Node::Leaf(l) => l,
            Node::Internal(_) => unreachable!("{id:?} is not a leaf"),
        }
    }

    #[inline]
    pub(crate) fn leaf_mut(&mut self, id: NodeId) -> &mut Leaf {
        match self.get_mut(id) {
            Node::Leaf(l) => l,
            Node::Internal(_) => unreachable!("{id:?} is not a leaf"),
        }
    }

    #[inline]
    pub(crate) fn internal(&self, id: NodeId) -> &Internal {
        match self.get(id) {
            Node::Internal(n) => n,
            Node::Leaf(_) => unreachable!("{id:?} is not an internal node"),
        }
    }

    #[inline]
    pub(crate) fn internal_mut(&mut self, id: NodeId) -> &mut Internal {
        match self.get_mut(id) {
            Node::Internal(n) => n,
            Node::Leaf(_) => unreachable!("{id:?} is not an internal node"),
        }
    }

    /// Number of live nodes.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: u64) -> Node {
        Node::Leaf(Leaf {
            value,
            pred: None,
            succ: None,
            parent: None,
        })
    }

    #[test]
    fn slots_are_recycled() {
        let mut arena = Arena::default();
        let a = arena.alloc(leaf(1));
        let b = arena.alloc(leaf(2));
        assert_eq!(arena.live(), 2);

        let freed = arena.free(a).unwrap();
        assert!(freed.is_leaf());
        assert!(arena.free(a).is_none());
        assert_eq!(arena.live(), 1);

        let c = arena.alloc(leaf(3));
        assert_eq!(c, a);
        assert_eq!(arena.leaf(c).value, 3);
        assert_eq!(arena.leaf(b).value, 2);
        assert_eq!(arena.capacity(), 2);

        arena.clear();
        assert_eq!(arena.live(), 0);
    }
}
