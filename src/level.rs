use std::collections::HashMap;

use crate::node::NodeId;

type Table = HashMap<u64, NodeId, ahash::RandomState>;

/// One prefix table per trie depth, `0..=width`.
///
/// Table `L` maps the top `L` bits of every stored key to the node owning that
/// prefix. Table 0 holds the root, table `width` the leaves.
#[derive(Clone)]
pub(crate) struct LevelTables {
    tables: Vec<Table>,
}

impl LevelTables {
    pub(crate) fn new(width: u32) -> Self {
        LevelTables {
            tables: (0..=width).map(|_| Table::default()).collect(),
        }
    }

    #[inline]
    pub(crate) fn get(&self, level: u32, prefix: u64) -> Option<NodeId> {
        self.tables[level as usize].get(&prefix).copied()
    }

    #[inline]
    pub(crate) fn insert(&mut self, level: u32, prefix: u64, id: NodeId) {
        let old = self.tables[level as usize].insert(prefix, id);
        debug_assert!(old.is_none(), "prefix {prefix} already present at level {level}");
    }

    #[inline]
    pub(crate) fn remove(&mut self, level: u32, prefix: u64) -> Option<NodeId> {
        self.tables[level as usize].remove(&prefix)
    }

    #[cfg(any(test, feature = "stats"))]
    #[inline]
    pub(crate) fn len(&self, level: u32) -> usize {
        self.tables[level as usize].len()
    }

    /// Entries of one level, in no particular order.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn entries(&self, level: u32) -> impl Iterator<Item = (u64, NodeId)> + '_ {
        self.tables[level as usize].iter().map(|(p, id)| (*p, *id))
    }

    pub(crate) fn total(&self) -> usize {
        self.tables.iter().map(|t| t.len()).sum()
    }

    pub(crate) fn clear(&mut self) {
        for t in self.tables.iter_mut() {
            t.clear();
        }
    }
}
