use std::iter::FusedIterator;

use crate::node::NodeId;
use crate::trie::RawTrie;

/// Ascending iterator over the keys of an [crate::XFastTrie].
///
/// Created by [crate::XFastTrie::iter]. Walks the leaf list from both ends, so
/// it also iterates in descending order via [DoubleEndedIterator].
#[derive(Clone)]
pub struct Iter<'a> {
    trie: &'a RawTrie,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(trie: &'a RawTrie) -> Self {
        Iter {
            trie,
            front: trie.min_node(),
            back: trie.max_node(),
            remaining: trie.len(),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        let leaf = self.trie.arena.leaf(self.front?);
        self.front = leaf.succ;
        self.remaining -= 1;
        Some(leaf.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        let leaf = self.trie.arena.leaf(self.back?);
        self.back = leaf.pred;
        self.remaining -= 1;
        Some(leaf.value)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
