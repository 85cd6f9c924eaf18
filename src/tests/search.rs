use std::collections::BTreeSet;

use crate::key::{branch, prefix};
use crate::node::Link;
use crate::trie::RawTrie;

use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};

fn build(width: u32, keys: &[u64]) -> RawTrie {
    let mut trie = RawTrie::new(width);
    for k in keys {
        trie.insert(*k);
    }
    trie.check_invariants();
    trie
}

/// For an absent key the ancestor is internal, owns the key's prefix, and has
/// no child on the key's side.
fn certify_ancestor(trie: &RawTrie, key: u64) {
    let width = trie.width();
    let (node, level) = trie.closest_ancestor(key).unwrap();

    if trie.find(key).is_some() {
        assert_eq!(level, width);
        assert_eq!(trie.value(node), key);
        return;
    }

    assert!(level < width);
    assert_eq!(trie.levels.get(level, prefix(key, level, width)), Some(node));
    assert!(trie.levels.get(level + 1, prefix(key, level + 1, width)).is_none());
    let side = branch(key, level, width);
    assert!(matches!(
        trie.arena.internal(node).children[side],
        Link::Descendant(_)
    ));
}

fn check_closest_leaf(trie: &RawTrie, key: u64) {
    let leaf = trie.closest_leaf(key).unwrap();
    let dist = trie.value(leaf).abs_diff(key);
    let l = trie.arena.leaf(leaf);
    if let Some(p) = l.pred {
        assert!(dist <= trie.value(p).abs_diff(key));
    }
    if let Some(s) = l.succ {
        assert!(dist <= trie.value(s).abs_diff(key));
    }
}

#[test]
fn empty_trie_has_no_ancestor() {
    let trie = RawTrie::new(8);
    assert!(trie.closest_ancestor(3).is_none());
    assert!(trie.closest_leaf(3).is_none());
    assert!(trie.predecessor(3).is_none());
    assert!(trie.successor(3).is_none());
}

#[test]
fn scenario_w8() {
    let mut trie = build(8, &[5, 20, 100, 200]);

    let pred = trie.predecessor(50).map(|l| trie.value(l));
    let succ = trie.successor(50).map(|l| trie.value(l));
    assert_eq!(pred, Some(20));
    assert_eq!(succ, Some(100));

    trie.remove(20);
    trie.check_invariants();
    assert_eq!(trie.predecessor(50).map(|l| trie.value(l)), Some(5));
}

#[test]
fn exhaustive_small_universe() {
    let width = 8;
    let mut r = StdRng::seed_from_u64(42);

    for _round in 0..20 {
        let n = r.gen_range(1..40);
        let keys: BTreeSet<u64> = (0..n).map(|_| r.gen_range(0..256)).collect();
        let trie = build(width, &keys.iter().copied().collect::<Vec<_>>());

        for q in 0..256u64 {
            certify_ancestor(&trie, q);
            check_closest_leaf(&trie, q);

            let expected_pred = keys.range(..q).next_back().copied();
            let expected_succ = keys.range(q + 1..).next().copied();
            assert_eq!(trie.predecessor(q).map(|l| trie.value(l)), expected_pred, "pred {q}");
            assert_eq!(trie.successor(q).map(|l| trie.value(l)), expected_succ, "succ {q}");
        }
    }
}

#[test]
fn wide_keys_against_btree() {
    let mut r = StdRng::seed_from_u64(3);
    let keys: BTreeSet<u64> = (0..2_000).map(|_| r.gen::<u64>()).collect();
    let trie = build(64, &keys.iter().copied().collect::<Vec<_>>());

    for _ in 0..2_000 {
        let q = r.gen::<u64>();
        certify_ancestor(&trie, q);
        check_closest_leaf(&trie, q);
        assert_eq!(
            trie.predecessor(q).map(|l| trie.value(l)),
            keys.range(..q).next_back().copied()
        );
        assert_eq!(
            trie.successor(q).map(|l| trie.value(l)),
            keys.range((std::ops::Bound::Excluded(q), std::ops::Bound::Unbounded))
                .next()
                .copied()
        );
    }

    for k in keys.iter() {
        certify_ancestor(&trie, *k);
    }
}
