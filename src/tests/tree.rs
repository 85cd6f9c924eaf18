use std::collections::BTreeSet;

use crate::trie::RawTrie;

use rand::prelude::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[test]
fn small_insert() {
    let key_cnt = 1_000u64;
    let mut trie = RawTrie::new(16);

    for k in 0..key_cnt {
        assert!(trie.insert(k));
        assert!(trie.find(k).is_some());
    }
    trie.check_invariants();

    for k in 0..key_cnt {
        assert!(!trie.insert(k));
    }
    assert_eq!(trie.len(), key_cnt as usize);
    assert_eq!(trie.levels.len(16), key_cnt as usize);
}

#[test]
fn single_key_path() {
    let mut trie = RawTrie::new(8);
    trie.insert(0b1010_0101);
    trie.check_invariants();

    for level in 0..=8 {
        assert_eq!(trie.levels.len(level), 1);
    }
    assert_eq!(trie.min_node(), trie.max_node());

    assert!(trie.remove(0b1010_0101));
    trie.check_invariants();
    assert_eq!(trie.levels.total(), 0);
    assert_eq!(trie.min_node(), None);
}

#[test]
fn extremes_of_the_universe() {
    let mut trie = RawTrie::new(64);
    for k in [0, u64::MAX, 1, u64::MAX - 1, 1 << 63] {
        trie.insert(k);
        trie.check_invariants();
    }
    assert_eq!(trie.value(trie.min_node().unwrap()), 0);
    assert_eq!(trie.value(trie.max_node().unwrap()), u64::MAX);

    assert!(trie.remove(u64::MAX));
    assert!(trie.remove(0));
    trie.check_invariants();
    assert_eq!(trie.value(trie.min_node().unwrap()), 1);
    assert_eq!(trie.value(trie.max_node().unwrap()), u64::MAX - 1);
}

#[test]
fn width_one() {
    let mut trie = RawTrie::new(1);
    assert!(trie.insert(1));
    assert!(trie.insert(0));
    trie.check_invariants();
    assert!(trie.remove(1));
    trie.check_invariants();
    assert!(trie.remove(0));
    trie.check_invariants();
    assert_eq!(trie.len(), 0);
}

/// Deleting the extreme leaf of a subtree must move every descendant
/// shortcut that pointed at it, not just the one on the parent.
#[test]
fn delete_retargets_high_descendants() {
    let mut trie = RawTrie::new(8);
    // Both keys below 0x80: the root has only a left child and its right
    // shortcut points at the maximum.
    trie.insert(0x10);
    trie.insert(0x40);
    trie.check_invariants();

    trie.remove(0x40);
    trie.check_invariants();
    trie.insert(0x7f);
    trie.remove(0x10);
    trie.check_invariants();
    assert_eq!(trie.value(trie.min_node().unwrap()), 0x7f);
}

#[test]
fn rng_insert_remove() {
    let key_cnt = 20_000;
    let mut key_space: Vec<u64> = (0..key_cnt).map(|k| k * 7).collect();

    let mut r = StdRng::seed_from_u64(42);
    key_space.shuffle(&mut r);

    let mut trie = RawTrie::new(20);
    for v in key_space.iter() {
        assert!(trie.insert(*v));
    }
    trie.check_invariants();

    let delete_cnt = key_space.len() / 2;
    for v in key_space.iter().take(delete_cnt) {
        assert!(trie.remove(*v));
        assert!(!trie.remove(*v));
    }
    trie.check_invariants();

    for v in key_space.iter().take(delete_cnt) {
        assert!(trie.find(*v).is_none());
    }
    for v in key_space.iter().skip(delete_cnt) {
        assert_eq!(trie.value(trie.find(*v).unwrap()), *v);
    }
}

#[test]
fn mixed_ops_against_btree() {
    let mut r = StdRng::seed_from_u64(7);
    let width = 10;
    let mut trie = RawTrie::new(width);
    let mut model = BTreeSet::new();

    for i in 0..5_000 {
        let k = r.gen_range(0..(1u64 << width));
        if r.gen_bool(0.6) {
            assert_eq!(trie.insert(k), model.insert(k));
        } else {
            assert_eq!(trie.remove(k), model.remove(&k));
        }
        if i % 250 == 0 {
            trie.check_invariants();
        }
    }
    trie.check_invariants();
    assert_eq!(trie.len(), model.len());
}

#[test]
fn sparse_keys() {
    let key_cnt = 5_000;
    let mut r = StdRng::seed_from_u64(1);
    let mut trie = RawTrie::new(64);
    let mut keys = Vec::with_capacity(key_cnt);

    for _ in 0..key_cnt {
        let k = r.gen::<u64>();
        if trie.insert(k) {
            keys.push(k);
        }
    }
    trie.check_invariants();

    for k in keys.iter() {
        assert!(trie.remove(*k));
    }
    trie.check_invariants();
    assert_eq!(trie.arena.live(), 0);
}
