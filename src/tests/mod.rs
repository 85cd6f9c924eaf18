use crate::XFastTrie;

mod search;
mod tree;


#[test]
fn clone_is_independent() {
    let mut trie = XFastTrie::from_keys(16, [10u16, 20, 30]).unwrap();
    let snapshot = trie.clone();

    trie.delete(20u16).unwrap();
    trie.insert(25u16).unwrap();
    trie.inner.check_invariants();
    snapshot.inner.check_invariants();

    assert_eq!(trie.iter().collect::<Vec<_>>(), vec![10, 25, 30]);
    assert_eq!(snapshot.iter().collect::<Vec<_>>(), vec![10, 20, 30]);
}

#[test]
fn clear_resets_every_level() {
    let mut trie = XFastTrie::from_keys(8, [1u8, 2, 3]).unwrap();
    trie.clear();

    assert_eq!(trie.inner.levels.total(), 0);
    assert_eq!(trie.inner.arena.live(), 0);
    trie.inner.check_invariants();

    assert!(trie.insert(1u8).unwrap());
    assert_eq!(trie.inner.levels.total(), 9);
    trie.inner.check_invariants();
}
