#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;
use xfast::{Error, XFastTrie};

#[derive(Arbitrary, Debug)]
enum SetMethod {
    Contains { key: u32 },
    Insert { key: u32 },
    Delete { key: u32 },
    Predecessor { key: u32 },
    Successor { key: u32 },
    Clear,
}

fuzz_target!(|methods: Vec<SetMethod>| {
    let mut trie = XFastTrie::new(32).unwrap();
    let mut bt_set = BTreeSet::new();

    for m in methods.iter() {
        match m {
            SetMethod::Contains { key } => {
                let key = *key as u64;
                assert_eq!(trie.contains(key).unwrap(), bt_set.contains(&key));
            }
            SetMethod::Insert { key } => {
                let key = *key as u64;
                assert_eq!(trie.insert(key).unwrap(), bt_set.insert(key));
            }
            SetMethod::Delete { key } => {
                let key = *key as u64;
                assert_eq!(trie.delete(key).unwrap(), bt_set.remove(&key));
            }
            SetMethod::Predecessor { key } => {
                let key = *key as u64;
                match trie.predecessor(key) {
                    Err(Error::EmptyTrie) => assert!(bt_set.is_empty()),
                    r => assert_eq!(r.unwrap(), bt_set.range(..key).next_back().copied()),
                }
            }
            SetMethod::Successor { key } => {
                let key = *key as u64;
                match trie.successor(key) {
                    Err(Error::EmptyTrie) => assert!(bt_set.is_empty()),
                    r => assert_eq!(r.unwrap(), bt_set.range(key + 1..).next().copied()),
                }
            }
            SetMethod::Clear => {
                trie.clear();
                bt_set.clear();
            }
        }
        assert_eq!(trie.len(), bt_set.len());
    }

    assert!(trie.iter().eq(bt_set.iter().copied()));
    assert_eq!(trie.min(), bt_set.first().copied());
    assert_eq!(trie.max(), bt_set.last().copied());
});
