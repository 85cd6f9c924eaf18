use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use shumai::{ShumaiBench, config};
use std::{collections::BTreeSet, fmt::Display, sync::Mutex};
use xfast::XFastTrie;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Serialize, Clone, Copy, Debug, Deserialize)]
pub enum Workload {
    ContainsOnly,
    InsertOnly,
    PredecessorOnly,
    InsertDelete,
}

impl Display for Workload {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Serialize, Clone, Copy, Debug, Deserialize)]
pub enum IndexType {
    BTree,
    XFast,
}

impl Display for IndexType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[config(path = "bench/benchmark.toml")]
pub struct Basic {
    pub name: String,
    pub threads: Vec<usize>,
    pub time: usize,
    #[matrix]
    pub workload: Workload,
    #[matrix]
    pub index_type: IndexType,
}

struct TestBench<Index: OrderedIndex> {
    index: Mutex<Index>,
    initial_cnt: u64,
}

/// Both sets are single threaded, the benchmark serializes access through one lock.
trait OrderedIndex: Send {
    fn insert(&mut self, key: u64) -> bool;
    fn delete(&mut self, key: u64) -> bool;
    fn contains(&self, key: u64) -> bool;
    fn predecessor(&self, key: u64) -> Option<u64>;
}

impl OrderedIndex for BTreeSet<u64> {
    fn insert(&mut self, key: u64) -> bool {
        BTreeSet::insert(self, key)
    }

    fn delete(&mut self, key: u64) -> bool {
        self.remove(&key)
    }

    fn contains(&self, key: u64) -> bool {
        BTreeSet::contains(self, &key)
    }

    fn predecessor(&self, key: u64) -> Option<u64> {
        self.range(..key).next_back().copied()
    }
}

impl OrderedIndex for XFastTrie {
    fn insert(&mut self, key: u64) -> bool {
        XFastTrie::insert(self, key).unwrap()
    }

    fn delete(&mut self, key: u64) -> bool {
        XFastTrie::delete(self, key).unwrap()
    }

    fn contains(&self, key: u64) -> bool {
        XFastTrie::contains(self, key).unwrap()
    }

    fn predecessor(&self, key: u64) -> Option<u64> {
        XFastTrie::predecessor(self, key).unwrap()
    }
}

impl<Index: OrderedIndex> ShumaiBench for TestBench<Index> {
    type Config = Basic;
    type Result = usize;

    fn load(&mut self) -> Option<serde_json::Value> {
        let mut index = self.index.lock().unwrap();
        for i in 0..self.initial_cnt {
            index.insert(hash_key(i));
        }
        None
    }

    fn run(&self, context: shumai::Context<Self::Config>) -> Self::Result {
        let mut op_cnt = 0;
        let mut rng = thread_rng();

        context.wait_for_start();

        let mut i = 0;
        while context.is_running() {
            match context.config.workload {
                Workload::ContainsOnly => {
                    if i == self.initial_cnt {
                        i = 0;
                    }
                    assert!(self.index.lock().unwrap().contains(hash_key(i)));
                    i += 1;
                }
                Workload::InsertOnly => {
                    let val = rng.r#gen::<u64>();
                    self.index.lock().unwrap().insert(val);
                }
                Workload::PredecessorOnly => {
                    let val = rng.r#gen::<u64>();
                    if let Some(p) = self.index.lock().unwrap().predecessor(val) {
                        assert!(p < val);
                    }
                }
                Workload::InsertDelete => {
                    let val = rng.r#gen::<u64>();
                    let mut index = self.index.lock().unwrap();
                    index.insert(val);
                    index.delete(val);
                }
            }

            op_cnt += 1;
        }
        op_cnt
    }

    fn cleanup(&mut self) -> Option<serde_json::Value> {
        None
    }
}

fn hash_key(key: u64) -> u64 {
    const MULTIPLIER: u64 = 0x9e3779b97f4a7c15;
    key.wrapping_mul(MULTIPLIER)
}

fn main() {
    let config = Basic::load().expect("Failed to parse config!");
    let repeat = 3;
    let initial_cnt = 1_000_000;

    for c in config.iter() {
        match c.index_type {
            IndexType::BTree => {
                let mut test_bench = TestBench {
                    index: Mutex::new(BTreeSet::new()),
                    initial_cnt,
                };
                let result = shumai::run(&mut test_bench, c, repeat);
                result.write_json().unwrap();
            }
            IndexType::XFast => {
                let mut test_bench = TestBench {
                    index: Mutex::new(XFastTrie::default()),
                    initial_cnt,
                };
                let result = shumai::run(&mut test_bench, c, repeat);
                result.write_json().unwrap();
            }
        }
    }
}
