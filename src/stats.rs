use std::fmt::Display;

use crate::trie::RawTrie;

#[derive(Default, Debug, serde::Serialize)]
pub struct TrieStats {
    levels: Vec<LevelStats>,
    arena_slots: usize,
    arena_free: usize,
}

impl TrieStats {
    /// Per level breakdown, root first.
    pub fn levels(&self) -> &[LevelStats] {
        &self.levels
    }

    pub fn total_nodes(&self) -> usize {
        self.levels.iter().map(|l| l.nodes).sum()
    }

    /// Internal nodes with one missing side, i.e. nodes carrying a descendant pointer.
    pub fn single_child_nodes(&self) -> usize {
        self.levels.iter().map(|l| l.one_child).sum()
    }

    pub fn arena_slots(&self) -> usize {
        self.arena_slots
    }

    pub fn arena_free(&self) -> usize {
        self.arena_free
    }
}

impl Display for TrieStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for l in self.levels.iter() {
            writeln!(
                f,
                "Level: {:3} --- || nodes: {:8} || one child: {:8} || two children: {:8} ||",
                l.level, l.nodes, l.one_child, l.two_children,
            )?;
        }

        let total = self.total_nodes();
        let fill = if total == 0 {
            0.0
        } else {
            (total - self.single_child_nodes()) as f64 / total as f64
        };
        writeln!(
            f,
            "Nodes: {} (arena slots: {}, free: {}), branching ratio: {:.2}",
            total, self.arena_slots, self.arena_free, fill
        )?;

        Ok(())
    }
}

#[derive(Debug, serde::Serialize, Clone, PartialEq, Eq)]
pub struct LevelStats {
    pub level: u32,
    pub nodes: usize,
    pub one_child: usize,
    pub two_children: usize,
}

impl RawTrie {
    pub(crate) fn stats(&self) -> TrieStats {
        let mut levels = Vec::with_capacity(self.width() as usize + 1);

        for level in 0..=self.width() {
            let mut l = LevelStats {
                level,
                nodes: self.levels.len(level),
                one_child: 0,
                two_children: 0,
            };
            if level < self.width() {
                for (_, id) in self.levels.entries(level) {
                    match self.arena.internal(id).child_count() {
                        2 => l.two_children += 1,
                        _ => l.one_child += 1,
                    }
                }
            }
            levels.push(l);
        }

        TrieStats {
            levels,
            arena_slots: self.arena.capacity(),
            arena_free: self.arena.capacity() - self.arena.live(),
        }
    }
}
