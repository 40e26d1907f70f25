use crate::ids::*;

/// Disjoint-set forest over vertex handles with union-by-rank and path
/// compression. Both `find` and the compression pass are explicit loops,
/// so deep parent chains cannot exhaust the call stack.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<NodeId>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Creates `n` singleton sets `0..n`.
    pub fn new(n: NumNodes) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n as usize],
        }
    }

    /// Returns the representative of the set containing `u`.
    /// ** Panics if `u >= n` **
    pub fn find(&mut self, u: NodeId) -> NodeId {
        let mut root = u;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut cur = u;
        while cur != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }

        root
    }

    /// Merges the sets containing `u` and `v`. Returns *true* exactly if
    /// the two were in different sets before.
    /// ** Panics if `u >= n || v >= n` **
    pub fn union(&mut self, u: NodeId, v: NodeId) -> bool {
        let ru = self.find(u);
        let rv = self.find(v);
        if ru == rv {
            return false;
        }

        let (child, parent) = if self.rank[ru as usize] < self.rank[rv as usize] {
            (ru, rv)
        } else {
            (rv, ru)
        };
        self.parent[child as usize] = parent;
        if self.rank[ru as usize] == self.rank[rv as usize] {
            self.rank[parent as usize] += 1;
        }
        true
    }

    /// Returns *true* if `u` and `v` are in the same set.
    /// ** Panics if `u >= n || v >= n` **
    pub fn same_set(&mut self, u: NodeId, v: NodeId) -> bool {
        self.find(u) == self.find(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_are_disjoint() {
        let mut uf = UnionFind::new(5);
        for u in 0..5 {
            for v in 0..5 {
                assert_eq!(uf.same_set(u, v), u == v);
            }
        }
    }

    #[test]
    fn union_links_sets() {
        let mut uf = UnionFind::new(6);
        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(!uf.same_set(0, 2));
        assert!(uf.union(1, 2));
        assert!(uf.same_set(0, 3));
        assert!(!uf.union(0, 3));
        assert!(!uf.same_set(4, 5));
    }

    #[test]
    fn long_chains_compress() {
        let n = 10_000;
        let mut uf = UnionFind::new(n);
        for u in 1..n {
            uf.union(u - 1, u);
        }
        assert!(uf.same_set(0, n - 1));
    }
}
