/*!
# Bipartiteness Test

Multi-component BFS 2-coloring. Every edge constrains its endpoints to
opposite sides regardless of edge direction; the test fails the moment a
neighbor turns up on the side of the vertex being expanded, so a self-edge
always disqualifies a graph.
*/

use std::collections::VecDeque;

use super::*;

/// Bipartiteness tests, blanket-implemented for all graphs.
pub trait BipartiteTest<V: Value, E: Value>: GraphRead<V, E> {
    /// Computes a valid 2-coloring, if one exists. Vertices with a set bit
    /// form one side, the rest the other; each connected component is
    /// colored independently starting from an arbitrary seed.
    ///
    /// Returns `None` iff some edge connects two vertices of the same
    /// side, i.e. iff the graph is not bipartite.
    fn bipartition_ids(&self) -> Option<NodeBitSet> {
        let cap = self.vertex_capacity();
        let mut visited = NodeBitSet::new(cap);
        let mut right = NodeBitSet::new(cap);
        let mut queue = VecDeque::new();

        for root in self.vertex_ids() {
            if visited.get_bit(root) {
                continue;
            }
            visited.set_bit(root);
            queue.push_back(root);

            while let Some(u) = queue.pop_front() {
                for id in self.edge_ids_of(u) {
                    let w = self.opposite(u, id);
                    if visited.get_bit(w) {
                        if right.get_bit(w) == right.get_bit(u) {
                            return None;
                        }
                    } else {
                        visited.set_bit(w);
                        if !right.get_bit(u) {
                            right.set_bit(w);
                        }
                        queue.push_back(w);
                    }
                }
            }
        }

        Some(right)
    }

    /// Like [`BipartiteTest::bipartition_ids`], but resolves the sides to
    /// vertex payloads.
    fn bipartition(&self) -> Option<(Vec<&V>, Vec<&V>)> {
        let right = self.bipartition_ids()?;
        let mut sides = (Vec::new(), Vec::new());
        for u in self.vertex_ids() {
            if right.get_bit(u) {
                sides.1.push(self.vertex_value(u));
            } else {
                sides.0.push(self.vertex_value(u));
            }
        }
        Some(sides)
    }

    /// Returns *true* iff a 2-coloring with no monochromatic edge exists.
    fn is_bipartite(&self) -> bool {
        self.bipartition_ids().is_some()
    }
}

impl<V: Value, E: Value, G: GraphRead<V, E>> BipartiteTest<V, E> for G {}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;

    fn cycle_graph(n: u32) -> Graph<u32, u32> {
        let mut g = Graph::new_undirected();
        for v in 0..n {
            g.add_vertex(v);
        }
        for v in 0..n {
            g.add_edge(&v, &((v + 1) % n), v).unwrap();
        }
        g
    }

    #[test]
    fn paths_are_bipartite() {
        for n in 1..10 {
            let mut g = Graph::new_undirected();
            for v in 0..n {
                g.add_vertex(v);
            }
            for v in 0..n - 1 {
                g.add_edge(&v, &(v + 1), v).unwrap();
            }
            assert!(g.is_bipartite());
        }
    }

    #[test]
    fn even_cycles_yes_odd_cycles_no() {
        assert!(cycle_graph(4).is_bipartite());
        assert!(cycle_graph(6).is_bipartite());
        assert!(!cycle_graph(3).is_bipartite());
        assert!(!cycle_graph(5).is_bipartite());
    }

    #[test]
    fn self_edge_disqualifies() {
        let mut g = Graph::new_undirected();
        g.add_vertex(0);
        g.add_vertex(1);
        g.add_edge(&0, &1, 0).unwrap();
        assert!(g.is_bipartite());
        g.add_edge(&1, &1, 1).unwrap();
        assert!(!g.is_bipartite());
    }

    #[test]
    fn direction_is_ignored() {
        // a directed odd cycle is just as non-bipartite
        let mut g = Graph::new_directed();
        for v in 0..3 {
            g.add_vertex(v);
        }
        g.add_edge(&0, &1, 0).unwrap();
        g.add_edge(&1, &2, 1).unwrap();
        g.add_edge(&0, &2, 2).unwrap();
        assert!(!g.is_bipartite());
    }

    #[test]
    fn all_components_must_pass() {
        let mut g = cycle_graph(4);
        assert!(g.is_bipartite());
        // attach a disjoint triangle
        for v in [10, 11, 12] {
            g.add_vertex(v);
        }
        g.add_edge(&10, &11, 100).unwrap();
        g.add_edge(&11, &12, 101).unwrap();
        g.add_edge(&12, &10, 102).unwrap();
        assert!(!g.is_bipartite());
    }

    #[test]
    fn returned_partition_is_valid() {
        let rng = &mut Pcg64::seed_from_u64(12);
        let mut checked = 0;
        for _ in 0..40 {
            let g = crate::testing::random_graph(rng, 10, 9, false);
            let Some(right) = g.bipartition_ids() else {
                continue;
            };
            checked += 1;
            for id in g.edge_ids() {
                let (a, b) = g.endpoints(id);
                assert_ne!(right.get_bit(a), right.get_bit(b));
            }

            let (left_side, right_side) = g.bipartition().unwrap();
            assert_eq!(
                left_side.len() + right_side.len(),
                g.number_of_vertices() as usize
            );
        }
        // sparse random graphs are bipartite often enough
        assert!(checked > 0);
    }
}
