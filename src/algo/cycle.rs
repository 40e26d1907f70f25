/*!
# Cycle Detection & DAG Test

Finds a concrete cycle as an edge sequence, or proves there is none.

- Any self-edge is a singleton cycle and short-circuits everything else.
- Directed graphs run a component-restarting DFS with an explicit frame
  stack; an edge into a vertex of the current DFS chain closes a cycle,
  which is read off the chain itself.
- Undirected graphs run union-find over all edges; the first edge whose
  endpoints already share a set witnesses a cycle, and the concrete edge
  sequence is recovered by a DFS between its endpoints with that edge
  forbidden.

The DAG test peels minimum-in-degree vertices (Kahn) and answers *false*
the moment the minimum is positive. It scans all remaining vertices per
round, an `O(|V|^2)` variant.
*/

use rand::{seq::IteratorRandom, Rng};

use super::*;
use crate::utils::UnionFind;

struct Frame {
    node: NodeId,
    entry_edge: EdgeId,
    out: Vec<EdgeId>,
    next: usize,
}

impl Frame {
    fn new<V, E, G>(graph: &G, node: NodeId, entry_edge: EdgeId) -> Self
    where
        V: Value,
        E: Value,
        G: GraphRead<V, E>,
    {
        Frame {
            node,
            entry_edge,
            out: graph.out_edge_ids_raw(node).collect(),
            next: 0,
        }
    }
}

/// DFS over one component per root; an edge back into the active chain
/// closes a cycle. The visited set is shared across components: a cycle
/// reachable from an exhausted root would have been found from that root.
fn directed_cycle<V, E, G, F>(graph: &G, mut next_root: F) -> Option<Vec<EdgeId>>
where
    V: Value,
    E: Value,
    G: GraphRead<V, E>,
    F: FnMut(&G, &NodeBitSet) -> Option<NodeId>,
{
    let cap = graph.vertex_capacity();
    let mut visited = NodeBitSet::new(cap);
    let mut on_chain = NodeBitSet::new(cap);

    while let Some(root) = next_root(graph, &visited) {
        visited.set_bit(root);
        on_chain.set_bit(root);
        let mut stack = vec![Frame::new(graph, root, INVALID_EDGE)];

        while let Some(top) = stack.last_mut() {
            if top.next < top.out.len() {
                let id = top.out[top.next];
                top.next += 1;
                let w = graph.sink_id(id);

                if on_chain.get_bit(w) {
                    // close the cycle: edges of the chain below w, then id
                    let mut cycle: Vec<EdgeId> = stack
                        .iter()
                        .rev()
                        .take_while(|frame| frame.node != w)
                        .map(|frame| frame.entry_edge)
                        .collect();
                    cycle.reverse();
                    cycle.push(id);
                    return Some(cycle);
                }

                if !visited.get_bit(w) {
                    visited.set_bit(w);
                    on_chain.set_bit(w);
                    stack.push(Frame::new(graph, w, id));
                }
            } else {
                on_chain.clear_bit(top.node);
                stack.pop();
            }
        }
    }

    None
}

fn undirected_cycle<V, E, G>(graph: &G) -> Option<Vec<EdgeId>>
where
    V: Value,
    E: Value,
    G: GraphRead<V, E>,
{
    let mut uf = UnionFind::new(graph.vertex_capacity());
    let witness = graph.edge_ids().find(|&id| {
        let (a, b) = graph.endpoints(id);
        !uf.union(a, b)
    })?;

    // the witness endpoints are connected without the witness itself, so a
    // DFS with that edge forbidden recovers the rest of the cycle
    let (a, b) = graph.endpoints(witness);
    let mut parents = vec![INVALID_EDGE; graph.vertex_capacity() as usize];
    DfsWithEdges::new(graph, a)
        .with_edge_excluded(witness)
        .stop_at(b)
        .parent_edges_into(&mut parents);

    let mut cycle = Vec::new();
    let mut cur = b;
    while cur != a {
        let id = parents[cur as usize];
        debug_assert_ne!(id, INVALID_EDGE);
        cycle.push(id);
        cur = graph.opposite(cur, id);
    }
    cycle.reverse();
    cycle.push(witness);
    Some(cycle)
}

fn cycle_edge_ids<V, E, G, F>(graph: &G, next_root: F) -> Option<Vec<EdgeId>>
where
    V: Value,
    E: Value,
    G: GraphRead<V, E>,
    F: FnMut(&G, &NodeBitSet) -> Option<NodeId>,
{
    if let Some(id) = graph.edge_ids().find(|&id| graph.is_self_edge_id(id)) {
        return Some(vec![id]);
    }

    if graph.is_directed() {
        directed_cycle(graph, next_root)
    } else {
        undirected_cycle(graph)
    }
}

/// Cycle detection and acyclicity tests, blanket-implemented for all
/// graphs.
pub trait CycleSearch<V: Value, E: Value>: GraphRead<V, E> + Sized {
    /// Returns some cycle of the graph as an edge sequence, or `None` iff
    /// the graph is acyclic.
    ///
    /// Consecutive edges of the result share an endpoint (respecting edge
    /// direction on directed graphs) and the sequence closes into a loop;
    /// a self-edge yields a singleton. Components are searched in handle
    /// order.
    fn find_cycle(&self) -> Option<Vec<&E>> {
        self.resolve(cycle_edge_ids(self, |g: &Self, visited: &NodeBitSet| {
            g.vertex_ids().find(|&u| !visited.get_bit(u))
        }))
    }

    /// Like [`CycleSearch::find_cycle`], but each component search
    /// restarts at a vertex drawn from the provided generator. Which cycle
    /// is reported may differ between seeds; whether one is found may not.
    fn find_cycle_seeded<R: Rng>(&self, rng: &mut R) -> Option<Vec<&E>> {
        self.resolve(cycle_edge_ids(self, |g: &Self, visited: &NodeBitSet| {
            g.vertex_ids()
                .filter(|&u| !visited.get_bit(u))
                .choose(&mut *rng)
        }))
    }

    /// Returns *true* if the graph contains at least one cycle.
    fn has_cycle(&self) -> bool {
        self.find_cycle().is_some()
    }

    /// Returns *true* iff the graph is a directed acyclic graph.
    /// Undirected graphs are never DAGs.
    fn is_dag(&self) -> bool {
        if !self.is_directed() {
            return false;
        }

        let cap = self.vertex_capacity();
        let mut alive = NodeBitSet::new_with_bits_set(cap, self.vertex_ids());
        let mut in_deg = vec![0 as NumEdges; cap as usize];
        for id in self.edge_ids() {
            in_deg[self.sink_id(id) as usize] += 1;
        }

        let mut remaining = self.number_of_vertices();
        while remaining > 0 {
            let u = self
                .vertex_ids()
                .filter(|&u| alive.get_bit(u))
                .min_by_key(|&u| in_deg[u as usize])
                .unwrap();
            if in_deg[u as usize] > 0 {
                return false;
            }
            alive.clear_bit(u);
            for id in self.out_edge_ids_raw(u) {
                let w = self.sink_id(id);
                if alive.get_bit(w) {
                    in_deg[w as usize] -= 1;
                }
            }
            remaining -= 1;
        }
        true
    }

    #[doc(hidden)]
    fn resolve(&self, ids: Option<Vec<EdgeId>>) -> Option<Vec<&E>> {
        ids.map(|ids| ids.into_iter().map(|id| self.edge_value(id)).collect())
    }
}

impl<V: Value, E: Value, G: GraphRead<V, E>> CycleSearch<V, E> for G {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;

    fn graph(directed: bool, n: u32, edges: &[(u32, u32)]) -> Graph<u32, u32> {
        let mut g = if directed {
            Graph::new_directed()
        } else {
            Graph::new_undirected()
        };
        for v in 0..n {
            g.add_vertex(v);
        }
        for (label, &(u, v)) in edges.iter().enumerate() {
            assert!(g.add_edge(&u, &v, label as u32).unwrap());
        }
        g
    }

    /// Checks that consecutive edges chain together and the walk returns
    /// to its starting vertex.
    fn assert_closes(g: &Graph<u32, u32>, cycle: &[&u32]) {
        assert!(!cycle.is_empty());
        if g.is_directed() {
            for (e1, e2) in cycle.iter().copied().circular_tuple_windows() {
                assert_eq!(g.sink_of(e1).unwrap(), g.source_of(e2).unwrap());
            }
        } else {
            let start = *g
                .shared_endpoint(cycle[cycle.len() - 1], cycle[0])
                .unwrap()
                .unwrap();
            let mut cur = start;
            for &e in cycle {
                assert!(g.is_endpoint_of(e, &cur).unwrap());
                let s = *g.source_of(e).unwrap();
                let t = *g.sink_of(e).unwrap();
                cur = if s == cur { t } else { s };
            }
            assert_eq!(cur, start);
        }
    }

    #[test]
    fn triangle_has_three_edge_cycle() {
        let g = graph(true, 3, &[(0, 1), (1, 2), (2, 0)]);
        let cycle = g.find_cycle().unwrap();
        assert_eq!(cycle.len(), 3);
        assert_closes(&g, &cycle);
        assert!(!g.is_dag());
        assert!(g.has_cycle());
    }

    #[test]
    fn diamond_is_acyclic() {
        let g = graph(true, 4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        assert_eq!(g.find_cycle(), None);
        assert!(g.is_dag());
        assert!(!g.has_cycle());
    }

    #[test]
    fn cross_edges_are_not_cycles() {
        // two paths into a shared tail; revisiting a finished vertex must
        // not be mistaken for a cycle
        let g = graph(true, 5, &[(0, 1), (1, 2), (0, 3), (3, 2), (2, 4)]);
        assert_eq!(g.find_cycle(), None);
        assert!(g.is_dag());
    }

    #[test]
    fn self_edge_is_singleton_cycle() {
        for directed in [true, false] {
            let g = graph(directed, 2, &[(0, 1), (1, 1)]);
            let cycle = g.find_cycle().unwrap();
            assert_eq!(cycle, vec![&1]);
            assert_closes(&g, &cycle);
            assert!(!g.is_dag());
        }
    }

    #[test]
    fn two_cycle_in_directed_graph() {
        let g = graph(true, 2, &[(0, 1), (1, 0)]);
        let cycle = g.find_cycle().unwrap();
        assert_eq!(cycle.len(), 2);
        assert_closes(&g, &cycle);
        assert!(!g.is_dag());
    }

    #[test]
    fn cycle_hides_in_later_component() {
        let g = graph(true, 6, &[(0, 1), (1, 2), (3, 4), (4, 5), (5, 3)]);
        let cycle = g.find_cycle().unwrap();
        assert_eq!(cycle.len(), 3);
        assert_closes(&g, &cycle);
        assert!(!g.is_dag());
    }

    #[test]
    fn undirected_tree_is_acyclic_but_not_a_dag() {
        let g = graph(false, 5, &[(0, 1), (0, 2), (2, 3), (2, 4)]);
        assert_eq!(g.find_cycle(), None);
        // undirected graphs never qualify as DAGs
        assert!(!g.is_dag());
    }

    #[test]
    fn undirected_cycle_is_reconstructed() {
        let g = graph(false, 5, &[(0, 1), (1, 2), (2, 3), (3, 0), (2, 4)]);
        let cycle = g.find_cycle().unwrap();
        assert_eq!(cycle.len(), 4);
        assert_closes(&g, &cycle);
    }

    #[test]
    fn dag_agrees_with_cycle_search() {
        let rng = &mut Pcg64::seed_from_u64(31);
        for _ in 0..40 {
            let g = crate::testing::random_graph(rng, 8, 12, true);
            assert_eq!(g.is_dag(), g.find_cycle().is_none());
        }
    }

    #[test]
    fn seeded_restarts_find_equivalent_answers() {
        let rng = &mut Pcg64::seed_from_u64(99);
        for _ in 0..30 {
            let g = crate::testing::random_graph(rng, 7, 10, true);
            let deterministic = g.find_cycle().is_some();
            for seed in 0..5 {
                let seeded_rng = &mut Pcg64::seed_from_u64(seed);
                let found = g.find_cycle_seeded(seeded_rng);
                assert_eq!(found.is_some(), deterministic);
                if let Some(cycle) = found {
                    assert_closes(&g, &cycle);
                }
            }
        }
    }
}
