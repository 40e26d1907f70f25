/*!
# Single-Source Shortest Paths

Dijkstra's algorithm over strictly positive edge weights. The frontier is
a plain set scanned linearly for the minimum — no priority queue — so one
extraction costs `O(|V|)`. That matches the intended semantics and is a
known performance ceiling, not a correctness concern.
*/

use super::*;

/// Capability required of edge payloads used in shortest-path queries.
pub trait Weighted {
    /// The cost of traversing this edge. Must be strictly positive.
    fn weight(&self) -> i64;
}

/// Shortest-path queries, blanket-implemented for every graph whose edge
/// payloads are [`Weighted`].
pub trait ShortestPath<V: Value, E: Value + Weighted>: GraphRead<V, E> {
    /// Computes a minimum-weight path from `source` to `sink` and returns
    /// it as a vertex-handle sequence together with its total weight.
    ///
    /// Fails fast before any computation: with
    /// [`GraphError::NotInGraph`] if `source` or `sink` is unregistered,
    /// and with [`GraphError::AlgorithmFailure`] if any edge weight is not
    /// strictly positive (the algorithm is undefined for such weights).
    ///
    /// Returns `Ok(None)` iff `sink` is unreachable from `source`. The
    /// path from a vertex to itself is the singleton `[source]` of weight
    /// zero. Directed graphs walk edges from source to sink; undirected
    /// graphs walk edges from either endpoint.
    fn shortest_path_ids(&self, source: &V, sink: &V) -> Result<Option<(Vec<NodeId>, i64)>> {
        let s = self.require_vertex(source)?;
        let t = self.require_vertex(sink)?;

        if let Some(id) = self
            .edge_ids()
            .find(|&id| self.edge_value(id).weight() <= 0)
        {
            return Err(GraphError::AlgorithmFailure(format!(
                "shortest path requires strictly positive weights, but edge {:?} has weight {}",
                self.edge_value(id),
                self.edge_value(id).weight()
            )));
        }

        let cap = self.vertex_capacity();
        let mut dist = vec![i64::MAX; cap as usize];
        let mut pred = vec![INVALID_EDGE; cap as usize];
        let mut frontier: Vec<NodeId> = vec![s];
        let mut in_frontier = NodeBitSet::new(cap);
        in_frontier.set_bit(s);
        dist[s as usize] = 0;

        while !frontier.is_empty() {
            let pos = (0..frontier.len())
                .min_by_key(|&i| dist[frontier[i] as usize])
                .unwrap();
            let u = frontier.swap_remove(pos);
            in_frontier.clear_bit(u);

            if u == t {
                break;
            }

            for id in self.edge_ids_of_source(u) {
                let w = self.opposite(u, id);
                let relaxed = dist[u as usize] + self.edge_value(id).weight();
                if relaxed < dist[w as usize] {
                    dist[w as usize] = relaxed;
                    pred[w as usize] = id;
                    if !in_frontier.get_bit(w) {
                        in_frontier.set_bit(w);
                        frontier.push(w);
                    }
                }
            }
        }

        if dist[t as usize] == i64::MAX {
            return Ok(None);
        }

        let mut path = vec![t];
        let mut cur = t;
        while cur != s {
            let id = pred[cur as usize];
            cur = self.opposite(cur, id);
            path.push(cur);
        }
        path.reverse();
        Ok(Some((path, dist[t as usize])))
    }

    /// Like [`ShortestPath::shortest_path_ids`], but resolves the path to
    /// vertex payloads.
    fn shortest_path<'a>(&'a self, source: &V, sink: &V) -> Result<Option<Vec<&'a V>>> {
        Ok(self.shortest_path_ids(source, sink)?.map(|(ids, _)| {
            ids.into_iter().map(|u| self.vertex_value(u)).collect()
        }))
    }

    /// Returns only the weight of a minimum-weight path, `Ok(None)` if the
    /// sink is unreachable.
    fn shortest_distance(&self, source: &V, sink: &V) -> Result<Option<i64>> {
        Ok(self.shortest_path_ids(source, sink)?.map(|(_, d)| d))
    }
}

impl<V: Value, E: Value + Weighted, G: GraphRead<V, E>> ShortestPath<V, E> for G {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Wire(u32, i64);

    impl Weighted for Wire {
        fn weight(&self) -> i64 {
            self.1
        }
    }

    #[test]
    fn detour_beats_direct_edge() {
        let mut g = Graph::new_directed();
        for v in ['a', 'b', 'c'] {
            g.add_vertex(v);
        }
        g.add_edge(&'a', &'b', Wire(0, 10)).unwrap();
        g.add_edge(&'a', &'c', Wire(1, 4)).unwrap();
        g.add_edge(&'c', &'b', Wire(2, 4)).unwrap();

        let path = g.shortest_path(&'a', &'b').unwrap().unwrap();
        assert_eq!(path, vec![&'a', &'c', &'b']);
        assert_eq!(g.shortest_distance(&'a', &'b').unwrap(), Some(8));
    }

    #[test]
    fn path_to_self_is_singleton() {
        let mut g = Graph::new_directed();
        g.add_vertex(0);
        g.add_vertex(1);
        g.add_edge(&0, &1, Wire(0, 3)).unwrap();
        assert_eq!(g.shortest_path(&0, &0).unwrap().unwrap(), vec![&0]);
        assert_eq!(g.shortest_distance(&0, &0).unwrap(), Some(0));
    }

    #[test]
    fn unreachable_sink_yields_none() {
        let mut g = Graph::new_directed();
        for v in 0..4 {
            g.add_vertex(v);
        }
        g.add_edge(&0, &1, Wire(0, 1)).unwrap();
        g.add_edge(&3, &2, Wire(1, 1)).unwrap();
        assert_eq!(g.shortest_path(&0, &2).unwrap(), None);
        // only the edge direction blocks the way
        assert_eq!(g.shortest_path(&3, &2).unwrap().unwrap().len(), 2);
        assert_eq!(g.shortest_path(&2, &3).unwrap(), None);
    }

    #[test]
    fn undirected_edges_walk_both_ways() {
        let mut g = Graph::new_undirected();
        for v in 0..3 {
            g.add_vertex(v);
        }
        g.add_edge(&0, &1, Wire(0, 2)).unwrap();
        g.add_edge(&1, &2, Wire(1, 2)).unwrap();
        assert_eq!(g.shortest_distance(&2, &0).unwrap(), Some(4));
        assert_eq!(g.shortest_path(&2, &0).unwrap().unwrap(), vec![&2, &1, &0]);
    }

    #[test]
    fn rejects_non_positive_weights() {
        let mut g = Graph::new_directed();
        g.add_vertex(0);
        g.add_vertex(1);
        g.add_edge(&0, &1, Wire(0, 0)).unwrap();
        assert!(matches!(
            g.shortest_path(&0, &1),
            Err(GraphError::AlgorithmFailure(_))
        ));

        let mut g = Graph::new_directed();
        g.add_vertex(0);
        g.add_vertex(1);
        g.add_edge(&0, &1, Wire(0, -3)).unwrap();
        assert!(g.shortest_distance(&0, &1).is_err());
    }

    #[test]
    fn rejects_unregistered_endpoints() {
        let mut g: Graph<u32, Wire> = Graph::new_directed();
        g.add_vertex(0);
        assert!(matches!(
            g.shortest_path(&0, &7),
            Err(GraphError::NotInGraph(_))
        ));
        assert!(g.shortest_path(&7, &0).is_err());
    }

    /// Exhaustively enumerates all simple paths to cross-check Dijkstra on
    /// small random graphs.
    fn brute_force_distance(g: &Graph<u32, Wire>, s: u32, t: u32) -> Option<i64> {
        fn walk(
            g: &Graph<u32, Wire>,
            cur: u32,
            t: u32,
            seen: &mut Vec<u32>,
            cost: i64,
            best: &mut Option<i64>,
        ) {
            if cur == t {
                *best = Some(best.map_or(cost, |b: i64| b.min(cost)));
                return;
            }
            let next = g
                .edges_of_source(&cur)
                .unwrap()
                .cloned()
                .collect_vec();
            for e in next {
                let other = if *g.source_of(&e).unwrap() == cur {
                    *g.sink_of(&e).unwrap()
                } else {
                    *g.source_of(&e).unwrap()
                };
                if seen.contains(&other) {
                    continue;
                }
                seen.push(other);
                walk(g, other, t, seen, cost + e.weight(), best);
                seen.pop();
            }
        }

        let mut best = None;
        walk(g, s, t, &mut vec![s], 0, &mut best);
        best
    }

    #[test]
    fn agrees_with_brute_force_on_random_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for round in 0..30 {
            let n = 6;
            let directed = round % 2 == 0;
            let mut g = if directed {
                Graph::new_directed()
            } else {
                Graph::new_undirected()
            };
            for v in 0..n {
                g.add_vertex(v);
            }
            let mut label = 0;
            for _ in 0..12 {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);
                let w = rng.random_range(1..10);
                if g.add_edge(&u, &v, Wire(label, w)).unwrap() {
                    label += 1;
                }
            }

            for s in 0..n {
                for t in 0..n {
                    let expected = brute_force_distance(&g, s, t);
                    let got = g.shortest_distance(&s, &t).unwrap();
                    assert_eq!(got, expected, "{s} -> {t} in round {round}");

                    if let Some((path, total)) = g.shortest_path_ids(&s, &t).unwrap() {
                        // the returned path must itself be a walk of the
                        // reported weight
                        let mut sum = 0;
                        for (a, b) in path.iter().tuple_windows() {
                            let e = g
                                .connection(g.vertex_value(*a), g.vertex_value(*b))
                                .unwrap()
                                .unwrap();
                            sum += e.weight();
                        }
                        assert_eq!(sum, total);
                    }
                }
            }
        }
    }
}
