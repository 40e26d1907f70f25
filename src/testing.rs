//! Crate-internal helpers for constructing random labelled graphs in
//! tests. Payloads are plain `u32`s: vertex values are `0..n`, edge labels
//! are minted sequentially, so both stay unique.

use rand::Rng;

use crate::repr::Graph;

/// Builds a graph on vertices `0..n` with at most `m_ub` random edges.
/// Self-edges may occur; parallel edges and duplicate labels cannot.
pub(crate) fn random_graph<R: Rng>(
    rng: &mut R,
    n: u32,
    m_ub: u32,
    directed: bool,
) -> Graph<u32, u32> {
    let mut graph = if directed {
        Graph::new_directed()
    } else {
        Graph::new_undirected()
    };
    for v in 0..n {
        graph.add_vertex(v);
    }

    let mut label = 0;
    for _ in 0..m_ub {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        if graph.add_edge(&u, &v, label).unwrap() {
            label += 1;
        }
    }
    graph
}
