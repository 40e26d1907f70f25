/*!
`lgraphs` is a graph data structure & algorithms library designed for graphs that are
- **l**abelled: vertices and edges carry arbitrary payload values,
- **l**ookup-friendly: every payload maps back to its vertex/edge in `O(1)`,
- **l**ightweight to traverse: algorithms run over `u32` handles and bitsets, not payloads.

# Representation

Payload values are interned into an **arena**: a [`Graph<V, E>`](crate::repr::Graph)
keeps vertices and edges in slot vectors addressed by `u32` handles
([`NodeId`](crate::ids::NodeId) / [`EdgeId`](crate::ids::EdgeId)), plus hash
indices from payload values to handles. Payload types only need the
[`Value`](crate::ops::Value) contract — `Clone + Eq + Hash + Debug`.

Each edge owns a `(source, sink)` vertex pair. An edge value keys at most
one edge, at most one edge connects a vertex pair, and self-edges are
allowed.

### Directed vs Undirected

Whether a graph is **directed** or **undirected** is fixed at
construction ([`Graph::new_directed`](crate::repr::Graph::new_directed) /
[`Graph::new_undirected`](crate::repr::Graph::new_undirected)). Undirected
graphs store edges with the same source/sink shape but answer every
direction-sensitive query — connectivity, degrees, edge sets, traversal —
with the union of both sides.

### Read-only views

[`Graph::view`](crate::repr::Graph::view) returns a live, non-owning
[`GraphView`](crate::repr::GraphView) implementing only the query trait
[`GraphRead`](crate::ops::GraphRead); mutating through a view is a compile
error, not a runtime one.

# Algorithms

The [`algo`] module provides the algorithm suite as traits implemented on
all graphs (and views): BFS/DFS [`Traversal`](crate::algo::Traversal),
Dijkstra [`ShortestPath`](crate::algo::ShortestPath) over
[`Weighted`](crate::algo::Weighted) edges,
[`CycleSearch`](crate::algo::CycleSearch) (concrete cycles, DAG test),
[`BipartiteTest`](crate::algo::BipartiteTest), push-relabel
[`MaximumFlow`](crate::algo::MaximumFlow) over
[`Flowable`](crate::algo::Flowable) edges, and the preference-based
matching family ([`serial_dictatorship`](crate::algo::serial_dictatorship),
[`top_trading_cycles`](crate::algo::top_trading_cycles),
[`stable_marriage`](crate::algo::stable_marriage)).

Algorithms are single-threaded and run to completion; they borrow the
graph for the duration of the call, so the borrow checker rules out
mutation mid-run. Randomized variants take a caller-provided
`rand::Rng` so results are reproducible under a fixed seed.

# Usage

There are *3* core submodules you probably want to interact with:
- [`prelude`] includes the graph type, its view, handles, errors, and the query trait,
- [`algo`] includes the algorithm traits and matching functions,
- [`utils`] includes helper structures such as [`UnionFind`](crate::utils::UnionFind).

In most use-cases, `use lgraphs::{prelude::*, algo::*};` suffices for your needs.

```rust
use lgraphs::{prelude::*, algo::*};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Road(&'static str, i64);

impl Weighted for Road {
    fn weight(&self) -> i64 {
        self.1
    }
}

let mut map = Graph::new_directed();
for city in ["berlin", "hamburg", "munich"] {
    map.add_vertex(city);
}
map.add_edge(&"berlin", &"munich", Road("a9", 10)).unwrap();
map.add_edge(&"berlin", &"hamburg", Road("a24", 4)).unwrap();
map.add_edge(&"hamburg", &"munich", Road("a7", 4)).unwrap();

let path = map.shortest_path(&"berlin", &"munich").unwrap().unwrap();
assert_eq!(path, vec![&"berlin", &"hamburg", &"munich"]);
```
*/

pub mod algo;
pub mod error;
pub mod ids;
pub mod ops;
pub mod repr;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

/// `lgraphs::prelude` includes the graph type and its read-only view, the
/// handle types, the error enum, and the query trait family.
pub mod prelude {
    pub use super::{error::*, ids::*, ops::*, repr::*};
}

pub use error::{GraphError, Result};
pub use ids::{EdgeId, NodeId, NumEdges, NumNodes};
pub use ops::{GraphRead, Value};
pub use repr::{Graph, GraphView};
