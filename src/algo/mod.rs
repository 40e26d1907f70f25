/*!
# Graph Algorithms

This module provides the algorithm suite built on top of the
[`GraphRead`](crate::ops::GraphRead) query trait. All algorithms are
re-exported at the top level of this module, so you can simply do:
```rust
use lgraphs::algo::*;
```
and gain access to traversal, shortest paths, cycle detection, DAG and
bipartiteness tests, maximum flow, and preference-based matching.

Algorithms never mutate the graph they run on; they hold `&self` for the
whole computation, so a graph cannot be mutated mid-run. Randomized
variants take a caller-provided `rand::Rng`, which keeps results
reproducible under a fixed seed while preserving "any valid answer"
semantics.
*/

mod bipartite;
mod cycle;
mod flow;
mod matching;
mod shortest_path;
mod traversal;

use crate::prelude::*;

pub use bipartite::*;
pub use cycle::*;
pub use flow::*;
pub use matching::*;
pub use shortest_path::*;
pub use traversal::*;
