/*!
# Utilities

Helper structures consumed by the algorithm suite through narrow
interfaces. Currently this is only [`UnionFind`], the connectivity oracle
behind undirected cycle detection.
*/

pub mod union_find;

pub use union_find::UnionFind;
