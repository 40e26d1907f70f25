/*!
# Graph Representation

The crate ships a single storage backend: an **arena** of vertex and edge
slots addressed by `u32` handles, with value→handle hash indices on top.
This keeps payloads out of the hot loops — algorithms run over handles and
bitsets and translate back to payloads at the API boundary — and avoids
cyclic ownership between vertices and their incident edges.

- [`Graph`] is the owning, mutable store. Directed or undirected mode is
  fixed at construction.
- [`GraphView`] is a live, non-owning read-only view. It implements only
  the query trait ([`GraphRead`](crate::ops::GraphRead)), so mutation
  through a view does not compile.
*/

mod store;
mod view;

pub use store::*;
pub use view::*;
