/*!
# Vertex & Edge Handles

Payload values are interned into an arena and addressed by opaque `u32`
handles. We choose `u32` as almost all use-cases involve less than `2^32`
vertices or edges, which (1) saves space compared to `usize`/`u64` and
(2) lets algorithms index plain arrays and bitsets with handles directly.

Handles are stable: a handle stays valid until its vertex/edge is removed
from the graph. Removed handles may be reused by later insertions.
*/

use stream_bitset::bitset::BitSetImpl;

/// Handle of a vertex inside a graph's arena.
pub type NodeId = u32;

/// Handle of an edge inside a graph's arena.
pub type EdgeId = u32;

/// Node-handle value that is considered invalid.
///
/// Used as a sentinel in predecessor arrays instead of `Option<NodeId>`.
pub const INVALID_NODE: NodeId = NodeId::MAX;

/// Edge-handle value that is considered invalid.
///
/// Used as a sentinel in predecessor-edge arrays instead of `Option<EdgeId>`.
pub const INVALID_EDGE: EdgeId = EdgeId::MAX;

/// There can be at most `2^32 - 1` vertices in a graph!
pub type NumNodes = NodeId;

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = EdgeId;

/// A BitSet over vertex handles
pub type NodeBitSet = BitSetImpl<NodeId>;

/// A BitSet over edge handles
pub type EdgeBitSet = BitSetImpl<EdgeId>;
