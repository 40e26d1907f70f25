use std::{fmt::Debug, hash::Hash};

use itertools::{Either, Itertools};

use crate::{
    error::{GraphError, Result},
    ids::*,
};

/// Contract required of vertex and edge payload types.
///
/// Payloads need consistent equality/hashing (they key the value→handle
/// indices), cloning (graph clones share payload values), and a debug
/// rendering (errors name the offending value). Edge values additionally
/// must be unique per edge; the graph enforces this on insertion.
pub trait Value: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Value for T {}

/// The read-only interface of a labelled graph.
///
/// Implemented by [`Graph`](crate::repr::Graph) and its borrowing
/// [`GraphView`](crate::repr::GraphView); algorithms are blanket-implemented
/// on top of this trait and therefore run on both.
///
/// Two access levels coexist:
/// - **handle-level** methods work on [`NodeId`]/[`EdgeId`] and panic when
///   given a stale handle,
/// - **payload-level** methods take `&V`/`&E` values and fail with
///   [`GraphError::NotInGraph`] for unregistered values before touching any
///   state.
///
/// For undirected graphs, "out" and "in" are not semantically
/// distinguished: every query that conceptually separates source and sink
/// collapses to the undirected union of both adjacency sides. A self-edge
/// is reported once per query, not once per side.
pub trait GraphRead<V: Value, E: Value> {
    /// Returns *true* if edges have a distinguished source and sink.
    fn is_directed(&self) -> bool;

    /// Returns the number of vertices currently registered.
    fn number_of_vertices(&self) -> NumNodes;

    /// Returns the number of edges currently registered.
    fn number_of_edges(&self) -> NumEdges;

    /// Upper bound (exclusive) of all valid vertex handles.
    ///
    /// Suitable for sizing bitsets and arrays indexed by [`NodeId`]; may
    /// exceed [`GraphRead::number_of_vertices`] after removals.
    fn vertex_capacity(&self) -> NumNodes;

    /// Upper bound (exclusive) of all valid edge handles.
    fn edge_capacity(&self) -> NumEdges;

    /// Returns an iterator over the handles of all registered vertices.
    fn vertex_ids(&self) -> impl Iterator<Item = NodeId> + '_;

    /// Returns an iterator over the handles of all registered edges.
    fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_;

    /// Looks up the handle of a vertex value.
    fn vertex_id(&self, v: &V) -> Option<NodeId>;

    /// Looks up the handle of an edge value.
    fn edge_id(&self, e: &E) -> Option<EdgeId>;

    /// Returns the payload of a vertex.
    /// ** Panics on a stale handle **
    fn vertex_value(&self, u: NodeId) -> &V;

    /// Returns the payload of an edge.
    /// ** Panics on a stale handle **
    fn edge_value(&self, id: EdgeId) -> &E;

    /// Returns the `(source, sink)` handle pair of an edge as stored.
    /// ** Panics on a stale handle **
    fn endpoints(&self, id: EdgeId) -> (NodeId, NodeId);

    /// Returns the edges stored as leaving `u`, ignoring directedness.
    /// ** Panics on a stale handle **
    fn out_edge_ids_raw(&self, u: NodeId) -> impl Iterator<Item = EdgeId> + '_;

    /// Returns the edges stored as entering `u`, ignoring directedness.
    /// ** Panics on a stale handle **
    fn in_edge_ids_raw(&self, u: NodeId) -> impl Iterator<Item = EdgeId> + '_;

    // ------------------------------------------------------------------
    // handle-level derived queries
    // ------------------------------------------------------------------

    /// Returns the source handle of an edge.
    /// ** Panics on a stale handle **
    #[inline]
    fn source_id(&self, id: EdgeId) -> NodeId {
        self.endpoints(id).0
    }

    /// Returns the sink handle of an edge.
    /// ** Panics on a stale handle **
    #[inline]
    fn sink_id(&self, id: EdgeId) -> NodeId {
        self.endpoints(id).1
    }

    /// Returns *true* if both endpoints of the edge coincide.
    /// ** Panics on a stale handle **
    #[inline]
    fn is_self_edge_id(&self, id: EdgeId) -> bool {
        let (s, t) = self.endpoints(id);
        s == t
    }

    /// Given one endpoint of an edge, returns the other. For a self-edge
    /// this is `u` again.
    /// ** Panics on a stale handle or if `u` is not an endpoint of `id` **
    #[inline]
    fn opposite(&self, u: NodeId, id: EdgeId) -> NodeId {
        let (s, t) = self.endpoints(id);
        debug_assert!(u == s || u == t);
        if s == u { t } else { s }
    }

    /// Returns all edges incident to `u`, each exactly once.
    fn edge_ids_of(&self, u: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        // a self-edge is registered on both adjacency sides of u
        self.out_edge_ids_raw(u)
            .chain(self.in_edge_ids_raw(u).filter(move |&id| !self.is_self_edge_id(id)))
    }

    /// Returns the edges usable *out of* `u`: for directed graphs the
    /// edges with source `u`, for undirected graphs all incident edges.
    fn edge_ids_of_source(&self, u: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        if self.is_directed() {
            Either::Left(self.out_edge_ids_raw(u))
        } else {
            Either::Right(self.edge_ids_of(u))
        }
    }

    /// Returns the edges usable *into* `u`: for directed graphs the edges
    /// with sink `u`, for undirected graphs all incident edges.
    fn edge_ids_of_sink(&self, u: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        if self.is_directed() {
            Either::Left(self.in_edge_ids_raw(u))
        } else {
            Either::Right(self.edge_ids_of(u))
        }
    }

    /// Returns the handle of the edge connecting `s` to `t`, if any.
    /// Undirected graphs answer for either orientation.
    /// ** Panics on a stale handle **
    fn connection_id(&self, s: NodeId, t: NodeId) -> Option<EdgeId> {
        if self.is_directed() {
            self.out_edge_ids_raw(s).find(|&id| self.sink_id(id) == t)
        } else {
            self.edge_ids_of(s).find(|&id| self.opposite(s, id) == t)
        }
    }

    /// Returns the handles of all vertices adjacent to `u` via any
    /// incident edge, each exactly once.
    fn neighbor_ids_of(&self, u: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edge_ids_of(u).map(move |id| self.opposite(u, id)).unique()
    }

    // ------------------------------------------------------------------
    // payload-level queries
    // ------------------------------------------------------------------

    /// Looks up a vertex handle, failing with
    /// [`GraphError::NotInGraph`] if the value is unregistered.
    fn require_vertex(&self, v: &V) -> Result<NodeId> {
        self.vertex_id(v).ok_or_else(|| GraphError::missing(v))
    }

    /// Looks up an edge handle, failing with
    /// [`GraphError::NotInGraph`] if the value is unregistered.
    fn require_edge(&self, e: &E) -> Result<EdgeId> {
        self.edge_id(e).ok_or_else(|| GraphError::missing(e))
    }

    /// Returns *true* if the vertex value is registered.
    fn contains_vertex(&self, v: &V) -> bool {
        self.vertex_id(v).is_some()
    }

    /// Returns *true* if the edge value is registered.
    fn contains_edge(&self, e: &E) -> bool {
        self.edge_id(e).is_some()
    }

    /// Returns an iterator over all vertex payloads.
    fn vertices<'a>(&'a self) -> impl Iterator<Item = &'a V> + 'a
    where
        V: 'a,
    {
        self.vertex_ids().map(move |u| self.vertex_value(u))
    }

    /// Returns an iterator over all edge payloads.
    fn edges<'a>(&'a self) -> impl Iterator<Item = &'a E> + 'a
    where
        E: 'a,
    {
        self.edge_ids().map(move |id| self.edge_value(id))
    }

    /// Returns the edge connecting `source` to `sink`, if any. Undirected
    /// graphs answer for either orientation.
    fn connection<'a>(&'a self, source: &V, sink: &V) -> Result<Option<&'a E>> {
        let s = self.require_vertex(source)?;
        let t = self.require_vertex(sink)?;
        Ok(self.connection_id(s, t).map(|id| self.edge_value(id)))
    }

    /// Returns *true* if an edge connects `source` to `sink`.
    fn is_connected(&self, source: &V, sink: &V) -> Result<bool> {
        Ok(self.connection(source, sink)?.is_some())
    }

    /// Returns all edges incident to the vertex, each exactly once.
    fn edges_of<'a>(&'a self, v: &V) -> Result<impl Iterator<Item = &'a E> + 'a>
    where
        E: 'a,
    {
        let u = self.require_vertex(v)?;
        Ok(self.edge_ids_of(u).map(move |id| self.edge_value(id)))
    }

    /// Returns the edges usable out of the vertex
    /// (all incident edges when undirected).
    fn edges_of_source<'a>(&'a self, v: &V) -> Result<impl Iterator<Item = &'a E> + 'a>
    where
        E: 'a,
    {
        let u = self.require_vertex(v)?;
        Ok(self.edge_ids_of_source(u).map(move |id| self.edge_value(id)))
    }

    /// Returns the edges usable into the vertex
    /// (all incident edges when undirected).
    fn edges_of_sink<'a>(&'a self, v: &V) -> Result<impl Iterator<Item = &'a E> + 'a>
    where
        E: 'a,
    {
        let u = self.require_vertex(v)?;
        Ok(self.edge_ids_of_sink(u).map(move |id| self.edge_value(id)))
    }

    /// Returns the number of edges incident to the vertex; a self-edge
    /// counts once.
    fn degree_of(&self, v: &V) -> Result<NumEdges> {
        let u = self.require_vertex(v)?;
        Ok(self.edge_ids_of(u).count() as NumEdges)
    }

    /// Returns the number of edges usable out of the vertex.
    fn out_degree_of(&self, v: &V) -> Result<NumEdges> {
        let u = self.require_vertex(v)?;
        Ok(self.edge_ids_of_source(u).count() as NumEdges)
    }

    /// Returns the number of edges usable into the vertex.
    fn in_degree_of(&self, v: &V) -> Result<NumEdges> {
        let u = self.require_vertex(v)?;
        Ok(self.edge_ids_of_sink(u).count() as NumEdges)
    }

    /// Returns all vertices adjacent to the vertex via any incident edge,
    /// each exactly once.
    fn neighbors_of<'a>(&'a self, v: &V) -> Result<impl Iterator<Item = &'a V> + 'a>
    where
        V: 'a,
    {
        let u = self.require_vertex(v)?;
        Ok(self.neighbor_ids_of(u).map(move |w| self.vertex_value(w)))
    }

    /// Returns the source vertex of an edge.
    fn source_of<'a>(&'a self, e: &E) -> Result<&'a V> {
        let id = self.require_edge(e)?;
        Ok(self.vertex_value(self.source_id(id)))
    }

    /// Returns the sink vertex of an edge.
    fn sink_of<'a>(&'a self, e: &E) -> Result<&'a V> {
        let id = self.require_edge(e)?;
        Ok(self.vertex_value(self.sink_id(id)))
    }

    /// Returns *true* if both endpoints of the edge coincide.
    fn is_self_edge(&self, e: &E) -> Result<bool> {
        Ok(self.is_self_edge_id(self.require_edge(e)?))
    }

    /// Returns *true* if the vertex is an endpoint of the edge.
    fn is_endpoint_of(&self, e: &E, v: &V) -> Result<bool> {
        let id = self.require_edge(e)?;
        let u = self.require_vertex(v)?;
        let (s, t) = self.endpoints(id);
        Ok(s == u || t == u)
    }

    /// Returns a vertex that is an endpoint of both edges, if one exists.
    /// When several qualify, an endpoint of the first edge's source side is
    /// preferred.
    fn shared_endpoint<'a>(&'a self, e1: &E, e2: &E) -> Result<Option<&'a V>> {
        let a = self.require_edge(e1)?;
        let b = self.require_edge(e2)?;
        let (s1, t1) = self.endpoints(a);
        let (s2, t2) = self.endpoints(b);
        Ok(if s1 == s2 || s1 == t2 {
            Some(self.vertex_value(s1))
        } else if t1 == s2 || t1 == t2 {
            Some(self.vertex_value(t1))
        } else {
            None
        })
    }
}
