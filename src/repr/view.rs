use crate::{
    ids::*,
    ops::{GraphRead, Value},
    repr::Graph,
};

/// A live, non-owning read-only view of a [`Graph`].
///
/// The view borrows the graph and forwards every query to it; mutations on
/// the underlying graph made between view uses are immediately visible
/// through a freshly created view. There is no mutating surface on this
/// type, so writing through a view is a compile error rather than a
/// runtime one.
#[derive(Debug)]
pub struct GraphView<'a, V: Value, E: Value> {
    graph: &'a Graph<V, E>,
}

impl<'a, V: Value, E: Value> GraphView<'a, V, E> {
    pub(crate) fn new(graph: &'a Graph<V, E>) -> Self {
        Self { graph }
    }
}

impl<V: Value, E: Value> Clone for GraphView<'_, V, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: Value, E: Value> Copy for GraphView<'_, V, E> {}

impl<V: Value, E: Value> GraphRead<V, E> for GraphView<'_, V, E> {
    fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    fn number_of_vertices(&self) -> NumNodes {
        self.graph.number_of_vertices()
    }

    fn number_of_edges(&self) -> NumEdges {
        self.graph.number_of_edges()
    }

    fn vertex_capacity(&self) -> NumNodes {
        self.graph.vertex_capacity()
    }

    fn edge_capacity(&self) -> NumEdges {
        self.graph.edge_capacity()
    }

    fn vertex_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.vertex_ids()
    }

    fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.graph.edge_ids()
    }

    fn vertex_id(&self, v: &V) -> Option<NodeId> {
        self.graph.vertex_id(v)
    }

    fn edge_id(&self, e: &E) -> Option<EdgeId> {
        self.graph.edge_id(e)
    }

    fn vertex_value(&self, u: NodeId) -> &V {
        self.graph.vertex_value(u)
    }

    fn edge_value(&self, id: EdgeId) -> &E {
        self.graph.edge_value(id)
    }

    fn endpoints(&self, id: EdgeId) -> (NodeId, NodeId) {
        self.graph.endpoints(id)
    }

    fn out_edge_ids_raw(&self, u: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.graph.out_edge_ids_raw(u)
    }

    fn in_edge_ids_raw(&self, u: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.graph.in_edge_ids_raw(u)
    }
}
