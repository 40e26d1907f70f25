use fxhash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    error::{GraphError, Result},
    ids::*,
    ops::{GraphRead, Value},
    repr::GraphView,
};

/// Incident-edge list of a single vertex. Degrees are small in most graphs,
/// so the first few handles live inline.
type AdjacencyVec = SmallVec<[EdgeId; 4]>;

#[derive(Clone, Debug)]
struct VertexSlot<V> {
    value: V,
    out_edges: AdjacencyVec,
    in_edges: AdjacencyVec,
}

impl<V> VertexSlot<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            out_edges: AdjacencyVec::new(),
            in_edges: AdjacencyVec::new(),
        }
    }
}

#[derive(Clone, Debug)]
struct EdgeSlot<E> {
    value: E,
    source: NodeId,
    sink: NodeId,
}

/// A relational store over arbitrary vertex and edge payload types.
///
/// Vertices are keyed by value `V`, edges by value `E`; each edge owns a
/// `(source, sink)` pair of vertices. Whether the graph is directed or
/// undirected is fixed at construction.
///
/// Internally both vertices and edges live in arenas addressed by `u32`
/// handles, with hash indices mapping payload values to handles. Removal
/// leaves a hole that later insertions reuse, so handles of *other*
/// vertices/edges stay stable across mutations.
///
/// Structural invariants maintained by every mutator:
/// - an edge value keys at most one edge,
/// - a registered edge appears in exactly its source's out-list and its
///   sink's in-list,
/// - at most one edge connects an ordered vertex pair (unordered for
///   undirected graphs),
/// - self-edges are permitted.
///
/// Cloning yields a structurally independent copy sharing the payload
/// values. Equality compares directedness, the vertex-value set, and the
/// full edge wiring: each edge value must connect the same endpoint pair
/// on both sides (either orientation for undirected graphs).
#[derive(Clone, Debug)]
pub struct Graph<V: Value, E: Value> {
    directed: bool,
    vertices: Vec<Option<VertexSlot<V>>>,
    edges: Vec<Option<EdgeSlot<E>>>,
    vertex_index: FxHashMap<V, NodeId>,
    edge_index: FxHashMap<E, EdgeId>,
    free_vertices: Vec<NodeId>,
    free_edges: Vec<EdgeId>,
}

impl<V: Value, E: Value> Graph<V, E> {
    /// Creates an empty graph whose edges have a distinguished source and
    /// sink.
    pub fn new_directed() -> Self {
        Self::new(true)
    }

    /// Creates an empty graph whose edges are symmetric.
    pub fn new_undirected() -> Self {
        Self::new(false)
    }

    fn new(directed: bool) -> Self {
        Self {
            directed,
            vertices: Vec::new(),
            edges: Vec::new(),
            vertex_index: FxHashMap::default(),
            edge_index: FxHashMap::default(),
            free_vertices: Vec::new(),
            free_edges: Vec::new(),
        }
    }

    fn slot(&self, u: NodeId) -> &VertexSlot<V> {
        self.vertices[u as usize].as_ref().unwrap()
    }

    fn slot_mut(&mut self, u: NodeId) -> &mut VertexSlot<V> {
        self.vertices[u as usize].as_mut().unwrap()
    }

    fn edge_slot(&self, id: EdgeId) -> &EdgeSlot<E> {
        self.edges[id as usize].as_ref().unwrap()
    }

    fn alloc_vertex(&mut self, slot: VertexSlot<V>) -> NodeId {
        match self.free_vertices.pop() {
            Some(id) => {
                self.vertices[id as usize] = Some(slot);
                id
            }
            None => {
                self.vertices.push(Some(slot));
                (self.vertices.len() - 1) as NodeId
            }
        }
    }

    fn alloc_edge(&mut self, slot: EdgeSlot<E>) -> EdgeId {
        match self.free_edges.pop() {
            Some(id) => {
                self.edges[id as usize] = Some(slot);
                id
            }
            None => {
                self.edges.push(Some(slot));
                (self.edges.len() - 1) as EdgeId
            }
        }
    }

    /// Registers a vertex. Returns *true* exactly if the value was not
    /// present before; an already-registered value leaves the graph
    /// untouched.
    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.vertex_index.contains_key(&v) {
            return false;
        }
        let id = self.alloc_vertex(VertexSlot::new(v.clone()));
        self.vertex_index.insert(v, id);
        true
    }

    /// Connects `source` to `sink` with the edge value `e`.
    ///
    /// Fails with [`GraphError::NotInGraph`] if either endpoint is
    /// unregistered. Returns `Ok(false)` without mutation if `e` already
    /// keys an edge or the endpoints are already connected (same ordered
    /// pair for directed graphs, either orientation for undirected ones).
    pub fn add_edge(&mut self, source: &V, sink: &V, e: E) -> Result<bool> {
        let s = self.require_vertex(source)?;
        let t = self.require_vertex(sink)?;

        if self.edge_index.contains_key(&e) || self.connection_id(s, t).is_some() {
            return Ok(false);
        }

        let id = self.alloc_edge(EdgeSlot {
            value: e.clone(),
            source: s,
            sink: t,
        });
        self.slot_mut(s).out_edges.push(id);
        self.slot_mut(t).in_edges.push(id);
        self.edge_index.insert(e, id);
        Ok(true)
    }

    /// Removes a vertex and every edge incident to it. Returns *false* if
    /// the value is unregistered.
    pub fn remove_vertex(&mut self, v: &V) -> bool {
        let Some(&u) = self.vertex_index.get(v) else {
            return false;
        };

        // snapshot incident handles before unregistering anything; a
        // self-edge sits in both lists and must be detached only once
        let incident: Vec<EdgeId> = {
            let slot = self.slot(u);
            slot.in_edges
                .iter()
                .copied()
                .chain(
                    slot.out_edges
                        .iter()
                        .copied()
                        .filter(|&id| !self.is_self_edge_id(id)),
                )
                .collect()
        };
        for id in incident {
            self.detach_edge(id);
        }

        let slot = self.vertices[u as usize].take().unwrap();
        self.vertex_index.remove(&slot.value);
        self.free_vertices.push(u);
        true
    }

    /// Removes an edge. Returns *false* if the value is unregistered.
    pub fn remove_edge(&mut self, e: &E) -> bool {
        let Some(&id) = self.edge_index.get(e) else {
            return false;
        };
        self.detach_edge(id);
        true
    }

    fn detach_edge(&mut self, id: EdgeId) {
        let slot = self.edges[id as usize].take().unwrap();
        self.edge_index.remove(&slot.value);
        self.slot_mut(slot.source)
            .out_edges
            .retain(|x: &mut EdgeId| *x != id);
        self.slot_mut(slot.sink)
            .in_edges
            .retain(|x: &mut EdgeId| *x != id);
        self.free_edges.push(id);
    }

    /// Returns a live read-only view of this graph. The view borrows the
    /// graph, so the borrow checker rules out mutation while a view is
    /// held; re-created views observe all mutations made in between.
    pub fn view(&self) -> GraphView<'_, V, E> {
        GraphView::new(self)
    }

    /// Converts an undirected graph into an equivalent directed graph by
    /// keeping every edge in its stored orientation and duplicating every
    /// non-self edge in the reverse direction. `mint` produces the payload
    /// of each reverse edge from the forward payload; minted values must
    /// not collide with any other edge value.
    ///
    /// Fails with [`GraphError::InvalidArgument`] if the graph is already
    /// directed or a minted value collides.
    pub fn to_directed_with<F>(&self, mut mint: F) -> Result<Graph<V, E>>
    where
        F: FnMut(&E) -> E,
    {
        if self.directed {
            return Err(GraphError::InvalidArgument(
                "graph is already directed".into(),
            ));
        }

        let mut out = Graph::new_directed();
        for v in self.vertices() {
            out.add_vertex(v.clone());
        }
        for id in self.edge_ids() {
            let (s, t) = self.endpoints(id);
            let e = self.edge_value(id);
            let source = self.vertex_value(s);
            let sink = self.vertex_value(t);
            if !out.add_edge(source, sink, e.clone())? {
                return Err(GraphError::InvalidArgument(format!(
                    "edge value {e:?} collides in the directed copy"
                )));
            }
            if s != t {
                let mirror = mint(e);
                if !out.add_edge(sink, source, mirror.clone())? {
                    return Err(GraphError::InvalidArgument(format!(
                        "minted reverse value {mirror:?} collides with an existing edge"
                    )));
                }
            }
        }
        Ok(out)
    }
}

impl<V: Value, E: Value> GraphRead<V, E> for Graph<V, E> {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn number_of_vertices(&self) -> NumNodes {
        self.vertex_index.len() as NumNodes
    }

    fn number_of_edges(&self) -> NumEdges {
        self.edge_index.len() as NumEdges
    }

    fn vertex_capacity(&self) -> NumNodes {
        self.vertices.len() as NumNodes
    }

    fn edge_capacity(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }

    fn vertex_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|_| i as NodeId))
    }

    fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|_| i as EdgeId))
    }

    fn vertex_id(&self, v: &V) -> Option<NodeId> {
        self.vertex_index.get(v).copied()
    }

    fn edge_id(&self, e: &E) -> Option<EdgeId> {
        self.edge_index.get(e).copied()
    }

    fn vertex_value(&self, u: NodeId) -> &V {
        &self.slot(u).value
    }

    fn edge_value(&self, id: EdgeId) -> &E {
        &self.edge_slot(id).value
    }

    fn endpoints(&self, id: EdgeId) -> (NodeId, NodeId) {
        let slot = self.edge_slot(id);
        (slot.source, slot.sink)
    }

    fn out_edge_ids_raw(&self, u: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.slot(u).out_edges.iter().copied()
    }

    fn in_edge_ids_raw(&self, u: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.slot(u).in_edges.iter().copied()
    }
}

impl<V: Value, E: Value> PartialEq for Graph<V, E> {
    fn eq(&self, other: &Self) -> bool {
        if self.directed != other.directed
            || self.number_of_vertices() != other.number_of_vertices()
            || self.number_of_edges() != other.number_of_edges()
        {
            return false;
        }
        if !self.vertices().all(|v| other.contains_vertex(v)) {
            return false;
        }
        self.edge_ids().all(|id| {
            let e = self.edge_value(id);
            let Some(oid) = other.edge_id(e) else {
                return false;
            };
            let (s, t) = self.endpoints(id);
            let (os, ot) = other.endpoints(oid);
            let same = self.vertex_value(s) == other.vertex_value(os)
                && self.vertex_value(t) == other.vertex_value(ot);
            let swapped = !self.directed
                && self.vertex_value(s) == other.vertex_value(ot)
                && self.vertex_value(t) == other.vertex_value(os);
            same || swapped
        })
    }
}

impl<V: Value, E: Value> Eq for Graph<V, E> {}
