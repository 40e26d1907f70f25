/*!
# Maximum Flow (generic push-relabel)

Preflow-push over a directed graph whose edge payloads report a
non-negative capacity. Flow state lives in arrays beside the graph —
per-vertex height labels and excesses, per-edge flows — never inside the
edges themselves, so the algorithm runs fine on a read-only view.

The main loop sweeps all vertices over and over, attempting pushes along
every incident edge in both directions and relabeling where no push
applies, until a full sweep changes nothing. There is no active-vertex
queue; the sweep order gives weak asymptotic bounds but is correct.
*/

use fxhash::FxHashMap;

use super::*;

/// Capability required of edge payloads used in max-flow computations.
pub trait Flowable {
    /// The capacity of this edge. Must be non-negative.
    fn capacity(&self) -> i64;
}

/// The result of a max-flow computation: the flow value and the flow
/// routed over every edge.
#[derive(Debug, Clone)]
pub struct FlowAssignment<E: Value> {
    value: i64,
    flows: FxHashMap<E, i64>,
}

impl<E: Value> FlowAssignment<E> {
    /// Total flow from source to sink.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Flow routed over the given edge; zero for edges the computation
    /// never saw.
    pub fn flow_on(&self, e: &E) -> i64 {
        self.flows.get(e).copied().unwrap_or(0)
    }

    /// Iterates over all `(edge, flow)` pairs of the assignment.
    pub fn flows(&self) -> impl Iterator<Item = (&E, i64)> + '_ {
        self.flows.iter().map(|(e, &f)| (e, f))
    }
}

/// Maximum-flow computation, blanket-implemented for every directed graph
/// whose edge payloads are [`Flowable`].
pub trait MaximumFlow<V: Value, E: Value + Flowable>: GraphRead<V, E> {
    /// Computes a maximum flow from `source` to `sink`.
    ///
    /// Fails with [`GraphError::InvalidArgument`] on undirected graphs,
    /// when `source == sink`, or when any edge reports a negative
    /// capacity; with [`GraphError::NotInGraph`] when either endpoint is
    /// unregistered.
    ///
    /// The returned assignment satisfies `0 <= flow <= capacity` on every
    /// edge and conserves flow at every vertex except source and sink;
    /// its value is the net flow into the sink.
    fn max_flow(&self, source: &V, sink: &V) -> Result<FlowAssignment<E>> {
        if !self.is_directed() {
            return Err(GraphError::InvalidArgument(
                "max flow requires a directed graph".into(),
            ));
        }
        let s = self.require_vertex(source)?;
        let t = self.require_vertex(sink)?;
        if s == t {
            return Err(GraphError::InvalidArgument(
                "source and sink must be distinct".into(),
            ));
        }
        if let Some(id) = self
            .edge_ids()
            .find(|&id| self.edge_value(id).capacity() < 0)
        {
            return Err(GraphError::InvalidArgument(format!(
                "edge {:?} has negative capacity {}",
                self.edge_value(id),
                self.edge_value(id).capacity()
            )));
        }

        let vcap = self.vertex_capacity() as usize;
        let ecap = self.edge_capacity() as usize;
        let mut label = vec![0 as NumNodes; vcap];
        let mut excess = vec![0i64; vcap];
        let mut flow = vec![0i64; ecap];

        // saturate the source's out-edges; edges curling back into the
        // source (self-edges included) are not real capacity
        label[s as usize] = self.number_of_vertices();
        for id in self.out_edge_ids_raw(s) {
            let v = self.sink_id(id);
            if v == s {
                continue;
            }
            let c = self.edge_value(id).capacity();
            flow[id as usize] = c;
            excess[s as usize] -= c;
            excess[v as usize] += c;
        }

        loop {
            let mut acted = false;

            for u in self.vertex_ids() {
                let mut pushed = false;

                for id in self.edge_ids_of(u) {
                    if excess[u as usize] <= 0 {
                        break;
                    }
                    if self.is_self_edge_id(id) {
                        continue;
                    }

                    let (es, et) = self.endpoints(id);
                    let forward = es == u;
                    let v = if forward { et } else { es };
                    let residual = if forward {
                        self.edge_value(id).capacity() - flow[id as usize]
                    } else {
                        flow[id as usize]
                    };

                    if residual > 0 && label[u as usize] == label[v as usize] + 1 {
                        let amount = excess[u as usize].min(residual);
                        flow[id as usize] += if forward { amount } else { -amount };
                        excess[u as usize] -= amount;
                        excess[v as usize] += amount;
                        acted = true;
                        pushed = true;
                    }
                }

                if !pushed && excess[u as usize] > 0 && u != s && u != t {
                    // relabel: lift u just above its lowest residual neighbor
                    let mut min_label = None;
                    for id in self.edge_ids_of(u) {
                        if self.is_self_edge_id(id) {
                            continue;
                        }
                        let (es, et) = self.endpoints(id);
                        let (v, residual) = if es == u {
                            (et, self.edge_value(id).capacity() - flow[id as usize])
                        } else {
                            (es, flow[id as usize])
                        };
                        if residual > 0 {
                            min_label = Some(
                                min_label.map_or(label[v as usize], |m: NumNodes| {
                                    m.min(label[v as usize])
                                }),
                            );
                        }
                    }
                    if let Some(m) = min_label {
                        if m >= label[u as usize] {
                            label[u as usize] = m + 1;
                            acted = true;
                        }
                    }
                }
            }

            if !acted {
                break;
            }
        }

        let flows = self
            .edge_ids()
            .map(|id| (self.edge_value(id).clone(), flow[id as usize]))
            .collect();
        Ok(FlowAssignment {
            value: excess[t as usize],
            flows,
        })
    }
}

impl<V: Value, E: Value + Flowable, G: GraphRead<V, E>> MaximumFlow<V, E> for G {}
