//! Maximum flow value over any backend
//!
//! Any backend is first copied into a `petgraph::Graph` capacity network,
//! which is then handed to `petgraph::algo::ford_fulkerson`. Both entry points
//! share that network and differ only in how they read the solver's answer.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::{ford_fulkerson, has_path_connecting};
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::backend::{GraphBackend, GraphError};

/// Capacity network handed to the solver.
struct Network {
    graph: Graph<(), f64>,
    source: NodeIndex,
    sink: NodeIndex,
}

impl Network {
    fn build<G: GraphBackend>(
        graph: &G,
        source: G::NodeId,
        sink: G::NodeId,
    ) -> Result<Self, GraphError> {
        let mut network: Graph<(), Option<f64>> = Graph::with_capacity(graph.node_count(), 0);
        let index: HashMap<G::NodeId, NodeIndex> = graph
            .node_ids()
            .map(|node| (node, network.add_node(())))
            .collect();

        let s = *index
            .get(&source)
            .ok_or_else(|| GraphError::node_not_found(source))?;
        let t = *index
            .get(&sink)
            .ok_or_else(|| GraphError::node_not_found(sink))?;
        if s == t {
            return Err(GraphError::SourceIsSink(source.to_string()));
        }

        for (from, to, capacity) in graph.capacitated_edges() {
            let (Some(&a), Some(&b)) = (index.get(&from), index.get(&to)) else {
                continue;
            };
            // Self-loops never carry flow.
            if a != b {
                network.add_edge(a, b, usable_capacity(capacity));
            }
        }

        let unlimited_only = network.filter_map(|_, _| Some(()), |_, c| c.is_none().then_some(()));
        if has_path_connecting(&unlimited_only, s, t, None) {
            return Err(GraphError::Unbounded {
                from: source.to_string(),
                to: sink.to_string(),
            });
        }

        let finite_total: f64 = network.edge_weights().filter_map(|c| *c).sum();
        let unlimited = if finite_total > 0.0 { 3.0 * finite_total } else { 1.0 };

        Ok(Network {
            graph: network.map(|_, _| (), |_, c| (*c).unwrap_or(unlimited)),
            source: s,
            sink: t,
        })
    }
}

/// `None` and `+inf` are unbounded. NaN and negative capacities carry nothing.
fn usable_capacity(capacity: Option<f64>) -> Option<f64> {
    match capacity {
        None => None,
        Some(c) if c == f64::INFINITY => None,
        Some(c) => Some(c.max(0.0)),
    }
}

/// Maximum flow value as reported by the solver.
pub fn maximum_flow_value<G: GraphBackend>(
    graph: &G,
    source: G::NodeId,
    sink: G::NodeId,
) -> Result<f64, GraphError> {
    let network = Network::build(graph, source, sink)?;
    let (value, _) = ford_fulkerson(&network.graph, network.source, network.sink);
    Ok(value)
}

/// Maximum flow value read back from the per-edge flows: the net flow
/// leaving the source.
pub fn legacy_max_flow<G: GraphBackend>(
    graph: &G,
    source: G::NodeId,
    sink: G::NodeId,
) -> Result<f64, GraphError> {
    let network = Network::build(graph, source, sink)?;
    let (_, flows) = ford_fulkerson(&network.graph, network.source, network.sink);

    let leaving: f64 = network
        .graph
        .edges_directed(network.source, Direction::Outgoing)
        .map(|edge| flows[edge.id().index()])
        .sum();
    let entering: f64 = network
        .graph
        .edges_directed(network.source, Direction::Incoming)
        .map(|edge| flows[edge.id().index()])
        .sum();
    Ok(leaving - entering)
}
