//! One stable query API over every graph backend revision
//!
//! [`GraphCompat`] looks at a backend's [`Capabilities`] once, when it is
//! built, and binds each operation to the matching strategy. Callers always
//! get owned, reusable, order-preserving results regardless of which revision
//! sits underneath.
//!
//! The adapter does no validation of its own. Every error it returns was
//! raised by the backend or a flow solver and is handed back unchanged.

use std::collections::HashMap;
use std::fmt::Write;

use crate::backend::{Capabilities, DegreeLookup, FlowAlgorithm, GraphBackend, GraphError, NodeView};
use crate::flow;
use crate::model::Attributes;

type NodeFn<G, T> = fn(&G, <G as GraphBackend>::NodeId) -> Result<T, GraphError>;
type GraphFn<G, T> = fn(&G) -> Result<T, GraphError>;
type FlowFn<G> =
    fn(&G, <G as GraphBackend>::NodeId, <G as GraphBackend>::NodeId) -> Result<f64, GraphError>;

/// Stable graph queries bound to one backend type.
pub struct GraphCompat<G: GraphBackend> {
    capabilities: Capabilities,
    out_degree: NodeFn<G, usize>,
    in_degrees: GraphFn<G, Vec<(G::NodeId, usize)>>,
    max_flow: FlowFn<G>,
    node_listing: GraphFn<G, Vec<(G::NodeId, Attributes)>>,
}

impl<G: GraphBackend> GraphCompat<G> {
    /// Bind to the strategies `G` advertises.
    pub fn new() -> Self {
        Self::with_capabilities(G::capabilities())
    }

    /// Bind to an explicit set of strategies.
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        let out_degree: NodeFn<G, usize> = match capabilities.degree {
            DegreeLookup::Adjacency => out_degree_by_adjacency::<G>,
            DegreeLookup::EdgeScan => out_degree_by_edge_scan::<G>,
        };
        let in_degrees: GraphFn<G, Vec<(G::NodeId, usize)>> = match capabilities.degree {
            DegreeLookup::Adjacency => in_degrees_by_adjacency::<G>,
            DegreeLookup::EdgeScan => in_degrees_by_edge_scan::<G>,
        };
        let max_flow: FlowFn<G> = match capabilities.flow {
            FlowAlgorithm::MaximumFlowValue => flow::maximum_flow_value::<G>,
            FlowAlgorithm::LegacyMaxFlow => flow::legacy_max_flow::<G>,
        };
        let node_listing: GraphFn<G, Vec<(G::NodeId, Attributes)>> = match capabilities.node_view {
            NodeView::Indexed => nodes_by_lookup::<G>,
            NodeView::Paired => nodes_paired::<G>,
        };

        tracing::debug!(
            "Graph adapter bound for {:?}: degree={:?}, flow={:?}, nodes={:?}",
            capabilities.revision,
            capabilities.degree,
            capabilities.flow,
            capabilities.node_view
        );

        GraphCompat {
            capabilities,
            out_degree,
            in_degrees,
            max_flow,
            node_listing,
        }
    }

    /// Strategies this adapter was bound to.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Direct successors of `node`, in backend order.
    pub fn successors(&self, graph: &G, node: G::NodeId) -> Result<Vec<G::NodeId>, GraphError> {
        Ok(graph.successors(node)?.collect())
    }

    /// Direct predecessors of `node`, in backend order.
    pub fn predecessors(&self, graph: &G, node: G::NodeId) -> Result<Vec<G::NodeId>, GraphError> {
        Ok(graph.predecessors(node)?.collect())
    }

    /// Every edge as a `(source, target)` pair, in backend order.
    pub fn edge_list(&self, graph: &G) -> Vec<(G::NodeId, G::NodeId)> {
        graph.edges().collect()
    }

    /// Number of edges leaving `node`, parallel edges included.
    pub fn out_degree(&self, graph: &G, node: G::NodeId) -> Result<usize, GraphError> {
        (self.out_degree)(graph, node)
    }

    /// `(node, in-degree)` for every node, in node order.
    pub fn in_degrees(&self, graph: &G) -> Result<Vec<(G::NodeId, usize)>, GraphError> {
        (self.in_degrees)(graph)
    }

    /// Value of a maximum flow from `source` to `sink`, edge weights read as
    /// capacities.
    pub fn maximum_flow_value(
        &self,
        graph: &G,
        source: G::NodeId,
        sink: G::NodeId,
    ) -> Result<f64, GraphError> {
        (self.max_flow)(graph, source, sink)
    }

    /// Every node with its attributes, for logs: `[(id, {"key": "value"}), ...]`.
    pub fn str_nodes(&self, graph: &G) -> Result<String, GraphError> {
        let nodes = (self.node_listing)(graph)?;
        let mut out = String::from("[");
        for (i, (node, attrs)) in nodes.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            // Writing into a String cannot fail.
            let _ = write!(out, "({node}, {attrs:?})");
        }
        out.push(']');
        Ok(out)
    }
}

impl<G: GraphBackend> Default for GraphCompat<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GraphBackend> Clone for GraphCompat<G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: GraphBackend> Copy for GraphCompat<G> {}

impl<G: GraphBackend> std::fmt::Debug for GraphCompat<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphCompat")
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

fn out_degree_by_adjacency<G: GraphBackend>(graph: &G, node: G::NodeId) -> Result<usize, GraphError> {
    Ok(graph.successors(node)?.count())
}

fn out_degree_by_edge_scan<G: GraphBackend>(graph: &G, node: G::NodeId) -> Result<usize, GraphError> {
    graph.require_node(node)?;
    Ok(graph.edges().filter(|(source, _)| *source == node).count())
}

fn in_degrees_by_adjacency<G: GraphBackend>(graph: &G) -> Result<Vec<(G::NodeId, usize)>, GraphError> {
    graph
        .node_ids()
        .map(|node| -> Result<_, GraphError> { Ok((node, graph.predecessors(node)?.count())) })
        .collect()
}

fn in_degrees_by_edge_scan<G: GraphBackend>(graph: &G) -> Result<Vec<(G::NodeId, usize)>, GraphError> {
    let mut counts: HashMap<G::NodeId, usize> = HashMap::with_capacity(graph.node_count());
    for (_, target) in graph.edges() {
        *counts.entry(target).or_insert(0) += 1;
    }
    Ok(graph
        .node_ids()
        .map(|node| (node, counts.get(&node).copied().unwrap_or(0)))
        .collect())
}

fn nodes_by_lookup<G: GraphBackend>(graph: &G) -> Result<Vec<(G::NodeId, Attributes)>, GraphError> {
    graph
        .node_ids()
        .map(|node| -> Result<_, GraphError> { Ok((node, graph.node_attributes(node)?)) })
        .collect()
}

fn nodes_paired<G: GraphBackend>(graph: &G) -> Result<Vec<(G::NodeId, Attributes)>, GraphError> {
    Ok(graph.nodes_with_attributes().collect())
}
