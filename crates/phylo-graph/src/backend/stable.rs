//! Backend over petgraph::StableDiGraph with custom NodeId/EdgeId

use std::collections::BTreeMap;

use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};

use super::{
    Capabilities, DegreeLookup, FlowAlgorithm, GraphBackend, GraphError, Lazy, NodeView, Revision,
};
use crate::model::{Attributes, EdgeCapacity, EdgeId, GraphDocument, NodeAttributes, NodeId};

/// A directed multigraph with stable node/edge indices.
///
/// Removing a node or edge never renumbers the others, so a [`NodeId`] stays
/// valid for as long as its node exists.
pub struct StableGraph<N = Attributes, E = f64> {
    inner: StableDiGraph<N, E>,
}

impl<N, E> std::fmt::Debug for StableGraph<N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StableGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

fn node_index(id: NodeId) -> Option<NodeIndex> {
    u32::try_from(id.0).ok().map(|i| NodeIndex::new(i as usize))
}

fn edge_index(id: EdgeId) -> Option<EdgeIndex> {
    u32::try_from(id.0).ok().map(|i| EdgeIndex::new(i as usize))
}

fn node_id(idx: NodeIndex) -> NodeId {
    NodeId(idx.index() as u64)
}

impl<N, E> StableGraph<N, E> {
    pub fn new() -> Self {
        StableGraph {
            inner: StableDiGraph::new(),
        }
    }

    /// Add a node to the graph. Returns its assigned NodeId.
    pub fn add_node(&mut self, weight: N) -> NodeId {
        node_id(self.inner.add_node(weight))
    }

    /// Add an edge between two existing nodes. Parallel edges are kept.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: E) -> Result<EdgeId, GraphError> {
        let a = self.checked_index(source)?;
        let b = self.checked_index(target)?;
        let idx = self.inner.add_edge(a, b, weight);
        Ok(EdgeId(idx.index() as u64))
    }

    /// Get a node's weight by ID.
    pub fn node(&self, id: NodeId) -> Option<&N> {
        node_index(id).and_then(|idx| self.inner.node_weight(idx))
    }

    /// Get a mutable node weight by ID.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        node_index(id).and_then(|idx| self.inner.node_weight_mut(idx))
    }

    /// Get an edge's weight by ID.
    pub fn edge(&self, id: EdgeId) -> Option<&E> {
        edge_index(id).and_then(|idx| self.inner.edge_weight(idx))
    }

    /// First edge from `source` to `target`, if any.
    pub fn find_edge(&self, source: NodeId, target: NodeId) -> Option<EdgeId> {
        let a = node_index(source)?;
        let b = node_index(target)?;
        self.inner
            .find_edge(a, b)
            .map(|idx| EdgeId(idx.index() as u64))
    }

    /// Remove a node and all its edges.
    pub fn remove_node(&mut self, id: NodeId) -> Option<N> {
        node_index(id).and_then(|idx| self.inner.remove_node(idx))
    }

    /// Remove an edge by ID.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<E> {
        edge_index(id).and_then(|idx| self.inner.remove_edge(idx))
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    fn checked_index(&self, id: NodeId) -> Result<NodeIndex, GraphError> {
        node_index(id)
            .filter(|&idx| self.inner.contains_node(idx))
            .ok_or_else(|| GraphError::node_not_found(id))
    }

    fn neighbors(&self, id: NodeId, direction: Direction) -> Result<Lazy<'_, NodeId>, GraphError> {
        let idx = self.checked_index(id)?;
        Ok(Box::new(
            self.inner.neighbors_directed(idx, direction).map(node_id),
        ))
    }
}

impl<N: NodeAttributes, E> StableGraph<N, E> {
    /// Find the first node whose attribute `key` equals `value`.
    pub fn find_node_by_attribute(&self, key: &str, value: &str) -> Option<NodeId> {
        self.inner
            .node_indices()
            .find(|&idx| {
                self.inner
                    .node_weight(idx)
                    .is_some_and(|n| n.attributes().get(key).is_some_and(|v| v == value))
            })
            .map(node_id)
    }
}

impl StableGraph<Attributes, Option<f64>> {
    /// Build a graph from its JSON interchange form.
    ///
    /// Returns the graph and the id assigned to every node name.
    pub fn from_document(doc: &GraphDocument) -> (Self, BTreeMap<String, NodeId>) {
        let mut graph = StableGraph::new();
        let mut names = BTreeMap::new();

        for (name, attrs) in &doc.nodes {
            names.insert(name.clone(), graph.add_node(attrs.clone()));
        }

        for edge in &doc.edges {
            let (from, to) = edge.endpoints();
            let mut id_of = |name: &str| {
                *names
                    .entry(name.to_string())
                    .or_insert_with(|| graph.add_node(Attributes::new()))
            };
            let source = id_of(from);
            let target = id_of(to);
            // Both endpoints were inserted just above.
            if let Err(e) = graph.add_edge(source, target, edge.capacity()) {
                tracing::warn!("Skipping edge {} -> {}: {}", from, to, e);
            }
        }

        tracing::debug!(
            "Loaded graph document: {} nodes, {} edges",
            graph.inner.node_count(),
            graph.inner.edge_count()
        );
        (graph, names)
    }
}

impl<N, E> Default for StableGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeAttributes, E: EdgeCapacity> GraphBackend for StableGraph<N, E> {
    type NodeId = NodeId;

    fn capabilities() -> Capabilities {
        Capabilities {
            revision: Revision::StableIndex,
            degree: DegreeLookup::Adjacency,
            flow: FlowAlgorithm::MaximumFlowValue,
            node_view: NodeView::Indexed,
        }
    }

    fn contains_node(&self, node: NodeId) -> bool {
        node_index(node).is_some_and(|idx| self.inner.contains_node(idx))
    }

    fn node_ids(&self) -> Lazy<'_, NodeId> {
        Box::new(self.inner.node_indices().map(node_id))
    }

    fn nodes_with_attributes(&self) -> Lazy<'_, (NodeId, Attributes)> {
        Box::new(self.inner.node_indices().filter_map(move |idx| {
            self.inner
                .node_weight(idx)
                .map(|weight| (node_id(idx), weight.attributes()))
        }))
    }

    fn node_attributes(&self, node: NodeId) -> Result<Attributes, GraphError> {
        self.node(node)
            .map(NodeAttributes::attributes)
            .ok_or_else(|| GraphError::node_not_found(node))
    }

    fn successors(&self, node: NodeId) -> Result<Lazy<'_, NodeId>, GraphError> {
        self.neighbors(node, Direction::Outgoing)
    }

    fn predecessors(&self, node: NodeId) -> Result<Lazy<'_, NodeId>, GraphError> {
        self.neighbors(node, Direction::Incoming)
    }

    fn edges(&self) -> Lazy<'_, (NodeId, NodeId)> {
        Box::new(
            self.inner
                .edge_indices()
                .filter_map(move |idx| self.inner.edge_endpoints(idx))
                .map(|(a, b)| (node_id(a), node_id(b))),
        )
    }

    fn capacitated_edges(&self) -> Lazy<'_, (NodeId, NodeId, Option<f64>)> {
        Box::new(self.inner.edge_indices().filter_map(move |idx| {
            let (a, b) = self.inner.edge_endpoints(idx)?;
            let weight = self.inner.edge_weight(idx)?;
            Some((node_id(a), node_id(b), weight.capacity()))
        }))
    }

    fn node_count(&self) -> usize {
        self.inner.node_count()
    }
}
