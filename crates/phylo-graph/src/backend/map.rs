//! Backend over petgraph::graphmap::DiGraphMap, addressed by node value

use std::collections::HashMap;
use std::fmt::{Debug, Display};

use petgraph::Direction;
use petgraph::graphmap::{DiGraphMap, NodeTrait};

use super::{
    Capabilities, DegreeLookup, FlowAlgorithm, GraphBackend, GraphError, Lazy, NodeView, Revision,
};
use crate::model::{Attributes, EdgeCapacity};

/// A simple directed graph whose nodes are their own identifiers.
///
/// At most one edge exists per ordered node pair; adding it again replaces
/// its weight. Node attributes live in a side table.
pub struct MapGraph<N: NodeTrait, E = f64> {
    inner: DiGraphMap<N, E>,
    attributes: HashMap<N, Attributes>,
}

impl<N: NodeTrait, E> std::fmt::Debug for MapGraph<N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl<N: NodeTrait, E> MapGraph<N, E> {
    pub fn new() -> Self {
        MapGraph {
            inner: DiGraphMap::new(),
            attributes: HashMap::new(),
        }
    }

    /// Add a node with no attributes. Adding an existing node is a no-op.
    pub fn add_node(&mut self, node: N) -> N {
        self.inner.add_node(node)
    }

    /// Add a node, merging `attrs` into any attributes it already has.
    pub fn add_node_with(&mut self, node: N, attrs: Attributes) -> N {
        self.inner.add_node(node);
        self.attributes.entry(node).or_default().extend(attrs);
        node
    }

    /// Set one attribute on an existing node.
    pub fn set_attribute(
        &mut self,
        node: N,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), GraphError>
    where
        N: Display,
    {
        if !self.inner.contains_node(node) {
            return Err(GraphError::node_not_found(node));
        }
        self.attributes
            .entry(node)
            .or_default()
            .insert(key.into(), value.into());
        Ok(())
    }

    /// Add an edge, inserting missing endpoints. Returns the replaced weight.
    pub fn add_edge(&mut self, source: N, target: N, weight: E) -> Option<E> {
        self.inner.add_edge(source, target, weight)
    }

    pub fn edge_weight(&self, source: N, target: N) -> Option<&E> {
        self.inner.edge_weight(source, target)
    }

    pub fn remove_edge(&mut self, source: N, target: N) -> Option<E> {
        self.inner.remove_edge(source, target)
    }

    /// Remove a node, its edges and its attributes.
    pub fn remove_node(&mut self, node: N) -> bool {
        self.attributes.remove(&node);
        self.inner.remove_node(node)
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    fn attributes_of(&self, node: N) -> Attributes {
        self.attributes.get(&node).cloned().unwrap_or_default()
    }
}

impl<N: NodeTrait, E> Default for MapGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> GraphBackend for MapGraph<N, E>
where
    N: NodeTrait + Debug + Display,
    E: EdgeCapacity,
{
    type NodeId = N;

    fn capabilities() -> Capabilities {
        Capabilities {
            revision: Revision::GraphMap,
            degree: DegreeLookup::EdgeScan,
            flow: FlowAlgorithm::LegacyMaxFlow,
            node_view: NodeView::Paired,
        }
    }

    fn contains_node(&self, node: N) -> bool {
        self.inner.contains_node(node)
    }

    fn node_ids(&self) -> Lazy<'_, N> {
        Box::new(self.inner.nodes())
    }

    fn nodes_with_attributes(&self) -> Lazy<'_, (N, Attributes)> {
        Box::new(
            self.inner
                .nodes()
                .map(move |node| (node, self.attributes_of(node))),
        )
    }

    fn node_attributes(&self, node: N) -> Result<Attributes, GraphError> {
        self.require_node(node)?;
        Ok(self.attributes_of(node))
    }

    fn successors(&self, node: N) -> Result<Lazy<'_, N>, GraphError> {
        self.require_node(node)?;
        Ok(Box::new(
            self.inner.neighbors_directed(node, Direction::Outgoing),
        ))
    }

    fn predecessors(&self, node: N) -> Result<Lazy<'_, N>, GraphError> {
        self.require_node(node)?;
        Ok(Box::new(
            self.inner.neighbors_directed(node, Direction::Incoming),
        ))
    }

    fn edges(&self) -> Lazy<'_, (N, N)> {
        Box::new(self.inner.all_edges().map(|(a, b, _)| (a, b)))
    }

    fn capacitated_edges(&self) -> Lazy<'_, (N, N, Option<f64>)> {
        Box::new(
            self.inner
                .all_edges()
                .map(|(a, b, weight)| (a, b, weight.capacity())),
        )
    }

    fn node_count(&self) -> usize {
        self.inner.node_count()
    }
}
