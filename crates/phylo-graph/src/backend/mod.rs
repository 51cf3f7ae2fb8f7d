//! Graph backends: the raw, revision-specific graph surfaces the adapter sits on

pub mod map;
pub mod stable;

use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::model::Attributes;

pub use map::MapGraph;
pub use stable::StableGraph;

/// Lazy, single-use sequence borrowed from a graph.
pub type Lazy<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// Errors raised by graph backends and the flow solvers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("node {0} is not in the graph")]
    NodeNotFound(String),

    #[error("source and sink are the same node: {0}")]
    SourceIsSink(String),

    #[error("infinite capacity path from {from} to {to}, flow is unbounded")]
    Unbounded { from: String, to: String },
}

impl GraphError {
    pub fn node_not_found(node: impl Display) -> Self {
        GraphError::NodeNotFound(node.to_string())
    }
}

/// Which backend family a graph belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Revision {
    /// Index-addressed multigraph with stable indices across removals.
    StableIndex,
    /// Value-addressed simple digraph.
    GraphMap,
}

/// How a revision answers out-degree queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegreeLookup {
    /// Count the node's adjacency list.
    Adjacency,
    /// Count edges whose source is the node.
    EdgeScan,
}

/// Which max-flow entry point a revision offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowAlgorithm {
    /// Flow value summed from the solver's per-edge flows.
    LegacyMaxFlow,
    /// Flow value as the solver reports it.
    MaximumFlowValue,
}

/// How a revision lists nodes together with their attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeView {
    /// List ids, then look each node's attributes up.
    Indexed,
    /// Iterate `(id, attributes)` pairs directly.
    Paired,
}

/// Entry points offered by a backend revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    pub revision: Revision,
    pub degree: DegreeLookup,
    pub flow: FlowAlgorithm,
    pub node_view: NodeView,
}

/// Primitive query surface of a directed graph.
///
/// Sequences come back lazy and tied to the borrow of the graph. Callers that
/// need an owned, reusable result go through [`crate::GraphCompat`].
pub trait GraphBackend {
    type NodeId: Copy + Eq + Hash + Debug + Display;

    /// Entry points this backend type offers.
    fn capabilities() -> Capabilities;

    fn contains_node(&self, node: Self::NodeId) -> bool;

    /// Fails with [`GraphError::NodeNotFound`] when `node` is absent.
    fn require_node(&self, node: Self::NodeId) -> Result<(), GraphError> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(GraphError::node_not_found(node))
        }
    }

    fn node_ids(&self) -> Lazy<'_, Self::NodeId>;

    fn nodes_with_attributes(&self) -> Lazy<'_, (Self::NodeId, Attributes)>;

    fn node_attributes(&self, node: Self::NodeId) -> Result<Attributes, GraphError>;

    fn successors(&self, node: Self::NodeId) -> Result<Lazy<'_, Self::NodeId>, GraphError>;

    fn predecessors(&self, node: Self::NodeId) -> Result<Lazy<'_, Self::NodeId>, GraphError>;

    fn edges(&self) -> Lazy<'_, (Self::NodeId, Self::NodeId)>;

    /// Edges with their capacity, `None` meaning unbounded.
    fn capacitated_edges(&self) -> Lazy<'_, (Self::NodeId, Self::NodeId, Option<f64>)>;

    fn node_count(&self) -> usize;
}
