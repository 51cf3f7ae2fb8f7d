//! Phylo Graph: graph backends, max-flow solvers and the compatibility adapter

pub mod backend;
pub mod compat;
pub mod flow;
pub mod model;


#[cfg(test)]
pub mod test_utils;

pub use backend::{
    Capabilities, DegreeLookup, FlowAlgorithm, GraphBackend, GraphError, Lazy, MapGraph, NodeView,
    Revision, StableGraph,
};
pub use compat::GraphCompat;
pub use model::{
    Attributes, CAPACITY_KEY, DocumentEdge, EdgeCapacity, EdgeId, GraphDocument, NodeAttributes,
    NodeId,
};
