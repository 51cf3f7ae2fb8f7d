//! Core data structures shared by every graph backend

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute mapping attached to a node.
pub type Attributes = BTreeMap<String, String>;

/// Stable identifier for a node of a [`crate::StableGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier for an edge of a [`crate::StableGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct EdgeId(pub u64);

/// Node weights that can describe themselves as an attribute mapping.
pub trait NodeAttributes {
    fn attributes(&self) -> Attributes;
}

impl NodeAttributes for Attributes {
    fn attributes(&self) -> Attributes {
        self.clone()
    }
}

impl NodeAttributes for HashMap<String, String> {
    fn attributes(&self) -> Attributes {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl NodeAttributes for () {
    fn attributes(&self) -> Attributes {
        Attributes::new()
    }
}

/// Edge weights that carry a flow capacity.
///
/// `None` is an unbounded edge, which is how a graph without a `capacity`
/// attribute on an edge is treated by the flow solvers.
pub trait EdgeCapacity {
    fn capacity(&self) -> Option<f64>;
}

impl EdgeCapacity for f64 {
    fn capacity(&self) -> Option<f64> {
        Some(*self)
    }
}

impl EdgeCapacity for f32 {
    fn capacity(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl EdgeCapacity for u32 {
    fn capacity(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl EdgeCapacity for u64 {
    fn capacity(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl EdgeCapacity for usize {
    fn capacity(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl EdgeCapacity for () {
    fn capacity(&self) -> Option<f64> {
        None
    }
}

impl<T: EdgeCapacity> EdgeCapacity for Option<T> {
    fn capacity(&self) -> Option<f64> {
        self.as_ref().and_then(EdgeCapacity::capacity)
    }
}

/// Edge attribute maps read their capacity from the `capacity` key.
impl EdgeCapacity for Attributes {
    fn capacity(&self) -> Option<f64> {
        self.get(CAPACITY_KEY).and_then(|v| v.parse().ok())
    }
}

/// Attribute key holding an edge's capacity.
pub const CAPACITY_KEY: &str = "capacity";

/// JSON interchange form of a directed graph.
///
/// ```json
/// { "nodes": { "a": { "label": "root" }, "b": {} },
///   "edges": [["a", "b", 3.0], ["b", "a", null]] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphDocument {
    /// Node name to its attributes. Nodes that only appear in `edges` are
    /// added with no attributes.
    #[serde(default)]
    pub nodes: BTreeMap<String, Attributes>,
    /// `(from, to, capacity)`; a missing or null capacity is unbounded.
    #[serde(default)]
    pub edges: Vec<DocumentEdge>,
}

/// One edge of a [`GraphDocument`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DocumentEdge {
    Weighted(String, String, Option<f64>),
    Plain(String, String),
}

impl DocumentEdge {
    pub fn endpoints(&self) -> (&str, &str) {
        match self {
            DocumentEdge::Weighted(from, to, _) | DocumentEdge::Plain(from, to) => (from, to),
        }
    }

    pub fn capacity(&self) -> Option<f64> {
        match self {
            DocumentEdge::Weighted(_, _, capacity) => *capacity,
            DocumentEdge::Plain(..) => None,
        }
    }
}

impl GraphDocument {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
