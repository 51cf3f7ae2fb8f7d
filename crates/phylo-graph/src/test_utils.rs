//! Test fixtures for phylo-graph

use crate::backend::{MapGraph, StableGraph};
use crate::model::{Attributes, NodeId};

/// Build an attribute map from literal pairs.
pub fn attrs(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Small labelled DAG: a -> b, a -> c, b -> c, c -> d.
///
/// Returns the graph and the ids of a, b, c, d in that order.
pub fn diamond_stable() -> (StableGraph<Attributes, f64>, [NodeId; 4]) {
    let mut graph = StableGraph::new();
    let a = graph.add_node(attrs(&[("label", "a")]));
    let b = graph.add_node(attrs(&[("label", "b")]));
    let c = graph.add_node(attrs(&[("label", "c")]));
    let d = graph.add_node(attrs(&[("label", "d")]));

    graph.add_edge(a, b, 1.0).unwrap();
    graph.add_edge(a, c, 1.0).unwrap();
    graph.add_edge(b, c, 1.0).unwrap();
    graph.add_edge(c, d, 1.0).unwrap();

    (graph, [a, b, c, d])
}

/// Same shape as [`diamond_stable`], addressed by name.
pub fn diamond_map() -> MapGraph<&'static str, f64> {
    let mut graph = MapGraph::new();
    for name in ["a", "b", "c", "d"] {
        graph.add_node_with(name, attrs(&[("label", name)]));
    }
    graph.add_edge("a", "b", 1.0);
    graph.add_edge("a", "c", 1.0);
    graph.add_edge("b", "c", 1.0);
    graph.add_edge("c", "d", 1.0);
    graph
}

/// Capacities of the textbook network whose maximum s -> t flow is 23.
pub const CLASSIC_NETWORK: &[(&str, &str, f64)] = &[
    ("s", "v1", 16.0),
    ("s", "v2", 13.0),
    ("v1", "v3", 12.0),
    ("v2", "v1", 4.0),
    ("v2", "v4", 14.0),
    ("v3", "v2", 9.0),
    ("v3", "t", 20.0),
    ("v4", "v3", 7.0),
    ("v4", "t", 4.0),
];

pub fn classic_network_map() -> MapGraph<&'static str, f64> {
    let mut graph = MapGraph::new();
    for &(from, to, capacity) in CLASSIC_NETWORK {
        graph.add_edge(from, to, capacity);
    }
    graph
}

/// The classic network as a stable graph, with the ids of `s` and `t`.
pub fn classic_network_stable() -> (StableGraph<Attributes, f64>, NodeId, NodeId) {
    let mut graph = StableGraph::new();
    let mut ids = std::collections::HashMap::new();
    for name in ["s", "v1", "v2", "v3", "v4", "t"] {
        ids.insert(name, graph.add_node(attrs(&[("name", name)])));
    }
    for &(from, to, capacity) in CLASSIC_NETWORK {
        graph.add_edge(ids[from], ids[to], capacity).unwrap();
    }
    (graph, ids["s"], ids["t"])
}
