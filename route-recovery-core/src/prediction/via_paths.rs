//! Via-node path enumeration.
//!
//! Two duration-bounded shortest path trees, one forward from the source
//! and one backward from the target, meet at every node both reach. Each
//! such via node yields the path that runs through it along both trees.

use itertools::Itertools;
use log::debug;
use petgraph::{Direction, graph::NodeIndex};
use serde::{Deserialize, Serialize};

use crate::{
    CandidatePath, Channel, Error, NodeId, RoadGraph, Seconds, Trip, routing::dijkstra_tree,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViaPathsConfig {
    /// Fraction of the observed duration a via path may exceed it by
    pub duration_upper_bound: f64,
}

impl Default for ViaPathsConfig {
    fn default() -> Self {
        Self {
            duration_upper_bound: 0.1,
        }
    }
}

/// Distinct path together with every via node that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ViaPath {
    pub path: CandidatePath,
    pub via_nodes: Vec<NodeId>,
}

/// All via-node paths between two nodes lasting at most `upper`.
///
/// Results are ordered by node sequence; via nodes within a result are sorted.
pub fn via_node_paths(
    graph: &RoadGraph,
    source: NodeIndex,
    target: NodeIndex,
    upper: Seconds,
) -> Vec<ViaPath> {
    if upper < 0.0 {
        return Vec::new();
    }

    let weights = Channel::Duration;
    let forward = dijkstra_tree(graph, source, Direction::Outgoing, &weights, Some(upper));
    let backward = dijkstra_tree(graph, target, Direction::Incoming, &weights, Some(upper));
    debug!(
        "Via search: {} nodes forward, {} nodes backward",
        forward.len(),
        backward.len()
    );

    let mut joined: Vec<(Vec<NodeId>, NodeId, CandidatePath)> = forward
        .reached()
        .filter(|&node| backward.contains(node))
        .filter_map(|via| {
            let head = forward.path_to(graph, via)?;
            let tail = backward.path_to(graph, via)?;
            let path = join(head, tail);
            (path.duration(graph) <= upper)
                .then(|| (path.node_ids(graph), graph.node_id(via), path))
        })
        .collect();
    joined.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    joined
        .into_iter()
        .chunk_by(|(ids, _, _)| ids.clone())
        .into_iter()
        .filter_map(|(_, group)| {
            let mut group = group.peekable();
            let path = group.peek().map(|(_, _, path)| path.clone())?;
            let via_nodes = group.map(|(_, via, _)| via).collect();
            Some(ViaPath { path, via_nodes })
        })
        .collect()
}

/// `head` ends where `tail` starts
fn join(head: CandidatePath, tail: CandidatePath) -> CandidatePath {
    let (mut nodes, mut edges) = head.into_parts();
    let (tail_nodes, tail_edges) = tail.into_parts();
    nodes.extend(tail_nodes.into_iter().skip(1));
    edges.extend(tail_edges);
    CandidatePath::new(nodes, edges)
}

/// Via-node predictor for a single trip
///
/// # Errors
///
/// Fails if an endpoint is unknown.
pub fn via_paths(
    graph: &RoadGraph,
    trip: &Trip,
    config: &ViaPathsConfig,
) -> Result<Vec<ViaPath>, Error> {
    let source = graph.node_index(trip.source)?;
    let target = graph.node_index(trip.target)?;
    let upper = trip.observed_duration * (1.0 + config.duration_upper_bound);
    Ok(via_node_paths(graph, source, target, upper))
}
