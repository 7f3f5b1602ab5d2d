use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::{HashMap, hash_map::Entry};
use petgraph::{
    Direction,
    graph::{EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use super::state::State;
use crate::{CandidatePath, RoadGraph, Seconds, model::EdgeWeights};

/// Nodes and edges hidden from a search
#[derive(Debug, Clone)]
pub struct Exclusions {
    nodes: FixedBitSet,
    edges: FixedBitSet,
}

impl Exclusions {
    pub fn new(graph: &RoadGraph) -> Self {
        Self {
            nodes: FixedBitSet::with_capacity(graph.node_count()),
            edges: FixedBitSet::with_capacity(graph.edge_count()),
        }
    }

    pub fn exclude_node(&mut self, node: NodeIndex) {
        self.nodes.insert(node.index());
    }

    pub fn exclude_edge(&mut self, edge: EdgeIndex) {
        self.edges.insert(edge.index());
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    fn allows(&self, edge: EdgeIndex, next: NodeIndex) -> bool {
        !self.edges.contains(edge.index()) && !self.nodes.contains(next.index())
    }
}

/// Dijkstra's algorithm between two nodes.
/// Returns the cost and path, or `None` if the target is unreachable.
pub fn shortest_path<W: EdgeWeights>(
    graph: &RoadGraph,
    start: NodeIndex,
    target: NodeIndex,
    weights: &W,
) -> Option<(Seconds, CandidatePath)> {
    shortest_path_excluding(graph, start, target, weights, None)
}

/// Dijkstra's algorithm between two nodes, ignoring excluded nodes and edges
pub fn shortest_path_excluding<W: EdgeWeights>(
    graph: &RoadGraph,
    start: NodeIndex,
    target: NodeIndex,
    weights: &W,
    exclusions: Option<&Exclusions>,
) -> Option<(Seconds, CandidatePath)> {
    let mut distances: HashMap<NodeIndex, f64> = HashMap::new();
    let mut predecessors: HashMap<NodeIndex, EdgeIndex> = HashMap::new();
    let mut heap = BinaryHeap::new();

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    let mut reached = false;
    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            reached = true;
            break;
        }

        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node) {
            if cost > best {
                continue;
            }
        }

        for edge in graph.edges_directed(node, Direction::Outgoing) {
            let next = edge.target();
            if let Some(exclusions) = exclusions {
                if !exclusions.allows(edge.id(), next) {
                    continue;
                }
            }
            let next_cost = cost + weights.weight(graph, edge.id());

            match distances.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, edge.id());
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, edge.id());
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    if !reached {
        return None;
    }

    // Follow predecessors backward from target to start
    let mut nodes = vec![target];
    let mut edges = Vec::new();
    let mut current = target;
    while current != start {
        let edge = *predecessors.get(&current)?;
        let (from, _) = graph.edge_endpoints(edge)?;
        edges.push(edge);
        nodes.push(from);
        current = from;
    }
    nodes.reverse();
    edges.reverse();

    let cost = *distances.get(&target)?;
    Some((cost, CandidatePath::new(nodes, edges)))
}
