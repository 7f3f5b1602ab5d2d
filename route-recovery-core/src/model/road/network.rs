use hashbrown::HashMap;
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, EdgeReference, NodeIndex},
};

use super::components::{RoadEdge, RoadNode};
use crate::{
    Error, NodeId, Seconds,
    model::{CandidatePath, EdgeWeights},
    routing::dijkstra,
};

/// Directed road graph.
///
/// Nodes are addressed by their source identifiers from the outside and by
/// petgraph indices internally. Parallel edges are collapsed to the faster
/// one and self-loops are rejected, so an ordered node pair identifies at
/// most one edge.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    pub(crate) graph: DiGraph<RoadNode, RoadEdge>,
    node_lookup: HashMap<NodeId, NodeIndex>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning the existing index if the id is already known
    pub fn add_node(&mut self, id: NodeId) -> NodeIndex {
        if let Some(&index) = self.node_lookup.get(&id) {
            return index;
        }
        let index = self.graph.add_node(RoadNode { id });
        self.node_lookup.insert(id, index);
        index
    }

    /// Add a directed edge between two node ids.
    ///
    /// Returns `None` for self-loops. When the edge already exists the one
    /// with the lower duration is kept.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, edge: RoadEdge) -> Option<EdgeIndex> {
        if from == to {
            log::trace!("Dropping self-loop at node {from}");
            return None;
        }
        let a = self.add_node(from);
        let b = self.add_node(to);

        if let Some(existing) = self.graph.find_edge(a, b) {
            if edge.duration < self.graph[existing].duration {
                self.graph[existing] = edge;
            }
            return Some(existing);
        }
        Some(self.graph.add_edge(a, b, edge))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Resolve a source node id to its graph index
    pub fn node_index(&self, id: NodeId) -> Result<NodeIndex, Error> {
        self.node_lookup
            .get(&id)
            .copied()
            .ok_or(Error::UnknownNode(id))
    }

    pub fn node_id(&self, index: NodeIndex) -> NodeId {
        self.graph[index].id
    }

    pub fn edge(&self, edge: EdgeIndex) -> &RoadEdge {
        &self.graph[edge]
    }

    pub fn edge_endpoints(&self, edge: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(edge)
    }

    pub fn find_edge(&self, from: NodeIndex, to: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(from, to)
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    /// Edges leaving (`Outgoing`) or entering (`Incoming`) a node
    pub fn edges_directed(
        &self,
        node: NodeIndex,
        direction: Direction,
    ) -> impl Iterator<Item = EdgeReference<'_, RoadEdge>> {
        self.graph.edges_directed(node, direction)
    }

    /// Shortest path between two nodes under the given weights
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPath`] when `to` is unreachable from `from`.
    pub fn shortest_path<W: EdgeWeights>(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        weights: &W,
    ) -> Result<CandidatePath, Error> {
        dijkstra::shortest_path(self, from, to, weights)
            .map(|(_, path)| path)
            .ok_or_else(|| Error::NoPath {
                from: self.node_id(from),
                to: self.node_id(to),
            })
    }

    /// Total weight of a path under the given weights
    pub fn path_weight<W: EdgeWeights>(&self, path: &CandidatePath, weights: &W) -> Seconds {
        path.weight(self, weights)
    }
}
