use std::collections::BinaryHeap;

use hashbrown::{HashMap, hash_map::Entry};
use petgraph::{
    Direction,
    graph::{EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use super::state::State;
use crate::{CandidatePath, RoadGraph, Seconds, model::EdgeWeights};

/// Shortest path tree rooted at one node.
///
/// For an `Incoming` tree the edges are followed backwards, so the cost of a
/// node is the cost of travelling from that node to the root.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    root: NodeIndex,
    direction: Direction,
    costs: HashMap<NodeIndex, Seconds>,
    predecessors: HashMap<NodeIndex, EdgeIndex>,
}

impl ShortestPathTree {
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.costs.contains_key(&node)
    }

    pub fn cost(&self, node: NodeIndex) -> Option<Seconds> {
        self.costs.get(&node).copied()
    }

    /// Nodes reached by the search, in no particular order
    pub fn reached(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.costs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Node sequence from the root to `node` in search order.
    ///
    /// For an `Incoming` tree this is the reverse of the driving direction:
    /// it starts at the root and ends at `node`.
    pub fn nodes_to(&self, graph: &RoadGraph, node: NodeIndex) -> Option<Vec<NodeIndex>> {
        self.walk_to(graph, node).map(|(nodes, _)| nodes)
    }

    /// Driving-direction path between the root and `node`
    pub fn path_to(&self, graph: &RoadGraph, node: NodeIndex) -> Option<CandidatePath> {
        let (mut nodes, mut edges) = self.walk_to(graph, node)?;
        if self.direction == Direction::Incoming {
            nodes.reverse();
            edges.reverse();
        }
        Some(CandidatePath::new(nodes, edges))
    }

    fn walk_to(
        &self,
        graph: &RoadGraph,
        node: NodeIndex,
    ) -> Option<(Vec<NodeIndex>, Vec<EdgeIndex>)> {
        if !self.contains(node) {
            return None;
        }

        let mut nodes = vec![node];
        let mut edges = Vec::new();
        let mut current = node;
        while current != self.root {
            let edge = *self.predecessors.get(&current)?;
            let (from, to) = graph.edge_endpoints(edge)?;
            let previous = match self.direction {
                Direction::Outgoing => from,
                Direction::Incoming => to,
            };
            edges.push(edge);
            nodes.push(previous);
            current = previous;
        }
        nodes.reverse();
        edges.reverse();
        Some((nodes, edges))
    }
}

/// Dijkstra's algorithm from a single root over the whole graph.
/// Nodes whose cost would exceed `max_cost` are not settled.
pub fn dijkstra_tree<W: EdgeWeights>(
    graph: &RoadGraph,
    root: NodeIndex,
    direction: Direction,
    weights: &W,
    max_cost: Option<Seconds>,
) -> ShortestPathTree {
    let estimated_nodes = graph.node_count().min(1000);
    let mut costs: HashMap<NodeIndex, Seconds> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, EdgeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    heap.push(State {
        cost: 0.0,
        node: root,
    });
    costs.insert(root, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        if let Some(&best) = costs.get(&node) {
            if cost > best {
                continue;
            }
        }

        for edge in graph.edges_directed(node, direction) {
            let next = match direction {
                Direction::Outgoing => edge.target(),
                Direction::Incoming => edge.source(),
            };
            let next_cost = cost + weights.weight(graph, edge.id());
            if max_cost.is_some_and(|max| next_cost > max) {
                continue;
            }

            match costs.entry(next) {
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

    ShortestPathTree {
        root,
        direction,
        costs,
        predecessors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Channel, HighwayClass, RoadEdge};

    fn line() -> RoadGraph {
        let mut graph = RoadGraph::new();
        for (from, to) in [(1, 2), (2, 3), (3, 4)] {
            graph.add_edge(from, to, RoadEdge::new(10.0, 10.0, HighwayClass::Primary));
        }
        graph
    }

    #[test]
    fn forward_tree_respects_cutoff() {
        let graph = line();
        let root = graph.node_index(1).unwrap();
        let tree = dijkstra_tree(
            &graph,
            root,
            Direction::Outgoing,
            &Channel::Duration,
            Some(20.0),
        );

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.cost(graph.node_index(3).unwrap()), Some(20.0));
        assert!(!tree.contains(graph.node_index(4).unwrap()));
    }

    #[test]
    fn reverse_tree_follows_incoming_edges() {
        let graph = line();
        let root = graph.node_index(4).unwrap();
        let tree = dijkstra_tree(&graph, root, Direction::Incoming, &Channel::Duration, None);
        let one = graph.node_index(1).unwrap();

        assert_eq!(tree.cost(one), Some(30.0));

        let search_order: Vec<i64> = tree
            .nodes_to(&graph, one)
            .unwrap()
            .into_iter()
            .map(|n| graph.node_id(n))
            .collect();
        assert_eq!(search_order, vec![4, 3, 2, 1]);

        let path = tree.path_to(&graph, one).unwrap();
        assert_eq!(path.node_ids(&graph), vec![1, 2, 3, 4]);
        assert_eq!(path.duration(&graph), 30.0);
    }
}
