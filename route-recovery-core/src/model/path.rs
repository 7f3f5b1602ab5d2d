use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::{
    Error, Meters, NodeId, RoadGraph, Seconds,
    model::{Channel, EdgeWeights},
};

/// Ordered node sequence through the road graph together with the edges
/// connecting consecutive nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidatePath {
    nodes: Vec<NodeIndex>,
    edges: Vec<EdgeIndex>,
}

impl CandidatePath {
    pub(crate) fn new(nodes: Vec<NodeIndex>, edges: Vec<EdgeIndex>) -> Self {
        debug_assert_eq!(nodes.len(), edges.len() + 1);
        Self { nodes, edges }
    }

    /// Build a path from node ids, resolving the edge between each pair.
    ///
    /// # Errors
    ///
    /// Fails if the sequence is empty, a node is unknown or two consecutive
    /// nodes are not connected.
    pub fn from_node_ids(graph: &RoadGraph, ids: &[NodeId]) -> Result<Self, Error> {
        if ids.is_empty() {
            return Err(Error::InvalidData("Empty node path".to_string()));
        }

        let nodes = ids
            .iter()
            .map(|&id| graph.node_index(id))
            .collect::<Result<Vec<_>, _>>()?;

        let edges = nodes
            .windows(2)
            .map(|pair| {
                graph.find_edge(pair[0], pair[1]).ok_or_else(|| {
                    Error::InvalidData(format!(
                        "No edge between {} and {}",
                        graph.node_id(pair[0]),
                        graph.node_id(pair[1])
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { nodes, edges })
    }

    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeIndex] {
        &self.edges
    }

    pub fn source(&self) -> NodeIndex {
        self.nodes[0]
    }

    pub fn target(&self) -> NodeIndex {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of nodes on the path
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn weight<W: EdgeWeights>(&self, graph: &RoadGraph, weights: &W) -> f64 {
        self.edges
            .iter()
            .map(|&edge| weights.weight(graph, edge))
            .sum()
    }

    pub fn duration(&self, graph: &RoadGraph) -> Seconds {
        self.weight(graph, &Channel::Duration)
    }

    pub fn length(&self, graph: &RoadGraph) -> Meters {
        self.weight(graph, &Channel::Distance)
    }

    pub fn node_ids(&self, graph: &RoadGraph) -> Vec<NodeId> {
        self.nodes.iter().map(|&node| graph.node_id(node)).collect()
    }

    /// Sub-path covering the nodes `start..end`
    pub fn subpath(&self, start: usize, end: usize) -> CandidatePath {
        CandidatePath {
            nodes: self.nodes[start..end].to_vec(),
            edges: self.edges[start..end - 1].to_vec(),
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<NodeIndex>, Vec<EdgeIndex>) {
        (self.nodes, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HighwayClass, RoadEdge};

    fn graph() -> RoadGraph {
        let mut graph = RoadGraph::new();
        graph.add_edge(10, 20, RoadEdge::new(100.0, 10.0, HighwayClass::Primary));
        graph.add_edge(20, 30, RoadEdge::new(200.0, 15.0, HighwayClass::Secondary));
        graph.add_edge(30, 40, RoadEdge::new(300.0, 20.0, HighwayClass::Tertiary));
        graph
    }

    #[test]
    fn path_from_ids_resolves_edges() {
        let graph = graph();
        let path = CandidatePath::from_node_ids(&graph, &[10, 20, 30]).unwrap();

        assert_eq!(path.edges().len(), 2);
        assert_eq!(path.duration(&graph), 25.0);
        assert_eq!(path.length(&graph), 300.0);
        assert_eq!(path.node_ids(&graph), vec![10, 20, 30]);
    }

    #[test]
    fn disconnected_ids_are_rejected() {
        let graph = graph();
        assert!(CandidatePath::from_node_ids(&graph, &[10, 30]).is_err());
        assert!(CandidatePath::from_node_ids(&graph, &[10, 99]).is_err());
        assert!(CandidatePath::from_node_ids(&graph, &[]).is_err());
    }

    #[test]
    fn subpath_keeps_matching_edges() {
        let graph = graph();
        let path = CandidatePath::from_node_ids(&graph, &[10, 20, 30, 40]).unwrap();
        let middle = path.subpath(1, 3);

        assert_eq!(middle.node_ids(&graph), vec![20, 30]);
        assert_eq!(middle.duration(&graph), 15.0);
    }
}
