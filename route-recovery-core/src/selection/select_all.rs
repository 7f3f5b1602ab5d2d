use super::SelectionResult;
use crate::CandidatePath;

/// Union of all candidates; never counts as a replacement
pub fn select_all(candidates: &[CandidatePath]) -> SelectionResult {
    let mut result = SelectionResult::default();
    for path in candidates {
        result.add_path(path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        RoadGraph,
        model::{HighwayClass, RoadEdge},
    };

    #[test]
    fn union_of_every_candidate() {
        let mut graph = RoadGraph::new();
        for (from, to) in [(1, 2), (2, 4), (1, 3), (3, 4)] {
            graph.add_edge(from, to, RoadEdge::new(1.0, 1.0, HighwayClass::Primary));
        }
        let candidates = [
            CandidatePath::from_node_ids(&graph, &[1, 2, 4]).unwrap(),
            CandidatePath::from_node_ids(&graph, &[1, 3, 4]).unwrap(),
        ];

        let result = select_all(&candidates);
        assert_eq!(result.node_ids(&graph), vec![1, 2, 3, 4]);
        assert_eq!(result.edges.len(), 4);
        assert!(!result.replaced);
        assert!(select_all(&[]).is_empty());
    }
}
