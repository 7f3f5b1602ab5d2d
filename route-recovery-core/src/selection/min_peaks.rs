use super::SelectionResult;
use crate::{
    CandidatePath, RoadGraph,
    profile::{highway_classes, peak_count},
};

/// Pick the candidate with the fewest peaks, the first one on ties.
///
/// The scan stops as soon as the first candidate has no peaks or the best
/// count so far is one. A later candidate replaces the first only if the
/// minimum so far is positive.
pub fn select_min_peaks(graph: &RoadGraph, candidates: &[CandidatePath]) -> SelectionResult {
    let Some(first) = candidates.first() else {
        return SelectionResult::default();
    };

    let mut best = first;
    let mut min = peak_count(&highway_classes(graph, first));
    let mut replaced = false;

    if min > 0 {
        for path in &candidates[1..] {
            if min == 1 {
                break;
            }
            let peaks = peak_count(&highway_classes(graph, path));
            if peaks < min {
                min = peaks;
                best = path;
                replaced = true;
            }
            if min == 0 {
                break;
            }
        }
    }

    SelectionResult {
        replaced,
        ..SelectionResult::from_path(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HighwayClass, RoadEdge};

    // Three routes from 1 to 9 with 2, 0 and 1 peaks
    fn graph() -> (RoadGraph, Vec<CandidatePath>) {
        use HighwayClass::*;
        let mut graph = RoadGraph::new();
        let routes: [&[(i64, i64, HighwayClass)]; 3] = [
            &[
                (1, 2, Primary),
                (2, 3, Residential),
                (3, 4, Primary),
                (4, 9, Residential),
            ],
            &[(1, 5, Residential), (5, 9, Residential)],
            &[(1, 6, Residential), (6, 7, Primary), (7, 9, Residential)],
        ];
        let mut candidates = Vec::new();
        for route in routes {
            let mut ids = vec![route[0].0];
            for &(from, to, class) in route {
                graph.add_edge(from, to, RoadEdge::new(10.0, 1.0, class));
                ids.push(to);
            }
            candidates.push(ids);
        }
        let candidates = candidates
            .iter()
            .map(|ids| CandidatePath::from_node_ids(&graph, ids).unwrap())
            .collect();
        (graph, candidates)
    }

    #[test]
    fn fewest_peaks_wins() {
        let (graph, candidates) = graph();
        let peaks: Vec<usize> = candidates
            .iter()
            .map(|path| peak_count(&highway_classes(&graph, path)))
            .collect();
        assert_eq!(peaks, vec![2, 0, 1]);

        let result = select_min_peaks(&graph, &candidates);
        assert!(result.replaced);
        assert_eq!(result.node_ids(&graph), vec![1, 5, 9]);
    }

    #[test]
    fn peak_free_first_candidate_is_kept() {
        let (graph, candidates) = graph();
        let result = select_min_peaks(&graph, &candidates[1..]);
        assert!(!result.replaced);
        assert_eq!(result.node_ids(&graph), vec![1, 5, 9]);
    }

    #[test]
    fn single_peak_stops_the_scan() {
        let (graph, candidates) = graph();
        // order [1 peak, 0 peaks]: the scan stops before the better candidate
        let reordered = [candidates[2].clone(), candidates[1].clone()];
        let result = select_min_peaks(&graph, &reordered);
        assert!(!result.replaced);
        assert_eq!(result.node_ids(&graph), vec![1, 6, 7, 9]);
    }

    #[test]
    fn no_candidates_selects_nothing() {
        let (graph, _) = graph();
        assert!(select_min_peaks(&graph, &[]).is_empty());
    }
}
