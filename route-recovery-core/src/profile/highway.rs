use serde::Serialize;

use crate::{CandidatePath, HighwayClass, RoadGraph};

/// Road-class summary of one path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighwayProfile {
    /// One class per edge, in driving order
    pub classes: Vec<HighwayClass>,
    pub peaks: usize,
    /// Number of way changes along the path
    pub turns: usize,
}

/// Road class of every edge on the path
pub fn highway_classes(graph: &RoadGraph, path: &CandidatePath) -> Vec<HighwayClass> {
    path.edges()
        .iter()
        .map(|&edge| graph.edge(edge).highway)
        .collect()
}

/// Number of local maxima in the class rank sequence.
///
/// A peak is counted whenever the rank drops while the sequence is rising.
/// The sequence starts out rising, so a path that only goes downhill from
/// its first edge has one peak at the start. Plateaus keep the current state.
pub fn peak_count(classes: &[HighwayClass]) -> usize {
    let mut peaks = 0;
    let mut last = None;
    let mut rising = true;

    for rank in classes.iter().map(|class| class.rank()) {
        match last {
            Some(previous) if rank < previous => {
                if rising {
                    peaks += 1;
                    rising = false;
                }
            }
            Some(previous) if rank > previous => rising = true,
            Some(_) => {}
            None => rising = true,
        }
        last = Some(rank);
    }
    peaks
}

/// Number of way changes along the path.
///
/// The first edge counts as a change; edges without a way id form their own
/// group.
pub fn turn_count(graph: &RoadGraph, path: &CandidatePath) -> usize {
    let mut turns = 0;
    let mut current = None;
    for &edge in path.edges() {
        let way = Some(graph.edge(edge).way_id);
        if way != current {
            turns += 1;
            current = way;
        }
    }
    turns
}

pub fn highway_profile(graph: &RoadGraph, path: &CandidatePath) -> HighwayProfile {
    let classes = highway_classes(graph, path);
    HighwayProfile {
        peaks: peak_count(&classes),
        turns: turn_count(graph, path),
        classes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoadEdge;
    use HighwayClass::*;

    #[test]
    fn peaks_are_counted_on_descent() {
        assert_eq!(peak_count(&[]), 0);
        assert_eq!(peak_count(&[Primary]), 0);
        assert_eq!(peak_count(&[Residential, Primary, Residential]), 1);
        assert_eq!(
            peak_count(&[Residential, Motorway, Tertiary, Trunk, Residential]),
            2
        );
        // rising towards the end never peaks
        assert_eq!(peak_count(&[Residential, Tertiary, Motorway]), 0);
        // starting high counts as a peak
        assert_eq!(peak_count(&[Motorway, Primary, Residential]), 1);
    }

    #[test]
    fn plateaus_do_not_add_peaks() {
        assert_eq!(
            peak_count(&[Tertiary, Primary, Primary, Secondary, Secondary]),
            1
        );
    }

    #[test]
    fn profile_of_a_path() {
        let mut graph = RoadGraph::new();
        graph.add_edge(1, 2, RoadEdge::new(10.0, 1.0, Residential).with_way_id(100));
        graph.add_edge(2, 3, RoadEdge::new(10.0, 1.0, Primary).with_way_id(200));
        graph.add_edge(3, 4, RoadEdge::new(10.0, 1.0, Primary).with_way_id(200));
        graph.add_edge(4, 5, RoadEdge::new(10.0, 1.0, Tertiary));
        let path = CandidatePath::from_node_ids(&graph, &[1, 2, 3, 4, 5]).unwrap();

        let profile = highway_profile(&graph, &path);
        assert_eq!(
            profile.classes,
            vec![Residential, Primary, Primary, Tertiary]
        );
        assert_eq!(profile.peaks, 1);
        assert_eq!(profile.turns, 3);
    }
}
