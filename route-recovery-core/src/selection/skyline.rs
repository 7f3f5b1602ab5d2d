use itertools::Itertools;

use super::SelectionResult;
use crate::{
    CandidatePath, RoadGraph,
    profile::{highway_classes, peak_count},
};

/// Keep the fastest candidate plus every slower one that lowers the peak
/// count seen so far. Equal durations keep their input order.
pub fn select_skyline(graph: &RoadGraph, candidates: &[CandidatePath]) -> SelectionResult {
    let mut by_duration = candidates
        .iter()
        .map(|path| (path.duration(graph), path))
        .sorted_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, path)| path);

    let Some(fastest) = by_duration.next() else {
        return SelectionResult::default();
    };
    let mut result = SelectionResult::from_path(fastest);
    let mut min_peaks = peak_count(&highway_classes(graph, fastest));

    for path in by_duration {
        let peaks = peak_count(&highway_classes(graph, path));
        if peaks < min_peaks {
            min_peaks = peaks;
            result.add_path(path);
            result.replaced = true;
        }
    }
    result
}
