use hashbrown::HashSet;
use petgraph::graph::EdgeIndex;
use serde::{Deserialize, Serialize};

use super::SelectionResult;
use crate::{CandidatePath, RoadGraph, Seconds};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversityConfig {
    /// Largest overlap ratio two selected paths may have
    pub similarity_threshold: f64,
}

impl Default for DiversityConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.3,
        }
    }
}

struct Entry<'a> {
    path: &'a CandidatePath,
    duration: Seconds,
    edges: HashSet<EdgeIndex>,
}

impl<'a> Entry<'a> {
    fn new(graph: &RoadGraph, path: &'a CandidatePath) -> Self {
        Self {
            path,
            duration: path.duration(graph),
            edges: path.edges().iter().copied().collect(),
        }
    }
}

/// Duration of the edges `a` shares with `b` over the smaller of the two
/// path durations. Zero-duration paths count as identical.
pub fn overlap_ratio(graph: &RoadGraph, a: &CandidatePath, b: &CandidatePath) -> f64 {
    ratio(graph, &Entry::new(graph, a), &Entry::new(graph, b))
}

fn ratio(graph: &RoadGraph, a: &Entry<'_>, b: &Entry<'_>) -> f64 {
    let shared: Seconds = a
        .path
        .edges()
        .iter()
        .filter(|edge| b.edges.contains(*edge))
        .map(|&edge| graph.edge(edge).duration)
        .sum();
    let total = a.duration.min(b.duration);
    if total > 0.0 { shared / total } else { 1.0 }
}

/// Greedy diverse subset, fastest first.
///
/// A candidate is accepted only if its overlap ratio with every accepted
/// path is within `similarity_threshold`. Equal durations keep their input
/// order.
pub fn diverse_paths<'a>(
    graph: &RoadGraph,
    candidates: &'a [CandidatePath],
    similarity_threshold: f64,
) -> Vec<&'a CandidatePath> {
    let mut entries: Vec<Entry<'a>> = candidates
        .iter()
        .map(|path| Entry::new(graph, path))
        .collect();
    entries.sort_by(|a, b| a.duration.total_cmp(&b.duration));

    let mut accepted: Vec<Entry<'a>> = Vec::new();
    for entry in entries {
        if accepted
            .iter()
            .all(|other| ratio(graph, &entry, other) <= similarity_threshold)
        {
            accepted.push(entry);
        }
    }
    accepted.into_iter().map(|entry| entry.path).collect()
}

/// Union of the diverse subset; `replaced` is set when it holds more than
/// one path
pub fn select_diverse(
    graph: &RoadGraph,
    candidates: &[CandidatePath],
    similarity_threshold: f64,
) -> SelectionResult {
    let accepted = diverse_paths(graph, candidates, similarity_threshold);
    let mut result = SelectionResult::default();
    for path in &accepted {
        result.add_path(path);
    }
    result.replaced = accepted.len() > 1;
    result
}
