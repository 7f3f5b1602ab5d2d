use log::trace;
use serde::{Deserialize, Serialize};

use super::SelectionResult;
use crate::{CandidatePath, Channel, RoadGraph};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalOptimalityConfig {
    /// Share of the path duration trimmed from each end before the check
    pub alpha: f64,
}

impl Default for LocalOptimalityConfig {
    fn default() -> Self {
        Self { alpha: 0.45 }
    }
}

/// Whether the middle of `path` is itself a fastest path.
///
/// Returns `None` when the check is inconclusive: the path or its middle
/// section has fewer than two nodes, or the section's endpoints are not
/// connected.
pub fn is_locally_optimal(graph: &RoadGraph, path: &CandidatePath, alpha: f64) -> Option<bool> {
    let len = path.len();
    if len < 2 {
        return None;
    }

    let durations: Vec<f64> = path
        .edges()
        .iter()
        .map(|&edge| graph.edge(edge).duration)
        .collect();
    let threshold = durations.iter().sum::<f64>() * alpha;

    // first node whose prefix ending at it exceeds the threshold
    let mut start = len - 1;
    let mut prefix = 0.0;
    for i in 1..len {
        prefix += durations[i - 1];
        if prefix > threshold {
            start = i;
            break;
        }
    }

    // last node whose suffix starting just before it exceeds the threshold
    let mut end = 1;
    let mut suffix = 0.0;
    for i in (1..len).rev() {
        suffix += durations[i - 1];
        if suffix > threshold {
            end = i;
            break;
        }
    }

    if end < start + 2 {
        return None;
    }
    let middle = path.subpath(start, end);
    let fastest = graph
        .shortest_path(middle.source(), middle.target(), &Channel::Duration)
        .ok()?;
    trace!(
        "Middle section {start}..{end} of {len} nodes, fastest alternative has {} nodes",
        fastest.len()
    );
    Some(fastest.nodes() == middle.nodes())
}

/// Union of every candidate whose middle section is a fastest path
pub fn select_locally_optimal(
    graph: &RoadGraph,
    candidates: &[CandidatePath],
    alpha: f64,
) -> SelectionResult {
    let mut result = SelectionResult::default();
    for path in candidates {
        if is_locally_optimal(graph, path, alpha) == Some(true) {
            result.add_path(path);
            result.replaced = true;
        }
    }
    result
}
