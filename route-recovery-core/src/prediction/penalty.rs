//! Single-trip penalization search.
//!
//! The residual between the observed duration and the current shortest
//! path duration is spread over the edges of that path in proportion to
//! their working weight. Each edge is penalized at most once per trip, and
//! the search stops once the residual is within tolerance or repeats.

use fixedbitset::FixedBitSet;
use log::{debug, trace};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::{CandidatePath, Channel, Error, RoadGraph, Seconds, Trip, WorkingWeights};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    /// Residual (seconds) below which the search is considered converged
    pub tolerance: Seconds,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self { tolerance: 1.0 }
    }
}

/// Run the penalization search for a trip.
///
/// Returns every path computed along the way, starting with the plain
/// fastest path and ending with the last recomputed one.
///
/// # Errors
///
/// Fails if an endpoint is unknown or the target is unreachable.
pub fn penalized_paths(
    graph: &RoadGraph,
    trip: &Trip,
    config: &PenaltyConfig,
) -> Result<Vec<CandidatePath>, Error> {
    let source = graph.node_index(trip.source)?;
    let target = graph.node_index(trip.target)?;
    let mut weights = WorkingWeights::from_channel(graph, Channel::Duration);
    penalized_paths_with(
        graph,
        source,
        target,
        trip.observed_duration,
        config,
        &mut weights,
    )
}

/// Penalization search reusing a caller-owned working weight array.
///
/// The array is reset to nominal durations before the search starts and
/// again before returning, on success and on failure.
pub fn penalized_paths_with(
    graph: &RoadGraph,
    source: NodeIndex,
    target: NodeIndex,
    observed: Seconds,
    config: &PenaltyConfig,
    weights: &mut WorkingWeights,
) -> Result<Vec<CandidatePath>, Error> {
    weights.reset(graph, Channel::Duration);
    let result = penalize(graph, source, target, observed, config, weights);
    weights.reset(graph, Channel::Duration);
    result
}

fn penalize(
    graph: &RoadGraph,
    source: NodeIndex,
    target: NodeIndex,
    observed: Seconds,
    config: &PenaltyConfig,
    weights: &mut WorkingWeights,
) -> Result<Vec<CandidatePath>, Error> {
    let mut penalized_edges = FixedBitSet::with_capacity(graph.edge_count());

    let mut path = graph.shortest_path(source, target, weights)?;
    let mut duration = path.weight(graph, weights);
    let mut result = vec![path.clone()];
    let mut error = observed - duration;
    let mut prev_error: Option<Seconds> = None;

    while error.abs() > config.tolerance && prev_error != Some(error) {
        let mut valid_duration = duration;
        let mut penalized_duration = 0.0;
        for &edge in path.edges() {
            if penalized_edges.contains(edge.index()) {
                let weight = weights.get(edge);
                valid_duration -= weight;
                penalized_duration += weight;
            }
        }
        trace!(
            "Path of {duration:.1}s has {penalized_duration:.1}s on already penalized edges"
        );

        for &edge in path.edges() {
            if penalized_edges.contains(edge.index()) {
                continue;
            }
            let weight = weights.get(edge);
            if valid_duration > 0.0 {
                weights.set(edge, weight + (weight / valid_duration) * error);
            }
            penalized_edges.insert(edge.index());
        }

        path = graph.shortest_path(source, target, weights)?;
        duration = path.weight(graph, weights);
        result.push(path.clone());

        prev_error = Some(error);
        error = observed - duration;
        debug!(
            "Penalization step {}: error {:.2}s -> {:.2}s",
            result.len() - 1,
            prev_error.unwrap_or_default(),
            error
        );
    }

    Ok(result)
}
