//! Resource-constrained path enumeration.
//!
//! Simple paths are drawn from the k-shortest enumeration in non-decreasing
//! duration order and kept while their duration lies strictly inside the
//! bounds derived from the observed duration.

use log::{debug, info, warn};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::{CandidatePath, Channel, Error, RoadGraph, Seconds, Trip, routing::KShortestPaths};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConstrainedConfig {
    /// Fraction of the observed duration below it that is still accepted
    pub duration_lower_bound: f64,
    /// Fraction of the observed duration above it that is still accepted
    pub duration_upper_bound: f64,
    pub max_kept: usize,
    /// Ceiling on enumerated paths, kept or not
    pub max_examined: usize,
    /// Trips whose observed over map-matched duration exceeds this are
    /// skipped; `inf` turns the filter off
    pub max_mapped_ratio: f64,
}

impl Default for ResourceConstrainedConfig {
    fn default() -> Self {
        Self {
            duration_lower_bound: 0.1,
            duration_upper_bound: 0.1,
            max_kept: 1000,
            max_examined: 100_000,
            max_mapped_ratio: 1.5,
        }
    }
}

/// Open duration interval `(lower, upper)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationBounds {
    pub lower: Seconds,
    pub upper: Seconds,
}

impl DurationBounds {
    pub fn new(lower: Seconds, upper: Seconds) -> Self {
        Self { lower, upper }
    }

    /// Bounds `observed * (1 - lower_fraction)` and `observed * (1 + upper_fraction)`
    pub fn around(observed: Seconds, lower_fraction: f64, upper_fraction: f64) -> Self {
        Self {
            lower: observed * (1.0 - lower_fraction),
            upper: observed * (1.0 + upper_fraction),
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.lower < self.upper
    }

    pub fn contains(&self, duration: Seconds) -> bool {
        self.lower < duration && duration < self.upper
    }
}

/// Enumerate paths whose duration lies within `bounds`, fastest first.
///
/// Infeasible bounds give an empty result.
///
/// # Errors
///
/// [`Error::NoPath`] if the target is unreachable.
pub fn bounded_paths(
    graph: &RoadGraph,
    source: NodeIndex,
    target: NodeIndex,
    bounds: DurationBounds,
    config: &ResourceConstrainedConfig,
) -> Result<Vec<(Seconds, CandidatePath)>, Error> {
    if !bounds.is_feasible() {
        debug!(
            "Infeasible bounds ({:.1}, {:.1}), nothing to enumerate",
            bounds.lower, bounds.upper
        );
        return Ok(Vec::new());
    }

    let mut paths = KShortestPaths::new(graph, source, target, &Channel::Duration).peekable();
    if paths.peek().is_none() {
        return Err(Error::NoPath {
            from: graph.node_id(source),
            to: graph.node_id(target),
        });
    }

    let mut kept = Vec::new();
    for (examined, (duration, path)) in paths.enumerate() {
        if duration > bounds.upper || kept.len() >= config.max_kept {
            break;
        }
        if examined >= config.max_examined {
            warn!(
                "Stopping enumeration between {} and {} after {examined} paths",
                graph.node_id(source),
                graph.node_id(target)
            );
            break;
        }
        if bounds.contains(duration) {
            kept.push((duration, path));
        }
    }
    Ok(kept)
}

/// Resource-constrained predictor for a single trip
///
/// # Errors
///
/// Fails if an endpoint is unknown or the target is unreachable.
pub fn resource_constrained_paths(
    graph: &RoadGraph,
    trip: &Trip,
    config: &ResourceConstrainedConfig,
) -> Result<Vec<(Seconds, CandidatePath)>, Error> {
    if let Some(ratio) = trip.mapped_ratio()
        && ratio > config.max_mapped_ratio
    {
        info!(
            "Skipping trip {}: observed/mapped duration ratio {ratio:.2} above {}",
            trip.id, config.max_mapped_ratio
        );
        return Ok(Vec::new());
    }

    let source = graph.node_index(trip.source)?;
    let target = graph.node_index(trip.target)?;
    let bounds = DurationBounds::around(
        trip.observed_duration,
        config.duration_lower_bound,
        config.duration_upper_bound,
    );
    bounded_paths(graph, source, target, bounds, config)
}
