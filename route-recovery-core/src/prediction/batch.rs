//! Batch joint calibration search.
//!
//! Trips that happen in the same time window share one set of working
//! weights. Every round fits a multiplier per used edge with bounded least
//! squares so that the predicted durations of all trips jointly approach
//! their observed durations, then recomputes every trip's fastest path.

use hashbrown::HashSet;
use itertools::Itertools;
use log::{debug, info, warn};
use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use super::least_squares::{BoundedLeastSquares, SparseColumn};
use crate::{CandidatePath, Channel, Error, RoadGraph, Seconds, Trip, TripId, WorkingWeights};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Length of the time windows trips are grouped into
    pub window_minutes: u32,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
    /// Change of the mean absolute error (seconds) below which calibration stops
    pub convergence: Seconds,
    /// Hard ceiling on calibration rounds
    pub max_iterations: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            window_minutes: 15,
            min_multiplier: 1.0,
            max_multiplier: 5.0,
            convergence: 1.0,
            max_iterations: 100,
        }
    }
}

/// Paths recovered for one batch
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Path history per trip, in the order the trips were given
    pub paths: Vec<(TripId, Vec<CandidatePath>)>,
    /// Number of calibration rounds performed
    pub iterations: usize,
    /// Solver failure that ended the calibration early, if any
    pub aborted: Option<Error>,
}

struct BatchTrip {
    id: TripId,
    source: NodeIndex,
    target: NodeIndex,
    observed: Seconds,
}

/// Calibrate a batch of temporally co-located trips.
///
/// Trips with unknown endpoints or without any path are skipped with a
/// warning. A batch of a single trip yields its plain fastest path.
///
/// # Errors
///
/// Fails only if a path disappears during calibration; solver failures are
/// reported through [`BatchOutcome::aborted`] with the paths computed so far.
pub fn calibrate_batch(
    graph: &RoadGraph,
    trips: &[Trip],
    config: &BatchConfig,
) -> Result<BatchOutcome, Error> {
    let mut weights = WorkingWeights::from_channel(graph, Channel::Duration);

    let mut batch = Vec::with_capacity(trips.len());
    let mut current = Vec::with_capacity(trips.len());
    for trip in trips {
        match first_path(graph, trip, &weights) {
            Ok((entry, path)) => {
                batch.push(entry);
                current.push(path);
            }
            Err(e) => warn!("Skipping trip {} in batch: {e}", trip.id),
        }
    }

    if batch.len() <= 1 {
        return Ok(BatchOutcome {
            paths: batch
                .iter()
                .zip(current)
                .map(|(trip, path)| (trip.id, vec![path]))
                .collect(),
            ..BatchOutcome::default()
        });
    }

    info!("Calibrating batch of {} trips", batch.len());
    let outcome = calibrate(graph, &batch, current, config, &mut weights);
    weights.reset(graph, Channel::Duration);
    outcome
}

fn first_path(
    graph: &RoadGraph,
    trip: &Trip,
    weights: &WorkingWeights,
) -> Result<(BatchTrip, CandidatePath), Error> {
    let source = graph.node_index(trip.source)?;
    let target = graph.node_index(trip.target)?;
    let path = graph.shortest_path(source, target, weights)?;
    Ok((
        BatchTrip {
            id: trip.id,
            source,
            target,
            observed: trip.observed_duration,
        },
        path,
    ))
}

fn calibrate(
    graph: &RoadGraph,
    batch: &[BatchTrip],
    mut current: Vec<CandidatePath>,
    config: &BatchConfig,
    weights: &mut WorkingWeights,
) -> Result<BatchOutcome, Error> {
    let solver = BoundedLeastSquares::new(config.min_multiplier, config.max_multiplier);
    let observed: Vec<Seconds> = batch.iter().map(|trip| trip.observed).collect();

    let mut history: Vec<Vec<CandidatePath>> =
        current.iter().map(|path| vec![path.clone()]).collect();

    // The first round uses signed errors, later rounds absolute ones
    let mut mean_error = mean(
        batch
            .iter()
            .zip(&current)
            .map(|(trip, path)| trip.observed - path.weight(graph, weights)),
    );
    let mut used = used_edges(&current);
    let mut prev_error = 0.0;
    let mut iterations = 0;
    let mut aborted = None;

    while (mean_error - prev_error).abs() >= config.convergence {
        if iterations >= config.max_iterations {
            warn!(
                "Batch calibration stopped after {iterations} rounds, mean error {mean_error:.2}s"
            );
            break;
        }
        prev_error = mean_error.abs();

        let columns = build_columns(&current, &used, weights);
        let multipliers = match solver.solve(&columns, &observed) {
            Ok(x) => x,
            Err(e) => {
                warn!("Aborting batch calibration: {e}");
                aborted = Some(e);
                break;
            }
        };
        for (&edge, &factor) in used.iter().zip(&multipliers) {
            weights.scale(edge, factor);
        }

        let mut errors = Vec::with_capacity(batch.len());
        for (i, trip) in batch.iter().enumerate() {
            let path = graph.shortest_path(trip.source, trip.target, weights)?;
            errors.push((trip.observed - path.weight(graph, weights)).abs());
            history[i].push(path.clone());
            current[i] = path;
        }
        used = used_edges(&current);
        mean_error = mean(errors.into_iter());
        iterations += 1;
        debug!("Batch round {iterations}: mean error {prev_error:.2}s -> {mean_error:.2}s");
    }

    // The converging round leaves a trailing entry per trip
    if iterations > 0 && aborted.is_none() {
        for paths in &mut history {
            paths.pop();
        }
    }

    Ok(BatchOutcome {
        paths: batch.iter().map(|trip| trip.id).zip(history).collect(),
        iterations,
        aborted,
    })
}

/// Sorted set of edges used by any of the paths
fn used_edges(paths: &[CandidatePath]) -> Vec<EdgeIndex> {
    paths
        .iter()
        .flat_map(|path| path.edges().iter().copied())
        .sorted()
        .dedup()
        .collect()
}

/// Columns of the calibration matrix: one per used edge, holding its working
/// weight in the rows of the trips whose current path contains it
fn build_columns(
    current: &[CandidatePath],
    used: &[EdgeIndex],
    weights: &WorkingWeights,
) -> Vec<SparseColumn> {
    let on_path: Vec<HashSet<EdgeIndex>> = current
        .iter()
        .map(|path| path.edges().iter().copied().collect())
        .collect();

    used.iter()
        .map(|&edge| {
            on_path
                .iter()
                .enumerate()
                .filter(|(_, edges)| edges.contains(&edge))
                .map(|(row, _)| (row, weights.get(edge)))
                .collect()
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
