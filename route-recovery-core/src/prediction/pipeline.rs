use std::{
    fmt,
    str::FromStr,
    time::{Duration, Instant},
};

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{
    baseline::{fastest_path, shortest_path},
    batch::calibrate_batch,
    penalty::penalized_paths,
    resource_constrained::resource_constrained_paths,
    via_paths::via_paths,
};
use crate::{
    CandidatePath, Error, NodeId, RecoveryConfig, RoadGraph, Trip, TripId, loading::batch_by_window,
};

/// Path prediction approach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    Shortest,
    Fastest,
    Penalty,
    Batch,
    #[serde(rename = "rc")]
    ResourceConstrained,
    #[serde(rename = "via")]
    ViaPaths,
}

impl PredictionMethod {
    pub const ALL: [PredictionMethod; 6] = [
        PredictionMethod::Shortest,
        PredictionMethod::Fastest,
        PredictionMethod::Penalty,
        PredictionMethod::Batch,
        PredictionMethod::ResourceConstrained,
        PredictionMethod::ViaPaths,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PredictionMethod::Shortest => "shortest",
            PredictionMethod::Fastest => "fastest",
            PredictionMethod::Penalty => "penalty",
            PredictionMethod::Batch => "batch",
            PredictionMethod::ResourceConstrained => "rc",
            PredictionMethod::ViaPaths => "via",
        }
    }
}

impl fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictionMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| Error::InvalidData(format!("Unknown prediction method: {s}")))
    }
}

/// One predicted path; `via_nodes` is only filled by the via-node predictor
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedPath {
    pub path: CandidatePath,
    pub via_nodes: Vec<NodeId>,
}

impl From<CandidatePath> for PredictedPath {
    fn from(path: CandidatePath) -> Self {
        Self {
            path,
            via_nodes: Vec::new(),
        }
    }
}

/// Prediction result for one trip
#[derive(Debug, Clone)]
pub struct TripPaths {
    pub trip_id: TripId,
    pub source: NodeId,
    pub target: NodeId,
    pub paths: Vec<PredictedPath>,
    /// Wall time spent on the trip, or on its whole batch
    pub runtime: Duration,
}

impl TripPaths {
    pub fn candidates(&self) -> Vec<CandidatePath> {
        self.paths
            .iter()
            .map(|predicted| predicted.path.clone())
            .collect()
    }
}

/// Predict paths for every trip with the given method.
///
/// Trips run in parallel, each with its own working weights; batch
/// calibration runs batches in parallel instead. Trips that fail are logged
/// and left out of the result.
///
/// # Errors
///
/// Only fails if the batch window cannot group the trips.
pub fn predict(
    graph: &RoadGraph,
    trips: &[Trip],
    method: PredictionMethod,
    config: &RecoveryConfig,
) -> Result<Vec<TripPaths>, Error> {
    info!(
        "Predicting paths for {} trips with method {method}",
        trips.len()
    );
    let start = Instant::now();

    let results: Vec<TripPaths> = match TripPredictor::for_method(method) {
        None => {
            let batches = batch_by_window(trips, config.batch_window())?;
            info!("Grouped trips into {} batches", batches.len());
            batches
                .par_iter()
                .flat_map_iter(|batch| predict_batch(graph, batch, config))
                .collect()
        }
        Some(predictor) => trips
            .par_iter()
            .filter_map(|trip| {
                let started = Instant::now();
                match predictor.predict(graph, trip, config) {
                    Ok(paths) => Some(TripPaths {
                        trip_id: trip.id,
                        source: trip.source,
                        target: trip.target,
                        paths,
                        runtime: started.elapsed(),
                    }),
                    Err(e) => {
                        warn!("Skipping trip {}: {e}", trip.id);
                        None
                    }
                }
            })
            .collect(),
    };

    info!(
        "Predicted {} paths for {} trips in {:?}",
        results.iter().map(|trip| trip.paths.len()).sum::<usize>(),
        results.len(),
        start.elapsed()
    );
    Ok(results)
}

/// Methods that predict every trip on its own
#[derive(Debug, Clone, Copy)]
enum TripPredictor {
    Shortest,
    Fastest,
    Penalty,
    ResourceConstrained,
    ViaPaths,
}

impl TripPredictor {
    /// `None` for methods that work on whole batches
    fn for_method(method: PredictionMethod) -> Option<Self> {
        match method {
            PredictionMethod::Shortest => Some(TripPredictor::Shortest),
            PredictionMethod::Fastest => Some(TripPredictor::Fastest),
            PredictionMethod::Penalty => Some(TripPredictor::Penalty),
            PredictionMethod::Batch => None,
            PredictionMethod::ResourceConstrained => Some(TripPredictor::ResourceConstrained),
            PredictionMethod::ViaPaths => Some(TripPredictor::ViaPaths),
        }
    }

    fn predict(
        self,
        graph: &RoadGraph,
        trip: &Trip,
        config: &RecoveryConfig,
    ) -> Result<Vec<PredictedPath>, Error> {
        let paths = match self {
            TripPredictor::Shortest => vec![shortest_path(graph, trip)?.into()],
            TripPredictor::Fastest => vec![fastest_path(graph, trip)?.into()],
            TripPredictor::Penalty => penalized_paths(graph, trip, &config.penalty)?
                .into_iter()
                .map(PredictedPath::from)
                .collect(),
            TripPredictor::ResourceConstrained => {
                resource_constrained_paths(graph, trip, &config.resource_constrained)?
                    .into_iter()
                    .map(|(_, path)| path.into())
                    .collect()
            }
            TripPredictor::ViaPaths => via_paths(graph, trip, &config.via_paths)?
                .into_iter()
                .map(|via| PredictedPath {
                    path: via.path,
                    via_nodes: via.via_nodes,
                })
                .collect(),
        };
        Ok(paths)
    }
}

fn predict_batch(graph: &RoadGraph, batch: &[Trip], config: &RecoveryConfig) -> Vec<TripPaths> {
    let started = Instant::now();
    let outcome = match calibrate_batch(graph, batch, &config.batch) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Skipping batch of {} trips: {e}", batch.len());
            return Vec::new();
        }
    };
    if let Some(e) = &outcome.aborted {
        warn!(
            "Batch of {} trips aborted after {} rounds: {e}",
            batch.len(),
            outcome.iterations
        );
    }
    let runtime = started.elapsed();

    outcome
        .paths
        .into_iter()
        .filter_map(|(trip_id, mut paths)| {
            let trip = batch.iter().find(|trip| trip.id == trip_id)?;
            paths.sort_by_cached_key(|path| path.node_ids(graph));
            paths.dedup();
            Some(TripPaths {
                trip_id,
                source: trip.source,
                target: trip.target,
                paths: paths.into_iter().map(PredictedPath::from).collect(),
                runtime,
            })
        })
        .collect()
}
