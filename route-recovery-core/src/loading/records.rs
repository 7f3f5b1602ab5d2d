use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::de::{edge_list, highway_list, node_list};
use crate::{
    CandidatePath, Error, HighwayClass, NodeId, RoadGraph, Seconds, TripId, prediction::TripPaths,
    profile::highway_profile, selection::SelectionResult,
};

/// One predicted path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PathRecord {
    pub trip_id: TripId,
    pub path_id: usize,
    pub start_node: NodeId,
    pub end_node: NodeId,
    #[serde(with = "node_list")]
    pub node_path: Vec<NodeId>,
    #[serde(with = "node_list", default)]
    pub via_nodes: Vec<NodeId>,
    pub duration: Seconds,
    /// Seconds spent predicting the trip
    #[serde(default)]
    pub runtime: f64,
}

/// Selected node and edge set of one trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SelectionRecord {
    pub trip_id: TripId,
    pub replaced: bool,
    #[serde(with = "node_list")]
    pub node_set: Vec<NodeId>,
    #[serde(with = "edge_list")]
    pub edge_set: Vec<(NodeId, NodeId)>,
}

/// Road-class profile of one path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct HighwayRecord {
    pub trip_id: TripId,
    pub path_id: usize,
    #[serde(with = "highway_list")]
    pub highway_types: Vec<HighwayClass>,
    pub highway_peaks: usize,
    #[serde(default)]
    pub turns: usize,
}

pub fn path_records(graph: &RoadGraph, results: &[TripPaths]) -> Vec<PathRecord> {
    results
        .iter()
        .flat_map(|trip| {
            trip.paths
                .iter()
                .enumerate()
                .map(move |(path_id, predicted)| PathRecord {
                    trip_id: trip.trip_id,
                    path_id,
                    start_node: trip.source,
                    end_node: trip.target,
                    node_path: predicted.path.node_ids(graph),
                    via_nodes: predicted.via_nodes.clone(),
                    duration: predicted.path.duration(graph),
                    runtime: trip.runtime.as_secs_f64(),
                })
        })
        .collect()
}

/// Resolve path records back into candidate paths, grouped by trip.
///
/// Records of one trip are expected to be adjacent, as [`path_records`]
/// writes them. Records whose node path does not exist in the graph are
/// skipped with a warning.
pub fn candidates_by_trip(
    graph: &RoadGraph,
    records: &[PathRecord],
) -> Vec<(TripId, Vec<CandidatePath>)> {
    records
        .iter()
        .chunk_by(|record| record.trip_id)
        .into_iter()
        .map(|(trip_id, group)| {
            let paths = group
                .filter_map(|record| {
                    CandidatePath::from_node_ids(graph, &record.node_path)
                        .inspect_err(|e| {
                            warn!("Skipping path {} of trip {trip_id}: {e}", record.path_id);
                        })
                        .ok()
                })
                .collect();
            (trip_id, paths)
        })
        .collect()
}

pub fn selection_record(
    graph: &RoadGraph,
    trip_id: TripId,
    selection: &SelectionResult,
) -> SelectionRecord {
    SelectionRecord {
        trip_id,
        replaced: selection.replaced,
        node_set: selection.node_ids(graph),
        edge_set: selection.edge_ids(graph),
    }
}

pub fn highway_records(
    graph: &RoadGraph,
    candidates: &[(TripId, Vec<CandidatePath>)],
) -> Vec<HighwayRecord> {
    candidates
        .iter()
        .flat_map(|(trip_id, paths)| {
            paths.iter().enumerate().map(move |(path_id, path)| {
                let profile = highway_profile(graph, path);
                HighwayRecord {
                    trip_id: *trip_id,
                    path_id,
                    highway_types: profile.classes,
                    highway_peaks: profile.peaks,
                    turns: profile.turns,
                }
            })
        })
        .collect()
}

/// Write records as CSV with a header row
///
/// # Errors
///
/// Fails on serialization or I/O errors.
pub fn write_records<T: Serialize, W: Write>(writer: W, records: &[T]) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records to a CSV file, replacing it if it exists
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn write_records_to_path<T: Serialize>(path: &Path, records: &[T]) -> Result<(), Error> {
    debug!("Writing {} records to {}", records.len(), path.display());
    let file = File::create(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to create file '{}': {}", path.display(), e),
        )
    })?;
    write_records(file, records)
}

/// Read every record of a CSV source
///
/// # Errors
///
/// Fails on the first malformed row.
pub fn read_records<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, Error> {
    csv::Reader::from_reader(reader)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(Error::from)
}
