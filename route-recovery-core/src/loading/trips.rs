use std::{fs::File, io::Read, path::Path};

use chrono::NaiveDateTime;
use log::{info, warn};
use serde::Deserialize;

use super::de::deserialize_timestamp;
use crate::{Error, NodeId, Seconds, Trip, TripId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct TripRow {
    trip_id: TripId,
    start_node: NodeId,
    end_node: NodeId,
    real_duration: Seconds,
    #[serde(default)]
    mapped_duration: Option<Seconds>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    timestamp: Option<NaiveDateTime>,
}

impl From<TripRow> for Trip {
    fn from(row: TripRow) -> Self {
        Trip {
            id: row.trip_id,
            source: row.start_node,
            target: row.end_node,
            observed_duration: row.real_duration,
            mapped_duration: row.mapped_duration,
            timestamp: row.timestamp,
        }
    }
}

/// Load trips from a table with the columns
/// `TRIP_ID,START_NODE,END_NODE,REAL_DURATION[,MAPPED_DURATION][,TIMESTAMP]`.
///
/// # Errors
///
/// Fails if the file cannot be opened or its header is unreadable.
pub fn load_trips(path: &Path) -> Result<Vec<Trip>, Error> {
    info!("Loading trips from {}", path.display());
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    read_trips(file)
}

/// Read trips from CSV data, skipping malformed rows and trips with a
/// non-positive observed duration.
///
/// # Errors
///
/// Fails if the header cannot be read.
pub fn read_trips<R: Read>(reader: R) -> Result<Vec<Trip>, Error> {
    let mut reader = csv::Reader::from_reader(reader);
    reader.headers()?;

    let trips: Vec<Trip> = reader
        .deserialize::<TripRow>()
        .enumerate()
        .filter_map(|(line, row)| match row {
            Ok(row) if row.real_duration.is_finite() && row.real_duration > 0.0 => {
                Some(Trip::from(row))
            }
            Ok(row) => {
                warn!(
                    "Skipping trip {} with duration {}",
                    row.trip_id, row.real_duration
                );
                None
            }
            Err(e) => {
                warn!("Skipping trip row {}: {e}", line + 1);
                None
            }
        })
        .collect();

    info!("Loaded {} trips", trips.len());
    Ok(trips)
}
