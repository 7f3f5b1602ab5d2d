use std::collections::BTreeMap;

use chrono::Duration;
use log::{debug, warn};

use crate::{Error, Trip};

/// Group trips into fixed time windows aligned to the unix epoch.
///
/// Batches come out in chronological order and keep the input order of
/// their trips; empty windows produce no batch. Trips without a timestamp
/// are appended as single-trip batches.
///
/// # Errors
///
/// [`Error::InvalidData`] if `window` is not positive.
pub fn batch_by_window(trips: &[Trip], window: Duration) -> Result<Vec<Vec<Trip>>, Error> {
    let window_secs = window.num_seconds();
    if window_secs <= 0 {
        return Err(Error::InvalidData(format!(
            "Batch window must be positive, got {window_secs}s"
        )));
    }

    let mut windows: BTreeMap<i64, Vec<Trip>> = BTreeMap::new();
    let mut untimed = Vec::new();
    for trip in trips {
        match trip.timestamp {
            Some(timestamp) => {
                let bucket = timestamp.and_utc().timestamp().div_euclid(window_secs);
                windows.entry(bucket).or_default().push(trip.clone());
            }
            None => untimed.push(vec![trip.clone()]),
        }
    }
    if !untimed.is_empty() {
        warn!(
            "{} trips have no timestamp and are calibrated on their own",
            untimed.len()
        );
    }
    debug!(
        "{} time windows of {window_secs}s hold {} trips",
        windows.len(),
        trips.len() - untimed.len()
    );

    Ok(windows.into_values().chain(untimed).collect())
}
