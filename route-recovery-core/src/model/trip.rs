use chrono::NaiveDateTime;

use crate::{NodeId, Seconds, TripId};

/// A recorded trip between two network nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub id: TripId,
    pub source: NodeId,
    pub target: NodeId,
    /// Duration measured on the real trajectory
    pub observed_duration: Seconds,
    /// Duration of the map-matched path, if known
    pub mapped_duration: Option<Seconds>,
    /// Start time of the trip, used to group trips into batches
    pub timestamp: Option<NaiveDateTime>,
}

impl Trip {
    pub fn new(id: TripId, source: NodeId, target: NodeId, observed_duration: Seconds) -> Self {
        Self {
            id,
            source,
            target,
            observed_duration,
            mapped_duration: None,
            timestamp: None,
        }
    }

    pub fn with_mapped_duration(mut self, mapped_duration: Seconds) -> Self {
        self.mapped_duration = Some(mapped_duration);
        self
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Ratio between observed and map-matched duration
    pub fn mapped_ratio(&self) -> Option<f64> {
        self.mapped_duration
            .filter(|&mapped| mapped > 0.0)
            .map(|mapped| self.observed_duration / mapped)
    }
}
