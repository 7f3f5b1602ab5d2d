//! Route recovery for recorded trips on a road network.
//!
//! The crate reconciles a graph's nominal edge durations with observed trip
//! durations, enumerates alternative routes consistent with those durations
//! and reduces the alternatives to a representative node/edge set per trip.

pub mod config;
pub mod error;
pub mod loading;
pub mod model;
pub mod prediction;
pub mod prelude;
pub mod profile;
pub mod routing;
pub mod selection;

pub use config::RecoveryConfig;
pub use error::Error;
pub use model::{CandidatePath, Channel, HighwayClass, RoadGraph, Trip, WorkingWeights};

/// Opaque node identifier as it appears in the input data (usually an OSM id)
pub type NodeId = i64;
/// Trip identifier
pub type TripId = i64;
/// Travel time in seconds
pub type Seconds = f64;
/// Length in meters
pub type Meters = f64;
