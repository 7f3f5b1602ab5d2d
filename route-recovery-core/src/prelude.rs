// Re-export key components
pub use crate::config::RecoveryConfig;
pub use crate::loading::{load_graph, load_trips};
pub use crate::model::{CandidatePath, Channel, HighwayClass, RoadGraph, Trip, WorkingWeights};
pub use crate::prediction::{PredictionMethod, TripPaths, predict};
pub use crate::profile::{HighwayProfile, highway_profile};
pub use crate::selection::{SelectionResult, SelectionStrategy};

// Core identifiers and units
pub use crate::Error;
pub use crate::Meters;
pub use crate::NodeId;
pub use crate::Seconds; // travel time
pub use crate::TripId;
