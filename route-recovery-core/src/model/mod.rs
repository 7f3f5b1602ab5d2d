//! Data model for route recovery
//!
//! Contains the road graph, per-run working weights, trips and candidate paths.

pub mod path;
pub mod road;
pub mod trip;
pub mod weights;

pub use path::CandidatePath;
pub use road::{HighwayClass, RoadEdge, RoadGraph, RoadNode};
pub use trip::Trip;
pub use weights::{Channel, EdgeWeights, WorkingWeights};
