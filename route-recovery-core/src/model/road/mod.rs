//! Road network model

pub mod components;
pub mod network;

pub use components::{HighwayClass, RoadEdge, RoadNode};
pub use network::RoadGraph;
