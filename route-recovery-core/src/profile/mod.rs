//! Road-class profiles of paths.

mod highway;

pub use highway::{HighwayProfile, highway_classes, highway_profile, peak_count, turn_count};
