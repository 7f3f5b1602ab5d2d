//! Path predictors: from a trip's endpoints and observed duration to one or
//! more candidate paths.

mod baseline;
mod batch;
mod least_squares;
mod penalty;
mod pipeline;
mod resource_constrained;
mod via_paths;

pub use baseline::{baseline_path, fastest_path, shortest_path};
pub use batch::{BatchConfig, BatchOutcome, calibrate_batch};
pub use least_squares::{BoundedLeastSquares, SparseColumn};
pub use penalty::{PenaltyConfig, penalized_paths, penalized_paths_with};
pub use pipeline::{PredictedPath, PredictionMethod, TripPaths, predict};
pub use resource_constrained::{
    DurationBounds, ResourceConstrainedConfig, bounded_paths, resource_constrained_paths,
};
pub use via_paths::{ViaPath, ViaPathsConfig, via_node_paths, via_paths};
