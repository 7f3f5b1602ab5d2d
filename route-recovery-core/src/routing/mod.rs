//! Graph search primitives over the road network

pub mod dijkstra;
pub mod k_shortest;

pub use dijkstra::{Exclusions, ShortestPathTree, dijkstra_tree, shortest_path};
pub use k_shortest::KShortestPaths;
