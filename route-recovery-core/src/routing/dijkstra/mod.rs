mod point_to_point;
mod state;
mod tree;

pub use point_to_point::{Exclusions, shortest_path, shortest_path_excluding};
pub use tree::{ShortestPathTree, dijkstra_tree};
