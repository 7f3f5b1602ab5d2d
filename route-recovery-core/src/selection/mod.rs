//! Reduction of a trip's candidate paths to one node and edge set.

mod diversity;
mod local_optimality;
mod min_peaks;
mod select_all;
mod skyline;

use std::{fmt, str::FromStr};

use hashbrown::HashSet;
use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

pub use diversity::{DiversityConfig, diverse_paths, overlap_ratio, select_diverse};
pub use local_optimality::{LocalOptimalityConfig, is_locally_optimal, select_locally_optimal};
pub use min_peaks::select_min_peaks;
pub use select_all::select_all;
pub use skyline::select_skyline;

use crate::{CandidatePath, Error, NodeId, RoadGraph};

/// Nodes and edges chosen for a trip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionResult {
    pub nodes: HashSet<NodeIndex>,
    pub edges: HashSet<EdgeIndex>,
    /// Whether the policy deviated from its default choice
    pub replaced: bool,
}

impl SelectionResult {
    pub(crate) fn add_path(&mut self, path: &CandidatePath) {
        self.nodes.extend(path.nodes().iter().copied());
        self.edges.extend(path.edges().iter().copied());
    }

    pub(crate) fn from_path(path: &CandidatePath) -> Self {
        let mut result = Self::default();
        result.add_path(path);
        result
    }

    /// Selected node ids, sorted
    pub fn node_ids(&self, graph: &RoadGraph) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.iter().map(|&node| graph.node_id(node)).collect();
        ids.sort_unstable();
        ids
    }

    /// Selected edges as sorted `(from, to)` id pairs
    pub fn edge_ids(&self, graph: &RoadGraph) -> Vec<(NodeId, NodeId)> {
        let mut ids: Vec<(NodeId, NodeId)> = self
            .edges
            .iter()
            .filter_map(|&edge| graph.edge_endpoints(edge))
            .map(|(from, to)| (graph.node_id(from), graph.node_id(to)))
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Path selection policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Union of every candidate
    SelectAll,
    /// The candidate with the fewest road-class peaks
    MinPeaks,
    /// Candidates on the duration / peak-count frontier
    Skyline,
    /// Candidates whose middle section is a shortest path
    LocalOptimality { alpha: f64 },
    /// Greedy set of mutually dissimilar candidates
    Diversity { similarity_threshold: f64 },
}

impl SelectionStrategy {
    pub fn select(&self, graph: &RoadGraph, candidates: &[CandidatePath]) -> SelectionResult {
        match *self {
            SelectionStrategy::SelectAll => select_all(candidates),
            SelectionStrategy::MinPeaks => select_min_peaks(graph, candidates),
            SelectionStrategy::Skyline => select_skyline(graph, candidates),
            SelectionStrategy::LocalOptimality { alpha } => {
                select_locally_optimal(graph, candidates, alpha)
            }
            SelectionStrategy::Diversity {
                similarity_threshold,
            } => select_diverse(graph, candidates, similarity_threshold),
        }
    }

    /// Short policy name as used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            SelectionStrategy::SelectAll => "all",
            SelectionStrategy::MinPeaks => "minp",
            SelectionStrategy::Skyline => "skyline",
            SelectionStrategy::LocalOptimality { .. } => "lopt",
            SelectionStrategy::Diversity { .. } => "diversity",
        }
    }

    /// Build a policy from its short name, taking parameters from the configs
    ///
    /// # Errors
    ///
    /// [`Error::InvalidData`] for an unknown name.
    pub fn from_name(
        name: &str,
        local_optimality: &LocalOptimalityConfig,
        diversity: &DiversityConfig,
    ) -> Result<Self, Error> {
        match name {
            "all" => Ok(SelectionStrategy::SelectAll),
            "minp" => Ok(SelectionStrategy::MinPeaks),
            "skyline" => Ok(SelectionStrategy::Skyline),
            "lopt" => Ok(SelectionStrategy::LocalOptimality {
                alpha: local_optimality.alpha,
            }),
            "diversity" => Ok(SelectionStrategy::Diversity {
                similarity_threshold: diversity.similarity_threshold,
            }),
            _ => Err(Error::InvalidData(format!(
                "Unknown selection policy: {name}"
            ))),
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SelectionStrategy {
    type Err = Error;

    /// Parses a policy name with default parameters
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(
            s,
            &LocalOptimalityConfig::default(),
            &DiversityConfig::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_names_round_trip() {
        for name in ["all", "minp", "skyline", "lopt", "diversity"] {
            let strategy: SelectionStrategy = name.parse().unwrap();
            assert_eq!(strategy.name(), name);
        }
        assert!("best".parse::<SelectionStrategy>().is_err());
    }

    #[test]
    fn parameters_come_from_config() {
        let strategy = SelectionStrategy::from_name(
            "lopt",
            &LocalOptimalityConfig { alpha: 0.2 },
            &DiversityConfig::default(),
        )
        .unwrap();
        assert_eq!(strategy, SelectionStrategy::LocalOptimality { alpha: 0.2 });
    }
}
