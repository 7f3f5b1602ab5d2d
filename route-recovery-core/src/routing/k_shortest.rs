//! Successive shortest simple paths (Yen's deviation search).
//!
//! [`KShortestPaths`] is a lazy iterator: each call to `next` produces the
//! next simple path in non-decreasing cost order, so callers decide when
//! to stop and the search cost grows with the number of paths consumed.

use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashSet;
use petgraph::graph::NodeIndex;

use super::dijkstra::{Exclusions, shortest_path, shortest_path_excluding};
use crate::{CandidatePath, RoadGraph, Seconds, model::EdgeWeights};

struct Candidate {
    cost: Seconds,
    sequence: usize,
    path: CandidatePath,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

// Min-heap by cost, earlier discoveries first on ties
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lazy enumeration of simple paths between two nodes by increasing cost
pub struct KShortestPaths<'g, W: EdgeWeights> {
    graph: &'g RoadGraph,
    weights: &'g W,
    source: NodeIndex,
    target: NodeIndex,
    accepted: Vec<CandidatePath>,
    candidates: BinaryHeap<Candidate>,
    seen: HashSet<Vec<NodeIndex>>,
    exclusions: Exclusions,
    sequence: usize,
    started: bool,
}

impl<'g, W: EdgeWeights> KShortestPaths<'g, W> {
    pub fn new(graph: &'g RoadGraph, source: NodeIndex, target: NodeIndex, weights: &'g W) -> Self {
        Self {
            graph,
            weights,
            source,
            target,
            accepted: Vec::new(),
            candidates: BinaryHeap::new(),
            seen: HashSet::new(),
            exclusions: Exclusions::new(graph),
            sequence: 0,
            started: false,
        }
    }

    fn push_candidate(&mut self, path: CandidatePath) {
        if !self.seen.insert(path.nodes().to_vec()) {
            return;
        }
        let cost = path.weight(self.graph, self.weights);
        self.sequence += 1;
        self.candidates.push(Candidate {
            cost,
            sequence: self.sequence,
            path,
        });
    }

    /// Generate the deviations of the most recently accepted path
    fn expand_last(&mut self) {
        let Some(last) = self.accepted.last().cloned() else {
            return;
        };
        let last_nodes = last.nodes();
        let last_edges = last.edges();

        for spur_index in 0..last_nodes.len().saturating_sub(1) {
            let spur_node = last_nodes[spur_index];
            let root_nodes = &last_nodes[..=spur_index];

            self.exclusions.clear();
            // Edges leaving the spur node along any accepted path sharing this root
            for path in &self.accepted {
                if path.len() > spur_index + 1 && path.nodes()[..=spur_index] == *root_nodes {
                    self.exclusions.exclude_edge(path.edges()[spur_index]);
                }
            }
            // The root itself may not be revisited
            for &node in &root_nodes[..spur_index] {
                self.exclusions.exclude_node(node);
            }

            let Some((_, spur_path)) = shortest_path_excluding(
                self.graph,
                spur_node,
                self.target,
                self.weights,
                Some(&self.exclusions),
            ) else {
                continue;
            };

            let (spur_nodes, spur_edges) = spur_path.into_parts();
            let mut nodes = root_nodes[..spur_index].to_vec();
            nodes.extend(spur_nodes);
            let mut edges = last_edges[..spur_index].to_vec();
            edges.extend(spur_edges);

            self.push_candidate(CandidatePath::new(nodes, edges));
        }
    }
}

impl<W: EdgeWeights> Iterator for KShortestPaths<'_, W> {
    type Item = (Seconds, CandidatePath);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            let (cost, path) = shortest_path(self.graph, self.source, self.target, self.weights)?;
            self.seen.insert(path.nodes().to_vec());
            self.accepted.push(path.clone());
            return Some((cost, path));
        }

        self.expand_last();

        let Candidate { cost, path, .. } = self.candidates.pop()?;
        self.accepted.push(path.clone());
        Some((cost, path))
    }
}
