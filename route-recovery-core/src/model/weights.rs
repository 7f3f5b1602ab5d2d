//! Edge weight channels.
//!
//! `distance` and `duration` are immutable properties of the edges. The
//! penalized duration used by the calibration searches lives in a
//! [`WorkingWeights`] array that belongs to a single search run, so a shared
//! [`RoadGraph`] is never mutated and independent runs can proceed in
//! parallel.

use petgraph::graph::EdgeIndex;

use crate::{RoadGraph, Seconds};

/// Per-edge cost used by the graph searches
pub trait EdgeWeights {
    fn weight(&self, graph: &RoadGraph, edge: EdgeIndex) -> f64;
}

/// Immutable weight channels stored on the edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Length in meters
    Distance,
    /// Nominal travel time in seconds
    Duration,
}

impl EdgeWeights for Channel {
    fn weight(&self, graph: &RoadGraph, edge: EdgeIndex) -> f64 {
        let edge = graph.edge(edge);
        match self {
            Channel::Distance => edge.distance,
            Channel::Duration => edge.duration,
        }
    }
}

/// Mutable working weights (penalized durations) for one search run
#[derive(Debug, Clone)]
pub struct WorkingWeights {
    values: Vec<Seconds>,
}

impl WorkingWeights {
    /// Working weights initialised from an immutable channel
    pub fn from_channel(graph: &RoadGraph, channel: Channel) -> Self {
        let mut weights = Self {
            values: Vec::with_capacity(graph.edge_count()),
        };
        weights.reset(graph, channel);
        weights
    }

    /// Overwrite every working weight with the value of `channel`
    pub fn reset(&mut self, graph: &RoadGraph, channel: Channel) {
        self.values.clear();
        self.values
            .extend(graph.edge_indices().map(|edge| channel.weight(graph, edge)));
    }

    pub fn get(&self, edge: EdgeIndex) -> Seconds {
        self.values[edge.index()]
    }

    /// Set the working weight of an edge, clamping negative values to zero
    pub fn set(&mut self, edge: EdgeIndex, value: Seconds) {
        self.values[edge.index()] = value.max(0.0);
    }

    pub fn scale(&mut self, edge: EdgeIndex, factor: f64) {
        let current = self.get(edge);
        self.set(edge, current * factor);
    }

    /// Whether every working weight equals the value of `channel`
    pub fn matches_channel(&self, graph: &RoadGraph, channel: Channel) -> bool {
        self.values.len() == graph.edge_count()
            && graph
                .edge_indices()
                .all(|edge| self.get(edge) == channel.weight(graph, edge))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl EdgeWeights for WorkingWeights {
    fn weight(&self, _graph: &RoadGraph, edge: EdgeIndex) -> f64 {
        self.get(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HighwayClass, RoadEdge};

    fn graph() -> RoadGraph {
        let mut graph = RoadGraph::new();
        graph.add_edge(1, 2, RoadEdge::new(100.0, 10.0, HighwayClass::Primary));
        graph.add_edge(2, 3, RoadEdge::new(50.0, 7.5, HighwayClass::Primary));
        graph
    }

    #[test]
    fn reset_restores_the_channel() {
        let graph = graph();
        let mut weights = WorkingWeights::from_channel(&graph, Channel::Duration);
        let edge = graph.edge_indices().next().unwrap();

        weights.scale(edge, 3.0);
        assert_eq!(weights.get(edge), 30.0);
        assert!(!weights.matches_channel(&graph, Channel::Duration));

        weights.reset(&graph, Channel::Duration);
        assert!(weights.matches_channel(&graph, Channel::Duration));
    }

    #[test]
    fn negative_values_are_clamped() {
        let graph = graph();
        let mut weights = WorkingWeights::from_channel(&graph, Channel::Distance);
        let edge = graph.edge_indices().next().unwrap();

        weights.set(edge, -4.0);
        assert_eq!(weights.get(edge), 0.0);
    }
}
