mod common;

use std::collections::HashSet;

use proptest::prelude::*;
use route_recovery_core::{
    Channel, Trip, WorkingWeights,
    prediction::{PenaltyConfig, penalized_paths, penalized_paths_with},
};

#[test]
fn penalization_on_a_grid_ends_near_observed_duration() {
    let graph = common::grid(5, 5);
    let trip = Trip::new(1, 0, 24, 150.0);
    let paths = penalized_paths(&graph, &trip, &PenaltyConfig::default()).unwrap();

    assert!(paths.len() >= 2);
    assert!(paths.len() <= graph.edge_count() + 2);
    for path in &paths {
        assert_eq!(graph.node_id(path.source()), 0);
        assert_eq!(graph.node_id(path.target()), 24);
    }
}

proptest! {
    #[test]
    fn recomputations_bounded_by_penalized_edges(
        edges in common::edges_strategy(8),
        source in 0i64..8,
        target in 0i64..8,
        observed in 1u32..400,
    ) {
        let graph = common::graph_from_edges(&edges);
        let trip = Trip::new(1, source, target, f64::from(observed));

        if let Ok(paths) = penalized_paths(&graph, &trip, &PenaltyConfig::default()) {
            prop_assert!(!paths.is_empty());
            // every path but the last had its edges penalized
            let penalized: HashSet<_> = paths[..paths.len() - 1]
                .iter()
                .flat_map(|path| path.edges().iter().copied())
                .collect();
            prop_assert!(
                paths.len() - 1 <= penalized.len() + 1,
                "{} recomputations after penalizing {} edges",
                paths.len() - 1,
                penalized.len()
            );
            prop_assert!(penalized.len() <= graph.edge_count());
        }
    }

    #[test]
    fn reused_weights_are_reset(
        edges in common::edges_strategy(6),
        observed in 1u32..400,
    ) {
        let graph = common::graph_from_edges(&edges);
        let mut weights = WorkingWeights::from_channel(&graph, Channel::Distance);
        let endpoints = (graph.node_index(edges[0].0), graph.node_index(edges[0].1));
        let (Ok(source), Ok(target)) = endpoints else {
            return Ok(());
        };

        let _ = penalized_paths_with(
            &graph,
            source,
            target,
            f64::from(observed),
            &PenaltyConfig::default(),
            &mut weights,
        );
        prop_assert!(weights.matches_channel(&graph, Channel::Duration));
    }
}
