mod common;

use proptest::prelude::*;
use route_recovery_core::{
    CandidatePath, Channel, RoadGraph,
    routing::KShortestPaths,
    selection::{SelectionStrategy, diverse_paths, overlap_ratio},
};

fn candidates(graph: &RoadGraph, from: i64, to: i64, k: usize) -> Vec<CandidatePath> {
    let source = graph.node_index(from).unwrap();
    let target = graph.node_index(to).unwrap();
    KShortestPaths::new(graph, source, target, &Channel::Duration)
        .take(k)
        .map(|(_, path)| path)
        .collect()
}

#[test]
fn every_policy_selects_from_the_candidates() {
    let graph = common::grid(4, 4);
    let candidates = candidates(&graph, 0, 15, 20);
    let all = SelectionStrategy::SelectAll.select(&graph, &candidates);

    for name in ["minp", "skyline", "lopt", "diversity"] {
        let strategy: SelectionStrategy = name.parse().unwrap();
        let result = strategy.select(&graph, &candidates);
        assert!(result.nodes.is_subset(&all.nodes), "{name}");
        assert!(result.edges.is_subset(&all.edges), "{name}");
    }
}

#[test]
fn skyline_always_keeps_the_fastest_candidate() {
    let graph = common::grid(3, 3);
    let candidates = candidates(&graph, 0, 8, 10);
    let fastest = &candidates[0];

    let skyline = SelectionStrategy::Skyline.select(&graph, &candidates);
    for node in fastest.nodes() {
        assert!(skyline.nodes.contains(node));
    }

    let min_peaks = SelectionStrategy::MinPeaks.select(&graph, &candidates);
    assert!(!min_peaks.is_empty());
    assert!(min_peaks.nodes.len() <= 9);
}

proptest! {
    #[test]
    fn diverse_paths_respect_the_threshold(
        edges in common::edges_strategy(7),
        threshold in 0.0f64..1.0,
    ) {
        let graph = common::graph_from_edges(&edges);
        let candidates = candidates(&graph, edges[0].0, edges[edges.len() - 1].1, 25);
        let accepted = diverse_paths(&graph, &candidates, threshold);

        prop_assert_eq!(accepted.is_empty(), candidates.is_empty());
        for (i, a) in accepted.iter().enumerate() {
            for b in &accepted[i + 1..] {
                prop_assert!(overlap_ratio(&graph, b, a) <= threshold);
            }
        }
    }

    #[test]
    fn skyline_is_idempotent(
        edges in common::edges_strategy(7),
    ) {
        let graph = common::graph_from_edges(&edges);
        let candidates = candidates(&graph, edges[0].0, edges[edges.len() - 1].1, 25);

        let first = SelectionStrategy::Skyline.select(&graph, &candidates);
        let second = SelectionStrategy::Skyline.select(&graph, &candidates);
        prop_assert_eq!(first, second);
    }
}
