mod common;

use petgraph::Direction;
use proptest::prelude::*;
use route_recovery_core::{
    Channel, Trip,
    prediction::{
        DurationBounds, ResourceConstrainedConfig, bounded_paths, resource_constrained_paths,
        via_node_paths,
    },
    routing::{KShortestPaths, dijkstra_tree},
};

#[test]
fn k_shortest_paths_on_a_grid_are_simple_and_ordered() {
    let graph = common::grid(4, 4);
    let source = graph.node_index(0).unwrap();
    let target = graph.node_index(15).unwrap();

    let paths: Vec<_> = KShortestPaths::new(&graph, source, target, &Channel::Duration)
        .take(50)
        .collect();
    assert_eq!(paths.len(), 50);

    for pair in paths.windows(2) {
        assert!(pair[0].0 <= pair[1].0);
    }
    for (cost, path) in &paths {
        let mut nodes = path.nodes().to_vec();
        nodes.sort_unstable();
        nodes.dedup();
        assert_eq!(nodes.len(), path.len(), "path revisits a node");
        assert_eq!(*cost, path.duration(&graph));
    }
}

#[test]
fn resource_constrained_on_a_grid() {
    let graph = common::grid(4, 4);
    let trip = Trip::new(3, 0, 15, 70.0);
    let paths =
        resource_constrained_paths(&graph, &trip, &ResourceConstrainedConfig::default()).unwrap();

    assert!(!paths.is_empty());
    for (duration, path) in &paths {
        assert!(*duration > 63.0 && *duration < 77.0);
        assert_eq!(*duration, path.duration(&graph));
    }
}

proptest! {
    #[test]
    fn bounded_paths_stay_in_bounds(
        edges in common::edges_strategy(7),
        lower in 0u32..80,
        width in 0u32..80,
        max_kept in 1usize..20,
    ) {
        let graph = common::graph_from_edges(&edges);
        let source = graph.node_index(edges[0].0).unwrap();
        let target = graph.node_index(edges[0].1).unwrap();
        let bounds = DurationBounds::new(f64::from(lower), f64::from(lower + width));
        let config = ResourceConstrainedConfig { max_kept, ..Default::default() };

        if let Ok(paths) = bounded_paths(&graph, source, target, bounds, &config) {
            prop_assert!(paths.len() <= max_kept);
            for pair in paths.windows(2) {
                prop_assert!(pair[0].0 <= pair[1].0);
            }
            for (duration, _) in &paths {
                prop_assert!(bounds.lower < *duration && *duration < bounds.upper);
            }
        }
    }

    #[test]
    fn via_nodes_lie_in_both_balls(
        edges in common::edges_strategy(7),
        upper in 0u32..120,
    ) {
        let graph = common::graph_from_edges(&edges);
        let source = graph.node_index(edges[0].0).unwrap();
        let target = graph.node_index(edges[edges.len() - 1].1).unwrap();
        let upper = f64::from(upper);

        let forward = dijkstra_tree(&graph, source, Direction::Outgoing, &Channel::Duration, None);
        let backward = dijkstra_tree(&graph, target, Direction::Incoming, &Channel::Duration, None);

        for via in via_node_paths(&graph, source, target, upper) {
            prop_assert!(via.path.duration(&graph) <= upper);
            prop_assert_eq!(via.path.source(), source);
            prop_assert_eq!(via.path.target(), target);
            for id in via.via_nodes {
                let node = graph.node_index(id).unwrap();
                prop_assert!(forward.cost(node).is_some_and(|cost| cost <= upper));
                prop_assert!(backward.cost(node).is_some_and(|cost| cost <= upper));
            }
        }
    }
}
