#![allow(dead_code)]

use proptest::prelude::*;
use route_recovery_core::{HighwayClass, NodeId, RoadGraph, model::RoadEdge};

pub const CLASSES: [HighwayClass; 4] = [
    HighwayClass::Residential,
    HighwayClass::Tertiary,
    HighwayClass::Primary,
    HighwayClass::Motorway,
];

/// Grid of `rows x cols` nodes, every neighbour pair connected both ways.
/// Node ids are `row * cols + col`; durations and classes vary per edge.
pub fn grid(rows: i64, cols: i64) -> RoadGraph {
    let mut graph = RoadGraph::new();
    let add = |graph: &mut RoadGraph, a: NodeId, b: NodeId| {
        let duration = 5.0 + ((a * 7 + b * 3) % 11) as f64;
        let class = CLASSES[((a + b) % 4) as usize];
        graph.add_edge(a, b, RoadEdge::new(duration * 12.0, duration, class));
        graph.add_edge(b, a, RoadEdge::new(duration * 12.0, duration, class));
    };
    for row in 0..rows {
        for col in 0..cols {
            let id = row * cols + col;
            if col + 1 < cols {
                add(&mut graph, id, id + 1);
            }
            if row + 1 < rows {
                add(&mut graph, id, id + cols);
            }
        }
    }
    graph
}

/// How `(from, to, duration, class)` edge lists are drawn for property tests
pub fn edges_strategy(nodes: i64) -> impl Strategy<Value = Vec<(NodeId, NodeId, u32, usize)>> {
    prop::collection::vec((0..nodes, 0..nodes, 1u32..40, 0usize..CLASSES.len()), 1..30)
}

pub fn graph_from_edges(edges: &[(NodeId, NodeId, u32, usize)]) -> RoadGraph {
    let mut graph = RoadGraph::new();
    for &(from, to, duration, class) in edges {
        // self-loops are dropped, their nodes still exist
        graph.add_node(from);
        graph.add_node(to);
        let duration = f64::from(duration);
        graph.add_edge(
            from,
            to,
            RoadEdge::new(duration * 10.0, duration, CLASSES[class]),
        );
    }
    graph
}
