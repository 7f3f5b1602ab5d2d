use criterion::{Criterion, black_box, criterion_group, criterion_main};
use route_recovery_core::{
    Channel, HighwayClass, RoadGraph, Trip,
    model::RoadEdge,
    prediction::{PenaltyConfig, penalized_paths},
    routing::KShortestPaths,
};

const SIDE: i64 = 30;

fn grid() -> RoadGraph {
    let mut graph = RoadGraph::new();
    for row in 0..SIDE {
        for col in 0..SIDE {
            let id = row * SIDE + col;
            let mut neighbours = Vec::with_capacity(2);
            if col + 1 < SIDE {
                neighbours.push(id + 1);
            }
            if row + 1 < SIDE {
                neighbours.push(id + SIDE);
            }
            for next in neighbours {
                let duration = 5.0 + ((id * 7 + next * 3) % 11) as f64;
                let class = if row % 5 == 0 {
                    HighwayClass::Primary
                } else {
                    HighwayClass::Residential
                };
                graph.add_edge(id, next, RoadEdge::new(duration * 12.0, duration, class));
                graph.add_edge(next, id, RoadEdge::new(duration * 12.0, duration, class));
            }
        }
    }
    graph
}

fn criterion_benchmark(c: &mut Criterion) {
    let graph = grid();
    let corner = SIDE * SIDE - 1;

    c.bench_function("penalization corner to corner", |b| {
        let trip = Trip::new(1, 0, corner, 900.0);
        let config = PenaltyConfig::default();
        b.iter(|| penalized_paths(black_box(&graph), black_box(&trip), &config));
    });

    c.bench_function("k shortest 100 paths", |b| {
        let (Ok(source), Ok(target)) = (graph.node_index(0), graph.node_index(corner)) else {
            return;
        };
        b.iter(|| {
            KShortestPaths::new(black_box(&graph), source, target, &Channel::Duration)
                .take(100)
                .count()
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
