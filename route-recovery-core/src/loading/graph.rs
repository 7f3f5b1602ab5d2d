use std::{fs::File, io::Read, path::Path};

use log::{debug, info, warn};
use serde::Deserialize;

use crate::{
    Error, HighwayClass, Meters, NodeId, RoadGraph, Seconds,
    model::RoadEdge,
};

/// One row of the edge table
#[derive(Debug, Deserialize)]
struct EdgeRow {
    u: NodeId,
    v: NodeId,
    length: Meters,
    travel_time: Seconds,
    #[serde(default)]
    highway: String,
    #[serde(default)]
    way_id: Option<i64>,
}

/// Load a road graph from an edge table with the columns
/// `u,v,length,travel_time,highway[,way_id]`.
///
/// # Errors
///
/// Fails if the file cannot be opened or its header is unreadable.
pub fn load_graph(path: &Path) -> Result<RoadGraph, Error> {
    info!("Loading road graph from {}", path.display());
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    read_graph(file)
}

/// Build a road graph from CSV data.
///
/// Malformed rows and rows with negative or non-finite weights are skipped
/// with a warning. Self-loops are dropped and parallel edges keep the
/// faster one.
///
/// # Errors
///
/// Fails if the header cannot be read.
pub fn read_graph<R: Read>(reader: R) -> Result<RoadGraph, Error> {
    let mut reader = csv::Reader::from_reader(reader);
    reader.headers()?;

    let mut graph = RoadGraph::new();
    let mut rows = 0usize;
    let mut skipped = 0usize;
    for (line, row) in reader.deserialize::<EdgeRow>().enumerate() {
        rows += 1;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping edge row {}: {e}", line + 1);
                skipped += 1;
                continue;
            }
        };
        if !valid_weight(row.length) || !valid_weight(row.travel_time) {
            warn!(
                "Skipping edge {} -> {} with invalid weights ({}, {})",
                row.u, row.v, row.length, row.travel_time
            );
            skipped += 1;
            continue;
        }

        let mut edge = RoadEdge::new(
            row.length,
            row.travel_time,
            HighwayClass::from_tag(&row.highway),
        );
        if let Some(way_id) = row.way_id {
            edge = edge.with_way_id(way_id);
        }
        if graph.add_edge(row.u, row.v, edge).is_none() {
            skipped += 1;
        }
    }

    debug!("Read {rows} edge rows, skipped {skipped}");
    info!(
        "Road graph has {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn valid_weight(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
