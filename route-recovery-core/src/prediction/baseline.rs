use crate::{CandidatePath, Channel, Error, RoadGraph, Trip};

/// Path minimising the given channel between the trip's endpoints
///
/// # Errors
///
/// Fails if an endpoint is unknown or the target is unreachable.
pub fn baseline_path(
    graph: &RoadGraph,
    trip: &Trip,
    channel: Channel,
) -> Result<CandidatePath, Error> {
    let source = graph.node_index(trip.source)?;
    let target = graph.node_index(trip.target)?;
    graph.shortest_path(source, target, &channel)
}

/// Shortest path by distance
pub fn shortest_path(graph: &RoadGraph, trip: &Trip) -> Result<CandidatePath, Error> {
    baseline_path(graph, trip, Channel::Distance)
}

/// Shortest path by nominal duration
pub fn fastest_path(graph: &RoadGraph, trip: &Trip) -> Result<CandidatePath, Error> {
    baseline_path(graph, trip, Channel::Duration)
}
