//! Reading road graphs and trips from CSV, grouping trips into time
//! windows and writing the tabular results.

mod batching;
pub mod de;
mod graph;
mod records;
mod trips;

pub use batching::batch_by_window;
pub use graph::{load_graph, read_graph};
pub use records::{
    HighwayRecord, PathRecord, SelectionRecord, candidates_by_trip, highway_records, path_records,
    read_records, selection_record, write_records, write_records_to_path,
};
pub use trips::{load_trips, read_trips};
