use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown node id {0}")]
    UnknownNode(NodeId),
    #[error("No path found from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },
    #[error("Least squares solve failed: {0}")]
    LeastSquares(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
