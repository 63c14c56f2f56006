//! Error types for transit-graph.

use thiserror::Error;

use crate::edge::EdgeId;
use crate::station::StationId;

/// Result type for transit-graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur when addressing the graph store.
///
/// Rejected-but-valid requests (self loops, duplicate edges, stations placed
/// on top of each other) are outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No station with this id exists in the store.
    #[error("unknown station: {0}")]
    UnknownStation(StationId),

    /// No edge with this id exists in the store.
    #[error("unknown edge: {0}")]
    UnknownEdge(EdgeId),
}
