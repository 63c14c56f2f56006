//! Error types for transit-motion.

use thiserror::Error;
use transit_graph::{EdgeId, GraphError, StationId};

use crate::token::TokenId;

/// Result type for transit-motion operations.
pub type Result<T> = std::result::Result<T, MotionError>;

/// Errors that can occur while moving tokens over the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MotionError {
    /// A token or traversal referred to something the graph store lacks.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// Two stations listed as adjacent have no edge in the connection index.
    #[error("no edge between adjacent stations {from} and {to}")]
    MissingEdge { from: StationId, to: StationId },

    /// A token was asked to depart from a station that is not on its edge.
    #[error("{station} is not an endpoint of {edge}")]
    NotOnEdge { station: StationId, edge: EdgeId },

    /// A token arrived at a station with no neighbours at all.
    ///
    /// Every station a token can reach has at least the edge it arrived on,
    /// so this means the graph store was corrupted upstream.
    #[error("token {token} stranded at isolated {station}")]
    Stranded { token: TokenId, station: StationId },
}
