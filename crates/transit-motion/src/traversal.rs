//! Directed traversal state riding on top of an undirected edge.
//!
//! The graph store's edges have no direction. Each token owns a
//! [`Traversal`] that says which way it is going along its current edge,
//! so turning one token around never affects any other token or the edge.

use serde::{Deserialize, Serialize};
use transit_graph::{Edge, EdgeId, StationId};

use crate::error::{MotionError, Result};

/// One leg of a token's journey: along `edge`, from `from` toward `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Traversal {
    pub edge: EdgeId,
    pub from: StationId,
    pub to: StationId,
}

impl Traversal {
    /// Orient `edge` so that it departs `station`.
    pub fn departing(edge: &Edge, station: StationId) -> Result<Self> {
        let to = edge.other(station).ok_or(MotionError::NotOnEdge {
            station,
            edge: edge.id,
        })?;
        Ok(Self {
            edge: edge.id,
            from: station,
            to,
        })
    }

    /// The same edge travelled the other way.
    pub fn reversed(self) -> Self {
        Self {
            edge: self.edge,
            from: self.to,
            to: self.from,
        }
    }
}
