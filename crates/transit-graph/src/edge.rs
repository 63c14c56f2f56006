//! Undirected edges between two stations.

use std::fmt;

use crate::geometry::Color;
use crate::station::StationId;

/// Opaque edge identity, assigned by the graph store at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(pub u64);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge#{}", self.0)
    }
}

/// An undirected link between two distinct stations.
///
/// `a` and `b` record creation order only. The edge itself has no direction;
/// anything that travels along it keeps its own orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub id: EdgeId,
    pub a: StationId,
    pub b: StationId,
    pub color: Color,
}

impl Edge {
    /// Whether `station` is one of the two endpoints.
    pub fn touches(&self, station: StationId) -> bool {
        self.a == station || self.b == station
    }

    /// The endpoint opposite `station`, or `None` if `station` is not on this edge.
    pub fn other(&self, station: StationId) -> Option<StationId> {
        if station == self.a {
            Some(self.b)
        } else if station == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Both endpoints in creation order.
    pub fn endpoints(&self) -> (StationId, StationId) {
        (self.a, self.b)
    }
}
