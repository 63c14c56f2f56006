//! Stations: placed points with an ordered adjacency list.

use std::fmt;

use crate::geometry::{Color, Point};

/// Opaque station identity, assigned by the graph store at creation time.
///
/// Coordinates are an attribute of a station, never its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "station#{}", self.0)
    }
}

/// A station in the graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub id: StationId,
    pub position: Point,
    pub color: Color,
    /// Directly connected stations, in the order their edges were created.
    pub adjacent: Vec<StationId>,
}

impl Station {
    pub(crate) fn new(id: StationId, position: Point, color: Color) -> Self {
        Self {
            id,
            position,
            color,
            adjacent: Vec::new(),
        }
    }

    /// Number of adjacency entries.
    pub fn degree(&self) -> usize {
        self.adjacent.len()
    }

    /// Whether `other` appears in this station's adjacency list.
    pub fn is_adjacent(&self, other: StationId) -> bool {
        self.adjacent.contains(&other)
    }

    /// Whether `point` lies strictly inside the hit circle of this station.
    pub fn hit(&self, point: Point, radius: f32) -> bool {
        self.position.distance(&point) < radius
    }
}
