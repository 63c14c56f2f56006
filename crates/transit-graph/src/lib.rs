//! Transit Station Graph
//!
//! An undirected graph of point stations joined by edges, built up one
//! placement or connection at a time.
//!
//! # Model
//!
//! - **Stations** carry an opaque [`StationId`], a position and an ordered
//!   adjacency list (edge creation order).
//! - **Edges** join two distinct stations. At most one edge exists per
//!   unordered pair; the graph store enforces this when edges are created.
//! - The **connection index** answers "which edge joins these two stations?"
//!   in either direction.
//!
//! Nothing is ever removed. Ids are dense and double as indices.
//!
//! # Cycle Detection
//!
//! [`has_cycle`] is a standalone diagnostic over the current graph. Nothing
//! in the graph store consults it.

mod cycle;
mod edge;
mod error;
mod geometry;
mod index;
mod station;
mod store;

pub use cycle::has_cycle;
pub use edge::{Edge, EdgeId};
pub use error::{GraphError, Result};
pub use geometry::{Color, Point};
pub use index::ConnectionIndex;
pub use station::{Station, StationId};
pub use store::{ConnectOutcome, GraphStore};

/// Default hit-test radius for stations, in logical canvas units.
pub const DEFAULT_NODE_RADIUS: f32 = 5.0;
