//! Transit Token Motion
//!
//! Moves tokens ("buses") continuously over a [`transit_graph::GraphStore`].
//!
//! # Legs and Orientation
//!
//! Edges in the graph are undirected. Each token owns a [`Traversal`] naming
//! the edge it is on and which end it left from, so orientation is per-token
//! state and turning one token around never disturbs another.
//!
//! # Branch Selection
//!
//! On arrival a token picks its next leg from the arrival station's degree:
//! a random neighbour at junctions, straight on through degree-2 stations,
//! and back the way it came at dead ends. See [`select_next`].
//!
//! # Timing
//!
//! A single leg clock is shared by all tokens, so every token completes a
//! leg in the same `traversal_duration` window.

mod branch;
mod engine;
mod error;
mod token;
mod traversal;

pub use branch::{select_next, Branch, BranchPolicy, UniformBranch};
pub use engine::{MotionConfig, MotionEngine, TickReport};
pub use error::{MotionError, Result};
pub use token::{Token, TokenId};
pub use traversal::Traversal;
