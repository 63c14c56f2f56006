//! Error types for transit-vis.

use thiserror::Error;
use transit_graph::GraphError;
use transit_motion::MotionError;

/// Result type for transit-vis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in a sandbox session or its server.
#[derive(Debug, Error)]
pub enum Error {
    /// Graph store rejected a request
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Motion engine error
    #[error("Motion error: {0}")]
    Motion(#[from] MotionError),

    /// Malformed configuration value
    #[error("Invalid config: {var}={value:?}")]
    Config { var: &'static str, value: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
