//! Transit Sandbox
//!
//! An interactive sandbox: place stations, connect them, and watch buses run
//! over the network you draw.
//!
//! # Architecture
//!
//! - **Session**: Owns the graph, the motion engine and an event journal
//! - **Interaction**: Pointer position and current selection, mapped to presses
//! - **Server**: Ticks the session on a fixed frame interval and streams snapshots
//! - **REST API**: Press, pointer, snapshot and cycle queries
//!
//! # Usage
//!
//! ```ignore
//! let session = Session::new(SessionConfig::from_env()?);
//! let server = VisServer::new(session);
//! server.serve(3000).await?;
//! ```

mod config;
mod error;
mod events;
mod interaction;
mod server;
mod session;

pub use config::SessionConfig;
pub use error::{Error, Result};
pub use events::{EdgeView, PendingLine, RenderSnapshot, SessionEvent, StationView, TokenView};
pub use interaction::{Interaction, PointerButton, PressOutcome};
pub use server::VisServer;
pub use session::Session;
