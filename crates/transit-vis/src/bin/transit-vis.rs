//! Transit Sandbox server
//!
//! Serve an empty sandbox session and its canvas client.

use std::env;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transit_vis::{Session, SessionConfig, VisServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "transit_vis=info,transit_motion=info,transit_graph=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);

    let config = SessionConfig::from_env()?;
    tracing::info!(
        frame_ms = config.frame_interval.as_millis() as u64,
        bootstrap_tokens = config.bootstrap_tokens,
        "Starting transit sandbox"
    );

    let server = VisServer::new(Session::new(config));
    server.serve(port).await?;

    Ok(())
}
