//! The sandbox session: one graph, its tokens, and everything that happened.
//!
//! This is the surface an interaction layer talks to. Pointer handling lives
//! in [`crate::interaction`]; everything here takes resolved station ids and
//! logical coordinates.

use tracing::{debug, error, info};
use transit_graph::{Color, ConnectOutcome, GraphStore, Point, StationId};
use transit_motion::{MotionEngine, MotionError, TickReport, TokenId};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::events::{RenderSnapshot, SessionEvent};

/// A single interactive session.
pub struct Session {
    config: SessionConfig,
    graph: GraphStore,
    motion: MotionEngine,
    /// Set once the first edge has put tokens on the graph.
    bootstrapped: bool,
    frame: u64,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create an empty session.
    pub fn new(config: SessionConfig) -> Self {
        info!(
            node_radius = config.node_radius,
            traversal_secs = config.motion.traversal_duration,
            seed = config.motion.seed,
            "session started"
        );
        Self {
            motion: MotionEngine::new(config.motion),
            config,
            graph: GraphStore::new(),
            bootstrapped: false,
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Place a station unless one already sits within the hit radius.
    pub fn place_station(&mut self, position: Point, color: Color) -> Option<StationId> {
        let station = self
            .graph
            .place_station(position, color, self.config.node_radius)?;
        self.events.push(SessionEvent::StationPlaced {
            station,
            position,
            frame: self.frame,
        });
        Some(station)
    }

    /// Connect two stations.
    ///
    /// The first edge created in a session also puts the bootstrap tokens on
    /// it, departing `a`.
    pub fn connect(&mut self, a: StationId, b: StationId, color: Color) -> Result<ConnectOutcome> {
        let outcome = self.graph.add_edge(a, b, color)?;
        let ConnectOutcome::Created(edge) = outcome else {
            debug!(%a, %b, ?outcome, "connect ignored");
            return Ok(outcome);
        };

        self.events.push(SessionEvent::EdgeConnected {
            edge,
            a,
            b,
            frame: self.frame,
        });

        if !self.bootstrapped {
            self.bootstrapped = true;
            let tokens = self.motion.spawn_batch(
                &self.graph,
                edge,
                a,
                self.config.token_color,
                self.config.bootstrap_tokens,
            )?;
            info!(count = tokens.len(), %edge, "bootstrap tokens spawned");
            self.events.push(SessionEvent::TokensSpawned {
                tokens,
                edge,
                departing: a,
                frame: self.frame,
            });
        }

        Ok(outcome)
    }

    /// Advance every token by `elapsed_seconds`.
    ///
    /// Each token that becomes stranded is journalled once, on the tick it
    /// first gets stuck.
    pub fn tick(&mut self, elapsed_seconds: f32) -> Result<TickReport> {
        self.frame += 1;
        match self.motion.tick(&self.graph, elapsed_seconds) {
            Ok(report) => Ok(report),
            Err(err @ MotionError::Stranded { .. }) => {
                error!(frame = self.frame, "graph invariant broken: {}", err);
                // The error names only the first; journal every new one.
                let newly: Vec<(TokenId, StationId)> = self
                    .motion
                    .tokens()
                    .iter()
                    .filter_map(|t| Some((t.id, t.stranded?)))
                    .filter(|(id, _)| !self.journalled_stranding(*id))
                    .collect();
                for (token, station) in newly {
                    self.events.push(SessionEvent::TokenStranded {
                        token,
                        station,
                        frame: self.frame,
                    });
                }
                Err(err.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn journalled_stranding(&self, token: TokenId) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, SessionEvent::TokenStranded { token: t, .. } if *t == token))
    }

    /// Read-only view for a renderer.
    pub fn snapshot_for_render(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self.frame, &self.graph, self.motion.tokens())
    }

    /// Whether the current graph contains a cycle. Not cached.
    pub fn has_cycle(&self) -> bool {
        self.graph.has_cycle()
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn motion(&self) -> &MotionEngine {
        &self.motion
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get all recorded events.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Get the number of events recorded.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Number of ticks so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
