//! Session events and render snapshots.

use serde::{Deserialize, Serialize};
use transit_graph::{EdgeId, GraphStore, Point, StationId};
use transit_motion::{Token, TokenId};

/// Events recorded as a session evolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A station was placed
    StationPlaced {
        station: StationId,
        position: Point,
        frame: u64,
    },

    /// Two stations were connected by a new edge
    EdgeConnected {
        edge: EdgeId,
        a: StationId,
        b: StationId,
        frame: u64,
    },

    /// Tokens were put on the graph
    TokensSpawned {
        tokens: Vec<TokenId>,
        edge: EdgeId,
        departing: StationId,
        frame: u64,
    },

    /// A token arrived at a station with no neighbours
    TokenStranded {
        token: TokenId,
        station: StationId,
        frame: u64,
    },
}

impl SessionEvent {
    /// Get the frame number for this event.
    pub fn frame(&self) -> u64 {
        match self {
            SessionEvent::StationPlaced { frame, .. } => *frame,
            SessionEvent::EdgeConnected { frame, .. } => *frame,
            SessionEvent::TokensSpawned { frame, .. } => *frame,
            SessionEvent::TokenStranded { frame, .. } => *frame,
        }
    }
}

/// A station as drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationView {
    pub id: StationId,
    pub position: Point,
    pub color: String,
    pub degree: usize,
}

/// An edge as drawn, endpoints resolved to positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeView {
    pub id: EdgeId,
    pub from: Point,
    pub to: Point,
    pub color: String,
}

/// A token as drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenView {
    pub id: TokenId,
    pub position: Point,
    pub heading: f32,
    pub color: String,
    pub edge: EdgeId,
    pub progress: f32,
}

impl From<&Token> for TokenView {
    fn from(token: &Token) -> Self {
        Self {
            id: token.id,
            position: token.position,
            heading: token.heading,
            color: token.color.to_css(),
            edge: token.traversal.edge,
            progress: token.progress,
        }
    }
}

/// The line from the selected station to the pointer while a connection is
/// being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingLine {
    pub from: Point,
    pub to: Point,
}

/// Read-only view of a session for a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub frame: u64,
    pub stations: Vec<StationView>,
    pub edges: Vec<EdgeView>,
    pub tokens: Vec<TokenView>,
    pub pending: Option<PendingLine>,
}

impl RenderSnapshot {
    /// Build a snapshot of `graph` and `tokens` at `frame`.
    pub fn capture(frame: u64, graph: &GraphStore, tokens: &[Token]) -> Self {
        let stations = graph
            .stations()
            .iter()
            .map(|s| StationView {
                id: s.id,
                position: s.position,
                color: s.color.to_css(),
                degree: s.degree(),
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .filter_map(|e| {
                let from = graph.station(e.a)?.position;
                let to = graph.station(e.b)?.position;
                Some(EdgeView {
                    id: e.id,
                    from,
                    to,
                    color: e.color.to_css(),
                })
            })
            .collect();

        Self {
            frame,
            stations,
            edges,
            tokens: tokens.iter().map(TokenView::from).collect(),
            pending: None,
        }
    }
}
