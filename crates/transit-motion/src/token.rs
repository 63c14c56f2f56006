//! Tokens ("buses") and their per-leg state.

use std::fmt;

use serde::{Deserialize, Serialize};
use transit_graph::{Color, EdgeId, GraphStore, Point, StationId};

use crate::error::Result;
use crate::traversal::Traversal;

/// A unique token identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token#{}", self.0)
    }
}

/// A token moving along the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    /// Current leg. Owned by the token, independent of every other token.
    pub traversal: Traversal,
    pub color: Color,
    /// Fraction of the current leg completed, `0.0..=1.0`.
    pub progress: f32,
    /// Rendered position.
    pub position: Point,
    /// Angle in radians from the leg's start toward its end.
    pub heading: f32,
    /// Isolated station the token is held at, if it ran out of track.
    #[serde(default)]
    pub stranded: Option<StationId>,
}

impl Token {
    /// Place a token at `departing`, about to travel along `edge`.
    pub fn new(
        id: TokenId,
        graph: &GraphStore,
        edge: EdgeId,
        departing: StationId,
        color: Color,
    ) -> Result<Self> {
        let traversal = Traversal::departing(graph.require_edge(edge)?, departing)?;
        let mut token = Self {
            id,
            traversal,
            color,
            progress: 0.0,
            position: Point::ORIGIN,
            heading: 0.0,
            stranded: None,
        };
        token.place(graph, 0.0)?;
        Ok(token)
    }

    /// Position the token `progress` of the way along its current leg and
    /// refresh its heading.
    pub(crate) fn place(&mut self, graph: &GraphStore, progress: f32) -> Result<()> {
        let from = graph.require_station(self.traversal.from)?.position;
        let to = graph.require_station(self.traversal.to)?.position;
        self.progress = progress;
        self.position = Point::lerp(from, to, progress);
        self.heading = from.heading_to(&to);
        Ok(())
    }

    /// Park the token on `station` until a later leg finds it a way out.
    pub(crate) fn hold(&mut self, graph: &GraphStore, station: StationId) -> Result<()> {
        self.position = graph.require_station(station)?.position;
        self.progress = 0.0;
        self.stranded = Some(station);
        Ok(())
    }

    pub fn is_stranded(&self) -> bool {
        self.stranded.is_some()
    }

    /// Station the token is heading toward.
    pub fn destination(&self) -> StationId {
        self.traversal.to
    }
}
