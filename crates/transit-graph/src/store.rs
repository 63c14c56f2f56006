//! Graph store: owns every station and edge for the lifetime of a session.
//!
//! Stations and edges are never removed, so ids double as dense indices
//! into the backing vectors.

use tracing::debug;

use crate::cycle;
use crate::edge::{Edge, EdgeId};
use crate::error::{GraphError, Result};
use crate::geometry::{Color, Point};
use crate::index::ConnectionIndex;
use crate::station::{Station, StationId};

/// What happened when two stations were asked to connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A new edge was created.
    Created(EdgeId),
    /// The pair was already connected; nothing changed.
    Existing(EdgeId),
    /// Both ends were the same station; nothing changed.
    SelfLoop,
}

impl ConnectOutcome {
    /// The newly created edge, if any.
    pub fn edge(&self) -> Option<EdgeId> {
        match self {
            ConnectOutcome::Created(id) => Some(*id),
            ConnectOutcome::Existing(_) | ConnectOutcome::SelfLoop => None,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, ConnectOutcome::Created(_))
    }
}

/// Stations, edges and the connection index, kept in lockstep.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    stations: Vec<Station>,
    edges: Vec<Edge>,
    index: ConnectionIndex,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a station unconditionally and return its id.
    pub fn add_station(&mut self, position: Point, color: Color) -> StationId {
        let id = StationId(self.stations.len() as u64);
        self.stations.push(Station::new(id, position, color));
        debug!(%id, x = position.x, y = position.y, "station added");
        id
    }

    /// First station (in creation order) whose hit circle contains `position`.
    pub fn station_at(&self, position: Point, radius: f32) -> Option<StationId> {
        self.stations
            .iter()
            .find(|s| s.hit(position, radius))
            .map(|s| s.id)
    }

    /// Create a station unless one already lies within `radius` of `position`.
    pub fn place_station(&mut self, position: Point, color: Color, radius: f32) -> Option<StationId> {
        if let Some(existing) = self.station_at(position, radius) {
            debug!(%existing, "placement rejected: overlaps existing station");
            return None;
        }
        Some(self.add_station(position, color))
    }

    /// Connect two stations.
    ///
    /// Self loops and already-connected pairs leave the store untouched.
    /// Unknown station ids are an error.
    pub fn add_edge(&mut self, s1: StationId, s2: StationId, color: Color) -> Result<ConnectOutcome> {
        self.require_station(s1)?;
        self.require_station(s2)?;

        if s1 == s2 {
            return Ok(ConnectOutcome::SelfLoop);
        }
        if let Some(existing) = self.index.get(s1, s2) {
            return Ok(ConnectOutcome::Existing(existing));
        }

        let id = EdgeId(self.edges.len() as u64);
        let edge = Edge { id, a: s1, b: s2, color };
        self.index.insert(&edge);
        self.edges.push(edge);
        self.stations[s1.0 as usize].adjacent.push(s2);
        self.stations[s2.0 as usize].adjacent.push(s1);

        debug!(%id, a = %s1, b = %s2, "edge added");
        Ok(ConnectOutcome::Created(id))
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.0 as usize)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0 as usize)
    }

    /// Station lookup that reports a missing id as an error.
    pub fn require_station(&self, id: StationId) -> Result<&Station> {
        self.station(id).ok_or(GraphError::UnknownStation(id))
    }

    /// Edge lookup that reports a missing id as an error.
    pub fn require_edge(&self, id: EdgeId) -> Result<&Edge> {
        self.edge(id).ok_or(GraphError::UnknownEdge(id))
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Adjacency list of a station, empty for unknown ids.
    pub fn neighbors(&self, id: StationId) -> &[StationId] {
        self.station(id).map(|s| s.adjacent.as_slice()).unwrap_or(&[])
    }

    /// The edge joining two stations, if any.
    pub fn edge_between(&self, s1: StationId, s2: StationId) -> Option<&Edge> {
        self.index.get(s1, s2).and_then(|id| self.edge(id))
    }

    pub fn index(&self) -> &ConnectionIndex {
        &self.index
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Whether the graph currently contains a cycle. Computed on every call.
    pub fn has_cycle(&self) -> bool {
        cycle::has_cycle(&self.stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn store_with(points: &[(f32, f32)]) -> (GraphStore, Vec<StationId>) {
        let mut store = GraphStore::new();
        let ids = points
            .iter()
            .map(|&p| store.add_station(p.into(), Color::WHITE))
            .collect();
        (store, ids)
    }

    #[test]
    fn ids_are_unique_even_at_identical_coordinates() {
        let (store, ids) = store_with(&[(3.0, 3.0), (3.0, 3.0)]);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(store.station_count(), 2);
    }

    #[test]
    fn place_station_rejects_overlap() {
        let mut store = GraphStore::new();
        let first = store.place_station(Point::new(100.0, 100.0), Color::WHITE, 5.0);
        assert!(first.is_some());

        let overlap = store.place_station(Point::new(103.0, 100.0), Color::WHITE, 5.0);
        assert_eq!(overlap, None);
        assert_eq!(store.station_count(), 1);

        let apart = store.place_station(Point::new(120.0, 100.0), Color::WHITE, 5.0);
        assert!(apart.is_some());
        assert_eq!(store.station_count(), 2);
    }

    #[test]
    fn add_edge_links_both_adjacency_lists() {
        let (mut store, ids) = store_with(&[(0.0, 0.0), (10.0, 0.0)]);
        let outcome = store.add_edge(ids[0], ids[1], Color::BLUE).unwrap();

        let edge = outcome.edge().unwrap();
        assert_eq!(store.neighbors(ids[0]), &[ids[1]]);
        assert_eq!(store.neighbors(ids[1]), &[ids[0]]);
        assert_eq!(store.index().get(ids[0], ids[1]), Some(edge));
        assert_eq!(store.index().get(ids[1], ids[0]), Some(edge));
    }

    #[test]
    fn self_loop_is_a_no_op() {
        let (mut store, ids) = store_with(&[(0.0, 0.0)]);
        let outcome = store.add_edge(ids[0], ids[0], Color::BLUE).unwrap();

        assert_eq!(outcome, ConnectOutcome::SelfLoop);
        assert_eq!(outcome.edge(), None);
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.station(ids[0]).unwrap().degree(), 0);
    }

    #[test]
    fn duplicate_edge_is_a_no_op_in_either_order() {
        let (mut store, ids) = store_with(&[(0.0, 0.0), (10.0, 0.0)]);
        let first = store.add_edge(ids[0], ids[1], Color::BLUE).unwrap();
        let again = store.add_edge(ids[0], ids[1], Color::RED).unwrap();
        let reversed = store.add_edge(ids[1], ids[0], Color::GREEN).unwrap();

        let id = first.edge().unwrap();
        assert_eq!(again, ConnectOutcome::Existing(id));
        assert_eq!(reversed, ConnectOutcome::Existing(id));
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.edge(id).unwrap().color, Color::BLUE);
        assert_eq!(store.station(ids[0]).unwrap().degree(), 1);
    }

    #[test]
    fn unknown_station_is_an_error() {
        let (mut store, ids) = store_with(&[(0.0, 0.0)]);
        let err = store.add_edge(ids[0], StationId(42), Color::BLUE).unwrap_err();
        assert_eq!(err, GraphError::UnknownStation(StationId(42)));
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn station_at_prefers_creation_order() {
        let (store, ids) = store_with(&[(0.0, 0.0), (2.0, 0.0)]);
        assert_eq!(store.station_at(Point::new(1.0, 0.0), 5.0), Some(ids[0]));
        assert_eq!(store.station_at(Point::new(50.0, 0.0), 5.0), None);
    }

    proptest! {
        #[test]
        fn index_lookup_is_symmetric(
            n in 2usize..12,
            pairs in prop::collection::vec((0usize..12, 0usize..12), 0..40),
        ) {
            let mut store = GraphStore::new();
            let ids: Vec<_> = (0..n)
                .map(|i| store.add_station(Point::new(i as f32 * 20.0, 0.0), Color::WHITE))
                .collect();

            for (i, j) in pairs {
                let (a, b) = (ids[i % n], ids[j % n]);
                store.add_edge(a, b, Color::BLUE).unwrap();
            }

            for &a in &ids {
                for &b in &ids {
                    prop_assert_eq!(store.index().get(a, b), store.index().get(b, a));
                    prop_assert!(store.index().get(a, a).is_none());
                }
            }
        }

        #[test]
        fn repeated_connects_never_duplicate(
            n in 2usize..10,
            pairs in prop::collection::vec((0usize..10, 0usize..10), 0..60),
        ) {
            let mut store = GraphStore::new();
            let ids: Vec<_> = (0..n)
                .map(|i| store.add_station(Point::new(0.0, i as f32 * 20.0), Color::WHITE))
                .collect();

            for (i, j) in pairs {
                store.add_edge(ids[i % n], ids[j % n], Color::BLUE).unwrap();
            }

            for station in store.stations() {
                let mut seen = station.adjacent.clone();
                seen.sort();
                seen.dedup();
                prop_assert_eq!(seen.len(), station.degree());
            }
            prop_assert_eq!(store.index().len(), store.edge_count());
        }
    }
}
