//! Connection index: symmetric lookup from a station pair to its edge.
//!
//! Every edge is registered under both orderings, so `get(a, b)` and
//! `get(b, a)` always agree. The index never owns edges; it only maps
//! identities to the edge ids held by the graph store.

use std::collections::HashMap;

use crate::edge::{Edge, EdgeId};
use crate::station::StationId;

/// Symmetric station-pair → edge lookup.
#[derive(Debug, Clone, Default)]
pub struct ConnectionIndex {
    pairs: HashMap<(StationId, StationId), EdgeId>,
}

impl ConnectionIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `edge` under `(a, b)` and `(b, a)`.
    ///
    /// An existing entry for the pair is replaced; the graph store checks
    /// for duplicates before it gets here.
    pub fn insert(&mut self, edge: &Edge) {
        self.pairs.insert((edge.a, edge.b), edge.id);
        self.pairs.insert((edge.b, edge.a), edge.id);
    }

    /// Edge joining `s1` and `s2`, in either order.
    pub fn get(&self, s1: StationId, s2: StationId) -> Option<EdgeId> {
        self.pairs.get(&(s1, s2)).copied()
    }

    /// Whether an edge joins `s1` and `s2`.
    pub fn contains(&self, s1: StationId, s2: StationId) -> bool {
        self.pairs.contains_key(&(s1, s2))
    }

    /// Number of indexed edges (each edge occupies two keys).
    pub fn len(&self) -> usize {
        self.pairs.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Color;

    fn edge(id: u64, a: u64, b: u64) -> Edge {
        Edge {
            id: EdgeId(id),
            a: StationId(a),
            b: StationId(b),
            color: Color::BLUE,
        }
    }

    #[test]
    fn lookup_is_symmetric() {
        let mut index = ConnectionIndex::new();
        index.insert(&edge(7, 1, 2));

        assert_eq!(index.get(StationId(1), StationId(2)), Some(EdgeId(7)));
        assert_eq!(index.get(StationId(2), StationId(1)), Some(EdgeId(7)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn missing_pair_is_none_both_ways() {
        let mut index = ConnectionIndex::new();
        index.insert(&edge(0, 1, 2));

        assert_eq!(index.get(StationId(1), StationId(3)), None);
        assert_eq!(index.get(StationId(3), StationId(1)), None);
        assert!(!index.contains(StationId(2), StationId(3)));
    }

    #[test]
    fn empty_index() {
        let index = ConnectionIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }
}
