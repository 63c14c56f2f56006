//! Cycle detection over the undirected station graph.
//!
//! Depth-first walk tracking each station's immediate parent: reaching an
//! already-visited station that is not the parent closes a cycle. Every
//! component is walked, so disconnected graphs are covered.
//!
//! The walk keeps its own frame stack instead of recursing, so a long path
//! of stations cannot exhaust the thread stack. Visit order matches the
//! recursive formulation.

use std::collections::HashMap;

use crate::station::{Station, StationId};

/// One pending step of the walk: a station, the station we came from, and
/// how far through its adjacency list we have got.
struct Frame {
    station: usize,
    parent: Option<StationId>,
    cursor: usize,
}

/// Whether the graph described by `stations` contains a cycle.
///
/// Duplicate adjacency entries between the same pair count as a cycle of
/// length two. Adjacency entries naming stations outside `stations` are
/// ignored.
pub fn has_cycle(stations: &[Station]) -> bool {
    let slot: HashMap<StationId, usize> = stations
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id, i))
        .collect();
    let mut visited = vec![false; stations.len()];
    let mut stack: Vec<Frame> = Vec::new();

    for root in 0..stations.len() {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        stack.push(Frame {
            station: root,
            parent: None,
            cursor: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let current = &stations[frame.station];
            let Some(&next) = current.adjacent.get(frame.cursor) else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            let Some(&next_slot) = slot.get(&next) else {
                continue;
            };
            if !visited[next_slot] {
                visited[next_slot] = true;
                let parent = Some(current.id);
                stack.push(Frame {
                    station: next_slot,
                    parent,
                    cursor: 0,
                });
            } else if Some(next) != frame.parent {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Color, Point};
    use crate::store::GraphStore;
    use proptest::prelude::*;

    fn path(n: usize) -> (GraphStore, Vec<StationId>) {
        let mut store = GraphStore::new();
        let ids: Vec<_> = (0..n)
            .map(|i| store.add_station(Point::new(i as f32 * 10.0, 0.0), Color::WHITE))
            .collect();
        for pair in ids.windows(2) {
            store.add_edge(pair[0], pair[1], Color::BLUE).unwrap();
        }
        (store, ids)
    }

    #[test]
    fn empty_graph_has_no_cycle() {
        assert!(!has_cycle(&[]));
    }

    #[test]
    fn isolated_stations_have_no_cycle() {
        let mut store = GraphStore::new();
        for i in 0..5 {
            store.add_station(Point::new(i as f32 * 10.0, 0.0), Color::WHITE);
        }
        assert!(!store.has_cycle());
    }

    #[test]
    fn triangle_is_a_cycle() {
        let (mut store, ids) = path(3);
        assert!(!store.has_cycle());
        store.add_edge(ids[2], ids[0], Color::BLUE).unwrap();
        assert!(store.has_cycle());
    }

    #[test]
    fn star_is_acyclic() {
        let mut store = GraphStore::new();
        let hub = store.add_station(Point::ORIGIN, Color::WHITE);
        for i in 0..6 {
            let leaf = store.add_station(Point::new(10.0, i as f32 * 10.0), Color::WHITE);
            store.add_edge(hub, leaf, Color::BLUE).unwrap();
        }
        assert!(!store.has_cycle());
    }

    #[test]
    fn cycle_in_second_component_is_found() {
        let (mut store, _) = path(4);
        let a = store.add_station(Point::new(0.0, 50.0), Color::WHITE);
        let b = store.add_station(Point::new(10.0, 50.0), Color::WHITE);
        let c = store.add_station(Point::new(5.0, 60.0), Color::WHITE);
        store.add_edge(a, b, Color::BLUE).unwrap();
        store.add_edge(b, c, Color::BLUE).unwrap();
        assert!(!store.has_cycle());
        store.add_edge(c, a, Color::BLUE).unwrap();
        assert!(store.has_cycle());
    }

    #[test]
    fn duplicate_adjacency_counts_as_cycle() {
        let mut a = Station::new(StationId(0), Point::ORIGIN, Color::WHITE);
        let mut b = Station::new(StationId(1), Point::new(10.0, 0.0), Color::WHITE);
        a.adjacent = vec![b.id, b.id];
        b.adjacent = vec![a.id, a.id];
        assert!(has_cycle(&[a, b]));
    }

    #[test]
    fn long_path_does_not_overflow() {
        let (store, _) = path(100_000);
        assert!(!store.has_cycle());
    }

    proptest! {
        #[test]
        fn path_is_acyclic_until_closed(n in 3usize..64) {
            let (mut store, ids) = path(n);
            prop_assert!(!store.has_cycle());
            store.add_edge(ids[0], ids[n - 1], Color::BLUE).unwrap();
            prop_assert!(store.has_cycle());
        }

        #[test]
        fn trees_are_acyclic(parents in prop::collection::vec(any::<prop::sample::Index>(), 1..64)) {
            let mut store = GraphStore::new();
            let mut ids = vec![store.add_station(Point::ORIGIN, Color::WHITE)];
            for (i, parent) in parents.iter().enumerate() {
                let id = store.add_station(Point::new(i as f32, 1.0), Color::WHITE);
                let parent = ids[parent.index(ids.len())];
                store.add_edge(parent, id, Color::BLUE).unwrap();
                ids.push(id);
            }
            prop_assert!(!store.has_cycle());
        }
    }
}
