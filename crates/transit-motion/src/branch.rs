//! Branch selection: which edge a token takes after arriving at a station.
//!
//! The choice depends only on the arrival station's degree:
//!
//! | degree | next leg |
//! |--------|----------|
//! | > 2    | toward a neighbour drawn by the [`BranchPolicy`] |
//! | 2      | toward the neighbour that is not the one just left |
//! | 1      | back the way it came |
//! | 0      | none; the token is stranded |
//!
//! Every selected leg departs the arrival station. Traversals are oriented
//! when built, so a choice can never point the token back at the station it
//! just reached.

use rand::Rng;
use tracing::trace;
use transit_graph::{GraphStore, StationId};

use crate::error::{MotionError, Result};
use crate::traversal::Traversal;

/// Outcome of branch selection at a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Continue onto a (possibly different) edge.
    Forward(Traversal),
    /// Dead end: turn around on the edge just travelled.
    Reversed(Traversal),
    /// The station has no neighbours at all.
    Stranded,
}

impl Branch {
    /// The next leg, if there is one.
    pub fn traversal(&self) -> Option<Traversal> {
        match self {
            Branch::Forward(t) | Branch::Reversed(t) => Some(*t),
            Branch::Stranded => None,
        }
    }
}

/// How to choose among the neighbours of a junction (degree > 2).
pub trait BranchPolicy {
    /// Pick one of `candidates`. Never called with an empty slice.
    fn pick<R: Rng + ?Sized>(&self, candidates: &[StationId], rng: &mut R) -> StationId;
}

/// Uniformly random choice over the adjacency list, including the station
/// just left.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformBranch;

impl BranchPolicy for UniformBranch {
    fn pick<R: Rng + ?Sized>(&self, candidates: &[StationId], rng: &mut R) -> StationId {
        candidates[rng.gen_range(0..candidates.len())]
    }
}

/// Choose the next leg for a token that has just completed `arrived`.
pub fn select_next<P, R>(
    graph: &GraphStore,
    arrived: &Traversal,
    policy: &P,
    rng: &mut R,
) -> Result<Branch>
where
    P: BranchPolicy,
    R: Rng + ?Sized,
{
    let station = arrived.to;
    let neighbors = graph.require_station(station)?.adjacent.as_slice();

    let next = match neighbors {
        [] => return Ok(Branch::Stranded),
        [only] if *only == arrived.from => return Ok(Branch::Reversed(arrived.reversed())),
        [only] => *only,
        [first, second] => {
            if *first == arrived.from {
                *second
            } else {
                *first
            }
        }
        many => policy.pick(many, rng),
    };

    let edge = graph
        .edge_between(station, next)
        .ok_or(MotionError::MissingEdge { from: station, to: next })?;
    let traversal = Traversal::departing(edge, station)?;
    trace!(%station, %next, degree = neighbors.len(), "branch selected");
    Ok(Branch::Forward(traversal))
}
