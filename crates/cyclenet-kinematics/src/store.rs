//! The edge occupancy index (`spec.md` §3 "Edge occupancy index").
//!
//! For every directed edge, the set of cyclists currently traversing it. A
//! cyclist is a member of exactly one edge's set at any time while active
//! (`spec.md` §8 P1/P2).

use std::collections::HashSet;

use cyclenet_core::{CyclistId, EdgeId};

use crate::error::{KinematicsError, KinematicsResult};

#[derive(Clone, Debug)]
pub struct EdgeOccupancy {
    sets: Vec<HashSet<CyclistId>>,
}

impl EdgeOccupancy {
    /// One empty set per directed edge in the network.
    pub fn new(edge_count: usize) -> Self {
        Self {
            sets: vec![HashSet::new(); edge_count],
        }
    }

    /// Record `cyclist` entering `edge`.
    pub fn enter(&mut self, edge: EdgeId, cyclist: CyclistId) {
        self.sets[edge.index()].insert(cyclist);
    }

    /// Remove `cyclist` from `edge`'s occupancy set.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::NotOccupying`] if `cyclist` was not a
    /// member — a state-machine bug elsewhere, surfaced rather than
    /// silently ignored.
    pub fn exit(&mut self, edge: EdgeId, cyclist: CyclistId) -> KinematicsResult<()> {
        if self.sets[edge.index()].remove(&cyclist) {
            Ok(())
        } else {
            Err(KinematicsError::NotOccupying(cyclist, edge))
        }
    }

    /// Current occupancy count of a directed edge.
    #[inline]
    pub fn occupancy(&self, edge: EdgeId) -> usize {
        self.sets[edge.index()].len()
    }

    /// Sum of occupancy across all edges — should equal the active cyclist
    /// count at every sampled instant (`spec.md` §8 P1).
    pub fn total_active(&self) -> usize {
        self.sets.iter().map(HashSet::len).sum()
    }

    pub fn cyclists_on(&self, edge: EdgeId) -> impl Iterator<Item = &CyclistId> {
        self.sets[edge.index()].iter()
    }
}
