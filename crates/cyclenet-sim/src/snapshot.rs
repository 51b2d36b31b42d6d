//! Read-only views exposed across `snapshot()`/`results()` (`spec.md` §6).

use cyclenet_core::{EdgeId, NodeId, Point2, SimTime};

use crate::diagnostics::Diagnostics;
use cyclenet_stats::{CyclistRecord, EdgeStats, TripAggregates};

/// `snapshot().status` (`spec.md` §7).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimStatus {
    Idle,
    Running,
    Paused,
    Completed,
    Failed,
}

/// One active cyclist's externally-visible state at snapshot time.
#[derive(Clone, Debug)]
pub struct CyclistView {
    pub id: cyclenet_core::CyclistId,
    pub position: Point2,
    pub profile: cyclenet_core::ProfileId,
    pub route: Vec<EdgeId>,
    pub current_edge_index: usize,
}

/// A read-only view of simulation state between `step()`/`run_until()`
/// calls (`spec.md` §6 "snapshot()").
pub struct Snapshot {
    pub now: SimTime,
    pub status: SimStatus,
    pub active: Vec<CyclistView>,
    /// Current directional occupancy count per edge, in `EdgeId` order.
    /// Owned rather than borrowed from the occupancy index: that index
    /// stores per-edge `HashSet`s, not a dense count array, so this is
    /// materialized fresh on every `snapshot()` call.
    pub edge_occupancy: Vec<u32>,
}

/// Post-run arrays returned by `results()` (`spec.md` §6, §4.7).
///
/// `edges`, `routes`, and `arrivals_by_origin` are all sorted by key before
/// being handed back (`spec.md` P4 "byte-identical `results()`"): the
/// accumulator backs them with `HashMap`s, whose default `RandomState`
/// iteration order varies across process runs even for an identical
/// scenario and seed, so an unsorted `.collect()` would leak that
/// nondeterminism into the one interface this crate guarantees is stable.
pub struct Results<'a> {
    pub cyclists: &'a [CyclistRecord],
    pub edges: Vec<(EdgeId, &'a EdgeStats)>,
    /// Per-route (sequence of edges) usage count (`spec.md` §4.7 "Per route
    /// ... usage count"), sorted by route for determinism.
    pub routes: Vec<(&'a [EdgeId], u64)>,
    pub aggregates: &'a TripAggregates,
    pub diagnostics: Diagnostics,
    pub arrivals_by_origin: Vec<(NodeId, u64)>,
}
