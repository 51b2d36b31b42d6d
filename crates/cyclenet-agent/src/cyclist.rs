//! The per-cyclist entity (`spec.md` §3 "Cyclist").

use cyclenet_core::{CyclistId, EdgeId, NodeId, Point2, ProfileId, SimTime};

/// Bound on the recent-position ring kept for visualization
/// (`spec.md` §3: "size cap ≈ 50").
const TRAJECTORY_CAP: usize = 50;

/// A cyclist's lifecycle phase (`spec.md` §3).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CyclistState {
    Pending,
    Active,
    Completed,
}

/// Fixed-capacity circular buffer of recent positions, oldest to newest on
/// iteration. Downsamples by overwrite rather than by dropping samples
/// (`spec.md` §4.5 step 3.c: "append to trajectory ring (downsample if at
/// cap)").
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryRing {
    buf: Vec<Point2>,
    next: usize,
}

impl TrajectoryRing {
    pub fn push(&mut self, p: Point2) {
        if self.buf.len() < TRAJECTORY_CAP {
            self.buf.push(p);
            self.next = self.buf.len() % TRAJECTORY_CAP;
        } else {
            self.buf[self.next] = p;
            self.next = (self.next + 1) % TRAJECTORY_CAP;
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Oldest-to-newest iteration order.
    pub fn iter(&self) -> impl Iterator<Item = &Point2> + '_ {
        let wrapped = self.buf.len() == TRAJECTORY_CAP;
        let split = if wrapped { self.next } else { 0 };
        let (newer_wrapped, oldest_first) = self.buf.split_at(split);
        oldest_first.iter().chain(newer_wrapped.iter())
    }
}

/// A cyclist mid- or post-trip. Mutated only by its own agent process
/// (`spec.md` §3 "Lifecycles"); read by `snapshot()`/`results()` between
/// scheduler steps.
///
/// `route` is stored as the ordered edges a `cyclenet-network` router
/// produced, rather than the node sequence `spec.md` §3 describes — the
/// agent process only ever needs "which edge is next", and storing edges
/// directly avoids re-deriving them from consecutive node pairs on every
/// micro-step.
#[derive(Clone, Debug)]
pub struct Cyclist {
    pub id: CyclistId,
    pub origin: NodeId,
    pub destination: NodeId,
    pub profile: ProfileId,
    pub position: Point2,
    pub v0: f64,
    pub route: Vec<EdgeId>,
    pub current_edge_index: usize,
    pub state: CyclistState,
    pub start_time: SimTime,
    pub per_edge_elapsed: Vec<f64>,
    pub total_distance: f64,
    pub total_time: Option<f64>,
    pub trajectory: TrajectoryRing,
}

impl Cyclist {
    pub fn new(
        origin: NodeId,
        destination: NodeId,
        profile: ProfileId,
        position: Point2,
        v0: f64,
        route: Vec<EdgeId>,
        start_time: SimTime,
    ) -> Self {
        let state = if route.is_empty() {
            CyclistState::Completed
        } else {
            CyclistState::Active
        };
        let mut trajectory = TrajectoryRing::default();
        trajectory.push(position);
        Self {
            id: CyclistId::INVALID,
            origin,
            destination,
            profile,
            position,
            v0,
            route,
            current_edge_index: 0,
            state,
            start_time,
            per_edge_elapsed: Vec::new(),
            total_distance: 0.0,
            total_time: None,
            trajectory,
        }
    }

    /// The edge this cyclist is currently traversing, if active and
    /// mid-route.
    pub fn current_edge(&self) -> Option<EdgeId> {
        if self.state == CyclistState::Active {
            self.route.get(self.current_edge_index).copied()
        } else {
            None
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == CyclistState::Active
    }

    pub fn is_completed(&self) -> bool {
        self.state == CyclistState::Completed
    }
}
