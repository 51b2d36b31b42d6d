//! `StatsAccumulator` — the online statistics store (`spec.md` §4.7).
//!
//! Owned by the simulation driver and updated at the same points the
//! kinematic engine and agent processes already touch: edge entry/exit,
//! arrival generation, and trip completion. Nothing here ever fails — an
//! accumulator has no I/O and cannot observe an inconsistent world, so
//! unlike the other crates there is no `error` module.

use std::collections::HashMap;

use cyclenet_agent::Cyclist;
use cyclenet_core::{CyclistId, EdgeId, NodeId, SimTime};

use crate::aggregates::TripAggregates;
use crate::cyclist_record::CyclistRecord;
use crate::edge_log::EdgeStats;

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsAccumulator {
    edges: HashMap<EdgeId, EdgeStats>,
    routes: HashMap<Vec<EdgeId>, u64>,
    origins: HashMap<NodeId, u64>,
    cyclists: Vec<CyclistRecord>,
    aggregates: TripAggregates,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cyclist entering `edge` at `time`.
    pub fn record_edge_enter(&mut self, edge: EdgeId, cyclist: CyclistId, time: SimTime) {
        self.edges.entry(edge).or_default().record_enter(time, cyclist);
    }

    /// Record a cyclist leaving `edge` at `time`.
    pub fn record_edge_exit(&mut self, edge: EdgeId, cyclist: CyclistId, time: SimTime) {
        self.edges.entry(edge).or_default().record_exit(time, cyclist);
    }

    /// Record one arrival generated at `origin`.
    pub fn record_arrival(&mut self, origin: NodeId) {
        *self.origins.entry(origin).or_insert(0) += 1;
    }

    /// Record a completed (or otherwise terminal) cyclist. Folds the route
    /// into the per-route usage count, appends the full per-cyclist record,
    /// and — if the trip actually finished with a known `total_time` — rolls
    /// it into the trip-time/speed aggregates.
    pub fn record_cyclist(&mut self, cyclist: &Cyclist) {
        let record = CyclistRecord::from_cyclist(cyclist);
        if !record.route.is_empty() {
            *self.routes.entry(record.route.clone()).or_insert(0) += 1;
        }
        if let Some(total_time) = record.total_time {
            self.aggregates.record(total_time, record.average_speed());
        }
        self.cyclists.push(record);
    }

    pub fn edge(&self, edge: EdgeId) -> Option<&EdgeStats> {
        self.edges.get(&edge)
    }

    pub fn edges(&self) -> impl Iterator<Item = (&EdgeId, &EdgeStats)> {
        self.edges.iter()
    }

    pub fn route_usage(&self, route: &[EdgeId]) -> u64 {
        self.routes.get(route).copied().unwrap_or(0)
    }

    pub fn routes(&self) -> impl Iterator<Item = (&Vec<EdgeId>, &u64)> {
        self.routes.iter()
    }

    pub fn arrivals_at(&self, origin: NodeId) -> u64 {
        self.origins.get(&origin).copied().unwrap_or(0)
    }

    pub fn origins(&self) -> impl Iterator<Item = (&NodeId, &u64)> {
        self.origins.iter()
    }

    pub fn cyclists(&self) -> &[CyclistRecord] {
        &self.cyclists
    }

    pub fn aggregates(&self) -> &TripAggregates {
        &self.aggregates
    }
}
