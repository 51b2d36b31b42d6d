//! Ties the occupancy index to network attribute lookups to produce
//! traversal plans.

use cyclenet_core::{CyclistId, EdgeId};
use cyclenet_network::Network;

use crate::error::KinematicsResult;
use crate::state::{density_factor, grade_adjusted_speed, time_dilation, TraversalPlan};
use crate::store::EdgeOccupancy;

fn attr(network: &Network, edge: EdgeId, name: &str) -> Option<f64> {
    network.attr_id(name).and_then(|id| network.attr_raw(edge, id))
}

/// Wraps an [`EdgeOccupancy`] index and derives traversal plans from a
/// [`Network`]'s per-edge attributes (`spec.md` §4.5 step 2).
///
/// One engine per running simulation; the occupancy index is the only
/// mutable state it owns. Kept separate from [`Network`] itself since
/// occupancy changes every micro-step while the network is read-only for
/// the run's duration.
pub struct KinematicEngine {
    occupancy: EdgeOccupancy,
}

impl KinematicEngine {
    pub fn new(edge_count: usize) -> Self {
        Self {
            occupancy: EdgeOccupancy::new(edge_count),
        }
    }

    pub fn occupancy(&self) -> &EdgeOccupancy {
        &self.occupancy
    }

    /// `spec.md` §4.5 step 1: insert the cyclist into the edge's occupancy
    /// set on entry.
    pub fn enter_edge(&mut self, edge: EdgeId, cyclist: CyclistId) {
        self.occupancy.enter(edge, cyclist);
    }

    /// `spec.md` §4.5 step 4: remove the cyclist from the edge's occupancy
    /// set on exit.
    pub fn exit_edge(&mut self, edge: EdgeId, cyclist: CyclistId) -> KinematicsResult<()> {
        self.occupancy.exit(edge, cyclist)
    }

    fn density_factor_for(&self, network: &Network, edge: EdgeId) -> f64 {
        density_factor(self.occupancy.occupancy(edge), network.edge_capacity(edge))
    }

    /// Compute the initial traversal plan for a cyclist entering `edge` at
    /// base speed `v0` (`spec.md` §4.5 step 2).
    ///
    /// `grade` defaults to `0` and `safety`/`lighting` contribute a neutral
    /// factor when the edge doesn't carry them.
    pub fn plan_traversal(
        &self,
        network: &Network,
        edge: EdgeId,
        v0: f64,
        v_min: f64,
        v_max: f64,
    ) -> TraversalPlan {
        let grade = attr(network, edge, "grade").unwrap_or(0.0);
        let safety = attr(network, edge, "safety");
        let lighting = attr(network, edge, "lighting");

        let v_g = grade_adjusted_speed(v0, grade, v_min, v_max);
        let phi = time_dilation(safety, lighting);
        let rho = self.density_factor_for(network, edge);

        TraversalPlan::new(network.edge_length(edge), v_g, phi, rho)
    }

    /// Replan the remaining fraction of an in-progress edge traversal after
    /// a congestion recompute boundary (`spec.md` §4.5 step 3.d). `v_g` and
    /// `phi` are carried over from `plan`; only `rho` is resampled.
    pub fn recompute_traversal(
        &self,
        network: &Network,
        edge: EdgeId,
        plan: &TraversalPlan,
        alpha: f64,
    ) -> TraversalPlan {
        let rho = self.density_factor_for(network, edge);
        plan.recompute(network.edge_length(edge), alpha, rho)
    }
}
