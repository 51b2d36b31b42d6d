//! Per-cyclist in-progress traversal state, kept outside [`cyclenet_agent::Cyclist`]
//! since it is scheduler-facing bookkeeping rather than agent identity.

use cyclenet_core::SimTime;
use cyclenet_kinematics::TraversalPlan;

/// Tracks a cyclist's progress through the *current* sub-plan of its
/// current edge (`spec.md` §4.5 steps 2-4).
///
/// `alpha_base` is the cumulative fraction of the whole edge consumed by
/// prior sub-plans (0 on the first plan, reset to the prior
/// `overall_alpha` on every recompute). `i`/`plan.k` is the **local** step
/// counter within the current sub-plan and restarts at `0` every time the
/// plan is recomputed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TripState {
    pub plan: TraversalPlan,
    pub i: u32,
    pub alpha_base: f64,
    pub edge_entry_time: SimTime,
}

impl TripState {
    pub fn new(plan: TraversalPlan, edge_entry_time: SimTime) -> Self {
        Self {
            plan,
            i: 0,
            alpha_base: 0.0,
            edge_entry_time,
        }
    }

    /// Cumulative fraction of the whole edge covered so far, accounting for
    /// both completed sub-plans (`alpha_base`) and progress within the
    /// current one (`spec.md` §4.5 step 3).
    pub fn overall_alpha(&self) -> f64 {
        self.alpha_base + (1.0 - self.alpha_base) * (self.i as f64 / self.plan.k as f64)
    }

    /// Start a new sub-plan after a congestion recompute, carrying forward
    /// the cumulative progress made so far as the new `alpha_base`.
    pub fn recompute_into(&mut self, plan: TraversalPlan) {
        self.alpha_base = self.overall_alpha();
        self.plan = plan;
        self.i = 0;
    }

    /// Whether the current sub-plan has been fully walked (`i` has reached
    /// `k` micro-steps).
    pub fn sub_plan_complete(&self) -> bool {
        self.i >= self.plan.k
    }
}
