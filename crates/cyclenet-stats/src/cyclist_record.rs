//! `CyclistRecord` — the full post-hoc record of one cyclist's trip.

use cyclenet_agent::{Cyclist, CyclistState};
use cyclenet_core::{CyclistId, EdgeId, NodeId, ProfileId};

/// Snapshot of a [`Cyclist`] taken once its `state` stops changing.
///
/// Deliberately decoupled from `Cyclist` itself (rather than re-exporting it)
/// so the accumulator doesn't hold a borrow on live agent storage — results
/// must still be readable after the cyclist's arena slot is recycled.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CyclistRecord {
    pub id: CyclistId,
    pub origin: NodeId,
    pub destination: NodeId,
    pub profile: ProfileId,
    pub route: Vec<EdgeId>,
    pub per_edge_elapsed: Vec<f64>,
    pub total_distance: f64,
    pub total_time: Option<f64>,
    pub end_state: CyclistState,
}

impl CyclistRecord {
    pub fn from_cyclist(cyclist: &Cyclist) -> Self {
        Self {
            id: cyclist.id,
            origin: cyclist.origin,
            destination: cyclist.destination,
            profile: cyclist.profile,
            route: cyclist.route.clone(),
            per_edge_elapsed: cyclist.per_edge_elapsed.clone(),
            total_distance: cyclist.total_distance,
            total_time: cyclist.total_time,
            end_state: cyclist.state,
        }
    }

    /// Average speed over the whole trip, `total_distance / total_time`.
    /// `None` if the trip never completed (no `total_time` recorded yet).
    pub fn average_speed(&self) -> Option<f64> {
        self.total_time.and_then(|t| {
            if t > 0.0 {
                Some(self.total_distance / t)
            } else {
                None
            }
        })
    }
}
