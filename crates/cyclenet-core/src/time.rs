//! Continuous simulation time.
//!
//! Unlike the teacher framework's integer `Tick` (coarse, hour-granularity
//! discrete steps), this engine is event-driven over a **continuous** clock:
//! `spec.md` §4.1 schedules events at an arbitrary non-negative real-valued
//! delay, and §4.5's micro-steps subdivide an edge traversal into fractional-
//! second intervals. `SimTime` is therefore an `f64` newtype rather than an
//! integer counter, but keeps the teacher's pattern of a small `Copy` time
//! type with explicit arithmetic impls instead of a bare `f64` passed around.
//!
//! Simulation inputs are assumed finite and non-negative; `SimTime` does not
//! implement `Eq`/`Ord` via `derive` (f64 has none) but via `PartialOrd`,
//! which is sufficient for a scheduler that never compares against NaN.

use std::cmp::Ordering;
use std::fmt;

/// An absolute point on the simulation clock, in seconds since `T::ZERO`.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// The time `delta` seconds after `self`. `delta < 0` is clamped to 0,
    /// matching `spec.md` §4.2 step 1 ("`Δ<0` is clamped to 0").
    #[inline]
    pub fn after(self, delta: f64) -> SimTime {
        SimTime(self.0 + delta.max(0.0))
    }

    /// Seconds elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    /// Total order over simulation time, treating the (never-expected) NaN
    /// case as greater than everything so a malformed event sorts to the
    /// back of the queue instead of poisoning the heap.
    #[inline]
    pub fn total_cmp(&self, other: &SimTime) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}
