//! Non-fatal run diagnostics surfaced inside `results()` (`spec.md` §7).

/// Counters for conditions that are logged and tracked but never fail a
/// running simulation — only [`SimError`](crate::SimError) variants fail
/// `reset()`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Cyclists discarded at the decision block because no route existed
    /// between the drawn origin and destination under the drawn profile, or
    /// because the origin had no O-D row at all (`spec.md` §7 "Unreachable
    /// pair", §8 scenario 5).
    pub discarded_unreachable: u64,
    /// Continuations that referenced stale or missing agent state and were
    /// terminated in place rather than propagated (`spec.md` §7 "Agent
    /// exception").
    pub agent_exceptions: u64,
    /// Number of O-D rows whose raw weights needed renormalization beyond
    /// tolerance at load time.
    pub od_rows_renormalized: u64,
    /// Whether the profile mix's raw probabilities needed renormalization
    /// beyond tolerance at load time.
    pub profile_mix_renormalized: bool,
}
