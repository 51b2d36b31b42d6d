//! Scheduler payload: the only kinds of events this simulation dispatches.

use cyclenet_core::{CyclistId, NodeId};

/// What the driver does when [`cyclenet_scheduler::EventQueue`] pops an
/// event at this payload's scheduled time (`spec.md` §4, §5).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Continuation {
    /// Arrival generator fires at `node`: draw a profile and destination,
    /// spawn a cyclist if one exists, then reschedule the next arrival
    /// unless the run is stopping.
    Arrival(NodeId),
    /// A cyclist's current micro-step within its current edge ends; advance
    /// its position, recompute the traversal plan if a recompute boundary
    /// was crossed, and either reschedule the next micro-step or hand off
    /// to edge completion.
    MicroStep(CyclistId),
    /// The simulation's configured horizon has been reached; drains no
    /// further events and moves every still-active cyclist into the
    /// in-flight-at-stop reporting state.
    Termination,
}
