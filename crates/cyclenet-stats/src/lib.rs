//! `cyclenet-stats` — the online statistics accumulator (`spec.md` §4.7).
//!
//! | Module            | Contents                                             |
//! |--------------------|------------------------------------------------------|
//! | [`edge_log`]       | `EdgeStats`, per-edge entry/exit log and ridership   |
//! | [`cyclist_record`] | `CyclistRecord` — a completed cyclist's full history |
//! | [`aggregates`]     | `RunningStat`, `TripAggregates`                      |
//! | [`accumulator`]    | `StatsAccumulator` — ties the above together         |
//!
//! Everything is maintained online and exactly — no sampling, no windowing.
//! The accumulator has no file or GUI coupling; it is a plain in-memory
//! struct the simulation driver feeds as it runs, and `cyclenet-sim`'s
//! `results()`/`snapshot()` read straight out of it.

pub mod accumulator;
pub mod aggregates;
pub mod cyclist_record;
pub mod edge_log;

#[cfg(test)]
mod tests;

pub use accumulator::StatsAccumulator;
pub use aggregates::{RunningStat, TripAggregates};
pub use cyclist_record::CyclistRecord;
pub use edge_log::{EdgeEventKind, EdgeLogEntry, EdgeStats};
