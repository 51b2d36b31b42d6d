//! `cyclenet-sim` — the discrete-event simulation driver tying every other
//! `cyclenet-*` crate into one runnable cycling-network simulation.
//!
//! | Module         | Contents                                                        |
//! |----------------|-------------------------------------------------------------------|
//! | [`scenario`]   | Wire-format load records and `Scenario::build()` validation        |
//! | [`diagnostics`]| `Diagnostics` — non-fatal run counters surfaced in `results()`     |
//! | [`payload`]    | `Continuation` — the event queue's payload type                    |
//! | [`trip`]       | `TripState` — per-cyclist in-progress edge traversal bookkeeping   |
//! | [`router_cache`]| `CompositeWeights`, `RouteCache` — per-profile weights + LRU routing |
//! | [`snapshot`]   | `SimStatus`, `CyclistView`, `Snapshot`, `Results`                   |
//! | [`sim`]        | `Simulation` — owns all run state and the dispatch loop             |
//! | [`error`]      | `SimError`, `SimResult`                                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                          |
//! |---------|-------------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on scenario records and `Diagnostics`. |

pub mod diagnostics;
pub mod error;
pub mod payload;
pub mod router_cache;
pub mod scenario;
pub mod sim;
pub mod snapshot;
pub(crate) mod trip;

#[cfg(test)]
mod tests;

pub use diagnostics::Diagnostics;
pub use error::{SimError, SimResult};
pub use payload::Continuation;
pub use router_cache::{CompositeWeights, RouteCache};
pub use scenario::{
    DistributionRecord, EdgeRecord, KinematicsConfig, NodeRecord, ProfileRecord, Scenario,
};
pub use sim::Simulation;
pub use snapshot::{CyclistView, Results, SimStatus, Snapshot};
