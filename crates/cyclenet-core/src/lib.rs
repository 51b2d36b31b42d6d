//! `cyclenet-core` — foundational types for the cyclenet simulation core.
//!
//! This crate is a dependency of every other `cyclenet-*` crate. It
//! intentionally has no `cyclenet-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                               |
//! |---------------|----------------------------------------------------------|
//! | [`ids`]       | `NodeId`, `EdgeId`, `CyclistId`, `ProfileId`, `AttrId`    |
//! | [`geo`]       | `Point2`, Euclidean distance, edge interpolation          |
//! | [`time`]      | `SimTime` — continuous event-time newtype                |
//! | [`rng`]       | `SimRng`, `Streams` — deterministic per-concern substreams|
//! | [`error`]     | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.   |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Point2;
pub use ids::{AttrId, CyclistId, EdgeId, NodeId, ProfileId};
pub use rng::{SimRng, Streams};
pub use time::SimTime;
