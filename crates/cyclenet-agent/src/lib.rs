//! `cyclenet-agent` — the per-cyclist entity and its arena-pooled storage.
//!
//! | Module     | Contents                                                 |
//! |------------|-------------------------------------------------------------|
//! | [`cyclist`]| `Cyclist`, `CyclistState`, `TrajectoryRing`                 |
//! | [`pool`]   | `CyclistPool` — arena + index storage with slot reuse       |
//! | [`error`]  | `AgentError`, `AgentResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.    |

pub mod cyclist;
pub mod error;
pub mod pool;


pub use cyclist::{Cyclist, CyclistState, TrajectoryRing};
pub use error::{AgentError, AgentResult};
pub use pool::CyclistPool;
