//! `cyclenet-kinematics` — edge occupancy index and kinematic engine.
//!
//! | Module    | Contents                                                       |
//! |-----------|-----------------------------------------------------------------|
//! | [`state`] | Pure formulas — grade speed, time dilation, density factor,     |
//! |           | `TraversalPlan`                                                  |
//! | [`store`] | `EdgeOccupancy` — per-direction occupancy sets                  |
//! | [`engine`]| `KinematicEngine` — ties occupancy to `Network` attribute lookup |
//! | [`error`] | `KinematicsError`, `KinematicsResult`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `TraversalPlan`. |

pub mod engine;
pub mod error;
pub mod state;
pub mod store;


pub use engine::KinematicEngine;
pub use error::{KinematicsError, KinematicsResult};
pub use state::{
    crosses_recompute_boundary, density_factor, grade_adjusted_speed, time_dilation,
    TraversalPlan,
};
pub use store::EdgeOccupancy;
