//! `cyclenet-distributions` — inter-arrival distribution factory.
//!
//! | Module          | Contents                                        |
//! |-----------------|--------------------------------------------------|
//! | [`distribution`] | `Distribution` enum, validation, sampling        |
//! | [`error`]        | `DistributionError`, `DistributionResult`        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `Distribution`.     |

pub mod distribution;
pub mod error;


pub use distribution::Distribution;
pub use error::{DistributionError, DistributionResult};
