//! `cyclenet-population` — cyclist profile mix and O-D demand model.
//!
//! | Module     | Contents                                                |
//! |------------|------------------------------------------------------------|
//! | [`profile`]| `Profile`, `AttributeWeight`, `PreferenceDirection`        |
//! | [`mix`]    | `ProfileMix` — categorical profile selection (`spec.md` §4.4 step 1) |
//! | [`od`]     | `OdMatrix` — categorical destination selection (step 2)   |
//! | [`error`]  | `PopulationError`, `PopulationResult`                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.    |

pub mod error;
pub mod mix;
pub mod od;
pub mod profile;


pub use error::{PopulationError, PopulationResult};
pub use mix::ProfileMix;
pub use od::OdMatrix;
pub use profile::{default_direction, AttributeWeight, PreferenceDirection, Profile};
