//! Population-subsystem error type.

use thiserror::Error;

use cyclenet_core::{NodeId, ProfileId};

/// Errors produced validating a profile mix or O-D matrix at scenario load
/// time (`spec.md` §7 "Validation").
#[derive(Debug, Error)]
pub enum PopulationError {
    #[error("profile {profile} probability {value} is outside [0,1]")]
    ProbabilityOutOfRange { profile: ProfileId, value: f64 },

    #[error("no profiles and no default available")]
    EmptyProfileMix,

    #[error("O-D row for origin {origin} has a non-finite or negative weight toward {dest}")]
    InvalidOdWeight { origin: NodeId, dest: NodeId },

    #[error("O-D row for origin {0} has no reachable destination (all weights zero)")]
    EmptyOdRow(NodeId),
}

pub type PopulationResult<T> = Result<T, PopulationError>;
