//! Top-level error type (`spec.md` §7).
//!
//! `Validation` and `DistributionDomain` are the only §7 kinds that fail
//! `reset()`. `UnreachablePair` and `QueueExhaustion` are **not** errors —
//! they are counted diagnostics and normal termination respectively — and
//! `AgentException` is caught per-continuation inside the dispatch loop and
//! recorded in [`crate::Diagnostics`] rather than propagated.

use thiserror::Error;

use cyclenet_distributions::DistributionError;
use cyclenet_network::NetworkError;
use cyclenet_population::PopulationError;

#[derive(Debug, Error)]
pub enum SimError {
    /// A scenario load reference or parameter that isn't covered by one of
    /// the sub-crate error types below (unknown node id in an `OD`/
    /// `Distributions` entry, an out-of-domain `Kinematics` field).
    #[error("scenario configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Population(#[from] PopulationError),

    #[error(transparent)]
    Distribution(#[from] DistributionError),
}

pub type SimResult<T> = Result<T, SimError>;
