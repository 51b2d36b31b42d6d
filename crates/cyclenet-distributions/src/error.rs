//! Distribution-subsystem error type.

use thiserror::Error;

/// Errors produced validating a [`crate::Distribution`] at scenario load
/// time. `spec.md` §7: "Distribution domain — parameter out of domain (e.g.
/// `λ ≤ 0`) — fail `reset()`".
#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("exponential rate lambda must be > 0, got {0}")]
    InvalidLambda(f64),

    #[error("{param} must be > 0, got {value}")]
    InvalidParam { param: &'static str, value: f64 },
}

pub type DistributionResult<T> = Result<T, DistributionError>;
