//! Agent-pool error type.

use thiserror::Error;

use cyclenet_core::CyclistId;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("cyclist {0} not found (stale or freed slot)")]
    NotFound(CyclistId),
}

pub type AgentResult<T> = Result<T, AgentError>;
