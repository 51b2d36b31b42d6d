//! Kinematics error type.

use thiserror::Error;

use cyclenet_core::{CyclistId, EdgeId};

#[derive(Debug, Error)]
pub enum KinematicsError {
    #[error("cyclist {0} is not recorded on edge {1}")]
    NotOccupying(CyclistId, EdgeId),
}

pub type KinematicsResult<T> = Result<T, KinematicsError>;
