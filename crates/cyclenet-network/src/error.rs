//! Network-subsystem error type.

use thiserror::Error;

use cyclenet_core::NodeId;

/// Errors produced building or querying a [`crate::Network`]. Construction
/// errors are `spec.md` §7 "Validation" failures and must fail scenario
/// `reset()` fast with no partial state.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("duplicate node id {0:?}")]
    DuplicateNode(String),

    #[error("edge length must be finite and > 0, got {0}")]
    InvalidLength(f64),

    #[error("attribute {attr:?} on edge {from:?}->{to:?} is not finite: {value}")]
    NonFiniteAttr {
        attr: String,
        from: String,
        to: String,
        value: f64,
    },

    #[error("edge references unknown node id {0:?}")]
    UnknownNode(String),

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
