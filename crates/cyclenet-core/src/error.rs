//! Shared error primitives used as the base of sub-crate error enums.
//!
//! Sub-crates define their own error enums and convert into `CoreError` via
//! `From`, or fold `CoreError` in as one variant — both patterns appear in
//! this workspace depending on which reads better at the call site.

use thiserror::Error;

use crate::NodeId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
