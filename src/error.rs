use std::collections::TryReserveError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiffError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    #[error("cannot allocate expression node #{index}: {reason}")]
    AllocationFailure { index: usize, reason: AllocReason },
    #[error("malformed expression tree: {0}")]
    MalformedTree(String),
    #[error("failed to write rendered expression")]
    Write(#[from] std::fmt::Error),
}

/// Why a node slot could not be handed out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocReason {
    #[error("node limit of {0} reached")]
    LimitReached(usize),
    #[error("{0}")]
    Exhausted(TryReserveError),
}

impl DiffError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        DiffError::MalformedTree(msg.into())
    }
}
