//! Error types for dropkit-core.
//!
//! Library crates in the workspace return `DropError` for failures they can
//! classify; wiring layers (clients, CLI) wrap these with `anyhow` context.

use thiserror::Error;

/// Result alias used across the core crate.
pub type DropResult<T> = Result<T, DropError>;

#[derive(Debug, Error)]
pub enum DropError {
    /// The caller supplied an argument that fails validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Serialization or deserialization failure.
    #[error("serialization: {0}")]
    Serialization(String),
}

impl DropError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}
