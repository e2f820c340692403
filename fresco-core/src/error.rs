//! Error types for block operations.

use thiserror::Error;

/// Result type for block operations.
pub type BlockResult<T> = Result<T, BlockError>;

/// Errors that can occur in block operations.
#[derive(Debug, Error)]
pub enum BlockError {
    /// The persisted discriminator names no known block kind.
    #[error("Unknown block kind: {0}")]
    UnknownKind(String),

    /// An attribute bag could not be represented as a JSON object.
    #[error("Invalid attribute bag: {0}")]
    InvalidAttributes(String),

    /// Block serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
