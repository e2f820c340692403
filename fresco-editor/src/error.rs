//! Error types for editing commands.

use fresco_core::ImageId;
use thiserror::Error;

/// Result type for editing commands.
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Errors that can occur while executing an editing command.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The block was already deleted.
    #[error("Block was deleted")]
    Deleted,

    /// The command only applies to gallery blocks.
    #[error("Command requires a gallery block")]
    NotAGallery,

    /// The command only applies to metrics blocks.
    #[error("Command requires a metrics block")]
    NotAMetrics,

    /// The referenced image is not part of this block.
    #[error("Image not found: {0}")]
    ImageNotFound(ImageId),

    /// The referenced metric row is not part of this block.
    #[error("Metric row out of range: {0}")]
    RowOutOfRange(usize),

    /// The block could not be encoded for persistence.
    #[error(transparent)]
    Block(#[from] fresco_core::BlockError),
}
