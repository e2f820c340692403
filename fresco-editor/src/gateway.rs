//! Upload gateway seam.
//!
//! The editor never talks to storage directly: uploads go through an
//! explicitly injected [`UploadGateway`], so tests substitute a double and
//! production wires in [`crate::HttpUploadGateway`].

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for gateway operations.
pub type UploadResult<T> = Result<T, UploadError>;

/// Coarse media classification returned by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// A still image.
    Image,
    /// A video.
    Video,
}

impl MediaType {
    /// Wire name of this media kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// A file handed to the gateway for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Original file name, for diagnostics and storage naming.
    pub file_name: String,
    /// Declared media kind.
    pub media_type: MediaType,
    /// Opaque file bytes.
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    /// Create a request with an explicit media kind.
    #[must_use]
    pub fn new(file_name: impl Into<String>, media_type: MediaType, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type,
            bytes,
        }
    }

    /// Create an image upload request.
    #[must_use]
    pub fn image(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(file_name, MediaType::Image, bytes)
    }
}

/// A successfully stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMedia {
    /// Public URL of the stored file.
    pub url: String,
    /// Media kind as classified by the gateway.
    pub media_type: MediaType,
}

/// Errors returned by an upload gateway.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The gateway refused the file; retrying the same bytes will not help.
    #[error("Upload rejected: {0}")]
    Rejected(String),

    /// The gateway could not be reached or answered with a server error.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The gateway answered with a body that does not match its contract.
    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),

    /// The gateway endpoint is not a valid URL.
    #[error("Invalid gateway endpoint: {0}")]
    InvalidEndpoint(String),
}

impl UploadError {
    /// Whether a retry with the same request could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Storage backend for author uploads.
///
/// One call per file; batch semantics (ordering, independent failures) are
/// the controller's responsibility.
#[async_trait]
pub trait UploadGateway: Send + Sync {
    /// Store a file and return its public URL and media kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be stored; the caller treats any
    /// error as a per-file failure.
    async fn upload(&self, request: UploadRequest) -> UploadResult<UploadedMedia>;
}

/// Exponential backoff schedule for transient gateway failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds.
    pub initial_delay_ms: u64,
    /// Ceiling for any single delay, in milliseconds.
    pub max_delay_ms: u64,
    /// Multiplier applied per attempt.
    pub multiplier: f64,
}

impl RetryConfig {
    /// Create a retry schedule.
    #[must_use]
    pub const fn new(
        max_attempts: u32,
        initial_delay_ms: u64,
        max_delay_ms: u64,
        multiplier: f64,
    ) -> Self {
        Self {
            max_attempts,
            initial_delay_ms,
            max_delay_ms,
            multiplier,
        }
    }

    /// Delay before retrying after the given zero-based attempt.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.powi(attempt.min(i32::MAX as u32) as i32);
        let delay = (self.initial_delay_ms as f64 * factor) as u64;
        Duration::from_millis(delay.min(self.max_delay_ms))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(3, 250, 4000, 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(UploadError::Transport("timeout".into()).is_retryable());
        assert!(!UploadError::Rejected("too large".into()).is_retryable());
        assert!(!UploadError::InvalidResponse("not json".into()).is_retryable());
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let config = RetryConfig::new(5, 100, 1000, 2.0);
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(400));
        assert_eq!(config.delay_for_attempt(10), Duration::from_millis(1000));
    }

    #[test]
    fn test_uploaded_media_wire_shape() {
        let media: UploadedMedia =
            serde_json::from_str(r#"{"url":"https://cdn.example.com/x.png","mediaType":"image"}"#)
                .expect("should parse");
        assert_eq!(media.media_type, MediaType::Image);
    }
}
