//! Gallery images and their stable identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a gallery image.
///
/// Assigned once when the upload completes and never recomputed, so editing
/// state (selection, in-flight uploads) stays attached to the right image
/// across reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(Uuid);

impl ImageId {
    /// Create a new unique image ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(value)?))
    }
}

impl Default for ImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single image in a gallery block.
///
/// The URL is opaque; Fresco never inspects or transforms the referenced
/// bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Stable identity, assigned at upload time.
    pub id: ImageId,
    /// Public URL returned by the upload gateway.
    pub url: String,
    /// Optional author-provided caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl GalleryImage {
    /// Create a new image with a fresh identity.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: ImageId::new(),
            url: url.into(),
            caption: None,
        }
    }

    /// Set the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}
