//! Canonical persisted representation for blocks and documents.
//!
//! A block round-trips through the surrounding document toolkit as an
//! attribute map plus a discriminator. This module is the tolerant boundary
//! between that loosely-shaped data and the typed model: unknown or
//! out-of-range attribute values resolve to schema defaults and never error,
//! because published content must always render something.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::block::{Block, GalleryBlock, Metric, MetricsBlock};
use crate::error::{BlockError, BlockResult};
use crate::image::GalleryImage;

/// Discriminator for metrics blocks.
pub const METRICS_KIND: &str = "metrics";
/// Discriminator for gallery blocks.
pub const GALLERY_KIND: &str = "gallery";

/// A block as persisted: discriminator plus attribute bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDocument {
    /// Block kind discriminator.
    pub kind: String,
    /// Loosely-shaped attribute map.
    #[serde(default)]
    pub attrs: Map<String, Value>,
}

impl BlockDocument {
    /// Encode a typed block into its persisted form.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be represented as a JSON object.
    pub fn from_block(block: &Block) -> BlockResult<Self> {
        let (kind, value) = match block {
            Block::Metrics(metrics) => (METRICS_KIND, serde_json::to_value(metrics)?),
            Block::Gallery(gallery) => (GALLERY_KIND, serde_json::to_value(gallery)?),
        };
        let Value::Object(attrs) = value else {
            return Err(BlockError::InvalidAttributes(format!(
                "{kind} block did not serialize to an object"
            )));
        };
        Ok(Self {
            kind: kind.to_string(),
            attrs,
        })
    }

    /// Decode into a typed block, substituting defaults for anything the
    /// attribute bag is missing, mistypes, or names outside the schema.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::UnknownKind`] if the discriminator names no
    /// known block kind. Attribute-level problems never error.
    pub fn to_block(&self) -> BlockResult<Block> {
        match self.kind.as_str() {
            METRICS_KIND => Ok(Block::Metrics(decode_metrics(&self.attrs))),
            GALLERY_KIND => Ok(Block::Gallery(decode_gallery(&self.attrs))),
            other => Err(BlockError::UnknownKind(other.to_string())),
        }
    }
}

/// Read one attribute, falling back to the given default when the key is
/// missing or its value does not decode.
fn attr_or<T: DeserializeOwned>(attrs: &Map<String, Value>, key: &str, default: T) -> T {
    let Some(value) = attrs.get(key) else {
        return default;
    };
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => decoded,
        Err(error) => {
            tracing::warn!("Attribute {key} rejected, using default: {error}");
            default
        }
    }
}

fn decode_metrics(attrs: &Map<String, Value>) -> MetricsBlock {
    let mut block = MetricsBlock::new();
    block.metrics = decode_rows(attrs.get("metrics"));
    block.alignment = attr_or(attrs, "alignment", block.alignment);
    block
}

/// Decode metric rows, skipping entries that are not objects.
fn decode_rows(value: Option<&Value>) -> Vec<Metric> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(metric) => Some(metric),
            Err(error) => {
                tracing::warn!("Metric row rejected: {error}");
                None
            }
        })
        .collect()
}

fn decode_gallery(attrs: &Map<String, Value>) -> GalleryBlock {
    let mut block = GalleryBlock::new();
    block.images = decode_images(attrs.get("images"));
    block.layout = attr_or(attrs, "layout", block.layout);
    block.columns = GalleryBlock::clamp_columns(attr_or(attrs, "columns", block.columns));
    block.device = attr_or(attrs, "device", block.device);
    block.mockup_style = attr_or(attrs, "mockup_style", block.mockup_style);
    block.bezel = attr_or(attrs, "bezel", block.bezel);
    block.color_scheme = attr_or(attrs, "color_scheme", block.color_scheme);
    block.has_shadow = attr_or(attrs, "has_shadow", block.has_shadow);
    block.corner_radius =
        GalleryBlock::clamp_corner_radius(attr_or(attrs, "corner_radius", block.corner_radius));
    block.aspect_ratio = attr_or(attrs, "aspect_ratio", block.aspect_ratio);
    block.alignment = attr_or(attrs, "alignment", block.alignment);
    block
}

/// Decode gallery images, skipping malformed entries so one bad record never
/// takes down the whole block.
fn decode_images(value: Option<&Value>) -> Vec<GalleryImage> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(image) => Some(image),
            Err(error) => {
                tracing::warn!("Gallery image rejected: {error}");
                None
            }
        })
        .collect()
}

/// A node of the persisted document.
///
/// Fresco only owns the block nodes; everything the surrounding rich-text
/// toolkit produced arrives as opaque, pre-rendered markup and passes
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DocumentNode {
    /// An embedded content block.
    Block {
        /// The persisted block.
        #[serde(flatten)]
        block: BlockDocument,
    },
    /// Opaque markup from the surrounding toolkit.
    Markup {
        /// Pre-rendered markup, emitted verbatim at publish time.
        html: String,
    },
}

/// A persisted document: blocks interleaved with toolkit markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Nodes in document order.
    #[serde(default)]
    pub nodes: Vec<DocumentNode>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block node.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be encoded.
    pub fn push_block(&mut self, block: &Block) -> BlockResult<()> {
        self.nodes.push(DocumentNode::Block {
            block: BlockDocument::from_block(block)?,
        });
        Ok(())
    }

    /// Append an opaque markup node.
    pub fn push_markup(&mut self, html: impl Into<String>) {
        self.nodes.push(DocumentNode::Markup { html: html.into() });
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> BlockResult<String> {
        serde_json::to_string(self).map_err(BlockError::Serialization)
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> BlockResult<Self> {
        serde_json::from_str(json).map_err(BlockError::Serialization)
    }
}
