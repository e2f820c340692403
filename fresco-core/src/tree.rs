//! The render tree - the intermediate representation both output paths consume.
//!
//! The interactive preview mounts this tree into a live editing surface; the
//! static publisher serializes it to markup. Neither consumer re-derives
//! layout or frame logic, so the two presentations cannot diverge.

use serde::{Deserialize, Serialize};

use crate::block::{AspectRatio, BezelType, ColorScheme, DeviceType, MockupStyle};

/// A declarative style token attached to a render region.
///
/// Tokens are semantic, not CSS: each consumer maps them to its own
/// presentation vocabulary (inline styles, class names, live DOM props).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Uniform scale transform.
    Scale(f32),
    /// Horizontal offset as a percentage of the item width.
    TranslateXPct(f32),
    /// Vertical offset in pixels.
    TranslateYPx(f32),
    /// Stacking order.
    ZIndex(i32),
    /// Not rendered visually, but present in the tree.
    Hidden,

    /// CSS-grid-like container with this many columns.
    GridColumns(u8),
    /// Horizontally scrollable container.
    ScrollX,
    /// Vertically scrollable container.
    ScrollY,
    /// Container must not clip transformed children.
    OverflowVisible,
    /// Minimum container height in pixels.
    MinHeightPx(u32),
    /// Shared rotation of the whole container in degrees.
    TiltDeg(f32),
    /// Shared horizontal overscale of the whole container.
    OverscaleX(f32),

    /// Half the document width.
    HalfWidth,
    /// Full document width.
    FullWidth,
    /// Floated to the left edge; following text wraps beside it.
    FloatLeft,
    /// Floated to the right edge; following text wraps beside it.
    FloatRight,
    /// Clears floats on both sides.
    ClearBoth,

    /// Rounded corner clip in pixels.
    CornerRadiusPx(u8),
    /// Forced aspect ratio.
    AspectRatio(AspectRatio),
    /// Children are clipped to the region bounds.
    ClipContent,
    /// Drop shadow.
    Shadow,
    /// Background derived from the color scheme.
    SchemeBackground(ColorScheme),
    /// Device body chrome.
    DeviceBody(DeviceType),
    /// Bottom stand region of a device body.
    DeviceStand(DeviceType),
    /// Visual treatment of the device body.
    MockupSkin(MockupStyle),
    /// Shape of the top bezel overlay.
    BezelShape(BezelType),
}

/// A node in the render tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum RenderNode {
    /// A styled wrapper region containing child nodes.
    Region {
        /// Semantic tag naming the region's role.
        tag: String,
        /// Declarative style tokens.
        #[serde(default)]
        styles: Vec<Style>,
        /// Child nodes in document order.
        #[serde(default)]
        children: Vec<RenderNode>,
    },
    /// An image mount.
    Image {
        /// Image URL.
        url: String,
        /// Alternative text.
        #[serde(default)]
        alt: String,
    },
    /// A run of plain text.
    Text {
        /// Text content.
        content: String,
    },
}

impl RenderNode {
    /// Create an empty region with the given semantic tag.
    #[must_use]
    pub fn region(tag: impl Into<String>) -> Self {
        Self::Region {
            tag: tag.into(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an image mount.
    #[must_use]
    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self::Image {
            url: url.into(),
            alt: alt.into(),
        }
    }

    /// Create a text run.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Append a style token (no-op on non-region nodes).
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        if let Self::Region { styles, .. } = &mut self {
            styles.push(style);
        }
        self
    }

    /// Append style tokens (no-op on non-region nodes).
    #[must_use]
    pub fn with_styles(mut self, extra: impl IntoIterator<Item = Style>) -> Self {
        if let Self::Region { styles, .. } = &mut self {
            styles.extend(extra);
        }
        self
    }

    /// Append a child node (no-op on non-region nodes).
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        if let Self::Region { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    /// Append child nodes (no-op on non-region nodes).
    #[must_use]
    pub fn with_children(mut self, extra: impl IntoIterator<Item = Self>) -> Self {
        if let Self::Region { children, .. } = &mut self {
            children.extend(extra);
        }
        self
    }

    /// The semantic tag, for region nodes.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        if let Self::Region { tag, .. } = self {
            Some(tag)
        } else {
            None
        }
    }

    /// Child nodes, for region nodes.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        if let Self::Region { children, .. } = self {
            children
        } else {
            &[]
        }
    }

    /// Style tokens, for region nodes.
    #[must_use]
    pub fn styles(&self) -> &[Style] {
        if let Self::Region { styles, .. } = self {
            styles
        } else {
            &[]
        }
    }

    /// Whether a style token is present on this node.
    #[must_use]
    pub fn has_style(&self, style: &Style) -> bool {
        self.styles().contains(style)
    }
}
