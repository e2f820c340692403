//! Content blocks - the atomic, attribute-configured units embedded in a document.

use serde::{Deserialize, Serialize};

use crate::image::{GalleryImage, ImageId};

/// Horizontal placement of a block within the surrounding document flow.
///
/// `Left`/`Right` render as half-width floated containers so following text
/// wraps beside the block; `Center` takes the full width and clears floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Half-width, floated left.
    Left,
    /// Full-width, clears floats.
    #[default]
    Center,
    /// Half-width, floated right.
    Right,
}

/// Presentation mode for a gallery's images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryLayout {
    /// Column grid; all items at identity geometry.
    #[default]
    Grid,
    /// Horizontally scrollable strip of fixed-width items.
    Slider,
    /// Fan of up to five items centered on the active one.
    Carousel,
    /// Tilted stack with a repeating vertical stagger.
    Mosaic,
}

/// Device chrome wrapped around each gallery image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// No device frame; corner radius and aspect ratio apply instead.
    #[default]
    None,
    /// Phone body.
    Mobile,
    /// Tablet body.
    Tablet,
    /// Laptop body with a bottom stand region.
    Laptop,
    /// Desktop monitor with a bottom stand region.
    Desktop,
}

impl DeviceType {
    /// Whether this device renders a bottom stand region.
    #[must_use]
    pub const fn has_stand(self) -> bool {
        matches!(self, Self::Laptop | Self::Desktop)
    }
}

/// Visual treatment of the device frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MockupStyle {
    /// Plain solid body.
    #[default]
    Flat,
    /// Body with a soft gradient.
    Shaded,
    /// Translucent glass body.
    Glass,
    /// Browser window chrome instead of a device bezel.
    Browser,
    /// Dark browser window chrome.
    BrowserDark,
}

impl MockupStyle {
    /// Whether this style presents browser chrome, which replaces the bezel.
    #[must_use]
    pub const fn is_browser_chrome(self) -> bool {
        matches!(self, Self::Browser | Self::BrowserDark)
    }
}

/// Shape of the top bezel overlay on a device screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BezelType {
    /// Pill-shaped cutout floating below the top edge.
    #[default]
    DynamicIsland,
    /// Notch flush with the top edge.
    Notch,
    /// Full-width bar across the top of the screen.
    TopBar,
}

/// Color scheme of the device chrome and screen background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Light chrome, light screen background.
    Light,
    /// Dark chrome, dark screen background.
    #[default]
    Dark,
}

/// Forced aspect ratio for unframed images.
///
/// Only meaningful when [`DeviceType::None`] is active; device frames impose
/// their own geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    /// Keep the image's natural ratio.
    #[default]
    Original,
    /// 1:1.
    Square,
    /// 4:3.
    Landscape,
    /// 3:4.
    Portrait,
    /// 16:9.
    Widescreen,
}

impl AspectRatio {
    /// Width/height ratio as a pair, or `None` for the natural ratio.
    #[must_use]
    pub const fn ratio(self) -> Option<(u32, u32)> {
        match self {
            Self::Original => None,
            Self::Square => Some((1, 1)),
            Self::Landscape => Some((4, 3)),
            Self::Portrait => Some((3, 4)),
            Self::Widescreen => Some((16, 9)),
        }
    }
}

/// Direction for reordering an image within a gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Towards the front of the list.
    Backward,
    /// Towards the back of the list.
    Forward,
}

/// A single row of a metrics block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// Short descriptive label shown under the value.
    #[serde(default)]
    pub label: String,
    /// Headline value, e.g. "120k" or "+38%".
    #[serde(default)]
    pub value: String,
}

impl Metric {
    /// Create a metric row.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Whether both text fields are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.label.is_empty() && self.value.is_empty()
    }
}

/// A grid of labelled headline values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsBlock {
    /// Ordered metric rows.
    pub metrics: Vec<Metric>,
    /// Placement within the document flow.
    #[serde(default)]
    pub alignment: Alignment,
}

impl MetricsBlock {
    /// Create a new block with a single empty row, as inserted by an author.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metrics: vec![Metric::default()],
            alignment: Alignment::default(),
        }
    }
}

impl Default for MetricsBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// A gallery of images with layout and device-framing attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryBlock {
    /// Ordered images; identity is stable across reorders.
    pub images: Vec<GalleryImage>,
    /// Presentation mode.
    #[serde(default)]
    pub layout: GalleryLayout,
    /// Grid column count; only read by the grid layout.
    #[serde(default = "GalleryBlock::default_columns")]
    pub columns: u8,
    /// Device chrome wrapped around each image.
    #[serde(default)]
    pub device: DeviceType,
    /// Visual treatment of the device frame.
    #[serde(default)]
    pub mockup_style: MockupStyle,
    /// Top bezel shape; ignored for browser-chrome mockup styles.
    #[serde(default)]
    pub bezel: BezelType,
    /// Chrome and screen color scheme.
    #[serde(default)]
    pub color_scheme: ColorScheme,
    /// Whether the frame casts a drop shadow.
    #[serde(default = "GalleryBlock::default_shadow")]
    pub has_shadow: bool,
    /// Corner radius in pixels; only read when no device frame is active.
    #[serde(default = "GalleryBlock::default_corner_radius")]
    pub corner_radius: u8,
    /// Forced aspect ratio; only read when no device frame is active.
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    /// Placement within the document flow.
    #[serde(default)]
    pub alignment: Alignment,
}

impl GalleryBlock {
    /// Smallest legal grid column count.
    pub const MIN_COLUMNS: u8 = 1;
    /// Largest legal grid column count.
    pub const MAX_COLUMNS: u8 = 8;
    /// Largest legal corner radius in pixels.
    pub const MAX_CORNER_RADIUS: u8 = 64;

    /// Create a new empty block, as inserted by an author.
    #[must_use]
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            layout: GalleryLayout::default(),
            columns: Self::default_columns(),
            device: DeviceType::default(),
            mockup_style: MockupStyle::default(),
            bezel: BezelType::default(),
            color_scheme: ColorScheme::default(),
            has_shadow: Self::default_shadow(),
            corner_radius: Self::default_corner_radius(),
            aspect_ratio: AspectRatio::default(),
            alignment: Alignment::default(),
        }
    }

    const fn default_columns() -> u8 {
        3
    }

    const fn default_shadow() -> bool {
        true
    }

    const fn default_corner_radius() -> u8 {
        12
    }

    /// Clamp a column count into the legal range.
    #[must_use]
    pub const fn clamp_columns(columns: u8) -> u8 {
        if columns < Self::MIN_COLUMNS {
            Self::MIN_COLUMNS
        } else if columns > Self::MAX_COLUMNS {
            Self::MAX_COLUMNS
        } else {
            columns
        }
    }

    /// Clamp a corner radius into the legal range.
    #[must_use]
    pub const fn clamp_corner_radius(radius: u8) -> u8 {
        if radius > Self::MAX_CORNER_RADIUS {
            Self::MAX_CORNER_RADIUS
        } else {
            radius
        }
    }

    /// Replace the device type.
    ///
    /// Resets `corner_radius` and `aspect_ratio` to their defaults in the
    /// same step, so the frame-only fields never carry stale values across a
    /// device change.
    pub fn set_device(&mut self, device: DeviceType) {
        self.device = device;
        self.corner_radius = Self::default_corner_radius();
        self.aspect_ratio = AspectRatio::default();
    }

    /// Replace the grid column count, clamped to the legal range.
    pub fn set_columns(&mut self, columns: u8) {
        self.columns = Self::clamp_columns(columns);
    }

    /// Replace the corner radius, clamped to the legal range.
    pub fn set_corner_radius(&mut self, radius: u8) {
        self.corner_radius = Self::clamp_corner_radius(radius);
    }

    /// Position of an image within the ordered list.
    #[must_use]
    pub fn image_index(&self, id: ImageId) -> Option<usize> {
        self.images.iter().position(|image| image.id == id)
    }

    /// Remove an image by identity.
    ///
    /// Returns the removed image, or `None` if the ID is unknown. Removing
    /// the last image leaves the block alive in its empty state.
    pub fn remove_image(&mut self, id: ImageId) -> Option<GalleryImage> {
        let index = self.image_index(id)?;
        Some(self.images.remove(index))
    }

    /// Move an image one step in the given direction.
    ///
    /// No-op at the ends of the list. Identity of every image is preserved.
    ///
    /// Returns `true` if the order changed.
    pub fn move_image(&mut self, id: ImageId, direction: MoveDirection) -> bool {
        let Some(index) = self.image_index(id) else {
            return false;
        };
        match direction {
            MoveDirection::Backward if index > 0 => {
                self.images.swap(index, index - 1);
                true
            }
            MoveDirection::Forward if index + 1 < self.images.len() => {
                self.images.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }
}

impl Default for GalleryBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// An atomic content unit embedded in a document, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Block {
    /// A grid of labelled headline values.
    Metrics(MetricsBlock),
    /// A gallery of images with layout and device framing.
    Gallery(GalleryBlock),
}

impl Block {
    /// The persisted discriminator for this block kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Metrics(_) => "metrics",
            Self::Gallery(_) => "gallery",
        }
    }

    /// Borrow the gallery payload, if this is a gallery block.
    #[must_use]
    pub const fn as_gallery(&self) -> Option<&GalleryBlock> {
        match self {
            Self::Gallery(gallery) => Some(gallery),
            Self::Metrics(_) => None,
        }
    }

    /// Mutably borrow the gallery payload, if this is a gallery block.
    pub fn as_gallery_mut(&mut self) -> Option<&mut GalleryBlock> {
        match self {
            Self::Gallery(gallery) => Some(gallery),
            Self::Metrics(_) => None,
        }
    }

    /// Borrow the metrics payload, if this is a metrics block.
    #[must_use]
    pub const fn as_metrics(&self) -> Option<&MetricsBlock> {
        match self {
            Self::Metrics(metrics) => Some(metrics),
            Self::Gallery(_) => None,
        }
    }

    /// Mutably borrow the metrics payload, if this is a metrics block.
    pub fn as_metrics_mut(&mut self) -> Option<&mut MetricsBlock> {
        match self {
            Self::Metrics(metrics) => Some(metrics),
            Self::Gallery(_) => None,
        }
    }
}
