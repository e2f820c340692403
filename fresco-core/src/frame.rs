//! Device frame compositor - pure mapping from frame attributes to
//! decorative regions.
//!
//! The output is a small fixed tree of region specs (body, screen, bezel,
//! stand) plus the content slot the image mounts into. Frame logic is fully
//! decoupled from layout: the compositor never sees item geometry, and the
//! layout engine never sees device chrome.

use crate::block::{
    AspectRatio, BezelType, ColorScheme, DeviceType, GalleryBlock, MockupStyle,
};
use crate::tree::Style;

/// Frame attributes, shared by every image in a gallery block.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameParams {
    /// Device chrome to wrap the image in.
    pub device: DeviceType,
    /// Visual treatment of the device body.
    pub mockup_style: MockupStyle,
    /// Top bezel shape.
    pub bezel: BezelType,
    /// Chrome and screen color scheme.
    pub color_scheme: ColorScheme,
    /// Whether the frame casts a drop shadow.
    pub has_shadow: bool,
    /// Corner radius in pixels; only read when `device` is `None`.
    pub corner_radius: u8,
    /// Forced aspect ratio; only read when `device` is `None`.
    pub aspect_ratio: AspectRatio,
}

impl FrameParams {
    /// Extract the frame attributes of a gallery block.
    #[must_use]
    pub const fn from_gallery(block: &GalleryBlock) -> Self {
        Self {
            device: block.device,
            mockup_style: block.mockup_style,
            bezel: block.bezel,
            color_scheme: block.color_scheme,
            has_shadow: block.has_shadow,
            corner_radius: block.corner_radius,
            aspect_ratio: block.aspect_ratio,
        }
    }
}

/// A single decorative region of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSpec {
    /// Semantic tag naming the region's role.
    pub tag: &'static str,
    /// Declarative style tokens.
    pub styles: Vec<Style>,
}

impl RegionSpec {
    fn new(tag: &'static str, styles: Vec<Style>) -> Self {
        Self { tag, styles }
    }
}

/// The decorative regions composed around a single image.
///
/// Assembly order is fixed: the screen (holding the content slot and the
/// bezel overlay) nests inside the body, the stand follows the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDescriptor {
    /// Outer decorative region.
    pub body: RegionSpec,
    /// Clipped inner region the content mounts into.
    pub screen: RegionSpec,
    /// Top bezel overlay, absent for browser-chrome styles and bare frames.
    pub bezel: Option<RegionSpec>,
    /// Bottom stand region, present for laptop and desktop bodies.
    pub stand: Option<RegionSpec>,
    /// The slot the image mounts into, inside the screen.
    pub slot: RegionSpec,
}

/// Compose the frame regions for the given attributes.
///
/// With `DeviceType::None` this short-circuits to a bare clip: corner
/// radius on the body, the forced aspect ratio (if any) with a vertical
/// scroll inside the clip, no bezel, no stand. A device frame imposes its
/// own geometry, so `corner_radius` and `aspect_ratio` are ignored while
/// one is active. Shadow composes with every combination.
#[must_use]
pub fn compose(params: &FrameParams) -> FrameDescriptor {
    if params.device == DeviceType::None {
        return compose_bare(params);
    }

    let mut body_styles = vec![
        Style::DeviceBody(params.device),
        Style::MockupSkin(params.mockup_style),
        Style::SchemeBackground(params.color_scheme),
    ];
    if params.has_shadow {
        body_styles.push(Style::Shadow);
    }

    let bezel = (!params.mockup_style.is_browser_chrome())
        .then(|| RegionSpec::new("frame-bezel", vec![Style::BezelShape(params.bezel)]));

    let stand = params
        .device
        .has_stand()
        .then(|| RegionSpec::new("frame-stand", vec![Style::DeviceStand(params.device)]));

    FrameDescriptor {
        body: RegionSpec::new("frame-body", body_styles),
        screen: RegionSpec::new(
            "frame-screen",
            vec![
                Style::ClipContent,
                Style::SchemeBackground(params.color_scheme),
            ],
        ),
        bezel,
        stand,
        slot: RegionSpec::new("frame-slot", Vec::new()),
    }
}

/// The frameless short-circuit: a clipped region, no chrome.
fn compose_bare(params: &FrameParams) -> FrameDescriptor {
    let mut body_styles = vec![
        Style::CornerRadiusPx(params.corner_radius),
        Style::ClipContent,
    ];
    if params.aspect_ratio != AspectRatio::Original {
        body_styles.push(Style::AspectRatio(params.aspect_ratio));
    }
    if params.has_shadow {
        body_styles.push(Style::Shadow);
    }

    // When the aspect ratio is forced, an image with a different natural
    // ratio scrolls vertically inside the clip instead of being cropped.
    let screen_styles = if params.aspect_ratio == AspectRatio::Original {
        Vec::new()
    } else {
        vec![Style::ScrollY]
    };

    FrameDescriptor {
        body: RegionSpec::new("frame", body_styles),
        screen: RegionSpec::new("frame-screen", screen_styles),
        bezel: None,
        stand: None,
        slot: RegionSpec::new("frame-slot", Vec::new()),
    }
}
