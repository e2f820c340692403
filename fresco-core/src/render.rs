//! The shared block renderer.
//!
//! `render` is the single place where attributes, layout geometry, and frame
//! composition become a render tree. The interactive editing surface and the
//! static publisher both call it and must not carry their own copies of
//! geometry or frame math; that shared seam is what keeps the authoring
//! preview and the published page from diverging.

use crate::block::{Alignment, Block, GalleryBlock, GalleryLayout, MetricsBlock};
use crate::frame::{compose, FrameDescriptor, FrameParams, RegionSpec};
use crate::image::GalleryImage;
use crate::layout::{container_layout, item_geometry, ContainerLayout, ItemGeometry};
use crate::tree::{RenderNode, Style};

/// Minimum stage height for carousel and mosaic containers, in pixels, so
/// scaled and offset items are never clipped by the surrounding document.
const STAGE_MIN_HEIGHT_PX: u32 = 320;

/// Rendering context shared by both output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// The focused carousel item. The interactive surface moves this cursor;
    /// static output always renders at 0.
    pub active_index: usize,
}

impl RenderContext {
    /// Context for static publish rendering: `active_index = 0`.
    #[must_use]
    pub const fn published() -> Self {
        Self { active_index: 0 }
    }

    /// Context with an interactive carousel cursor.
    #[must_use]
    pub const fn with_active_index(active_index: usize) -> Self {
        Self { active_index }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::published()
    }
}

/// Render a block to its tree.
///
/// Returns `None` for a gallery with no images: that block has no visual
/// output, and the editing surface shows its configuration affordance
/// instead.
#[must_use]
pub fn render(block: &Block, ctx: &RenderContext) -> Option<RenderNode> {
    match block {
        Block::Metrics(metrics) => Some(render_metrics(metrics)),
        Block::Gallery(gallery) => render_gallery(gallery, ctx),
    }
}

/// Style tokens for a block's placement within the document flow.
fn alignment_styles(alignment: Alignment) -> Vec<Style> {
    match alignment {
        Alignment::Left => vec![Style::HalfWidth, Style::FloatLeft],
        Alignment::Right => vec![Style::HalfWidth, Style::FloatRight],
        Alignment::Center => vec![Style::FullWidth, Style::ClearBoth],
    }
}

fn render_metrics(metrics: &MetricsBlock) -> RenderNode {
    let rows = metrics.metrics.iter().map(|metric| {
        RenderNode::region("metric-row")
            .with_child(
                RenderNode::region("metric-value").with_child(RenderNode::text(&metric.value)),
            )
            .with_child(
                RenderNode::region("metric-label").with_child(RenderNode::text(&metric.label)),
            )
    });

    RenderNode::region("metrics")
        .with_styles(alignment_styles(metrics.alignment))
        .with_children(rows)
}

fn render_gallery(gallery: &GalleryBlock, ctx: &RenderContext) -> Option<RenderNode> {
    if gallery.images.is_empty() {
        return None;
    }

    let geometry = item_geometry(gallery.images.len(), gallery.layout, ctx.active_index);
    let frame = compose(&FrameParams::from_gallery(gallery));

    let items = gallery
        .images
        .iter()
        .zip(&geometry)
        .map(|(image, geom)| gallery_item(image, *geom, &frame));

    let mut container = RenderNode::region("gallery")
        .with_styles(alignment_styles(gallery.alignment))
        .with_styles(container_styles(container_layout(
            gallery.layout,
            gallery.columns,
        )))
        .with_children(items);

    if gallery.layout == GalleryLayout::Carousel {
        container = container.with_child(carousel_nav());
    }

    Some(container)
}

/// Style tokens for the gallery container shape.
fn container_styles(layout: ContainerLayout) -> Vec<Style> {
    match layout {
        ContainerLayout::Grid { columns } => vec![Style::GridColumns(columns)],
        ContainerLayout::Slider => vec![Style::ScrollX],
        ContainerLayout::Carousel => vec![
            Style::OverflowVisible,
            Style::MinHeightPx(STAGE_MIN_HEIGHT_PX),
        ],
        ContainerLayout::Mosaic {
            tilt_deg,
            overscale_x,
        } => vec![
            Style::OverflowVisible,
            Style::MinHeightPx(STAGE_MIN_HEIGHT_PX),
            Style::TiltDeg(tilt_deg),
            Style::OverscaleX(overscale_x),
        ],
    }
}

/// One image composed into its frame and geometry wrapper.
fn gallery_item(image: &GalleryImage, geom: ItemGeometry, frame: &FrameDescriptor) -> RenderNode {
    let mut item = RenderNode::region("gallery-item")
        .with_styles(geometry_styles(geom))
        .with_child(frame_node(frame, image));

    if let Some(caption) = &image.caption {
        item = item.with_child(
            RenderNode::region("gallery-caption").with_child(RenderNode::text(caption)),
        );
    }

    item
}

/// Style tokens for a geometry descriptor. Identity components are omitted.
fn geometry_styles(geom: ItemGeometry) -> Vec<Style> {
    let mut styles = Vec::new();
    if (geom.scale - 1.0).abs() > f32::EPSILON {
        styles.push(Style::Scale(geom.scale));
    }
    if geom.translate_x_pct.abs() > f32::EPSILON {
        styles.push(Style::TranslateXPct(geom.translate_x_pct));
    }
    if geom.translate_y_px.abs() > f32::EPSILON {
        styles.push(Style::TranslateYPx(geom.translate_y_px));
    }
    if geom.z_index != 0 {
        styles.push(Style::ZIndex(geom.z_index));
    }
    if !geom.visible {
        styles.push(Style::Hidden);
    }
    styles
}

/// Mount an image into its frame regions.
fn frame_node(frame: &FrameDescriptor, image: &GalleryImage) -> RenderNode {
    let alt = image.caption.clone().unwrap_or_default();

    let mut screen = region(&frame.screen).with_child(
        region(&frame.slot).with_child(RenderNode::image(&image.url, alt)),
    );
    if let Some(bezel) = &frame.bezel {
        screen = screen.with_child(region(bezel));
    }

    let mut body = region(&frame.body).with_child(screen);
    if let Some(stand) = &frame.stand {
        body = body.with_child(region(stand));
    }
    body
}

fn region(spec: &RegionSpec) -> RenderNode {
    RenderNode::region(spec.tag).with_styles(spec.styles.iter().cloned())
}

/// Decorative carousel navigation affordances.
///
/// Markup-only in the static output: they must degrade gracefully when no
/// interactivity is attached.
fn carousel_nav() -> RenderNode {
    RenderNode::region("carousel-nav")
        .with_child(RenderNode::region("carousel-nav-prev").with_child(RenderNode::text("\u{2039}")))
        .with_child(RenderNode::region("carousel-nav-next").with_child(RenderNode::text("\u{203a}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{DeviceType, Metric};
    use crate::image::GalleryImage;

    fn gallery_with(count: usize) -> GalleryBlock {
        let mut gallery = GalleryBlock::new();
        for index in 0..count {
            gallery.images.push(GalleryImage::new(format!("img-{index}.png")));
        }
        gallery
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut gallery = gallery_with(5);
        gallery.layout = GalleryLayout::Carousel;
        gallery.device = DeviceType::Mobile;
        let block = Block::Gallery(gallery);
        let ctx = RenderContext::published();

        assert_eq!(render(&block, &ctx), render(&block, &ctx));
    }

    #[test]
    fn test_empty_gallery_renders_nothing() {
        let block = Block::Gallery(GalleryBlock::new());
        assert!(render(&block, &RenderContext::published()).is_none());
    }

    #[test]
    fn test_metrics_alignment_left_floats_half_width() {
        let mut metrics = MetricsBlock::new();
        metrics.metrics = vec![
            Metric::new("120k", "users"),
            Metric::new("+38%", "growth"),
            Metric::new("4.9", "rating"),
        ];
        metrics.alignment = Alignment::Left;

        let tree = render(&Block::Metrics(metrics.clone()), &RenderContext::published())
            .expect("metrics always render");
        assert!(tree.has_style(&Style::HalfWidth));
        assert!(tree.has_style(&Style::FloatLeft));
        assert_eq!(tree.children().len(), 3);

        metrics.alignment = Alignment::Center;
        let centered = render(&Block::Metrics(metrics), &RenderContext::published())
            .expect("metrics always render");
        assert!(centered.has_style(&Style::FullWidth));
        assert!(centered.has_style(&Style::ClearBoth));
        assert!(!centered.has_style(&Style::FloatLeft));
    }

    #[test]
    fn test_metric_row_shape() {
        let mut metrics = MetricsBlock::new();
        metrics.metrics = vec![Metric::new("99.9%", "uptime")];
        let tree = render(&Block::Metrics(metrics), &RenderContext::published())
            .expect("metrics always render");

        let row = &tree.children()[0];
        assert_eq!(row.tag(), Some("metric-row"));
        assert_eq!(row.children()[0].tag(), Some("metric-value"));
        assert_eq!(row.children()[1].tag(), Some("metric-label"));
    }

    #[test]
    fn test_grid_container_carries_columns() {
        let mut gallery = gallery_with(4);
        gallery.set_columns(2);
        let tree = render(&Block::Gallery(gallery), &RenderContext::published())
            .expect("non-empty gallery renders");
        assert_eq!(tree.tag(), Some("gallery"));
        assert!(tree.has_style(&Style::GridColumns(2)));
        // No per-item transforms in a grid
        for item in tree.children() {
            assert!(item.styles().is_empty(), "grid items are identity");
        }
    }

    #[test]
    fn test_carousel_fan_geometry_in_tree() {
        let mut gallery = gallery_with(5);
        gallery.layout = GalleryLayout::Carousel;
        let tree = render(
            &Block::Gallery(gallery),
            &RenderContext::with_active_index(2),
        )
        .expect("non-empty gallery renders");

        let expected_scales: [f32; 5] = [0.7, 0.85, 1.0, 0.85, 0.7];
        for (index, want) in expected_scales.iter().enumerate() {
            let item = &tree.children()[index];
            if (*want - 1.0).abs() < f32::EPSILON {
                assert!(item.has_style(&Style::ZIndex(50)), "active item on top");
                assert!(
                    !item.styles().iter().any(|s| matches!(s, Style::Scale(_))),
                    "active item is unscaled"
                );
            } else {
                assert!(item.has_style(&Style::Scale(*want)), "index {index}");
            }
        }
    }

    #[test]
    fn test_carousel_emits_decorative_nav() {
        let mut gallery = gallery_with(3);
        gallery.layout = GalleryLayout::Carousel;
        let tree = render(&Block::Gallery(gallery), &RenderContext::published())
            .expect("non-empty gallery renders");

        let nav = tree
            .children()
            .iter()
            .find(|node| node.tag() == Some("carousel-nav"))
            .expect("nav region expected");
        assert_eq!(nav.children().len(), 2);
    }

    #[test]
    fn test_mosaic_container_tilt_is_shared() {
        let mut gallery = gallery_with(6);
        gallery.layout = GalleryLayout::Mosaic;
        let tree = render(&Block::Gallery(gallery), &RenderContext::published())
            .expect("non-empty gallery renders");

        assert!(tree
            .styles()
            .iter()
            .any(|s| matches!(s, Style::TiltDeg(_))));
        assert!(tree
            .styles()
            .iter()
            .any(|s| matches!(s, Style::OverscaleX(_))));
        // Per-item styles carry the stagger but never rotation
        for item in tree.children() {
            assert!(!item.styles().iter().any(|s| matches!(s, Style::TiltDeg(_))));
        }
    }

    #[test]
    fn test_frame_params_shared_across_items() {
        let mut gallery = gallery_with(3);
        gallery.device = DeviceType::Laptop;
        let tree = render(&Block::Gallery(gallery), &RenderContext::published())
            .expect("non-empty gallery renders");

        for item in tree.children() {
            let body = &item.children()[0];
            assert_eq!(body.tag(), Some("frame-body"));
            assert!(body.has_style(&Style::DeviceBody(DeviceType::Laptop)));
            let stand = body
                .children()
                .iter()
                .find(|n| n.tag() == Some("frame-stand"));
            assert!(stand.is_some());
        }
    }

    #[test]
    fn test_caption_rendered_under_item() {
        let mut gallery = GalleryBlock::new();
        gallery
            .images
            .push(GalleryImage::new("a.png").with_caption("Dashboard"));
        let tree = render(&Block::Gallery(gallery), &RenderContext::published())
            .expect("non-empty gallery renders");

        let item = &tree.children()[0];
        let caption = item
            .children()
            .iter()
            .find(|n| n.tag() == Some("gallery-caption"))
            .expect("caption region expected");
        assert_eq!(
            caption.children()[0],
            RenderNode::text("Dashboard"),
        );
    }
}
