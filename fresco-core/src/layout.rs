//! Layout engine - pure per-item geometry for each gallery presentation mode.
//!
//! All geometric constants live here. The renderer consumes the descriptors
//! verbatim; neither output path carries its own copy of this math.

use serde::{Deserialize, Serialize};

use crate::block::GalleryLayout;

/// Scale lost per step away from the active carousel item.
const CAROUSEL_SCALE_STEP: f32 = 0.15;
/// Horizontal shift per step, as a percentage of the item width.
const CAROUSEL_SHIFT_PCT: f32 = 115.0;
/// Stacking order of the active carousel item.
const CAROUSEL_TOP_Z: i32 = 50;
/// Items further than this many steps from the active one are hidden.
const CAROUSEL_WINDOW: u64 = 2;

/// Vertical stagger cycle applied to mosaic items, in pixels.
pub const MOSAIC_STAGGER_PX: [f32; 5] = [0.0, 40.0, -30.0, 20.0, -10.0];
/// Shared rotation applied to the whole mosaic container, in degrees.
pub const MOSAIC_TILT_DEG: f32 = -4.0;
/// Shared horizontal overscale of the mosaic container, so edge items bleed
/// past the container even under the tilt.
pub const MOSAIC_OVERSCALE: f32 = 1.15;

/// Per-item geometry produced by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemGeometry {
    /// Uniform scale.
    pub scale: f32,
    /// Horizontal offset as a percentage of the item width.
    pub translate_x_pct: f32,
    /// Vertical offset in pixels.
    pub translate_y_px: f32,
    /// Stacking order.
    pub z_index: i32,
    /// Whether the item is rendered visually.
    pub visible: bool,
}

impl ItemGeometry {
    /// Untransformed, visible geometry.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            scale: 1.0,
            translate_x_pct: 0.0,
            translate_y_px: 0.0,
            z_index: 0,
            visible: true,
        }
    }

    /// Whether this geometry carries no transform at all.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

impl Default for ItemGeometry {
    fn default() -> Self {
        Self::identity()
    }
}

/// Container-level shape for a gallery layout.
///
/// Carries what the per-item descriptors cannot: grid column count, overflow
/// behavior, and the shared mosaic tilt/overscale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ContainerLayout {
    /// Column grid.
    Grid {
        /// Column count.
        columns: u8,
    },
    /// Horizontally scrollable strip.
    Slider,
    /// Overflow-visible stage for the carousel fan.
    Carousel,
    /// Tilted, overscaled stage for the mosaic stack.
    Mosaic {
        /// Shared rotation in degrees.
        tilt_deg: f32,
        /// Shared horizontal overscale.
        overscale_x: f32,
    },
}

/// Container-level layout for a gallery.
#[must_use]
pub fn container_layout(layout: GalleryLayout, columns: u8) -> ContainerLayout {
    match layout {
        GalleryLayout::Grid => ContainerLayout::Grid { columns },
        GalleryLayout::Slider => ContainerLayout::Slider,
        GalleryLayout::Carousel => ContainerLayout::Carousel,
        GalleryLayout::Mosaic => ContainerLayout::Mosaic {
            tilt_deg: MOSAIC_TILT_DEG,
            overscale_x: MOSAIC_OVERSCALE,
        },
    }
}

/// Signed distance from the active item to `index`, the short way around.
///
/// The carousel wraps: the last image sits at offset -1 of the first, which
/// keeps the fan centered on the active item no matter where the cursor is,
/// with up to five items inside the visibility window.
#[allow(clippy::cast_possible_wrap)]
fn carousel_offset(count: usize, index: usize, active_index: usize) -> i64 {
    let n = count as i64;
    let raw = index as i64 - active_index as i64;
    let half = n / 2;
    (raw + half).rem_euclid(n) - half
}

/// Per-item geometry for `count` images under the given layout.
///
/// `active_index` is the carousel cursor; the other layouts ignore it. Static
/// rendering always passes 0. `count == 0` produces no descriptors.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]
pub fn item_geometry(count: usize, layout: GalleryLayout, active_index: usize) -> Vec<ItemGeometry> {
    match layout {
        GalleryLayout::Grid | GalleryLayout::Slider => {
            vec![ItemGeometry::identity(); count]
        }
        GalleryLayout::Carousel => (0..count)
            .map(|index| {
                let offset = carousel_offset(count, index, active_index);
                let steps = offset.unsigned_abs();
                ItemGeometry {
                    scale: (1.0 - CAROUSEL_SCALE_STEP * steps as f32).max(0.0),
                    translate_x_pct: CAROUSEL_SHIFT_PCT * offset as f32,
                    translate_y_px: 0.0,
                    z_index: CAROUSEL_TOP_Z - steps as i32,
                    visible: steps <= CAROUSEL_WINDOW,
                }
            })
            .collect(),
        GalleryLayout::Mosaic => (0..count)
            .map(|index| ItemGeometry {
                scale: 1.0,
                translate_x_pct: 0.0,
                translate_y_px: MOSAIC_STAGGER_PX[index % MOSAIC_STAGGER_PX.len()],
                z_index: index as i32 + 1,
                visible: true,
            })
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_images_produce_no_descriptors() {
        for layout in [
            GalleryLayout::Grid,
            GalleryLayout::Slider,
            GalleryLayout::Carousel,
            GalleryLayout::Mosaic,
        ] {
            assert!(item_geometry(0, layout, 0).is_empty());
        }
    }

    #[test]
    fn test_grid_and_slider_are_identity() {
        for layout in [GalleryLayout::Grid, GalleryLayout::Slider] {
            let geometry = item_geometry(4, layout, 0);
            assert_eq!(geometry.len(), 4);
            assert!(geometry.iter().all(ItemGeometry::is_identity));
        }
    }

    #[test]
    fn test_carousel_active_item_law() {
        let geometry = item_geometry(7, GalleryLayout::Carousel, 3);
        let active = &geometry[3];
        assert!((active.scale - 1.0).abs() < f32::EPSILON);
        assert!(active.translate_x_pct.abs() < f32::EPSILON);
        assert_eq!(active.z_index, 50);
        assert!(active.visible);
    }

    #[test]
    fn test_carousel_fan_scales() {
        let geometry = item_geometry(5, GalleryLayout::Carousel, 2);
        let scales: Vec<f32> = geometry.iter().map(|g| g.scale).collect();
        let expected = [0.7, 0.85, 1.0, 0.85, 0.7];
        for (scale, want) in scales.iter().zip(expected) {
            assert!((scale - want).abs() < 1e-6, "scale {scale} != {want}");
        }
    }

    #[test]
    fn test_carousel_visibility_window() {
        let geometry = item_geometry(9, GalleryLayout::Carousel, 4);
        for (index, item) in geometry.iter().enumerate() {
            let steps = (index as i64 - 4).unsigned_abs();
            assert_eq!(item.visible, steps <= 2, "index {index}");
        }
    }

    #[test]
    fn test_carousel_translate_and_z() {
        let geometry = item_geometry(5, GalleryLayout::Carousel, 0);
        assert!((geometry[1].translate_x_pct - 115.0).abs() < f32::EPSILON);
        assert!((geometry[2].translate_x_pct - 230.0).abs() < f32::EPSILON);
        assert_eq!(geometry[1].z_index, 49);
        assert_eq!(geometry[2].z_index, 48);
    }

    #[test]
    fn test_carousel_wraps_the_short_way_around() {
        // With the cursor on the first image, the last two images fan out to
        // the left rather than trailing off to the far right.
        let geometry = item_geometry(5, GalleryLayout::Carousel, 0);
        assert!((geometry[4].translate_x_pct - -115.0).abs() < f32::EPSILON);
        assert!((geometry[3].translate_x_pct - -230.0).abs() < f32::EPSILON);
        assert!((geometry[4].scale - 0.85).abs() < 1e-6);
        assert!((geometry[3].scale - 0.7).abs() < 1e-6);
        assert!(geometry.iter().all(|item| item.visible), "all five visible");
    }

    #[test]
    fn test_carousel_window_limits_visibility_for_large_counts() {
        let geometry = item_geometry(9, GalleryLayout::Carousel, 0);
        let visible = geometry.iter().filter(|item| item.visible).count();
        assert_eq!(visible, 5, "at most five items in the fan");
        assert!(!geometry[3].visible);
        assert!(!geometry[5].visible);
        assert!(geometry[7].visible, "wrapped to offset -2");
    }

    #[test]
    fn test_single_image_carousel_is_valid() {
        let geometry = item_geometry(1, GalleryLayout::Carousel, 0);
        assert_eq!(geometry.len(), 1);
        assert!((geometry[0].scale - 1.0).abs() < f32::EPSILON);
        assert!(geometry[0].visible);
    }

    #[test]
    fn test_mosaic_stagger_repeats_every_five() {
        let geometry = item_geometry(12, GalleryLayout::Mosaic, 0);
        for (index, item) in geometry.iter().enumerate() {
            let expected = MOSAIC_STAGGER_PX[index % 5];
            assert!(
                (item.translate_y_px - expected).abs() < f32::EPSILON,
                "index {index}"
            );
            assert_eq!(item.z_index, index as i32 + 1);
        }
        assert!(
            (geometry[0].translate_y_px - geometry[5].translate_y_px).abs() < f32::EPSILON,
            "indices 0 and 5 share a stagger"
        );
    }

    #[test]
    fn test_mosaic_ignores_active_index() {
        assert_eq!(
            item_geometry(6, GalleryLayout::Mosaic, 0),
            item_geometry(6, GalleryLayout::Mosaic, 3)
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_carousel_active_is_centered(
                count in 1usize..64,
                active in 0usize..64,
            ) {
                let active = active % count;
                let geometry = item_geometry(count, GalleryLayout::Carousel, active);

                prop_assert_eq!(geometry.len(), count);
                let item = &geometry[active];
                prop_assert!((item.scale - 1.0).abs() < f32::EPSILON);
                prop_assert!(item.translate_x_pct.abs() < f32::EPSILON);
                prop_assert_eq!(item.z_index, 50);
                prop_assert!(item.visible);
            }

            #[test]
            fn prop_carousel_far_items_hidden(
                count in 1usize..64,
                active in 0usize..64,
            ) {
                let active = active % count;
                for (index, item) in item_geometry(count, GalleryLayout::Carousel, active)
                    .iter()
                    .enumerate()
                {
                    // Circular distance the short way around
                    let raw = (index as i64 - active as i64).rem_euclid(count as i64);
                    let steps = raw.min(count as i64 - raw);
                    prop_assert_eq!(item.visible, steps <= 2);
                    prop_assert!(item.scale >= 0.0);
                }
            }

            #[test]
            fn prop_mosaic_stagger_is_periodic(count in 0usize..128) {
                let geometry = item_geometry(count, GalleryLayout::Mosaic, 0);
                for (index, item) in geometry.iter().enumerate() {
                    if index >= 5 {
                        prop_assert!(
                            (item.translate_y_px - geometry[index - 5].translate_y_px).abs()
                                < f32::EPSILON
                        );
                    }
                }
            }

            #[test]
            fn prop_geometry_is_deterministic(
                count in 0usize..32,
                active in 0usize..32,
            ) {
                for layout in [
                    GalleryLayout::Grid,
                    GalleryLayout::Slider,
                    GalleryLayout::Carousel,
                    GalleryLayout::Mosaic,
                ] {
                    prop_assert_eq!(
                        item_geometry(count, layout, active),
                        item_geometry(count, layout, active)
                    );
                }
            }
        }
    }
}
