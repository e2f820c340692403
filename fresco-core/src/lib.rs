//! # Fresco Core
//!
//! Block model and shared render pipeline for Fresco content blocks.
//! Everything in this crate is pure data or pure functions; the editing
//! surface and the static publisher both sit on top of it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                fresco-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Block Model     │  Attribute Schema        │
//! │  - Metrics       │  - Defaults & clamps     │
//! │  - Gallery       │  - Tolerant load         │
//! ├─────────────────────────────────────────────┤
//! │  Layout Engine   │  Frame Compositor        │
//! │  - Grid/Slider   │  - Body/screen/bezel     │
//! │  - Carousel fan  │  - Stand regions         │
//! │  - Mosaic tilt   │  - Bare short-circuit    │
//! ├─────────────────────────────────────────────┤
//! │        Block Renderer → RenderTree          │
//! │   (single source of truth for both paths)   │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod block;
pub mod error;
pub mod frame;
pub mod image;
pub mod layout;
pub mod render;
pub mod schema;
pub mod tree;

pub use block::{
    Alignment, AspectRatio, BezelType, Block, ColorScheme, DeviceType, GalleryBlock,
    GalleryLayout, Metric, MetricsBlock, MockupStyle, MoveDirection,
};
pub use error::{BlockError, BlockResult};
pub use frame::{compose, FrameDescriptor, FrameParams, RegionSpec};
pub use image::{GalleryImage, ImageId};
pub use layout::{container_layout, item_geometry, ContainerLayout, ItemGeometry};
pub use render::{render, RenderContext};
pub use schema::{BlockDocument, Document, DocumentNode};
pub use tree::{RenderNode, Style};

/// Core crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
