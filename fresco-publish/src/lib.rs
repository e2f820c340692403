//! # Fresco Publish
//!
//! The static output path: walks a persisted document, renders each block
//! through the shared renderer in `fresco-core` at `active_index = 0`, and
//! serializes the resulting trees to markup. A pure function of the document
//! with no network calls and no mutable state, so publishing is repeatable
//! and cacheable.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod html;
pub mod publisher;

pub use html::render_html;
pub use publisher::{publish, publish_block, publish_json};

/// Publish crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
