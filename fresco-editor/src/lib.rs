//! # Fresco Editor
//!
//! The authoring side of Fresco blocks: a per-block interactive controller
//! that holds draft state, executes editing commands, and orchestrates
//! uploads through an injected gateway. Rendering always goes through the
//! shared renderer in `fresco-core`; nothing here re-derives layout or frame
//! logic.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod controller;
pub mod draft;
pub mod error;
pub mod gateway;
pub mod http;

pub use controller::{BlockController, PanelState, UploadBatchOutcome};
pub use draft::DraftState;
pub use error::{ControllerError, ControllerResult};
pub use gateway::{
    MediaType, RetryConfig, UploadError, UploadGateway, UploadRequest, UploadResult,
    UploadedMedia,
};
pub use http::HttpUploadGateway;

/// Editor crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
