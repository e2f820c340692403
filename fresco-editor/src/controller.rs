//! Interactive node controller - per-block editing state and commands.
//!
//! Each block instance in the editor owns one [`BlockController`]. The
//! controller holds the committed block value, the transient
//! [`DraftState`](crate::DraftState), the configuration panel state, and the
//! carousel cursor. Every visual read goes through the shared renderer in
//! `fresco-core`; the controller contains no geometry or frame math.

use std::sync::Arc;

use fresco_core::{
    render, Alignment, AspectRatio, BezelType, Block, BlockDocument, ColorScheme, DeviceType,
    GalleryImage, GalleryLayout, ImageId, Metric, MockupStyle, MoveDirection, RenderContext,
    RenderNode,
};

use crate::draft::DraftState;
use crate::error::{ControllerError, ControllerResult};
use crate::gateway::{UploadGateway, UploadRequest};

/// Configuration panel state for a block instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    /// Panel closed; the block shows its preview.
    #[default]
    Idle,
    /// Panel open; attributes are being edited.
    Configuring,
}

/// Result of an upload batch.
///
/// Per-file failures are independent; a failed file simply does not appear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadBatchOutcome {
    /// Files stored and appended to the gallery.
    pub added: usize,
    /// Files that failed to upload.
    pub failed: usize,
}

impl UploadBatchOutcome {
    /// A soft, non-blocking notice for the author, if one is warranted.
    ///
    /// Individual failures produce no user-facing error beyond the file not
    /// appearing; only a batch that failed entirely is surfaced.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        (self.added == 0 && self.failed > 0)
            .then(|| format!("Upload failed for all {} file(s)", self.failed))
    }
}

/// Editing controller for a single block instance.
pub struct BlockController {
    block: Block,
    drafts: DraftState,
    panel: PanelState,
    active_index: usize,
    uploads_in_flight: usize,
    deleted: bool,
    gateway: Arc<dyn UploadGateway>,
}

impl BlockController {
    /// Create a controller for a block with an injected upload gateway.
    #[must_use]
    pub fn new(block: Block, gateway: Arc<dyn UploadGateway>) -> Self {
        Self {
            block,
            drafts: DraftState::new(),
            panel: PanelState::Idle,
            active_index: 0,
            uploads_in_flight: 0,
            deleted: false,
            gateway,
        }
    }

    /// Controller for a freshly inserted, empty gallery block.
    #[must_use]
    pub fn new_gallery(gateway: Arc<dyn UploadGateway>) -> Self {
        Self::new(Block::Gallery(fresco_core::GalleryBlock::new()), gateway)
    }

    /// Controller for a freshly inserted metrics block with one empty row.
    #[must_use]
    pub fn new_metrics(gateway: Arc<dyn UploadGateway>) -> Self {
        Self::new(Block::Metrics(fresco_core::MetricsBlock::new()), gateway)
    }

    // -----------------------------------------------------------------------
    // State access
    // -----------------------------------------------------------------------

    /// The committed block value.
    #[must_use]
    pub const fn committed(&self) -> &Block {
        &self.block
    }

    /// Encode the committed block for persistence.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be encoded.
    pub fn document(&self) -> ControllerResult<BlockDocument> {
        Ok(BlockDocument::from_block(&self.block)?)
    }

    /// Current configuration panel state.
    #[must_use]
    pub const fn panel(&self) -> PanelState {
        self.panel
    }

    /// Open the configuration panel.
    pub fn open_panel(&mut self) {
        self.panel = PanelState::Configuring;
    }

    /// Close the configuration panel, committing any pending drafts.
    pub fn close_panel(&mut self) {
        self.commit_drafts();
        self.panel = PanelState::Idle;
    }

    /// Whether an upload batch is in flight.
    ///
    /// The editing surface shows a busy overlay while this holds, but the
    /// attribute panel stays usable.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.uploads_in_flight > 0
    }

    /// Whether the block was deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Current carousel cursor.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    /// Render the committed block through the shared renderer.
    ///
    /// `None` means the block has no visual output (an empty gallery) and the
    /// surface shows the configuration affordance instead.
    #[must_use]
    pub fn preview(&self) -> Option<RenderNode> {
        render(
            &self.block,
            &RenderContext::with_active_index(self.active_index),
        )
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Delete the block explicitly.
    pub fn delete_block(&mut self) {
        self.drafts.discard();
        self.deleted = true;
    }

    /// Replace the committed block after the upstream document changed
    /// underneath this controller (e.g. an external undo).
    ///
    /// Pending drafts are discarded and replaced by the committed value,
    /// never merged.
    pub fn sync_committed(&mut self, block: Block) {
        if !self.drafts.is_empty() {
            tracing::debug!("Discarding drafts after external document change");
        }
        self.drafts.discard();
        self.block = block;
        self.clamp_active_index();
    }

    /// Commit all pending drafts into the block (blur).
    pub fn commit_drafts(&mut self) {
        self.drafts.commit(&mut self.block);
    }

    // -----------------------------------------------------------------------
    // Text drafts
    // -----------------------------------------------------------------------

    /// Buffer a keystroke-level edit of a metric value.
    pub fn draft_metric_value(&mut self, row: usize, text: impl Into<String>) {
        self.drafts.set_value(row, text);
    }

    /// Buffer a keystroke-level edit of a metric label.
    pub fn draft_metric_label(&mut self, row: usize, text: impl Into<String>) {
        self.drafts.set_label(row, text);
    }

    /// Buffer a keystroke-level edit of an image caption.
    pub fn draft_caption(&mut self, id: ImageId, text: impl Into<String>) {
        self.drafts.set_caption(id, text);
    }

    // -----------------------------------------------------------------------
    // Gallery commands
    // -----------------------------------------------------------------------

    /// Upload a batch of files and append the stored images in input order.
    ///
    /// Files upload concurrently but results are applied in the order the
    /// files were provided. A failed file is skipped without aborting its
    /// siblings; inspect the returned outcome for a soft notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted or not a gallery. Upload
    /// failures are not errors.
    pub async fn add_images(
        &mut self,
        requests: Vec<UploadRequest>,
    ) -> ControllerResult<UploadBatchOutcome> {
        self.ensure_alive()?;
        if self.block.as_gallery().is_none() {
            return Err(ControllerError::NotAGallery);
        }
        self.commit_drafts();

        let count = requests.len();
        self.uploads_in_flight += count;
        let gateway = Arc::clone(&self.gateway);
        let results = futures::future::join_all(requests.into_iter().map(|request| {
            let gateway = Arc::clone(&gateway);
            async move {
                let name = request.file_name.clone();
                (name, gateway.upload(request).await)
            }
        }))
        .await;
        self.uploads_in_flight -= count;

        let gallery = self
            .block
            .as_gallery_mut()
            .ok_or(ControllerError::NotAGallery)?;
        let mut outcome = UploadBatchOutcome::default();
        for (name, result) in results {
            match result {
                Ok(media) => {
                    gallery.images.push(GalleryImage::new(media.url));
                    outcome.added += 1;
                }
                Err(error) => {
                    tracing::warn!("Upload of {name} failed, skipping: {error}");
                    outcome.failed += 1;
                }
            }
        }
        Ok(outcome)
    }

    /// Remove an image by identity.
    ///
    /// Removing the last image leaves the gallery alive in its empty state;
    /// only an explicit [`Self::delete_block`] removes the block.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted, not a gallery, or the image
    /// is unknown.
    pub fn remove_image(&mut self, id: ImageId) -> ControllerResult<()> {
        self.ensure_alive()?;
        self.commit_drafts();
        let gallery = self
            .block
            .as_gallery_mut()
            .ok_or(ControllerError::NotAGallery)?;
        gallery
            .remove_image(id)
            .ok_or(ControllerError::ImageNotFound(id))?;
        self.clamp_active_index();
        Ok(())
    }

    /// Move an image one step. Identity is preserved; edges are no-ops.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted, not a gallery, or the image
    /// is unknown.
    pub fn move_image(&mut self, id: ImageId, direction: MoveDirection) -> ControllerResult<bool> {
        self.ensure_alive()?;
        self.commit_drafts();
        let gallery = self
            .block
            .as_gallery_mut()
            .ok_or(ControllerError::NotAGallery)?;
        if gallery.image_index(id).is_none() {
            return Err(ControllerError::ImageNotFound(id));
        }
        Ok(gallery.move_image(id, direction))
    }

    /// Move the carousel cursor one step, clamped to the image range.
    pub fn step_active(&mut self, direction: MoveDirection) {
        let count = self
            .block
            .as_gallery()
            .map_or(0, |gallery| gallery.images.len());
        self.active_index = match direction {
            MoveDirection::Backward => self.active_index.saturating_sub(1),
            MoveDirection::Forward => (self.active_index + 1).min(count.saturating_sub(1)),
        };
    }

    /// Jump the carousel cursor, clamped to the image range.
    pub fn set_active_index(&mut self, index: usize) {
        self.active_index = index;
        self.clamp_active_index();
    }

    fn clamp_active_index(&mut self) {
        let count = self
            .block
            .as_gallery()
            .map_or(0, |gallery| gallery.images.len());
        self.active_index = self.active_index.min(count.saturating_sub(1));
    }

    // -----------------------------------------------------------------------
    // Attribute commands (structural - commit immediately)
    // -----------------------------------------------------------------------

    /// Set the gallery layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted or not a gallery.
    pub fn set_layout(&mut self, layout: GalleryLayout) -> ControllerResult<()> {
        self.with_gallery(|gallery| gallery.layout = layout)
    }

    /// Set the grid column count, clamped to the legal range.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted or not a gallery.
    pub fn set_columns(&mut self, columns: u8) -> ControllerResult<()> {
        self.with_gallery(|gallery| gallery.set_columns(columns))
    }

    /// Set the device frame, atomically resetting the frame-only fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted or not a gallery.
    pub fn set_device(&mut self, device: DeviceType) -> ControllerResult<()> {
        self.with_gallery(|gallery| gallery.set_device(device))
    }

    /// Set the mockup style.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted or not a gallery.
    pub fn set_mockup_style(&mut self, style: MockupStyle) -> ControllerResult<()> {
        self.with_gallery(|gallery| gallery.mockup_style = style)
    }

    /// Set the bezel shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted or not a gallery.
    pub fn set_bezel(&mut self, bezel: BezelType) -> ControllerResult<()> {
        self.with_gallery(|gallery| gallery.bezel = bezel)
    }

    /// Set the color scheme.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted or not a gallery.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) -> ControllerResult<()> {
        self.with_gallery(|gallery| gallery.color_scheme = scheme)
    }

    /// Toggle the drop shadow.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted or not a gallery.
    pub fn set_shadow(&mut self, has_shadow: bool) -> ControllerResult<()> {
        self.with_gallery(|gallery| gallery.has_shadow = has_shadow)
    }

    /// Set the corner radius, clamped to the legal range.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted or not a gallery.
    pub fn set_corner_radius(&mut self, radius: u8) -> ControllerResult<()> {
        self.with_gallery(|gallery| gallery.set_corner_radius(radius))
    }

    /// Set the forced aspect ratio.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted or not a gallery.
    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) -> ControllerResult<()> {
        self.with_gallery(|gallery| gallery.aspect_ratio = ratio)
    }

    /// Set the document-flow alignment (valid for both block kinds).
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted.
    pub fn set_alignment(&mut self, alignment: Alignment) -> ControllerResult<()> {
        self.ensure_alive()?;
        self.commit_drafts();
        match &mut self.block {
            Block::Metrics(metrics) => metrics.alignment = alignment,
            Block::Gallery(gallery) => gallery.alignment = alignment,
        }
        Ok(())
    }

    fn with_gallery(
        &mut self,
        apply: impl FnOnce(&mut fresco_core::GalleryBlock),
    ) -> ControllerResult<()> {
        self.ensure_alive()?;
        self.commit_drafts();
        let gallery = self
            .block
            .as_gallery_mut()
            .ok_or(ControllerError::NotAGallery)?;
        apply(gallery);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Metrics commands
    // -----------------------------------------------------------------------

    /// Append an empty metric row.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted or not a metrics block.
    pub fn add_metric(&mut self) -> ControllerResult<()> {
        self.ensure_alive()?;
        self.commit_drafts();
        let metrics = self
            .block
            .as_metrics_mut()
            .ok_or(ControllerError::NotAMetrics)?;
        metrics.metrics.push(Metric::default());
        Ok(())
    }

    /// Remove a metric row.
    ///
    /// Removing the last row deletes the whole block - the inverse of the
    /// gallery rule, where an empty block survives. An empty gallery still
    /// carries configuration worth keeping; an empty metrics grid does not.
    ///
    /// Returns `true` if the block was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is deleted, not a metrics block, or the
    /// row is out of range.
    pub fn remove_metric(&mut self, row: usize) -> ControllerResult<bool> {
        self.ensure_alive()?;
        self.commit_drafts();
        let metrics = self
            .block
            .as_metrics_mut()
            .ok_or(ControllerError::NotAMetrics)?;
        if row >= metrics.metrics.len() {
            return Err(ControllerError::RowOutOfRange(row));
        }
        metrics.metrics.remove(row);
        if metrics.metrics.is_empty() {
            self.delete_block();
            return Ok(true);
        }
        Ok(false)
    }

    fn ensure_alive(&self) -> ControllerResult<()> {
        if self.deleted {
            return Err(ControllerError::Deleted);
        }
        Ok(())
    }
}

impl std::fmt::Debug for BlockController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockController")
            .field("kind", &self.block.kind())
            .field("panel", &self.panel)
            .field("active_index", &self.active_index)
            .field("uploads_in_flight", &self.uploads_in_flight)
            .field("deleted", &self.deleted)
            .finish_non_exhaustive()
    }
}
