//! Draft state - transient text buffers shielding the document model from
//! per-keystroke writes.
//!
//! While an author types into a metric cell or a caption field, the keystrokes
//! land here instead of the committed block. The buffers reconcile into the
//! block on blur or on any structural action, and are discarded wholesale when
//! the upstream document changes underneath the editor (external undo), never
//! merged. Drafts are never persisted.

use std::collections::{BTreeMap, HashMap};

use fresco_core::{Block, ImageId};

/// Uncommitted text for one metric row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricDraft {
    /// Pending headline value, if the author touched it.
    pub value: Option<String>,
    /// Pending label, if the author touched it.
    pub label: Option<String>,
}

/// All uncommitted text edits of a single block.
#[derive(Debug, Clone, Default)]
pub struct DraftState {
    rows: BTreeMap<usize, MetricDraft>,
    captions: HashMap<ImageId, String>,
}

impl DraftState {
    /// Create an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer a pending metric value.
    pub fn set_value(&mut self, row: usize, text: impl Into<String>) {
        self.rows.entry(row).or_default().value = Some(text.into());
    }

    /// Buffer a pending metric label.
    pub fn set_label(&mut self, row: usize, text: impl Into<String>) {
        self.rows.entry(row).or_default().label = Some(text.into());
    }

    /// Buffer a pending image caption. An empty string clears the caption.
    pub fn set_caption(&mut self, id: ImageId, text: impl Into<String>) {
        self.captions.insert(id, text.into());
    }

    /// Whether any text is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.captions.is_empty()
    }

    /// Drop all buffered text without committing it.
    pub fn discard(&mut self) {
        self.rows.clear();
        self.captions.clear();
    }

    /// Reconcile all buffered text into the committed block and clear the
    /// buffers. Rows or images the block no longer holds are dropped
    /// silently.
    pub fn commit(&mut self, block: &mut Block) {
        match block {
            Block::Metrics(metrics) => {
                for (row, draft) in std::mem::take(&mut self.rows) {
                    let Some(metric) = metrics.metrics.get_mut(row) else {
                        continue;
                    };
                    if let Some(value) = draft.value {
                        metric.value = value;
                    }
                    if let Some(label) = draft.label {
                        metric.label = label;
                    }
                }
            }
            Block::Gallery(gallery) => {
                for (id, caption) in self.captions.drain() {
                    let Some(image) = gallery.images.iter_mut().find(|image| image.id == id)
                    else {
                        continue;
                    };
                    image.caption = (!caption.is_empty()).then_some(caption);
                }
            }
        }
        self.discard();
    }
}
