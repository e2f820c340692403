//! The static publisher.
//!
//! Walks the persisted document and emits markup. Block nodes go through the
//! same shared renderer the editing surface uses, pinned to
//! `active_index = 0`; toolkit markup nodes pass through verbatim.

use fresco_core::{render, Block, BlockResult, Document, DocumentNode, RenderContext};

use crate::html::render_html;

/// Publish a document to markup.
///
/// A pure function of the document: no network, no mutable state, identical
/// output for identical input. A block node that cannot be decoded is skipped
/// with a warning rather than failing the page - published content must
/// always render something.
#[must_use]
pub fn publish(document: &Document) -> String {
    let mut out = String::with_capacity(4096);
    for node in &document.nodes {
        match node {
            DocumentNode::Markup { html } => out.push_str(html),
            DocumentNode::Block { block } => match block.to_block() {
                Ok(typed) => {
                    if let Some(markup) = publish_block(&typed) {
                        out.push_str(&markup);
                    }
                }
                Err(error) => {
                    tracing::warn!("Skipping unpublishable block: {error}");
                }
            },
        }
    }
    out
}

/// Publish a single block to markup.
///
/// Returns `None` for blocks with no visual output (an empty gallery).
#[must_use]
pub fn publish_block(block: &Block) -> Option<String> {
    render(block, &RenderContext::published()).map(|tree| render_html(&tree))
}

/// Parse a persisted document from JSON and publish it.
///
/// # Errors
///
/// Returns an error if the document JSON cannot be parsed. Block-level
/// problems never error; see [`publish`].
pub fn publish_json(json: &str) -> BlockResult<String> {
    Ok(publish(&Document::from_json(json)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresco_core::{BlockDocument, GalleryBlock, GalleryImage, Metric, MetricsBlock};
    use serde_json::json;

    fn metrics_block() -> Block {
        let mut metrics = MetricsBlock::new();
        metrics.metrics = vec![Metric::new("120k", "users")];
        Block::Metrics(metrics)
    }

    #[test]
    fn test_publish_is_deterministic() {
        let mut document = Document::new();
        document.push_markup("<p>intro</p>");
        document.push_block(&metrics_block()).expect("push");

        assert_eq!(publish(&document), publish(&document));
    }

    #[test]
    fn test_markup_nodes_pass_through_verbatim() {
        let mut document = Document::new();
        document.push_markup("<h2>Launch week</h2>");
        let html = publish(&document);
        assert_eq!(html, "<h2>Launch week</h2>");
    }

    #[test]
    fn test_empty_gallery_publishes_nothing() {
        let mut document = Document::new();
        document
            .push_block(&Block::Gallery(GalleryBlock::new()))
            .expect("push");
        assert_eq!(publish(&document), "");
    }

    #[test]
    fn test_unknown_block_kind_is_skipped() {
        let json = json!({
            "nodes": [
                { "type": "markup", "html": "<p>kept</p>" },
                { "type": "block", "kind": "tweet-embed", "attrs": {} },
            ]
        })
        .to_string();

        let html = publish_json(&json).expect("document parses");
        assert_eq!(html, "<p>kept</p>");
    }

    #[test]
    fn test_unknown_attribute_values_still_publish() {
        let mut gallery = GalleryBlock::new();
        gallery.images.push(GalleryImage::new("a.png"));
        let document = BlockDocument::from_block(&Block::Gallery(gallery)).expect("encode");

        let mut attrs = document.attrs.clone();
        attrs.insert("device".to_string(), json!("holo"));
        let json = json!({
            "nodes": [{ "type": "block", "kind": "gallery", "attrs": attrs }]
        })
        .to_string();

        let html = publish_json(&json).expect("document parses");
        assert!(html.contains("fresco-gallery"), "falls back to defaults");
        assert!(html.contains("fresco-frame"), "bare frame for default device");
    }

    #[test]
    fn test_publish_json_rejects_garbage() {
        assert!(publish_json("{ not json").is_err());
    }
}
