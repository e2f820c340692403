//! Integration tests for the block controller with a test-double gateway.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use fresco_core::{
    Block, GalleryBlock, GalleryImage, GalleryLayout, Metric, MetricsBlock, MoveDirection,
    Style,
};
use fresco_editor::{
    BlockController, MediaType, PanelState, UploadError, UploadGateway, UploadRequest,
    UploadResult, UploadedMedia,
};

/// Gateway double: succeeds unless the file name contains "bad", and stores
/// each file under a URL derived from its name.
struct NameBasedGateway {
    calls: AtomicUsize,
}

impl NameBasedGateway {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl UploadGateway for NameBasedGateway {
    async fn upload(&self, request: UploadRequest) -> UploadResult<UploadedMedia> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if request.file_name.contains("bad") {
            return Err(UploadError::Rejected("scripted failure".into()));
        }
        Ok(UploadedMedia {
            url: format!("https://cdn.example.com/{}", request.file_name),
            media_type: MediaType::Image,
        })
    }
}

fn gallery_controller() -> BlockController {
    BlockController::new_gallery(NameBasedGateway::new())
}

#[tokio::test]
async fn batch_preserves_input_order() {
    let mut controller = gallery_controller();
    let outcome = controller
        .add_images(vec![
            UploadRequest::image("first.png", vec![1]),
            UploadRequest::image("second.png", vec![2]),
            UploadRequest::image("third.png", vec![3]),
        ])
        .await
        .expect("gallery accepts uploads");

    assert_eq!(outcome.added, 3);
    assert_eq!(outcome.failed, 0);
    assert!(outcome.notice().is_none());

    let gallery = controller.committed().as_gallery().expect("gallery");
    let urls: Vec<&str> = gallery.images.iter().map(|i| i.url.as_str()).collect();
    assert_eq!(
        urls,
        [
            "https://cdn.example.com/first.png",
            "https://cdn.example.com/second.png",
            "https://cdn.example.com/third.png",
        ]
    );
}

#[tokio::test]
async fn batch_skips_failed_file_and_keeps_siblings() {
    let mut controller = gallery_controller();
    let outcome = controller
        .add_images(vec![
            UploadRequest::image("one.png", vec![1]),
            UploadRequest::image("bad.png", vec![2]),
            UploadRequest::image("three.png", vec![3]),
        ])
        .await
        .expect("gallery accepts uploads");

    assert_eq!(outcome.added, 2);
    assert_eq!(outcome.failed, 1);
    assert!(outcome.notice().is_none(), "partial failure is silent");

    let gallery = controller.committed().as_gallery().expect("gallery");
    assert_eq!(gallery.images.len(), 2);
    assert_eq!(gallery.images[0].url, "https://cdn.example.com/one.png");
    assert_eq!(gallery.images[1].url, "https://cdn.example.com/three.png");
}

#[tokio::test]
async fn total_failure_surfaces_notice_without_corrupting_state() {
    let mut controller = gallery_controller();
    controller
        .add_images(vec![UploadRequest::image("keep.png", vec![0])])
        .await
        .expect("first batch");

    let outcome = controller
        .add_images(vec![
            UploadRequest::image("bad-1.png", vec![1]),
            UploadRequest::image("bad-2.png", vec![2]),
        ])
        .await
        .expect("batch itself is not an error");

    assert_eq!(outcome.added, 0);
    assert_eq!(outcome.failed, 2);
    assert!(outcome.notice().is_some(), "total failure gets a notice");

    let gallery = controller.committed().as_gallery().expect("gallery");
    assert_eq!(gallery.images.len(), 1, "committed images untouched");
    assert!(!controller.is_busy());
}

#[tokio::test]
async fn move_image_preserves_identity_set() {
    let mut controller = gallery_controller();
    controller
        .add_images(vec![
            UploadRequest::image("a.png", vec![]),
            UploadRequest::image("b.png", vec![]),
            UploadRequest::image("c.png", vec![]),
        ])
        .await
        .expect("uploads");

    let before: Vec<_> = controller
        .committed()
        .as_gallery()
        .expect("gallery")
        .images
        .iter()
        .map(|i| i.id)
        .collect();

    let moved = controller
        .move_image(before[2], MoveDirection::Backward)
        .expect("known image");
    assert!(moved);

    let after: Vec<_> = controller
        .committed()
        .as_gallery()
        .expect("gallery")
        .images
        .iter()
        .map(|i| i.id)
        .collect();

    assert_eq!(after, [before[0], before[2], before[1]]);

    let mut sorted_before = before.clone();
    let mut sorted_after = after.clone();
    sorted_before.sort_by_key(|id| id.to_string());
    sorted_after.sort_by_key(|id| id.to_string());
    assert_eq!(
        sorted_before, sorted_after,
        "no image duplicated or dropped"
    );
}

#[tokio::test]
async fn removing_last_image_keeps_gallery_alive() {
    let mut controller = gallery_controller();
    controller
        .add_images(vec![UploadRequest::image("only.png", vec![])])
        .await
        .expect("upload");

    let id = controller.committed().as_gallery().expect("gallery").images[0].id;
    controller.remove_image(id).expect("known image");

    assert!(!controller.is_deleted(), "gallery survives at zero images");
    assert!(
        controller.preview().is_none(),
        "empty gallery shows the configuration affordance"
    );
}

#[test]
fn removing_last_metric_deletes_block() {
    let gateway = NameBasedGateway::new();
    let mut controller = BlockController::new_metrics(gateway);

    let deleted = controller.remove_metric(0).expect("row exists");
    assert!(deleted);
    assert!(controller.is_deleted());
    assert!(controller.remove_metric(0).is_err(), "commands stop working");
}

#[test]
fn drafts_commit_on_blur_and_structural_action() {
    let gateway = NameBasedGateway::new();
    let mut metrics = MetricsBlock::new();
    metrics.metrics = vec![Metric::default()];
    let mut controller = BlockController::new(Block::Metrics(metrics), gateway);

    controller.draft_metric_value(0, "120k");
    controller.draft_metric_label(0, "users");
    assert_eq!(
        controller.committed().as_metrics().expect("metrics").metrics[0].value,
        "",
        "drafts do not touch the document per keystroke"
    );

    controller.commit_drafts();
    let committed = controller.committed().as_metrics().expect("metrics");
    assert_eq!(committed.metrics[0].value, "120k");
    assert_eq!(committed.metrics[0].label, "users");

    // A structural action also reconciles pending drafts first.
    controller.draft_metric_value(0, "200k");
    controller.add_metric().expect("metrics block");
    let committed = controller.committed().as_metrics().expect("metrics");
    assert_eq!(committed.metrics[0].value, "200k");
    assert_eq!(committed.metrics.len(), 2);
}

#[test]
fn external_change_discards_drafts() {
    let gateway = NameBasedGateway::new();
    let mut controller = BlockController::new_metrics(gateway);
    controller.draft_metric_value(0, "half-typed");

    // The upstream document changed (e.g. external undo): replace, not merge.
    let mut replacement = MetricsBlock::new();
    replacement.metrics = vec![Metric::new("9", "lives")];
    controller.sync_committed(Block::Metrics(replacement));
    controller.commit_drafts();

    let metrics = controller.committed().as_metrics().expect("metrics");
    assert_eq!(metrics.metrics[0].value, "9", "draft was discarded");
}

#[test]
fn panel_state_machine_round_trips() {
    let gateway = NameBasedGateway::new();
    let mut controller = BlockController::new_gallery(gateway);
    assert_eq!(controller.panel(), PanelState::Idle);

    controller.open_panel();
    assert_eq!(controller.panel(), PanelState::Configuring);

    controller.close_panel();
    assert_eq!(controller.panel(), PanelState::Idle);
}

#[tokio::test]
async fn carousel_cursor_clamps_to_images() {
    let mut controller = gallery_controller();
    controller.set_layout(GalleryLayout::Carousel).expect("gallery");
    controller
        .add_images(vec![
            UploadRequest::image("a.png", vec![]),
            UploadRequest::image("b.png", vec![]),
            UploadRequest::image("c.png", vec![]),
        ])
        .await
        .expect("uploads");

    controller.set_active_index(99);
    assert_eq!(controller.active_index(), 2);

    controller.step_active(MoveDirection::Forward);
    assert_eq!(controller.active_index(), 2, "clamped at the end");

    controller.step_active(MoveDirection::Backward);
    assert_eq!(controller.active_index(), 1);

    let tree = controller.preview().expect("non-empty gallery");
    let middle = &tree.children()[1];
    assert!(
        middle.has_style(&Style::ZIndex(50)),
        "cursor item is on top of the fan"
    );
}

#[test]
fn device_change_resets_frame_only_fields() {
    let gateway = NameBasedGateway::new();
    let mut gallery = GalleryBlock::new();
    gallery.images.push(GalleryImage::new("x.png"));
    let mut controller = BlockController::new(Block::Gallery(gallery), gateway);

    controller.set_corner_radius(48).expect("gallery");
    controller
        .set_device(fresco_core::DeviceType::Mobile)
        .expect("gallery");

    let committed = controller.committed().as_gallery().expect("gallery");
    assert_eq!(committed.corner_radius, 12, "reset with the device change");
}
