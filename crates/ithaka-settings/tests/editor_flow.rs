//! End-to-end editor flow: crop an image element, record the edit, undo it.

use ithaka_core::Point;
use ithaka_cropper::{AspectRatioPreset, ContainerRect, CropRegion};
use ithaka_history::{PageStore, RestoreOutcome, SnapshotEngine};
use ithaka_settings::EditorConfig;
use serde_json::json;

fn region_json(region: &CropRegion) -> serde_json::Value {
    serde_json::to_value(region).unwrap()
}

#[test]
fn test_crop_confirmation_is_undoable() {
    let config = EditorConfig::default();
    let store = PageStore::new("voyage-day-3").with_elements(vec![json!({
        "id": "photo-1",
        "type": "image",
        "naturalWidth": 800,
        "naturalHeight": 600,
        "crop": null
    })]);
    let mut engine = SnapshotEngine::with_selection_clearing(store);
    let mut history = config.undo_manager();
    engine.store_mut().select("photo-1");

    // Crop session, shown at half size.
    let mut tool = config.crop_tool(800.0, 600.0);
    let container = ContainerRect::new(0.0, 0.0, 400.0, 300.0);
    tool.set_aspect_ratio(AspectRatioPreset::Square);
    let br = tool.crop_data();
    let grab = Point::new(br.right() / 2.0, br.bottom() / 2.0);
    assert!(tool.handle_mouse_down(grab, &container));
    tool.handle_mouse_move(Point::new(grab.x + 10.0, grab.y + 10.0), &container);
    tool.handle_mouse_up();
    let confirmed = tool.crop_data();
    assert_eq!(confirmed.width, confirmed.height);

    let recorded = engine.record_edit(&mut history, Some("Crop image"), |store| {
        if let Some(photo) = store.get_mut("photo-1") {
            photo["crop"] = region_json(&confirmed);
        }
    });
    assert!(recorded);
    assert_eq!(history.peek_undo_description(), Some("Crop image"));

    assert_eq!(engine.undo(&mut history), Some(RestoreOutcome::Restored));
    assert!(engine.store().get("photo-1").unwrap()["crop"].is_null());
    assert_eq!(engine.store().selected_ids().count(), 0);

    engine.redo(&mut history);
    assert_eq!(
        engine.store().get("photo-1").unwrap()["crop"],
        region_json(&confirmed)
    );
}
