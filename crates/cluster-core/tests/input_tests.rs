// Host-side tests for pointer/scroll normalization and the sample cells the
// event handlers publish into.

use cluster_core::*;
use glam::Vec2;

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

#[test]
fn pointer_maps_viewport_corners_and_centre() {
    assert_eq!(normalize_pointer(Vec2::new(640.0, 360.0), VIEWPORT), Vec2::ZERO);
    assert_eq!(normalize_pointer(Vec2::ZERO, VIEWPORT), Vec2::new(-1.0, 1.0));
    assert_eq!(normalize_pointer(VIEWPORT, VIEWPORT), Vec2::new(1.0, -1.0));
    let q = normalize_pointer(Vec2::new(960.0, 180.0), VIEWPORT);
    assert!((q.x - 0.5).abs() < 1e-6 && (q.y - 0.5).abs() < 1e-6);
}

#[test]
fn pointer_outside_viewport_is_clamped() {
    let p = normalize_pointer(Vec2::new(-200.0, 2000.0), VIEWPORT);
    assert_eq!(p, Vec2::new(-1.0, -1.0));
}

#[test]
fn degenerate_viewport_or_pointer_maps_to_centre() {
    assert_eq!(normalize_pointer(Vec2::new(10.0, 10.0), Vec2::ZERO), Vec2::ZERO);
    assert_eq!(
        normalize_pointer(Vec2::new(10.0, 10.0), Vec2::new(f32::NAN, 100.0)),
        Vec2::ZERO
    );
    assert_eq!(normalize_pointer(Vec2::new(f32::NAN, 1.0), VIEWPORT), Vec2::ZERO);
}

#[test]
fn scroll_is_never_negative() {
    assert_eq!(normalize_scroll(0.0), 0.0);
    assert_eq!(normalize_scroll(-35.0), 0.0);
    assert_eq!(normalize_scroll(f64::NAN), 0.0);
    assert_eq!(normalize_scroll(f64::INFINITY), 0.0);
    assert_eq!(normalize_scroll(1234.5), 1234.5);
}

#[test]
fn sample_cell_latest_write_wins_across_clones() {
    let cell = SampleCell::new(0.0_f32);
    let writer = cell.clone();
    writer.publish(1.0);
    writer.publish(2.0);
    writer.publish(3.0);
    assert_eq!(cell.latest(), 3.0);
    // Reading does not consume.
    assert_eq!(cell.latest(), 3.0);
}

#[test]
fn input_cells_snapshot_reads_both_inputs() {
    let cells = InputCells::new();
    assert_eq!(cells.snapshot(), FrameInput::default());

    let handler_view = cells.clone();
    handler_view.pointer.publish(Vec2::new(0.25, -0.75));
    handler_view.scroll.publish(480.0);

    let input = cells.snapshot();
    assert_eq!(input.pointer, Vec2::new(0.25, -0.75));
    assert_eq!(input.scroll_offset, 480.0);
}

#[test]
fn normalized_samples_are_accepted_by_a_scene() {
    let mut vis = Visualization::mount(&FieldPreset::DataTransformation.scene_config(), 3).unwrap();
    let cells = InputCells::new();
    cells
        .pointer
        .publish(normalize_pointer(Vec2::new(5000.0, -5000.0), VIEWPORT));
    cells.scroll.publish(normalize_scroll(-80.0));
    assert!(vis.step(cells.snapshot()).is_ok());
}
