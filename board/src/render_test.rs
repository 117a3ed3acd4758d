#![allow(clippy::float_cmp)]

use super::*;
use crate::geometry::{Boundary, HalfSize};

fn core() -> EngineCore {
    EngineCore::with_geometry(Boundary::new(300.0, 300.0, 250.0), HalfSize::square(25.0))
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// project
// =============================================================

#[test]
fn project_empty_board_is_empty() {
    assert!(project(&core()).is_empty());
}

#[test]
fn project_anchor_is_center_minus_half_size() {
    let mut core = core();
    core.on_drop_new("a.mp4", pt(125.0, 125.0));
    let views = project(&core);
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].anchor, pt(75.0, 75.0));
    assert_eq!((views[0].width, views[0].height), (50.0, 50.0));
    assert_eq!(views[0].scale, 1.0);
    assert_eq!(views[0].z_index, BASE_Z_INDEX);
}

#[test]
fn project_wide_mode_uses_wide_extent() {
    let mut core = EngineCore::with_geometry(Boundary::default(), HalfSize::new(50.0, 25.0));
    core.on_drop_new("a.mp4", pt(350.0, 325.0));
    let view = &project(&core)[0];
    assert_eq!(view.anchor, pt(250.0, 275.0));
    assert_eq!((view.width, view.height), (100.0, 50.0));
}

#[test]
fn project_enlarged_clip_is_scaled_raised_and_keeps_anchor() {
    let mut core = core();
    core.on_drop_new("a.mp4", pt(125.0, 125.0));
    core.on_drop_new("b.mp4", pt(225.0, 225.0));
    core.on_toggle_enlarge("a.mp4");

    let views = project(&core);
    let ids: Vec<&str> = views.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["b.mp4", "a.mp4"]);
    assert_eq!(views[1].scale, ENLARGED_SCALE);
    assert_eq!(views[1].z_index, ENLARGED_Z_INDEX);
    assert_eq!(views[1].anchor, pt(75.0, 75.0));
}

#[test]
fn project_restores_baseline_after_second_toggle() {
    let mut core = core();
    core.on_drop_new("a.mp4", pt(125.0, 125.0));
    core.on_toggle_enlarge("a.mp4");
    core.on_toggle_enlarge("a.mp4");
    let view = &project(&core)[0];
    assert_eq!(view.scale, 1.0);
    assert_eq!(view.z_index, BASE_Z_INDEX);
}

#[test]
fn project_keeps_insertion_order_within_a_layer() {
    let mut core = core();
    for id in ["c.mp4", "a.mp4", "b.mp4"] {
        core.on_drop_new(id, pt(300.0, 300.0));
    }
    let ids: Vec<String> = project(&core).into_iter().map(|v| v.id).collect();
    assert_eq!(ids, vec!["c.mp4", "a.mp4", "b.mp4"]);
}

#[test]
fn project_flags_out_of_bounds_selected_and_dragging() {
    let mut core = core();
    core.on_drop_new("in.mp4", pt(325.0, 325.0));
    core.on_drop_new("out.mp4", pt(25.0, 25.0));
    core.select("in.mp4");
    core.on_drag_start("out.mp4");

    let views = project(&core);
    let inside = views.iter().find(|v| v.id == "in.mp4").unwrap();
    let outside = views.iter().find(|v| v.id == "out.mp4").unwrap();
    assert!(inside.in_bounds && inside.selected && !inside.dragging);
    assert!(!outside.in_bounds && !outside.selected && outside.dragging);
}

#[test]
fn project_tracks_drag_moves_immediately() {
    let mut core = core();
    core.on_drop_new("a.mp4", pt(325.0, 325.0));
    core.on_drag_start("a.mp4");
    core.on_drag_move("a.mp4", pt(425.0, 325.0));
    assert_eq!(project(&core)[0].anchor, pt(375.0, 275.0));
}

// =============================================================
// surface / coordinates / frame
// =============================================================

#[test]
fn surface_matches_default_board() {
    let core = EngineCore::new();
    let surface = surface(&core);
    assert_eq!(surface.side, 600.0);
    assert_eq!(surface.center, pt(300.0, 300.0));
    assert_eq!(surface.radius, 250.0);
}

#[test]
fn coordinate_rows_list_centers_in_order() {
    let mut core = core();
    core.on_drop_new("a.mp4", pt(125.0, 125.0));
    core.on_drop_new("b.mp4", pt(35.0, 45.0));
    let rows = coordinate_rows(&core);
    assert_eq!(
        rows,
        vec![
            CoordinateRow { id: "a.mp4".into(), x: 100.0, y: 100.0 },
            CoordinateRow { id: "b.mp4".into(), x: 10.0, y: 20.0 },
        ]
    );
}

#[test]
fn frame_reports_diagnostic_and_save_gate() {
    let mut core = core();
    core.set_label("Where?");
    core.on_drop_new("a.mp4", pt(325.0, 325.0));
    let ok = frame(&core);
    assert!(ok.can_save_final);
    assert_eq!(ok.label, "Where?");
    assert_eq!(ok.diagnostic, "All clips are inside the circle.");

    core.on_drop_new("b.mp4", pt(25.0, 25.0));
    let blocked = frame(&core);
    assert!(!blocked.can_save_final);
    assert_eq!(blocked.diagnostic, "1 clip is outside the circle: b.mp4");
    assert_eq!(blocked.items.len(), 2);
    assert_eq!(blocked.coordinates.len(), 2);
}

#[test]
fn frame_mid_drag_agrees_with_save_gate() {
    let mut core = core();
    core.on_drop_new("a.mp4", pt(325.0, 325.0));
    core.on_drag_start("a.mp4");
    core.on_drag_move("a.mp4", pt(925.0, 325.0));
    assert!(core.validation().is_valid());

    let mid = frame(&core);
    assert!(!mid.can_save_final);
    assert_eq!(mid.diagnostic, "1 clip is outside the circle: a.mp4");
    assert!(!mid.items[0].in_bounds);
}
