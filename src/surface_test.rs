#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Enums
// =============================================================

#[test]
fn line_cap_strings_match_canvas_names() {
    assert_eq!(LineCap::Butt.as_str(), "butt");
    assert_eq!(LineCap::Round.as_str(), "round");
    assert_eq!(LineCap::Square.as_str(), "square");
}

#[test]
fn line_join_strings_match_canvas_names() {
    assert_eq!(LineJoin::Round.as_str(), "round");
    assert_eq!(LineJoin::Bevel.as_str(), "bevel");
    assert_eq!(LineJoin::Miter.as_str(), "miter");
}

#[test]
fn draw_state_defaults_match_canvas() {
    let state = DrawState::default();
    assert_eq!(state.line_width, 1.0);
    assert_eq!(state.stroke_color, "#000000");
    assert_eq!(state.line_cap, LineCap::Butt);
    assert_eq!(state.line_join, LineJoin::Miter);
}

// =============================================================
// Path and stroke modelling
// =============================================================

#[test]
fn new_surface_is_blank() {
    let surface = RecordingSurface::new(100.0, 60.0);
    assert!(surface.is_blank());
    assert_eq!(surface.size(), (100.0, 60.0));
}

#[test]
fn path_is_invisible_until_stroked() {
    let mut surface = RecordingSurface::new(100.0, 60.0);
    surface.begin_path();
    surface.move_to(pt(0.0, 0.0));
    surface.line_to(pt(10.0, 10.0));
    assert!(surface.is_blank());

    surface.stroke();
    assert_eq!(surface.ink().len(), 1);
}

#[test]
fn stroke_uses_current_style() {
    let mut surface = RecordingSurface::new(100.0, 60.0);
    surface.set_line_width(25.0);
    surface.set_stroke_color("blue");
    surface.begin_path();
    surface.move_to(pt(1.0, 2.0));
    surface.line_to(pt(3.0, 4.0));
    surface.stroke();

    let ink = surface.ink();
    assert_eq!(ink[0], InkSegment { from: pt(1.0, 2.0), to: pt(3.0, 4.0), width: 25.0, color: "blue".into() });
}

#[test]
fn move_then_line_to_same_point_is_a_dot() {
    let mut surface = RecordingSurface::new(100.0, 60.0);
    surface.begin_path();
    surface.move_to(pt(5.0, 5.0));
    surface.line_to(pt(5.0, 5.0));
    surface.stroke();
    let ink = surface.ink();
    assert_eq!(ink.len(), 1);
    assert_eq!(ink[0].from, ink[0].to);
}

#[test]
fn line_to_without_current_point_acts_as_move_to() {
    let mut surface = RecordingSurface::new(100.0, 60.0);
    surface.begin_path();
    surface.line_to(pt(5.0, 5.0));
    surface.line_to(pt(6.0, 6.0));
    surface.stroke();
    assert_eq!(surface.ink().len(), 1);
    assert_eq!(surface.ink()[0].from, pt(5.0, 5.0));
}

#[test]
fn restroking_an_open_path_collapses_in_ink() {
    let mut surface = RecordingSurface::new(100.0, 60.0);
    surface.begin_path();
    surface.move_to(pt(0.0, 0.0));
    surface.line_to(pt(1.0, 1.0));
    surface.stroke();
    surface.line_to(pt(2.0, 2.0));
    surface.stroke();
    assert_eq!(surface.strokes().len(), 3);
    assert_eq!(surface.ink().len(), 2);
}

#[test]
fn long_path_restroked_each_step_keeps_first_occurrence_order() {
    let mut surface = RecordingSurface::new(1000.0, 60.0);
    surface.begin_path();
    surface.move_to(pt(0.0, 0.0));
    for i in 1..=500 {
        surface.line_to(pt(f64::from(i), 0.0));
        surface.stroke();
    }
    // Every stroke repaints the whole path: 500 * 501 / 2 painted segments.
    assert_eq!(surface.strokes().len(), 125_250);
    let ink = surface.ink();
    assert_eq!(ink.len(), 500);
    assert!(ink.iter().enumerate().all(|(i, seg)| seg.from.x == i as f64 && seg.to.x == (i + 1) as f64));
}

#[test]
fn negative_zero_collapses_with_zero_in_ink() {
    let mut surface = RecordingSurface::new(100.0, 60.0);
    for start in [0.0, -0.0] {
        surface.begin_path();
        surface.move_to(pt(start, 1.0));
        surface.line_to(pt(5.0, 1.0));
        surface.stroke();
    }
    assert_eq!(surface.strokes().len(), 2);
    assert_eq!(surface.ink().len(), 1);
}

#[test]
fn begin_path_discards_unstroked_segments() {
    let mut surface = RecordingSurface::new(100.0, 60.0);
    surface.begin_path();
    surface.move_to(pt(0.0, 0.0));
    surface.line_to(pt(1.0, 1.0));
    surface.begin_path();
    surface.stroke();
    assert!(surface.is_blank());
}

// =============================================================
// Clear / fill
// =============================================================

#[test]
fn full_clear_removes_all_ink() {
    let mut surface = RecordingSurface::new(100.0, 60.0);
    surface.fill_rect(0.0, 0.0, 100.0, 60.0);
    surface.begin_path();
    surface.move_to(pt(0.0, 0.0));
    surface.line_to(pt(100.0, 60.0));
    surface.stroke();
    surface.clear();
    assert!(surface.is_blank());
    assert_eq!(surface.commands().last(), Some(&Command::ClearRect { x: 0.0, y: 0.0, width: 100.0, height: 60.0 }));
}

#[test]
fn partial_clear_keeps_ink_outside() {
    let mut surface = RecordingSurface::new(100.0, 60.0);
    surface.begin_path();
    surface.move_to(pt(1.0, 1.0));
    surface.line_to(pt(2.0, 2.0));
    surface.move_to(pt(80.0, 50.0));
    surface.line_to(pt(90.0, 55.0));
    surface.stroke();
    surface.clear_rect(0.0, 0.0, 10.0, 10.0);
    assert_eq!(surface.ink().len(), 1);
    assert_eq!(surface.ink()[0].from, pt(80.0, 50.0));
}

#[test]
fn fill_uses_fill_color() {
    let mut surface = RecordingSurface::new(100.0, 60.0);
    surface.set_fill_color("#ffffff");
    surface.fill_rect(0.0, 0.0, 100.0, 60.0);
    assert_eq!(surface.fills()[0].color, "#ffffff");
}

// =============================================================
// Save / restore
// =============================================================

#[test]
fn restore_returns_saved_state() {
    let mut surface = RecordingSurface::new(100.0, 60.0);
    surface.set_line_width(10.0);
    surface.set_stroke_color("red");
    surface.save();
    surface.set_line_width(0.5);
    surface.set_stroke_color("#ccc");
    surface.set_line_cap(LineCap::Square);
    surface.restore();
    assert_eq!(surface.state().line_width, 10.0);
    assert_eq!(surface.state().stroke_color, "red");
    assert_eq!(surface.state().line_cap, LineCap::Butt);
}

#[test]
fn unbalanced_restore_is_a_no_op() {
    let mut surface = RecordingSurface::new(100.0, 60.0);
    surface.set_line_width(3.0);
    surface.restore();
    assert_eq!(surface.state().line_width, 3.0);
}

// =============================================================
// Export
// =============================================================

#[test]
fn export_is_a_data_uri_of_visible_ink() {
    let mut surface = RecordingSurface::new(100.0, 60.0);
    surface.begin_path();
    surface.move_to(pt(0.0, 0.0));
    surface.line_to(pt(10.0, 10.0));
    surface.stroke();

    let url = surface.to_data_url().unwrap();
    let json = url.strip_prefix("data:application/json,").unwrap();
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(value["width"], 100.0);
    assert_eq!(value["strokes"].as_array().unwrap().len(), 1);
}

#[test]
fn export_of_zero_area_surface_fails() {
    let surface = RecordingSurface::new(0.0, 60.0);
    assert_eq!(surface.to_data_url(), Err(SurfaceError::EmptySurface));
}

#[test]
fn take_commands_drains_log() {
    let mut surface = RecordingSurface::new(10.0, 10.0);
    surface.begin_path();
    assert_eq!(surface.take_commands(), vec![Command::BeginPath]);
    assert!(surface.commands().is_empty());
}
