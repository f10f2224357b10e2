//! Tests for row layout and snap resolution.

use super::*;

fn uniform(count: usize, width: f64) -> Vec<Rect> {
    RowLayout::new(&vec![width; count], 0.0).rects().to_vec()
}

// ===== Responsive breakpoints =====

#[test]
fn responsive_columns_follow_breakpoints() {
    assert_eq!(responsive_columns(320.0), 1);
    assert_eq!(responsive_columns(639.0), 1);
    assert_eq!(responsive_columns(640.0), 2);
    assert_eq!(responsive_columns(767.0), 2);
    assert_eq!(responsive_columns(768.0), 3);
    assert_eq!(responsive_columns(1023.0), 3);
    assert_eq!(responsive_columns(1024.0), 4);
    assert_eq!(responsive_columns(1280.0), 5);
    assert_eq!(responsive_columns(4000.0), 5);
}

#[test]
fn responsive_item_width_fills_container_with_gutters() {
    assert_eq!(responsive_item_width(300.0), 300.0);
    assert_eq!(responsive_item_width(640.0), 308.0);
    assert_eq!(responsive_item_width(768.0), 240.0);
    assert!((responsive_item_width(1280.0) - 236.8).abs() < 1e-9);
}

#[test]
fn responsive_item_width_never_negative() {
    assert_eq!(responsive_item_width(0.0), 0.0);
}

// ===== RowLayout =====

#[test]
fn row_layout_places_children_with_gap() {
    let layout = RowLayout::new(&[100.0, 200.0, 50.0], 10.0);

    assert_eq!(
        layout.rects(),
        &[
            Rect::new(0.0, 100.0),
            Rect::new(110.0, 310.0),
            Rect::new(320.0, 370.0),
        ]
    );
    assert_eq!(layout.content_width(), 370.0);
    assert_eq!(layout.len(), 3);
}

#[test]
fn row_layout_empty_has_zero_content_width() {
    let layout = RowLayout::new(&[], 24.0);
    assert!(layout.is_empty());
    assert_eq!(layout.content_width(), 0.0);
    assert_eq!(layout.rect(0), None);
}

#[test]
fn responsive_row_fills_container_exactly() {
    let layout = RowLayout::responsive(3, 768.0);
    assert_eq!(layout.rect(0), Some(Rect::new(0.0, 240.0)));
    assert_eq!(layout.rect(1), Some(Rect::new(264.0, 504.0)));
    assert_eq!(layout.rect(2), Some(Rect::new(528.0, 768.0)));
    assert_eq!(layout.content_width(), 768.0);
}

#[test]
fn row_layout_clamps_negative_widths() {
    let layout = RowLayout::new(&[-10.0, 50.0], -5.0);
    assert_eq!(layout.rects(), &[Rect::new(0.0, 0.0), Rect::new(0.0, 50.0)]);
}

// ===== Snap =====

#[test]
fn snap_start_picks_nearest_left_edge() {
    let rects = uniform(5, 100.0);
    assert_eq!(snap_offset(Snap::Start, &rects, 300.0, 140.0, 200.0), 100.0);
    assert_eq!(snap_offset(Snap::Start, &rects, 300.0, 160.0, 200.0), 200.0);
}

#[test]
fn snap_center_aligns_item_centre_with_viewport_centre() {
    let rects = uniform(5, 100.0);
    assert_eq!(snap_position(Snap::Center, rects[2], 300.0), 100.0);
    assert_eq!(snap_offset(Snap::Center, &rects, 300.0, 60.0, 200.0), 100.0);
}

#[test]
fn snap_end_aligns_item_right_with_viewport_right() {
    let rects = uniform(5, 100.0);
    assert_eq!(snap_position(Snap::End, rects[3], 300.0), 100.0);
    assert_eq!(snap_offset(Snap::End, &rects, 300.0, 40.0, 200.0), 0.0);
}

#[test]
fn snap_without_children_only_clamps() {
    assert_eq!(snap_offset(Snap::Start, &[], 300.0, 500.0, 200.0), 200.0);
    assert_eq!(snap_offset(Snap::Start, &[], 300.0, -5.0, 200.0), 0.0);
}
