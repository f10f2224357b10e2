//! Horizontal geometry primitives.
//!
//! All coordinates are pixels as `f64`. A [`Rect`] only carries the horizontal
//! span of an element; the navigator never looks at vertical extents.

use serde::Serialize;

/// Horizontal span of an element, in the host's client coordinate frame.
///
/// The viewport's own bounding rect and every child rect must be reported in
/// the same frame, so differences between them are scroll-relative distances.
///
/// # Invariants
/// - `left <= right` for rects produced by this crate. Hosts may report
///   degenerate rects; the navigator tolerates them without panicking.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Left edge in px.
    pub left: f64,
    /// Right edge in px.
    pub right: f64,
}

impl Rect {
    /// Create a rect from its two edges.
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Create a rect from a left edge and a width.
    pub fn from_left_width(left: f64, width: f64) -> Self {
        Self {
            left,
            right: left + width,
        }
    }

    /// Width of the span (`right - left`).
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Horizontal centre of the span.
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Whether `x` lies within the span, edges inclusive.
    pub fn contains(&self, x: f64) -> bool {
        self.left <= x && x <= self.right
    }

    /// Shift both edges by `dx`.
    pub fn translate(&self, dx: f64) -> Self {
        Self {
            left: self.left + dx,
            right: self.right + dx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_left_width_sets_right_edge() {
        let rect = Rect::from_left_width(100.0, 50.0);
        assert_eq!(rect, Rect::new(100.0, 150.0));
        assert_eq!(rect.width(), 50.0);
    }

    #[test]
    fn contains_is_inclusive_on_both_edges() {
        let rect = Rect::new(10.0, 20.0);
        assert!(rect.contains(10.0));
        assert!(rect.contains(20.0));
        assert!(rect.contains(15.0));
        assert!(!rect.contains(9.99));
        assert!(!rect.contains(20.01));
    }

    #[test]
    fn translate_moves_both_edges() {
        let rect = Rect::new(0.0, 100.0).translate(-250.0);
        assert_eq!(rect, Rect::new(-250.0, -150.0));
    }

    #[test]
    fn center_is_midpoint() {
        assert_eq!(Rect::new(100.0, 200.0).center(), 150.0);
    }
}
