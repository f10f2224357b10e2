//! Row layout for strip children.
//!
//! Children sit left-to-right in one row separated by a fixed gap. Rects are
//! content-relative: offset 0 is the left edge of the first child.

use crate::config::Snap;
use crate::model::Rect;

/// Gutter between responsive items, in px.
pub const RESPONSIVE_GAP: f64 = 24.0;

/// Default responsive breakpoints as `(min container width, columns)`,
/// widest first. Narrower containers show one column.
pub const BREAKPOINTS: [(f64, usize); 4] = [(1280.0, 5), (1024.0, 4), (768.0, 3), (640.0, 2)];

/// Number of fully visible columns for a container width.
pub fn responsive_columns(container_width: f64) -> usize {
    BREAKPOINTS
        .iter()
        .find(|(min_width, _)| container_width >= *min_width)
        .map(|(_, columns)| *columns)
        .unwrap_or(1)
}

/// Width of one responsive item so that [`responsive_columns`] items plus
/// their gutters fill the container exactly.
pub fn responsive_item_width(container_width: f64) -> f64 {
    let columns = responsive_columns(container_width) as f64;
    ((container_width - RESPONSIVE_GAP * (columns - 1.0)) / columns).max(0.0)
}

/// Content-relative rects for a row of children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowLayout {
    rects: Vec<Rect>,
    content_width: f64,
}

impl RowLayout {
    /// Lay out `widths` left-to-right with `gap` px between neighbours.
    ///
    /// Negative widths and gaps are treated as zero.
    pub fn new(widths: &[f64], gap: f64) -> Self {
        let gap = gap.max(0.0);
        let mut rects = Vec::with_capacity(widths.len());
        let mut left = 0.0;

        for &width in widths {
            let rect = Rect::from_left_width(left, width.max(0.0));
            left = rect.right + gap;
            rects.push(rect);
        }

        let content_width = rects.last().map(|r| r.right).unwrap_or(0.0);
        Self {
            rects,
            content_width,
        }
    }

    /// Lay out `count` equally sized children using the default breakpoints.
    pub fn responsive(count: usize, container_width: f64) -> Self {
        let width = responsive_item_width(container_width);
        Self::new(&vec![width; count], RESPONSIVE_GAP)
    }

    /// All child rects in index order.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Rect of the child at `index`.
    pub fn rect(&self, index: usize) -> Option<Rect> {
        self.rects.get(index).copied()
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// True when there are no children.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Right edge of the last child.
    pub fn content_width(&self) -> f64 {
        self.content_width
    }
}

/// Offset at which `rect` is aligned per `snap` in a viewport `viewport_width` wide.
pub fn snap_position(snap: Snap, rect: Rect, viewport_width: f64) -> f64 {
    match snap {
        Snap::Start => rect.left,
        Snap::Center => rect.center() - viewport_width / 2.0,
        Snap::End => rect.right - viewport_width,
    }
}

/// Nearest snap position to `offset`, clamped to `[0, max]`.
///
/// Ties go to the lower index. With no children the clamped offset is
/// returned unchanged.
pub fn snap_offset(snap: Snap, rects: &[Rect], viewport_width: f64, offset: f64, max: f64) -> f64 {
    let max = max.max(0.0);
    let mut best = offset.clamp(0.0, max);
    let mut best_distance = f64::INFINITY;

    for rect in rects {
        let candidate = snap_position(snap, *rect, viewport_width).clamp(0.0, max);
        let distance = (candidate - offset).abs();
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }

    best
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
