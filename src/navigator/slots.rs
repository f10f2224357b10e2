//! Slot resolution: which child becomes the new leading edge after paging.
//!
//! Both searches walk the children once in index order. Children are assumed
//! to be laid out left-to-right; when they are not, the first match in index
//! order still wins and navigation degrades instead of failing.

use crate::model::Rect;

/// A child element together with its position in the child sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// 0-based position in the viewport's child sequence.
    pub index: usize,
    /// Bounding rect in the client frame at measurement time.
    pub rect: Rect,
}

/// Find the slot to page back to, given a target coordinate `x`.
///
/// Returns the first slot whose span contains `x`, or the first slot that
/// starts at or after `x`, whichever comes first in index order.
pub fn find_prev_slot<I>(x: f64, rects: I) -> Option<Slot>
where
    I: IntoIterator<Item = Rect>,
{
    for (index, rect) in rects.into_iter().enumerate() {
        if rect.contains(x) {
            return Some(Slot { index, rect });
        }

        if x <= rect.left {
            return Some(Slot { index, rect });
        }
    }
    None
}

/// Find the slot to page forward to, given a target coordinate `x`.
///
/// Slots ending at or before `x` are skipped. The first remaining slot that
/// starts at or before `x` (cut by the page boundary) is returned; otherwise
/// the first slot starting at or after `x`.
pub fn find_next_slot<I>(x: f64, rects: I) -> Option<Slot>
where
    I: IntoIterator<Item = Rect>,
{
    for (index, rect) in rects.into_iter().enumerate() {
        if rect.right <= x {
            continue;
        } else if rect.left <= x {
            return Some(Slot { index, rect });
        }

        // Reached for every slot past the boundary on a sorted row; kept as a
        // separate test so unsorted rows keep first-match-in-index-order.
        if x <= rect.left {
            return Some(Slot { index, rect });
        }
    }
    None
}
