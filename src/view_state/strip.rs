//! In-memory scrollable strip.
//!
//! [`RowViewport`] is a headless [`Viewport`]: it owns a row layout, clamps
//! its offset, animates smooth scrolls with a cubic ease-out, and snaps to
//! the nearest child once motion stops. Hosts step it with
//! [`RowViewport::advance`] once per frame; [`pump`] does that and forwards
//! the resulting scroll ticks to a [`Navigator`].

use super::layout::{snap_offset, RowLayout, RESPONSIVE_GAP};
use crate::config::{ResolvedConfig, Snap};
use crate::model::Rect;
use crate::navigator::{Navigator, ScrollBehavior, Viewport};
use std::time::{Duration, Instant};
use tracing::trace;

/// Length of a smooth scroll.
pub const SMOOTH_SCROLL_DURATION: Duration = Duration::from_millis(150);

/// Frame interval hosts should use while an animation is running.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Snap corrections smaller than this are ignored, in px.
pub const SNAP_TOLERANCE: f64 = 0.5;

/// A running smooth scroll. The clock starts on the first `advance`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Animation {
    from: f64,
    to: f64,
    started: Option<Instant>,
}

impl Animation {
    fn new(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            started: None,
        }
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Headless row of children with a scrollable window onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct RowViewport {
    origin: f64,
    width: f64,
    offset: f64,
    widths: Vec<f64>,
    gap: f64,
    responsive: bool,
    layout: RowLayout,
    snap: Option<Snap>,
    animation: Option<Animation>,
    scrolled: bool,
    unsnapped: bool,
}

impl RowViewport {
    /// A viewport `width` px wide over children of the given widths, no gap.
    pub fn new(width: f64, widths: Vec<f64>) -> Self {
        let mut viewport = Self {
            origin: 0.0,
            width: width.max(0.0),
            offset: 0.0,
            widths,
            gap: 0.0,
            responsive: false,
            layout: RowLayout::default(),
            snap: None,
            animation: None,
            scrolled: false,
            unsnapped: false,
        };
        viewport.relayout();
        viewport
    }

    /// A viewport whose `count` children are sized by the default
    /// responsive breakpoints, re-sized on every [`RowViewport::resize`].
    pub fn responsive(width: f64, count: usize) -> Self {
        let mut viewport = Self::new(width, vec![0.0; count]);
        viewport.responsive = true;
        viewport.gap = RESPONSIVE_GAP;
        viewport.relayout();
        viewport
    }

    /// Build the strip a resolved configuration describes, `width` px wide.
    pub fn from_config(config: &ResolvedConfig, width: f64) -> Self {
        let viewport = if config.widget.responsive {
            Self::responsive(width, config.children.len())
        } else {
            Self::new(width, config.children.clone())
        };
        viewport.with_snap(config.widget.snap)
    }

    /// Set the gap between children (ignored in responsive mode).
    pub fn with_gap(mut self, gap: f64) -> Self {
        if !self.responsive {
            self.gap = gap.max(0.0);
            self.relayout();
        }
        self
    }

    /// Place the viewport's left edge at `origin` in the client frame.
    pub fn with_origin(mut self, origin: f64) -> Self {
        self.origin = origin;
        self
    }

    /// Snap to children with the given alignment when motion stops.
    pub fn with_snap(mut self, snap: Snap) -> Self {
        self.snap = Some(snap);
        self
    }

    fn relayout(&mut self) {
        self.layout = if self.responsive {
            RowLayout::responsive(self.widths.len(), self.width)
        } else {
            RowLayout::new(&self.widths, self.gap)
        };
        let clamped = self.clamp(self.offset);
        self.set_offset(clamped);
        let max_left = self.max_left();
        if let Some(animation) = self.animation.as_mut() {
            animation.to = animation.to.clamp(0.0, max_left);
        }
    }

    fn clamp(&self, left: f64) -> f64 {
        if left.is_finite() {
            left.clamp(0.0, self.max_left())
        } else {
            self.offset
        }
    }

    fn set_offset(&mut self, offset: f64) {
        if offset != self.offset {
            self.offset = offset;
            self.scrolled = true;
            self.unsnapped = true;
        }
    }

    /// Largest reachable offset.
    pub fn max_left(&self) -> f64 {
        (self.layout.content_width() - self.width).max(0.0)
    }

    /// Current offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Where the viewport will come to rest if nothing else happens.
    pub fn target(&self) -> f64 {
        self.animation.map(|a| a.to).unwrap_or(self.offset)
    }

    /// Content-relative layout.
    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    /// Visible width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Configured snap alignment.
    pub fn snap(&self) -> Option<Snap> {
        self.snap
    }

    /// Whether a smooth scroll is in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Return and clear the "offset changed" flag.
    ///
    /// Hosts translate a `true` into [`Navigator::on_scroll`].
    pub fn take_scrolled(&mut self) -> bool {
        std::mem::take(&mut self.scrolled)
    }

    /// Change the visible width, re-laying out responsive children.
    pub fn resize(&mut self, width: f64) {
        self.width = width.max(0.0);
        self.relayout();
    }

    /// Replace the children.
    pub fn set_children(&mut self, widths: Vec<f64>) {
        self.widths = widths;
        self.relayout();
    }

    /// Free scroll by `delta` px, immediately (mouse wheel, nudge keys).
    pub fn scroll_by(&mut self, delta: f64) {
        let target = self.target() + delta;
        self.scroll_to(target, ScrollBehavior::Auto);
    }

    /// Step the animation and apply snapping once motion stops.
    ///
    /// Returns `true` if the offset moved.
    pub fn advance(&mut self, now: Instant) -> bool {
        let before = self.offset;

        if let Some(mut animation) = self.animation {
            let started = *animation.started.get_or_insert(now);
            let elapsed = now.saturating_duration_since(started);
            let t = (elapsed.as_secs_f64() / SMOOTH_SCROLL_DURATION.as_secs_f64()).min(1.0);

            if t >= 1.0 {
                self.animation = None;
                self.set_offset(animation.to);
            } else {
                self.animation = Some(animation);
                let eased = animation.from + (animation.to - animation.from) * ease_out_cubic(t);
                self.set_offset(eased);
            }
        }

        if self.animation.is_none() && self.unsnapped {
            self.unsnapped = false;
            self.settle_snap();
        }

        self.offset != before
    }

    /// Start a smooth scroll to the nearest snap position, if any.
    fn settle_snap(&mut self) {
        let Some(snap) = self.snap else {
            return;
        };

        // An item wider than the viewport accepts any offset inside it
        let right = self.offset + self.width;
        if self
            .layout
            .rects()
            .iter()
            .any(|r| r.left <= self.offset && r.right >= right && r.width() > self.width)
        {
            return;
        }

        let target = snap_offset(
            snap,
            self.layout.rects(),
            self.width,
            self.offset,
            self.max_left(),
        );
        if (target - self.offset).abs() > SNAP_TOLERANCE {
            trace!(from = self.offset, to = target, %snap, "Snapping");
            self.animation = Some(Animation::new(self.offset, target));
        }
    }
}

impl Viewport for RowViewport {
    fn scroll_left(&self) -> f64 {
        self.offset
    }

    fn client_width(&self) -> f64 {
        self.width
    }

    fn scroll_width(&self) -> f64 {
        self.layout.content_width().max(self.width)
    }

    fn bounding_rect(&self) -> Rect {
        Rect::from_left_width(self.origin, self.width)
    }

    fn child_count(&self) -> usize {
        self.layout.len()
    }

    fn child_rect(&self, index: usize) -> Option<Rect> {
        self.layout
            .rect(index)
            .map(|r| r.translate(self.origin - self.offset))
    }

    fn scroll_to(&mut self, left: f64, behavior: ScrollBehavior) {
        let target = self.clamp(left);
        match behavior {
            ScrollBehavior::Auto => {
                self.animation = None;
                self.set_offset(target);
            }
            ScrollBehavior::Smooth => {
                if target == self.offset {
                    self.animation = None;
                } else {
                    self.animation = Some(Animation::new(self.offset, target));
                }
            }
        }
    }
}

/// Drive one frame: step the viewport, report scroll ticks, then run the
/// navigator's layout-stable work.
///
/// Returns `true` if the viewport moved.
pub fn pump(navigator: &mut Navigator<RowViewport>, now: Instant) -> bool {
    let scrolled = navigator
        .viewport_mut()
        .map(|viewport| {
            viewport.advance(now);
            viewport.take_scrolled()
        })
        .unwrap_or(false);

    if scrolled {
        navigator.on_scroll(now);
    }
    navigator.tick(now);
    scrolled
}

/// Whether the host should keep drawing frames (animation or pending debounce).
pub fn is_busy(navigator: &Navigator<RowViewport>) -> bool {
    navigator.viewport().is_some_and(RowViewport::is_animating)
        || navigator.next_deadline().is_some()
        || navigator.has_pending_refresh()
}
