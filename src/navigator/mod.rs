//! Horizontal scroll navigator.
//!
//! Owns one scrollable [`Viewport`] and keeps a [`NavigationState`] in sync
//! with it. The navigator measures the viewport and its children, decides
//! whether paging back or forward is possible, computes slot-aligned offsets
//! for `prev`/`next`/`scroll_to_index`, and debounces scroll-driven
//! re-measurement.
//!
//! # Event flow
//!
//! ```text
//! host scroll tick ──► on_scroll(now) ──► Scroll { left } (sync)
//!                                    └──► debounce re-armed
//! host frame ──► tick(now) ──► debounce due? ──► measure ──► ScrollDebounce(state)
//!                          └──► deferred refresh callbacks
//! prev()/next()/scroll_to_index() ──► slot resolution ──► Viewport::scroll_to
//! ```
//!
//! Everything runs on the host's single event loop. Nothing here blocks,
//! spawns, or fails: a missing viewport turns every operation into a no-op.

pub mod debounce;
pub mod slots;

pub use debounce::{Debounce, DEFAULT_QUIET_PERIOD};
pub use slots::{find_next_slot, find_prev_slot, Slot};

use crate::model::Rect;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Tolerance in px absorbing sub-pixel rendering jitter.
pub const EPSILON: f64 = 2.5;

/// Default page-travel fraction of the visible width.
pub const DEFAULT_DISPLACEMENT: f64 = 1.0;

/// Motion mode for a scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Animated scroll.
    #[default]
    Smooth,
    /// Immediate jump.
    Auto,
}

/// A measurable, scrollable row of children provided by the host.
///
/// All rects are reported in one shared client frame: the viewport's
/// `bounding_rect` and each `child_rect` move relative to each other as the
/// content scrolls.
pub trait Viewport {
    /// Current scroll offset in px (>= 0).
    fn scroll_left(&self) -> f64;

    /// Visible width in px (> 0).
    fn client_width(&self) -> f64;

    /// Total scrollable content width in px (>= client width).
    fn scroll_width(&self) -> f64;

    /// The viewport's own bounding rect.
    fn bounding_rect(&self) -> Rect;

    /// Number of children.
    fn child_count(&self) -> usize;

    /// Bounding rect of the child at `index`, if it exists.
    fn child_rect(&self, index: usize) -> Option<Rect>;

    /// Request a scroll to an absolute offset.
    ///
    /// Implementations clamp `left` to their scrollable range.
    fn scroll_to(&mut self, left: f64, behavior: ScrollBehavior);
}

/// Snapshot of one measurement pass.
///
/// # Invariants
/// - `has_next` iff `scroll_width > left + width + EPSILON`
/// - `has_prev` iff `left != 0` and the first child's left edge is at least
///   `EPSILON` away from the viewport's left edge
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    /// Scroll offset in px.
    pub left: f64,
    /// Visible width in px.
    pub width: f64,
    /// Total scrollable width in px.
    pub scroll_width: f64,
    /// Whether paging back is possible.
    pub has_prev: bool,
    /// Whether paging forward is possible.
    pub has_next: bool,
}

impl NavigationState {
    /// Largest reachable scroll offset.
    pub fn max_left(&self) -> f64 {
        (self.scroll_width - self.width).max(0.0)
    }
}

/// Notification emitted to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum NavEvent {
    /// `prev()` was requested.
    Prev,
    /// `next()` was requested.
    Next,
    /// Raw scroll tick, carrying only the current offset.
    Scroll {
        /// Scroll offset at the tick.
        left: f64,
    },
    /// Scrolling settled; full measurement after the quiet period.
    ScrollDebounce(NavigationState),
}

impl NavEvent {
    /// Wire name of the event, as used in the serialized `event` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Scroll { .. } => "scroll",
            Self::ScrollDebounce(_) => "scroll-debounce",
        }
    }
}

/// Tunables for a [`Navigator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigatorOptions {
    /// Fraction of the visible width to travel per page. Must be finite and > 0.
    pub displacement: f64,
    /// Quiet period before a settled measurement.
    pub quiet_period: Duration,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            displacement: DEFAULT_DISPLACEMENT,
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }
}

type Listener = Box<dyn FnMut(&NavEvent)>;
type RefreshCallback = Box<dyn FnOnce(&NavigationState)>;

/// Measurement queued for the next layout-stable point.
enum PendingRefresh {
    /// Host-requested refresh with a callback.
    Callback(RefreshCallback),
    /// Debounce fired; emit `ScrollDebounce`.
    Settled,
}

/// Slot-aware horizontal scroll navigator.
///
/// Generic over the host's [`Viewport`]. The viewport is mounted and
/// unmounted explicitly; between those calls the navigator owns it.
pub struct Navigator<V> {
    viewport: Option<V>,
    displacement: f64,
    state: NavigationState,
    debounce: Debounce,
    pending: VecDeque<PendingRefresh>,
    listeners: Vec<Listener>,
}

impl<V> fmt::Debug for Navigator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("mounted", &self.viewport.is_some())
            .field("displacement", &self.displacement)
            .field("state", &self.state)
            .field("debounce", &self.debounce)
            .field("pending_refreshes", &self.pending.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Clamp a caller-supplied displacement to something the navigator can page with.
fn sanitize_displacement(displacement: f64) -> f64 {
    if displacement.is_finite() && displacement > 0.0 {
        displacement
    } else {
        warn!(
            displacement,
            fallback = DEFAULT_DISPLACEMENT,
            "Displacement must be finite and positive, using default"
        );
        DEFAULT_DISPLACEMENT
    }
}

/// Child rects in index order, stopping at the first missing child.
fn slot_rects<V: Viewport>(viewport: &V) -> impl Iterator<Item = Rect> + '_ {
    (0..viewport.child_count()).map_while(move |i| viewport.child_rect(i))
}

/// Full measurement pass over a viewport.
fn measure<V: Viewport>(viewport: &V) -> NavigationState {
    let left = viewport.scroll_left();
    let width = viewport.client_width();
    let scroll_width = viewport.scroll_width();

    let has_next = scroll_width > left + width + EPSILON;
    let has_prev = if left == 0.0 {
        false
    } else {
        let viewport_left = viewport.bounding_rect().left;
        let first_child_left = viewport.child_rect(0).map(|r| r.left).unwrap_or(0.0);
        (viewport_left - first_child_left).abs() >= EPSILON
    };

    NavigationState {
        left,
        width,
        scroll_width,
        has_prev,
        has_next,
    }
}

impl<V: Viewport> Navigator<V> {
    /// Create an unmounted navigator.
    pub fn new(options: NavigatorOptions) -> Self {
        Self {
            viewport: None,
            displacement: sanitize_displacement(options.displacement),
            state: NavigationState::default(),
            debounce: Debounce::new(options.quiet_period),
            pending: VecDeque::new(),
            listeners: Vec::new(),
        }
    }

    /// Create a navigator already mounted on `viewport`.
    pub fn mounted(viewport: V, options: NavigatorOptions) -> Self {
        let mut navigator = Self::new(options);
        navigator.mount(viewport);
        navigator
    }

    // ===== Lifecycle =====

    /// Attach a viewport, returning the previously mounted one.
    ///
    /// Does not measure; call [`Navigator::refresh_now`] for an initial state.
    pub fn mount(&mut self, viewport: V) -> Option<V> {
        debug!("Mounting viewport");
        self.viewport.replace(viewport)
    }

    /// Detach the viewport.
    ///
    /// Cancels the pending debounce timer and discards queued refreshes, so
    /// no notification fires after teardown.
    pub fn unmount(&mut self) -> Option<V> {
        let cancelled = self.debounce.cancel();
        let dropped = self.pending.len();
        self.pending.clear();
        debug!(cancelled, dropped, "Unmounting viewport");
        self.viewport.take()
    }

    /// Whether a viewport is attached.
    pub fn is_mounted(&self) -> bool {
        self.viewport.is_some()
    }

    /// The attached viewport.
    pub fn viewport(&self) -> Option<&V> {
        self.viewport.as_ref()
    }

    /// The attached viewport, mutably (for host-side resizing and animation).
    pub fn viewport_mut(&mut self) -> Option<&mut V> {
        self.viewport.as_mut()
    }

    // ===== State and notifications =====

    /// Register a notification listener.
    ///
    /// Listeners run synchronously, in registration order, for every event.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&NavEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// State from the most recent measurement pass.
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Effective page-travel fraction.
    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    /// Pending debounce deadline, for host poll timeouts.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Whether a refresh is queued for the next [`Navigator::tick`].
    pub fn has_pending_refresh(&self) -> bool {
        !self.pending.is_empty()
    }

    fn emit(&mut self, event: &NavEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    // ===== Measurement =====

    /// Measure the viewport without storing the result.
    pub fn measure(&self) -> Option<NavigationState> {
        self.viewport.as_ref().map(measure)
    }

    /// Measure immediately and store the result.
    ///
    /// Returns `None` (and keeps the previous state) when unmounted.
    pub fn refresh_now(&mut self) -> Option<NavigationState> {
        let state = self.measure()?;
        self.state = state;
        Some(state)
    }

    /// Queue a measurement for the next layout-stable point.
    ///
    /// The measurement runs on the next [`Navigator::tick`], bypassing the
    /// debounce; `callback` receives the state after it has been stored.
    pub fn refresh<F>(&mut self, callback: F)
    where
        F: FnOnce(&NavigationState) + 'static,
    {
        self.pending
            .push_back(PendingRefresh::Callback(Box::new(callback)));
    }

    /// Raw scroll notification from the host.
    ///
    /// Emits [`NavEvent::Scroll`] immediately and re-arms the debounce timer.
    /// No-op when unmounted.
    pub fn on_scroll(&mut self, now: Instant) {
        let Some(viewport) = self.viewport.as_ref() else {
            return;
        };
        let left = viewport.scroll_left();
        trace!(left, "Scroll tick");
        self.emit(&NavEvent::Scroll { left });
        self.debounce.arm(now);
    }

    /// Layout-stable point: fire a due debounce and run queued refreshes.
    ///
    /// Hosts call this after layout each frame. Each queued refresh measures
    /// the geometry at run time, not at queue time.
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.fire_if_due(now) {
            self.pending.push_back(PendingRefresh::Settled);
        }

        while let Some(pending) = self.pending.pop_front() {
            let Some(state) = self.refresh_now() else {
                self.pending.clear();
                return;
            };
            match pending {
                PendingRefresh::Callback(callback) => callback(&state),
                PendingRefresh::Settled => {
                    debug!(?state, "Scroll settled");
                    self.emit(&NavEvent::ScrollDebounce(state));
                }
            }
        }
    }

    // ===== Navigation =====

    /// Page back to the previous set of children.
    ///
    /// Aligns the left edge of the slot one page back with the viewport's
    /// left edge. Falls back to scrolling back one page when no slot offers
    /// a boundary.
    pub fn prev(&mut self) {
        self.emit(&NavEvent::Prev);
        let displacement = self.displacement;
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };

        let origin = viewport.bounding_rect().left;
        let scroll_left = viewport.scroll_left();
        let page = viewport.client_width() * displacement;
        let x = origin - page - EPSILON;

        // A slot spanning the current left edge is the one already in view,
        // and a slot at or past it would not move the viewport back.
        let candidate = find_prev_slot(x, slot_rects(&*viewport)).filter(|slot| {
            let spans_edge =
                slot.rect.left < origin - EPSILON && slot.rect.right > origin + EPSILON;
            let travel = slot.rect.left - origin;
            !spans_edge && travel < -EPSILON
        });

        let target = match candidate {
            Some(slot) => {
                debug!(index = slot.index, x, "Paging back to slot");
                scroll_left + (slot.rect.left - origin)
            }
            None => {
                debug!(x, page, "No slot to page back to, scrolling one page");
                scroll_left - page
            }
        };
        viewport.scroll_to(target, ScrollBehavior::Smooth);
    }

    /// Page forward to the next set of children.
    ///
    /// Aligns the first slot cut by (or starting after) the page boundary
    /// with the viewport's left edge. Falls back to scrolling forward one page
    /// when that slot would not move the viewport forward.
    pub fn next(&mut self) {
        self.emit(&NavEvent::Next);
        let displacement = self.displacement;
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };

        let origin = viewport.bounding_rect().left;
        let scroll_left = viewport.scroll_left();
        let page = viewport.client_width() * displacement;
        let x = origin + page + EPSILON;

        let travel = find_next_slot(x, slot_rects(&*viewport))
            .map(|slot| (slot.index, slot.rect.left - origin))
            .filter(|&(_, travel)| travel > EPSILON);

        let target = match travel {
            Some((index, travel)) => {
                debug!(index, x, travel, "Paging forward to slot");
                scroll_left + travel
            }
            None => {
                debug!(x, page, "No slot to page forward to, scrolling one page");
                scroll_left + page
            }
        };
        viewport.scroll_to(target, ScrollBehavior::Smooth);
    }

    /// Scroll so the child at `index` becomes the leading edge.
    ///
    /// Silently ignored when `index` is out of range or unmounted.
    pub fn scroll_to_index(&mut self, index: usize) {
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };
        let Some(rect) = viewport.child_rect(index) else {
            debug!(index, "Index out of range, ignoring");
            return;
        };
        let origin = viewport.bounding_rect().left;
        let target = viewport.scroll_left() + (rect.left - origin);
        viewport.scroll_to(target, ScrollBehavior::Smooth);
    }

    /// Scroll to an absolute offset with the given motion.
    pub fn scroll_to(&mut self, left: f64, behavior: ScrollBehavior) {
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.scroll_to(left, behavior);
        }
    }

    /// Scroll to an absolute offset with the default (smooth) motion.
    pub fn scroll_to_left(&mut self, left: f64) {
        self.scroll_to(left, ScrollBehavior::default());
    }
}

impl<V> Drop for Navigator<V> {
    fn drop(&mut self) {
        // Teardown: nothing may fire once the owner is gone.
        self.debounce.cancel();
        self.pending.clear();
    }
}

#[cfg(test)]
#[path = "navigator_tests.rs"]
mod tests;
