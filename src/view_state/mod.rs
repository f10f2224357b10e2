//! View-state layer: child layout and the headless scrollable strip.
//!
//! # Module Structure
//!
//! - `layout`: RowLayout, responsive breakpoints, snap resolution
//! - `strip`: RowViewport - in-memory `Viewport` with smooth scroll and snapping

pub mod layout;
pub mod strip;

pub use layout::{responsive_columns, responsive_item_width, snap_offset, RowLayout};
pub use strip::{is_busy, pump, RowViewport};
