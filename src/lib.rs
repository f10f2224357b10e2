//! hscroll - slot-aware horizontal scroll navigation
//!
//! The [`navigator`] module is the host-agnostic core: it measures a
//! [`navigator::Viewport`], decides whether paging back or forward is
//! possible, aligns `prev`/`next`/`scroll_to_index` to child boundaries and
//! debounces scroll-driven re-measurement.
//!
//! Everything else is a collaborator around it: [`view_state`] provides an
//! in-memory row viewport, [`view`] hosts it in a terminal, [`script`]
//! replays commands headlessly, and [`config`]/[`logging`] are the binary's
//! ambient plumbing.

pub mod config;
pub mod logging;
pub mod model;
pub mod navigator;
pub mod script;
pub mod view;
pub mod view_state;
