//! Domain model types (pure).
//!
//! All types in this module are plain data shared by the navigator, the
//! presentation collaborators and the binary.

pub mod error;
pub mod geometry;
pub mod key_action;

// Re-export for convenience
pub use error::AppError;
pub use geometry::Rect;
pub use key_action::StripAction;
