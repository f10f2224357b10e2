//! Error types for the hscroll binary.
//!
//! The navigator itself never fails: unmounted viewports, unresolved slots
//! and out-of-range indices are silent no-ops or deterministic fallbacks.
//! Errors only exist around it, in the shell that loads configuration,
//! installs logging, parses scripts and drives the terminal.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary's run function
//!   - [`ConfigError`] - Config file unreadable, malformed, or out of range
//!   - [`LoggingError`] - Log directory or subscriber setup failed
//!   - [`ScriptError`] - Headless `--script` argument could not be parsed
//!   - [`TuiError`] - Terminal I/O failure
//!   - `serde_json::Error` - Event serialization failure in headless mode

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::script::ScriptError;
use crate::view::TuiError;
use thiserror::Error;

/// Top-level application error encompassing all failure modes of the binary.
///
/// All variants are fatal: the binary reports them on stderr and exits.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The headless script was rejected.
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Tui(#[from] TuiError),

    /// A notification could not be written as JSON.
    #[error("Failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
}
