//! Configuration module.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, CliOverrides, ConfigError,
    ConfigFile, ResolvedConfig,
};

use crate::navigator::{NavigatorOptions, DEFAULT_DISPLACEMENT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Snap alignment name: start.
pub const SNAP_START: &str = "start";
/// Snap alignment name: center.
pub const SNAP_CENTER: &str = "center";
/// Snap alignment name: end.
pub const SNAP_END: &str = "end";

/// Default quiet period before a settled measurement, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Which edge of a child the strip snaps to when scrolling settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Snap {
    /// Child's left edge aligns with the viewport's left edge.
    #[default]
    Start,
    /// Child's centre aligns with the viewport's centre.
    Center,
    /// Child's right edge aligns with the viewport's right edge.
    End,
}

impl FromStr for Snap {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SNAP_START => Ok(Self::Start),
            SNAP_CENTER => Ok(Self::Center),
            SNAP_END => Ok(Self::End),
            other => Err(ConfigError::InvalidValue {
                field: "snap".to_string(),
                reason: format!("expected start, center or end, got {:?}", other),
            }),
        }
    }
}

impl fmt::Display for Snap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => SNAP_START,
            Self::Center => SNAP_CENTER,
            Self::End => SNAP_END,
        };
        f.write_str(name)
    }
}

/// Widget-level options.
///
/// Mirrors the properties a host sets on the strip. Only `displacement` and
/// `debounce_ms` reach the navigator; the rest drive presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetOptions {
    /// Show prev/next buttons.
    pub button: bool,
    /// Centre buttons on the strip edges instead of insetting them.
    pub button_between: bool,
    /// Show a scrollbar.
    pub scroll: bool,
    /// Size children with the default responsive breakpoints.
    pub responsive: bool,
    /// Fraction of the visible width to travel per page.
    pub displacement: f64,
    /// Snap alignment.
    pub snap: Snap,
    /// Quiet period before a settled measurement, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            button: true,
            button_between: true,
            scroll: false,
            responsive: false,
            displacement: DEFAULT_DISPLACEMENT,
            snap: Snap::Start,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl WidgetOptions {
    /// Navigator tunables derived from these options.
    pub fn navigator_options(&self) -> NavigatorOptions {
        NavigatorOptions {
            displacement: self.displacement,
            quiet_period: Duration::from_millis(self.debounce_ms),
        }
    }
}
