//! Configuration file loading with precedence handling.

use super::{Snap, WidgetOptions};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "HSCROLL_CONFIG";
/// Environment variable overriding `displacement`.
pub const ENV_DISPLACEMENT: &str = "HSCROLL_DISPLACEMENT";
/// Environment variable overriding `snap`.
pub const ENV_SNAP: &str = "HSCROLL_SNAP";

/// Default number of children when none are configured.
pub const DEFAULT_CHILD_COUNT: usize = 12;
/// Default child width in px when none are configured.
pub const DEFAULT_CHILD_WIDTH: f64 = 160.0;
/// Default horizontal px represented by one terminal cell.
pub const DEFAULT_PX_PER_CELL: f64 = 8.0;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is outside its valid range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending field name.
        field: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/hscroll/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Show prev/next buttons.
    #[serde(default)]
    pub button: Option<bool>,

    /// Centre buttons on the strip edges.
    #[serde(default)]
    pub button_between: Option<bool>,

    /// Show a scrollbar.
    #[serde(default)]
    pub scroll: Option<bool>,

    /// Use the default responsive breakpoints.
    #[serde(default)]
    pub responsive: Option<bool>,

    /// Page-travel fraction of the visible width.
    #[serde(default)]
    pub displacement: Option<f64>,

    /// Snap alignment.
    #[serde(default)]
    pub snap: Option<Snap>,

    /// Quiet period before a settled measurement, in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Child widths in px.
    #[serde(default)]
    pub children: Option<Vec<f64>>,

    /// Horizontal px represented by one terminal cell.
    #[serde(default)]
    pub px_per_cell: Option<f64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Widget options.
    pub widget: WidgetOptions,
    /// Child widths in px.
    pub children: Vec<f64>,
    /// Horizontal px represented by one terminal cell.
    pub px_per_cell: f64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            widget: WidgetOptions::default(),
            children: vec![DEFAULT_CHILD_WIDTH; DEFAULT_CHILD_COUNT],
            px_per_cell: DEFAULT_PX_PER_CELL,
            log_file_path: default_log_path(),
        }
    }
}

/// CLI argument overrides. `None` means the flag was not given.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliOverrides {
    /// From `--displacement`.
    pub displacement: Option<f64>,
    /// From `--snap`.
    pub snap: Option<Snap>,
    /// From `--responsive`.
    pub responsive: Option<bool>,
    /// From `--no-button`.
    pub button: Option<bool>,
    /// From `--scroll`.
    pub scroll: Option<bool>,
    /// From `--children` or `--count`.
    pub children: Option<Vec<f64>>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/hscroll/hscroll.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("hscroll").join("hscroll.log")
    } else {
        PathBuf::from("hscroll.log")
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Reject values that parse as TOML but cannot be used.
fn validate(config: &ConfigFile) -> Result<(), ConfigError> {
    if let Some(displacement) = config.displacement {
        if !(displacement.is_finite() && displacement > 0.0) {
            return Err(invalid(
                "displacement",
                format!("must be a positive number, got {}", displacement),
            ));
        }
    }

    if let Some(px_per_cell) = config.px_per_cell {
        if !(px_per_cell.is_finite() && px_per_cell > 0.0) {
            return Err(invalid(
                "px_per_cell",
                format!("must be a positive number, got {}", px_per_cell),
            ));
        }
    }

    if let Some(children) = &config.children {
        if let Some(width) = children.iter().find(|w| !(w.is_finite() && **w > 0.0)) {
            return Err(invalid(
                "children",
                format!("widths must be positive, got {}", width),
            ));
        }
    }

    Ok(())
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read, parsed, or validated.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    validate(&config)?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/hscroll/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hscroll").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `HSCROLL_CONFIG` environment variable
/// 3. Default path `~/.config/hscroll/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{} is empty", ENV_CONFIG)));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let widget = WidgetOptions {
        button: config.button.unwrap_or(defaults.widget.button),
        button_between: config
            .button_between
            .unwrap_or(defaults.widget.button_between),
        scroll: config.scroll.unwrap_or(defaults.widget.scroll),
        responsive: config.responsive.unwrap_or(defaults.widget.responsive),
        displacement: config.displacement.unwrap_or(defaults.widget.displacement),
        snap: config.snap.unwrap_or(defaults.widget.snap),
        debounce_ms: config.debounce_ms.unwrap_or(defaults.widget.debounce_ms),
    };

    ResolvedConfig {
        widget,
        children: config.children.unwrap_or(defaults.children),
        px_per_cell: config.px_per_cell.unwrap_or(defaults.px_per_cell),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `HSCROLL_DISPLACEMENT`: Override displacement (positive number)
/// - `HSCROLL_SNAP`: Override snap alignment
///
/// Unparseable values are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(ENV_DISPLACEMENT) {
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => config.widget.displacement = value,
            _ => warn!(value = %raw, "Ignoring invalid {}", ENV_DISPLACEMENT),
        }
    }

    if let Ok(raw) = std::env::var(ENV_SNAP) {
        match raw.parse::<Snap>() {
            Ok(snap) => config.widget.snap = snap,
            Err(e) => warn!(error = %e, "Ignoring invalid {}", ENV_SNAP),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(displacement) = overrides.displacement {
        config.widget.displacement = displacement;
    }

    if let Some(snap) = overrides.snap {
        config.widget.snap = snap;
    }

    if let Some(responsive) = overrides.responsive {
        config.widget.responsive = responsive;
    }

    if let Some(button) = overrides.button {
        config.widget.button = button;
    }

    if let Some(scroll) = overrides.scroll {
        config.widget.scroll = scroll;
    }

    if let Some(children) = overrides.children {
        config.children = children;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
