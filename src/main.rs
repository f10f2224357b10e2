//! hscroll - Entry Point

use clap::Parser;
use hscroll::config::loader::DEFAULT_CHILD_WIDTH;
use hscroll::config::{CliOverrides, ResolvedConfig, Snap};
use hscroll::logging::LogTarget;
use hscroll::model::AppError;
use hscroll::script::{parse_script, run_script};
use hscroll::view_state::RowViewport;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Viewport width for headless runs when `--viewport-width` is not given.
const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;

/// Parse a finite, strictly positive number.
fn positive_f64(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        Ok(value) => Err(format!("must be a positive number, got {}", value)),
        Err(e) => Err(e.to_string()),
    }
}

/// hscroll - slot-aware horizontal scroll strip in the terminal
#[derive(Parser, Debug)]
#[command(name = "hscroll")]
#[command(version)]
#[command(about = "Horizontal scroll strip with prev/next paging, snapping and debounced state")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Child widths in px, comma separated
    #[arg(long, value_delimiter = ',', value_parser = positive_f64, conflicts_with = "count")]
    pub children: Option<Vec<f64>>,

    /// Number of equally sized children
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: Option<u32>,

    /// Fraction of the visible width to travel per page
    #[arg(long, value_parser = positive_f64)]
    pub displacement: Option<f64>,

    /// Snap alignment: start, center or end
    #[arg(long)]
    pub snap: Option<Snap>,

    /// Size children with the default responsive breakpoints
    #[arg(long)]
    pub responsive: bool,

    /// Hide the prev/next buttons
    #[arg(long)]
    pub no_button: bool,

    /// Show a scrollbar
    #[arg(long)]
    pub scroll: bool,

    /// Viewport width in px for --script runs
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH, value_parser = positive_f64)]
    pub viewport_width: f64,

    /// Run headless: replay comma-separated commands
    /// (next, prev, index:N, refresh, scroll:PX, wait:MS) and print events as JSON lines
    #[arg(long)]
    pub script: Option<String>,
}

impl Args {
    /// Overrides for flags that were explicitly given.
    fn cli_overrides(&self) -> CliOverrides {
        let children = self.children.clone().or_else(|| {
            self.count
                .map(|count| vec![DEFAULT_CHILD_WIDTH; count as usize])
        });

        CliOverrides {
            displacement: self.displacement,
            snap: self.snap,
            responsive: self.responsive.then_some(true),
            button: self.no_button.then_some(false),
            scroll: self.scroll.then_some(true),
            children,
        }
    }
}

/// Load configuration with the full precedence chain:
/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    // 1. Load config file (or None if missing)
    let config_file = hscroll::config::load_config_with_precedence(args.config.clone())?;

    // 2. Merge with defaults
    let merged = hscroll::config::merge_config(config_file);

    // 3. Apply environment variable overrides
    let with_env = hscroll::config::apply_env_overrides(merged);

    // 4. Apply CLI argument overrides
    Ok(hscroll::config::apply_cli_overrides(
        with_env,
        args.cli_overrides(),
    ))
}

/// Replay a script and print every event as one JSON line.
fn run_headless(config: &ResolvedConfig, script: &str, width: f64) -> Result<(), AppError> {
    let commands = parse_script(script)?;
    info!(commands = commands.len(), width, "Running headless script");

    let viewport = RowViewport::from_config(config, width);
    let events = run_script(
        viewport,
        config.widget.navigator_options(),
        &commands,
        Instant::now(),
    );

    for event in &events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;

    // stdout carries JSON in headless mode; the TUI owns the terminal otherwise
    let target = match args.script {
        Some(_) => LogTarget::Stderr,
        None => LogTarget::File(config.log_file_path.clone()),
    };
    hscroll::logging::init(&target)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    match &args.script {
        Some(script) => run_headless(&config, script, args.viewport_width),
        None => Ok(hscroll::view::run(&config)?),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}
