//! TUI rendering and terminal management (impure shell)

pub mod strip;

pub use strip::{StripWidget, NEXT_BUTTON, PREV_BUTTON};

use crate::config::keybindings::KeyBindings;
use crate::config::{ResolvedConfig, WidgetOptions};
use crate::model::StripAction;
use crate::navigator::{NavEvent, NavigationState, Navigator};
use crate::view_state::strip::{pump, FRAME_INTERVAL};
use crate::view_state::RowViewport;
use crossterm::{
    event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::cell::Cell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Poll timeout while nothing is moving or pending.
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Columns moved per nudge key press.
const NUDGE_CELLS: f64 = 1.0;

/// Columns moved per mouse wheel notch.
const WHEEL_CELLS: f64 = 3.0;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Split the frame into the strip and a one-line status bar.
fn split(area: Rect) -> (Rect, Rect) {
    let [strip, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
    (strip, status)
}

fn flag(on: bool) -> &'static str {
    if on {
        "yes"
    } else {
        "no"
    }
}

/// Status bar text: live offset, navigability and the last notification.
pub fn status_line(offset: f64, state: &NavigationState, last_event: Option<&str>) -> String {
    format!(
        "offset {:.0}/{:.0}  prev {}  next {}  {}",
        offset,
        state.max_left(),
        flag(state.has_prev),
        flag(state.has_next),
        last_event.unwrap_or("-"),
    )
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    navigator: Navigator<RowViewport>,
    options: WidgetOptions,
    px_per_cell: f64,
    key_bindings: KeyBindings,
    last_event: Rc<Cell<Option<&'static str>>>,
    /// Last rendered strip area (for button click detection)
    last_strip_area: Option<Rect>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(config: &ResolvedConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let terminal = setup_or_restore(
            || {
                let mut stdout = io::stdout();
                stdout.execute(EnterAlternateScreen)?;
                stdout.execute(crossterm::event::EnableMouseCapture)?;
                Terminal::new(CrosstermBackend::new(stdout))
            },
            || {
                if let Err(e) = restore_terminal() {
                    warn!(error = %e, "Failed to restore terminal after setup error");
                }
            },
        )?;

        Ok(Self::with_terminal(terminal, config))
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create an app drawing to `terminal`, sized from its current width.
    pub fn with_terminal(terminal: Terminal<B>, config: &ResolvedConfig) -> Self {
        let width = match terminal.size() {
            Ok(size) if size.width > 0 => size.width,
            _ => 80,
        };
        let viewport = RowViewport::from_config(config, f64::from(width) * config.px_per_cell);
        let mut navigator = Navigator::mounted(viewport, config.widget.navigator_options());

        let last_event = Rc::new(Cell::new(None));
        let sink = Rc::clone(&last_event);
        navigator.subscribe(move |event: &NavEvent| sink.set(Some(event.name())));
        navigator.refresh_now();

        Self {
            terminal,
            navigator,
            options: config.widget.clone(),
            px_per_cell: config.px_per_cell,
            key_bindings: KeyBindings::default(),
            last_event,
            last_strip_area: None,
        }
    }

    /// The navigator driving the strip.
    pub fn navigator(&self) -> &Navigator<RowViewport> {
        &self.navigator
    }

    /// The terminal being drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C)
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let timeout = self.poll_timeout(Instant::now());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, _) => self.handle_resize(width),
                    _ => {}
                }
            }

            self.tick(Instant::now());
            self.draw()?;
        }
    }

    /// Advance animations and run the navigator's layout-stable work.
    pub fn tick(&mut self, now: Instant) {
        pump(&mut self.navigator, now);
    }

    /// How long the event loop may block before the next frame is due.
    ///
    /// Animations poll at frame rate, a pending debounce wakes at its
    /// deadline, otherwise the loop idles.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let animating = self
            .navigator
            .viewport()
            .is_some_and(RowViewport::is_animating);
        if animating {
            return FRAME_INTERVAL;
        }
        if self.navigator.has_pending_refresh() {
            return Duration::ZERO;
        }
        match self.navigator.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now),
            None => IDLE_POLL,
        }
    }

    fn scroll_by_cells(&mut self, cells: f64) {
        let delta = cells * self.px_per_cell;
        if let Some(viewport) = self.navigator.viewport_mut() {
            viewport.scroll_by(delta);
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        if action.is_navigation() {
            debug!(?action, "Navigation key");
        }

        match action {
            StripAction::Prev => self.navigator.prev(),
            StripAction::Next => self.navigator.next(),
            StripAction::JumpTo(index) => self.navigator.scroll_to_index(index),
            StripAction::NudgeLeft => self.scroll_by_cells(-NUDGE_CELLS),
            StripAction::NudgeRight => self.scroll_by_cells(NUDGE_CELLS),
            StripAction::Refresh => self
                .navigator
                .refresh(|state| debug!(?state, "Refreshed on request")),
            StripAction::Quit => return true,
        }
        false
    }

    /// Handle a single mouse event
    ///
    /// Wheel scrolls freely; a left click on a visible button pages.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
                self.scroll_by_cells(-WHEEL_CELLS)
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
                self.scroll_by_cells(WHEEL_CELLS)
            }
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(mouse.column, mouse.row),
            _ => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        if !self.options.button {
            return;
        }
        let Some(area) = self.last_strip_area else {
            return;
        };
        let content = strip::content_area(area, &self.options);
        if row != strip::label_row(content) || column < content.x {
            return;
        }

        let (prev_col, next_col) =
            strip::button_columns(content.width, self.options.button_between);
        let state = self.navigator.state();
        let column = column - content.x;
        if column == prev_col && state.has_prev {
            self.navigator.prev();
        } else if column == next_col && state.has_next {
            self.navigator.next();
        }
    }

    /// Handle a terminal resize event
    ///
    /// Resizes the strip and queues a re-measurement for the next frame.
    pub fn handle_resize(&mut self, width: u16) {
        let width = if width > 0 { width } else { 80 };
        debug!(width, "Handling resize");
        let px = f64::from(width) * self.px_per_cell;
        if let Some(viewport) = self.navigator.viewport_mut() {
            viewport.resize(px);
        }
        self.navigator
            .refresh(|state| debug!(?state, "Refreshed after resize"));
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let (strip_area, _) = split(Rect::new(0, 0, size.width, size.height));
        self.last_strip_area = Some(strip_area);

        let navigator = &self.navigator;
        let options = &self.options;
        let px_per_cell = self.px_per_cell;
        let last_event = self.last_event.get();

        self.terminal.draw(|frame| {
            let (strip_area, status_area) = split(frame.area());
            let state = navigator.state();
            if let Some(viewport) = navigator.viewport() {
                frame.render_widget(
                    StripWidget::new(viewport, state, options, px_per_cell),
                    strip_area,
                );
                let status = status_line(viewport.offset(), &state, last_event);
                frame.render_widget(Paragraph::new(status), status_area);
            }
        })?;

        Ok(())
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
/// Logging must be initialized by the caller.
pub fn run(config: &ResolvedConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(config)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Run the terminal setup steps, calling `restore` if any of them fails.
///
/// Raw mode is already on by then, so a failed setup must not leave it behind.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> Result<T, TuiError> {
    setup().map_err(|e| {
        restore();
        TuiError::from(e)
    })
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
