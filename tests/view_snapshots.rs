//! Snapshot tests for the strip widget and the full TUI frame
//!
//! Uses insta + ratatui TestBackend to verify rendering output doesn't regress.
//! Every scenario renders at 10 px per cell, so a 100 px child spans ten
//! columns.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hscroll::config::{ResolvedConfig, WidgetOptions};
use hscroll::navigator::{Navigator, NavigatorOptions, ScrollBehavior, Viewport};
use hscroll::view::{StripWidget, TuiApp};
use hscroll::view_state::RowViewport;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::{Duration, Instant};

// ===== Test Helpers =====

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Empty trailing lines are removed to keep snapshots clean.
fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Create a test terminal with the given dimensions.
fn create_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).unwrap()
}

/// Render five 100 px children in a 300 px strip scrolled to `left`.
fn render_strip(left: f64, options: &WidgetOptions, width: u16, height: u16) -> String {
    let mut viewport = RowViewport::new(300.0, vec![100.0; 5]);
    viewport.scroll_to(left, ScrollBehavior::Auto);
    let mut navigator = Navigator::mounted(viewport, NavigatorOptions::default());
    let state = navigator.refresh_now().unwrap();
    let viewport = navigator.viewport().unwrap();

    let mut terminal = create_terminal(width, height);
    terminal
        .draw(|frame| {
            frame.render_widget(
                StripWidget::new(viewport, state, options, 10.0),
                frame.area(),
            );
        })
        .unwrap();

    buffer_to_string(terminal.backend().buffer())
}

fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        children: vec![100.0; 5],
        px_per_cell: 10.0,
        ..ResolvedConfig::default()
    }
}

// ===== Strip Widget =====

#[test]
fn snapshot_strip_at_start() {
    let output = render_strip(0.0, &WidgetOptions::default(), 30, 5);

    insta::assert_snapshot!(output, @r"
    ┌────────┐┌────────┐┌────────┐
    │        ││        ││        │
    │   0    ││   1    ││   2    ›
    │        ││        ││        │
    └────────┘└────────┘└────────┘
    ");
}

#[test]
fn snapshot_strip_at_end() {
    let output = render_strip(200.0, &WidgetOptions::default(), 30, 5);

    insta::assert_snapshot!(output, @r"
    ┌────────┐┌────────┐┌────────┐
    │        ││        ││        │
    ‹   2    ││   3    ││   4    │
    │        ││        ││        │
    └────────┘└────────┘└────────┘
    ");
}

#[test]
fn snapshot_strip_mid_scroll_with_scrollbar_and_inset_buttons() {
    let options = WidgetOptions {
        scroll: true,
        button_between: false,
        ..WidgetOptions::default()
    };
    let output = render_strip(50.0, &options, 30, 5);

    insta::assert_snapshot!(output, @r"
    ────┐┌────────┐┌────────┐┌────
        ││        ││        ││
     ‹  ││   1    ││   2    ││  ›3
    ────┘└────────┘└────────┘└────
    ───━━━━━━━━━━━━━━━━━━─────────
    ");
}

// ===== Full Frame =====

#[test]
fn snapshot_app_initial_frame() {
    let mut app = TuiApp::with_terminal(create_terminal(30, 6), &test_config());
    app.draw().unwrap();

    insta::assert_snapshot!(buffer_to_string(app.terminal().backend().buffer()), @r"
    ┌────────┐┌────────┐┌────────┐
    │        ││        ││        │
    │   0    ││   1    ││   2    ›
    │        ││        ││        │
    └────────┘└────────┘└────────┘
    offset 0/200  prev no  next ye
    ");
}

#[test]
fn snapshot_app_after_paging_forward() {
    let mut app = TuiApp::with_terminal(create_terminal(30, 6), &test_config());
    app.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE));

    let start = Instant::now();
    for frame in 0..40 {
        app.tick(start + Duration::from_millis(16 * frame));
    }
    app.draw().unwrap();

    insta::assert_snapshot!(buffer_to_string(app.terminal().backend().buffer()), @r"
    ┌────────┐┌────────┐┌────────┐
    │        ││        ││        │
    ‹   2    ││   3    ││   4    │
    │        ││        ││        │
    └────────┘└────────┘└────────┘
    offset 200/200  prev yes  next
    ");
}
