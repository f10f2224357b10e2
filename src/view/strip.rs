//! Strip widget: the visible slice of the row plus prev/next buttons.

use crate::config::WidgetOptions;
use crate::navigator::{NavigationState, Viewport};
use crate::view_state::RowViewport;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

/// Previous-page button glyph.
pub const PREV_BUTTON: &str = "‹";
/// Next-page button glyph.
pub const NEXT_BUTTON: &str = "›";

const THUMB: &str = "━";
const TRACK: &str = "─";

fn button_style() -> Style {
    Style::new().add_modifier(Modifier::BOLD | Modifier::REVERSED)
}

/// Convert a px distance to whole terminal columns.
fn px_to_col(px: f64, px_per_cell: f64) -> i64 {
    (px / px_per_cell).round() as i64
}

/// Columns of the prev and next buttons within a strip `width` cells wide.
///
/// `between` puts them on the outermost columns, otherwise they are inset
/// by one cell.
pub fn button_columns(width: u16, between: bool) -> (u16, u16) {
    let last = width.saturating_sub(1);
    if between {
        (0, last)
    } else {
        (1.min(last), width.saturating_sub(2))
    }
}

/// Row carrying labels and buttons.
pub fn label_row(area: Rect) -> u16 {
    area.y + area.height / 2
}

/// Area left for children once the scrollbar row (if any) is taken.
pub fn content_area(area: Rect, options: &WidgetOptions) -> Rect {
    if options.scroll && area.height >= 2 {
        Rect {
            height: area.height - 1,
            ..area
        }
    } else {
        area
    }
}

/// Renders one [`RowViewport`] into a terminal area.
///
/// Children are boxed when at least three rows are available and labelled
/// with their index. Buttons reflect the navigator's last measured state.
#[derive(Debug, Clone, Copy)]
pub struct StripWidget<'a> {
    viewport: &'a RowViewport,
    state: NavigationState,
    options: &'a WidgetOptions,
    px_per_cell: f64,
}

impl<'a> StripWidget<'a> {
    /// Create a widget over `viewport`, `px_per_cell` px wide per column.
    pub fn new(
        viewport: &'a RowViewport,
        state: NavigationState,
        options: &'a WidgetOptions,
        px_per_cell: f64,
    ) -> Self {
        Self {
            viewport,
            state,
            options,
            px_per_cell,
        }
    }

    fn render_children(&self, area: Rect, buf: &mut Buffer) {
        let offset = self.viewport.offset();
        let width = i64::from(area.width);
        let boxed = area.height >= 3;
        let bottom = area.bottom() - 1;
        let label_y = label_row(area);

        let mut put = |col: i64, y: u16, symbol: &str| {
            if (0..width).contains(&col) {
                buf[(area.x + col as u16, y)].set_symbol(symbol);
            }
        };

        for (index, rect) in self.viewport.layout().rects().iter().enumerate() {
            let left = px_to_col(rect.left - offset, self.px_per_cell);
            let right = px_to_col(rect.right - offset, self.px_per_cell);
            if right <= 0 || left >= width || right <= left {
                continue;
            }

            if boxed {
                for col in left.max(0)..right.min(width) {
                    let (top, base) = if col == left {
                        ("┌", "└")
                    } else if col == right - 1 {
                        ("┐", "┘")
                    } else {
                        ("─", "─")
                    };
                    put(col, area.y, top);
                    put(col, bottom, base);
                }
                for y in area.y + 1..bottom {
                    put(left, y, "│");
                    if right - 1 > left {
                        put(right - 1, y, "│");
                    }
                }
            }

            let (inner_left, inner_right) = if boxed && right - left > 2 {
                (left + 1, right - 1)
            } else {
                (left, right)
            };
            let label = index.to_string();
            let label_width = label.width() as i64;
            if inner_right - inner_left < label_width {
                continue;
            }
            let start = inner_left + (inner_right - inner_left - label_width) / 2;
            for (i, ch) in label.chars().enumerate() {
                put(start + i as i64, label_y, ch.encode_utf8(&mut [0; 4]));
            }
        }
    }

    fn render_buttons(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 {
            return;
        }
        let (prev_col, next_col) = button_columns(area.width, self.options.button_between);
        let y = label_row(area);

        if self.state.has_prev {
            buf[(area.x + prev_col, y)]
                .set_symbol(PREV_BUTTON)
                .set_style(button_style());
        }
        if self.state.has_next {
            buf[(area.x + next_col, y)]
                .set_symbol(NEXT_BUTTON)
                .set_style(button_style());
        }
    }

    fn render_scrollbar(&self, area: Rect, buf: &mut Buffer) {
        let track = f64::from(area.width);
        let scroll_width = self.viewport.scroll_width();
        if scroll_width <= 0.0 {
            return;
        }

        let thumb_len = (self.viewport.client_width() / scroll_width * track)
            .round()
            .clamp(1.0, track);
        let thumb_start = (self.viewport.offset() / scroll_width * track)
            .round()
            .min(track - thumb_len);
        let thumb = thumb_start..thumb_start + thumb_len;

        for col in 0..area.width {
            let symbol = if thumb.contains(&f64::from(col)) {
                THUMB
            } else {
                TRACK
            };
            buf[(area.x + col, area.y)].set_symbol(symbol);
        }
    }
}

impl Widget for StripWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.px_per_cell <= 0.0 {
            return;
        }

        let content = content_area(area, self.options);
        self.render_children(content, buf);
        if self.options.button {
            self.render_buttons(content, buf);
        }
        if content.height < area.height {
            let bar = Rect {
                y: area.bottom() - 1,
                height: 1,
                ..area
            };
            self.render_scrollbar(bar, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::{Navigator, NavigatorOptions, ScrollBehavior};

    fn render(viewport: RowViewport, options: &WidgetOptions, width: u16, height: u16) -> Buffer {
        let mut navigator = Navigator::mounted(viewport, NavigatorOptions::default());
        let state = navigator.refresh_now().unwrap();
        let viewport = navigator.viewport().unwrap();

        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        StripWidget::new(viewport, state, options, 10.0).render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn button_columns_between_and_inset() {
        assert_eq!(button_columns(30, true), (0, 29));
        assert_eq!(button_columns(30, false), (1, 28));
        assert_eq!(button_columns(1, false), (0, 0));
    }

    #[test]
    fn content_area_reserves_scrollbar_row() {
        let options = WidgetOptions {
            scroll: true,
            ..WidgetOptions::default()
        };
        let area = Rect::new(0, 0, 30, 5);
        assert_eq!(content_area(area, &options).height, 4);
        assert_eq!(content_area(area, &WidgetOptions::default()).height, 5);
    }

    #[test]
    fn buttons_hidden_when_disabled() {
        let options = WidgetOptions {
            button: false,
            ..WidgetOptions::default()
        };
        let buf = render(RowViewport::new(300.0, vec![100.0; 5]), &options, 30, 5);
        assert!(!row(&buf, 2).contains(NEXT_BUTTON));
    }

    #[test]
    fn next_button_only_at_start() {
        let buf = render(
            RowViewport::new(300.0, vec![100.0; 5]),
            &WidgetOptions::default(),
            30,
            5,
        );
        let middle = row(&buf, 2);
        assert!(middle.ends_with(NEXT_BUTTON));
        assert!(!middle.contains(PREV_BUTTON));
        assert_eq!(buf[(29, 2)].style().add_modifier, Modifier::BOLD | Modifier::REVERSED);
    }

    #[test]
    fn prev_button_only_at_end() {
        let mut viewport = RowViewport::new(300.0, vec![100.0; 5]);
        viewport.scroll_to(200.0, ScrollBehavior::Auto);
        let buf = render(viewport, &WidgetOptions::default(), 30, 5);
        let middle = row(&buf, 2);
        assert!(middle.starts_with(PREV_BUTTON));
        assert!(!middle.contains(NEXT_BUTTON));
        assert!(middle.contains('4'));
    }

    #[test]
    fn short_strip_draws_labels_without_boxes() {
        let options = WidgetOptions {
            button: false,
            ..WidgetOptions::default()
        };
        let buf = render(RowViewport::new(300.0, vec![100.0; 5]), &options, 30, 1);
        assert_eq!(row(&buf, 0), "    0         1         2     ");
    }

    #[test]
    fn zero_sized_area_is_a_noop() {
        let viewport = RowViewport::new(300.0, vec![100.0; 5]);
        let options = WidgetOptions::default();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        StripWidget::new(&viewport, NavigationState::default(), &options, 10.0)
            .render(area, &mut buf);
    }
}
