//! Composable UI component renderers.
//!
//! Each component draws one part of the screen at an explicit row and
//! returns the next free row where that makes sense.
//!
//! # Components
//!
//! - [`header`]: Title bar with the query and loaded/total count
//! - [`search`]: Search input box
//! - [`status`]: Loading indicator or inline error
//! - [`table`]: Gallery table and the "load more" row
//! - [`empty`]: Message shown when there are no results
//! - [`footer`]: Keybinding hints
//! - [`toasts`]: Notification stack
//! - [`preview`]: Full-size preview overlay

mod empty;
mod footer;
mod header;
mod preview;
mod search;
mod status;
mod table;
mod toasts;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use preview::render_preview;
use search::render_search_bar;
use status::render_status;
use table::{render_load_more, render_table_headers, render_table_rows};
use toasts::render_toasts;

/// Renders a horizontal border line at `row`.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full screen.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Status]
/// [Table Headers]
/// [Table Rows | Empty State]
/// [Load more]
/// [Border]
/// [Footer]
/// ```
///
/// Toasts and the preview overlay are drawn last, on top.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_status(current_row, &vm.status, theme, cols);
    current_row = render_table_headers(current_row, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        current_row = render_table_rows(current_row, &vm.display_items, theme, cols);
        if let Some(label) = &vm.load_more {
            render_load_more(current_row, label, theme, cols);
        }
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);

    render_toasts(2, &vm.toasts, theme, cols);

    if let Some(preview) = &vm.preview {
        render_preview(preview, theme, rows, cols);
    }
}
