//! Status line under the search bar: loading indicator or inline error.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

pub fn render_status(row: usize, status: &StatusLine, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    match status {
        StatusLine::Idle => print!("{}", " ".repeat(cols)),
        StatusLine::Loading(message) => {
            print!("{}", Theme::fg(&theme.colors.loading_fg));
            print!("{}", fit(&format!("  ⠋ {message}..."), cols));
        }
        StatusLine::Error(message) => {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.error_fg));
            print!("{}", fit(&format!("  ✗ {message}"), cols));
        }
    }
    print!("{}", Theme::reset());
    row + 1
}
