//! Toast stack renderer, drawn top-right above everything but the preview.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

pub fn render_toasts(row: usize, toasts: &[ToastInfo], theme: &Theme, cols: usize) {
    let max_width = (cols / 2).max(20).min(cols);

    for (offset, toast) in toasts.iter().enumerate() {
        let text = format!(" {} {} {} ", toast.level.label(), toast.message, toast.timestamp);
        let text: String = text.chars().take(max_width).collect();
        let width = text_width(&text);

        position_cursor(row + offset, cols.saturating_sub(width) + 1);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(theme.colors.for_level(toast.level)));
        print!("{text}");
        print!("{}", Theme::reset());
    }
}
