//! Gallery table renderer.
//!
//! One row per loaded image with `#`, `TAGS`, `SIZE` and `AUTHOR` columns.
//! Query matches inside the tags are highlighted, the selected row is drawn
//! with the selection colours, and the "load more" row follows the last
//! result when another page exists.

use crate::ui::helpers::{self, fit, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    tags_column_width, DisplayItem, AUTHOR_COLUMN_WIDTH, COLUMN_GAP, POSITION_COLUMN_WIDTH, SIZE_COLUMN_WIDTH,
};

/// Renders the column headings at `row`.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let gap = " ".repeat(COLUMN_GAP);
    let line = format!(
        "  {:>pos$}{gap}{}{gap}{}{gap}{}",
        "#",
        fit("TAGS", tags_column_width(cols)),
        fit("SIZE", SIZE_COLUMN_WIDTH),
        fit("AUTHOR", AUTHOR_COLUMN_WIDTH),
        pos = POSITION_COLUMN_WIDTH,
    );

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", fit(&line, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders `items` one per row starting at `row`, returning the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Query highlights (unless selected)
/// 3. Normal text color
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let tags_width = tags_column_width(cols);
    let gap = " ".repeat(COLUMN_GAP);

    position_cursor(row, 1);

    let base_fg = if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };
    print!("{}", Theme::fg(base_fg));

    let marker = if item.is_selected { "▸ " } else { "  " };
    print!("{marker}{:>pos$}{gap}", item.position, pos = POSITION_COLUMN_WIDTH);

    helpers::render_highlighted_text(&item.tags, &item.highlight_ranges, theme, item.is_selected, base_fg);
    print!("{}", " ".repeat(tags_width.saturating_sub(text_width(&item.tags))));

    print!("{gap}{}{gap}{}", fit(&item.size, SIZE_COLUMN_WIDTH), fit(&item.author, AUTHOR_COLUMN_WIDTH));

    let line_len = 2 + POSITION_COLUMN_WIDTH + tags_width + SIZE_COLUMN_WIDTH + AUTHOR_COLUMN_WIDTH + 3 * COLUMN_GAP;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders the "load more" row.
pub fn render_load_more(row: usize, label: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.loading_fg));
    print!("{}", fit(&format!("  ↓ {label}  [m]"), cols));
    print!("{}", Theme::reset());
    row + 1
}
