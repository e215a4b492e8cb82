//! Shared rendering utilities.
//!
//! Widths and ranges here are in chars, not bytes, so tags with accented or
//! non-Latin characters stay aligned and never split a code point.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text`, counted in chars.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Left-aligns `text` in `width` columns, cutting it if longer.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let mut fitted: String = text.chars().take(width).collect();
    let used = text_width(&fitted);
    fitted.push_str(&" ".repeat(width.saturating_sub(used)));
    fitted
}

/// Prints `text` with the given char ranges in the match highlight colours.
///
/// Selected rows are printed plain so the selection background wins. After
/// each highlighted run the row's base colour (`base_fg`) is restored.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool, base_fg: &str) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(base_fg));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Splits `text` into lines of at most `width` chars. URLs have no spaces,
/// so this cuts hard instead of at word boundaries.
#[must_use]
pub fn wrap_hard(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_and_cuts_by_chars() {
        assert_eq!(fit("cat", 5), "cat  ");
        assert_eq!(fit("kätzchen", 4), "kätz");
    }

    #[test]
    fn wrap_hard_splits_long_urls() {
        let lines = wrap_hard("https://cdn.example/abcdef", 10);
        assert_eq!(lines, vec!["https://cd", "n.example/", "abcdef"]);
        assert_eq!(wrap_hard("", 10), vec![String::new()]);
    }
}
