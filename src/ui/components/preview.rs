//! Preview overlay renderer.
//!
//! Draws a framed box over the middle of the pane with the full-size image
//! URL and, when the image is one of the loaded results, its metadata. The
//! terminal cannot show the picture itself, so the URL is the payload: it is
//! wrapped in full rather than truncated.

use crate::ui::helpers::{fit, position_cursor, text_width, wrap_hard};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PreviewInfo;

const MAX_OVERLAY_WIDTH: usize = 96;
const OVERLAY_MARGIN: usize = 4;

pub fn render_preview(preview: &PreviewInfo, theme: &Theme, rows: usize, cols: usize) {
    let width = cols.saturating_sub(OVERLAY_MARGIN * 2).min(MAX_OVERLAY_WIDTH);
    if width < 8 || rows < 6 {
        return;
    }
    let inner = width - 4;

    let mut lines: Vec<(String, bool)> = vec![];
    lines.push(("Full-size image".to_string(), true));
    lines.extend(wrap_hard(&preview.image_url, inner).into_iter().map(|line| (line, false)));
    if let Some(details) = &preview.details {
        lines.push((String::new(), false));
        for (label, value) in [
            ("Tags", &details.tags),
            ("Size", &details.size),
            ("Author", &details.author),
            ("Stats", &details.stats),
            ("Page", &details.page_url),
        ] {
            if !value.is_empty() {
                lines.push((format!("{label:<7} {value}"), false));
            }
        }
    }

    let max_lines = rows.saturating_sub(4);
    lines.truncate(max_lines);

    let height = lines.len() + 2;
    let top = (rows.saturating_sub(height)) / 2 + 1;
    let left = (cols.saturating_sub(width)) / 2 + 1;
    let border = Theme::fg(&theme.colors.overlay_border);

    let title = " Preview ";
    let top_rule = "─".repeat(width.saturating_sub(2 + text_width(title)));
    position_cursor(top, left);
    print!("{border}{}┌{title}{top_rule}┐{}", Theme::bold(), Theme::reset());

    for (offset, (line, emphasized)) in lines.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{border}│{}", Theme::reset());
        if *emphasized {
            print!("{}", Theme::bold());
        }
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!(" {} ", fit(line, inner));
        print!("{}{border}│{}", Theme::reset(), Theme::reset());
    }

    let hint = " Esc to close ";
    let bottom_rule = "─".repeat(width.saturating_sub(2 + text_width(hint)));
    position_cursor(top + 1 + lines.len(), left);
    print!("{border}└{bottom_rule}{}{hint}{}{border}┘{}", Theme::dim(), Theme::reset(), Theme::reset());
}
