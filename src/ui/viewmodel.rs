//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data: truncated columns, highlight
//! ranges and pre-formatted labels.
//!
//! # Example
//!
//! ```rust
//! use imagefinder::ui::viewmodel::{DisplayItem, StatusLine};
//!
//! let item = DisplayItem {
//!     position: 1,
//!     tags: "cat, kitten, pet".to_string(),
//!     size: "1280x853".to_string(),
//!     author: "alice".to_string(),
//!     is_selected: true,
//!     highlight_ranges: vec![(0, 3)],
//! };
//! assert_eq!(item.position, 1);
//! assert_eq!(StatusLine::Idle, StatusLine::Idle);
//! ```

use crate::domain::NotificationLevel;

pub const POSITION_COLUMN_WIDTH: usize = 4;
pub const SIZE_COLUMN_WIDTH: usize = 11;
pub const AUTHOR_COLUMN_WIDTH: usize = 18;
pub const COLUMN_GAP: usize = 2;
const MIN_TAGS_COLUMN_WIDTH: usize = 10;

/// Width left for the tags column once the fixed columns and a two-char
/// selection marker are placed.
#[must_use]
pub const fn tags_column_width(cols: usize) -> usize {
    let fixed = 2 + POSITION_COLUMN_WIDTH + SIZE_COLUMN_WIDTH + AUTHOR_COLUMN_WIDTH + 3 * COLUMN_GAP;
    let remaining = cols.saturating_sub(fixed);
    if remaining < MIN_TAGS_COLUMN_WIDTH {
        MIN_TAGS_COLUMN_WIDTH
    } else {
        remaining
    }
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Visible window of result rows.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub search_bar: SearchBarInfo,

    pub status: StatusLine,

    /// Label of the "load more" row. Present only when more pages exist and
    /// no fetch is outstanding.
    pub load_more: Option<String>,

    /// Shown in place of the result table when there are no results.
    pub empty_state: Option<EmptyState>,

    /// Full-size preview overlay, drawn above everything else.
    pub preview: Option<PreviewInfo>,

    /// Toasts currently on screen, newest first.
    pub toasts: Vec<ToastInfo>,

    pub footer: FooterInfo,
}

/// One result row in the gallery table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// 1-based position in the accumulated results.
    pub position: usize,

    pub tags: String,

    /// `WxH` in pixels.
    pub size: String,

    pub author: String,

    pub is_selected: bool,

    /// `(start, end)` char ranges of `tags` matching the query, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,

    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Text currently in the input buffer.
    pub query: String,

    /// Whether keystrokes are going to the search bar.
    pub is_editing: bool,
}

/// Line under the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Idle,
    Loading(String),
    Error(String),
}

/// Contents of the preview overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    pub image_url: String,

    /// Metadata of the matching result, when the URL belongs to one.
    pub details: Option<PreviewDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewDetails {
    pub tags: String,
    pub size: String,
    pub author: String,
    pub page_url: String,
    pub stats: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastInfo {
    pub level: NotificationLevel,
    pub message: String,

    /// UTC time the toast was raised, `HH:MM:SS`.
    pub timestamp: String,
}
