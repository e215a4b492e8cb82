//! Application state and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin shows: the
//! committed search ([`SearchState`]), the preview overlay
//! ([`PreviewState`]), the search bar buffer and the list cursor. Widgets
//! never hold state of their own; they render a
//! [`UIViewModel`](crate::ui::viewmodel::UIViewModel) computed on demand by
//! [`AppState::compute_viewmodel`].
//!
//! The search state machine itself (submit, load more, apply a fetch outcome)
//! lives in [`crate::app::controller`].
//!
//! # Example
//!
//! ```rust
//! use imagefinder::app::AppState;
//! use imagefinder::ui::theme::Theme;
//! use imagefinder::ui::toasts::ToastQueue;
//!
//! let state = AppState::new(Theme::default());
//! assert_eq!(state.search.page, 1);
//! let viewmodel = state.compute_viewmodel(24, 80, &ToastQueue::default());
//! assert!(viewmodel.empty_state.is_some());
//! ```

use super::modes::InputMode;
use crate::domain::ImageItem;
use crate::search::RequestTag;
use crate::ui::theme::Theme;
use crate::ui::toasts::ToastQueue;
use crate::ui::viewmodel::{
    tags_column_width, DisplayItem, EmptyState, FooterInfo, HeaderInfo, PreviewDetails, PreviewInfo,
    SearchBarInfo, StatusLine, UIViewModel, AUTHOR_COLUMN_WIDTH,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Rows taken by everything except the result rows: top padding, header,
/// border, search bar (3), status line, column headings, "load more" row,
/// border, footer and the last line of the pane.
const CHROME_ROWS: usize = 12;

/// The committed search and everything derived from fetching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Last submitted non-blank term. Empty until the first search.
    pub query: String,

    /// Page most recently requested for `query`. Always at least 1.
    pub page: u32,

    /// Accumulated hits: replaced by page 1, extended by later pages.
    pub results: Vec<ImageItem>,

    /// Query whose page 1 produced `results`. Lags behind `query` until the
    /// first page of a new search has been applied.
    pub results_query: String,

    /// Whether another page exists beyond `page`.
    pub has_more: bool,

    /// Whether a fetch is outstanding.
    pub is_loading: bool,

    /// Description of the last failed fetch. Cleared by the next submit.
    pub error_message: Option<String>,
}

impl SearchState {
    /// Whether "load more" may fetch the next page of `query`.
    ///
    /// Requires the loaded results to belong to the committed query, so a
    /// failed first page never lets a later page be appended to another
    /// query's hits.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.is_loading && self.results_query == self.query
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            results: Vec::new(),
            results_query: String::new(),
            has_more: false,
            is_loading: false,
            error_message: None,
        }
    }
}

/// Full-size preview overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewState {
    pub is_open: bool,
    pub image_url: String,
}

impl PreviewState {
    pub fn open(&mut self, image_url: impl Into<String>) {
        self.is_open = true;
        self.image_url = image_url.into();
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.image_url.clear();
    }
}

/// Central application state container.
///
/// Mutated only by the event handler and the controller methods. Everything
/// on screen is derived from it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub search: SearchState,

    pub preview: PreviewState,

    /// Current input handling mode.
    ///
    /// Determines active keybindings and footer text.
    pub input_mode: InputMode,

    /// Search bar contents. Committed to `search.query` only on submit.
    pub input: String,

    /// Zero-based index of the selected row within `search.results`.
    pub selected_index: usize,

    /// `totalHits` of the last successful response.
    pub total_hits: Option<u64>,

    /// The fetch the controller is waiting for, if any.
    ///
    /// Responses whose tag differs are stale.
    pub in_flight: Option<RequestTag>,

    /// Drop responses that do not match `in_flight`.
    ///
    /// When `false`, whichever response arrives last wins.
    pub discard_stale_responses: bool,

    /// Last issued request id.
    pub next_request_id: u64,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates an idle state: no query, page 1, no results, preview closed.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            search: SearchState::default(),
            preview: PreviewState::default(),
            input_mode: InputMode::Normal,
            input: String::new(),
            selected_index: 0,
            total_hits: None,
            in_flight: None,
            discard_stale_responses: true,
            next_request_id: 0,
            theme,
        }
    }

    /// Moves the cursor down one row, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.search.results.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.search.results.len();
    }

    /// Moves the cursor up one row, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.search.results.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.search.results.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_image(&self) -> Option<&ImageItem> {
        self.search.results.get(self.selected_index)
    }

    /// Opens the preview overlay on `image_url`.
    pub fn open_preview(&mut self, image_url: &str) {
        tracing::debug!(image_url, "opening preview");
        self.preview.open(image_url);
    }

    pub fn close_preview(&mut self) {
        tracing::debug!("closing preview");
        self.preview.close();
    }

    /// Computes a renderable view model from current state, terminal size and
    /// the runtime's toast queue.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Subtract UI chrome from `rows` to get the visible row budget
    /// 2. Center the window on the selected index
    /// 3. Pull the window back if it runs past the end of the results
    /// 4. Report the selection relative to the window
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize, toasts: &ToastQueue) -> UIViewModel {
        let results = &self.search.results;
        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(results.len());
        if visible_end - visible_start.min(visible_end) < available_rows && results.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }
        let visible_start = visible_start.min(visible_end);

        let matcher = if self.search.query.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default().ignore_case())
        };
        let tags_width = tags_column_width(cols);

        let display_items = results[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, image)| {
                let absolute_idx = visible_start + relative_idx;
                self.compute_display_item(image, absolute_idx, tags_width, matcher.as_ref())
            })
            .collect();

        UIViewModel {
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.input.clone(),
                is_editing: self.input_mode == InputMode::Editing,
            },
            status: self.compute_status(),
            load_more: self.compute_load_more(),
            empty_state: self.compute_empty_state(),
            preview: self.compute_preview(),
            toasts: toasts.visible(),
            footer: self.compute_footer(),
        }
    }

    fn compute_display_item(
        &self,
        image: &ImageItem,
        absolute_idx: usize,
        tags_width: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        let tags = truncate_chars(&image.tags, tags_width);
        // Never highlight the "..." marker of a cut tag list.
        let visible_chars = if tags == image.tags {
            tags.chars().count()
        } else {
            tags_width.saturating_sub(3)
        };

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            self.compute_highlight_ranges(&image.tags, m)
                .into_iter()
                .filter(|&(start, _)| start < visible_chars)
                .map(|(start, end)| (start, end.min(visible_chars)))
                .collect()
        });

        DisplayItem {
            position: absolute_idx + 1,
            tags,
            size: image.dimensions(),
            author: truncate_chars(&image.user, AUTHOR_COLUMN_WIDTH),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    /// Char ranges of `text` matched by the committed query, coalesced into
    /// contiguous `(start, end)` runs with exclusive ends.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.search.query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = if self.search.query.is_empty() {
            " Image Finder ".to_string()
        } else {
            let loaded = self.search.results.len();
            match self.total_hits {
                Some(total) => format!(" Image Finder: \"{}\" ({loaded} of {total}) ", self.search.query),
                None => format!(" Image Finder: \"{}\" ", self.search.query),
            }
        };
        HeaderInfo { title }
    }

    fn compute_status(&self) -> StatusLine {
        if self.search.is_loading {
            let page = self.in_flight.as_ref().map_or(self.search.page, |tag| tag.page);
            return StatusLine::Loading(format!("Loading page {page} of \"{}\"", self.search.query));
        }
        self.search
            .error_message
            .as_ref()
            .map_or(StatusLine::Idle, |message| StatusLine::Error(message.clone()))
    }

    fn compute_load_more(&self) -> Option<String> {
        if !self.search.can_load_more() {
            return None;
        }
        Some(format!("Load more ({} loaded)", self.search.results.len()))
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.search.results.is_empty() {
            return None;
        }

        let (message, subtitle) = if self.search.query.is_empty() {
            (
                "Search for images".to_string(),
                "Press / to type a query, then Enter to search".to_string(),
            )
        } else if self.search.is_loading {
            ("Searching...".to_string(), format!("Fetching \"{}\"", self.search.query))
        } else if self.search.error_message.is_some() {
            (
                "Search failed".to_string(),
                "Press / to edit the query and try again".to_string(),
            )
        } else {
            (
                "No images found".to_string(),
                format!("Nothing matched \"{}\". Try another term", self.search.query),
            )
        };

        Some(EmptyState { message, subtitle })
    }

    fn compute_preview(&self) -> Option<PreviewInfo> {
        if !self.preview.is_open {
            return None;
        }

        let details = self
            .search
            .results
            .iter()
            .find(|image| image.large_image_url == self.preview.image_url)
            .map(|image| PreviewDetails {
                tags: image.tags.clone(),
                size: image.dimensions(),
                author: image.user.clone(),
                page_url: image.page_url.clone(),
                stats: format!("{} likes, {} views", image.likes, image.views),
            });

        Some(PreviewInfo {
            image_url: self.preview.image_url.clone(),
            details,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.preview.is_open {
            "Esc/q/Enter: close preview".to_string()
        } else {
            match self.input_mode {
                InputMode::Editing => "Enter: search  Esc: cancel  Type to edit query".to_string(),
                InputMode::Normal if self.search.can_load_more() => {
                    "j/k or Ctrl+n/p: navigate  Enter: preview  /: search  m: load more  q: quit".to_string()
                }
                InputMode::Normal => "j/k or Ctrl+n/p: navigate  Enter: preview  /: search  q: quit".to_string(),
            }
        };

        FooterInfo { keybindings }
    }
}

/// Cuts `text` to `max` chars, marking the cut with `...`.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageItem;

    fn image(id: u64, tags: &str) -> ImageItem {
        ImageItem {
            tags: tags.to_string(),
            user: format!("user{id}"),
            image_width: 640,
            image_height: 480,
            ..ImageItem::new(id, format!("https://cdn/{id}_640.jpg"), format!("https://cdn/{id}_1280.jpg"))
        }
    }

    fn state_with_results(count: u64) -> AppState {
        let mut state = AppState::new(Theme::default());
        state.search.query = "cat".to_string();
        state.search.results_query = "cat".to_string();
        state.search.results = (1..=count).map(|id| image(id, "cat, kitten")).collect();
        state
    }

    #[test]
    fn initial_state_is_idle() {
        let state = AppState::new(Theme::default());
        assert_eq!(state.search, SearchState::default());
        assert_eq!(state.search.page, 1);
        assert_eq!(state.preview, PreviewState::default());
        assert!(!state.preview.is_open);
    }

    #[test]
    fn preview_opens_and_closes_to_empty_url() {
        let mut state = AppState::new(Theme::default());
        state.open_preview("https://cdn/1_1280.jpg");
        assert_eq!(
            state.preview,
            PreviewState {
                is_open: true,
                image_url: "https://cdn/1_1280.jpg".to_string()
            }
        );

        state.close_preview();
        assert_eq!(state.preview, PreviewState::default());
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = state_with_results(3);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selection_is_noop_without_results() {
        let mut state = AppState::new(Theme::default());
        state.move_selection_down();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        assert!(state.selected_image().is_none());
    }

    #[test]
    fn viewmodel_windows_around_selection() {
        let mut state = state_with_results(40);
        state.selected_index = 30;

        let vm = state.compute_viewmodel(22, 100, &ToastQueue::default());
        assert_eq!(vm.display_items.len(), 10);
        assert!(vm.display_items[vm.selected_index].is_selected);
        assert_eq!(vm.display_items[vm.selected_index].position, 31);
    }

    #[test]
    fn viewmodel_window_sticks_to_the_end() {
        let mut state = state_with_results(12);
        state.selected_index = 11;

        let vm = state.compute_viewmodel(22, 100, &ToastQueue::default());
        assert_eq!(vm.display_items.len(), 10);
        assert_eq!(vm.display_items.last().map(|item| item.position), Some(12));
        assert_eq!(vm.selected_index, 9);
    }

    #[test]
    fn load_more_row_requires_more_pages_and_idle() {
        let mut state = state_with_results(12);
        state.search.has_more = true;
        assert!(state.compute_viewmodel(24, 80, &ToastQueue::default()).load_more.is_some());

        state.search.is_loading = true;
        assert!(state.compute_viewmodel(24, 80, &ToastQueue::default()).load_more.is_none());

        state.search.is_loading = false;
        state.search.has_more = false;
        assert!(state.compute_viewmodel(24, 80, &ToastQueue::default()).load_more.is_none());
    }

    #[test]
    fn status_prefers_loading_over_error() {
        let mut state = state_with_results(0);
        state.search.error_message = Some("Request failed with status code 500".to_string());
        assert_eq!(
            state.compute_viewmodel(24, 80, &ToastQueue::default()).status,
            StatusLine::Error("Request failed with status code 500".to_string())
        );

        state.search.is_loading = true;
        assert!(matches!(
            state.compute_viewmodel(24, 80, &ToastQueue::default()).status,
            StatusLine::Loading(_)
        ));
    }

    #[test]
    fn query_matches_are_highlighted_in_tags() {
        let mut state = state_with_results(0);
        state.search.results = vec![image(1, "black cat, pet")];

        let vm = state.compute_viewmodel(24, 100, &ToastQueue::default());
        assert_eq!(vm.display_items[0].highlight_ranges, vec![(6, 9)]);
    }

    #[test]
    fn highlights_are_clipped_to_truncated_tags() {
        let mut state = state_with_results(0);
        state.search.results = vec![image(1, &format!("{}cat", "x".repeat(80)))];

        let vm = state.compute_viewmodel(24, 60, &ToastQueue::default());
        let item = &vm.display_items[0];
        assert!(item.tags.ends_with("..."));
        assert!(item.highlight_ranges.is_empty());
    }

    #[test]
    fn highlights_stop_before_the_ellipsis() {
        let mut state = state_with_results(0);
        // 60 columns leave 19 for tags: 16 kept chars plus "...".
        state.search.results = vec![image(1, &format!("{}cat dog", "x".repeat(14)))];

        let vm = state.compute_viewmodel(24, 60, &ToastQueue::default());
        let item = &vm.display_items[0];
        assert_eq!(item.tags, format!("{}ca...", "x".repeat(14)));
        assert_eq!(item.highlight_ranges, vec![(14, 16)]);
    }

    #[test]
    fn load_more_row_hidden_while_results_belong_to_another_query() {
        let mut state = state_with_results(12);
        state.search.has_more = true;
        state.search.query = "dog".to_string();

        let vm = state.compute_viewmodel(24, 80, &ToastQueue::default());
        assert!(vm.load_more.is_none());
        assert!(!vm.footer.keybindings.contains("load more"));
    }

    #[test]
    fn preview_carries_metadata_of_matching_result() {
        let mut state = state_with_results(2);
        state.open_preview("https://cdn/2_1280.jpg");

        let preview = state.compute_viewmodel(24, 80, &ToastQueue::default()).preview.unwrap();
        let details = preview.details.unwrap();
        assert_eq!(details.author, "user2");
        assert_eq!(details.size, "640x480");
    }

    #[test]
    fn empty_state_distinguishes_no_query_from_no_hits() {
        let mut state = AppState::new(Theme::default());
        let vm = state.compute_viewmodel(24, 80, &ToastQueue::default());
        assert_eq!(vm.empty_state.unwrap().message, "Search for images");

        state.search.query = "zzznotfound".to_string();
        let vm = state.compute_viewmodel(24, 80, &ToastQueue::default());
        assert_eq!(vm.empty_state.unwrap().message, "No images found");
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("äöüäöü", 5), "äö...");
        assert_eq!(truncate_chars("short", 10), "short");
    }
}
