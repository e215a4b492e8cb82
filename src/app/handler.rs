//! Event handling and state transition logic.
//!
//! The plugin runtime translates Zellij events (key presses, web request
//! results, permission answers) into [`Event`]s. [`handle_event`] applies one
//! event to [`AppState`] and returns whether the screen must be redrawn plus
//! the [`Action`]s the runtime should perform.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenSelected`
//! - **Search bar**: `EditQuery`, `Char`, `Backspace`, `SubmitInput`, `CancelEdit`
//! - **Search**: `Submit`, `LoadMore`, `FetchCompleted`
//! - **Preview**: `OpenPreview`, `ClosePreview`
//! - **System**: `CloseFocus`, `PermissionDenied`
//!
//! # Example
//!
//! ```rust
//! use imagefinder::app::{handle_event, Action, AppState, Event};
//! use imagefinder::ui::theme::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Submit { term: "cats".into() })?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::Fetch(_)));
//! # Ok::<(), imagefinder::domain::ImageFinderError>(())
//! ```

use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{Notification, SearchError, SearchPage};
use crate::search::RequestTag;

/// Message shown when Zellij refuses the web access permission.
pub const PERMISSION_DENIED_MESSAGE: &str = "Web access permission denied, searches cannot run";

/// Events triggered by user input or by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor down one row (wraps to top).
    KeyDown,
    /// Moves the cursor up one row (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Focuses the search bar.
    EditQuery,
    /// Leaves the search bar without searching.
    CancelEdit,
    /// Appends a character to the search bar.
    Char(char),
    /// Removes the last character from the search bar.
    Backspace,
    /// Submits the search bar contents.
    SubmitInput,

    /// Submits a search term directly.
    Submit {
        term: String,
    },
    /// Requests the next page of the current search.
    LoadMore,

    /// Opens the preview for the selected result.
    OpenSelected,
    OpenPreview {
        image_url: String,
    },
    ClosePreview,

    /// A fetch settled.
    ///
    /// `tag` is the [`RequestTag`] the fetch was issued with; `outcome` is
    /// the decoded response or the single search error kind.
    FetchCompleted {
        tag: RequestTag,
        outcome: std::result::Result<SearchPage, SearchError>,
    },

    /// The user refused the web access permission.
    PermissionDenied,
}

/// Applies `event` to `state`.
///
/// Returns whether a redraw is needed and the actions to execute in order.
///
/// # Errors
///
/// Currently infallible for every event; the `Result` keeps the runtime's
/// error path uniform with configuration and theme loading.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::EditQuery => {
            tracing::debug!("entering editing mode");
            state.input_mode = InputMode::Editing;
            Ok((true, vec![]))
        }
        Event::CancelEdit => {
            tracing::debug!(input = %state.input, "cancelling edit");
            state.input_mode = InputMode::Normal;
            state.input.clone_from(&state.search.query);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            state.input.push(*c);
            tracing::trace!(input = %state.input, char = %c, "search input updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            state.input.pop();
            Ok((true, vec![]))
        }
        Event::SubmitInput => {
            state.input_mode = InputMode::Normal;
            let term = state.input.clone();
            Ok((true, state.submit_query(&term).into_iter().collect()))
        }
        Event::Submit { term } => {
            state.input_mode = InputMode::Normal;
            let action = state.submit_query(term);
            if action.is_some() {
                state.input.clone_from(&state.search.query);
            }
            Ok((true, action.into_iter().collect()))
        }
        Event::LoadMore => {
            let actions: Vec<Action> = state.request_next_page().into_iter().collect();
            Ok((!actions.is_empty(), actions))
        }
        Event::OpenSelected => {
            let Some(image) = state.selected_image() else {
                tracing::debug!("no image selected");
                return Ok((false, vec![]));
            };
            let image_url = image.large_image_url.clone();
            state.open_preview(&image_url);
            Ok((true, vec![]))
        }
        Event::OpenPreview { image_url } => {
            state.open_preview(image_url);
            Ok((true, vec![]))
        }
        Event::ClosePreview => {
            state.close_preview();
            Ok((true, vec![]))
        }
        Event::FetchCompleted { tag, outcome } => Ok(state.apply_fetch_outcome(tag, outcome)),
        Event::PermissionDenied => {
            tracing::warn!("web access permission denied");
            state.search.error_message = Some(PERMISSION_DENIED_MESSAGE.to_string());
            // Nothing issued before the denial will be answered.
            state.search.is_loading = false;
            state.in_flight = None;
            Ok((true, vec![Action::Notify(Notification::error(PERMISSION_DENIED_MESSAGE))]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageItem;
    use crate::ui::theme::Theme;

    fn new_state() -> AppState {
        AppState::new(Theme::default())
    }

    fn fetch_tag(actions: &[Action]) -> RequestTag {
        match actions {
            [Action::Fetch(request)] => request.tag.clone(),
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    #[test]
    fn typing_only_edits_in_editing_mode() {
        let mut state = new_state();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.input.is_empty());

        handle_event(&mut state, &Event::EditQuery).unwrap();
        for c in "cart".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Char('s')).unwrap();
        assert_eq!(state.input, "cars");
    }

    #[test]
    fn submit_input_fetches_and_leaves_editing() {
        let mut state = new_state();
        handle_event(&mut state, &Event::EditQuery).unwrap();
        state.input = "cats".to_string();

        let (_, actions) = handle_event(&mut state, &Event::SubmitInput).unwrap();

        assert_eq!(fetch_tag(&actions).query, "cats");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn blank_submit_emits_nothing() {
        let mut state = new_state();
        let (_, actions) = handle_event(&mut state, &Event::Submit { term: "   ".into() }).unwrap();
        assert!(actions.is_empty());
        assert!(!state.search.is_loading);
    }

    #[test]
    fn blank_submit_keeps_search_bar_contents() {
        let mut state = new_state();
        handle_event(&mut state, &Event::Submit { term: " cats ".into() }).unwrap();
        assert_eq!(state.input, "cats");

        handle_event(&mut state, &Event::Submit { term: "   ".into() }).unwrap();
        assert_eq!(state.input, "cats");
        assert_eq!(state.search.query, "cats");
    }

    #[test]
    fn cancel_edit_restores_committed_query() {
        let mut state = new_state();
        handle_event(&mut state, &Event::Submit { term: "cats".into() }).unwrap();
        handle_event(&mut state, &Event::EditQuery).unwrap();
        handle_event(&mut state, &Event::Char('!')).unwrap();

        handle_event(&mut state, &Event::CancelEdit).unwrap();
        assert_eq!(state.input, "cats");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn fetch_completion_flows_through_controller() {
        let mut state = new_state();
        let (_, actions) = handle_event(&mut state, &Event::Submit { term: "cats".into() }).unwrap();
        let tag = fetch_tag(&actions);

        let outcome = Ok(SearchPage {
            total_hits: 1,
            hits: vec![ImageItem::new(1, "https://cdn/1_640.jpg", "https://cdn/1_1280.jpg")],
        });
        let (render, actions) = handle_event(&mut state, &Event::FetchCompleted { tag, outcome }).unwrap();

        assert!(render);
        assert!(matches!(&actions[..], [Action::Notify(_)]));
        assert_eq!(state.search.results.len(), 1);
    }

    #[test]
    fn open_selected_previews_full_size_url() {
        let mut state = new_state();
        state.search.results = vec![ImageItem::new(1, "https://cdn/1_640.jpg", "https://cdn/1_1280.jpg")];

        handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert!(state.preview.is_open);
        assert_eq!(state.preview.image_url, "https://cdn/1_1280.jpg");

        handle_event(&mut state, &Event::ClosePreview).unwrap();
        assert!(!state.preview.is_open);
        assert!(state.preview.image_url.is_empty());
    }

    #[test]
    fn open_selected_without_results_is_noop() {
        let mut state = new_state();
        let (render, _) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert!(!render);
        assert!(!state.preview.is_open);
    }

    #[test]
    fn load_more_without_more_pages_does_not_redraw() {
        let mut state = new_state();
        let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn permission_denial_is_shown_inline() {
        let mut state = new_state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionDenied).unwrap();
        assert_eq!(state.search.error_message.as_deref(), Some(PERMISSION_DENIED_MESSAGE));
        assert_eq!(actions, vec![Action::Notify(Notification::error(PERMISSION_DENIED_MESSAGE))]);
    }

    #[test]
    fn permission_denial_settles_pending_search() {
        let mut state = new_state();
        handle_event(&mut state, &Event::Submit { term: "cats".into() }).unwrap();
        assert!(state.search.is_loading);

        handle_event(&mut state, &Event::PermissionDenied).unwrap();
        assert!(!state.search.is_loading);
        assert!(state.in_flight.is_none());
        assert!(matches!(
            state.compute_viewmodel(24, 80, &crate::ui::toasts::ToastQueue::default()).status,
            crate::ui::viewmodel::StatusLine::Error(_)
        ));
    }

    #[test]
    fn close_focus_hides_plugin() {
        let mut state = new_state();
        let (render, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
