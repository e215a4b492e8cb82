//! Side effects requested by the event handler.
//!
//! The handler stays pure: it mutates [`crate::app::AppState`] and returns
//! actions, and the plugin runtime performs them. Fetches become Zellij
//! `web_request` calls, notifications go to the toast queue.
//!
//! # Example
//!
//! ```rust
//! use imagefinder::app::Action;
//! use imagefinder::domain::Notification;
//!
//! let actions = vec![Action::Notify(Notification::info("...ooops! No images"))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::domain::Notification;
use crate::search::SearchRequest;

/// Commands to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues a search request.
    ///
    /// The result must be fed back as
    /// [`Event::FetchCompleted`](crate::app::Event::FetchCompleted) carrying
    /// the same [`RequestTag`](crate::search::RequestTag).
    Fetch(SearchRequest),

    /// Shows a one-shot notification. Fire-and-forget.
    Notify(Notification),
}
