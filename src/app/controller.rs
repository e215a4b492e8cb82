//! Search and pagination controller.
//!
//! Owns the search state machine on top of [`AppState`]. Two triggers start a
//! fetch: submitting a query ([`AppState::submit_query`]) and asking for the
//! next page ([`AppState::request_next_page`]). Neither performs I/O; both
//! mark the state as loading and return an [`Action::Fetch`] for the runtime.
//! When the response comes back, [`AppState::apply_fetch_outcome`] folds it
//! into the state and emits the notifications.
//!
//! ```text
//! submit_query ──┐                         ┌── Ok(page)  → replace/append, has_more, notify
//!                ├─→ is_loading, Fetch ──→ apply_fetch_outcome
//! next page ─────┘                         └── Err(e)    → error_message, notify
//!                                             (is_loading = false in every case)
//! ```
//!
//! Every fetch is tagged with a [`RequestTag`]. With `discard_stale_responses`
//! set, only the response to the latest request is applied.

use super::{Action, AppState};
use crate::domain::notification::{FETCHED_MESSAGE, NO_IMAGES_MESSAGE};
use crate::domain::{Notification, SearchError, SearchPage};
use crate::search::{RequestTag, SearchRequest};

impl AppState {
    /// Starts a new search for `term`.
    ///
    /// Blank terms and the query that is already current are ignored, unless
    /// the first page of that query failed and nothing is loading, in which
    /// case page 1 is fetched again. Otherwise the query is committed, the
    /// page resets to 1, any previous error is cleared and page 1 is fetched.
    pub fn submit_query(&mut self, term: &str) -> Option<Action> {
        let term = term.trim();
        if term.is_empty() {
            tracing::debug!("ignoring blank query");
            return None;
        }
        let first_page_failed = self.search.error_message.is_some()
            && !self.search.is_loading
            && self.search.results_query != self.search.query;
        if term == self.search.query && !first_page_failed {
            tracing::debug!(query = %term, "query unchanged, not searching again");
            return None;
        }

        tracing::info!(query = %term, "submitting query");
        self.search.query = term.to_string();
        self.search.page = 1;
        self.search.error_message = None;

        Some(self.begin_fetch())
    }

    /// Fetches the page after the current one.
    ///
    /// A no-op unless more pages exist, nothing is loading and the loaded
    /// results belong to the committed query.
    pub fn request_next_page(&mut self) -> Option<Action> {
        if !self.search.can_load_more() {
            tracing::debug!(
                has_more = self.search.has_more,
                is_loading = self.search.is_loading,
                results_query = %self.search.results_query,
                "load more ignored"
            );
            return None;
        }

        self.search.page += 1;
        tracing::info!(query = %self.search.query, page = self.search.page, "requesting next page");

        Some(self.begin_fetch())
    }

    fn begin_fetch(&mut self) -> Action {
        self.next_request_id += 1;
        let tag = RequestTag {
            request_id: self.next_request_id,
            query: self.search.query.clone(),
            page: self.search.page,
        };

        self.search.is_loading = true;
        self.in_flight = Some(tag.clone());

        tracing::debug!(request_id = tag.request_id, query = %tag.query, page = tag.page, "fetch issued");
        Action::Fetch(SearchRequest::new(tag))
    }

    /// Applies the outcome of the fetch identified by `tag`.
    ///
    /// Returns whether the screen changed and the notifications to raise.
    /// `is_loading` is always cleared last when the outcome is applied.
    pub fn apply_fetch_outcome(
        &mut self,
        tag: &RequestTag,
        outcome: &Result<SearchPage, SearchError>,
    ) -> (bool, Vec<Action>) {
        let _span = tracing::debug_span!(
            "apply_fetch_outcome",
            request_id = tag.request_id,
            query = %tag.query,
            page = tag.page,
            ok = outcome.is_ok()
        )
        .entered();

        let is_current = self.in_flight.as_ref() == Some(tag);
        if !is_current && self.discard_stale_responses {
            tracing::debug!(in_flight = ?self.in_flight, "discarding stale response");
            return (false, vec![]);
        }
        if is_current {
            self.in_flight = None;
        }

        let mut actions = vec![];
        match outcome {
            Ok(page) => self.apply_page(tag, page, &mut actions),
            Err(error) => {
                tracing::warn!(error = %error, "search request failed");
                self.search.error_message = Some(error.message().to_string());
                // Step back so the next "load more" asks for the page that failed.
                if is_current && tag.page > 1 && self.search.page == tag.page {
                    self.search.page = tag.page - 1;
                }
                actions.push(Action::Notify(Notification::error(error.message())));
            }
        }

        self.search.is_loading = false;
        (true, actions)
    }

    fn apply_page(&mut self, tag: &RequestTag, page: &SearchPage, actions: &mut Vec<Action>) {
        let page_number = tag.page;
        let total_pages = page.total_pages();
        let requested = u64::from(page_number);
        let mut has_more = requested < total_pages;

        if page_number == 1 {
            self.search.results.clone_from(&page.hits);
            self.search.results_query.clone_from(&tag.query);
            self.selected_index = 0;
        } else if tag.query == self.search.results_query {
            self.search.results.extend(page.hits.iter().cloned());
        } else {
            tracing::debug!(results_query = %self.search.results_query, "page belongs to another query, not appending");
            return;
        }
        self.total_hits = Some(page.total_hits);

        if page.hits.is_empty() {
            actions.push(Action::Notify(Notification::info(NO_IMAGES_MESSAGE)));
        }
        if page_number == 1 && !page.hits.is_empty() {
            actions.push(Action::Notify(Notification::success(FETCHED_MESSAGE)));
        }
        if requested == total_pages {
            has_more = false;
        }
        self.search.has_more = has_more;

        tracing::debug!(
            hits = page.hits.len(),
            total_hits = page.total_hits,
            total_pages,
            has_more,
            loaded = self.search.results.len(),
            "page applied"
        );
    }
}
