//! Outgoing search requests.
//!
//! A [`SearchRequest`] is what the controller asks the runtime to fetch. Its
//! [`RequestTag`] names the query and page the request was issued for and is
//! round-tripped through the `web_request` context map, so the response can
//! be matched back to the request that produced it.

use crate::domain::PAGE_SIZE;
use crate::observability::TraceContext;
use std::collections::BTreeMap;

const CONTEXT_REQUEST_ID: &str = "imagefinder.request_id";
const CONTEXT_QUERY: &str = "imagefinder.query";
const CONTEXT_PAGE: &str = "imagefinder.page";
const CONTEXT_TRACE_ID: &str = "imagefinder.trace_id";
const CONTEXT_PARENT_SPAN_ID: &str = "imagefinder.parent_span_id";

/// Identifies one fetch issued by the controller.
///
/// `request_id` increases monotonically per controller, so two requests for
/// the same query and page still have distinct tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestTag {
    pub request_id: u64,
    pub query: String,
    pub page: u32,
}

/// A fetch command emitted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub tag: RequestTag,

    /// Trace context of the span that issued the request.
    pub trace_context: Option<TraceContext>,
}

impl SearchRequest {
    /// Creates a request for `tag`, capturing the current trace context.
    #[must_use]
    pub fn new(tag: RequestTag) -> Self {
        Self {
            tag,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Encodes the request as a `web_request` context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_REQUEST_ID.to_string(), self.tag.request_id.to_string());
        context.insert(CONTEXT_QUERY.to_string(), self.tag.query.clone());
        context.insert(CONTEXT_PAGE.to_string(), self.tag.page.to_string());
        if let Some(trace) = &self.trace_context {
            context.insert(CONTEXT_TRACE_ID.to_string(), trace.trace_id.clone());
            context.insert(CONTEXT_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }
        context
    }

    /// Decodes a request from a `web_request` context map.
    ///
    /// Returns `None` when the map was not produced by [`Self::to_context`],
    /// which is how responses to other plugins' requests are ignored.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let request_id = context.get(CONTEXT_REQUEST_ID)?.parse().ok()?;
        let query = context.get(CONTEXT_QUERY)?.clone();
        let page = context.get(CONTEXT_PAGE)?.parse().ok()?;

        let trace_context = match (context.get(CONTEXT_TRACE_ID), context.get(CONTEXT_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Some(Self {
            tag: RequestTag {
                request_id,
                query,
                page,
            },
            trace_context,
        })
    }
}

/// Endpoint parameters for the image search service.
///
/// Built from [`crate::Config`]; turns a [`RequestTag`] into the GET URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchApi {
    pub base_url: String,
    pub api_key: String,
    pub image_type: String,
    pub orientation: String,
    pub safesearch: bool,
}

impl SearchApi {
    /// Builds the request URL for a tag.
    ///
    /// The query and key are percent-encoded; the page size is always
    /// [`PAGE_SIZE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use imagefinder::search::{RequestTag, SearchApi};
    ///
    /// let api = SearchApi {
    ///     base_url: "https://pixabay.com/api/".to_string(),
    ///     api_key: "k".to_string(),
    ///     image_type: "photo".to_string(),
    ///     orientation: "horizontal".to_string(),
    ///     safesearch: true,
    /// };
    /// let tag = RequestTag { request_id: 1, query: "red cats".to_string(), page: 2 };
    /// assert_eq!(
    ///     api.url_for(&tag),
    ///     "https://pixabay.com/api/?key=k&q=red%20cats&page=2&per_page=12&image_type=photo&orientation=horizontal&safesearch=true"
    /// );
    /// ```
    #[must_use]
    pub fn url_for(&self, tag: &RequestTag) -> String {
        format!(
            "{base}?key={key}&q={query}&page={page}&per_page={PAGE_SIZE}&image_type={image_type}&orientation={orientation}&safesearch={safesearch}",
            base = self.base_url,
            key = urlencoding::encode(&self.api_key),
            query = urlencoding::encode(&tag.query),
            page = tag.page,
            image_type = urlencoding::encode(&self.image_type),
            orientation = urlencoding::encode(&self.orientation),
            safesearch = self.safesearch,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag() -> RequestTag {
        RequestTag {
            request_id: 42,
            query: "yellow flowers & bees".to_string(),
            page: 3,
        }
    }

    #[test]
    fn context_round_trips_tag_and_trace() {
        let request = SearchRequest {
            tag: tag(),
            trace_context: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };

        let decoded = SearchRequest::from_context(&request.to_context()).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn context_without_trace_decodes() {
        let request = SearchRequest {
            tag: tag(),
            trace_context: None,
        };

        let context = request.to_context();
        assert_eq!(context.len(), 3);
        assert_eq!(SearchRequest::from_context(&context), Some(request));
    }

    #[test]
    fn foreign_context_is_ignored() {
        let mut context = BTreeMap::new();
        context.insert("other_plugin".to_string(), "1".to_string());
        assert!(SearchRequest::from_context(&context).is_none());

        context.insert(CONTEXT_REQUEST_ID.to_string(), "not-a-number".to_string());
        context.insert(CONTEXT_QUERY.to_string(), "cats".to_string());
        context.insert(CONTEXT_PAGE.to_string(), "1".to_string());
        assert!(SearchRequest::from_context(&context).is_none());
    }

    #[test]
    fn url_encodes_query_and_fixes_page_size() {
        let api = SearchApi {
            base_url: "https://example.test/api/".to_string(),
            api_key: "abc".to_string(),
            image_type: "all".to_string(),
            orientation: "vertical".to_string(),
            safesearch: false,
        };

        let url = api.url_for(&tag());
        assert!(url.starts_with("https://example.test/api/?key=abc&"));
        assert!(url.contains("q=yellow%20flowers%20%26%20bees"));
        assert!(url.contains("&page=3&per_page=12&"));
        assert!(url.ends_with("image_type=all&orientation=vertical&safesearch=false"));
    }
}
