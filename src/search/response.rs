//! Decoding of search responses.
//!
//! Every way a response can go wrong ends up as a single [`SearchError`]:
//! a non-success status, an empty transport reply, or a body that is not a
//! search page.

use crate::domain::{SearchError, SearchPage};

/// Longest upstream error body quoted in an error message.
const MAX_QUOTED_BODY: usize = 160;

/// Turns a raw `web_request` result into a page of hits.
///
/// # Errors
///
/// Returns a [`SearchError`] when `status` is outside `200..300` or the body
/// does not decode as a search page. Upstream error bodies are short plain
/// text (for example `[ERROR 400] "key" is invalid`), so they are appended to
/// the status message when present.
///
/// # Examples
///
/// ```
/// use imagefinder::search::decode_response;
///
/// let page = decode_response(200, br#"{"total": 0, "totalHits": 0, "hits": []}"#).unwrap();
/// assert!(page.hits.is_empty());
///
/// let error = decode_response(429, b"").unwrap_err();
/// assert_eq!(error.to_string(), "Request failed with status code 429");
/// ```
pub fn decode_response(status: u16, body: &[u8]) -> Result<SearchPage, SearchError> {
    if !(200..300).contains(&status) {
        let detail = String::from_utf8_lossy(body);
        let detail = detail.trim();
        let message = if detail.is_empty() || detail.len() > MAX_QUOTED_BODY {
            format!("Request failed with status code {status}")
        } else {
            format!("Request failed with status code {status}: {detail}")
        };
        tracing::debug!(status, "search request returned an error status");
        return Err(SearchError::new(message));
    }

    serde_json::from_slice::<SearchPage>(body).map_err(|e| {
        tracing::debug!(error = %e, body_len = body.len(), "failed to decode search response");
        SearchError::new(format!("Malformed search response: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_successful_page() {
        let body = br#"{
            "total": 4692,
            "totalHits": 500,
            "hits": [
                {"id": 1, "webformatURL": "w1", "largeImageURL": "l1", "tags": "cat"},
                {"id": 2, "webformatURL": "w2", "largeImageURL": "l2", "tags": "cat, kitten"}
            ]
        }"#;

        let page = decode_response(200, body).unwrap();
        assert_eq!(page.total_hits, 500);
        assert_eq!(page.hits.len(), 2);
        assert_eq!(page.hits[1].large_image_url, "l2");
    }

    #[test]
    fn quotes_short_upstream_error_body() {
        let error = decode_response(400, b"[ERROR 400] \"key\" is invalid").unwrap_err();
        assert_eq!(
            error.message(),
            "Request failed with status code 400: [ERROR 400] \"key\" is invalid"
        );
    }

    #[test]
    fn omits_long_upstream_error_body() {
        let body = "x".repeat(MAX_QUOTED_BODY + 1);
        let error = decode_response(502, body.as_bytes()).unwrap_err();
        assert_eq!(error.message(), "Request failed with status code 502");
    }

    #[test]
    fn malformed_body_is_a_search_error() {
        let error = decode_response(200, b"<html>oops</html>").unwrap_err();
        assert!(error.message().starts_with("Malformed search response:"));

        let error = decode_response(200, br#"{"hits": []}"#).unwrap_err();
        assert!(error.message().contains("totalHits"));
    }
}
