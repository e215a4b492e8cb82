//! Trace context carried across the asynchronous fetch boundary.
//!
//! A fetch leaves the plugin as a `web_request` and comes back as a separate
//! Zellij event. The context captured when the request is issued travels in
//! the request's context map and is re-attached while the response is
//! handled, so both halves land in the same trace.

use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

/// OpenTelemetry trace and span identifiers as hex strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// Trace ID as 32 hex characters.
    pub trace_id: String,

    /// ID of the span that issued the request, as 16 hex characters.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the context of the current `tracing` span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span is
    /// not sampled, which is the normal case in unit tests.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the remote parent of spans created until the guard
    /// is dropped.
    ///
    /// Returns `None` when the identifiers are not valid hex.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let remote = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        tracing::debug!(trace_id = %self.trace_id, "attaching remote trace context");

        Some(opentelemetry::Context::current().with_remote_span_context(remote).attach())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_context_without_subscriber() {
        assert!(TraceContext::from_current().is_none());
    }

    #[test]
    fn attach_rejects_invalid_ids() {
        let context = TraceContext {
            trace_id: "not-hex".to_string(),
            parent_span_id: "b7ad6b7169203331".to_string(),
        };
        assert!(context.attach().is_none());
    }

    #[test]
    fn attach_accepts_valid_ids() {
        let context = TraceContext {
            trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
            parent_span_id: "b7ad6b7169203331".to_string(),
        };
        assert!(context.attach().is_some());
    }
}
